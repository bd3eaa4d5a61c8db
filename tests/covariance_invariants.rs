//! Invariant tests for the covariance engine.
//!
//! Each test checks a property the instanced renderer relies on, with
//! inputs simple enough to verify by hand or against a direct nalgebra
//! reconstruction.

use approx::assert_relative_eq;
use nalgebra::{Matrix3, Vector3};
use splatview::core::{compute_cov3d, covariance, rotation_from_quaternion, CHUNK_SIZE};

/// Deterministic pseudo-random inputs, no RNG dependency needed.
fn synthetic_inputs(n: usize) -> (Vec<Vector3<f32>>, Vec<[f32; 4]>) {
    let mut state = 0x2545f491u32;
    let mut next = move || {
        // xorshift32, mapped into [0.1, 2.1)
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        0.1 + (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0
    };

    let mut scales = Vec::with_capacity(n);
    let mut rotations = Vec::with_capacity(n);
    for _ in 0..n {
        scales.push(Vector3::new(next(), next(), next()));
        rotations.push([next(), next() - 1.0, next() - 1.0, next() - 1.0]);
    }
    (scales, rotations)
}

#[test]
fn test_identity_rotation_uniform_scale_reference() {
    let s = 2.0;
    let (a, b) = compute_cov3d(Vector3::new(s, s, s), [1.0, 0.0, 0.0, 0.0]);
    assert_relative_eq!(a[0], 4.0, epsilon = 1e-5);
    assert_relative_eq!(a[1], 0.0, epsilon = 1e-6);
    assert_relative_eq!(a[2], 0.0, epsilon = 1e-6);
    assert_relative_eq!(b[0], 4.0, epsilon = 1e-5);
    assert_relative_eq!(b[1], 0.0, epsilon = 1e-6);
    assert_relative_eq!(b[2], 4.0, epsilon = 1e-5);
}

#[test]
fn test_packed_entries_describe_a_symmetric_matrix() {
    // Reconstruct the full M from (cov_a, cov_b) and compare against the
    // direct (SR)ᵗ(SR) product. M = Mᵗ holds by construction, so the six
    // packed entries must fully determine it.
    let (scales, rotations) = synthetic_inputs(32);
    for (scale, rotation) in scales.iter().zip(&rotations) {
        let (a, b) = compute_cov3d(*scale, *rotation);
        let m_packed = Matrix3::new(
            a[0], a[1], a[2], //
            a[1], b[0], b[1], //
            a[2], b[1], b[2],
        );

        let s = Matrix3::from_diagonal(scale);
        let r = rotation_from_quaternion(*rotation);
        let m_reference = (s * r).transpose() * (s * r);

        assert_relative_eq!(m_packed, m_reference, epsilon = 1e-4);
        assert_relative_eq!(m_reference, m_reference.transpose(), epsilon = 1e-5);
    }
}

#[test]
fn test_chunked_output_is_chunk_size_independent() {
    let (scales, rotations) = synthetic_inputs(1_000);

    let whole = covariance::compute_cov3d_chunked(&scales, &rotations, scales.len());
    for chunk_size in [1, 7, 100, 333, 1_000, 10_000] {
        let chunked = covariance::compute_cov3d_chunked(&scales, &rotations, chunk_size);
        assert_eq!(chunked, whole, "chunk_size {chunk_size} changed the output");
    }
}

#[test]
fn test_exact_multiple_of_chunk_size_has_no_phantom_tail() {
    // N an exact multiple of the chunk size must yield exactly N outputs in
    // input order.
    let (scales, rotations) = synthetic_inputs(300);
    let (a, b) = covariance::compute_cov3d_chunked(&scales, &rotations, 100);
    assert_eq!(a.len(), 300);
    assert_eq!(b.len(), 300);

    let (a0, b0) = compute_cov3d(scales[0], rotations[0]);
    let (a_last, b_last) = compute_cov3d(scales[299], rotations[299]);
    assert_eq!((a[0], b[0]), (a0, b0));
    assert_eq!((a[299], b[299]), (a_last, b_last));
}

#[test]
fn test_full_scale_batch_matches_single_chunk() {
    // 250k items split at the production chunk size against one big chunk.
    let (scales, rotations) = synthetic_inputs(250_000);

    let batched = covariance::compute_cov3d_batch(&scales, &rotations);
    let whole = covariance::compute_cov3d_chunked(&scales, &rotations, scales.len());
    assert_eq!(batched, whole);
    assert_eq!(batched.0.len(), 250_000);
    assert!(scales.len() > 2 * CHUNK_SIZE, "input must span several chunks");
}
