//! 3D covariance computation for Gaussian splats.
//!
//! Each splat's shape is stored factorized as a scale vector plus a rotation
//! quaternion. For rendering we bake that into the 3×3 covariance matrix
//! M = (S·R)ᵗ(S·R), which is symmetric, so only its six unique entries are
//! emitted: `cov_a` holds row 0 and `cov_b` holds (M11, M12, M22).

use crate::core::math::rotation_from_quaternion;
use nalgebra::{Matrix3, Vector3};

/// Number of splats converted per batch pass.
///
/// Covariance construction is a pure per-item computation; the batch entry
/// point walks the input in chunks of this size so peak working-set stays
/// bounded no matter how large the cloud is.
pub const CHUNK_SIZE: usize = 100_000;

/// Compute the compact covariance of a single splat.
///
/// Steps:
/// 1. S = diag(scale)
/// 2. R from quaternion (r, x, y, z), components used as stored
/// 3. M' = S·R
/// 4. M = M'ᵗ·M' (symmetric positive-semidefinite by construction)
///
/// Returns (row 0 of M, (M11, M12, M22)). NaN or Inf inputs propagate into
/// the output; nothing is trapped here.
pub fn compute_cov3d(scale: Vector3<f32>, rotation: [f32; 4]) -> ([f32; 3], [f32; 3]) {
    let s = Matrix3::from_diagonal(&scale);
    let r = rotation_from_quaternion(rotation);

    let m = s * r;
    let sigma = m.transpose() * m;

    (
        [sigma[(0, 0)], sigma[(0, 1)], sigma[(0, 2)]],
        [sigma[(1, 1)], sigma[(1, 2)], sigma[(2, 2)]],
    )
}

/// Compute compact covariances for a whole cloud, chunked.
///
/// `scales` and `rotations` must have equal length. Output order matches
/// input order; results are independent of the chunking. Chunk boundaries
/// come from ceiling division (`slice::chunks`), so an input whose length is
/// an exact multiple of [`CHUNK_SIZE`] never produces an empty trailing
/// chunk.
pub fn compute_cov3d_batch(
    scales: &[Vector3<f32>],
    rotations: &[[f32; 4]],
) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    compute_cov3d_chunked(scales, rotations, CHUNK_SIZE)
}

/// Batch covariance with an explicit chunk size (exposed for testing the
/// chunk-size independence of the output).
pub fn compute_cov3d_chunked(
    scales: &[Vector3<f32>],
    rotations: &[[f32; 4]],
    chunk_size: usize,
) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    debug_assert_eq!(scales.len(), rotations.len());

    let mut cov_a = Vec::with_capacity(scales.len());
    let mut cov_b = Vec::with_capacity(scales.len());

    for (scale_chunk, rotation_chunk) in scales
        .chunks(chunk_size)
        .zip(rotations.chunks(chunk_size))
    {
        for (scale, rotation) in scale_chunk.iter().zip(rotation_chunk) {
            let (a, b) = compute_cov3d(*scale, *rotation);
            cov_a.push(a);
            cov_b.push(b);
        }
    }

    (cov_a, cov_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_rotation_uniform_scale() {
        // With R = I and S = sI: M = S² = diag(s², s², s²)
        let s = 3.0;
        let (a, b) = compute_cov3d(Vector3::new(s, s, s), [1.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(a[0], s * s, epsilon = 1e-5);
        assert_relative_eq!(a[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(a[2], 0.0, epsilon = 1e-6);
        assert_relative_eq!(b[0], s * s, epsilon = 1e-5);
        assert_relative_eq!(b[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(b[2], s * s, epsilon = 1e-5);
    }

    #[test]
    fn test_identity_rotation_anisotropic_scale() {
        let (a, b) = compute_cov3d(Vector3::new(1.0, 2.0, 4.0), [1.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(a[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(b[0], 4.0, epsilon = 1e-5);
        assert_relative_eq!(b[2], 16.0, epsilon = 1e-4);
    }

    #[test]
    fn test_matches_reference_reconstruction() {
        // Reconstruct M = (SR)ᵗ(SR) with plain nalgebra products and compare
        // the six packed entries against the engine.
        let scale = Vector3::new(0.5, 1.5, 2.5);
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let q = [h, 0.0, h, 0.0];

        let s = Matrix3::from_diagonal(&scale);
        let r = rotation_from_quaternion(q);
        let m = (s * r).transpose() * (s * r);

        let (a, b) = compute_cov3d(scale, q);
        assert_relative_eq!(a[0], m[(0, 0)], epsilon = 1e-5);
        assert_relative_eq!(a[1], m[(0, 1)], epsilon = 1e-5);
        assert_relative_eq!(a[2], m[(0, 2)], epsilon = 1e-5);
        assert_relative_eq!(b[0], m[(1, 1)], epsilon = 1e-5);
        assert_relative_eq!(b[1], m[(1, 2)], epsilon = 1e-5);
        assert_relative_eq!(b[2], m[(2, 2)], epsilon = 1e-5);
    }

    #[test]
    fn test_nan_inputs_propagate() {
        let (a, _b) = compute_cov3d(Vector3::new(f32::NAN, 1.0, 1.0), [1.0, 0.0, 0.0, 0.0]);
        assert!(a[0].is_nan());
    }
}
