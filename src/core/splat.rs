//! Splat instance records and the loaded cloud.
//!
//! A [`SplatRecord`] is the per-instance vertex data consumed by the GPU:
//! - Flat memory layout (no pointers), 13 floats per record
//! - Field order matches the shader's attribute bindings
//! - bytemuck Pod + Zeroable for direct buffer upload

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Number of f32 lanes per instance record.
pub const FLOATS_PER_RECORD: usize = 13;

/// One splat, packed for instanced drawing.
///
/// Attribute layout, in binding order:
/// - `position`: world-space center
/// - `color`: (r, g, b, alpha), DC color plus sigmoid opacity
/// - `cov_a`: row 0 of the 3×3 covariance
/// - `cov_b`: (M11, M12, M22), the remaining unique entries of the
///   symmetric covariance
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct SplatRecord {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub cov_a: [f32; 3],
    pub cov_b: [f32; 3],
}

/// An ordered collection of splat records.
///
/// Record order is input-file order. The cloud is built once at load time
/// and read-only afterwards; the byte view feeds the instance buffer upload.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SplatCloud {
    records: Vec<SplatRecord>,
}

impl SplatCloud {
    /// Build a cloud from already-assembled records.
    pub fn from_records(records: Vec<SplatRecord>) -> Self {
        Self { records }
    }

    /// Number of splats.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the cloud is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records as a slice.
    pub fn as_slice(&self) -> &[SplatRecord] {
        &self.records
    }

    /// Raw bytes of the flat record table, 52 bytes per splat, for GPU
    /// buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_13_tightly_packed_floats() {
        assert_eq!(
            std::mem::size_of::<SplatRecord>(),
            FLOATS_PER_RECORD * std::mem::size_of::<f32>()
        );
    }

    #[test]
    fn test_byte_view_matches_field_order() {
        let record = SplatRecord {
            position: [1.0, 2.0, 3.0],
            color: [4.0, 5.0, 6.0, 7.0],
            cov_a: [8.0, 9.0, 10.0],
            cov_b: [11.0, 12.0, 13.0],
        };
        let cloud = SplatCloud::from_records(vec![record]);

        let floats: &[f32] = bytemuck::cast_slice(cloud.as_bytes());
        let expected: Vec<f32> = (1..=13).map(|i| i as f32).collect();
        assert_eq!(floats, expected.as_slice());
    }

    #[test]
    fn test_byte_view_length() {
        let cloud = SplatCloud::from_records(vec![SplatRecord::zeroed(); 5]);
        assert_eq!(cloud.as_bytes().len(), 5 * 52);
    }
}
