//! Core data structures and mathematical operations.
//!
//! This module contains the fundamental types used throughout the system:
//! - `SplatRecord`/`SplatCloud`: packed per-instance splat data
//! - `Camera`: orbit/pan/zoom/fly navigation state machine
//! - Covariance engine and math utilities
//!
//! All types here are "pure data" - no I/O, no rendering logic.

mod camera;
pub mod covariance;
pub mod math;
mod splat;

// Re-export public types
pub use camera::{Camera, CameraMode, FlyDirection};
pub use covariance::{compute_cov3d, compute_cov3d_batch, CHUNK_SIZE};
pub use math::{rotation_from_quaternion, sigmoid, SH_C0};
pub use splat::{SplatCloud, SplatRecord, FLOATS_PER_RECORD};
