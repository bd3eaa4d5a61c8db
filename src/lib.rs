//! # splatview: Gaussian splat viewing core
//!
//! This crate prepares 3D Gaussian-splat point clouds for GPU instanced
//! rendering and drives free-fly/orbit camera navigation. The windowing
//! host, shader compilation, and draw-call issuance live outside; they
//! consume the flat instance table and per-frame uniform block produced
//! here.
//!
//! ## Architecture
//!
//! The crate is organized into three modules:
//!
//! - `core`: fundamental types (splat records, covariance engine, camera)
//! - `io`: PLY dataset loading
//! - `render`: per-frame projection/focal parameters and the uniform block
//!
//! ## Pipeline
//!
//! A PLY file of raw per-point attributes is loaded once at startup into a
//! [`SplatCloud`]: positions copied verbatim, colors derived from the SH DC
//! coefficients and opacity logit, and scale/rotation baked into compact
//! 3×3 covariances. Each frame, the host reads the camera's view matrix and
//! the viewport's [`render::FrameParams`] and uploads them as uniforms.

// Core data structures and math
pub mod core;

// I/O operations (PLY loading)
pub mod io;

// Per-frame render parameters
pub mod render;

// Re-export commonly used types at crate root for convenience
pub use crate::core::{Camera, CameraMode, FlyDirection, SplatCloud, SplatRecord};
pub use io::{load_splats, DatasetLoadError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
