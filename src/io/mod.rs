//! I/O operations for loading splat datasets.
//!
//! Currently a single format: PLY point clouds with per-vertex splat
//! attributes, in ascii or binary little-endian encoding.

mod ply;

// Re-export public types and functions
pub use ply::{load_splats, DatasetLoadError};
