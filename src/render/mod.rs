//! Per-frame parameters for the splat renderer.
//!
//! The renderer proper (shaders, buffers, draw calls) lives outside this
//! crate; what it needs from us each frame is the view matrix, a projection
//! matrix, and the focal/field-of-view scalars the splat vertex shader uses
//! to project covariances. [`FrameUniforms`] packs all of that into one
//! Pod block ready for uniform upload.

use crate::core::Camera;
use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Perspective3};

/// Vertical field of view, fixed for every frame.
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_4; // 45°

/// Near clip plane of the projection.
pub const Z_NEAR: f32 = 0.1;

/// Far clip plane of the projection.
pub const Z_FAR: f32 = 100.0;

/// Focal and field-of-view scalars derived from the viewport size.
///
/// Recomputed once per frame from the current width and height. `height`
/// must be non-zero; that is a caller precondition, not a checked error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub width: f32,
    pub height: f32,
    pub tan_fovx: f32,
    pub tan_fovy: f32,
    pub focal_x: f32,
    pub focal_y: f32,
}

impl FrameParams {
    /// Derive the scalars for a `width` × `height` viewport at [`FOV_Y`].
    pub fn new(width: f32, height: f32) -> Self {
        let tan_fovy = (FOV_Y * 0.5).tan();
        let tan_fovx = tan_fovy * (width / height);
        Self {
            width,
            height,
            tan_fovx,
            tan_fovy,
            focal_x: width / (2.0 * tan_fovx),
            focal_y: height / (2.0 * tan_fovy),
        }
    }
}

/// Perspective projection for the current viewport.
pub fn projection_matrix(width: f32, height: f32) -> Matrix4<f32> {
    Perspective3::new(width / height, FOV_Y, Z_NEAR, Z_FAR).to_homogeneous()
}

/// Per-frame uniform block for the splat shaders.
///
/// Matrices are column-major, matching GL uniform upload without transpose.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [f32; 16],
    pub projection: [f32; 16],
    pub width: f32,
    pub height: f32,
    pub focal_x: f32,
    pub focal_y: f32,
    pub tan_fovx: f32,
    pub tan_fovy: f32,
    pub scale_modifier: f32,
    pub _pad: f32,
}

impl FrameUniforms {
    /// Assemble the uniform block for one frame.
    ///
    /// `scale_modifier` globally inflates or shrinks splat extents; 1.0 is
    /// the neutral default.
    pub fn new(camera: &Camera, params: &FrameParams, scale_modifier: f32) -> Self {
        let view = camera.view_matrix();
        let projection = projection_matrix(params.width, params.height);

        let mut uniforms = Self {
            view: [0.0; 16],
            projection: [0.0; 16],
            width: params.width,
            height: params.height,
            focal_x: params.focal_x,
            focal_y: params.focal_y,
            tan_fovx: params.tan_fovx,
            tan_fovy: params.tan_fovy,
            scale_modifier,
            _pad: 0.0,
        };
        uniforms.view.copy_from_slice(view.as_slice());
        uniforms.projection.copy_from_slice(projection.as_slice());
        uniforms
    }
}
