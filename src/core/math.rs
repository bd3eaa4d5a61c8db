//! Mathematical utilities (quaternion conversion, activation functions).

use nalgebra::Matrix3;

/// Spherical harmonics band-0 normalization constant.
///
/// The DC (constant) SH coefficient times this constant recovers the
/// view-independent color contribution.
pub const SH_C0: f32 = 0.28209479177387814;

/// Build a 3×3 rotation matrix from raw quaternion components (r, x, y, z).
///
/// Formula (from quaternion q = r + xi + yj + zk):
/// R = | 1-2(y²+z²)   2(xy-rz)    2(xz+ry)  |
///     | 2(xy+rz)     1-2(x²+z²)  2(yz-rx)  |
///     | 2(xz-ry)     2(yz+rx)    1-2(x²+y²)|
///
/// The components are used as stored: if the quaternion is not unit-length,
/// the result is not a pure rotation and any scale it carries flows into the
/// covariance built from it. Callers supplying non-unit quaternions accept
/// that contamination.
pub fn rotation_from_quaternion(q: [f32; 4]) -> Matrix3<f32> {
    let [r, x, y, z] = q;

    Matrix3::new(
        1.0 - 2.0 * (y * y + z * z),
        2.0 * (x * y - r * z),
        2.0 * (x * z + r * y),
        2.0 * (x * y + r * z),
        1.0 - 2.0 * (x * x + z * z),
        2.0 * (y * z - r * x),
        2.0 * (x * z - r * y),
        2.0 * (y * z + r * x),
        1.0 - 2.0 * (x * x + y * y),
    )
}

/// Sigmoid activation function: σ(x) = 1 / (1 + e^(-x))
///
/// Maps R → (0, 1). Used to turn a stored opacity logit into an alpha value.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
