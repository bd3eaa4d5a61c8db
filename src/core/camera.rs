//! Free-fly/orbit camera navigation.
//!
//! The camera is a small state machine driven by the host's input events:
//! - left drag orbits the look target around a fixed eye
//! - right drag pans eye and target together
//! - wheel dollies along the view direction
//! - six directional keys fly eye and target together
//!
//! Every frame reads the current pose through [`Camera::view_matrix`].

use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Radians of orbit per pixel of cursor travel.
const ORBIT_SPEED: f32 = 0.005;

/// World units of pan per pixel of cursor travel.
const PAN_SPEED: f32 = 0.01;

/// World units per wheel notch.
const ZOOM_STEP: f32 = 0.2;

/// World units per fly key press.
const FLY_STEP: f32 = 0.5;

/// Which mouse interaction is currently active.
///
/// The modes are mutually exclusive; starting one interaction replaces
/// whichever was active before.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    Idle,
    Orbiting,
    Panning,
}

/// Directional fly movement, one variant per bound key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlyDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Camera pose plus interaction state.
///
/// `up` is a fixed reference vector; it is never recomputed from the orbit,
/// so the horizon stays level across interactions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position in world space.
    pub eye: Point3<f32>,

    /// Look target in world space.
    pub center: Point3<f32>,

    /// Fixed world-up reference.
    pub up: Vector3<f32>,

    /// Cursor anchor of the active drag (last seen position).
    last_cursor: (f32, f32),

    /// Active interaction mode.
    mode: CameraMode,
}

impl Camera {
    /// Create a camera at `eye` looking toward `center`.
    ///
    /// `eye == center` makes the look direction degenerate and is a caller
    /// error; the controller never checks for it.
    pub fn new(eye: Point3<f32>, center: Point3<f32>, up: Vector3<f32>) -> Self {
        Self {
            eye,
            center,
            up,
            last_cursor: (0.0, 0.0),
            mode: CameraMode::Idle,
        }
    }

    /// Current interaction mode.
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Begin an orbit drag, anchoring the cursor at (x, y).
    pub fn start_rotation(&mut self, x: f32, y: f32) {
        self.mode = CameraMode::Orbiting;
        self.last_cursor = (x, y);
    }

    /// Begin a pan drag, anchoring the cursor at (x, y).
    pub fn start_translation(&mut self, x: f32, y: f32) {
        self.mode = CameraMode::Panning;
        self.last_cursor = (x, y);
    }

    /// End any active drag.
    pub fn stop(&mut self) {
        self.mode = CameraMode::Idle;
    }

    /// Process cursor movement to (x, y).
    ///
    /// Computes the delta against the drag anchor, re-anchors, then applies
    /// the active mode. In `Idle` only the anchor moves.
    pub fn drag(&mut self, x: f32, y: f32) {
        let dx = x - self.last_cursor.0;
        let dy = y - self.last_cursor.1;
        self.last_cursor = (x, y);

        match self.mode {
            CameraMode::Orbiting => {
                let (_, right, local_up) = self.basis();

                // Rotate the eye→center vector about local up first, then
                // about right, pivoting around the fixed eye.
                let yaw = Rotation3::from_axis_angle(
                    &Unit::new_normalize(local_up),
                    -dx * ORBIT_SPEED,
                );
                let pitch = Rotation3::from_axis_angle(
                    &Unit::new_normalize(right),
                    dy * ORBIT_SPEED,
                );
                let rotated = pitch * (yaw * (self.center - self.eye));
                self.center = self.eye + rotated;
            }
            CameraMode::Panning => {
                let (_, right, local_up) = self.basis();
                let translation = (-right * dx - local_up * dy) * PAN_SPEED;
                self.eye += translation;
                self.center += translation;
            }
            CameraMode::Idle => {}
        }
    }

    /// Dolly along the view direction; only the sign of `direction` matters.
    pub fn zoom(&mut self, direction: f32) {
        let step = if direction > 0.0 { 1.0 } else { -1.0 };
        let movement = (self.center - self.eye).normalize() * step * ZOOM_STEP;
        self.eye += movement;
        self.center += movement;
    }

    /// Move eye and target together by one fly step.
    ///
    /// `Up` moves along −localUp and `Down` along +localUp; the mapping is
    /// inverted relative to the names and is kept that way on purpose.
    pub fn fly(&mut self, direction: FlyDirection) {
        let (forward, right, local_up) = self.basis();

        let movement = match direction {
            FlyDirection::Forward => forward * FLY_STEP,
            FlyDirection::Backward => -forward * FLY_STEP,
            FlyDirection::Left => -right * FLY_STEP,
            FlyDirection::Right => right * FLY_STEP,
            FlyDirection::Up => -local_up * FLY_STEP,
            FlyDirection::Down => local_up * FLY_STEP,
        };

        self.eye += movement;
        self.center += movement;
    }

    /// Right-handed look-at matrix from the current pose.
    ///
    /// Pure read of the state; calling it repeatedly without intervening
    /// mutation returns identical matrices.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.center, &self.up)
    }

    /// Orthonormal basis of the current view:
    /// (forward, right, local up).
    fn basis(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let forward = (self.center - self.eye).normalize();
        let right = forward.cross(&self.up).normalize();
        let local_up = right.cross(&forward).normalize();
        (forward, right, local_up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, -10.0),
            Point3::origin(),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }
}
