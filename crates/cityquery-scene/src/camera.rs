//! Perspective camera

use cityquery_core::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Horizontal field of view of a 50mm lens on a 36mm sensor, in radians
pub const DEFAULT_FOV: f64 = 0.691_150_383_8;

/// View frame corners in camera space, at unit depth along `-Z`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_left: Vec3,
    pub bottom_right: Vec3,
}

impl Frame {
    /// Frame for a horizontal field of view and a width/height aspect ratio
    pub fn perspective(fov: f64, aspect: f64) -> Self {
        let half_w = (fov * 0.5).tan();
        let half_h = if aspect > 0.0 { half_w / aspect } else { half_w };
        Self {
            top_left: Vec3::new(-half_w, half_h, -1.0),
            top_right: Vec3::new(half_w, half_h, -1.0),
            bottom_left: Vec3::new(-half_w, -half_h, -1.0),
            bottom_right: Vec3::new(half_w, -half_h, -1.0),
        }
    }
}

/// A camera pose: location, orientation and view frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub location: Vec3,
    #[serde(default)]
    pub rotation: Quat,
    pub frame: Frame,
}

impl Camera {
    /// Camera at `location` looking down `-Z` with the given frame
    pub fn new(location: Vec3, frame: Frame) -> Self {
        Self {
            location,
            rotation: Quat::IDENTITY,
            frame,
        }
    }

    /// Camera with a horizontal field of view for a render aspect ratio
    pub fn perspective(location: Vec3, fov: f64, aspect: f64) -> Self {
        Self::new(location, Frame::perspective(fov, aspect))
    }

    /// Builder: set orientation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        let rotation = rotation.normalize();
        self.rotation = if rotation.is_finite() { rotation } else { Quat::IDENTITY };
        self
    }

    /// Position, orientation and frame
    pub fn pose(&self) -> (Vec3, Quat, Frame) {
        (self.location, self.rotation, self.frame)
    }

    /// World-space unit direction through camera-space frame point `(x, y)`
    pub fn ray_direction(&self, x: f64, y: f64) -> Vec3 {
        let depth = self.frame.top_left.z;
        (self.rotation * Vec3::new(x, y, depth)).normalize_or_zero()
    }

    /// World-space viewing direction
    pub fn forward(&self) -> Vec3 {
        self.ray_direction(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_frame_aspect() {
        let frame = Frame::perspective(FRAC_PI_2, 2.0);
        assert!((frame.top_right.x - 1.0).abs() < 1e-12);
        assert!((frame.top_right.y - 0.5).abs() < 1e-12);
        assert_eq!(frame.bottom_left.z, -1.0);
        assert!(frame.top_left.x < frame.top_right.x);
        assert!(frame.top_left.y > frame.bottom_left.y);
    }

    #[test]
    fn test_default_orientation_looks_down() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), DEFAULT_FOV, 16.0 / 9.0);
        assert!(approx(camera.forward(), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_rotated_camera() {
        // Tilting 90 degrees about X turns -Z into +Y
        let camera = Camera::perspective(Vec3::ZERO, DEFAULT_FOV, 1.0)
            .with_rotation(Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_2));
        assert!(approx(camera.forward(), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_camera_json() {
        let camera = Camera::perspective(Vec3::new(1.0, 2.0, 3.0), DEFAULT_FOV, 1.5);
        let json = serde_json::to_string(&camera).unwrap();
        let back: Camera = serde_json::from_str(&json).unwrap();
        assert_eq!(back, camera);
    }
}
