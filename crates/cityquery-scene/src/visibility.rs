//! Camera visibility selection
//!
//! Point-sampled visibility: a grid of rays is cast from the camera through
//! its view frame and every object hit first by at least one ray counts as
//! visible. More rays find more small or partly hidden objects, but the
//! result is never exact.

use crate::camera::Camera;
use crate::scene::{RenderSettings, Scene};
use cityquery_core::{Error, ObjectId, Result, SelectionContext, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

const EPSILON: f64 = 1e-9;

/// Anything that can report the nearest object along a ray
pub trait RayCaster {
    fn cast_ray(&self, origin: Vec3, direction: Vec3) -> Option<ObjectId>;
}

/// Ray sampling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Fraction of the render resolution used as the ray grid size
    pub resolution_ratio: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            resolution_ratio: 0.25,
        }
    }
}

impl VisibilityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set resolution ratio
    pub fn resolution_ratio(mut self, ratio: f64) -> Self {
        self.resolution_ratio = ratio;
        self
    }

    /// Ray grid size for a render resolution
    pub fn sample_resolution(&self, render: &RenderSettings) -> (usize, usize) {
        let scale = |pixels: u32| {
            let n = (f64::from(pixels) * self.resolution_ratio).floor();
            if n.is_finite() && n > 0.0 { n as usize } else { 0 }
        };
        (scale(render.resolution_x), scale(render.resolution_y))
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Objects hit by a `res_x` by `res_y` grid of rays through the camera frame
pub fn visible_set<R>(camera: &Camera, caster: &R, res_x: usize, res_y: usize) -> BTreeSet<ObjectId>
where
    R: RayCaster + ?Sized,
{
    let (origin, _, frame) = camera.pose();
    let xs = linspace(frame.top_left.x, frame.top_right.x, res_x);
    let ys = linspace(frame.top_left.y, frame.bottom_left.y, res_y);

    let mut visible = BTreeSet::new();
    for &y in &ys {
        for &x in &xs {
            if let Some(id) = caster.cast_ray(origin, camera.ray_direction(x, y)) {
                visible.insert(id);
            }
        }
    }

    debug!(
        "Cast {} rays, {} objects visible",
        xs.len() * ys.len(),
        visible.len()
    );
    visible
}

/// Replace the selection of `scene` with the objects visible from its camera
pub fn select_objects_in_camera_view(
    scene: &mut Scene,
    config: &VisibilityConfig,
) -> Result<BTreeSet<ObjectId>> {
    let camera = scene
        .camera
        .clone()
        .ok_or_else(|| Error::CameraUnavailable("scene has no camera".to_string()))?;
    let (res_x, res_y) = config.sample_resolution(&scene.render);

    let visible = visible_set(&camera, &*scene, res_x, res_y);
    scene.deselect_all();
    for &id in &visible {
        scene.set_selected(id, true);
    }

    info!(
        "Selected {} visible objects ({}x{} rays)",
        visible.len(),
        res_x,
        res_y
    );
    Ok(visible)
}

/// Möller–Trumbore ray/triangle intersection; returns the hit distance
/// along `direction`
pub fn intersect_triangle(origin: Vec3, direction: Vec3, triangle: &[Vec3; 3]) -> Option<f64> {
    let [a, b, c] = *triangle;
    let edge1 = b - a;
    let edge2 = c - a;

    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}
