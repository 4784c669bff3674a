//! Geometry primitives
//!
//! Scene coordinates use `glam`'s double-precision vector and quaternion
//! types; this module adds the axis selector and the polygon mesh.

use serde::{Deserialize, Serialize};

pub use glam::{DQuat as Quat, DVec3 as Vec3};

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Coordinate of `v` along this axis
    pub fn component(self, v: Vec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Build a point from a GeoJSON-style position; a missing Z is treated as 0
pub fn position(coords: &[f64]) -> Option<Vec3> {
    match coords {
        [x, y] => Some(Vec3::new(*x, *y, 0.0)),
        [x, y, z, ..] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// A polygon mesh: vertex positions plus faces as vertex index loops
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    #[serde(default)]
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append another mesh, shifting its face indices past our vertices
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|i| i + offset).collect()),
        );
    }

    /// Fan-triangulate every face; faces with out-of-range indices are ignored
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.faces.iter().flat_map(move |face| {
            let verts: Option<Vec<Vec3>> =
                face.iter().map(|&i| self.vertices.get(i).copied()).collect();
            let verts = verts.unwrap_or_default();
            (1..verts.len().saturating_sub(1))
                .map(move |i| [verts[0], verts[i], verts[i + 1]])
                .collect::<Vec<_>>()
        })
    }
}
