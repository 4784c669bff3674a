//! Building row import
//!
//! Rows come from the city database export as JSON objects carrying the
//! building attributes and the surface geometry as GeoJSON text. Each row
//! becomes one mesh object; attribute values are stored as custom
//! properties, with dates kept as text.

use crate::scene::{Scene, SceneObject};
use cityquery_core::geometry::position;
use cityquery_core::selection::keys;
use cityquery_core::{Error, Mesh, ObjectId, Property, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Property key of the surface identifier
pub const SURFACE_GMLID: &str = "surface_gmlid";

/// One building surface row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingRow {
    pub building_id: Option<i64>,
    pub gmlid: Option<String>,
    pub surface_gmlid: Option<String>,
    pub height: Option<f64>,
    pub year_of_construction: Option<String>,
    pub year_of_demolition: Option<String>,
    /// GeoJSON geometry text
    pub geometry: Option<String>,
}

impl BuildingRow {
    /// Object name: the building gmlid, else the surface gmlid
    pub fn object_name(&self) -> &str {
        self.gmlid
            .as_deref()
            .or(self.surface_gmlid.as_deref())
            .unwrap_or("building")
    }

    /// Attributes as custom properties
    pub fn to_properties(&self) -> Property {
        let mut props = Property::new();
        props.set(keys::BUILDING_ID, self.building_id);
        props.set(keys::GMLID, self.gmlid.clone());
        props.set(SURFACE_GMLID, self.surface_gmlid.clone());
        props.set(keys::HEIGHT, self.height);
        props.set(keys::YEAR_OF_CONSTRUCTION, self.year_of_construction.clone());
        props.set(keys::YEAR_OF_DEMOLITION, self.year_of_demolition.clone());
        props
    }
}

/// Read a JSON array of rows
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<BuildingRow>> {
    let text = fs::read_to_string(path.as_ref())?;
    let rows: Vec<BuildingRow> = serde_json::from_str(&text)?;
    debug!("Read {} rows from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

type Ring = Vec<Vec<f64>>;

/// Convert a GeoJSON `Polygon` or `MultiPolygon` to a mesh.
///
/// Each polygon's exterior ring becomes one face; holes are ignored. The
/// closing position of a ring is dropped. Positions may be 2D (`z = 0`) or
/// 3D.
pub fn geojson_to_mesh(text: &str) -> Result<Mesh> {
    let raw: RawGeometry =
        serde_json::from_str(text).map_err(|e| Error::InvalidGeometry(e.to_string()))?;

    let polygons: Vec<Vec<Ring>> = match raw.kind.as_str() {
        "Polygon" => vec![parse_coordinates(raw.coordinates)?],
        "MultiPolygon" => parse_coordinates(raw.coordinates)?,
        other => return Err(Error::UnsupportedGeometry(other.to_string())),
    };

    let mut mesh = Mesh::default();
    for polygon in &polygons {
        let Some(exterior) = polygon.first() else {
            continue;
        };
        let mut ring = exterior
            .iter()
            .map(|coords| {
                position(coords).ok_or_else(|| {
                    Error::InvalidGeometry(format!("position with {} coordinates", coords.len()))
                })
            })
            .collect::<Result<Vec<Vec3>>>()?;

        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(Error::InvalidGeometry(format!(
                "ring with {} distinct positions",
                ring.len()
            )));
        }

        let start = mesh.vertices.len();
        mesh.faces.push((start..start + ring.len()).collect());
        mesh.vertices.extend(ring);
    }

    Ok(mesh)
}

fn parse_coordinates<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::InvalidGeometry(e.to_string()))
}

impl Scene {
    /// Create one mesh object per row. Rows without geometry are skipped.
    ///
    /// Every geometry is converted before any object is added, so a bad row
    /// leaves the scene unchanged.
    pub fn import_rows(&mut self, rows: &[BuildingRow]) -> Result<Vec<ObjectId>> {
        let mut objects = Vec::with_capacity(rows.len());

        for row in rows {
            let Some(geometry) = row.geometry.as_deref() else {
                warn!("Row {} has no geometry, skipped", row.object_name());
                continue;
            };
            let mesh = geojson_to_mesh(geometry)?;
            objects.push(
                SceneObject::mesh(row.object_name(), mesh).with_properties(row.to_properties()),
            );
        }

        let ids = self.add_objects(objects);
        info!("Imported {} of {} rows", ids.len(), rows.len());
        Ok(ids)
    }
}
