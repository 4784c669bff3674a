//! Building export records

use crate::scene::Scene;
use cityquery_core::selection::keys;
use cityquery_core::temporal::date_from_property;
use cityquery_core::{Error, Mesh, Result, Vec3};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// One exported building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub building_id: i64,
    pub gmlid: String,
    pub height: Option<f64>,
    pub year_of_construction: Option<NaiveDate>,
    pub year_of_demolition: Option<NaiveDate>,
    /// `MULTIPOLYGON Z` geometry text
    pub geometry: String,
}

/// Write a mesh as WKT, one polygon per face with closed rings
pub fn mesh_to_wkt(mesh: &Mesh) -> String {
    if mesh.vertices.is_empty() {
        return "MULTIPOLYGON Z EMPTY".to_string();
    }

    let rings: Vec<Vec<Vec3>> = if mesh.faces.is_empty() {
        vec![mesh.vertices.clone()]
    } else {
        mesh.faces
            .iter()
            .filter_map(|face| {
                face.iter()
                    .map(|&i| mesh.vertices.get(i).copied())
                    .collect::<Option<Vec<Vec3>>>()
            })
            .filter(|ring| !ring.is_empty())
            .collect()
    };

    let polygons: Vec<String> = rings
        .iter()
        .map(|ring| {
            let points: Vec<String> = ring
                .iter()
                .chain(ring.first())
                .map(|v| format!("{} {} {}", v.x, v.y, v.z))
                .collect();
            format!("(({}))", points.join(", "))
        })
        .collect();

    format!("MULTIPOLYGON Z ({})", polygons.join(", "))
}

/// One record per mesh object carrying a building id
pub fn export_records(scene: &Scene) -> Vec<ExportRecord> {
    scene
        .objects
        .iter()
        .filter(|o| o.is_mesh())
        .filter_map(|object| {
            let attrs = object.attributes();
            let building_id = attrs.building_id?;
            let date = |key: &str| {
                object
                    .properties
                    .get_present(key)
                    .and_then(date_from_property)
            };
            Some(ExportRecord {
                building_id,
                gmlid: attrs.gmlid,
                height: attrs.height,
                year_of_construction: date(keys::YEAR_OF_CONSTRUCTION),
                year_of_demolition: date(keys::YEAR_OF_DEMOLITION),
                geometry: object.mesh.as_ref().map(mesh_to_wkt).unwrap_or_default(),
            })
        })
        .collect()
}

/// Write records as a JSON array
pub fn write_records<P: AsRef<Path>>(path: P, records: &[ExportRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    writer.flush()?;
    info!(
        "Exported {} records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}
