//! CityQuery Scene
//!
//! An in-memory host scene for the query engine.
//!
//! # Overview
//!
//! This crate provides:
//! - `Scene`: named mesh objects with custom properties, implementing
//!   [`SelectionContext`](cityquery_core::SelectionContext)
//! - Perspective camera and ray-grid visibility selection
//! - Building row import from GeoJSON geometry
//! - Surface merge/separate and WKT export records

pub mod camera;
pub mod export;
pub mod import;
pub mod scene;
pub mod visibility;

pub use camera::{Camera, DEFAULT_FOV, Frame};
pub use export::{ExportRecord, export_records, mesh_to_wkt, write_records};
pub use import::{BuildingRow, geojson_to_mesh, load_rows};
pub use scene::{ObjectKind, RenderSettings, Scene, SceneObject};
pub use visibility::{
    RayCaster, VisibilityConfig, linspace, select_objects_in_camera_view, visible_set,
};
