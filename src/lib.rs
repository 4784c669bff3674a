//! CityQuery - natural-language building selection
//!
//! This is the main library crate that re-exports all CityQuery components.

pub use cityquery_core as core;
pub use cityquery_nlp as nlp;
pub use cityquery_query as query;
pub use cityquery_scene as scene;

// Re-export commonly used types
pub use cityquery_core::{
    Axis, BuildingAttributes, Error, Mesh, ObjectId, Property, PropertyValue, Result,
    SelectionContext, Vec3, Year,
};

pub use cityquery_nlp::{Analyzer, Token};
pub use cityquery_query::{
    Predicate, QueryConfig, QueryEngine, QueryPlan, QueryResult, SelectionOutcome,
};
pub use cityquery_scene::{
    Camera, Scene, SceneObject, VisibilityConfig, select_objects_in_camera_view,
};
