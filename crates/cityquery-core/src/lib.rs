//! CityQuery Core Library
//!
//! This crate provides the fundamental types, traits, and error handling
//! shared by the CityQuery crates.
//!
//! # Overview
//!
//! CityQuery selects city-model buildings in a 3D scene from free-text
//! commands such as "select the highest building" or "select buildings
//! constructed before 1940".
//!
//! # Modules
//!
//! - `error` - Error types and result aliases
//! - `geometry` - Vectors, quaternions and meshes
//! - `property` - Host-side custom property bags
//! - `temporal` - Year values and date parsing
//! - `selection` - Building attribute records and the selection context trait

pub mod error;
pub mod geometry;
pub mod property;
pub mod selection;
pub mod temporal;

pub use error::{Error, Result};
pub use geometry::{Axis, Mesh, Quat, Vec3};
pub use property::{Property, PropertyValue};
pub use selection::{BuildingAttributes, ObjectId, SelectionContext};
pub use temporal::Year;
