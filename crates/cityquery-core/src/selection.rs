//! Selectable objects and the selection context
//!
//! The host scene owns every object. Query evaluation only reads the
//! attribute record of each object and toggles its selection flag through
//! [`SelectionContext`].

use crate::error::Result;
use crate::geometry::Vec3;
use crate::property::Property;
use crate::temporal::Year;
use serde::{Deserialize, Serialize};

/// Handle of an object inside a host scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(usize);

impl ObjectId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Custom property keys written by the city database importer
pub mod keys {
    pub const GMLID: &str = "gmlid";
    pub const BUILDING_ID: &str = "building_id";
    pub const HEIGHT: &str = "height";
    pub const YEAR_OF_CONSTRUCTION: &str = "year_of_construction";
    pub const YEAR_OF_DEMOLITION: &str = "year_of_demolition";
}

/// Typed attribute record of a building object. Every attribute is
/// optional; an unset attribute excludes the object from predicates that
/// need it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingAttributes {
    pub gmlid: String,
    pub building_id: Option<i64>,
    pub height: Option<f64>,
    pub year_of_construction: Option<Year>,
    pub year_of_demolition: Option<Year>,
}

impl BuildingAttributes {
    pub fn new<S: Into<String>>(gmlid: S) -> Self {
        Self {
            gmlid: gmlid.into(),
            ..Default::default()
        }
    }

    /// Builder: set height
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Builder: set year of construction
    pub fn constructed(mut self, year: i32) -> Self {
        self.year_of_construction = Some(Year::new(year));
        self
    }

    /// Builder: set year of demolition
    pub fn demolished(mut self, year: i32) -> Self {
        self.year_of_demolition = Some(Year::new(year));
        self
    }

    /// Builder: set building id
    pub fn building_id(mut self, id: i64) -> Self {
        self.building_id = Some(id);
        self
    }

    /// Decode the record from host custom properties. `fallback_gmlid` is
    /// used when the object carries no `gmlid` property (usually the object
    /// name).
    pub fn from_properties(fallback_gmlid: &str, props: &Property) -> Self {
        let gmlid = props
            .get(keys::GMLID)
            .and_then(|v| v.as_str())
            .unwrap_or(fallback_gmlid)
            .to_string();

        Self {
            gmlid,
            building_id: props.get_present(keys::BUILDING_ID).and_then(|v| v.as_integer()),
            height: props.get_present(keys::HEIGHT).and_then(|v| v.as_float()),
            year_of_construction: props
                .get_present(keys::YEAR_OF_CONSTRUCTION)
                .and_then(Year::from_property),
            year_of_demolition: props
                .get_present(keys::YEAR_OF_DEMOLITION)
                .and_then(Year::from_property),
        }
    }

    /// Encode the record as host custom properties
    pub fn to_properties(&self) -> Property {
        let mut props = Property::new();
        props.set(keys::GMLID, self.gmlid.as_str());
        props.set(keys::BUILDING_ID, self.building_id);
        props.set(keys::HEIGHT, self.height);
        props.set(
            keys::YEAR_OF_CONSTRUCTION,
            self.year_of_construction.map(|y| y.to_string()),
        );
        props.set(
            keys::YEAR_OF_DEMOLITION,
            self.year_of_demolition.map(|y| y.to_string()),
        );
        props
    }
}

/// Access to the host scene's objects and selection state.
///
/// This is the only surface through which query evaluation touches the
/// host: attribute reads, vertex reads, the camera location and
/// `set_selected`.
pub trait SelectionContext {
    /// Objects currently selected, in scene order
    fn selected_objects(&self) -> Vec<ObjectId>;

    /// Every object in the scene, in scene order
    fn all_objects(&self) -> Vec<ObjectId>;

    /// Attribute record of an object, if it has one
    fn attributes(&self, id: ObjectId) -> Option<BuildingAttributes>;

    /// World-space vertex positions; `None` for objects without a mesh
    fn world_vertices(&self, id: ObjectId) -> Option<Vec<Vec3>>;

    /// Location of the active camera
    fn camera_location(&self) -> Result<Vec3>;

    fn is_selected(&self, id: ObjectId) -> bool;

    fn set_selected(&mut self, id: ObjectId, selected: bool);

    fn deselect_all(&mut self) {
        for id in self.all_objects() {
            self.set_selected(id, false);
        }
    }

    /// Replace the selection with exactly `ids`
    fn select_only(&mut self, ids: &[ObjectId]) {
        self.deselect_all();
        for &id in ids {
            self.set_selected(id, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyValue;

    #[test]
    fn test_from_properties() {
        let mut props = Property::new();
        props.set(keys::GMLID, "DEB_LOD2_17");
        props.set(keys::HEIGHT, "31.25");
        props.set(keys::BUILDING_ID, 17i64);
        props.set(keys::YEAR_OF_CONSTRUCTION, "1920-05-01");
        props.set(keys::YEAR_OF_DEMOLITION, "None");

        let attrs = BuildingAttributes::from_properties("Mesh.001", &props);
        assert_eq!(attrs.gmlid, "DEB_LOD2_17");
        assert_eq!(attrs.height, Some(31.25));
        assert_eq!(attrs.building_id, Some(17));
        assert_eq!(attrs.year_of_construction, Some(Year::new(1920)));
        assert_eq!(attrs.year_of_demolition, None);
    }

    #[test]
    fn test_missing_keys_are_unset() {
        let attrs = BuildingAttributes::from_properties("Cube", &Property::new());
        assert_eq!(attrs.gmlid, "Cube");
        assert!(attrs.height.is_none());
        assert!(attrs.year_of_construction.is_none());
    }

    #[test]
    fn test_properties_round_trip() {
        let attrs = BuildingAttributes::new("B1")
            .height(12.5)
            .constructed(1955)
            .building_id(3);
        let props = attrs.to_properties();
        assert_eq!(props.get(keys::YEAR_OF_DEMOLITION), Some(&PropertyValue::Null));
        assert_eq!(BuildingAttributes::from_properties("x", &props), attrs);
    }
}
