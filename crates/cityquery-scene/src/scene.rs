//! In-memory host scene
//!
//! A flat list of named objects plus one optional camera. Objects are
//! addressed by their position in the list, so [`ObjectId`]s handed out
//! before a structural change (clear, merge, separate) are invalidated by
//! it.

use crate::camera::Camera;
use crate::visibility::{RayCaster, intersect_triangle};
use cityquery_core::{
    BuildingAttributes, Error, Mesh, ObjectId, Property, Result, SelectionContext, Vec3,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Kind of scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Mesh,
    Empty,
}

/// A named object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub location: Vec3,
    #[serde(default)]
    pub mesh: Option<Mesh>,
    #[serde(default)]
    pub properties: Property,
    #[serde(default)]
    pub selected: bool,
}

impl SceneObject {
    /// Mesh object at the origin
    pub fn mesh<S: Into<String>>(name: S, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            location: Vec3::ZERO,
            mesh: Some(mesh),
            properties: Property::new(),
            selected: false,
        }
    }

    /// Object without geometry
    pub fn empty<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Empty,
            location: Vec3::ZERO,
            mesh: None,
            properties: Property::new(),
            selected: false,
        }
    }

    /// Builder: set location
    pub fn at(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    /// Builder: set custom properties
    pub fn with_properties(mut self, properties: Property) -> Self {
        self.properties = properties;
        self
    }

    /// Builder: set selection flag
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_mesh(&self) -> bool {
        self.kind == ObjectKind::Mesh && self.mesh.is_some()
    }

    /// Name up to the first `.`, shared by duplicates such as `wall.001`
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }

    pub fn attributes(&self) -> BuildingAttributes {
        BuildingAttributes::from_properties(&self.name, &self.properties)
    }

    /// Mesh vertices offset by the object location
    pub fn world_vertices(&self) -> Option<Vec<Vec3>> {
        if !self.is_mesh() {
            return None;
        }
        self.mesh
            .as_ref()
            .map(|m| m.vertices.iter().map(|&v| v + self.location).collect())
    }
}

/// Output image size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl RenderSettings {
    pub fn new(resolution_x: u32, resolution_y: u32) -> Self {
        Self {
            resolution_x,
            resolution_y,
        }
    }

    /// Width over height
    pub fn aspect(&self) -> f64 {
        if self.resolution_y == 0 {
            1.0
        } else {
            f64::from(self.resolution_x) / f64::from(self.resolution_y)
        }
    }
}

/// A scene of objects, an active camera and render settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub camera: Option<Camera>,
    #[serde(default)]
    pub render: RenderSettings,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Persistence ==========

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Load a scene from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let scene = Self::from_json(&text)?;
        info!(
            "Loaded scene from {} ({} objects)",
            path.as_ref().display(),
            scene.len()
        );
        Ok(scene)
    }

    /// Write the scene as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    // ========== Object Operations ==========

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add an object, renaming it if its name is taken
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let mut names = NameIndex::new(&self.objects);
        self.push_named(&mut names, object)
    }

    /// Add many objects, renaming as `add_object` does
    pub fn add_objects<I>(&mut self, objects: I) -> Vec<ObjectId>
    where
        I: IntoIterator<Item = SceneObject>,
    {
        let mut names = NameIndex::new(&self.objects);
        objects
            .into_iter()
            .map(|object| self.push_named(&mut names, object))
            .collect()
    }

    fn push_named(&mut self, names: &mut NameIndex, mut object: SceneObject) -> ObjectId {
        object.name = names.claim(&object.name);
        self.objects.push(object);
        ObjectId::new(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .map(ObjectId::new)
    }

    /// Like `find_by_name`, but a missing object is an error
    pub fn get_by_name(&self, name: &str) -> Result<ObjectId> {
        self.find_by_name(name)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }

    /// `name`, or `name.001`, `name.002`, ... if already taken
    pub fn unique_name(&self, name: &str) -> String {
        NameIndex::new(&self.objects).claim(name)
    }

    /// Remove every object
    pub fn clear(&mut self) {
        let removed = self.objects.len();
        self.objects.clear();
        debug!("Cleared {} objects", removed);
    }

    /// Attribute record of the first selected object
    pub fn inspect_selected(&self) -> Option<BuildingAttributes> {
        self.objects
            .iter()
            .find(|o| o.selected)
            .map(SceneObject::attributes)
    }

    // ========== Surface Operations ==========

    /// Join mesh objects sharing a base name into one object per name.
    ///
    /// The joined object keeps the name, location and properties of the
    /// first member, and is selected if any member was. Returns the number
    /// of objects removed.
    pub fn merge_surfaces(&mut self) -> usize {
        let mut first_of: HashMap<String, usize> = HashMap::new();
        let mut result: Vec<SceneObject> = Vec::with_capacity(self.objects.len());
        let mut removed = 0;

        for object in self.objects.drain(..) {
            if !object.is_mesh() {
                result.push(object);
                continue;
            }

            let base = object.base_name().to_string();
            let Some(&first) = first_of.get(&base) else {
                first_of.insert(base, result.len());
                result.push(object);
                continue;
            };

            let joined = &mut result[first];
            joined.selected |= object.selected;
            let offset = object.location - joined.location;
            if let (Some(mesh), Some(other)) = (joined.mesh.as_mut(), object.mesh.as_ref()) {
                mesh.append(&Mesh::new(
                    other.vertices.iter().map(|&v| v + offset).collect(),
                    other.faces.clone(),
                ));
            }
            removed += 1;
        }

        self.objects = result;
        info!("Merged surfaces, {} objects removed", removed);
        removed
    }

    /// Split every mesh into one object per connected group of faces.
    /// Returns the number of objects added.
    pub fn separate_surfaces(&mut self) -> usize {
        let mut names = NameIndex::new(&self.objects);
        let objects = std::mem::take(&mut self.objects);
        let mut added = 0;

        for object in objects {
            let parts = match object.mesh.as_ref() {
                Some(mesh) if object.is_mesh() && mesh.faces.len() > 1 => loose_parts(mesh),
                _ => Vec::new(),
            };
            if parts.len() < 2 {
                self.objects.push(object);
                continue;
            }

            // The first piece keeps the original name
            added += parts.len() - 1;
            for (i, part) in parts.into_iter().enumerate() {
                let name = if i == 0 {
                    object.name.clone()
                } else {
                    names.claim(&object.name)
                };
                self.objects.push(SceneObject {
                    name,
                    mesh: Some(part),
                    ..object.clone()
                });
            }
        }

        info!("Separated surfaces, {} objects added", added);
        added
    }
}

/// Names in use, handing out `.NNN` suffixes for taken ones
struct NameIndex {
    taken: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl NameIndex {
    fn new(objects: &[SceneObject]) -> Self {
        Self {
            taken: objects.iter().map(|o| o.name.clone()).collect(),
            next_suffix: HashMap::new(),
        }
    }

    fn claim(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }
        let next = self.next_suffix.entry(name.to_string()).or_insert(1);
        loop {
            let candidate = format!("{}.{:03}", name, *next);
            *next += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

fn base_name(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Connected components of a mesh, two faces being connected when they
/// share a vertex. Vertices used by no face are dropped.
fn loose_parts(mesh: &Mesh) -> Vec<Mesh> {
    let n = mesh.vertices.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    let faces: Vec<&Vec<usize>> = mesh
        .faces
        .iter()
        .filter(|f| !f.is_empty() && f.iter().all(|&i| i < n))
        .collect();

    for face in &faces {
        let first = find(&mut parent, face[0]);
        for &v in &face[1..] {
            let root = find(&mut parent, v);
            parent[root] = first;
        }
    }

    let mut part_of_root: HashMap<usize, usize> = HashMap::new();
    let mut parts: Vec<(Mesh, HashMap<usize, usize>)> = Vec::new();

    for face in faces {
        let root = find(&mut parent, face[0]);
        let p = *part_of_root.entry(root).or_insert_with(|| {
            parts.push((Mesh::default(), HashMap::new()));
            parts.len() - 1
        });
        let (part, remap) = &mut parts[p];
        let new_face = face
            .iter()
            .map(|&v| {
                *remap.entry(v).or_insert_with(|| {
                    part.vertices.push(mesh.vertices[v]);
                    part.vertices.len() - 1
                })
            })
            .collect();
        part.faces.push(new_face);
    }

    parts.into_iter().map(|(mesh, _)| mesh).collect()
}

impl SelectionContext for Scene {
    fn selected_objects(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected)
            .map(|(i, _)| ObjectId::new(i))
            .collect()
    }

    fn all_objects(&self) -> Vec<ObjectId> {
        (0..self.objects.len()).map(ObjectId::new).collect()
    }

    fn attributes(&self, id: ObjectId) -> Option<BuildingAttributes> {
        self.object(id).map(SceneObject::attributes)
    }

    fn world_vertices(&self, id: ObjectId) -> Option<Vec<Vec3>> {
        self.object(id).and_then(SceneObject::world_vertices)
    }

    fn camera_location(&self) -> Result<Vec3> {
        self.camera
            .as_ref()
            .map(|c| c.location)
            .ok_or_else(|| Error::CameraUnavailable("scene has no camera".to_string()))
    }

    fn is_selected(&self, id: ObjectId) -> bool {
        self.object(id).is_some_and(|o| o.selected)
    }

    fn set_selected(&mut self, id: ObjectId, selected: bool) {
        if let Some(object) = self.object_mut(id) {
            object.selected = selected;
        }
    }
}

impl RayCaster for Scene {
    fn cast_ray(&self, origin: Vec3, direction: Vec3) -> Option<ObjectId> {
        let mut nearest: Option<(ObjectId, f64)> = None;

        for (i, object) in self.objects.iter().enumerate() {
            let Some(mesh) = object.mesh.as_ref().filter(|_| object.is_mesh()) else {
                continue;
            };
            for triangle in mesh.triangles() {
                let world = triangle.map(|v| v + object.location);
                if let Some(t) = intersect_triangle(origin, direction, &world) {
                    if nearest.is_none_or(|(_, best)| t < best) {
                        nearest = Some((ObjectId::new(i), t));
                    }
                }
            }
        }

        nearest.map(|(id, _)| id)
    }
}
