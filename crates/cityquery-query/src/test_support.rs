//! In-memory selection context for unit tests

use cityquery_core::{BuildingAttributes, Error, ObjectId, Result, SelectionContext, Vec3};

pub struct MockObject {
    pub attributes: Option<BuildingAttributes>,
    pub vertices: Option<Vec<Vec3>>,
    pub selected: bool,
}

#[derive(Default)]
pub struct MockScene {
    pub objects: Vec<MockObject>,
    pub camera: Option<Vec3>,
}

impl MockScene {
    /// Selected buildings with the given heights (`None` = no height attribute)
    pub fn with_heights(heights: &[Option<f64>]) -> Self {
        let objects = heights
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let mut attrs = BuildingAttributes::new(format!("B{}", i));
                attrs.height = *h;
                MockObject {
                    attributes: Some(attrs),
                    vertices: None,
                    selected: true,
                }
            })
            .collect();
        Self {
            objects,
            camera: None,
        }
    }

    pub fn push(
        &mut self,
        attributes: BuildingAttributes,
        vertices: Option<Vec<Vec3>>,
    ) -> ObjectId {
        self.objects.push(MockObject {
            attributes: Some(attributes),
            vertices,
            selected: true,
        });
        ObjectId::new(self.objects.len() - 1)
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected_objects().iter().map(|id| id.index()).collect()
    }
}

impl SelectionContext for MockScene {
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
        self.objects.get(id.index()).and_then(|o| o.attributes.clone())
    }

    fn world_vertices(&self, id: ObjectId) -> Option<Vec<Vec3>> {
        self.objects.get(id.index()).and_then(|o| o.vertices.clone())
    }

    fn camera_location(&self) -> Result<Vec3> {
        self.camera
            .ok_or_else(|| Error::CameraUnavailable("no camera in mock scene".to_string()))
    }

    fn is_selected(&self, id: ObjectId) -> bool {
        self.objects.get(id.index()).is_some_and(|o| o.selected)
    }

    fn set_selected(&mut self, id: ObjectId, selected: bool) {
        if let Some(o) = self.objects.get_mut(id.index()) {
            o.selected = selected;
        }
    }
}
