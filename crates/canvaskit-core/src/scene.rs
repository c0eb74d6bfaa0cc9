//! Scene: the ordered collection of drawable objects.

use crate::error::{SceneError, SceneResult};
use crate::hit_test;
use crate::selection::{Containment, objects_in_rect};
use crate::shapes::{DrawingObject, ObjectId};
use kurbo::{Point, Rect};

/// Objects in paint order (back to front; the last object is topmost).
///
/// Ids are assigned on insertion from a counter scoped to this scene
/// (`rect-1`, `circle-2`, ...). The counter only ever advances.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<DrawingObject>,
    counter: u64,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object, assigning an id if it has none.
    ///
    /// The canvas sentinel is rejected. Pre-assigned ids are not checked for
    /// duplicates.
    pub fn try_add(&mut self, mut obj: DrawingObject) -> SceneResult<ObjectId> {
        if obj.is_canvas() {
            return Err(SceneError::CanvasSentinel);
        }
        let id = match obj.id() {
            Some(id) => id.clone(),
            None => {
                self.counter += 1;
                let id = format!("{}-{}", obj.kind(), self.counter);
                obj.set_id(id.clone());
                id
            }
        };
        self.objects.push(obj);
        Ok(id)
    }

    /// Like [`try_add`](Self::try_add), but logs and ignores rejected input.
    pub fn add(&mut self, obj: DrawingObject) -> Option<ObjectId> {
        match self.try_add(obj) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Scene::add rejected object: {}", e);
                None
            }
        }
    }

    /// Remove the first object with the given id.
    pub fn remove(&mut self, id: &str) -> Option<DrawingObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    /// Insert an object at a z-index (clamped to the end). Used to put
    /// removed objects back where they were.
    pub fn insert_at(&mut self, index: usize, obj: DrawingObject) {
        if obj.is_canvas() {
            log::warn!("Scene::insert_at rejected object: {}", SceneError::CanvasSentinel);
            return;
        }
        let index = index.min(self.objects.len());
        self.objects.insert(index, obj);
    }

    /// All objects in paint order.
    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    pub fn find_by_id(&self, id: &str) -> Option<&DrawingObject> {
        self.objects.iter().find(|obj| obj.has_id(id))
    }

    /// Mutable access to a single object. In-place edits (position, size,
    /// style) are allowed; the sequence itself only changes through
    /// add/remove.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut DrawingObject> {
        self.objects.iter_mut().find(|obj| obj.has_id(id))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.objects.iter().position(|obj| obj.has_id(id))
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object. The id counter is left untouched.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Deep copy with the same ids and counter value.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Topmost object under the point.
    pub fn object_at_point(&self, x: f64, y: f64) -> Option<&DrawingObject> {
        hit_test::top_object_at_point(x, y, &self.objects)
    }

    /// Every object under the point, bottom to top.
    pub fn objects_at_point(&self, x: f64, y: f64) -> Vec<&DrawingObject> {
        hit_test::objects_at_point(x, y, &self.objects)
    }

    /// Objects selected by a marquee rectangle, in paint order.
    pub fn objects_in_rect(&self, rect: Rect, containment: Containment) -> Vec<&DrawingObject> {
        objects_in_rect(rect, &self.objects, containment)
    }

    /// Replace the object with id `id` by `new`, keeping its index.
    /// Returns false if no such object exists.
    pub fn update_object(&mut self, id: &str, new: DrawingObject) -> bool {
        if new.is_canvas() {
            log::warn!("Scene::update_object rejected object: {}", SceneError::CanvasSentinel);
            return false;
        }
        match self.find_by_id_mut(id) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    /// Get the bounding box of all objects.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for obj in &self.objects {
            let bounds = obj.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Convenience wrapper for [`object_at_point`](Self::object_at_point).
    pub fn object_at(&self, point: Point) -> Option<&DrawingObject> {
        self.object_at_point(point.x, point.y)
    }
}
