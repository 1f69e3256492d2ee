use std::collections::HashMap;

use glam::Vec3;

use crate::api::types::{ObjectId, Pose};
use crate::api::world::{Ray, RayCaster, WorldObjects};

/// State the memory world keeps per object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryObject {
    pub pose: Pose,
    pub hidden: bool,
    pub awake: bool,
}

/// Headless world: a flat ground plane plus a table of objects.
///
/// Used by tests and native hosts that do their own rendering. Ray casts hit
/// the ground plane only; objects have no extent.
pub struct MemoryWorld {
    objects: HashMap<ObjectId, MemoryObject>,
    next_id: u32,
    /// Height of the ground plane, or `None` for an empty void.
    ground: Option<f32>,
}

impl MemoryWorld {
    /// A world with a ground plane at z = 0.
    pub fn new() -> Self {
        Self::with_ground(Some(0.0))
    }

    pub fn with_ground(ground: Option<f32>) -> Self {
        Self {
            objects: HashMap::new(),
            next_id: 1,
            ground,
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&MemoryObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn is_hidden(&self, id: ObjectId) -> bool {
        self.objects.get(&id).is_some_and(|o| o.hidden)
    }

    pub fn is_awake(&self, id: ObjectId) -> bool {
        self.objects.get(&id).is_some_and(|o| o.awake)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Move an object without going through `set_pose`, as a physics step would.
    pub fn displace(&mut self, id: ObjectId, pose: Pose) {
        if let Some(o) = self.objects.get_mut(&id) {
            o.pose = pose;
        }
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldObjects for MemoryWorld {
    fn spawn(&mut self, pose: Pose) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            MemoryObject {
                pose,
                hidden: false,
                awake: false,
            },
        );
        id
    }

    fn destroy(&mut self, id: ObjectId) {
        self.objects.remove(&id);
    }

    fn set_hidden(&mut self, id: ObjectId, hidden: bool) {
        if let Some(o) = self.objects.get_mut(&id) {
            o.hidden = hidden;
        }
    }

    fn set_pose(&mut self, id: ObjectId, pose: Pose) {
        if let Some(o) = self.objects.get_mut(&id) {
            o.pose = pose;
        }
    }

    fn set_physics_awake(&mut self, id: ObjectId, awake: bool) {
        if let Some(o) = self.objects.get_mut(&id) {
            o.awake = awake;
        }
    }

    fn pose(&self, id: ObjectId) -> Option<Pose> {
        self.objects.get(&id).map(|o| o.pose)
    }
}

impl RayCaster for MemoryWorld {
    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<Vec3> {
        let ground = self.ground?;
        // Parallel to the plane
        if ray.direction.z.abs() < f32::EPSILON {
            return None;
        }
        let t = (ground - ray.origin.z) / ray.direction.z;
        if t < 0.0 || t > max_distance {
            return None;
        }
        let mut hit = ray.at(t);
        hit.z = ground;
        Some(hit)
    }
}
