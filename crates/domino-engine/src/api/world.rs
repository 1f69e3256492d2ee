//! Collaborator contracts the session consumes.
//!
//! The host engine (or `MemoryWorld` / `PhysicsWorld`) owns the actual
//! objects; the session only holds `ObjectId`s and drives them through these
//! traits.

use glam::Vec3;

use super::types::{ObjectId, Pose};

/// A ray in world space. `direction` is expected to be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Spawn/destroy/mutate world objects.
pub trait WorldObjects {
    /// Create a new object at `pose`. Objects start with physics asleep.
    fn spawn(&mut self, pose: Pose) -> ObjectId;

    /// Remove an object. Unknown ids are ignored.
    fn destroy(&mut self, id: ObjectId);

    /// Hide or reveal an object. Hidden objects stay allocated but are skipped
    /// by rendering, physics and ray casts.
    fn set_hidden(&mut self, id: ObjectId, hidden: bool);

    /// Teleport an object, cancelling any motion it had.
    fn set_pose(&mut self, id: ObjectId, pose: Pose);

    /// Wake an object's rigid body or put it to sleep.
    fn set_physics_awake(&mut self, id: ObjectId, awake: bool);

    /// Current pose of an object, if it exists.
    fn pose(&self, id: ObjectId) -> Option<Pose>;

    /// Advance the world's own simulation. Worlds without physics ignore this.
    fn step(&mut self, _dt: f32) {}
}

/// World ray-cast query.
pub trait RayCaster {
    /// First hit point along `ray` within `max_distance`, if any.
    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<Vec3>;

    /// First hit along `ray` against the terrain only, ignoring pieces.
    /// Worlds whose rays only ever see terrain can keep the default.
    fn cast_ground(&self, ray: &Ray, max_distance: f32) -> Option<Vec3> {
        self.cast_ray(ray, max_distance)
    }
}
