use std::collections::HashMap;

use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rapier3d::parry::query::{Ray as CastRay, RayCast};
use rapier3d::prelude::*;

use crate::api::types::{ObjectId, Pose};
use crate::api::world::{Ray, RayCaster, WorldObjects};

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec3_to_na(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

fn pose_to_iso(pose: Pose) -> Isometry3<f32> {
    let p = pose.position;
    let q = pose.rotation;
    Isometry3::from_parts(
        Translation3::new(p.x, p.y, p.z),
        UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

fn iso_to_pose(iso: &Isometry3<f32>) -> Pose {
    let t = iso.translation.vector;
    let c = iso.rotation.quaternion().coords;
    Pose::new(Vec3::new(t.x, t.y, t.z), Quat::from_xyzw(c.x, c.y, c.z, c.w))
}

fn ray_to_na(ray: &Ray) -> CastRay {
    let o = ray.origin;
    CastRay::new(Point3::new(o.x, o.y, o.z), vec3_to_na(ray.direction))
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Collider and material of a single domino.
/// The body origin sits at the bottom face; the box extends upward from it.
#[derive(Debug, Clone, Copy)]
pub struct PieceShape {
    /// Half size along the piece's local X (width), Y (thickness), Z (height).
    pub half_extents: Vec3,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for PieceShape {
    fn default() -> Self {
        Self {
            half_extents: Vec3::new(0.1, 0.03, 0.2),
            density: 1.0,
            friction: 0.6,
            restitution: 0.05,
        }
    }
}

const GROUND_HALF_SIZE: f32 = 500.0;
const GROUND_HALF_THICKNESS: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
struct PhysicsObject {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Rapier3D world with a flat ground slab whose top face is z = 0.
/// Implements both collaborator contracts, so a session can run on it directly.
pub struct PhysicsWorld {
    gravity: Vector3<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// The terrain slab; ground snaps only test this collider.
    ground: ColliderHandle,
    objects: HashMap<ObjectId, PhysicsObject>,
    next_id: u32,
    shape: PieceShape,
}

impl PhysicsWorld {
    /// Create a world with the given gravity. Z is up, so Earth gravity is
    /// `Vec3::new(0.0, 0.0, -9.81)`.
    pub fn new(gravity: Vec3) -> Self {
        Self::with_shape(gravity, PieceShape::default())
    }

    pub fn with_shape(gravity: Vec3, shape: PieceShape) -> Self {
        let mut colliders = ColliderSet::new();
        let ground = ColliderBuilder::cuboid(GROUND_HALF_SIZE, GROUND_HALF_SIZE, GROUND_HALF_THICKNESS)
            .translation(Vector3::new(0.0, 0.0, -GROUND_HALF_THICKNESS))
            .friction(0.8)
            .build();
        let ground = colliders.insert(ground);

        Self {
            gravity: vec3_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            ground,
            objects: HashMap::new(),
            next_id: 1,
            shape,
        }
    }

    /// Number of domino bodies in the simulation (the ground is not counted).
    pub fn body_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether an object's body is asleep. `None` for unknown ids.
    pub fn is_sleeping(&self, id: ObjectId) -> Option<bool> {
        let obj = self.objects.get(&id)?;
        self.bodies.get(obj.body).map(|rb| rb.is_sleeping())
    }

    /// Whether an object's body takes part in the simulation.
    pub fn is_enabled(&self, id: ObjectId) -> Option<bool> {
        let obj = self.objects.get(&id)?;
        self.bodies.get(obj.body).map(|rb| rb.is_enabled())
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -9.81))
    }
}

impl WorldObjects for PhysicsWorld {
    fn spawn(&mut self, pose: Pose) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let rb = RigidBodyBuilder::dynamic()
            .position(pose_to_iso(pose))
            .sleeping(true)
            .user_data(id.0 as u128)
            .build();
        let body = self.bodies.insert(rb);

        let h = self.shape.half_extents;
        let collider = ColliderBuilder::cuboid(h.x, h.y, h.z)
            .translation(Vector3::new(0.0, 0.0, h.z))
            .density(self.shape.density)
            .friction(self.shape.friction)
            .restitution(self.shape.restitution)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        self.objects.insert(id, PhysicsObject { body, collider });
        id
    }

    fn destroy(&mut self, id: ObjectId) {
        if let Some(obj) = self.objects.remove(&id) {
            self.bodies.remove(
                obj.body,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    fn set_hidden(&mut self, id: ObjectId, hidden: bool) {
        let Some(obj) = self.objects.get(&id) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(obj.body) {
            rb.set_enabled(!hidden);
        }
        if let Some(collider) = self.colliders.get_mut(obj.collider) {
            collider.set_enabled(!hidden);
        }
    }

    fn set_pose(&mut self, id: ObjectId, pose: Pose) {
        let Some(obj) = self.objects.get(&id) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(obj.body) {
            rb.set_position(pose_to_iso(pose), false);
            rb.set_linvel(Vector3::zeros(), false);
            rb.set_angvel(Vector3::zeros(), false);
        }
    }

    fn set_physics_awake(&mut self, id: ObjectId, awake: bool) {
        let Some(obj) = self.objects.get(&id) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(obj.body) {
            if awake {
                rb.wake_up(true);
            } else {
                rb.sleep();
            }
        }
    }

    fn pose(&self, id: ObjectId) -> Option<Pose> {
        let obj = self.objects.get(&id)?;
        self.bodies.get(obj.body).map(|rb| iso_to_pose(rb.position()))
    }

    fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }
}

impl RayCaster for PhysicsWorld {
    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<Vec3> {
        let cast = ray_to_na(ray);

        let mut nearest: Option<f32> = None;
        for (_, collider) in self.colliders.iter() {
            if !collider.is_enabled() {
                continue;
            }
            if let Some(toi) = collider
                .shape()
                .cast_ray(collider.position(), &cast, max_distance, true)
            {
                if nearest.map_or(true, |best| toi < best) {
                    nearest = Some(toi);
                }
            }
        }
        nearest.map(|t| ray.at(t))
    }

    fn cast_ground(&self, ray: &Ray, max_distance: f32) -> Option<Vec3> {
        let ground = self.colliders.get(self.ground)?;
        ground
            .shape()
            .cast_ray(ground.position(), &ray_to_na(ray), max_distance, true)
            .map(|t| ray.at(t))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn down_from(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 5.0), Vec3::NEG_Z)
    }

    #[test]
    fn ray_hits_ground_top_face() {
        let world = PhysicsWorld::default();
        let hit = world.cast_ray(&down_from(3.0, -2.0), 100.0).unwrap();
        assert!(hit.z.abs() < 1e-4, "hit at {:?}", hit);
        assert!((hit.x - 3.0).abs() < 1e-4);
    }

    #[test]
    fn ray_respects_max_distance() {
        let world = PhysicsWorld::default();
        assert!(world.cast_ray(&down_from(0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn spawned_pieces_start_asleep() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(Pose::IDENTITY);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.is_sleeping(id), Some(true));

        world.set_physics_awake(id, true);
        assert_eq!(world.is_sleeping(id), Some(false));
        world.set_physics_awake(id, false);
        assert_eq!(world.is_sleeping(id), Some(true));
    }

    #[test]
    fn hidden_pieces_are_skipped_by_rays() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(Pose::IDENTITY);

        let hit = world.cast_ray(&down_from(0.0, 0.0), 100.0).unwrap();
        assert!(hit.z > 0.3, "expected piece top, got {:?}", hit);

        world.set_hidden(id, true);
        assert_eq!(world.is_enabled(id), Some(false));
        let hit = world.cast_ray(&down_from(0.0, 0.0), 100.0).unwrap();
        assert!(hit.z.abs() < 1e-4, "expected ground, got {:?}", hit);
    }

    #[test]
    fn ground_cast_sees_through_pieces() {
        let mut world = PhysicsWorld::default();
        world.spawn(Pose::IDENTITY);

        let hit = world.cast_ground(&down_from(0.0, 0.0), 100.0).unwrap();
        assert!(hit.z.abs() < 1e-4, "expected ground, got {:?}", hit);
        assert!(world.cast_ground(&down_from(0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn set_pose_round_trips() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(Pose::IDENTITY);
        let target = Pose::new(Vec3::new(1.0, 2.0, 0.0), Quat::from_rotation_z(0.7));
        world.set_pose(id, target);

        let pose = world.pose(id).unwrap();
        assert!((pose.position - target.position).length() < 1e-5);
        assert!(pose.rotation.dot(target.rotation).abs() > 0.9999);
    }

    #[test]
    fn awake_piece_falls_under_gravity() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(Pose::at(Vec3::new(0.0, 0.0, 2.0)));
        world.set_physics_awake(id, true);

        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }
        let z = world.pose(id).unwrap().position.z;
        assert!(z < 2.0, "piece should have fallen: z={}", z);
    }

    #[test]
    fn destroy_removes_body() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(Pose::IDENTITY);
        world.destroy(id);
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.pose(id), None);
    }
}
