//! Per-domino details: the pip faces rolled at spawn, and the ground snap
//! that drops a new piece onto the terrain beneath it.

use glam::Vec3;

use crate::api::config::PlacementConfig;
use crate::api::types::Pose;
use crate::api::world::{Ray, RayCaster};
use crate::core::rng::Rng;

/// Number of pip slots on a domino model.
pub const FACE_SLOTS: usize = 4;
pub const MIN_PIPS: u32 = 1;
pub const MAX_PIPS: u32 = 6;

/// Pip counts for each face slot, each in 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominoFaces(pub [u8; FACE_SLOTS]);

impl DominoFaces {
    /// Roll every slot independently.
    pub fn roll(rng: &mut Rng) -> Self {
        let mut faces = [0u8; FACE_SLOTS];
        for face in faces.iter_mut() {
            *face = rng.range_inclusive(MIN_PIPS, MAX_PIPS) as u8;
        }
        Self(faces)
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|&f| f as u32).sum()
    }
}

impl Default for DominoFaces {
    fn default() -> Self {
        Self([MIN_PIPS as u8; FACE_SLOTS])
    }
}

/// Where a piece spawned at `pose` comes to rest.
///
/// Casts straight down from `snap_height` above the spawn point against the
/// terrain only, so a chain crossing earlier pieces still lands on the ground.
/// On a miss the pose is kept as given.
pub fn rest_pose<C: RayCaster + ?Sized>(caster: &C, pose: Pose, config: &PlacementConfig) -> Pose {
    if !config.snap_to_ground {
        return pose;
    }
    let ray = Ray::new(pose.position + Vec3::Z * config.snap_height, Vec3::NEG_Z);
    match caster.cast_ground(&ray, config.snap_height + config.snap_depth) {
        Some(hit) => Pose::new(hit, pose.rotation),
        None => pose,
    }
}
