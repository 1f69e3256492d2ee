//! Placement chain: turns a moving target point into evenly spaced pieces.
//!
//! A gesture starts with a ghost preview at the first target. The ghost is
//! turned to face away from the chasing goal. Once the goal is more than
//! `spacing` from the anchor, the ghost is promoted to a real piece and a
//! second piece is placed one spacing further along. From then on one piece
//! is committed per frame whenever the goal outruns the anchor.

use glam::{Quat, Vec3};

use crate::api::config::PlacementConfig;
use crate::api::error::ModeError;
use crate::api::types::{ObjectId, PieceId, Pose};
use crate::api::world::{RayCaster, WorldObjects};
use crate::components::domino::rest_pose;
use crate::core::arena::PieceArena;
use crate::core::math::{chase_factor, flat_facing};
use crate::systems::history::HistorySet;

/// Uncommitted preview of a gesture's first piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub object: ObjectId,
    pub pose: Pose,
}

pub struct PlacementChain {
    config: PlacementConfig,
    active: bool,
    first_placed: bool,
    current_goal: Vec3,
    /// Last committed chain point, unsnapped.
    anchor: Option<Vec3>,
    first_position: Vec3,
    ghost: Option<Ghost>,
    active_set: Option<HistorySet>,
    /// Orientation of the last committed piece.
    heading: Quat,
}

impl PlacementChain {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            active: false,
            first_placed: false,
            current_goal: Vec3::ZERO,
            anchor: None,
            first_position: Vec3::ZERO,
            ghost: None,
            active_set: None,
            heading: Quat::IDENTITY,
        }
    }

    /// Open a gesture whose history set will carry `index`.
    pub fn begin(&mut self, index: usize) -> Result<(), ModeError> {
        if self.active {
            return Err(ModeError::GestureActive);
        }
        self.active = true;
        self.first_placed = false;
        self.anchor = None;
        self.heading = Quat::IDENTITY;
        self.active_set = Some(HistorySet::new(index));
        log::debug!("placement: gesture {} started", index);
        Ok(())
    }

    /// Advance the chain toward `target`. Returns the pieces committed this
    /// frame, in placement order.
    pub fn update<W>(
        &mut self,
        target: Vec3,
        dt: f32,
        pieces: &mut PieceArena,
        world: &mut W,
    ) -> Result<Vec<PieceId>, ModeError>
    where
        W: WorldObjects + RayCaster + ?Sized,
    {
        if !self.active {
            return Err(ModeError::NoActiveGesture);
        }

        // Ghost faces away from the goal it is waiting on
        if let Some(ghost) = self.ghost.as_mut() {
            if let Some(rotation) = flat_facing(ghost.pose.position - self.current_goal) {
                ghost.pose.rotation = rotation;
                world.set_pose(ghost.object, ghost.pose);
            }
        }

        if !self.first_placed {
            self.current_goal = target;
            if self.ghost.is_none() {
                let pose = rest_pose(&*world, Pose::new(target, self.heading), &self.config);
                let object = world.spawn(pose);
                self.ghost = Some(Ghost { object, pose });
                self.first_position = target;
            }
            self.anchor = Some(self.first_position);
        }

        let t = chase_factor(dt, self.config.chase_rate);
        self.current_goal = self.current_goal.lerp(target, t);

        let mut placed = Vec::new();
        let Some(anchor) = self.anchor else {
            return Ok(placed);
        };
        if self.current_goal.distance(anchor) <= self.config.spacing {
            return Ok(placed);
        }

        if !self.first_placed {
            let rotation = match self.ghost.take() {
                Some(ghost) => {
                    world.destroy(ghost.object);
                    ghost.pose.rotation
                }
                None => self.heading,
            };
            placed.push(self.commit(Pose::new(self.first_position, rotation), pieces, world));
            self.heading = rotation;
            self.first_placed = true;
        }

        // The goal is more than `spacing` away, so the step is never zero
        let step = (self.current_goal - anchor).normalize_or_zero() * self.config.spacing;
        let next = anchor + step;
        if let Some(rotation) = flat_facing(step) {
            self.heading = rotation;
        }
        placed.push(self.commit(Pose::new(next, self.heading), pieces, world));
        self.anchor = Some(next);

        Ok(placed)
    }

    /// Close the gesture. Destroys a leftover ghost and hands back the
    /// gesture's history set, which may be empty.
    pub fn end<W: WorldObjects + ?Sized>(&mut self, world: &mut W) -> Result<HistorySet, ModeError> {
        if !self.active {
            return Err(ModeError::NoActiveGesture);
        }
        if let Some(ghost) = self.ghost.take() {
            world.destroy(ghost.object);
        }
        self.active = false;
        self.first_placed = false;
        self.anchor = None;
        Ok(self.active_set.take().unwrap_or_default())
    }

    fn commit<W>(&mut self, pose: Pose, pieces: &mut PieceArena, world: &mut W) -> PieceId
    where
        W: WorldObjects + RayCaster + ?Sized,
    {
        let pose = rest_pose(&*world, pose, &self.config);
        let id = pieces.spawn(world, pose);
        if let Some(set) = self.active_set.as_mut() {
            set.push(id);
        }
        id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_first_placed(&self) -> bool {
        self.first_placed
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    pub fn current_goal(&self) -> Vec3 {
        self.current_goal
    }

    pub fn ghost(&self) -> Option<&Ghost> {
        self.ghost.as_ref()
    }

    pub fn active_set(&self) -> Option<&HistorySet> {
        self.active_set.as_ref()
    }

    pub fn spacing(&self) -> f32 {
        self.config.spacing
    }
}

impl Default for PlacementChain {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}
