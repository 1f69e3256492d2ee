use crate::api::types::{PieceId, Pose};
use crate::api::world::WorldObjects;
use crate::components::domino::DominoFaces;
use crate::components::placeable::Placeable;
use crate::core::rng::Rng;

/// Arena of committed pieces, indexed by stable `PieceId`.
///
/// This is the only place that destroys piece objects; history sets and the
/// placement chain hold plain ids.
pub struct PieceArena {
    slots: Vec<Option<Placeable>>,
    /// Live pieces in placement order.
    placed: Vec<PieceId>,
    /// Pieces ever placed, including destroyed ones.
    placed_total: u32,
    rng: Rng,
}

impl PieceArena {
    pub fn new(seed: u64) -> Self {
        Self {
            slots: Vec::with_capacity(256),
            placed: Vec::with_capacity(256),
            placed_total: 0,
            rng: Rng::new(seed),
        }
    }

    /// Spawn a world object at `pose` and register it as a new visible piece.
    pub fn spawn<W: WorldObjects + ?Sized>(&mut self, world: &mut W, pose: Pose) -> PieceId {
        let id = PieceId(self.slots.len() as u32);
        let object = world.spawn(pose);
        let faces = DominoFaces::roll(&mut self.rng);
        self.slots
            .push(Some(Placeable::new(id, object, pose).with_faces(faces)));
        self.placed.push(id);
        self.placed_total += 1;
        id
    }

    /// Remove every listed piece from the world and the arena, compacting the
    /// placement order once. Unknown or already destroyed ids are skipped.
    /// Returns how many pieces were destroyed.
    pub fn destroy_all<W, I>(&mut self, world: &mut W, ids: I) -> usize
    where
        W: WorldObjects + ?Sized,
        I: IntoIterator<Item = PieceId>,
    {
        let mut destroyed = 0;
        for id in ids {
            if let Some(piece) = self.slots.get_mut(id.0 as usize).and_then(Option::take) {
                world.destroy(piece.object);
                destroyed += 1;
            }
        }
        if destroyed > 0 {
            let slots = &self.slots;
            self.placed
                .retain(|p| matches!(slots.get(p.0 as usize), Some(Some(_))));
        }
        destroyed
    }

    /// Show or hide a piece. Returns `false` if the piece doesn't exist.
    pub fn set_visible<W: WorldObjects + ?Sized>(&mut self, world: &mut W, id: PieceId, visible: bool) -> bool {
        match self.get_mut(id) {
            Some(piece) => {
                piece.visible = visible;
                world.set_hidden(piece.object, !visible);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: PieceId) -> Option<&Placeable> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Placeable> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.get(id).is_some()
    }

    /// Live pieces in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Placeable> {
        self.placed.iter().filter_map(|&id| self.get(id))
    }

    pub fn visible_count(&self) -> usize {
        self.iter().filter(|p| p.visible).count()
    }

    /// Number of live pieces.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Pieces ever placed in this session, destroyed ones included.
    pub fn placed_total(&self) -> u32 {
        self.placed_total
    }
}

impl Default for PieceArena {
    fn default() -> Self {
        Self::new(42)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::MemoryWorld;
    use glam::Vec3;

    #[test]
    fn spawn_registers_piece_and_world_object() {
        let mut world = MemoryWorld::new();
        let mut arena = PieceArena::new(1);
        let pose = Pose::at(Vec3::new(1.0, 0.0, 0.0));
        let id = arena.spawn(&mut world, pose);

        let piece = arena.get(id).unwrap();
        assert_eq!(piece.original_pose(), pose);
        assert!(piece.visible);
        assert_eq!(world.pose(piece.object), Some(pose));
        assert_eq!(arena.len(), 1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn destroy_removes_from_world_and_order() {
        let mut world = MemoryWorld::new();
        let mut arena = PieceArena::new(1);
        let a = arena.spawn(&mut world, Pose::IDENTITY);
        let b = arena.spawn(&mut world, Pose::IDENTITY);

        assert_eq!(arena.destroy_all(&mut world, [a]), 1);
        assert!(!arena.contains(a));
        assert_eq!(arena.iter().map(|p| p.id).collect::<Vec<_>>(), vec![b]);
        assert_eq!(world.len(), 1);
        // Second destroy is a no-op
        assert_eq!(arena.destroy_all(&mut world, [a]), 0);
        assert_eq!(arena.placed_total(), 2);
    }

    #[test]
    fn destroy_all_keeps_survivors_in_order() {
        let mut world = MemoryWorld::new();
        let mut arena = PieceArena::new(1);
        let ids: Vec<_> = (0..6).map(|_| arena.spawn(&mut world, Pose::IDENTITY)).collect();

        let destroyed = arena.destroy_all(&mut world, [ids[1], ids[3], ids[4], ids[3]]);
        assert_eq!(destroyed, 3);
        assert_eq!(
            arena.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![ids[0], ids[2], ids[5]]
        );
        assert_eq!(arena.len(), 3);
        assert_eq!(world.len(), 3);
        assert_eq!(arena.destroy_all(&mut world, [ids[1]]), 0);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut world = MemoryWorld::new();
        let mut arena = PieceArena::new(1);
        let a = arena.spawn(&mut world, Pose::IDENTITY);
        arena.destroy_all(&mut world, [a]);
        let b = arena.spawn(&mut world, Pose::IDENTITY);
        assert_ne!(a, b);
    }

    #[test]
    fn set_visible_hides_in_world() {
        let mut world = MemoryWorld::new();
        let mut arena = PieceArena::new(1);
        let id = arena.spawn(&mut world, Pose::IDENTITY);
        let object = arena.get(id).unwrap().object;

        assert!(arena.set_visible(&mut world, id, false));
        assert!(world.is_hidden(object));
        assert_eq!(arena.visible_count(), 0);
        assert!(!arena.set_visible(&mut world, PieceId(99), true));
    }
}
