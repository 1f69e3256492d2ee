//! Undo history over placement gestures.
//!
//! Each gesture's pieces form one `HistorySet`. Undo hides the most recent
//! visible set, redo reveals it again, and `restart_history` destroys a tail
//! of sets for good. Out-of-range calls are no-ops.

use crate::api::types::PieceId;
use crate::api::world::WorldObjects;
use crate::core::arena::PieceArena;

/// Pieces placed during one gesture, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySet {
    /// 1-based sequence number; the ledger length + 1 when the set was opened.
    pub index: usize,
    pub pieces: Vec<PieceId>,
}

impl HistorySet {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            pieces: Vec::new(),
        }
    }

    pub fn push(&mut self, id: PieceId) {
        self.pieces.push(id);
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Committed sets plus the number currently undone from the tail.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    sets: Vec<HistorySet>,
    undo_depth: usize,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished set. Undo depth is untouched.
    pub fn commit(&mut self, set: HistorySet) {
        log::info!("history: committed set {} ({} pieces)", set.index, set.len());
        self.sets.push(set);
    }

    /// Hide the most recent visible set. Returns its index, or `None` when
    /// everything is already undone.
    pub fn undo<W: WorldObjects + ?Sized>(&mut self, pieces: &mut PieceArena, world: &mut W) -> Option<usize> {
        if self.undo_depth >= self.sets.len() {
            log::debug!("history: nothing to undo");
            return None;
        }
        let set = &self.sets[self.sets.len() - self.undo_depth - 1];
        for &id in &set.pieces {
            pieces.set_visible(world, id, false);
        }
        self.undo_depth += 1;
        log::info!("history: undid set {} (depth {})", set.index, self.undo_depth);
        Some(set.index)
    }

    /// Reveal the most recently hidden set. Returns its index, or `None`
    /// when nothing is undone.
    pub fn redo<W: WorldObjects + ?Sized>(&mut self, pieces: &mut PieceArena, world: &mut W) -> Option<usize> {
        if self.undo_depth == 0 {
            log::debug!("history: nothing to redo");
            return None;
        }
        let set = &self.sets[self.sets.len() - self.undo_depth];
        for &id in &set.pieces {
            pieces.set_visible(world, id, true);
        }
        self.undo_depth -= 1;
        log::info!("history: redid set {} (depth {})", set.index, self.undo_depth);
        Some(set.index)
    }

    /// Destroy every piece in `sets[from..]`, truncate to `from` sets and
    /// reset the undo depth. Returns the number of pieces destroyed.
    ///
    /// `from` past the end is a no-op. Sets before `from` keep their
    /// visibility, even if they were undone.
    pub fn restart_history<W: WorldObjects + ?Sized>(
        &mut self,
        from: usize,
        pieces: &mut PieceArena,
        world: &mut W,
    ) -> usize {
        if from > self.sets.len() {
            log::debug!("history: restart from {} is past the end ({} sets)", from, self.sets.len());
            return 0;
        }

        let tail = self.sets.drain(from..).flat_map(|set| set.pieces);
        let destroyed = pieces.destroy_all(world, tail);
        self.undo_depth = 0;
        log::info!(
            "history: restarted from {}, {} pieces destroyed, {} sets remain",
            from,
            destroyed,
            self.sets.len()
        );
        destroyed
    }

    /// Index the next opened set should carry.
    pub fn next_index(&self) -> usize {
        self.sets.len() + 1
    }

    pub fn sets(&self) -> &[HistorySet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_depth
    }
}
