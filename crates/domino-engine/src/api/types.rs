use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

/// Stable handle to a placed piece in the session's arena.
/// Handles are never reused, even after the piece is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// Opaque handle to an object owned by the world service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

/// Position + rotation of a world object. Z is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Session event kinds carried in `SessionEvent::kind`.
pub mod event_kind {
    /// a, b, c = world position of the new piece.
    pub const PIECE_PLACED: f32 = 1.0;
    /// a = set index, b = piece count.
    pub const HISTORY_COMMITTED: f32 = 2.0;
    /// a = index of the set that was hidden.
    pub const UNDONE: f32 = 3.0;
    /// a = index of the set that was revealed.
    pub const REDONE: f32 = 4.0;
    /// a = first truncated position, b = destroyed piece count.
    pub const HISTORY_RESTARTED: f32 = 5.0;
    pub const SIMULATION_STARTED: f32 = 6.0;
    pub const SIMULATION_ENDED: f32 = 7.0;
}

/// A notification from the session to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SessionEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SessionEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    pub fn piece_placed(position: Vec3) -> Self {
        Self::new(event_kind::PIECE_PLACED, position.x, position.y, position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<SessionEvent>(), 16);
        assert_eq!(SessionEvent::FLOATS, 4);
    }

    #[test]
    fn piece_placed_carries_position() {
        let e = SessionEvent::piece_placed(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(e.kind, event_kind::PIECE_PLACED);
        assert_eq!((e.a, e.b, e.c), (1.0, 2.0, 3.0));
    }
}
