use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// DOM key codes used by the default bindings.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
    pub const Y: u32 = 89;
    pub const Z: u32 = 90;
}

/// Discrete actions a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBack,
    ToggleSimulation,
    Undo,
    Redo,
}

impl Action {
    /// The movement flag this action holds, if it is a movement action.
    pub fn move_flag(self) -> Option<MoveFlags> {
        match self {
            Action::MoveLeft => Some(MoveFlags::LEFT),
            Action::MoveRight => Some(MoveFlags::RIGHT),
            Action::MoveForward => Some(MoveFlags::FORWARD),
            Action::MoveBack => Some(MoveFlags::BACK),
            _ => None,
        }
    }
}

/// Key code → action table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    map: HashMap<u32, Action>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn bind(mut self, key_code: u32, action: Action) -> Self {
        self.map.insert(key_code, action);
        self
    }

    pub fn action(&self, key_code: u32) -> Option<Action> {
        self.map.get(&key_code).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::empty()
            .bind(keys::A, Action::MoveLeft)
            .bind(keys::D, Action::MoveRight)
            .bind(keys::W, Action::MoveForward)
            .bind(keys::S, Action::MoveBack)
            .bind(keys::SPACE, Action::ToggleSimulation)
            .bind(keys::Z, Action::Undo)
            .bind(keys::Y, Action::Redo)
    }
}

/// Held camera movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const FORWARD: Self = Self(1 << 2);
    pub const BACK: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}
