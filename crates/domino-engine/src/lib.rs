pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, PlacementConfig, SessionConfig};
pub use api::error::ModeError;
pub use api::session::PlayerSession;
pub use api::types::{event_kind, ObjectId, PieceId, Pose, SessionEvent};
pub use api::world::{Ray, RayCaster, WorldObjects};
pub use components::domino::DominoFaces;
pub use components::placeable::Placeable;
pub use core::arena::PieceArena;
pub use core::clock::FrameClock;
pub use core::memory::MemoryWorld;
pub use input::bindings::{keys, Action, KeyBindings, MoveFlags};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use renderer::camera::CameraRig;
pub use renderer::instance::{InstanceBuffer, PieceInstance};
pub use systems::history::{HistoryLedger, HistorySet};
pub use systems::placement::{Ghost, PlacementChain};
pub use systems::projector::PointerProjector;
pub use systems::simulation::SimulationToggle;

#[cfg(feature = "physics")]
pub use core::physics::{PhysicsWorld, PieceShape};
