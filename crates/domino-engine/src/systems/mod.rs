pub mod history;
pub mod placement;
pub mod projector;
pub mod simulation;
