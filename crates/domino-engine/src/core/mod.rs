pub mod arena;
pub mod clock;
pub mod math;
pub mod memory;
#[cfg(feature = "physics")]
pub mod physics;
pub mod rng;
