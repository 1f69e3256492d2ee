pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod world;
