use wasm_bindgen::prelude::*;

/// Rapier world when physics is built in, the flat headless world otherwise.
#[cfg(feature = "physics")]
type SandboxWorld = domino_engine::PhysicsWorld;
#[cfg(not(feature = "physics"))]
type SandboxWorld = domino_engine::MemoryWorld;

domino_web::export_sandbox!(SandboxWorld, "domino-sandbox");
