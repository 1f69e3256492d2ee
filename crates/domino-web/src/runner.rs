use domino_engine::{
    FrameClock, InputEvent, InputQueue, InstanceBuffer, PieceInstance, PlayerSession, RayCaster,
    SessionConfig, SessionEvent, WorldObjects,
};

/// Generic runner that drives a player session from host frames.
///
/// Each concrete sandbox creates a `thread_local!` SandboxRunner and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct SandboxRunner<W> {
    session: PlayerSession<W>,
    input: InputQueue,
    clock: FrameClock,
    instances: InstanceBuffer,
    /// Session events from the last tick, packed for host reads.
    events: Vec<SessionEvent>,
}

impl<W: WorldObjects + RayCaster> SandboxRunner<W> {
    pub fn new(config: SessionConfig, world: W) -> Self {
        Self {
            session: PlayerSession::new(config, world),
            input: InputQueue::new(),
            clock: FrameClock::default(),
            instances: InstanceBuffer::new(),
            events: Vec::with_capacity(32),
        }
    }

    /// Build a runner from a JSON config. An empty string means defaults;
    /// a malformed config is reported and replaced by defaults.
    pub fn from_json(json: &str, world: W) -> Self {
        let config = if json.trim().is_empty() {
            SessionConfig::default()
        } else {
            match SessionConfig::from_json(json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("sandbox: invalid config ({}), using defaults", e);
                    SessionConfig::default()
                }
            }
        };
        Self::new(config, world)
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: apply queued input, run the due fixed steps,
    /// then rebuild the instance buffer and pack the session's events.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();

        // Discrete input is processed before the frame's continuous update
        for event in self.input.drain() {
            self.session.on_event(&event);
        }

        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            self.session.on_frame(self.clock.step());
        }

        self.session.write_instances(&mut self.instances);
        self.events.extend(self.session.drain_events());
    }

    // ---- Commands ----

    /// Returns the undone set's index, or -1 when nothing was undone.
    pub fn undo(&mut self) -> i32 {
        self.session.undo().map_or(-1, |i| i as i32)
    }

    /// Returns the redone set's index, or -1 when nothing was redone.
    pub fn redo(&mut self) -> i32 {
        self.session.redo().map_or(-1, |i| i as i32)
    }

    pub fn restart_history(&mut self, from: u32) -> u32 {
        self.session.restart_history(from as usize) as u32
    }

    /// Returns whether the simulation is running afterwards.
    pub fn toggle_simulation(&mut self) -> bool {
        if let Err(e) = self.session.toggle_simulation() {
            log::debug!("sandbox: toggle ignored: {}", e);
        }
        self.session.is_simulating()
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_floats().as_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instance_floats(&self) -> u32 {
        PieceInstance::FLOATS as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn piece_count(&self) -> u32 {
        self.session.pieces().len() as u32
    }

    pub fn placed_total(&self) -> u32 {
        self.session.pieces().placed_total()
    }

    pub fn is_simulating(&self) -> bool {
        self.session.is_simulating()
    }

    pub fn session(&self) -> &PlayerSession<W> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlayerSession<W> {
        &mut self.session
    }
}
