use glam::{Vec2, Vec3};

use crate::api::config::SessionConfig;
use crate::api::error::ModeError;
use crate::api::types::{event_kind, PieceId, SessionEvent};
use crate::api::world::{RayCaster, WorldObjects};
use crate::core::arena::PieceArena;
use crate::input::bindings::{Action, KeyBindings, MoveFlags};
use crate::input::queue::{InputEvent, PointerButton};
use crate::renderer::camera::CameraRig;
use crate::renderer::instance::{InstanceBuffer, PieceInstance};
use crate::systems::history::HistoryLedger;
use crate::systems::placement::PlacementChain;
use crate::systems::projector::PointerProjector;
use crate::systems::simulation::SimulationToggle;

/// One player's sandbox: the placement chain, its history and the
/// simulation switch, driven by discrete input events and per-frame ticks.
///
/// The session owns the world service it talks to. Hosts call `on_event`
/// for every input event first, then `on_frame` once per tick, then drain
/// the events the session produced.
pub struct PlayerSession<W> {
    config: SessionConfig,
    world: W,
    pieces: PieceArena,
    chain: PlacementChain,
    ledger: HistoryLedger,
    simulation: SimulationToggle,
    projector: PointerProjector,
    camera: CameraRig,
    bindings: KeyBindings,
    held: MoveFlags,
    pointer: Vec2,
    viewport: Vec2,
    target: Vec3,
    events: Vec<SessionEvent>,
}

impl<W: WorldObjects + RayCaster> PlayerSession<W> {
    pub fn new(config: SessionConfig, world: W) -> Self {
        let config = config.validated();
        log::info!(
            "session: created (spacing {}, seed {})",
            config.placement.spacing,
            config.seed
        );
        Self {
            world,
            pieces: PieceArena::new(config.seed),
            chain: PlacementChain::new(config.placement),
            ledger: HistoryLedger::new(),
            simulation: SimulationToggle::new(),
            projector: PointerProjector::new(config.max_ray_distance),
            camera: CameraRig::new(config.camera, Vec3::ZERO),
            bindings: config.bindings.clone(),
            held: MoveFlags::NONE,
            pointer: Vec2::ZERO,
            viewport: Vec2::ZERO,
            target: Vec3::ZERO,
            events: Vec::with_capacity(32),
            config,
        }
    }

    // -- Host entry points --

    /// Handle one discrete input event. Rejected transitions are logged
    /// and otherwise ignored.
    pub fn on_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { button, x, y } => {
                self.pointer = Vec2::new(x, y);
                match button {
                    PointerButton::Primary => {
                        if let Err(e) = self.begin_gesture() {
                            log::debug!("session: begin gesture ignored: {}", e);
                        }
                    }
                    PointerButton::Secondary => self.camera.set_look_active(true),
                    PointerButton::Middle => {}
                }
            }
            InputEvent::PointerUp { button, x, y } => {
                self.pointer = Vec2::new(x, y);
                match button {
                    PointerButton::Primary => {
                        if let Err(e) = self.end_gesture() {
                            log::debug!("session: end gesture ignored: {}", e);
                        }
                    }
                    PointerButton::Secondary => self.camera.set_look_active(false),
                    PointerButton::Middle => {}
                }
            }
            InputEvent::PointerMove { x, y } => self.pointer = Vec2::new(x, y),
            InputEvent::PointerDelta { dx, dy } => self.camera.look(dx, dy),
            InputEvent::Scroll { delta } => self.camera.scroll(delta),
            InputEvent::KeyDown { key_code } => {
                if let Some(action) = self.bindings.action(key_code) {
                    self.on_action(action);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(flag) = self.bindings.action(key_code).and_then(Action::move_flag) {
                    self.held.remove(flag);
                }
            }
            InputEvent::Resize { width, height } => self.viewport = Vec2::new(width, height),
        }
    }

    fn on_action(&mut self, action: Action) {
        if let Some(flag) = action.move_flag() {
            self.held.insert(flag);
            return;
        }
        match action {
            Action::ToggleSimulation => {
                if let Err(e) = self.toggle_simulation() {
                    log::debug!("session: simulation toggle ignored: {}", e);
                }
            }
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            _ => {}
        }
    }

    /// Advance one frame.
    pub fn on_frame(&mut self, dt: f32) {
        self.camera.update_zoom(dt);
        self.camera.update_goal(dt, self.held);

        if !self.simulation.is_simulating() {
            let ray = self.camera.screen_ray(self.pointer, self.viewport);
            self.target = self.projector.project(&ray, &self.world);
        }

        self.camera.update_view();
        self.camera.apply(self.aspect());

        if self.chain.is_active() {
            if let Err(e) = self.update_placement(self.target, dt) {
                log::debug!("session: placement update ignored: {}", e);
            }
        }

        if self.simulation.is_simulating() {
            self.world.step(dt);
        }
    }

    // -- Placement --

    pub fn begin_gesture(&mut self) -> Result<(), ModeError> {
        if self.simulation.is_simulating() {
            return Err(ModeError::SimulationRunning);
        }
        self.chain.begin(self.ledger.next_index())
    }

    /// Feed the chain a new target. Rejected while the simulation runs.
    pub fn update_placement(&mut self, target: Vec3, dt: f32) -> Result<Vec<PieceId>, ModeError> {
        if self.simulation.is_simulating() {
            return Err(ModeError::SimulationRunning);
        }
        let placed = self.chain.update(target, dt, &mut self.pieces, &mut self.world)?;
        for &id in &placed {
            if let Some(piece) = self.pieces.get(id) {
                self.events
                    .push(SessionEvent::piece_placed(piece.original_pose().position));
            }
        }
        Ok(placed)
    }

    /// Close the gesture and commit its pieces. Returns the committed set's
    /// index, or `None` if the gesture placed nothing.
    ///
    /// Committing while sets are undone destroys the undone branch first.
    pub fn end_gesture(&mut self) -> Result<Option<usize>, ModeError> {
        let mut set = self.chain.end(&mut self.world)?;
        if set.is_empty() {
            log::debug!("session: discarding empty history set {}", set.index);
            return Ok(None);
        }

        if self.ledger.undo_depth() > 0 {
            let from = self.ledger.len() - self.ledger.undo_depth();
            self.restart_history(from);
            set.index = self.ledger.next_index();
        }

        let index = set.index;
        let count = set.len();
        self.ledger.commit(set);
        self.events.push(SessionEvent::new(
            event_kind::HISTORY_COMMITTED,
            index as f32,
            count as f32,
            0.0,
        ));
        Ok(Some(index))
    }

    // -- History --

    pub fn undo(&mut self) -> Option<usize> {
        let index = self.ledger.undo(&mut self.pieces, &mut self.world)?;
        self.events
            .push(SessionEvent::new(event_kind::UNDONE, index as f32, 0.0, 0.0));
        Some(index)
    }

    pub fn redo(&mut self) -> Option<usize> {
        let index = self.ledger.redo(&mut self.pieces, &mut self.world)?;
        self.events
            .push(SessionEvent::new(event_kind::REDONE, index as f32, 0.0, 0.0));
        Some(index)
    }

    /// Destroy every set from position `from` on. Returns the number of
    /// pieces destroyed.
    pub fn restart_history(&mut self, from: usize) -> usize {
        if from > self.ledger.len() {
            log::debug!("session: restart from {} ignored, {} sets", from, self.ledger.len());
            return 0;
        }
        let destroyed = self
            .ledger
            .restart_history(from, &mut self.pieces, &mut self.world);
        self.events.push(SessionEvent::new(
            event_kind::HISTORY_RESTARTED,
            from as f32,
            destroyed as f32,
            0.0,
        ));
        destroyed
    }

    // -- Simulation --

    pub fn begin_simulation(&mut self) -> Result<(), ModeError> {
        if self.chain.is_active() {
            return Err(ModeError::GestureActive);
        }
        let woken = self.simulation.begin(&self.pieces, &mut self.world)?;
        self.events.push(SessionEvent::new(
            event_kind::SIMULATION_STARTED,
            woken as f32,
            0.0,
            0.0,
        ));
        Ok(())
    }

    pub fn end_simulation(&mut self) -> Result<(), ModeError> {
        let reset = self.simulation.end(&self.pieces, &mut self.world)?;
        self.events.push(SessionEvent::new(
            event_kind::SIMULATION_ENDED,
            reset as f32,
            0.0,
            0.0,
        ));
        Ok(())
    }

    /// Flip the simulation. Returns whether it is now running.
    pub fn toggle_simulation(&mut self) -> Result<bool, ModeError> {
        if self.simulation.is_simulating() {
            self.end_simulation()?;
        } else {
            self.begin_simulation()?;
        }
        Ok(self.simulation.is_simulating())
    }

    // -- Output --

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Rebuild `buffer` from the visible pieces' current poses, then the ghost.
    pub fn write_instances(&self, buffer: &mut InstanceBuffer) {
        buffer.clear();
        for piece in self.pieces.iter().filter(|p| p.visible) {
            let pose = self
                .world
                .pose(piece.object)
                .unwrap_or_else(|| piece.original_pose());
            buffer.push(PieceInstance::piece(pose, piece.faces));
        }
        if let Some(ghost) = self.chain.ghost() {
            buffer.push(PieceInstance::ghost(ghost.pose));
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn pieces(&self) -> &PieceArena {
        &self.pieces
    }

    pub fn chain(&self) -> &PlacementChain {
        &self.chain
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn is_simulating(&self) -> bool {
        self.simulation.is_simulating()
    }

    pub fn is_placing(&self) -> bool {
        self.chain.is_active()
    }

    /// Last projected pointer target.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn held(&self) -> MoveFlags {
        self.held
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }
}
