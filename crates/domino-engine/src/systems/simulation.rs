use crate::api::error::ModeError;
use crate::api::world::WorldObjects;
use crate::core::arena::PieceArena;

/// Switch between editing and running physics on the placed pieces.
#[derive(Debug, Default)]
pub struct SimulationToggle {
    simulating: bool,
}

impl SimulationToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    /// Wake every visible piece. Undone pieces stay asleep.
    pub fn begin<W: WorldObjects + ?Sized>(&mut self, pieces: &PieceArena, world: &mut W) -> Result<usize, ModeError> {
        if self.simulating {
            return Err(ModeError::AlreadySimulating);
        }
        let mut woken = 0;
        for piece in pieces.iter().filter(|p| p.visible) {
            world.set_physics_awake(piece.object, true);
            woken += 1;
        }
        self.simulating = true;
        log::info!("simulation: started with {} pieces", woken);
        Ok(woken)
    }

    /// Put every live piece back at its original pose and to sleep.
    pub fn end<W: WorldObjects + ?Sized>(&mut self, pieces: &PieceArena, world: &mut W) -> Result<usize, ModeError> {
        if !self.simulating {
            return Err(ModeError::NotSimulating);
        }
        let mut reset = 0;
        for piece in pieces.iter() {
            world.set_pose(piece.object, piece.original_pose());
            world.set_physics_awake(piece.object, false);
            reset += 1;
        }
        self.simulating = false;
        log::info!("simulation: ended, {} pieces reset", reset);
        Ok(reset)
    }
}
