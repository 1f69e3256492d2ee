use std::fmt;

/// A mode transition the session refused.
///
/// None of these are fatal: the input handler logs them at debug level and
/// carries on with the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeError {
    /// Placement was attempted while the simulation is running.
    SimulationRunning,
    /// A gesture is already in progress.
    GestureActive,
    /// There is no gesture to end or update.
    NoActiveGesture,
    /// The simulation is already running.
    AlreadySimulating,
    /// The simulation is not running.
    NotSimulating,
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ModeError::SimulationRunning => "placement is disabled while simulating",
            ModeError::GestureActive => "a placement gesture is already active",
            ModeError::NoActiveGesture => "no placement gesture is active",
            ModeError::AlreadySimulating => "simulation is already running",
            ModeError::NotSimulating => "simulation is not running",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ModeError {}
