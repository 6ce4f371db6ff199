//! Error types shared by the controller and the HTTP host

use thiserror::Error;

use crate::state::Phase;

/// Operations that move the countdown between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Begin,
    Pause,
    Resume,
    Cancel,
    Reset,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Begin => "begin",
            Operation::Pause => "pause",
            Operation::Resume => "resume",
            Operation::Cancel => "cancel",
            Operation::Reset => "reset",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation was requested from a phase that does not permit it.
/// The controller state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {operation} while {phase}")]
    InvalidTransition { operation: Operation, phase: Phase },
}

/// Failure to read the output volume. The controller treats any of these as
/// "not at maximum yet".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VolumeReadError {
    #[error("no volume reading available")]
    Unavailable,

    #[error("volume command failed: {0}")]
    Command(String),

    #[error("could not parse volume output: {0}")]
    Parse(String),
}

/// Errors surfaced by the application host
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),

    #[error("manual volume control is disabled")]
    ManualVolumeDisabled,

    #[error("volume level {0} is outside 0.0..=1.0")]
    VolumeOutOfRange(f32),
}
