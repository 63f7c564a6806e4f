//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Recording states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
    Finalizing,
}

impl RecordingState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: RecordingState,
    pub action: String,
}

/// Recording session state entity.
///
/// State machine (one-shot per invocation, re-entrant for later recordings):
///   IDLE -> RECORDING (begin)
///   RECORDING -> FINALIZING (finish)
///   RECORDING -> IDLE (abort)
///   FINALIZING -> IDLE (complete)
#[derive(Debug, Default)]
pub struct RecordingSessionState {
    state: RecordingState,
}

impl RecordingSessionState {
    /// Create a new session state in idle
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == RecordingState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    /// Transition from IDLE to RECORDING
    pub fn begin(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecordingState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "begin recording".to_string(),
            });
        }
        self.state = RecordingState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to FINALIZING
    pub fn finish(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecordingState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "finish recording".to_string(),
            });
        }
        self.state = RecordingState::Finalizing;
        Ok(())
    }

    /// Transition from RECORDING back to IDLE without producing output
    pub fn abort(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecordingState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "abort recording".to_string(),
            });
        }
        self.state = RecordingState::Idle;
        Ok(())
    }

    /// Transition from FINALIZING to IDLE
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecordingState::Finalizing {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "complete finalization".to_string(),
            });
        }
        self.state = RecordingState::Idle;
        Ok(())
    }
}
