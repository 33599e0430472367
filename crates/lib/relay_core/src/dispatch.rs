//! Per-message relay dispatch state.
//!
//! Each message gets its own machine. There is no retry and no queue: a
//! machine goes out once and comes back once.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    AwaitingWebhook,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchState::Idle => write!(f, "idle"),
            DispatchState::AwaitingWebhook => write!(f, "awaiting_webhook"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchEvent {
    Send,
    /// Any HTTP status, success or not.
    Response,
    TransportError,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid dispatch transition: {event:?} while {state}")]
pub struct TransitionError {
    pub state: DispatchState,
    pub event: DispatchEvent,
}

impl DispatchState {
    pub fn next(self, event: DispatchEvent) -> Result<DispatchState, TransitionError> {
        match (self, event) {
            (DispatchState::Idle, DispatchEvent::Send) => Ok(DispatchState::AwaitingWebhook),
            (
                DispatchState::AwaitingWebhook,
                DispatchEvent::Response | DispatchEvent::TransportError,
            ) => Ok(DispatchState::Idle),
            (state, event) => Err(TransitionError { state, event }),
        }
    }
}

/// A single message's trip to the webhook and back.
#[derive(Debug, Default)]
pub struct Dispatch {
    state: DispatchState,
}

impl Dispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn apply(&mut self, event: DispatchEvent) -> Result<DispatchState, TransitionError> {
        self.state = self.state.next(event)?;
        Ok(self.state)
    }
}
