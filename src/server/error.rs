/// Error kinds for inbound client events.
///
/// `Validation` covers malformed input (bad username, bad move coordinates,
/// unknown message type, missing required field). `GameState` covers
/// well-formed requests that are inconsistent with current session or turn
/// state. Both are caught at the event-router boundary and converted into a
/// single `error` notice to the originating client. `Internal` marks
/// programming errors (duplicate client id); it is logged and never sent.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    GameState(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn game_state(message: impl Into<String>) -> Self {
        Self::GameState(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
