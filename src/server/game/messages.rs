use actix::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::store::Symbol;

/// Message client -> server, tagged by `type`.
///
/// `move` coordinates stay raw JSON values so the move validator owns the
/// numeric-type check instead of the deserializer rejecting the whole frame.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientWsMessage {
    Register {
        #[serde(default)]
        username: String,
    },
    FindGame,
    Move {
        #[serde(default)]
        row: Value,
        #[serde(default)]
        col: Value,
    },
    #[serde(other)]
    Unknown,
}

/// Message server -> client, tagged by `type`.
#[derive(Message, Serialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerWsMessage {
    Connected {
        user_id: Uuid,
    },
    UserCount {
        count: usize,
    },
    Searching {
        message: String,
    },
    GameStart {
        game_id: Uuid,
        opponent: String,
        symbol: Symbol,
    },
    Move {
        row: usize,
        col: usize,
        symbol: Symbol,
        next_turn: bool,
    },
    SearchTimeout {
        message: String,
    },
    Error {
        message: String,
    },
}

impl ServerWsMessage {
    pub fn connected(user_id: Uuid) -> Self {
        Self::Connected { user_id }
    }
    pub fn user_count(count: usize) -> Self {
        Self::UserCount { count }
    }
    pub fn searching() -> Self {
        Self::Searching {
            message: "Finding opponent...".to_string(),
        }
    }
    pub fn game_start(game_id: Uuid, opponent: String, symbol: Symbol) -> Self {
        Self::GameStart {
            game_id,
            opponent,
            symbol,
        }
    }
    pub fn search_timeout() -> Self {
        Self::SearchTimeout {
            message: "No opponents available at the moment. Please try again later.".to_string(),
        }
    }
    pub fn error(message: &str) -> Self {
        Self::Error {
            message: message.to_string(),
        }
    }
}

/// Message: a new connection registered with the server.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub client_id: Uuid,
    pub addr: Recipient<ServerWsMessage>,
}

/// Message: a connection closed; run full cleanup.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub client_id: Uuid,
}

/// Message: client sets its display name.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Register {
    pub client_id: Uuid,
    pub username: String,
}

/// Message: client requests an opponent.
#[derive(Message)]
#[rtype(result = "()")]
pub struct FindGame {
    pub client_id: Uuid,
}

/// Message: client submits a move.
#[derive(Message)]
#[rtype(result = "()")]
pub struct PlayMove {
    pub client_id: Uuid,
    pub row: Value,
    pub col: Value,
}
