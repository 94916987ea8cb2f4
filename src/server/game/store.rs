use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::config::game::GRID_SIZE;
use crate::server::error::GameError;

/// Per-session marker assigned to a participant for the session's duration.
/// `players[0]` is always `X` and moves first.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    X,
    O,
}

pub type Board = [[Option<Symbol>; GRID_SIZE]; GRID_SIZE];

/// A two-participant match: the board, the fixed symbol assignment, and
/// whose turn it is. Holds client ids only; delivery resolves through the
/// registry at send time.
pub struct GameSession {
    pub id: Uuid,
    pub players: [Uuid; 2],
    pub current_turn: Uuid,
    pub board: Board,
}

impl GameSession {
    fn symbol_of(&self, client_id: Uuid) -> Symbol {
        if self.players[0] == client_id {
            Symbol::X
        } else {
            Symbol::O
        }
    }

    fn opponent_of(&self, client_id: Uuid) -> Uuid {
        if self.players[0] == client_id {
            self.players[1]
        } else {
            self.players[0]
        }
    }
}

/// Data needed to broadcast an accepted move to both participants.
#[derive(Debug)]
pub struct AppliedMove {
    pub players: [Uuid; 2],
    pub row: usize,
    pub col: usize,
    pub symbol: Symbol,
    pub next_turn: Uuid,
}

/// Owns all active sessions. A client belongs to at most one session,
/// enforced by construction: matchmaking never pairs a client that is
/// already playing.
pub struct SessionStore {
    sessions: HashMap<Uuid, GameSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Allocate a session for two distinct clients. `first` gets symbol X
    /// and the opening turn.
    pub fn create_session(&mut self, first: Uuid, second: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            GameSession {
                id,
                players: [first, second],
                current_turn: first,
                board: [[None; GRID_SIZE]; GRID_SIZE],
            },
        );
        id
    }

    /// The at-most-one active session containing the client.
    pub fn session_for_client(&self, client_id: Uuid) -> Option<&GameSession> {
        self.sessions
            .values()
            .find(|s| s.players.contains(&client_id))
    }

    /// Apply a move at already-validated coordinates.
    ///
    /// No session or a move out of turn is a `GameState` error, which the
    /// router downgrades to a silent no-op. A filled target cell is a
    /// `Validation` error; either way the session is left untouched and an
    /// occupied cell is never overwritten. On success the cell takes the
    /// mover's symbol and the turn flips to the opponent.
    pub fn apply_move(
        &mut self,
        client_id: Uuid,
        row: usize,
        col: usize,
    ) -> Result<AppliedMove, GameError> {
        let session = self
            .sessions
            .values_mut()
            .find(|s| s.players.contains(&client_id))
            .ok_or_else(|| GameError::game_state("No active game"))?;
        if session.current_turn != client_id {
            return Err(GameError::game_state("Not your turn"));
        }
        if session.board[row][col].is_some() {
            return Err(GameError::validation("Cell is already occupied"));
        }
        let symbol = session.symbol_of(client_id);
        session.board[row][col] = Some(symbol);
        session.current_turn = session.opponent_of(client_id);
        Ok(AppliedMove {
            players: session.players,
            row,
            col,
            symbol,
            next_turn: session.current_turn,
        })
    }

    /// Remove the session containing the client, if any. Called on
    /// disconnect; no further moves are ever accepted for the session.
    pub fn end_session_for(&mut self, client_id: Uuid) -> Option<GameSession> {
        let id = self
            .sessions
            .values()
            .find(|s| s.players.contains(&client_id))
            .map(|s| s.id)?;
        self.sessions.remove(&id)
    }
}
