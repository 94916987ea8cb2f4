// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the game server actor address and the connection admission limiter.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use std::sync::Mutex;

use actix::Addr;

use crate::server::admission::ConnectionLimiter;
use crate::server::game::GameServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the game server actor (registry, matchmaking, sessions).
    pub game_addr: Addr<GameServer>,
    /// Per-source admission quota, checked during the handshake. This is the
    /// one piece of state touched outside the actor context, hence the mutex.
    pub admission: Mutex<ConnectionLimiter>,
}

impl AppState {
    /// Create a new AppState for the given game server actor.
    pub fn new(game_addr: Addr<GameServer>) -> Self {
        AppState {
            game_addr,
            admission: Mutex::new(ConnectionLimiter::new()),
        }
    }
}
