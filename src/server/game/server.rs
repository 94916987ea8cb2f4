/// Game server actor.
///
/// Owns the connection registry, the matchmaking queue, and the session
/// store, and processes every inbound client event and timer firing on its
/// single actor context. That context is the one place core state mutates,
/// so registry, queue, and store need no further synchronization. Timers
/// re-check authoritative state when they fire instead of being cancelled.
use std::time::Duration;

use actix::prelude::*;
use log::{debug, info, warn};
use uuid::Uuid;

use super::matchmaking::WaitingQueue;
use super::messages::{
    Connect, Disconnect, FindGame, PlayMove, Register, ServerWsMessage,
};
use super::registry::Registry;
use super::store::{SessionStore, Symbol};
use super::validator::validate_coords;
use crate::config::matchmaking::{AUTO_FIND_DELAY_SECS, SEARCH_TIMEOUT_SECS};
use crate::server::error::GameError;

/// Main game server actor.
pub struct GameServer {
    /// Live clients and their outbound channels.
    registry: Registry,
    /// Clients currently seeking an opponent, earliest first.
    queue: WaitingQueue,
    /// All active two-player sessions.
    store: SessionStore,
    search_timeout: Duration,
    auto_find_delay: Duration,
}

impl GameServer {
    /// Create a game server with the configured delays.
    pub fn new() -> Self {
        Self::with_delays(
            Duration::from_secs(SEARCH_TIMEOUT_SECS),
            Duration::from_secs(AUTO_FIND_DELAY_SECS),
        )
    }

    /// Create a game server with explicit delays. Tests use short ones.
    pub fn with_delays(search_timeout: Duration, auto_find_delay: Duration) -> Self {
        Self {
            registry: Registry::new(),
            queue: WaitingQueue::new(),
            store: SessionStore::new(),
            search_timeout,
            auto_find_delay,
        }
    }

    /// Convert a handler error into an `error` notice to the originating
    /// client. Validation and game-state failures never affect anyone else;
    /// internal errors are log-only.
    fn report_error(&self, client_id: Uuid, err: &GameError) {
        match err {
            GameError::Validation(message) => {
                warn!("[GameServer] Validation error for client {client_id}: {message}");
                self.registry.send(client_id, ServerWsMessage::error(message));
            }
            GameError::GameState(message) => {
                debug!("[GameServer] Game-state error for client {client_id}: {message}");
                self.registry.send(client_id, ServerWsMessage::error(message));
            }
            GameError::Internal(message) => {
                log::error!("[GameServer] Internal error for client {client_id}: {message}");
            }
        }
    }

    fn log_waiting(&self) {
        let waiting: Vec<String> = self
            .queue
            .snapshot()
            .iter()
            .map(|id| format!("{} ({})", id, self.registry.display_name(*id)))
            .collect();
        debug!("[GameServer] Waiting players: {waiting:?}");
    }

    /// Look for an opponent for `client_id`, pairing FIFO with the earliest
    /// waiter, or enqueue the caller and arm the search timeout.
    fn find_game(&mut self, client_id: Uuid, ctx: &mut Context<Self>) {
        if !self.registry.contains(client_id) {
            return;
        }
        if self.store.session_for_client(client_id).is_some() {
            debug!("[GameServer] Client {client_id} asked for a game while already playing");
            return;
        }

        self.registry.send(client_id, ServerWsMessage::searching());

        if self.queue.contains(client_id) {
            // Already searching; the original timeout is still armed.
            return;
        }

        if let Some(opponent_id) = self.queue.pop_earliest() {
            self.log_waiting();
            if !self.registry.contains(opponent_id) {
                // The selected waiter vanished before pairing. The entry is
                // consumed and the caller must re-issue findGame.
                warn!(
                    "[GameServer] Waiting opponent {opponent_id} already disconnected, \
                     dropping pairing attempt for {client_id}"
                );
                return;
            }

            // The earliest waiter opens the game as X; the caller answers as O.
            let game_id = self.store.create_session(opponent_id, client_id);
            let caller_name = self.registry.display_name(client_id);
            let opponent_name = self.registry.display_name(opponent_id);
            self.registry.send(
                opponent_id,
                ServerWsMessage::game_start(game_id, caller_name, Symbol::X),
            );
            self.registry.send(
                client_id,
                ServerWsMessage::game_start(game_id, opponent_name, Symbol::O),
            );
            info!(
                "[GameServer] Game created: game_id={game_id} x={opponent_id} o={client_id}"
            );
        } else {
            self.queue.enqueue(client_id);
            info!("[GameServer] Client {client_id} added to waiting list");
            self.log_waiting();

            ctx.run_later(self.search_timeout, move |act, _ctx| {
                // Only act if the client is still waiting; a match or a
                // disconnect in the interim makes this a no-op.
                if act.queue.remove(client_id) {
                    act.registry
                        .send(client_id, ServerWsMessage::search_timeout());
                    info!("[GameServer] Client {client_id} removed from waiting list (timeout)");
                    act.log_waiting();
                }
            });
        }
    }
}

impl Actor for GameServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for GameServer {
    type Result = ();

    /// Handles a new connection: greet, register, and arm auto-matchmaking.
    fn handle(&mut self, msg: Connect, ctx: &mut Self::Context) -> Self::Result {
        let client_id = msg.client_id;
        msg.addr.do_send(ServerWsMessage::connected(client_id));
        if let Err(err) = self.registry.register(client_id, msg.addr) {
            self.report_error(client_id, &err);
            return;
        }
        info!(
            "[GameServer] Client {client_id} connected ({} online)",
            self.registry.count()
        );

        // Start searching automatically, registered or not. The delay gives
        // the client a moment to send its registration first.
        ctx.run_later(self.auto_find_delay, move |act, ctx| {
            if act.registry.contains(client_id) {
                act.find_game(client_id, ctx);
            }
        });
    }
}

impl Handler<Disconnect> for GameServer {
    type Result = ();

    /// Handles a closed connection: remove the client from registry, queue,
    /// and session store in one turn so nothing can resurrect it.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        let client_id = msg.client_id;
        if !self.registry.remove(client_id) {
            return;
        }
        if self.queue.remove(client_id) {
            self.log_waiting();
        }
        if let Some(session) = self.store.end_session_for(client_id) {
            info!(
                "[GameServer] Session {} ended by disconnect of {client_id}",
                session.id
            );
        }
        info!(
            "[GameServer] Client {client_id} disconnected ({} online)",
            self.registry.count()
        );
    }
}

impl Handler<Register> for GameServer {
    type Result = ();

    /// Handles a registration request: presence check first, then the
    /// registry's full username validation.
    fn handle(&mut self, msg: Register, _ctx: &mut Self::Context) -> Self::Result {
        if msg.username.is_empty() {
            self.report_error(msg.client_id, &GameError::validation("Username is required"));
            return;
        }
        if let Err(err) = self.registry.set_name(msg.client_id, &msg.username) {
            self.report_error(msg.client_id, &err);
        }
    }
}

impl Handler<FindGame> for GameServer {
    type Result = ();

    fn handle(&mut self, msg: FindGame, ctx: &mut Self::Context) -> Self::Result {
        self.find_game(msg.client_id, ctx);
    }
}

impl Handler<PlayMove> for GameServer {
    type Result = ();

    /// Handles a move: validate coordinates, apply against the session, and
    /// broadcast the accepted move to both participants.
    fn handle(&mut self, msg: PlayMove, _ctx: &mut Self::Context) -> Self::Result {
        let client_id = msg.client_id;
        let (row, col) = match validate_coords(&msg.row, &msg.col) {
            Ok(coords) => coords,
            Err(err) => {
                self.report_error(client_id, &err);
                return;
            }
        };
        match self.store.apply_move(client_id, row, col) {
            Ok(applied) => {
                for player_id in applied.players {
                    self.registry.send(
                        player_id,
                        ServerWsMessage::Move {
                            row: applied.row,
                            col: applied.col,
                            symbol: applied.symbol,
                            next_turn: applied.next_turn == player_id,
                        },
                    );
                }
            }
            Err(GameError::GameState(reason)) => {
                // A stale or out-of-turn move is an expected race, not a
                // client-visible error.
                debug!("[GameServer] Ignored move from {client_id}: {reason}");
            }
            Err(err) => self.report_error(client_id, &err),
        }
    }
}
