use std::collections::HashMap;

use actix::Recipient;
use log::debug;
use uuid::Uuid;

use super::messages::ServerWsMessage;
use crate::config::game::{USERNAME_MAX_LEN, USERNAME_MIN_LEN};
use crate::server::error::GameError;

/// A connected client. `name` stays `None` until registration succeeds.
pub struct ConnectedClient {
    pub name: Option<String>,
    addr: Recipient<ServerWsMessage>,
}

/// Connection registry: the authoritative map of live clients and their
/// outbound channels. All delivery to clients resolves through here, so a
/// departed client simply stops receiving without affecting the sender.
pub struct Registry {
    clients: HashMap<Uuid, ConnectedClient>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Add a new client with no name. A duplicate id is a programming error:
    /// the existing entry is left untouched.
    ///
    /// Broadcasts the updated client count on success.
    pub fn register(
        &mut self,
        client_id: Uuid,
        addr: Recipient<ServerWsMessage>,
    ) -> Result<(), GameError> {
        if self.clients.contains_key(&client_id) {
            return Err(GameError::internal(format!(
                "duplicate client id {client_id}"
            )));
        }
        self.clients.insert(client_id, ConnectedClient { name: None, addr });
        self.broadcast_count();
        Ok(())
    }

    /// Validate and store the client's display name.
    pub fn set_name(&mut self, client_id: Uuid, name: &str) -> Result<(), GameError> {
        validate_username(name)?;
        let client = self
            .clients
            .get_mut(&client_id)
            .ok_or_else(|| GameError::internal(format!("unknown client id {client_id}")))?;
        client.name = Some(name.to_string());
        debug!("[Registry] Client {client_id} registered as '{name}'");
        Ok(())
    }

    /// Delete the client; no-op if absent.
    ///
    /// Broadcasts the updated client count when an entry was actually removed.
    pub fn remove(&mut self, client_id: Uuid) -> bool {
        let removed = self.clients.remove(&client_id).is_some();
        if removed {
            self.broadcast_count();
        }
        removed
    }

    pub fn contains(&self, client_id: Uuid) -> bool {
        self.clients.contains_key(&client_id)
    }

    /// Best-effort delivery: silently drops if the client is gone.
    pub fn send(&self, client_id: Uuid, msg: ServerWsMessage) {
        if let Some(client) = self.clients.get(&client_id) {
            client.addr.do_send(msg);
        } else {
            debug!("[Registry] Dropped message for departed client {client_id}");
        }
    }

    pub fn count(&self) -> usize {
        self.clients.len()
    }

    /// Fire-and-forget count broadcast to every connected client.
    pub fn broadcast_count(&self) {
        let count = self.count();
        for client in self.clients.values() {
            client.addr.do_send(ServerWsMessage::user_count(count));
        }
    }

    /// Outward-facing name: the registered name, or a placeholder derived
    /// from the id for clients that get paired before registering.
    pub fn display_name(&self, client_id: Uuid) -> String {
        self.clients
            .get(&client_id)
            .and_then(|c| c.name.clone())
            .unwrap_or_else(|| format!("anon_{}", &client_id.simple().to_string()[..8]))
    }
}

/// Username rules: 3-20 characters, letters, digits, and underscore only.
pub fn validate_username(name: &str) -> Result<(), GameError> {
    if name.len() < USERNAME_MIN_LEN || name.len() > USERNAME_MAX_LEN {
        return Err(GameError::validation(
            "Username must be between 3 and 20 characters",
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GameError::validation(
            "Username can only contain letters, numbers and underscores",
        ));
    }
    Ok(())
}
