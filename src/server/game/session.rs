/// WebSocket session handler for a connected client.
///
/// This actor manages a single client's connection, parsing inbound JSON
/// frames into typed events for the game server and serializing server
/// notices back to the client. It registers the client on start and runs
/// full disconnect cleanup when the connection closes.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use super::messages::{
    ClientWsMessage, Connect, Disconnect, FindGame, PlayMove, Register, ServerWsMessage,
};
use super::server::GameServer;
use crate::server::state::AppState;

/// Represents one client's WebSocket session.
pub struct ClientSession {
    pub client_id: Uuid,
    pub server_addr: Addr<GameServer>,
}

impl ClientSession {
    fn send_message(&self, ctx: &mut ws::WebsocketContext<Self>, msg: &ServerWsMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                warn!("[Session] Failed to serialize server message: {e}");
                ctx.text(r#"{"type":"error","message":"Internal server error"}"#);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

impl Actor for ClientSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the client with the game server.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.server_addr.do_send(Connect {
            client_id: self.client_id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. Runs full disconnect cleanup.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.server_addr.do_send(Disconnect {
            client_id: self.client_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClientSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::Register { username }) => {
                        self.server_addr.do_send(Register {
                            client_id: self.client_id,
                            username,
                        });
                    }
                    Ok(ClientWsMessage::FindGame) => {
                        self.server_addr.do_send(FindGame {
                            client_id: self.client_id,
                        });
                    }
                    Ok(ClientWsMessage::Move { row, col }) => {
                        self.server_addr.do_send(PlayMove {
                            client_id: self.client_id,
                            row,
                            col,
                        });
                    }
                    Ok(ClientWsMessage::Unknown) => {
                        self.send_message(ctx, &ServerWsMessage::error("Unknown message type"));
                    }
                    Err(_e) => {
                        // Invalid client message format.
                        self.send_message(ctx, &ServerWsMessage::error("Invalid client message"));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for ClientSession {
    type Result = ();

    /// Relays a server notice to the client over the socket.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        self.send_message(ctx, &msg);
    }
}

/// WebSocket endpoint for the game.
///
/// Checks the per-source admission quota, assigns a fresh client id, and
/// starts the session actor. No core state exists for a rejected connection.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let source = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let admitted = data
        .admission
        .lock()
        .map(|mut limiter| limiter.try_admit(&source))
        .unwrap_or(false);
    if !admitted {
        return Ok(HttpResponse::TooManyRequests().body("Too many connections"));
    }

    let client_id = Uuid::new_v4();
    info!("[Session] Client connected: client_id={client_id} source={source}");

    ws::start(
        ClientSession {
            client_id,
            server_addr: data.game_addr.clone(),
        },
        &req,
        stream,
    )
}
