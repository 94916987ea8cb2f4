//! HTTP and WebSocket routing configuration.
//!
//! Defines the single game endpoint. The connection is handled by a
//! dedicated WebSocket actor that manages the client's lifecycle.

use actix_web::web;

use crate::server::game::session::ws_connect;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").to(ws_connect));
}
