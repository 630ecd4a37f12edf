/**
 * Push Channel WebSocket Handler
 *
 * This module implements the `GET /ws` endpoint. Each connection is
 * authenticated (token query parameter, or the session cookie), registered
 * in the presence map, and then driven by a single task that multiplexes:
 *
 * - outbound push events from the presence registry to the socket
 * - inbound client events (the open-conversation read acknowledgment)
 *
 * On connect and disconnect the full online-user list is broadcast to
 * every connection. There is no heartbeat or acknowledgment scheme beyond
 * the transport's own; events lost while a user is disconnected are
 * recovered by the next conversation fetch, not redelivered.
 */

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header::COOKIE, HeaderMap},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::auth::sessions::{token_from_cookie_header, user_id_from_token};
use crate::backend::error::ApiError;
use crate::backend::messaging::status;
use crate::backend::server::state::AppState;
use crate::shared::ClientEvent;

/// Query parameters for the push channel connection
#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// Session token; clients that cannot send the cookie pass it here
    pub token: Option<String>,
}

/// Handle a push channel connection request (GET /ws)
///
/// Rejects the upgrade with 401 unless a valid session token is presented.
pub async fn ws_handler(
    State(app): State<AppState>,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let token = params.token.clone().or_else(|| {
        headers
            .get(COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(token_from_cookie_header)
            .map(|t| t.to_string())
    });

    let user_id = token
        .as_deref()
        .and_then(user_id_from_token)
        .ok_or_else(|| {
            tracing::warn!("Push channel connection rejected: missing or invalid token");
            ApiError::Unauthorized
        })?;

    Ok(ws.on_upgrade(move |socket| handle_socket(app, user_id, socket)))
}

async fn handle_socket(app: AppState, user_id: Uuid, socket: WebSocket) {
    let mut events = app.presence.register(user_id).await;
    app.presence.broadcast_online_users().await;
    tracing::info!("User {} connected to push channel", user_id);

    let (mut sink, mut stream) = socket.split();

    // True when a newer connection for the same user took over the
    // presence entry; in that case the entry is no longer ours to remove.
    let mut replaced = false;

    loop {
        tokio::select! {
            outbound = events.recv() => {
                match outbound {
                    Some(event) => {
                        let text = match serde_json::to_string(&event) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!("Failed to serialize push event: {:?}", e);
                                continue;
                            }
                        };
                        if sink.send(WsMessage::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    None => {
                        replaced = true;
                        break;
                    }
                }
            }

            inbound = stream.next() => {
                match inbound {
                    Some(Ok(WsMessage::Text(text))) => {
                        handle_client_event(&app, user_id, text.as_str()).await;
                    }
                    Some(Ok(WsMessage::Close(_))) | None => break,
                    Some(Ok(_)) => {
                        // Ping/pong is answered by the framework
                    }
                    Some(Err(e)) => {
                        tracing::debug!("Push channel read error for {}: {:?}", user_id, e);
                        break;
                    }
                }
            }
        }
    }

    if !replaced {
        app.presence.unregister(user_id).await;
        app.presence.broadcast_online_users().await;
    }
    tracing::info!("User {} disconnected from push channel", user_id);
}

/// Dispatch an inbound client event.
///
/// The read acknowledgment goes through the same authoritative bulk
/// transition as the conversation fetch; the client learns the outcome
/// from the pushed status update, never by flipping state locally.
async fn handle_client_event(app: &AppState, user_id: Uuid, raw: &str) {
    let event = match serde_json::from_str::<ClientEvent>(raw) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed client event from {}: {:?}", user_id, e);
            return;
        }
    };

    match event {
        ClientEvent::MessageRead { sender_id } => {
            let Some(pool) = app.db_pool.as_ref() else {
                tracing::warn!("Dropping read acknowledgment: database not configured");
                return;
            };

            if let Err(e) =
                status::mark_conversation_read(pool, &app.presence, user_id, sender_id).await
            {
                // No retry: the transition is re-attempted by the next fetch.
                tracing::error!("Failed to apply read acknowledgment: {:?}", e);
            }
        }
    }
}
