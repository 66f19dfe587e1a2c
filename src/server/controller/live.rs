//! Live dashboard WebSocket.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tower_sessions::Session;

use crate::{
    model::api::LiveEventDto,
    server::{
        error::AppError, middleware::auth::AuthGuard, service::live::LiveHub,
        state::AppState,
    },
};

const STATS_PUSH_INTERVAL: Duration = Duration::from_secs(5);

/// GET /api/live - upgrades to a WebSocket for a logged-in user.
///
/// The socket receives a stats frame right away and every five seconds, plus every
/// event published on the live hub.
pub async fn live_socket(
    State(state): State<AppState>,
    session: Session,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let user = AuthGuard::new(&state.permissions, &session)
        .require(&[])
        .await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state.live, user.user_id, socket)))
}

async fn handle_socket(live: LiveHub, user_id: u64, socket: WebSocket) {
    let (ws_tx, mut ws_rx) = socket.split();

    tracing::debug!("Live socket opened for {}", user_id);

    let outbound_task = tokio::spawn(push_events(live, ws_tx));

    // Inbound frames carry nothing; read until the client goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Live socket of {} failed: {}", user_id, e);
                break;
            }
        }
    }

    outbound_task.abort();

    tracing::debug!("Live socket closed for {}", user_id);
}

async fn push_events(live: LiveHub, mut ws_tx: SplitSink<WebSocket, Message>) {
    let mut events = live.subscribe();
    let mut ticker = tokio::time::interval(STATS_PUSH_INTERVAL);

    loop {
        let event = tokio::select! {
            _ = ticker.tick() => match live.snapshot().await {
                Ok(stats) => LiveEventDto::Stats(stats),
                Err(e) => {
                    tracing::error!("Failed to build live stats: {}", e);
                    continue;
                }
            },
            received = events.recv() => match received {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Live socket skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
        };

        let text = match serde_json::to_string(&event) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to encode live event: {}", e);
                continue;
            }
        };

        if ws_tx.send(Message::Text(text.into())).await.is_err() {
            break;
        }
    }
}
