use crate::connection::{PeerHandle, Session};
use crate::signaling::SignalingService;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use huddle_core::{DecodeError, decode_client_frame};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

/// Router serving the relay WebSocket on `/`.
pub fn router(service: SignalingService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(ws_handler))
        .layer(cors)
        .with_state(service)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let limit = service.transport_limit();

    ws.max_message_size(limit)
        .max_frame_size(limit)
        .on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let (peer, mut rx) = PeerHandle::channel();
    let connection_id = peer.id();
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let json = match frame.to_json() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize signal message: {}", e);
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let dispatcher = service.dispatcher();
    let mut session = Session::new(peer);

    tokio::select! {
        _ = receive_frames(&mut receiver, &service, &mut session) => {},
        _ = (&mut send_task) => debug!("Writer for {} stopped", connection_id),
    };

    send_task.abort();
    dispatcher.disconnect(&mut session);
    info!("WebSocket disconnected: {}", connection_id);
}

async fn receive_frames(
    receiver: &mut SplitStream<WebSocket>,
    service: &SignalingService,
    session: &mut Session,
) {
    let dispatcher = service.dispatcher();
    let max_message_size = service.max_message_size();

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                debug!("WebSocket error on {}: {}", session.id(), e);
                break;
            }
        };

        match msg {
            Message::Text(text) if text.len() > max_message_size => {
                warn!(
                    "Dropping {} byte message from {} (limit {})",
                    text.len(),
                    session.id(),
                    max_message_size
                );
            }
            Message::Text(text) => match decode_client_frame(text.as_str()) {
                Ok(frame) => {
                    dispatcher.handle(session, frame);
                }
                Err(e @ DecodeError::UnknownKind(_)) => {
                    warn!("Ignoring frame from {}: {}", session.id(), e)
                }
                Err(e) => warn!("Invalid signal message from {}: {}", session.id(), e),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }
}
