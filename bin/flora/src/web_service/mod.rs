use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use transport::Command;

use crate::{Event, Result, Sessions, Storage};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Mutex<Storage>>,
    pub sessions: Arc<Sessions>,
    pub commands: UnboundedSender<Command>,
}

pub fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/ws", get(upgrade_viewer))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

async fn upgrade_viewer(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_viewer(socket, state))
}

async fn handle_viewer(socket: WebSocket, state: AppState) {
    let (id, mut queue) = state.sessions.register().await;
    info!("viewer {} connected ({} online)", id, state.sessions.count().await);

    let (mut sink, mut stream) = socket.split();

    if send_initial_state(&mut sink, &state).await.is_err() {
        state.sessions.deregister(id).await;
        return;
    }

    loop {
        tokio::select! {
            event = queue.recv() => match event {
                Some(event) => {
                    if let Err(err) = send_event(&mut sink, &event).await {
                        debug!("viewer {} send failed: {}", id, err);
                        break;
                    }
                }
                None => break,
            },
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => relay_command(&text, &state.commands),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => (),
                Some(Err(err)) => {
                    debug!("viewer {} socket error: {}", id, err);
                    break;
                }
            },
        }
    }

    state.sessions.deregister(id).await;
    info!("viewer {} disconnected", id);
}

// A fresh viewer gets the cached state before any live updates. An empty
// cache sends nothing; the viewer waits for the next update instead.
async fn send_initial_state(
    sink: &mut SplitSink<WebSocket, Message>,
    state: &AppState,
) -> Result<()> {
    let snapshot = state.storage.lock().await.snapshot();

    if let Some(moisture) = snapshot.moisture {
        send_event(sink, &Event::Update(moisture)).await?;
    }

    if let Some(status) = snapshot.board_status {
        send_event(sink, &Event::BoardStatus(status)).await?;
    }

    Ok(())
}

async fn send_event(sink: &mut SplitSink<WebSocket, Message>, event: &Event) -> Result<()> {
    let payload = serde_json::to_string(event)?;
    sink.send(Message::Text(payload.into())).await?;

    Ok(())
}

fn relay_command(text: &str, commands: &UnboundedSender<Command>) {
    match serde_json::from_str(text) {
        Ok(Event::PumpCommand(command)) => {
            if commands.send(command).is_err() {
                error!("command relay queue is closed");
            }
        }
        Ok(event) => warn!("unexpected event from viewer: {:?}", event),
        Err(err) => error!("unable to parse viewer message: {}", err),
    }
}
