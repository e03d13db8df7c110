use log::debug;
use tokio::sync::Mutex;
use transport::{BoardStatus, Moisture, Topic};

use crate::{Event, Result, Sessions, Storage};

// A payload that fails to decode returns an error without touching the
// cache; an update equal to the cached value is not re-broadcast.
pub async fn handle_message(
    topic: Topic,
    payload: &[u8],
    storage: &Mutex<Storage>,
    sessions: &Sessions,
) -> Result<()> {
    match topic {
        Topic::Moisture => {
            let moisture: Moisture = serde_json::from_slice(payload)?;

            if storage.lock().await.apply_moisture(&moisture) {
                sessions.broadcast(Event::Update(moisture)).await;
            }
        }
        Topic::BoardStatus => {
            let status: BoardStatus = serde_json::from_slice(payload)?;

            if storage.lock().await.apply_board_status(&status) {
                sessions.broadcast(Event::BoardStatus(status)).await;
            }
        }
        Topic::Command => debug!("ignoring message on command topic"),
    }

    Ok(())
}
