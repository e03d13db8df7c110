use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::Mutex;

use crate::Event;

// Per-viewer queue depth. A viewer that stops reading loses updates
// instead of stalling the fan-out; it catches up with the next one.
const QUEUE_CAPACITY: usize = 8;

#[derive(Default)]
pub struct Sessions {
    next_id: AtomicU64,
    senders: Mutex<HashMap<u64, Sender<Event>>>,
}

impl Sessions {
    pub fn new() -> Sessions {
        Sessions::default()
    }

    pub async fn register(&self) -> (u64, Receiver<Event>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);

        self.senders.lock().await.insert(id, tx);

        (id, rx)
    }

    pub async fn deregister(&self, id: u64) {
        self.senders.lock().await.remove(&id);
    }

    pub async fn count(&self) -> usize {
        self.senders.lock().await.len()
    }

    pub async fn broadcast(&self, event: Event) {
        let senders: Vec<(u64, Sender<Event>)> = self
            .senders
            .lock()
            .await
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut closed = Vec::new();

        for (id, tx) in senders {
            match tx.try_send(event.clone()) {
                Ok(()) => (),
                Err(TrySendError::Full(_)) => debug!("viewer {} is behind, dropping update", id),
                Err(TrySendError::Closed(_)) => closed.push(id),
            }
        }

        if !closed.is_empty() {
            let mut senders = self.senders.lock().await;

            for id in closed {
                senders.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use transport::{Moisture, Zone};

    fn update(reading: f64) -> Event {
        Event::Update(Moisture {
            zones: HashMap::from([(Zone::Zone1, reading)]),
        })
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_session() {
        let sessions = Sessions::new();

        let mut receivers = Vec::new();
        for _ in 0..10 {
            receivers.push(sessions.register().await.1);
        }

        sessions.broadcast(update(42.0)).await;

        for rx in receivers.iter_mut() {
            assert_eq!(rx.recv().await, Some(update(42.0)));
        }
    }

    #[tokio::test]
    async fn test_stalled_session_does_not_block_the_rest() {
        let sessions = Sessions::new();

        // never read from this one
        let (_stalled_id, _stalled_rx) = sessions.register().await;

        let mut receivers = Vec::new();
        for _ in 0..99 {
            receivers.push(sessions.register().await.1);
        }

        // more updates than the stalled viewer's queue can hold
        for index in 0..QUEUE_CAPACITY + 2 {
            sessions.broadcast(update(index as f64)).await;

            for rx in receivers.iter_mut() {
                assert_eq!(rx.recv().await, Some(update(index as f64)));
            }
        }

        // the stalled viewer is still registered, it just lost updates
        assert_eq!(sessions.count().await, 100);
    }

    #[tokio::test]
    async fn test_closed_session_is_removed() {
        let sessions = Sessions::new();

        let (_gone_id, gone_rx) = sessions.register().await;
        let (_id, mut rx) = sessions.register().await;
        drop(gone_rx);

        sessions.broadcast(update(42.0)).await;

        assert_eq!(rx.recv().await, Some(update(42.0)));
        assert_eq!(sessions.count().await, 1);
    }

    #[tokio::test]
    async fn test_deregister() {
        let sessions = Sessions::new();

        let (id, _rx) = sessions.register().await;
        assert_eq!(sessions.count().await, 1);

        sessions.deregister(id).await;
        assert_eq!(sessions.count().await, 0);
    }
}
