//! Connected browsers and event fan-out.

use crate::dev::{ReloadEvent, ReloadSink};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Per-client queue depth; a browser that falls this far behind misses events
const CLIENT_BUFFER: usize = 32;

type ClientRegistry = RwLock<HashMap<usize, mpsc::Sender<String>>>;

/// Shared reload state: every browser currently listening for events.
#[derive(Default)]
pub struct ReloadState {
    clients: ClientRegistry,
    next_client_id: RwLock<usize>,
}

impl ReloadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new SSE client.
    ///
    /// The client's first queued message is its [`ReloadEvent::Connected`]
    /// greeting.
    pub fn register_client(&self) -> (usize, mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_client_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = mpsc::channel(CLIENT_BUFFER);
        if let Some(greeting) = encode(&ReloadEvent::Connected { id }) {
            let _ = tx.try_send(greeting);
        }
        self.clients.write().insert(id, tx);

        tracing::debug!(id, "reload client connected");
        (id, rx)
    }

    pub fn unregister_client(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    /// Send an event to every connected client.
    ///
    /// Clients whose stream has gone away are dropped from the registry.
    pub fn broadcast(&self, event: &ReloadEvent) {
        let Some(json) = encode(event) else {
            return;
        };

        let mut closed = Vec::new();
        for (id, tx) in self.clients.read().iter() {
            match tx.try_send(json.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(id, "reload client is not keeping up, event dropped");
                }
                Err(TrySendError::Closed(_)) => closed.push(*id),
            }
        }

        if !closed.is_empty() {
            let mut clients = self.clients.write();
            for id in closed {
                clients.remove(&id);
                tracing::debug!(id, "reload client disconnected");
            }
        }
    }

    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}

impl ReloadSink for ReloadState {
    fn send(&self, event: ReloadEvent) {
        tracing::debug!(?event, clients = self.client_count(), "broadcasting reload event");
        self.broadcast(&event);
    }
}

fn encode(event: &ReloadEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to encode reload event: {}", e);
            None
        }
    }
}

/// Shared state handle passed to the server and the pipelines
pub type SharedState = Arc<ReloadState>;
