//! Serialized pipeline runs.
//!
//! Each pipeline is driven by a single task that pulls triggers from a
//! channel. Triggers that arrive while a run is in progress queue up and are
//! folded into exactly one follow-up run.

use tokio::sync::mpsc;

/// Wait for the next trigger and drain everything already queued behind it.
///
/// Returns `None` once every sender is gone.
pub async fn next_batch<T>(rx: &mut mpsc::Receiver<T>) -> Option<Vec<T>> {
    let first = rx.recv().await?;
    let mut batch = vec![first];
    while let Ok(item) = rx.try_recv() {
        batch.push(item);
    }
    Some(batch)
}
