//! Live-reload proxy.
//!
//! Fronts the upstream development site, injects the reload client into
//! every HTML page and pushes [`ReloadEvent`]s to connected browsers over
//! Server-Sent Events. Stylesheet rebuilds are hot-swapped, script rebuilds
//! reload the page, and compile errors show up as a toast.

pub mod browser;
pub mod config;
pub mod proxy;
pub mod server;
pub mod state;
pub mod watcher;

pub use browser::open_browser;
pub use config::ProxyConfig;
pub use server::ProxyServer;
pub use state::{ReloadState, SharedState};
pub use watcher::{FileChange, SassWatcher};

use serde::{Deserialize, Serialize};

/// Messages sent to the reload client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadEvent {
    /// Sent once to a freshly connected browser
    Connected { id: usize },

    /// Swap the named stylesheets in place
    Inject { files: Vec<String> },

    /// Full page reload
    Reload,

    /// Show a toast in the page
    Notify { title: String, message: String },
}

/// Receiver of reload events.
///
/// The proxy state is the real sink. One-shot tasks that run without a
/// proxy use [`NoReload`].
pub trait ReloadSink: Send + Sync {
    fn send(&self, event: ReloadEvent);
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReload;

impl ReloadSink for NoReload {
    fn send(&self, _event: ReloadEvent) {}
}
