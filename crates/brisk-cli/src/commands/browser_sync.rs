//! `brisk browser-sync`

use crate::cli::{Cli, ServeArgs};
use crate::commands::Project;
use crate::dev::{self, ProxyConfig, ProxyServer, ReloadState, SharedState};
use crate::error::{CliError, Result};
use crate::ui;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A proxy server running in the background
pub(crate) struct RunningProxy {
    pub state: SharedState,
    pub task: JoinHandle<Result<()>>,
}

/// Bind the proxy, serve it in a background task and open the browser.
pub(crate) async fn start_proxy(project: &Project) -> Result<RunningProxy> {
    let config = ProxyConfig::from_server(&project.config.server)?;
    let listener = dev::server::bind(&config).await?;

    let url = config.server_url();
    ui::success(&format!("Proxying {} at {}", config.upstream, url));

    let state: SharedState = Arc::new(ReloadState::new());
    let open = config.open;
    let browser = config.browser.clone();

    let server = ProxyServer::new(config, Arc::clone(&state));
    let task = tokio::spawn(server.serve(listener));

    if open {
        dev::open_browser(&url, browser.as_deref());
    }

    Ok(RunningProxy { state, task })
}

/// Wait for Ctrl+C. A server that stops on its own ends the task with its error.
pub(crate) async fn wait_for_shutdown(proxy: &mut RunningProxy) -> Result<()> {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            ui::info("Shutting down...");
            Ok(())
        }
        result = &mut proxy.task => match result {
            Ok(Ok(())) => Err(CliError::Server("Proxy stopped unexpectedly".to_string())),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(CliError::Server(format!("Proxy task failed: {}", e))),
        },
    }
}

/// Start the live-reload proxy and run until Ctrl+C.
pub async fn execute(args: &Cli, serve: &ServeArgs) -> Result<()> {
    let project = Project::load(args, Some(serve))?;
    let mut proxy = start_proxy(&project).await?;

    ui::info("Press Ctrl+C to stop");
    let result = wait_for_shutdown(&mut proxy).await;
    proxy.task.abort();
    result
}
