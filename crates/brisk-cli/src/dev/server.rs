//! Proxy server with live reload via Server-Sent Events.
//!
//! Every request that is not one of the reload endpoints is forwarded to the
//! upstream site. HTML responses come back with upstream URLs pointed at the
//! proxy and the reload client injected.

use crate::dev::proxy::{self, CLIENT_SCRIPT_PATH, EVENTS_PATH};
use crate::dev::{ProxyConfig, SharedState};
use crate::error::{CliError, Result};
use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response, Sse, sse::Event, sse::KeepAlive},
    routing::get,
};
use reqwest::Url;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_stream::{Stream, StreamExt, wrappers::ReceiverStream};
use tower_http::cors::{Any, CorsLayer};

const RELOAD_SCRIPT: &str = include_str!("../../assets/reload-client.js");

/// Live-reload proxy server.
pub struct ProxyServer {
    config: ProxyConfig,
    state: SharedState,
}

/// Bind the proxy address.
///
/// # Errors
///
/// Returns error if the address cannot be bound.
pub async fn bind(config: &ProxyConfig) -> Result<TcpListener> {
    TcpListener::bind(config.addr)
        .await
        .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", config.addr, e)))
}

/// Per-request context shared by the handlers
struct ProxyContext {
    state: SharedState,
    upstream: Url,
    proxy_origin: String,
    client: reqwest::Client,
}

impl ProxyServer {
    pub fn new(config: ProxyConfig, state: SharedState) -> Self {
        Self { config, state }
    }

    /// Serve on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let app = self.router()?;
        axum::serve(listener, app)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))
    }

    /// Build the axum router with all routes.
    pub fn router(self) -> Result<Router> {
        // Redirects are handed to the browser, not followed here
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| CliError::Server(format!("Failed to create HTTP client: {}", e)))?;

        let context = Arc::new(ProxyContext {
            state: self.state,
            proxy_origin: self.config.server_url(),
            upstream: self.config.upstream,
            client,
        });

        Ok(Router::new()
            .route(EVENTS_PATH, get(handle_sse))
            .route(CLIENT_SCRIPT_PATH, get(handle_reload_script))
            .fallback(handle_proxy)
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(context))
    }
}

/// Handle SSE connections for reload events.
async fn handle_sse(
    State(context): State<Arc<ProxyContext>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let (id, rx) = context.state.register_client();
    tracing::info!(id, clients = context.state.client_count(), "browser connected");

    let client = ConnectedClient {
        state: Arc::clone(&context.state),
        id,
    };
    let stream = ReceiverStream::new(rx).map(move |data| {
        let _client = &client;
        Ok(Event::default().data(data))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Lives as long as the SSE response stream
struct ConnectedClient {
    state: SharedState,
    id: usize,
}

impl Drop for ConnectedClient {
    fn drop(&mut self) {
        self.state.unregister_client(self.id);
        tracing::info!(
            id = self.id,
            clients = self.state.client_count(),
            "browser disconnected"
        );
    }
}

async fn handle_reload_script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        RELOAD_SCRIPT,
    )
}

/// Forward a request to the upstream site.
async fn handle_proxy(
    State(context): State<Arc<ProxyContext>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    let target = proxy::upstream_target(&context.upstream, path_and_query);

    match forward(&context, method, &target, &headers, body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(url = %target, "upstream request failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("brisk could not reach {}: {}", context.upstream, e),
            )
                .into_response()
        }
    }
}

async fn forward(
    context: &ProxyContext,
    method: Method,
    target: &str,
    headers: &HeaderMap,
    body: Bytes,
) -> std::result::Result<Response, reqwest::Error> {
    let upstream_response = context
        .client
        .request(method, target)
        .headers(proxy::request_headers(
            headers,
            &context.upstream,
            &context.proxy_origin,
        ))
        .body(body)
        .send()
        .await?;

    let status = upstream_response.status();
    let response_headers = proxy::response_headers(
        upstream_response.headers(),
        &context.upstream,
        &context.proxy_origin,
    );
    let html = proxy::is_html(&response_headers);
    let bytes = upstream_response.bytes().await?;

    let body = if html {
        match std::str::from_utf8(&bytes) {
            Ok(text) => Body::from(proxy::rewrite_html(
                text,
                &context.upstream,
                &context.proxy_origin,
            )),
            Err(_) => Body::from(bytes),
        }
    } else {
        Body::from(bytes)
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}
