//! Proxy server configuration.
//!
//! Resolves the `[server]` section into a bindable address and a parsed
//! upstream URL.

use crate::config::ServerConfig;
use crate::error::{ConfigError, Result};
use reqwest::Url;
use std::net::{IpAddr, SocketAddr};

/// How many ports after the preferred one are tried before giving up
const PORT_ATTEMPTS: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Upstream site, always with a scheme and without a trailing slash
    pub upstream: Url,

    /// Address the proxy listens on
    pub addr: SocketAddr,

    /// Browser application to open; `None` means the system default
    pub browser: Option<String>,

    /// Open a browser once the proxy is up
    pub open: bool,
}

impl ProxyConfig {
    /// Build the proxy configuration, falling back to the next free port
    /// when the preferred one is taken.
    pub fn from_server(server: &ServerConfig) -> Result<Self> {
        let upstream = normalize_upstream(&server.proxy)?;
        let ip: IpAddr = server.host.parse().map_err(|_| ConfigError::InvalidValue {
            field: "server.host".to_string(),
            value: server.host.clone(),
            hint: "Use an IP address such as 127.0.0.1 or 0.0.0.0".to_string(),
        })?;
        let addr = find_available_port(ip, server.port)?;

        let browser = Some(server.browser.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(Self {
            upstream,
            addr,
            browser,
            open: server.open,
        })
    }

    /// Origin browsers use to reach the proxy
    pub fn server_url(&self) -> String {
        let host = if self.addr.ip().is_unspecified() {
            "localhost".to_string()
        } else {
            self.addr.ip().to_string()
        };
        format!("http://{}:{}", host, self.addr.port())
    }
}

/// Parse the configured upstream. A bare host such as `mysite.dev` is
/// proxied over plain http.
pub fn normalize_upstream(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| ConfigError::InvalidValue {
        field: "server.proxy".to_string(),
        value: raw.to_string(),
        hint: format!("Not a valid URL ({}); use a host like 'mysite.dev'", e),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            field: "server.proxy".to_string(),
            value: raw.to_string(),
            hint: "Only http:// and https:// sites can be proxied".to_string(),
        }
        .into());
    }

    Ok(url)
}

/// Try the requested port first, then the next [`PORT_ATTEMPTS`] ports.
fn find_available_port(ip: IpAddr, requested_port: u16) -> Result<SocketAddr> {
    use std::net::TcpListener;

    if requested_port < 1024 {
        crate::ui::warning(&format!(
            "Port {} is in privileged range, may require root access",
            requested_port
        ));
    }

    for offset in 0..=PORT_ATTEMPTS {
        let Some(port) = requested_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(ip, port);
        if TcpListener::bind(addr).is_ok() {
            if offset > 0 {
                crate::ui::warning(&format!(
                    "Port {} is busy, using port {} instead",
                    requested_port, port
                ));
            }
            return Ok(addr);
        }
    }

    Err(ConfigError::InvalidValue {
        field: "server.port".to_string(),
        value: requested_port.to_string(),
        hint: format!(
            "Ports {}-{} are all in use. Try a different port with --port.",
            requested_port,
            requested_port.saturating_add(PORT_ATTEMPTS)
        ),
    }
    .into())
}
