//! Request and response rewriting for the upstream proxy.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use reqwest::Url;

/// Path of the reload client script served by the proxy
pub const CLIENT_SCRIPT_PATH: &str = "/__brisk__/client.js";

/// Path of the Server-Sent Events stream
pub const EVENTS_PATH: &str = "/__brisk__/events";

static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    HeaderName::from_static("keep-alive"),
];

/// Origin of the upstream site as written in its pages (`http://host[:port]`)
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Host and port as they appear after `//`
fn authority_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

/// Absolute upstream URL for a proxied path
pub fn upstream_target(upstream: &Url, path_and_query: &str) -> String {
    format!("{}{}", upstream.as_str().trim_end_matches('/'), path_and_query)
}

/// Headers forwarded to the upstream.
///
/// Hop-by-hop headers are stripped, the upstream receives its own host, and
/// compressed responses are refused so HTML can be rewritten.
pub fn request_headers(incoming: &HeaderMap, upstream: &Url, proxy_origin: &str) -> HeaderMap {
    let mut headers = strip_hop_by_hop(incoming);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::ACCEPT_ENCODING);

    let upstream_origin = origin_of(upstream);
    for name in [header::ORIGIN, header::REFERER] {
        if let Some(value) = headers.get(&name).and_then(|v| v.to_str().ok()) {
            let rewritten = value.replacen(proxy_origin, &upstream_origin, 1);
            if let Ok(value) = HeaderValue::from_str(&rewritten) {
                headers.insert(name, value);
            }
        }
    }

    headers
}

/// Headers returned to the browser.
///
/// Redirects to the upstream are pointed back at the proxy.
pub fn response_headers(upstream_headers: &HeaderMap, upstream: &Url, proxy_origin: &str) -> HeaderMap {
    let mut headers = strip_hop_by_hop(upstream_headers);
    headers.remove(header::CONTENT_LENGTH);

    if let Some(location) = headers.get(header::LOCATION).and_then(|v| v.to_str().ok()) {
        let rewritten = rewrite_origins(location, upstream, proxy_origin);
        if let Ok(value) = HeaderValue::from_str(&rewritten) {
            headers.insert(header::LOCATION, value);
        }
    }

    headers
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers
}

pub fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("text/html"))
}

/// Replace absolute upstream URLs with proxy URLs.
///
/// Both schemes are rewritten, as are protocol-relative and JSON-escaped
/// (`http:\/\/host`) forms.
pub fn rewrite_origins(text: &str, upstream: &Url, proxy_origin: &str) -> String {
    let authority = authority_of(upstream);
    if authority.is_empty() {
        return text.to_string();
    }
    let proxy_authority = proxy_origin
        .split_once("://")
        .map_or(proxy_origin, |(_, rest)| rest);
    let escaped_proxy = proxy_origin.replace('/', "\\/");

    let mut out = text.to_string();
    for scheme in ["https", "http"] {
        out = replace_host(&out, &format!("{scheme}://{authority}"), proxy_origin);
        out = replace_host(&out, &format!("{scheme}:\\/\\/{authority}"), &escaped_proxy);
    }
    replace_host(&out, &format!("//{authority}"), &format!("//{proxy_authority}"))
}

/// Replace `from` only where the host name (and port) ends with the match.
fn replace_host(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(from) {
        let end = pos + from.len();
        out.push_str(&rest[..pos]);
        out.push_str(if ends_host(&rest[end..]) { to } else { from });
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

/// `site.dev` followed by `cdn.com` or `:8080` is a different origin.
fn ends_host(after: &str) -> bool {
    let mut chars = after.chars();
    match chars.next() {
        None => true,
        Some(':') => !chars.next().is_some_and(|c| c.is_ascii_digit()),
        Some(c) => !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')),
    }
}

/// Add the reload client script before `</body>`, or at the end when the
/// page has no body tag.
pub fn inject_client_script(html: &str) -> String {
    let script_tag = format!(r#"<script src="{CLIENT_SCRIPT_PATH}" async></script>"#);

    match html.rfind("</body>") {
        Some(pos) => {
            let mut result = String::with_capacity(html.len() + script_tag.len() + 2);
            result.push_str(&html[..pos]);
            result.push_str(&script_tag);
            result.push('\n');
            result.push_str(&html[pos..]);
            result
        }
        None => {
            let mut result = html.to_string();
            result.push('\n');
            result.push_str(&script_tag);
            result
        }
    }
}

/// Rewrite an upstream HTML page for the browser
pub fn rewrite_html(html: &str, upstream: &Url, proxy_origin: &str) -> String {
    inject_client_script(&rewrite_origins(html, upstream, proxy_origin))
}
