//! Camera stream relay
//!
//! Transparent pass-through of everything under the local `/cam` prefix
//! to the camera device's `/stream` endpoint. The response body is
//! streamed, never buffered — the camera serves an endless
//! `multipart/x-mixed-replace` MJPEG stream, so the relay client gets a
//! connect timeout but no overall request timeout.

use crate::error::{Error, Result};
use axum::body::Body;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(4);

/// Headers that must not be copied through a proxy hop.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

/// Relays requests under the `/cam` prefix to the camera device.
pub struct StreamRelay {
    client: reqwest::Client,
    upstream: String,
}

impl StreamRelay {
    /// Create a relay targeting the camera base URL.
    pub fn new(camera_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build relay client: {}", e)))?;
        Ok(Self {
            client,
            upstream: camera_url.into(),
        })
    }

    /// Rewrite a local sub-path to the upstream stream URL.
    ///
    /// `/cam` maps to `<camera>/stream`, `/cam/x` to `<camera>/stream/x`;
    /// the query string passes through untouched.
    fn upstream_url(&self, subpath: &str, query: Option<&str>) -> String {
        let mut url = format!("{}/stream", self.upstream);
        if !subpath.is_empty() {
            url.push('/');
            url.push_str(subpath.trim_start_matches('/'));
        }
        if let Some(q) = query {
            url.push('?');
            url.push_str(q);
        }
        url
    }

    /// Forward one request and stream the upstream response back.
    ///
    /// An unreachable camera is an [`Error::Upstream`] (the HTTP layer
    /// renders it as 502); upstream error statuses pass through as-is.
    pub async fn proxy(
        &self,
        method: &axum::http::Method,
        subpath: &str,
        query: Option<&str>,
    ) -> Result<Response> {
        let url = self.upstream_url(subpath, query);

        // axum and reqwest sit on different `http` major versions, so
        // the method crosses the boundary by name.
        let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .unwrap_or(reqwest::Method::GET);

        let upstream = self.client.request(method, &url).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to reach camera device");
            Error::Upstream(e.to_string())
        })?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        let mut response = Response::builder().status(status);
        if let Some(headers) = response.headers_mut() {
            for (name, value) in upstream.headers() {
                if HOP_BY_HOP.contains(&name.as_str()) {
                    continue;
                }
                let Ok(name) = axum::http::HeaderName::from_bytes(name.as_str().as_bytes()) else {
                    continue;
                };
                let Ok(value) = HeaderValue::from_bytes(value.as_bytes()) else {
                    continue;
                };
                headers.insert(name, value);
            }
        }

        response
            .body(Body::from_stream(upstream.bytes_stream()))
            .map_err(|e| Error::Upstream(format!("Failed to build relay response: {}", e)))
    }
}
