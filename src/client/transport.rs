//! HTTP transport bound to a single resolved endpoint.
//!
//! The transport parses the target URL once, resolves its hostname to a
//! concrete socket address, and issues every request against that address.
//! Automatic redirect handling is disabled at the client level; redirect
//! following is the check session's job, where it can be bounded and
//! observed.
//!
//! Note: because requests are addressed to the resolved IP, the `Host`
//! header carries the IP rather than the original hostname. Targets behind
//! name-based virtual hosting (or strict TLS name validation) may answer
//! differently than they would for the hostname. This mirrors the behavior
//! checks have historically relied on and is deliberately left unchanged.

use std::net::SocketAddr;

use reqwest::redirect::Policy;
use serde::Serialize;
use thiserror::Error;
use tokio::net::lookup_host;
use url::Url;

use super::types::Response;

/// Errors raised by URL resolution and request transmission.
///
/// None of these are handled locally; they surface through the script
/// boundary as CRITICAL.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid target URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("target URL has no host")]
    MissingHost,

    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{host} did not resolve to any address")]
    NoAddress { host: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("redirect response carried no Location header")]
    MissingLocation,
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Issues requests against one resolved host:port.
#[derive(Debug, Clone)]
pub struct Transport {
    /// `http://<resolved-ip>:<port>/` - every request URL is built on this.
    base: Url,
    /// Original hostname, kept for diagnostics.
    host: String,
    client: reqwest::Client,
}

impl Transport {
    /// Parse `target`, resolve its hostname, and bind to the first resolved
    /// address on the URL's port.
    ///
    /// No request is sent yet; connection errors surface on the first
    /// `get`/`post`. The client enforces no timeout of its own.
    pub async fn connect(target: &str) -> TransportResult<Self> {
        let url = Url::parse(target)?;
        let host = url
            .host_str()
            .ok_or(TransportError::MissingHost)?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);

        let endpoint = resolve(&host, port).await?;
        let base = Url::parse(&format!("http://{endpoint}/"))?;

        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;

        tracing::debug!(host = %host, endpoint = %endpoint, "resolved target");

        Ok(Self { base, host, client })
    }

    /// Original hostname of the target.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The resolved endpoint every request is issued against.
    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    /// Issue a GET for `target` and snapshot the response.
    pub async fn get(&self, target: &str) -> TransportResult<Response> {
        let url = self.request_url(target)?;
        tracing::debug!(method = "GET", url = %url, "issuing request");
        let response = self.client.get(url).send().await?;
        Response::read(response).await
    }

    /// Issue a form-encoded POST for `target` and snapshot the response.
    pub async fn post<T>(&self, target: &str, form: &T) -> TransportResult<Response>
    where
        T: Serialize + ?Sized,
    {
        let url = self.request_url(target)?;
        tracing::debug!(method = "POST", url = %url, "issuing request");
        let response = self.client.post(url).form(form).send().await?;
        Response::read(response).await
    }

    /// Turn a request target into a URL on the bound endpoint.
    ///
    /// Absolute URLs (typically `Location` values) are reduced to their path
    /// and query; the session never migrates to another host.
    fn request_url(&self, target: &str) -> TransportResult<Url> {
        if let Ok(absolute) = Url::parse(target) {
            if absolute.host_str().is_some() {
                let mut url = self.base.clone();
                url.set_path(absolute.path());
                url.set_query(absolute.query());
                return Ok(url);
            }
        }
        Ok(self.base.join(target)?)
    }
}

async fn resolve(host: &str, port: u16) -> TransportResult<SocketAddr> {
    let mut addresses = lookup_host((host, port))
        .await
        .map_err(|source| TransportError::Resolve {
            host: host.to_string(),
            source,
        })?;

    addresses.next().ok_or_else(|| TransportError::NoAddress {
        host: host.to_string(),
    })
}
