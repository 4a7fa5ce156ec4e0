//! HTTP transport seam for remote package sources.
use std::fmt;
use std::io::{self, Read};
use std::time::Duration;

use crate::config::HttpConfig;

/// Status line and streaming body of an HTTP response.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, read in chunks by the caller.
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Issues HTTP GET requests.
///
/// Injected into [`Fetcher`](super::Fetcher) so callers control timeouts,
/// proxies, and cancellation, and so tests can substitute a fake.
#[cfg_attr(test, mockall::automock)]
pub trait HttpTransport: Send + Sync {
    /// Send a GET request for `url`.
    ///
    /// Non-2xx responses are returned as values, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or the response
    /// headers cannot be read.
    fn get(&self, url: &str) -> io::Result<HttpResponse>;
}

/// Production [`HttpTransport`] backed by a blocking [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build an agent from `config`.
    #[must_use]
    pub fn new(config: &HttpConfig) -> Self {
        let mut builder = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .user_agent(config.user_agent.as_str());
        if !config.use_env_proxy {
            builder = builder.proxy(None);
        }
        Self {
            agent: ureq::Agent::new_with_config(builder.build()),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str) -> io::Result<HttpResponse> {
        let response = self.agent.get(url).call().map_err(io::Error::other)?;
        let status = response.status().as_u16();
        tracing::debug!("GET {url} -> {status}");
        Ok(HttpResponse {
            status,
            body: Box::new(response.into_body().into_reader()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = HttpResponse {
            status: 204,
            body: Box::new(io::empty()),
        };
        let not_found = HttpResponse {
            status: 404,
            body: Box::new(io::empty()),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[test]
    fn debug_omits_body() {
        let resp = HttpResponse {
            status: 200,
            body: Box::new(io::empty()),
        };
        assert_eq!(format!("{resp:?}"), "HttpResponse { status: 200, .. }");
    }
}
