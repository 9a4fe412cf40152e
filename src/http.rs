//! Blocking HTTP transport
//!
//! The resolver and downloader only talk to the network through
//! [`HttpTransport`], so tests can substitute canned responses.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Result, network};
use crate::filename::ResponseHeaders;

/// Browser-like user agent; the forum rejects unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Status line, final URL (after redirects) and headers of a response
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: u16,
    pub url: String,
    pub headers: ResponseHeaders,
}

impl ResponseMeta {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A response whose body has not been read yet
pub struct StreamingResponse {
    pub meta: ResponseMeta,
    pub body: Box<dyn Read>,
}

pub trait HttpTransport {
    /// Header-only request. Non-2xx statuses are returned, not raised.
    fn head(&self, url: &str) -> Result<ResponseMeta>;

    /// GET with a streamed body. Non-2xx statuses are errors.
    fn get(&self, url: &str) -> Result<StreamingResponse>;

    /// GET a page and decode it as UTF-8. Non-2xx statuses are errors.
    fn get_text(&self, url: &str) -> Result<String> {
        let mut response = self.get(url)?;
        let mut bytes = Vec::new();
        response
            .body
            .read_to_end(&mut bytes)
            .map_err(|e| network::request_failed(url, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// [`HttpTransport`] backed by `reqwest`'s blocking client
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| network::request_failed("client", e))?;
        Ok(Self { client, timeout })
    }

    #[cfg(test)]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn meta(response: &reqwest::blocking::Response) -> ResponseMeta {
        ResponseMeta {
            status: response.status().as_u16(),
            url: response.url().to_string(),
            headers: ResponseHeaders::from_header_map(response.headers()),
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn head(&self, url: &str) -> Result<ResponseMeta> {
        let response = self
            .client
            .head(url)
            .send()
            .map_err(|e| network::request_failed(url, e))?;
        Ok(Self::meta(&response))
    }

    fn get(&self, url: &str) -> Result<StreamingResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| network::request_failed(url, e))?;

        let meta = Self::meta(&response);
        if !meta.is_success() {
            return Err(network::http_status(url, meta.status));
        }

        Ok(StreamingResponse {
            meta,
            body: Box::new(response),
        })
    }
}
