//! HTTP capability used by the orchestrator.

use crate::error::{EmbedError, EmbedResult};
use async_trait::async_trait;

/// Status and raw body of a completed request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status_code: 200,
            body: body.to_vec(),
        }
    }

    pub fn with_status(status_code: u16, body: &[u8]) -> Self {
        Self {
            status_code,
            body: body.to_vec(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Issues GET requests.
///
/// Futures are not required to be `Send`: the browser implementation runs on
/// the page's event loop.
#[async_trait(?Send)]
pub trait HttpClient {
    /// Resolve with any response the server sent, whatever its status.
    /// `Err` means the request itself failed.
    async fn get(&self, url: &str) -> EmbedResult<HttpResponse>;
}

/// [`HttpClient`] over `reqwest`. Uses the browser's `fetch` on wasm32.
#[derive(Clone, Debug, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> EmbedResult<HttpResponse> {
        let network = |e: reqwest::Error| EmbedError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(network)?;
        let status_code = response.status().as_u16();
        if !response.status().is_success() {
            return Ok(HttpResponse::with_status(status_code, &[]));
        }
        let body = response.bytes().await.map_err(network)?;
        Ok(HttpResponse {
            status_code,
            body: body.to_vec(),
        })
    }
}
