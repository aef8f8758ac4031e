use crate::errors::TransportError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Fetches response bodies over HTTP GET.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String, TransportError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("champion-dex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| TransportError::Request {
                url: String::new(),
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        let request_error = |err: reqwest::Error| TransportError::Request {
            url: url.to_string(),
            message: err.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(request_error)
    }
}

/// Serves canned bodies by URL; anything else is a 404. Counts requests per URL.
///
/// Test utility for driving a [`PokemonGateway`](super::PokemonGateway) without a network.
/// It is public so integration tests and downstream crates can use it; the binary never does.
#[derive(Debug, Default)]
pub struct CannedTransport {
    responses: HashMap<String, String>,
    hits: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    pub fn with_json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.with(url, body.to_string())
    }

    pub fn requests_for(&self, url: &str) -> usize {
        self.hits
            .lock()
            .map(|hits| hits.get(url).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HttpTransport for CannedTransport {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut hits) = self.hits.lock() {
            *hits.entry(url.to_string()).or_insert(0) += 1;
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
