use std::time::Duration;

use async_trait::async_trait;
use endprobe_config::{Credentials, Method};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::TransportError;

/// User agent sent with every probe.
pub const USER_AGENT: &str = concat!("endprobe/", env!("CARGO_PKG_VERSION"));

/// A fully built probe request.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
  pub method: Method,
  pub url: String,
  /// Query string pairs. Empty for POST.
  pub query: Vec<(String, String)>,
  /// JSON body. Only set for POST.
  pub body: Option<serde_json::Value>,
  pub credentials: Credentials,
  pub timeout: Duration,
}

/// What came back when the server answered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
  pub status: u16,
  pub body: String,
}

/// Sends a single request. One call is one network round trip; no retries.
#[async_trait]
pub trait Transport: Send + Sync {
  async fn send(&self, request: &ProbeRequest) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport with Basic auth and JSON headers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: Client,
}

impl HttpTransport {
  pub fn new() -> Result<Self, TransportError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(Self { client })
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn send(&self, request: &ProbeRequest) -> Result<RawResponse, TransportError> {
    let method = match request.method {
      Method::Get => reqwest::Method::GET,
      Method::Post => reqwest::Method::POST,
    };

    let mut builder = self
      .client
      .request(method, &request.url)
      .basic_auth(
        request.credentials.username(),
        Some(request.credentials.password()),
      )
      .header(CONTENT_TYPE, "application/json")
      .header(ACCEPT, "application/json")
      .timeout(request.timeout);

    if !request.query.is_empty() {
      builder = builder.query(&request.query);
    }

    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    Ok(RawResponse { status, body })
  }
}
