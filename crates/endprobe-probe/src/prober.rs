use std::time::Duration;

use endprobe_config::{Credentials, EndpointSpec, Method};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::TransportError;
use crate::outcome::Outcome;
use crate::records::count_records;
use crate::transport::{ProbeRequest, RawResponse, Transport};

/// Maximum characters of a transport error kept in `error_detail`.
const ERROR_DETAIL_CHARS: usize = 100;

/// Maximum characters of a 400 response body kept in `error_detail`.
const BAD_REQUEST_BODY_CHARS: usize = 200;

/// Outcome of one probe attempt against one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
  pub endpoint_name: String,
  pub method: Method,
  pub url: String,
  /// Status code, when the server answered.
  pub http_status: Option<u16>,
  pub outcome: Outcome,
  pub record_count: u64,
  /// Total across all pages, when the response advertises it.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_available: Option<u64>,
  pub error_detail: Option<String>,
  pub raw_response_shape: Option<String>,
}

impl ProbeResult {
  pub fn is_success(&self) -> bool {
    self.outcome == Outcome::Success
  }

  /// One-line description: the error detail, or "Success".
  pub fn message(&self) -> &str {
    self.error_detail.as_deref().unwrap_or("Success")
  }

  /// "OK" for 200, the literal status otherwise, "ERR" without a response.
  pub fn status_tag(&self) -> String {
    match self.http_status {
      Some(200) => "OK".to_string(),
      Some(status) => status.to_string(),
      None => "ERR".to_string(),
    }
  }
}

/// Probes endpoints one request at a time over a [`Transport`].
pub struct Prober<T> {
  transport: T,
}

impl<T: Transport> Prober<T> {
  pub fn new(transport: T) -> Self {
    Self { transport }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Probe one endpoint. Never fails: every failure is folded into the result.
  #[instrument(
    name = "probe",
    skip_all,
    fields(endpoint = %endpoint.name, method = %endpoint.method)
  )]
  pub async fn probe(
    &self,
    base_url: &str,
    endpoint: &EndpointSpec,
    credentials: &Credentials,
    timeout: Duration,
  ) -> ProbeResult {
    let request = build_request(base_url, endpoint, credentials, timeout);
    debug!(url = %request.url, "sending request");

    let response = self.transport.send(&request).await;

    let mut result = ProbeResult {
      endpoint_name: endpoint.name.clone(),
      method: endpoint.method,
      url: request.url,
      http_status: None,
      outcome: Outcome::OtherError,
      record_count: 0,
      total_available: None,
      error_detail: None,
      raw_response_shape: None,
    };

    match response {
      Ok(response) => apply_response(&mut result, response),
      Err(err) => apply_transport_error(&mut result, &err),
    }

    result
  }
}

fn build_request(
  base_url: &str,
  endpoint: &EndpointSpec,
  credentials: &Credentials,
  timeout: Duration,
) -> ProbeRequest {
  let base = base_url.trim_end_matches('/');
  let url = if endpoint.path.starts_with('/') {
    format!("{}{}", base, endpoint.path)
  } else {
    format!("{}/{}", base, endpoint.path)
  };

  let (query, body) = match endpoint.method {
    Method::Get => (endpoint.query_pairs(), None),
    Method::Post => (Vec::new(), Some(endpoint.json_body())),
  };

  ProbeRequest {
    method: endpoint.method,
    url,
    query,
    body,
    credentials: credentials.clone(),
    timeout,
  }
}

fn apply_response(result: &mut ProbeResult, response: RawResponse) {
  let outcome = Outcome::from_status(response.status);
  result.http_status = Some(response.status);
  result.outcome = outcome;

  match outcome {
    Outcome::Success => match serde_json::from_str::<serde_json::Value>(&response.body) {
      Ok(body) => {
        let counted = count_records(&body);
        result.record_count = counted.count;
        result.total_available = counted.total_available;
        result.raw_response_shape = Some(counted.shape);
      }
      Err(_) => {
        result.raw_response_shape = Some("non-JSON".to_string());
      }
    },
    Outcome::Unauthorized => result.error_detail = Some("Unauthorized".to_string()),
    Outcome::Forbidden => result.error_detail = Some("Forbidden - No permission".to_string()),
    Outcome::NotFound => result.error_detail = Some("Not found".to_string()),
    Outcome::BadRequest => {
      result.error_detail = Some(format!(
        "Bad request: {}",
        truncate(&response.body, BAD_REQUEST_BODY_CHARS)
      ));
    }
    _ => result.error_detail = Some(format!("Status {}", response.status)),
  }
}

fn apply_transport_error(result: &mut ProbeResult, err: &TransportError) {
  result.outcome = Outcome::from_transport_error(err);
  result.error_detail = Some(match err {
    TransportError::Timeout => "Timeout".to_string(),
    TransportError::Connect(message) => {
      format!("Connection error: {}", truncate(message, ERROR_DETAIL_CHARS))
    }
    TransportError::Other(message) => format!("Error: {}", truncate(message, ERROR_DETAIL_CHARS)),
  });
}

/// First `max_chars` characters of `text`, never splitting a code point.
fn truncate(text: &str, max_chars: usize) -> String {
  text.chars().take(max_chars).collect()
}
