use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Coarse classification of one probe, used for aggregation and reporting.
///
/// Derived only from the HTTP status code or the transport error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Success,
  Unauthorized,
  Forbidden,
  NotFound,
  BadRequest,
  Timeout,
  ConnectionError,
  OtherError,
}

impl Outcome {
  /// Every outcome, in report order.
  pub const ALL: [Outcome; 8] = [
    Outcome::Success,
    Outcome::Unauthorized,
    Outcome::Forbidden,
    Outcome::NotFound,
    Outcome::BadRequest,
    Outcome::Timeout,
    Outcome::ConnectionError,
    Outcome::OtherError,
  ];

  pub fn from_status(status: u16) -> Self {
    match status {
      200 => Outcome::Success,
      400 => Outcome::BadRequest,
      401 => Outcome::Unauthorized,
      403 => Outcome::Forbidden,
      404 => Outcome::NotFound,
      _ => Outcome::OtherError,
    }
  }

  pub fn from_transport_error(err: &TransportError) -> Self {
    match err {
      TransportError::Timeout => Outcome::Timeout,
      TransportError::Connect(_) => Outcome::ConnectionError,
      TransportError::Other(_) => Outcome::OtherError,
    }
  }

  /// Access was refused by the API (as opposed to missing or broken).
  pub fn is_denied(&self) -> bool {
    matches!(self, Outcome::Unauthorized | Outcome::Forbidden)
  }

  pub fn label(&self) -> &'static str {
    match self {
      Outcome::Success => "success",
      Outcome::Unauthorized => "unauthorized",
      Outcome::Forbidden => "forbidden",
      Outcome::NotFound => "not found",
      Outcome::BadRequest => "bad request",
      Outcome::Timeout => "timeout",
      Outcome::ConnectionError => "connection error",
      Outcome::OtherError => "other error",
    }
  }
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_mapping() {
    assert_eq!(Outcome::from_status(200), Outcome::Success);
    assert_eq!(Outcome::from_status(401), Outcome::Unauthorized);
    assert_eq!(Outcome::from_status(403), Outcome::Forbidden);
    assert_eq!(Outcome::from_status(404), Outcome::NotFound);
    assert_eq!(Outcome::from_status(400), Outcome::BadRequest);
  }

  #[test]
  fn test_other_statuses_are_other_error() {
    for status in [201, 204, 301, 405, 429, 500, 502, 503] {
      assert_eq!(Outcome::from_status(status), Outcome::OtherError, "{}", status);
    }
  }

  #[test]
  fn test_transport_mapping() {
    assert_eq!(
      Outcome::from_transport_error(&TransportError::Timeout),
      Outcome::Timeout
    );
    assert_eq!(
      Outcome::from_transport_error(&TransportError::Connect("refused".into())),
      Outcome::ConnectionError
    );
    assert_eq!(
      Outcome::from_transport_error(&TransportError::Other("tls".into())),
      Outcome::OtherError
    );
  }

  #[test]
  fn test_serializes_snake_case() {
    assert_eq!(
      serde_json::to_string(&Outcome::ConnectionError).unwrap(),
      "\"connection_error\""
    );
  }
}
