use std::error::Error as StdError;

use thiserror::Error;

/// Failures below the HTTP layer: nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
  /// Connect or read timed out.
  #[error("timed out")]
  Timeout,

  /// The connection could not be established.
  #[error("connection error: {0}")]
  Connect(String),

  /// Any other failure while sending or reading the response.
  #[error("request error: {0}")]
  Other(String),
}

impl From<reqwest::Error> for TransportError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      TransportError::Timeout
    } else if err.is_connect() {
      TransportError::Connect(error_chain(&err))
    } else {
      TransportError::Other(error_chain(&err))
    }
  }
}

/// Join an error and its sources, since reqwest keeps the useful part
/// (DNS, TLS, refused) in the source chain.
fn error_chain(err: &dyn StdError) -> String {
  let mut message = err.to_string();
  let mut source = err.source();
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }
  message
}
