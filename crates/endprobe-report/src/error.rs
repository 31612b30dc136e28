use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting a report.
#[derive(Debug, Error)]
pub enum ReportError {
  #[error("failed to serialize report: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("failed to write report to '{}': {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
