use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop discovery altogether.
#[derive(Debug, Error)]
pub enum DiscoveryError {
  /// The discovery directory itself could not be listed.
  #[error("failed to read discovery directory '{}': {source}", .path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
