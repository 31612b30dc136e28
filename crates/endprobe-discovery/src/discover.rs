use std::collections::HashSet;
use std::path::{Path, PathBuf};

use endprobe_config::EndpointSpec;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::DiscoveryError;
use crate::paths::extract_paths;

/// Name prefix of every discovered endpoint.
pub const DISCOVERED_PREFIX: &str = "discovered";

const DOCUMENT_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Discover endpoints declared in the API description documents of `dir`.
///
/// Documents are visited in file-name order. A path is skipped when it is in
/// `covered` or was already produced by an earlier document. Each new path
/// becomes a GET probe named `discovered_<file stem>_<path>` asking for a
/// single record.
pub async fn discover(
  dir: &Path,
  covered: &HashSet<String>,
) -> Result<Vec<EndpointSpec>, DiscoveryError> {
  let documents = list_documents(dir).await?;
  let mut seen: HashSet<String> = HashSet::new();
  let mut endpoints = Vec::new();

  for document in documents {
    let content = match fs::read_to_string(&document).await {
      Ok(content) => content,
      Err(e) => {
        warn!(document = %document.display(), error = %e, "skipping unreadable document");
        continue;
      }
    };

    let paths = extract_paths(&content);
    if paths.is_empty() {
      warn!(document = %document.display(), "no paths found in document");
      continue;
    }

    let stem = document
      .file_stem()
      .and_then(|s| s.to_str())
      .unwrap_or_default();

    for path in paths {
      if covered.contains(&path) || !seen.insert(path.clone()) {
        continue;
      }

      endpoints.push(
        EndpointSpec::get(format!("{}_{}_{}", DISCOVERED_PREFIX, stem, path), path)
          .with_param("limit", 1)
          .with_param("offset", 0),
      );
    }
  }

  debug!(dir = %dir.display(), discovered = endpoints.len(), "discovery finished");
  Ok(endpoints)
}

/// Document files directly inside `dir`, sorted by file name.
async fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
  let read_dir_error = |source: std::io::Error| DiscoveryError::ReadDir {
    path: dir.to_path_buf(),
    source,
  };

  let mut entries = fs::read_dir(dir).await.map_err(read_dir_error)?;
  let mut documents = Vec::new();

  while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
    let path = entry.path();
    let is_document = path
      .extension()
      .and_then(|e| e.to_str())
      .is_some_and(|e| DOCUMENT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));

    if is_document && path.is_file() {
      documents.push(path);
    }
  }

  documents.sort();
  Ok(documents)
}
