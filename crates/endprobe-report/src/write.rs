use std::path::Path;

use tokio::fs;

use crate::document::ReportDocument;
use crate::error::ReportError;

/// Where the CLI writes the report unless told otherwise.
pub const DEFAULT_REPORT_PATH: &str = "probe_results.json";

/// Write the report as pretty JSON, creating or replacing the file.
pub async fn write_report(path: &Path, document: &ReportDocument) -> Result<(), ReportError> {
  let mut bytes = serde_json::to_vec_pretty(document)?;
  bytes.push(b'\n');

  fs::write(path, bytes)
    .await
    .map_err(|source| ReportError::Write {
      path: path.to_path_buf(),
      source,
    })
}
