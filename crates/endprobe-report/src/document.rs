use chrono::{DateTime, Utc};
use endprobe_probe::ProbeResult;
use endprobe_runner::{KnownStatus, RunSummary};
use serde::Serialize;

/// Who and what was probed. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunContext {
  pub base_url: String,
  pub subdomain: Option<String>,
  pub username: String,
}

/// Machine-readable record of one run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
  pub timestamp: DateTime<Utc>,
  pub context: RunContext,
  pub summary: RunSummary,
  /// Percentage of probes that answered 200.
  pub success_rate: f64,
  pub results: Vec<ProbeResult>,
  /// Reachable endpoints not on the known list.
  pub new_available_endpoints: Vec<String>,
  pub known_endpoints_status: Vec<KnownStatus>,
}
