use std::time::Duration;

use endprobe_config::{ApiTarget, ConfigError, Credentials, EndpointSpec};
use endprobe_probe::{Outcome, ProbeResult, Prober, Transport};
use tracing::{info, instrument, warn};

use crate::summary::RunSummary;

/// Timing knobs for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
  /// Per-request timeout.
  pub timeout: Duration,
  /// Pause between consecutive requests, to stay under upstream rate limits.
  pub delay: Duration,
}

impl Default for RunConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(30),
      delay: Duration::from_millis(300),
    }
  }
}

/// Results of a run, in input order, with their summary.
#[derive(Debug)]
pub struct Run {
  pub results: Vec<ProbeResult>,
  pub summary: RunSummary,
}

/// Probes a list of endpoints one after another.
pub struct Runner<T> {
  prober: Prober<T>,
  target: ApiTarget,
  credentials: Credentials,
  config: RunConfig,
}

impl<T: Transport> Runner<T> {
  pub fn new(
    prober: Prober<T>,
    target: ApiTarget,
    credentials: Credentials,
    config: RunConfig,
  ) -> Self {
    Self {
      prober,
      target,
      credentials,
      config,
    }
  }

  pub fn prober(&self) -> &Prober<T> {
    &self.prober
  }

  /// Probe every endpoint once, in order.
  ///
  /// Every endpoint's base URL is resolved before the first request, so a
  /// bad root fails the run up front instead of halfway through. After that
  /// the run cannot fail: each endpoint yields exactly one result.
  #[instrument(name = "run", skip_all, fields(endpoints = endpoints.len()))]
  pub async fn run(&self, endpoints: &[EndpointSpec]) -> Result<Run, ConfigError> {
    let bases = endpoints
      .iter()
      .map(|e| self.target.endpoint_base(e))
      .collect::<Result<Vec<_>, _>>()?;

    let mut results = Vec::with_capacity(endpoints.len());

    for (index, (endpoint, base)) in endpoints.iter().zip(&bases).enumerate() {
      if index > 0 && !self.config.delay.is_zero() {
        tokio::time::sleep(self.config.delay).await;
      }

      let result = self
        .prober
        .probe(base, endpoint, &self.credentials, self.config.timeout)
        .await;

      if result.is_success() {
        info!(
          endpoint = %result.endpoint_name,
          records = result.record_count,
          shape = result.raw_response_shape.as_deref().unwrap_or(""),
          "endpoint reachable"
        );
      } else {
        warn!(
          endpoint = %result.endpoint_name,
          outcome = %result.outcome,
          detail = result.message(),
          "endpoint not reachable"
        );
      }

      results.push(result);
    }

    let summary = RunSummary::from_results(&results);
    info!(
      total = summary.total(),
      reachable = summary.count(Outcome::Success),
      records = summary.total_records(),
      "run completed"
    );

    Ok(Run { results, summary })
  }
}
