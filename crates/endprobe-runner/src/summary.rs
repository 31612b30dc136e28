use endprobe_probe::{Outcome, ProbeResult};
use serde::Serialize;

/// Per-outcome totals for a run.
///
/// Only constructed from a result sequence, so it can never drift from the
/// results it describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
  total: usize,
  success: usize,
  unauthorized: usize,
  forbidden: usize,
  not_found: usize,
  bad_request: usize,
  timeout: usize,
  connection_error: usize,
  other_error: usize,
  total_records: u64,
}

impl RunSummary {
  pub fn from_results(results: &[ProbeResult]) -> Self {
    let mut summary = RunSummary {
      total: results.len(),
      ..Default::default()
    };

    for result in results {
      *summary.slot(result.outcome) += 1;
      summary.total_records += result.record_count;
    }

    summary
  }

  fn slot(&mut self, outcome: Outcome) -> &mut usize {
    match outcome {
      Outcome::Success => &mut self.success,
      Outcome::Unauthorized => &mut self.unauthorized,
      Outcome::Forbidden => &mut self.forbidden,
      Outcome::NotFound => &mut self.not_found,
      Outcome::BadRequest => &mut self.bad_request,
      Outcome::Timeout => &mut self.timeout,
      Outcome::ConnectionError => &mut self.connection_error,
      Outcome::OtherError => &mut self.other_error,
    }
  }

  /// Number of probes with the given outcome.
  pub fn count(&self, outcome: Outcome) -> usize {
    match outcome {
      Outcome::Success => self.success,
      Outcome::Unauthorized => self.unauthorized,
      Outcome::Forbidden => self.forbidden,
      Outcome::NotFound => self.not_found,
      Outcome::BadRequest => self.bad_request,
      Outcome::Timeout => self.timeout,
      Outcome::ConnectionError => self.connection_error,
      Outcome::OtherError => self.other_error,
    }
  }

  pub fn total(&self) -> usize {
    self.total
  }

  pub fn total_records(&self) -> u64 {
    self.total_records
  }

  /// Share of successful probes, in percent. Zero for an empty run.
  pub fn success_rate(&self) -> f64 {
    if self.total == 0 {
      return 0.0;
    }
    self.success as f64 / self.total as f64 * 100.0
  }

  /// Whether at least one endpoint answered 200.
  pub fn any_reachable(&self) -> bool {
    self.success > 0
  }
}

#[cfg(test)]
mod tests {
  use endprobe_config::Method;

  use super::*;

  fn result(name: &str, outcome: Outcome, records: u64) -> ProbeResult {
    ProbeResult {
      endpoint_name: name.to_string(),
      method: Method::Get,
      url: format!("https://h/{}", name),
      http_status: None,
      outcome,
      record_count: records,
      total_available: None,
      error_detail: None,
      raw_response_shape: None,
    }
  }

  #[test]
  fn test_counts_by_outcome() {
    let results = vec![
      result("a", Outcome::Success, 5),
      result("b", Outcome::Success, 2),
      result("creditors", Outcome::Forbidden, 0),
      result("d", Outcome::Timeout, 0),
    ];
    let summary = RunSummary::from_results(&results);

    assert_eq!(summary.total(), 4);
    assert_eq!(summary.count(Outcome::Success), 2);
    assert_eq!(summary.count(Outcome::Forbidden), 1);
    assert_eq!(summary.count(Outcome::Timeout), 1);
    assert_eq!(summary.count(Outcome::NotFound), 0);
    assert_eq!(summary.total_records(), 7);
    assert_eq!(summary.success_rate(), 50.0);
    assert!(summary.any_reachable());
  }

  #[test]
  fn test_counts_sum_to_total() {
    let results: Vec<ProbeResult> = Outcome::ALL
      .iter()
      .enumerate()
      .map(|(i, o)| result(&i.to_string(), *o, 0))
      .collect();
    let summary = RunSummary::from_results(&results);

    let sum: usize = Outcome::ALL.iter().map(|o| summary.count(*o)).sum();
    assert_eq!(sum, summary.total());
  }

  #[test]
  fn test_one_more_forbidden_adds_exactly_one() {
    let mut results = vec![result("a", Outcome::Success, 1)];
    let before = RunSummary::from_results(&results);
    results.push(result("creditors", Outcome::Forbidden, 0));
    let after = RunSummary::from_results(&results);

    assert_eq!(
      after.count(Outcome::Forbidden),
      before.count(Outcome::Forbidden) + 1
    );
    assert_eq!(after.count(Outcome::Success), before.count(Outcome::Success));
  }

  #[test]
  fn test_empty_run() {
    let summary = RunSummary::from_results(&[]);
    assert_eq!(summary.total(), 0);
    assert_eq!(summary.success_rate(), 0.0);
    assert!(!summary.any_reachable());
  }
}
