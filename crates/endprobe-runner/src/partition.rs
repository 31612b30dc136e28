//! Presentation-only grouping of run results.
//!
//! Nothing here feeds back into probing.

use endprobe_probe::ProbeResult;
use serde::Serialize;

/// Shape label the prober gives 200 responses whose body is not JSON.
const NON_JSON_SHAPE: &str = "non-JSON";

/// Disjoint views over a run's results. Every result lands in exactly one.
#[derive(Debug, Default, Serialize)]
pub struct Partition<'a> {
  /// Matched against the allow-list of already-integrated endpoints.
  pub known: Vec<&'a ProbeResult>,
  /// Answered 200 with JSON and not in the allow-list.
  pub new_reachable: Vec<&'a ProbeResult>,
  /// Answered 200 with a body that is not JSON, not in the allow-list.
  pub reachable_unknown_shape: Vec<&'a ProbeResult>,
  /// 401 or 403, not in the allow-list.
  pub denied: Vec<&'a ProbeResult>,
  /// Everything else: 404, 400, timeouts, transport errors.
  pub not_found: Vec<&'a ProbeResult>,
}

/// Whether an allow-listed endpoint was reachable during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownStatus {
  pub name: String,
  pub accessible: bool,
}

/// Canonical form of an endpoint name for allow-list matching.
///
/// Lowercases, drops a `-v1` version suffix and turns `_` and spaces into `-`.
pub fn normalize_name(name: &str) -> String {
  let lower = name.to_lowercase();
  lower
    .strip_suffix("-v1")
    .unwrap_or(&lower)
    .replace(['_', ' '], "-")
}

/// Whether any allow-list entry is contained in the normalized name.
pub fn is_known(name: &str, known: &[String]) -> bool {
  let normalized = normalize_name(name);
  known
    .iter()
    .map(|k| normalize_name(k))
    .filter(|k| !k.is_empty())
    .any(|k| normalized.contains(&k))
}

/// Split results into the report views, keeping input order inside each view.
pub fn partition<'a>(results: &'a [ProbeResult], known: &[String]) -> Partition<'a> {
  let mut views = Partition::default();

  for result in results {
    let view = if is_known(&result.endpoint_name, known) {
      &mut views.known
    } else if result.is_success() {
      if result.raw_response_shape.as_deref() == Some(NON_JSON_SHAPE) {
        &mut views.reachable_unknown_shape
      } else {
        &mut views.new_reachable
      }
    } else if result.outcome.is_denied() {
      &mut views.denied
    } else {
      &mut views.not_found
    };
    view.push(result);
  }

  views
}

/// Reachability of each allow-listed endpoint, in allow-list order.
pub fn known_status(results: &[ProbeResult], known: &[String]) -> Vec<KnownStatus> {
  known
    .iter()
    .map(|name| {
      let single = std::slice::from_ref(name);
      let accessible = results
        .iter()
        .any(|r| r.is_success() && is_known(&r.endpoint_name, single));
      KnownStatus {
        name: name.clone(),
        accessible,
      }
    })
    .collect()
}
