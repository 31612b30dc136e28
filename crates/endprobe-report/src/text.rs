use chrono::{DateTime, SecondsFormat, Utc};
use endprobe_probe::{Outcome, ProbeResult};
use endprobe_runner::{RunSummary, known_status, partition};

use crate::document::{ReportDocument, RunContext};

const RULE_WIDTH: usize = 80;

/// A rendered run: the console text and the JSON document.
#[derive(Debug, Clone)]
pub struct Rendered {
  pub text: String,
  pub document: ReportDocument,
}

/// Render a finished run.
///
/// `known` is the allow-list of already-integrated endpoint names used for
/// the known/new split.
pub fn render(
  summary: &RunSummary,
  results: &[ProbeResult],
  known: &[String],
  context: &RunContext,
  timestamp: DateTime<Utc>,
) -> Rendered {
  let views = partition(results, known);
  let statuses = known_status(results, known);
  let mut lines: Vec<String> = Vec::new();
  let heavy = "=".repeat(RULE_WIDTH);
  let light = "-".repeat(RULE_WIDTH);

  lines.push(heavy.clone());
  lines.push("ENDPOINT PROBE REPORT".to_string());
  lines.push(heavy.clone());
  lines.push(format!("Base URL:  {}", context.base_url));
  lines.push(format!(
    "Subdomain: {}",
    context.subdomain.as_deref().unwrap_or("-")
  ));
  lines.push(format!("Username:  {}", context.username));
  lines.push(format!(
    "Timestamp: {}",
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
  ));
  lines.push(heavy.clone());

  lines.push(String::new());
  lines.push("RESULTS BY OUTCOME".to_string());
  lines.push(light.clone());
  for outcome in Outcome::ALL {
    let group: Vec<&ProbeResult> = results.iter().filter(|r| r.outcome == outcome).collect();
    if group.is_empty() {
      continue;
    }
    lines.push(format!("{} ({})", outcome, group.len()));
    for result in group {
      lines.push(result_line(result));
    }
  }

  lines.push(String::new());
  lines.push("TOTALS".to_string());
  lines.push(light.clone());
  lines.push(format!("  {:<26}{}", "endpoints probed:", summary.total()));
  for outcome in Outcome::ALL {
    lines.push(format!(
      "  {:<26}{}",
      format!("{}:", outcome),
      summary.count(outcome)
    ));
  }
  lines.push(format!(
    "  {:<26}{}",
    "records returned:",
    summary.total_records()
  ));
  lines.push(format!(
    "  {:<26}{:.1}%",
    "success rate:",
    summary.success_rate()
  ));

  section(&mut lines, "ALREADY KNOWN", &views.known, |r| {
    format!("  [{}] {}", r.status_tag(), r.endpoint_name)
  });
  section(&mut lines, "NEW AND REACHABLE", &views.new_reachable, |r| {
    format!(
      "  {:<40} {} records ({})",
      r.endpoint_name,
      r.record_count,
      r.raw_response_shape.as_deref().unwrap_or("-")
    )
  });
  section(
    &mut lines,
    "REACHABLE, UNKNOWN SHAPE",
    &views.reachable_unknown_shape,
    |r| format!("  {}", r.endpoint_name),
  );
  section(&mut lines, "DENIED", &views.denied, |r| {
    format!("  [{}] {:<40} {}", r.status_tag(), r.endpoint_name, r.message())
  });
  section(&mut lines, "NOT FOUND / OTHER", &views.not_found, |r| {
    format!("  [{}] {:<40} {}", r.status_tag(), r.endpoint_name, r.message())
  });

  if !statuses.is_empty() {
    lines.push(String::new());
    lines.push("KNOWN ENDPOINT STATUS".to_string());
    lines.push(light);
    for status in &statuses {
      lines.push(format!(
        "  {:<40} {}",
        status.name,
        if status.accessible {
          "accessible"
        } else {
          "no access"
        }
      ));
    }
  }

  lines.push(heavy);

  let document = ReportDocument {
    timestamp,
    context: context.clone(),
    summary: summary.clone(),
    success_rate: summary.success_rate(),
    results: results.to_vec(),
    new_available_endpoints: views
      .new_reachable
      .iter()
      .chain(views.reachable_unknown_shape.iter())
      .map(|r| r.endpoint_name.clone())
      .collect(),
    known_endpoints_status: statuses,
  };

  let mut text = lines.join("\n");
  text.push('\n');

  Rendered { text, document }
}

/// `[OK]     customers                                | Records:     5 | Success`
fn result_line(result: &ProbeResult) -> String {
  format!(
    "{:<8} {:<40} | Records: {:>5} | {}",
    format!("[{}]", result.status_tag()),
    result.endpoint_name,
    result.record_count,
    result.message()
  )
}

fn section(
  lines: &mut Vec<String>,
  title: &str,
  results: &[&ProbeResult],
  line: impl Fn(&ProbeResult) -> String,
) {
  if results.is_empty() {
    return;
  }
  lines.push(String::new());
  lines.push(format!("{} ({})", title, results.len()));
  lines.push("-".repeat(RULE_WIDTH));
  for result in results {
    lines.push(line(result));
  }
}
