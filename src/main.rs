use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use endprobe_config::{
  ApiTarget, Catalog, CatalogFormat, Credentials, DateWindow, PASSWORD_ENV, USERNAME_ENV,
};
use endprobe_discovery::discover;
use endprobe_probe::{HttpTransport, Prober};
use endprobe_report::{DEFAULT_REPORT_PATH, RunContext, render, write_report};
use endprobe_runner::{RunConfig, RunSummary, Runner};

/// Exit code when at least one endpoint answered 200.
const EXIT_SUCCESS: u8 = 0;

/// Exit code for fatal configuration and I/O errors.
const EXIT_CONFIG: u8 = 2;

/// Exit code for a run in which no endpoint answered 200.
const EXIT_NOTHING_REACHABLE: u8 = 1;

/// Endprobe - Probe an ERP REST API and report which endpoints are reachable
#[derive(Parser)]
#[command(name = "endprobe")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Probe every catalog endpoint once and write a report
  Run(RunArgs),

  /// Print the resolved endpoint catalog as JSON
  Catalog {
    #[command(flatten)]
    catalog: CatalogArgs,
  },

  /// Print endpoints declared in API description documents as JSON
  Discover {
    /// Directory of OpenAPI documents (YAML or JSON)
    dir: PathBuf,

    /// Skip paths already covered by this catalog (default: built-in)
    #[arg(long)]
    catalog: Option<PathBuf>,
  },
}

#[derive(Args)]
struct CatalogArgs {
  /// Path to the endpoint catalog (JSON or YAML, default: built-in)
  #[arg(long)]
  catalog: Option<PathBuf>,

  /// Days covered by date-range parameters, ending today
  #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=36500))]
  window_days: u32,
}

#[derive(Args)]
struct RunArgs {
  #[command(flatten)]
  catalog: CatalogArgs,

  /// API base URL including the tenant segment, e.g. https://api.example.com/acme
  #[arg(long, env = "ENDPROBE_BASE_URL")]
  base_url: String,

  /// API user name
  #[arg(long, env = USERNAME_ENV)]
  username: Option<String>,

  /// API password
  #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
  password: Option<String>,

  /// Also probe endpoints declared in the API description documents of this directory
  #[arg(long)]
  discover: Option<PathBuf>,

  /// Per-request timeout in seconds
  #[arg(long, default_value_t = 30)]
  timeout: u64,

  /// Pause between requests in milliseconds
  #[arg(long, default_value_t = 300)]
  delay_ms: u64,

  /// Where to write the JSON report
  #[arg(long, default_value = DEFAULT_REPORT_PATH)]
  output: PathBuf,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let result = match cli.command {
    Commands::Run(args) => run(args),
    Commands::Catalog { catalog } => print_catalog(catalog).map(|_| EXIT_SUCCESS),
    Commands::Discover { dir, catalog } => print_discovered(dir, catalog).map(|_| EXIT_SUCCESS),
  };

  ExitCode::from(exit_status(result))
}

/// Process exit status for a finished command. Fatal errors are reported on
/// stderr.
fn exit_status(result: Result<u8>) -> u8 {
  match result {
    Ok(code) => code,
    Err(err) => {
      eprintln!("error: {:#}", err);
      EXIT_CONFIG
    }
  }
}

/// Exit status of a completed run: success only if something was reachable.
fn run_status(summary: &RunSummary) -> u8 {
  if summary.any_reachable() {
    EXIT_SUCCESS
  } else {
    EXIT_NOTHING_REACHABLE
  }
}

fn run(args: RunArgs) -> Result<u8> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_async(args).await })
}

async fn run_async(args: RunArgs) -> Result<u8> {
  let credentials = Credentials::resolve(args.username, args.password)?;

  let mut catalog = load_catalog(args.catalog.catalog.as_deref()).await?;

  if let Some(dir) = &args.discover {
    let discovered = discover(dir, &catalog.covered_paths())
      .await
      .with_context(|| format!("failed to discover endpoints in {}", dir.display()))?;
    info!(count = discovered.len(), "discovered additional endpoints");
    catalog.extend(discovered);
  }

  let target = ApiTarget::new(&args.base_url, &catalog)?;
  let context = RunContext {
    base_url: target.base_url().to_string(),
    subdomain: target.subdomain().map(|s| s.to_string()),
    username: credentials.username().to_string(),
  };

  let window = DateWindow::ending_today(args.catalog.window_days)?;
  let endpoints = catalog.resolve(&window);

  let transport = HttpTransport::new().context("failed to create HTTP client")?;
  let config = RunConfig {
    timeout: Duration::from_secs(args.timeout),
    delay: Duration::from_millis(args.delay_ms),
  };
  let runner = Runner::new(Prober::new(transport), target, credentials, config);

  info!(
    endpoints = endpoints.len(),
    base_url = %context.base_url,
    "starting probe run"
  );

  let run = runner
    .run(&endpoints)
    .await
    .context("failed to resolve endpoint URLs")?;

  let rendered = render(
    &run.summary,
    &run.results,
    &catalog.known,
    &context,
    Utc::now(),
  );
  print!("{}", rendered.text);

  write_report(&args.output, &rendered.document)
    .await
    .context("failed to save report")?;
  info!(path = %args.output.display(), "results saved");

  Ok(run_status(&run.summary))
}

fn print_catalog(args: CatalogArgs) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  let catalog = rt.block_on(async { load_catalog(args.catalog.as_deref()).await })?;

  let endpoints = catalog.resolve(&DateWindow::ending_today(args.window_days)?);
  println!("{}", serde_json::to_string_pretty(&endpoints)?);

  Ok(())
}

fn print_discovered(dir: PathBuf, catalog: Option<PathBuf>) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    let catalog = load_catalog(catalog.as_deref()).await?;
    let discovered = discover(&dir, &catalog.covered_paths())
      .await
      .with_context(|| format!("failed to discover endpoints in {}", dir.display()))?;

    info!(count = discovered.len(), "discovered endpoints");
    println!("{}", serde_json::to_string_pretty(&discovered)?);

    Ok::<_, anyhow::Error>(())
  })
}

async fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
  let Some(path) = path else {
    return Catalog::builtin().context("built-in catalog is invalid");
  };

  let format = CatalogFormat::from_path(path)?;
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

  let catalog = Catalog::parse(&content, format)
    .with_context(|| format!("failed to parse catalog file: {}", path.display()))?;

  info!(
    endpoints = catalog.endpoints.len(),
    path = %path.display(),
    "loaded catalog"
  );

  Ok(catalog)
}

#[cfg(test)]
mod tests {
  use endprobe_config::Method;
  use endprobe_probe::{Outcome, ProbeResult};

  use super::*;

  fn result(name: &str, outcome: Outcome) -> ProbeResult {
    ProbeResult {
      endpoint_name: name.to_string(),
      method: Method::Get,
      url: format!("https://h/acme/{}", name),
      http_status: None,
      outcome,
      record_count: 0,
      total_available: None,
      error_detail: None,
      raw_response_shape: None,
    }
  }

  fn run_args(extra: &[&str]) -> RunArgs {
    let mut argv = vec!["endprobe", "run", "--base-url", "https://api.example.com/acme"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).unwrap().command {
      Commands::Run(args) => args,
      _ => panic!("expected the run command"),
    }
  }

  #[test]
  fn test_nothing_reachable_exits_one() {
    let summary = RunSummary::from_results(&[
      result("creditors", Outcome::Forbidden),
      result("bills", Outcome::Timeout),
    ]);
    assert_eq!(run_status(&summary), EXIT_NOTHING_REACHABLE);
    assert_eq!(run_status(&RunSummary::from_results(&[])), EXIT_NOTHING_REACHABLE);
  }

  #[test]
  fn test_one_success_exits_zero() {
    let summary = RunSummary::from_results(&[
      result("creditors", Outcome::Forbidden),
      result("customers", Outcome::Success),
    ]);
    assert_eq!(run_status(&summary), EXIT_SUCCESS);
  }

  #[test]
  fn test_command_status_passes_through() {
    assert_eq!(exit_status(Ok(EXIT_SUCCESS)), EXIT_SUCCESS);
    assert_eq!(exit_status(Ok(EXIT_NOTHING_REACHABLE)), EXIT_NOTHING_REACHABLE);
  }

  #[tokio::test]
  async fn test_missing_credentials_exit_two() {
    let args = run_args(&["--username", "reader", "--password", ""]);

    let result = run_async(args).await;
    let err = result.as_ref().unwrap_err();
    assert!(err.to_string().contains(PASSWORD_ENV));
    assert_eq!(exit_status(result), EXIT_CONFIG);
  }

  #[tokio::test]
  async fn test_bad_base_url_exits_two() {
    let mut args = run_args(&["--username", "reader", "--password", "pw"]);
    args.base_url = "https://api.example.com/acme?x=1".to_string();

    assert_eq!(exit_status(run_async(args).await), EXIT_CONFIG);
  }

  #[test]
  fn test_oversized_window_is_rejected_by_cli() {
    assert!(Cli::try_parse_from(["endprobe", "catalog", "--window-days", "99999"]).is_err());
    assert!(Cli::try_parse_from(["endprobe", "catalog", "--window-days", "365"]).is_ok());
  }
}
