use thiserror::Error;

/// Configuration problems detected before any endpoint is probed.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// A credential was neither passed as a flag nor found in the environment.
  #[error("missing credential: pass --{flag} or set {env_var}")]
  MissingCredential {
    flag: &'static str,
    env_var: &'static str,
  },

  /// The base URL could not be parsed or uses an unsupported scheme.
  #[error("invalid base url '{url}': {message}")]
  InvalidBaseUrl { url: String, message: String },

  /// An endpoint (or the catalog default) names a root the catalog does not define.
  #[error("unknown api root '{root}' for endpoint '{endpoint}'")]
  UnknownRoot { endpoint: String, root: String },

  /// The date window reaches back past the earliest representable date.
  #[error("date window of {days} days is too large")]
  InvalidDateWindow { days: u32 },

  /// Two catalog entries share a name.
  #[error("duplicate endpoint name: {0}")]
  DuplicateEndpoint(String),

  /// The catalog file extension is neither JSON nor YAML.
  #[error("unsupported catalog format: {0}")]
  UnsupportedFormat(String),

  #[error("failed to parse catalog: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to parse catalog: {0}")]
  Yaml(#[from] serde_yaml::Error),
}
