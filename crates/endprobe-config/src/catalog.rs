use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dates::DateWindow;
use crate::endpoint::EndpointSpec;
use crate::error::ConfigError;

const BUILTIN_CATALOG: &str = include_str!("../catalog/default.json");

/// On-disk format of a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
  Json,
  Yaml,
}

impl CatalogFormat {
  /// Pick the format from a file extension.
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let ext = path
      .extension()
      .and_then(|e| e.to_str())
      .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
      Some("json") => Ok(CatalogFormat::Json),
      Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
      _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
  }
}

/// The declarative endpoint table a run iterates over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
  /// Named path prefixes between the base URL and endpoint paths,
  /// e.g. `"v1" -> "/public/api/v1"`.
  #[serde(default)]
  pub roots: BTreeMap<String, String>,

  /// Root used by endpoints that do not name one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default_root: Option<String>,

  /// Canonical names of endpoints the consumer already integrates.
  #[serde(default)]
  pub known: Vec<String>,

  pub endpoints: Vec<EndpointSpec>,
}

impl Catalog {
  /// The catalog compiled into the binary.
  pub fn builtin() -> Result<Self, ConfigError> {
    Self::parse(BUILTIN_CATALOG, CatalogFormat::Json)
  }

  /// Parse and validate a catalog document.
  pub fn parse(content: &str, format: CatalogFormat) -> Result<Self, ConfigError> {
    let catalog: Catalog = match format {
      CatalogFormat::Json => serde_json::from_str(content)?,
      CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    };
    catalog.validate()?;
    Ok(catalog)
  }

  /// Check that names are unique and that every referenced root exists.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(root) = &self.default_root
      && !self.roots.contains_key(root)
    {
      return Err(ConfigError::UnknownRoot {
        endpoint: "<default>".to_string(),
        root: root.clone(),
      });
    }

    let mut seen = HashSet::new();
    for endpoint in &self.endpoints {
      if !seen.insert(endpoint.name.as_str()) {
        return Err(ConfigError::DuplicateEndpoint(endpoint.name.clone()));
      }
      self.root_prefix(endpoint)?;
    }

    Ok(())
  }

  /// Path prefix for an endpoint: its own root, else the default root, else
  /// nothing.
  pub fn root_prefix(&self, endpoint: &EndpointSpec) -> Result<&str, ConfigError> {
    root_prefix(&self.roots, self.default_root.as_deref(), endpoint)
  }

  /// Endpoints with their date parameters filled in, in catalog order.
  pub fn resolve(&self, window: &DateWindow) -> Vec<EndpointSpec> {
    self
      .endpoints
      .iter()
      .map(|e| e.resolve_dates(window))
      .collect()
  }

  /// Append endpoints found elsewhere (e.g. discovery), keeping catalog order.
  pub fn extend(&mut self, endpoints: impl IntoIterator<Item = EndpointSpec>) {
    self.endpoints.extend(endpoints);
  }

  /// Full paths (root prefix + path) already covered by the catalog.
  pub fn covered_paths(&self) -> HashSet<String> {
    self
      .endpoints
      .iter()
      .flat_map(|e| {
        let prefix = self.root_prefix(e).unwrap_or_default();
        [e.path.clone(), format!("{}{}", prefix, e.path)]
      })
      .collect()
  }
}

pub(crate) fn root_prefix<'a>(
  roots: &'a BTreeMap<String, String>,
  default_root: Option<&str>,
  endpoint: &EndpointSpec,
) -> Result<&'a str, ConfigError> {
  let root = match endpoint.root.as_deref().or(default_root) {
    Some(root) => root,
    None => return Ok(""),
  };

  roots
    .get(root)
    .map(|prefix| prefix.as_str())
    .ok_or_else(|| ConfigError::UnknownRoot {
      endpoint: endpoint.name.clone(),
      root: root.to_string(),
    })
}
