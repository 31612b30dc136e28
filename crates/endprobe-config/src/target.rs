use std::collections::BTreeMap;

use url::Url;

use crate::catalog::{Catalog, root_prefix};
use crate::endpoint::EndpointSpec;
use crate::error::ConfigError;

/// The API instance a catalog is probed against.
///
/// Combines the operator-supplied base URL (`https://<host>/<subdomain>`)
/// with the catalog's root prefixes.
#[derive(Debug, Clone)]
pub struct ApiTarget {
  base_url: String,
  subdomain: Option<String>,
  roots: BTreeMap<String, String>,
  default_root: Option<String>,
}

impl ApiTarget {
  pub fn new(base_url: &str, catalog: &Catalog) -> Result<Self, ConfigError> {
    let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
      url: base_url.to_string(),
      message: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
      return Err(ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        message: format!("unsupported scheme '{}'", parsed.scheme()),
      });
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
      return Err(ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        message: "query string and fragment are not allowed".to_string(),
      });
    }

    let subdomain = parsed
      .path_segments()
      .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
      .map(|s| s.to_string());

    Ok(Self {
      base_url: parsed.as_str().trim_end_matches('/').to_string(),
      subdomain,
      roots: catalog.roots.clone(),
      default_root: catalog.default_root.clone(),
    })
  }

  /// Base URL without a trailing slash.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Last path segment of the base URL, which names the tenant.
  pub fn subdomain(&self) -> Option<&str> {
    self.subdomain.as_deref()
  }

  /// Base URL an endpoint's path is appended to.
  pub fn endpoint_base(&self, endpoint: &EndpointSpec) -> Result<String, ConfigError> {
    let prefix = root_prefix(&self.roots, self.default_root.as_deref(), endpoint)?;
    Ok(format!("{}{}", self.base_url, prefix.trim_end_matches('/')))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::CatalogFormat;

  fn catalog() -> Catalog {
    Catalog::parse(
      r#"{
        "roots": {"v1": "/public/api/v1", "bulk": "/public/api/bulk-data/v1/"},
        "default_root": "v1",
        "endpoints": []
      }"#,
      CatalogFormat::Json,
    )
    .unwrap()
  }

  #[test]
  fn test_endpoint_base_uses_default_root() {
    let target = ApiTarget::new("https://api.example.com/acme/", &catalog()).unwrap();
    let base = target
      .endpoint_base(&EndpointSpec::get("customers", "/customers"))
      .unwrap();
    assert_eq!(base, "https://api.example.com/acme/public/api/v1");
  }

  #[test]
  fn test_endpoint_base_uses_named_root() {
    let target = ApiTarget::new("https://api.example.com/acme", &catalog()).unwrap();
    let base = target
      .endpoint_base(&EndpointSpec::get("income", "/income").with_root("bulk"))
      .unwrap();
    assert_eq!(base, "https://api.example.com/acme/public/api/bulk-data/v1");
  }

  #[test]
  fn test_unknown_root() {
    let target = ApiTarget::new("https://api.example.com/acme", &catalog()).unwrap();
    let err = target
      .endpoint_base(&EndpointSpec::get("x", "/x").with_root("v2"))
      .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRoot { .. }));
  }

  #[test]
  fn test_subdomain_is_last_segment() {
    let target = ApiTarget::new("https://api.example.com/acme/", &catalog()).unwrap();
    assert_eq!(target.subdomain(), Some("acme"));
    assert_eq!(target.base_url(), "https://api.example.com/acme");

    let bare = ApiTarget::new("https://acme.example.com", &catalog()).unwrap();
    assert_eq!(bare.subdomain(), None);
    assert_eq!(bare.base_url(), "https://acme.example.com");
  }

  #[test]
  fn test_rejects_bad_urls() {
    assert!(matches!(
      ApiTarget::new("not a url", &catalog()),
      Err(ConfigError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
      ApiTarget::new("ftp://example.com/acme", &catalog()),
      Err(ConfigError::InvalidBaseUrl { .. })
    ));
  }

  #[test]
  fn test_rejects_query_and_fragment() {
    for url in [
      "https://h/acme?x=1",
      "https://h/acme#top",
      "https://h/acme?",
    ] {
      assert!(
        matches!(
          ApiTarget::new(url, &catalog()),
          Err(ConfigError::InvalidBaseUrl { .. })
        ),
        "{}",
        url
      );
    }
  }
}
