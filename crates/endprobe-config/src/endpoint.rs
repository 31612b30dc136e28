use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dates::{DateParams, DateWindow};

/// HTTP method used to probe an endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
  #[default]
  Get,
  Post,
}

impl Method {
  pub fn as_str(&self) -> &'static str {
    match self {
      Method::Get => "GET",
      Method::Post => "POST",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A scalar request parameter.
///
/// Sent as its plain text form in query strings and as a JSON scalar in
/// POST bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
  Bool(bool),
  Integer(i64),
  Float(f64),
  Text(String),
}

impl ParamValue {
  pub fn to_json(&self) -> serde_json::Value {
    match self {
      ParamValue::Bool(b) => serde_json::Value::Bool(*b),
      ParamValue::Integer(i) => serde_json::Value::from(*i),
      ParamValue::Float(f) => serde_json::Value::from(*f),
      ParamValue::Text(s) => serde_json::Value::String(s.clone()),
    }
  }
}

impl fmt::Display for ParamValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParamValue::Bool(b) => write!(f, "{}", b),
      ParamValue::Integer(i) => write!(f, "{}", i),
      ParamValue::Float(v) => write!(f, "{}", v),
      ParamValue::Text(s) => f.write_str(s),
    }
  }
}

impl From<&str> for ParamValue {
  fn from(value: &str) -> Self {
    ParamValue::Text(value.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(value: String) -> Self {
    ParamValue::Text(value)
  }
}

impl From<i64> for ParamValue {
  fn from(value: i64) -> Self {
    ParamValue::Integer(value)
  }
}

impl From<i32> for ParamValue {
  fn from(value: i32) -> Self {
    ParamValue::Integer(value.into())
  }
}

impl From<bool> for ParamValue {
  fn from(value: bool) -> Self {
    ParamValue::Bool(value)
  }
}

impl From<f64> for ParamValue {
  fn from(value: f64) -> Self {
    ParamValue::Float(value)
  }
}

/// Static description of one API resource to probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
  /// Display name, unique within a catalog.
  pub name: String,

  /// Resource path appended to the API root, e.g. "/customers".
  pub path: String,

  #[serde(default)]
  pub method: Method,

  /// Query parameters (GET) or body fields (POST).
  #[serde(default)]
  pub params: BTreeMap<String, ParamValue>,

  /// Named API root this path lives under. Falls back to the catalog default.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub root: Option<String>,

  /// Date parameters filled in from the run's date window.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_range: Option<DateParams>,
}

impl EndpointSpec {
  /// A GET endpoint with no parameters under the default root.
  pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      path: path.into(),
      method: Method::Get,
      params: BTreeMap::new(),
      root: None,
      date_range: None,
    }
  }

  /// A POST endpoint with no parameters under the default root.
  pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      method: Method::Post,
      ..Self::get(name, path)
    }
  }

  pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
    self.params.insert(key.into(), value.into());
    self
  }

  pub fn with_root(mut self, root: impl Into<String>) -> Self {
    self.root = Some(root.into());
    self
  }

  pub fn with_date_range(mut self, dates: DateParams) -> Self {
    self.date_range = Some(dates);
    self
  }

  /// Returns a copy with the date parameters merged into `params`.
  ///
  /// Date values override static params of the same name. The returned spec
  /// has no `date_range` left, so resolving twice is a no-op.
  pub fn resolve_dates(&self, window: &DateWindow) -> Self {
    let mut resolved = self.clone();
    if let Some(dates) = resolved.date_range.take() {
      for (key, value) in dates.resolve(window) {
        resolved.params.insert(key, value);
      }
    }
    resolved
  }

  /// Parameters rendered as query-string pairs.
  pub fn query_pairs(&self) -> Vec<(String, String)> {
    self
      .params
      .iter()
      .map(|(k, v)| (k.clone(), v.to_string()))
      .collect()
  }

  /// Parameters rendered as a JSON object for request bodies.
  pub fn json_body(&self) -> serde_json::Value {
    let body: serde_json::Map<String, serde_json::Value> = self
      .params
      .iter()
      .map(|(k, v)| (k.clone(), v.to_json()))
      .collect();
    serde_json::Value::Object(body)
  }
}
