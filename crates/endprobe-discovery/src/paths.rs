use serde_yaml::Value;

/// Declared path templates of an API description document, in document order.
///
/// Looks at the keys of the top-level `paths` mapping. JSON documents are
/// valid YAML, so both go through the YAML parser. Anything unparsable, or a
/// document without `paths`, yields an empty list.
pub fn extract_paths(content: &str) -> Vec<String> {
  let document: Value = match serde_yaml::from_str(content) {
    Ok(document) => document,
    Err(_) => return Vec::new(),
  };

  match document.get("paths") {
    Some(Value::Mapping(paths)) => paths
      .keys()
      .filter_map(|k| k.as_str())
      .map(|k| k.to_string())
      .collect(),
    _ => Vec::new(),
  }
}
