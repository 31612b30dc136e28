//! Best-effort record counting over heterogeneous JSON response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys that commonly hold the page of records, in lookup order.
const LIST_KEYS: [&str; 5] = ["results", "items", "data", "records", "content"];

/// How many keys an unrecognized object lists in its shape label.
const SHAPE_KEY_LIMIT: usize = 5;

/// Result of sniffing a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCount {
  /// Number of records on the returned page.
  pub count: u64,
  /// Human-readable description of the body's shape.
  pub shape: String,
  /// Total the server reports across all pages, when it says so.
  pub total_available: Option<u64>,
}

/// Count the records in a parsed response body.
///
/// - arrays count their elements;
/// - objects holding a list under one of [`LIST_KEYS`] count that list;
/// - any other object counts as one record, or zero when empty;
/// - scalars count as zero.
///
/// Never fails; an unexpected shape only degrades the count.
pub fn count_records(body: &Value) -> RecordCount {
  match body {
    Value::Array(items) => RecordCount {
      count: items.len() as u64,
      shape: "array".to_string(),
      total_available: None,
    },
    Value::Object(map) => {
      for key in LIST_KEYS {
        if let Some(Value::Array(items)) = map.get(key) {
          let shape = if map.len() > 1 {
            format!("{} + metadata", key)
          } else {
            key.to_string()
          };
          let total_available = map
            .get("resultSetMetadata")
            .and_then(|meta| meta.get("count"))
            .and_then(Value::as_u64);

          return RecordCount {
            count: items.len() as u64,
            shape,
            total_available,
          };
        }
      }

      let keys: Vec<&str> = map
        .keys()
        .take(SHAPE_KEY_LIMIT)
        .map(|k| k.as_str())
        .collect();

      RecordCount {
        count: if map.is_empty() { 0 } else { 1 },
        shape: format!("object with keys: {}", keys.join(", ")),
        total_available: None,
      }
    }
    _ => RecordCount {
      count: 0,
      shape: "scalar".to_string(),
      total_available: None,
    },
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_results_with_metadata() {
    let body = json!({
      "results": [{"id": 1}, {"id": 2}],
      "resultSetMetadata": {"count": 2, "offset": 0, "limit": 5}
    });
    let counted = count_records(&body);
    assert_eq!(counted.count, 2);
    assert_eq!(counted.shape, "results + metadata");
    assert_eq!(counted.total_available, Some(2));
  }

  #[test]
  fn test_array() {
    let counted = count_records(&json!([{"a": 1}, {"a": 2}, {"a": 3}]));
    assert_eq!(counted.count, 3);
    assert_eq!(counted.shape, "array");
  }

  #[test]
  fn test_plain_object_is_one_record() {
    let counted = count_records(&json!({"foo": "bar"}));
    assert_eq!(counted.count, 1);
    assert_eq!(counted.shape, "object with keys: foo");
  }

  #[test]
  fn test_empty_object_is_zero_records() {
    let counted = count_records(&json!({}));
    assert_eq!(counted.count, 0);
    assert_eq!(counted.shape, "object with keys: ");
  }

  #[test]
  fn test_list_key_without_siblings() {
    let counted = count_records(&json!({"records": [1, 2]}));
    assert_eq!(counted.count, 2);
    assert_eq!(counted.shape, "records");
    assert_eq!(counted.total_available, None);
  }

  #[test]
  fn test_priority_order() {
    let counted = count_records(&json!({"data": [1], "items": [1, 2, 3]}));
    assert_eq!(counted.count, 3);
    assert_eq!(counted.shape, "items + metadata");
  }

  #[test]
  fn test_non_list_value_under_list_key_is_skipped() {
    let counted = count_records(&json!({"data": {"nested": true}, "content": [1, 2]}));
    assert_eq!(counted.count, 2);
    assert_eq!(counted.shape, "content + metadata");
  }

  #[test]
  fn test_object_shape_lists_first_keys_in_document_order() {
    let body: Value =
      serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3, "b": 4, "c": 5, "d": 6}"#).unwrap();
    let counted = count_records(&body);
    assert_eq!(counted.count, 1);
    assert_eq!(counted.shape, "object with keys: zeta, alpha, mid, b, c");
  }

  #[test]
  fn test_scalars_count_zero() {
    for body in [json!(null), json!(true), json!(42), json!("text")] {
      let counted = count_records(&body);
      assert_eq!(counted.count, 0);
      assert_eq!(counted.shape, "scalar");
    }
  }

  #[test]
  fn test_idempotent() {
    let body = json!({"items": [1, 2], "page": 1});
    assert_eq!(count_records(&body), count_records(&body));
  }
}
