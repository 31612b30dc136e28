//! Integration tests for directory discovery.

use std::collections::HashSet;
use std::fs;

use endprobe_config::{Method, ParamValue};
use endprobe_discovery::{DiscoveryError, discover};

const CUSTOMERS_DOC: &str = r#"
openapi: 3.0.0
paths:
  /customers:
    get: {}
  /customer-types:
    get: {}
"#;

const BILLS_DOC: &str = r#"{"openapi": "3.0.0", "paths": {"/bills": {}, "/customer-types": {}}}"#;

#[tokio::test]
async fn test_discover_skips_covered_and_duplicates() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("a-customers.yaml"), CUSTOMERS_DOC).unwrap();
  fs::write(dir.path().join("b-bills.json"), BILLS_DOC).unwrap();

  let covered: HashSet<String> = ["/customers".to_string()].into_iter().collect();
  let endpoints = discover(dir.path(), &covered).await.unwrap();

  let names: Vec<_> = endpoints.iter().map(|e| e.name.as_str()).collect();
  assert_eq!(
    names,
    vec![
      "discovered_a-customers_/customer-types",
      "discovered_b-bills_/bills",
    ]
  );

  let first = &endpoints[0];
  assert_eq!(first.path, "/customer-types");
  assert_eq!(first.method, Method::Get);
  assert_eq!(first.params["limit"], ParamValue::Integer(1));
  assert_eq!(first.params["offset"], ParamValue::Integer(0));
  assert_eq!(first.root, None);
}

#[tokio::test]
async fn test_broken_documents_are_swallowed() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("broken.yaml"), "paths: {unclosed: [").unwrap();
  fs::write(dir.path().join("nopaths.yml"), "openapi: 3.0.0\n").unwrap();
  fs::write(dir.path().join("ok.yaml"), CUSTOMERS_DOC).unwrap();

  let endpoints = discover(dir.path(), &HashSet::new()).await.unwrap();

  assert_eq!(endpoints.len(), 2);
  assert!(endpoints.iter().all(|e| e.name.starts_with("discovered_ok_")));
}

#[tokio::test]
async fn test_other_files_are_ignored() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("notes.txt"), CUSTOMERS_DOC).unwrap();
  fs::create_dir(dir.path().join("nested.yaml")).unwrap();

  let endpoints = discover(dir.path(), &HashSet::new()).await.unwrap();
  assert!(endpoints.is_empty());
}

#[tokio::test]
async fn test_missing_directory_is_an_error() {
  let dir = tempfile::tempdir().unwrap();
  let missing = dir.path().join("does-not-exist");

  let err = discover(&missing, &HashSet::new()).await.unwrap_err();
  assert!(matches!(err, DiscoveryError::ReadDir { path, .. } if path == missing));
}
