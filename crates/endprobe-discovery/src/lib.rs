//! Endprobe Discovery
//!
//! Reads a directory of API description documents (OpenAPI-style, YAML or
//! JSON) and turns every declared path that the catalog does not already
//! cover into an extra GET endpoint to probe.
//!
//! Discovery is supplementary input. A document that cannot be read or
//! parsed contributes nothing; only an unreadable directory is an error.

mod discover;
mod error;
mod paths;

pub use discover::{DISCOVERED_PREFIX, discover};
pub use error::DiscoveryError;
pub use paths::extract_paths;
