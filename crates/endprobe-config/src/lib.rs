//! Endprobe Config
//!
//! This crate contains the declarative inputs of a probe run: the endpoint
//! catalog, the API target the catalog is probed against, and the credentials
//! used to authenticate.
//!
//! A catalog can be loaded from:
//! - a JSON or YAML file (via CLI with `--catalog=endpoints.yaml`)
//! - the built-in catalog compiled into the binary
//!
//! Everything here is resolved once at process start. Endpoint specs are
//! immutable for the duration of a run.

mod catalog;
mod credentials;
mod dates;
mod endpoint;
mod error;
mod target;

pub use catalog::{Catalog, CatalogFormat};
pub use credentials::{Credentials, PASSWORD_ENV, USERNAME_ENV};
pub use dates::{DateParams, DateWindow};
pub use endpoint::{EndpointSpec, Method, ParamValue};
pub use error::ConfigError;
pub use target::ApiTarget;
