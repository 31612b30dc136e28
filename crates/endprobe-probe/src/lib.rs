//! Endprobe Probe
//!
//! Probes one endpoint with one request and turns whatever comes back
//! (a status code, a body, or a transport failure) into a [`ProbeResult`].
//!
//! Network I/O sits behind the [`Transport`] trait. [`HttpTransport`] is the
//! reqwest implementation used by the CLI; tests script their own.

mod error;
mod outcome;
mod prober;
mod records;
mod transport;

pub use error::TransportError;
pub use outcome::Outcome;
pub use prober::{ProbeResult, Prober};
pub use records::{RecordCount, count_records};
pub use transport::{HttpTransport, ProbeRequest, RawResponse, Transport, USER_AGENT};
