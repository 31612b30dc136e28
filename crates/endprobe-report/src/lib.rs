//! Endprobe Report
//!
//! Turns a finished run into a console report and a JSON document.
//! Rendering is pure; [`write_report`] is the only I/O.

mod document;
mod error;
mod text;
mod write;

pub use document::{ReportDocument, RunContext};
pub use error::ReportError;
pub use text::{Rendered, render};
pub use write::{DEFAULT_REPORT_PATH, write_report};
