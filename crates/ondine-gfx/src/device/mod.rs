//! Device capability queries and format negotiation.
//!
//! This module is responsible for:
//! - the `DeviceCaps` contract consumed by every other component
//! - a wgpu-backed capability table (`AdapterCaps`)
//! - resolving requested texture formats to device-compatible ones
//! - reporting negotiation outcomes through a `DiagnosticSink`

mod adapter;
mod caps;
mod diagnostics;
mod format;

pub use adapter::{AdapterCaps, PROBED_FORMATS, is_intel_gpu};
pub use caps::{DeviceCaps, FormatUsage};
pub use diagnostics::{CollectingSink, DiagnosticSink, FormatDiagnostic, LogSink, Severity};
pub use format::{DEFAULT_FALLBACK_FORMAT, FormatNegotiator};
