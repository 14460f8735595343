use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wgpu::TextureFormat;

/// How loudly a diagnostic should be surfaced.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Info,
    Warning,
}

/// Outcome reported during format negotiation.
///
/// None of these are failures of the caller's operation; negotiation always
/// produces a format.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum FormatDiagnostic {
    /// The device has no compatible format for the request.
    #[error("the graphics device does not support the texture format {requested:?}; will attempt to use fallback")]
    Unsupported { requested: TextureFormat },

    /// The device answered with a different, compatible format.
    #[error("using texture format {resolved:?} instead of {requested:?}")]
    Substituted {
        requested: TextureFormat,
        resolved: TextureFormat,
    },

    /// The format is usable but not with random read/write access.
    #[error("the graphics device does not support the texture format {format:?} with random read/write; will attempt to use fallback")]
    NoRandomAccess { format: TextureFormat },

    /// The fallback itself was requested and is not supported.
    #[error("fallback texture format {fallback:?} is not supported on this device")]
    FallbackUnsupported { fallback: TextureFormat },
}

impl FormatDiagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            FormatDiagnostic::Substituted { .. } => Severity::Info,
            FormatDiagnostic::Unsupported { .. }
            | FormatDiagnostic::NoRandomAccess { .. }
            | FormatDiagnostic::FallbackUnsupported { .. } => Severity::Warning,
        }
    }
}

/// Write-only channel for negotiation diagnostics.
///
/// Implementations must not block.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: FormatDiagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: FormatDiagnostic) {
        match diagnostic.severity() {
            Severity::Info => log::info!("{diagnostic}"),
            Severity::Warning => log::warn!("{diagnostic}"),
        }
    }
}

/// Records diagnostics in memory, in report order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: RefCell<Vec<FormatDiagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    pub fn entries(&self) -> Vec<FormatDiagnostic> {
        self.entries.borrow().clone()
    }

    /// Removes and returns everything reported so far.
    pub fn take(&self) -> Vec<FormatDiagnostic> {
        self.entries.take()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: FormatDiagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: FormatDiagnostic) {
        (**self).report(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Rc<S> {
    fn report(&self, diagnostic: FormatDiagnostic) {
        (**self).report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_is_informational() {
        let d = FormatDiagnostic::Substituted {
            requested: TextureFormat::Rg11b10Ufloat,
            resolved: TextureFormat::Rgba16Float,
        };
        assert_eq!(d.severity(), Severity::Info);
        assert_eq!(d.to_string(), "using texture format Rgba16Float instead of Rg11b10Ufloat");
    }

    #[test]
    fn fallback_failure_is_a_warning() {
        let d = FormatDiagnostic::FallbackUnsupported { fallback: TextureFormat::Rgba16Float };
        assert_eq!(d.severity(), Severity::Warning);
    }

    #[test]
    fn collecting_sink_keeps_order_and_drains() {
        let sink = CollectingSink::new();
        sink.report(FormatDiagnostic::Unsupported { requested: TextureFormat::R8Unorm });
        sink.report(FormatDiagnostic::NoRandomAccess { format: TextureFormat::Rgba8Unorm });

        assert_eq!(sink.len(), 2);
        let taken = sink.take();
        assert!(matches!(taken[0], FormatDiagnostic::Unsupported { .. }));
        assert!(matches!(taken[1], FormatDiagnostic::NoRandomAccess { .. }));
        assert!(sink.is_empty());
    }
}
