use wgpu::TextureFormat;

use super::caps::{DeviceCaps, FormatUsage};
use super::diagnostics::{DiagnosticSink, FormatDiagnostic};

/// Broadly supported format used when negotiation fails.
///
/// Half-float RGBA is renderable, filterable and storage-capable on nearly
/// every backend.
pub const DEFAULT_FALLBACK_FORMAT: TextureFormat = TextureFormat::Rgba16Float;

/// Resolves requested texture formats to formats the device supports.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FormatNegotiator {
    /// Substituted when the requested format cannot be used.
    pub fallback: TextureFormat,

    /// Check random read/write support when the caller requires it.
    pub verify_random_access: bool,
}

impl Default for FormatNegotiator {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_FORMAT,
            verify_random_access: true,
        }
    }
}

impl FormatNegotiator {
    pub fn new(fallback: TextureFormat, verify_random_access: bool) -> Self {
        Self {
            fallback,
            verify_random_access,
        }
    }

    /// Returns a device-compatible format for `requested`.
    ///
    /// Never fails: an unsupported request degrades to the fallback, and an
    /// unsupported fallback degrades to the device's best answer. Every
    /// degradation is reported to `sink`.
    pub fn resolve(
        &self,
        caps: &dyn DeviceCaps,
        sink: &dyn DiagnosticSink,
        requested: TextureFormat,
        usage: FormatUsage,
        require_random_access: bool,
    ) -> TextureFormat {
        let mut use_fallback = false;
        let compatible = caps.compatible_format(requested, usage);

        match compatible {
            None => {
                sink.report(FormatDiagnostic::Unsupported { requested });
                use_fallback = true;
            }
            Some(resolved) if resolved != requested => {
                sink.report(FormatDiagnostic::Substituted { requested, resolved });
            }
            Some(_) => {}
        }

        // Best effort when nothing else applies.
        let resolved = compatible.unwrap_or(requested);

        if self.verify_random_access
            && require_random_access
            && !use_fallback
            && !caps.supports_random_access(resolved)
        {
            sink.report(FormatDiagnostic::NoRandomAccess { format: resolved });
            use_fallback = true;
        }

        // Substituting the fallback for itself would hide the failure.
        if use_fallback && requested == self.fallback {
            sink.report(FormatDiagnostic::FallbackUnsupported {
                fallback: self.fallback,
            });
            use_fallback = false;
        }

        if use_fallback { self.fallback } else { resolved }
    }
}
