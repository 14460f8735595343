use std::collections::HashMap;

use wgpu::{TextureFormat, TextureFormatFeatureFlags, TextureFormatFeatures, TextureUsages};

use super::caps::{DeviceCaps, FormatUsage};
use crate::target::TargetDescriptor;

/// Formats whose capabilities are captured from an adapter.
///
/// Render-target formats only; compressed and depth formats are not negotiated.
pub const PROBED_FORMATS: &[TextureFormat] = &[
    TextureFormat::R8Unorm,
    TextureFormat::Rg8Unorm,
    TextureFormat::Rgba8Unorm,
    TextureFormat::Rgba8UnormSrgb,
    TextureFormat::Bgra8Unorm,
    TextureFormat::Bgra8UnormSrgb,
    TextureFormat::Rgb10a2Unorm,
    TextureFormat::Rg11b10Ufloat,
    TextureFormat::R16Float,
    TextureFormat::Rg16Float,
    TextureFormat::Rgba16Float,
    TextureFormat::R32Float,
    TextureFormat::Rg32Float,
    TextureFormat::Rgba32Float,
];

/// Sample counts tried from highest to lowest.
const SAMPLE_COUNTS: [u32; 4] = [16, 8, 4, 2];

/// Capability table built from a wgpu adapter.
///
/// The table is captured once; rebuild it after switching adapters.
#[derive(Debug, Clone, Default)]
pub struct AdapterCaps {
    /// Adapter name as reported by the driver.
    name: String,

    /// Per-format features. Formats missing from the table are unsupported.
    formats: HashMap<TextureFormat, TextureFormatFeatures>,
}

impl AdapterCaps {
    /// Captures the features of every format in [`PROBED_FORMATS`].
    pub fn from_adapter(adapter: &wgpu::Adapter) -> Self {
        let name = adapter.get_info().name;
        let formats = PROBED_FORMATS
            .iter()
            .map(|&f| (f, adapter.get_texture_format_features(f)))
            .collect::<HashMap<_, _>>();

        log::debug!("captured {} format entries for adapter {name:?}", formats.len());

        Self { name, formats }
    }

    /// Builds a table from explicit entries.
    ///
    /// Used for tooling and tests where no adapter is available.
    pub fn from_table(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (TextureFormat, TextureFormatFeatures)>,
    ) -> Self {
        Self {
            name: name.into(),
            formats: entries.into_iter().collect(),
        }
    }

    /// Adapter name as reported by the driver.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the captured features for `format`, if it was probed and reported.
    pub fn features(&self, format: TextureFormat) -> Option<&TextureFormatFeatures> {
        self.formats.get(&format)
    }

    fn supports(&self, format: TextureFormat, usage: FormatUsage) -> bool {
        self.formats
            .get(&format)
            .is_some_and(|f| !f.allowed_usages.is_empty() && usage.is_satisfied_by(f))
    }
}

impl DeviceCaps for AdapterCaps {
    fn compatible_format(
        &self,
        requested: TextureFormat,
        usage: FormatUsage,
    ) -> Option<TextureFormat> {
        if self.supports(requested, usage) {
            return Some(requested);
        }

        compatible_alternatives(requested)
            .iter()
            .copied()
            .find(|&f| self.supports(f, usage))
    }

    fn supports_random_access(&self, format: TextureFormat) -> bool {
        self.formats.get(&format).is_some_and(|f| {
            f.allowed_usages.contains(TextureUsages::STORAGE_BINDING)
                && f.flags.contains(TextureFormatFeatureFlags::STORAGE_READ_WRITE)
        })
    }

    fn supported_msaa_sample_count(&self, descriptor: &TargetDescriptor) -> u32 {
        let Some(features) = self.formats.get(&descriptor.format) else {
            return 1;
        };

        if !features.allowed_usages.contains(TextureUsages::RENDER_ATTACHMENT) {
            return 1;
        }

        SAMPLE_COUNTS
            .into_iter()
            .find(|&n| n <= descriptor.sample_count && features.flags.sample_count_supported(n))
            .unwrap_or(1)
    }
}

/// Formats that can stand in for `format`, in order of preference.
///
/// Substitutes keep the channel layout and never lose precision or range.
fn compatible_alternatives(format: TextureFormat) -> &'static [TextureFormat] {
    use TextureFormat as F;

    match format {
        F::R8Unorm => &[F::Rg8Unorm, F::Rgba8Unorm],
        F::Rg8Unorm => &[F::Rgba8Unorm],
        F::Rgba8Unorm => &[F::Bgra8Unorm],
        F::Bgra8Unorm => &[F::Rgba8Unorm],
        F::Rgba8UnormSrgb => &[F::Bgra8UnormSrgb],
        F::Bgra8UnormSrgb => &[F::Rgba8UnormSrgb],
        F::Rgb10a2Unorm => &[F::Rgba16Float],
        F::Rg11b10Ufloat => &[F::Rgba16Float, F::Rgba32Float],
        F::R16Float => &[F::Rg16Float, F::R32Float, F::Rgba16Float],
        F::Rg16Float => &[F::Rg32Float, F::Rgba16Float],
        F::Rgba16Float => &[F::Rgba32Float],
        F::R32Float => &[F::Rg32Float, F::Rgba32Float],
        F::Rg32Float => &[F::Rgba32Float],
        _ => &[],
    }
}

/// Returns `true` for Intel GPUs, matched on the adapter name.
pub fn is_intel_gpu(adapter_name: &str) -> bool {
    adapter_name.to_lowercase().contains("intel")
}
