use wgpu::{TextureFormat, TextureFormatFeatureFlags, TextureFormatFeatures, TextureUsages};

use crate::target::TargetDescriptor;

/// Intended use of a texture format, checked against the device's format table.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FormatUsage {
    /// Bound as a sampled texture.
    Sample,
    /// Sampled with linear filtering.
    Linear,
    /// Written as a color attachment.
    #[default]
    Render,
    /// Color attachment with blending.
    Blend,
    /// Bound as a storage texture.
    LoadStore,
    /// Multisampled color attachment with the given sample count.
    Msaa(u32),
}

impl FormatUsage {
    /// Returns `true` if a format with `features` can serve this usage.
    pub fn is_satisfied_by(self, features: &TextureFormatFeatures) -> bool {
        let usages = features.allowed_usages;
        let flags = features.flags;

        match self {
            FormatUsage::Sample => usages.contains(TextureUsages::TEXTURE_BINDING),
            FormatUsage::Linear => {
                usages.contains(TextureUsages::TEXTURE_BINDING)
                    && flags.contains(TextureFormatFeatureFlags::FILTERABLE)
            }
            FormatUsage::Render => usages.contains(TextureUsages::RENDER_ATTACHMENT),
            FormatUsage::Blend => {
                usages.contains(TextureUsages::RENDER_ATTACHMENT)
                    && flags.contains(TextureFormatFeatureFlags::BLENDABLE)
            }
            FormatUsage::LoadStore => usages.contains(TextureUsages::STORAGE_BINDING),
            FormatUsage::Msaa(count) => {
                usages.contains(TextureUsages::RENDER_ATTACHMENT)
                    && flags.sample_count_supported(count)
            }
        }
    }
}

/// Read-only view of what the current graphics device supports.
///
/// Implementations must not mutate anything observable; answers may change only
/// when the underlying device changes.
pub trait DeviceCaps {
    /// Returns a format the device supports for `usage` that can stand in for
    /// `requested`, or `None` if there is no such format.
    ///
    /// When `requested` itself is supported, it is returned unchanged.
    fn compatible_format(
        &self,
        requested: TextureFormat,
        usage: FormatUsage,
    ) -> Option<TextureFormat>;

    /// Returns `true` if `format` supports random-access read/write from shaders.
    fn supports_random_access(&self, format: TextureFormat) -> bool;

    /// Returns the highest sample count not above `descriptor.sample_count` that
    /// the device supports for the descriptor's format. Never less than 1.
    fn supported_msaa_sample_count(&self, descriptor: &TargetDescriptor) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(usages: TextureUsages, flags: TextureFormatFeatureFlags) -> TextureFormatFeatures {
        TextureFormatFeatures { allowed_usages: usages, flags }
    }

    #[test]
    fn default_usage_is_render() {
        assert_eq!(FormatUsage::default(), FormatUsage::Render);
    }

    #[test]
    fn linear_requires_filterable() {
        let f = features(TextureUsages::TEXTURE_BINDING, TextureFormatFeatureFlags::empty());
        assert!(FormatUsage::Sample.is_satisfied_by(&f));
        assert!(!FormatUsage::Linear.is_satisfied_by(&f));
    }

    #[test]
    fn blend_requires_attachment_and_blendable() {
        let f = features(TextureUsages::TEXTURE_BINDING, TextureFormatFeatureFlags::BLENDABLE);
        assert!(!FormatUsage::Blend.is_satisfied_by(&f));

        let f = features(TextureUsages::RENDER_ATTACHMENT, TextureFormatFeatureFlags::BLENDABLE);
        assert!(FormatUsage::Blend.is_satisfied_by(&f));
    }

    #[test]
    fn msaa_checks_sample_count_flag() {
        let f = features(
            TextureUsages::RENDER_ATTACHMENT,
            TextureFormatFeatureFlags::MULTISAMPLE_X4,
        );
        assert!(FormatUsage::Msaa(4).is_satisfied_by(&f));
        assert!(!FormatUsage::Msaa(8).is_satisfied_by(&f));
    }
}
