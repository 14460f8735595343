use wgpu::TextureFormat;

use crate::device::{
    DEFAULT_FALLBACK_FORMAT, DeviceCaps, DiagnosticSink, FormatNegotiator, FormatUsage, LogSink,
};
use crate::features::{FeatureRegistry, FeatureToggle};
use crate::msaa::{ViewContext, msaa_sample_count};
use crate::target::{RenderTarget, RenderTargets, TargetDescriptor, TargetReference};

/// Configuration for a [`GfxContext`].
///
/// Keep this structure minimal. Add flags only when a concrete platform or
/// pipeline requirement exists.
#[derive(Debug, Clone)]
pub struct GfxConfig {
    /// Format substituted when negotiation fails.
    ///
    /// Must be broadly supported; half-float RGBA is the safest choice.
    pub fallback_format: TextureFormat,

    /// Verify random read/write support when a caller requires it.
    ///
    /// Some drivers misreport storage support; disabling this trusts the
    /// compatible format as-is.
    pub verify_random_access: bool,
}

impl Default for GfxConfig {
    fn default() -> Self {
        Self {
            fallback_format: DEFAULT_FALLBACK_FORMAT,
            verify_random_access: true,
        }
    }
}

/// Process-scoped graphics utility state.
///
/// Owns the capability query, the diagnostic sink, render-target handle
/// allocation and the feature snapshot buffer. Create one after the device is
/// available and call [`GfxContext::shutdown`] before the device goes away.
pub struct GfxContext {
    caps: Box<dyn DeviceCaps>,
    sink: Box<dyn DiagnosticSink>,
    negotiator: FormatNegotiator,
    targets: RenderTargets,
    toggle: FeatureToggle,
}

impl GfxContext {
    /// Creates a context reporting diagnostics through the `log` facade.
    pub fn new(caps: impl DeviceCaps + 'static, config: GfxConfig) -> Self {
        Self::with_sink(caps, LogSink, config)
    }

    pub fn with_sink(
        caps: impl DeviceCaps + 'static,
        sink: impl DiagnosticSink + 'static,
        config: GfxConfig,
    ) -> Self {
        log::debug!(
            "graphics context initialized (fallback {:?}, verify random access: {})",
            config.fallback_format,
            config.verify_random_access,
        );

        Self {
            caps: Box::new(caps),
            sink: Box::new(sink),
            negotiator: FormatNegotiator::new(config.fallback_format, config.verify_random_access),
            targets: RenderTargets::new(),
            toggle: FeatureToggle::new(),
        }
    }

    pub fn caps(&self) -> &dyn DeviceCaps {
        self.caps.as_ref()
    }

    pub fn negotiator(&self) -> &FormatNegotiator {
        &self.negotiator
    }

    /// Number of render-target handles created through this context.
    pub fn handles_created(&self) -> u64 {
        self.targets.handles_created()
    }

    /// See [`FormatNegotiator::resolve`].
    pub fn resolve_format(
        &self,
        requested: TextureFormat,
        usage: FormatUsage,
        require_random_access: bool,
    ) -> TextureFormat {
        self.negotiator.resolve(
            self.caps.as_ref(),
            self.sink.as_ref(),
            requested,
            usage,
            require_random_access,
        )
    }

    /// See [`RenderTargets::ensure_reference`].
    pub fn ensure_reference(&mut self, target: &mut Option<RenderTarget>) -> TargetReference {
        self.targets.ensure_reference(target)
    }

    /// See [`RenderTargets::ensure_allocated`].
    pub fn ensure_allocated<'t>(
        &mut self,
        target: &'t mut Option<RenderTarget>,
        descriptor: TargetDescriptor,
    ) -> &'t mut RenderTarget {
        self.targets.ensure_allocated(target, descriptor)
    }

    /// Sample count to allocate `descriptor` with for `view`.
    pub fn msaa_sample_count(&self, view: &ViewContext<'_>, descriptor: &TargetDescriptor) -> u32 {
        msaa_sample_count(view, descriptor, self.caps.as_ref())
    }

    /// Runs `body` with every feature of the camera's renderer suppressed.
    ///
    /// If the registry has no renderer for the camera, `body` runs with
    /// nothing suppressed.
    pub fn render_without_features<R>(
        &mut self,
        registry: &mut dyn FeatureRegistry,
        camera_renderer: Option<usize>,
        body: impl FnOnce() -> R,
    ) -> R {
        match registry.renderer_features_mut(camera_renderer) {
            Some(features) => self.toggle.run_suppressed(features, body),
            None => {
                log::warn!(
                    "no renderer for camera renderer index {camera_renderer:?}; rendering with features as-is"
                );
                body()
            }
        }
    }

    /// Tears the context down.
    ///
    /// Render targets stay owned by their callers and must be released there.
    pub fn shutdown(self) {
        debug_assert!(self.toggle.is_idle());
        log::debug!(
            "graphics context shut down after creating {} render target handles",
            self.targets.handles_created()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use wgpu::{TextureFormatFeatureFlags, TextureFormatFeatures, TextureUsages};

    use super::*;
    use crate::device::{AdapterCaps, CollectingSink, FormatDiagnostic};
    use crate::features::{NamedFeature, Renderer, RendererSet, is_feature_active};
    use crate::msaa::PipelineKind;

    fn caps() -> AdapterCaps {
        AdapterCaps::from_table(
            "stub",
            [(TextureFormat::Rgba16Float, TextureFormatFeatures {
                allowed_usages: TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
                flags: TextureFormatFeatureFlags::MULTISAMPLE_X4,
            })],
        )
    }

    #[test]
    fn resolve_reports_through_configured_sink() {
        let sink = Rc::new(CollectingSink::new());
        let ctx = GfxContext::with_sink(caps(), Rc::clone(&sink), GfxConfig::default());

        let format = ctx.resolve_format(TextureFormat::Rg8Unorm, FormatUsage::Render, false);

        assert_eq!(format, TextureFormat::Rgba16Float);
        assert_eq!(
            sink.entries(),
            vec![FormatDiagnostic::Unsupported { requested: TextureFormat::Rg8Unorm }]
        );
        ctx.shutdown();
    }

    #[test]
    fn targets_share_the_context_id_space() {
        let mut ctx = GfxContext::new(caps(), GfxConfig::default());
        let (mut a, mut b) = (None, None);

        let ra = ctx.ensure_reference(&mut a);
        let descriptor = TargetDescriptor::new(8, 8, TextureFormat::Rgba16Float);
        let target = ctx.ensure_allocated(&mut b, descriptor);

        assert!(!target.resolves(&ra));
        assert_eq!(ctx.handles_created(), 2);
    }

    #[test]
    fn sample_count_uses_context_caps() {
        let ctx = GfxContext::new(caps(), GfxConfig::default());
        let view = ViewContext {
            pipeline: PipelineKind::Legacy,
            allow_msaa: true,
            quality_samples: 8,
            ..Default::default()
        };

        let descriptor = TargetDescriptor::new(8, 8, TextureFormat::Rgba16Float);
        assert_eq!(ctx.msaa_sample_count(&view, &descriptor), 4);
    }

    #[test]
    fn render_without_features_restores_renderer() {
        let mut ctx = GfxContext::new(caps(), GfxConfig::default());
        let mut set = RendererSet::new(
            vec![Renderer::new("ocean")
                .with_feature(NamedFeature::new("ScreenSpaceAmbientOcclusion", true))
                .with_feature(NamedFeature::new("Decals", false))],
            0,
        );

        let rendered: Result<u32, String> = ctx.render_without_features(&mut set, None, || Ok(1));

        assert_eq!(rendered, Ok(1));
        assert!(is_feature_active(&set, None, "ScreenSpaceAmbientOcclusion"));
        assert!(!is_feature_active(&set, None, "Decals"));
    }

    #[test]
    fn render_without_features_tolerates_missing_renderer() {
        let mut ctx = GfxContext::new(caps(), GfxConfig::default());
        let mut set = RendererSet::default();

        assert_eq!(ctx.render_without_features(&mut set, Some(3), || 5), 5);
    }
}
