use crate::device::DeviceCaps;
use crate::target::TargetDescriptor;

/// Name prefix the host gives game-view preview cameras.
pub const PREVIEW_CAMERA_PREFIX: &str = "Preview";

/// Sample count resolved by a pipeline for one view.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum MsaaSamples {
    #[default]
    None,
    X2,
    X4,
    X8,
}

impl MsaaSamples {
    pub fn count(self) -> u32 {
        match self {
            MsaaSamples::None => 1,
            MsaaSamples::X2 => 2,
            MsaaSamples::X4 => 4,
            MsaaSamples::X8 => 8,
        }
    }
}

/// Host render pipeline driving the view.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PipelineKind {
    /// Built-in forward/deferred pipeline.
    #[default]
    Legacy,

    /// Universal pipeline.
    Universal {
        /// The camera's active renderer lists MSAA as a supported feature.
        renderer_supports_msaa: bool,
    },

    /// High-definition pipeline. Its per-view settings are authoritative.
    HighDefinition {
        /// Sample count resolved by the pipeline's per-view frame settings.
        resolved_samples: MsaaSamples,

        /// The active platform settings enable motion vectors.
        supports_motion_vectors: bool,
    },
}

/// Role of the camera rendering the view.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CameraKind {
    #[default]
    Game,
    SceneView,
    Preview,
    Reflection,
    Other,
}

/// Everything the MSAA policy reads about one view.
#[derive(Debug, Copy, Clone, Default)]
pub struct ViewContext<'a> {
    pub pipeline: PipelineKind,
    pub camera: CameraKind,
    pub camera_name: &'a str,

    /// The camera's own allow-MSAA flag.
    pub allow_msaa: bool,

    /// The view is driven by an XR device.
    pub xr_active: bool,

    /// Anti-aliasing sample count from quality settings. Zero means disabled.
    pub quality_samples: u32,

    /// An interactive editing session is running.
    pub interactive_editing: bool,
}

/// Returns `true` for the editor's game-view preview camera.
pub fn is_preview_of_game_camera(camera: CameraKind, name: &str) -> bool {
    camera == CameraKind::Game && name.starts_with(PREVIEW_CAMERA_PREFIX)
}

/// Decides whether MSAA should be enabled for `view`.
///
/// The checks layer in a fixed order; see the inline notes.
pub fn should_enable_msaa(view: &ViewContext<'_>) -> bool {
    let mut msaa = match view.pipeline {
        PipelineKind::HighDefinition { resolved_samples, .. } => {
            return resolved_samples != MsaaSamples::None;
        }
        PipelineKind::Legacy | PipelineKind::Universal { .. } => view.allow_msaa,
    };

    // XR renders every view with the same MSAA setting.
    if matches!(view.pipeline, PipelineKind::Universal { .. }) {
        msaa |= view.xr_active;
    }

    // Game view preview ignores the camera flag.
    if view.interactive_editing {
        msaa |= is_preview_of_game_camera(view.camera, view.camera_name);
    }

    // Scene view never supports MSAA.
    msaa &= view.camera != CameraKind::SceneView;

    // Must stay last so the renderer can veto everything above.
    if let PipelineKind::Universal { renderer_supports_msaa } = view.pipeline {
        msaa &= renderer_supports_msaa;
    }

    // Quality samples may be zero.
    (if msaa { view.quality_samples } else { 1 }) > 1
}

/// Returns the sample count to allocate `descriptor` with for `view`.
///
/// The request is the quality sample count when MSAA is enabled, clamped to
/// what the device supports for the descriptor's format.
pub fn msaa_sample_count(
    view: &ViewContext<'_>,
    descriptor: &TargetDescriptor,
    caps: &dyn DeviceCaps,
) -> u32 {
    let requested = if should_enable_msaa(view) {
        view.quality_samples.max(1)
    } else {
        1
    };

    caps.supported_msaa_sample_count(&TargetDescriptor {
        sample_count: requested,
        ..*descriptor
    })
}

/// Returns `true` if the pipeline renders motion vectors.
pub fn motion_vectors_enabled(pipeline: &PipelineKind) -> bool {
    match pipeline {
        PipelineKind::HighDefinition {
            supports_motion_vectors, ..
        } => *supports_motion_vectors,
        PipelineKind::Legacy | PipelineKind::Universal { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use wgpu::{TextureFormat, TextureFormatFeatureFlags, TextureFormatFeatures, TextureUsages};

    use super::*;
    use crate::device::AdapterCaps;

    fn universal(renderer_supports_msaa: bool) -> PipelineKind {
        PipelineKind::Universal { renderer_supports_msaa }
    }

    fn hdrp(resolved_samples: MsaaSamples) -> PipelineKind {
        PipelineKind::HighDefinition {
            resolved_samples,
            supports_motion_vectors: false,
        }
    }

    fn view(
        pipeline: PipelineKind,
        allow_msaa: bool,
        quality_samples: u32,
    ) -> ViewContext<'static> {
        ViewContext {
            pipeline,
            allow_msaa,
            quality_samples,
            ..Default::default()
        }
    }

    // ── high definition ───────────────────────────────────────────────────

    #[test]
    fn hdrp_uses_only_resolved_samples() {
        for allow in [false, true] {
            for quality in [0, 1, 8] {
                assert!(should_enable_msaa(&view(hdrp(MsaaSamples::X4), allow, quality)));
                assert!(!should_enable_msaa(&view(hdrp(MsaaSamples::None), allow, quality)));
            }
        }
    }

    #[test]
    fn hdrp_ignores_scene_view() {
        let v = ViewContext {
            camera: CameraKind::SceneView,
            interactive_editing: true,
            ..view(hdrp(MsaaSamples::X2), false, 0)
        };
        assert!(should_enable_msaa(&v));
    }

    // ── camera flag and quality ───────────────────────────────────────────

    #[test]
    fn legacy_follows_camera_flag() {
        assert!(should_enable_msaa(&view(PipelineKind::Legacy, true, 4)));
        assert!(!should_enable_msaa(&view(PipelineKind::Legacy, false, 4)));
    }

    #[test]
    fn low_quality_samples_disable() {
        assert!(!should_enable_msaa(&view(PipelineKind::Legacy, true, 0)));
        assert!(!should_enable_msaa(&view(PipelineKind::Legacy, true, 1)));
        assert!(should_enable_msaa(&view(PipelineKind::Legacy, true, 2)));
    }

    // ── editor overrides ──────────────────────────────────────────────────

    #[test]
    fn scene_view_never_enables() {
        let v = ViewContext {
            camera: CameraKind::SceneView,
            ..view(PipelineKind::Legacy, true, 8)
        };
        assert!(!should_enable_msaa(&v));

        let v = ViewContext {
            interactive_editing: true,
            ..v
        };
        assert!(!should_enable_msaa(&v));
    }

    #[test]
    fn preview_camera_forces_msaa_when_editing() {
        let v = ViewContext {
            camera: CameraKind::Game,
            camera_name: "Preview Camera",
            interactive_editing: true,
            ..view(PipelineKind::Legacy, false, 4)
        };
        assert!(should_enable_msaa(&v));

        let v = ViewContext {
            interactive_editing: false,
            ..v
        };
        assert!(!should_enable_msaa(&v));
    }

    #[test]
    fn preview_detection_needs_game_kind_and_prefix() {
        assert!(is_preview_of_game_camera(CameraKind::Game, "Preview"));
        assert!(!is_preview_of_game_camera(CameraKind::Game, "Main Camera"));
        assert!(!is_preview_of_game_camera(CameraKind::Game, "preview"));
        assert!(!is_preview_of_game_camera(CameraKind::Preview, "Preview"));
    }

    // ── universal ─────────────────────────────────────────────────────────

    #[test]
    fn universal_xr_forces_msaa_unless_renderer_vetoes() {
        let v = ViewContext {
            xr_active: true,
            ..view(universal(true), false, 4)
        };
        assert!(should_enable_msaa(&v));

        let v = ViewContext {
            pipeline: universal(false),
            ..v
        };
        assert!(!should_enable_msaa(&v));
    }

    #[test]
    fn xr_forcing_does_not_survive_scene_view() {
        let v = ViewContext {
            camera: CameraKind::SceneView,
            xr_active: true,
            ..view(universal(true), false, 4)
        };
        assert!(!should_enable_msaa(&v));
    }

    #[test]
    fn xr_flag_is_ignored_outside_universal() {
        let v = ViewContext {
            xr_active: true,
            ..view(PipelineKind::Legacy, false, 4)
        };
        assert!(!should_enable_msaa(&v));
    }

    #[test]
    fn universal_renderer_veto_beats_preview() {
        let v = ViewContext {
            camera_name: "Preview",
            interactive_editing: true,
            ..view(universal(false), true, 8)
        };
        assert!(!should_enable_msaa(&v));
    }

    // ── sample count ──────────────────────────────────────────────────────

    #[test]
    fn sample_count_is_clamped_by_device() {
        let caps = AdapterCaps::from_table(
            "stub",
            [(TextureFormat::Rgba16Float, TextureFormatFeatures {
                allowed_usages: TextureUsages::RENDER_ATTACHMENT,
                flags: TextureFormatFeatureFlags::MULTISAMPLE_X4,
            })],
        );
        let descriptor = TargetDescriptor::new(64, 64, TextureFormat::Rgba16Float);

        let count = |allow, quality| {
            msaa_sample_count(&view(PipelineKind::Legacy, allow, quality), &descriptor, &caps)
        };

        assert_eq!(count(true, 8), 4);
        assert_eq!(count(true, 4), 4);
        assert_eq!(count(false, 8), 1);
    }

    #[test]
    fn motion_vectors_only_in_hdrp() {
        assert!(!motion_vectors_enabled(&PipelineKind::Legacy));
        assert!(!motion_vectors_enabled(&universal(true)));
        assert!(motion_vectors_enabled(&PipelineKind::HighDefinition {
            resolved_samples: MsaaSamples::None,
            supports_motion_vectors: true,
        }));
    }
}
