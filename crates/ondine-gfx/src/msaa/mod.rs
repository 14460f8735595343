//! MSAA policy.
//!
//! Pure decision functions over a per-view [`ViewContext`]; nothing here keeps
//! state between calls.

mod policy;

pub use policy::{
    CameraKind, MsaaSamples, PREVIEW_CAMERA_PREFIX, PipelineKind, ViewContext,
    is_preview_of_game_camera,
    motion_vectors_enabled, msaa_sample_count, should_enable_msaa,
};
