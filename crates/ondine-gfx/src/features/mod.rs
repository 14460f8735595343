//! Pipeline features and scoped suppression.
//!
//! The host pipeline exposes its per-renderer feature lists through
//! [`FeatureRegistry`]; [`FeatureToggle`] switches a list off for one render
//! and restores it on every exit path.

mod registry;
mod toggle;

pub use registry::{
    FeatureRegistry, NamedFeature, PipelineFeature, Renderer, RendererSet, is_feature_active,
};
pub use toggle::FeatureToggle;
