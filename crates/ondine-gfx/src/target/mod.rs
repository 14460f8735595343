//! Render-target lifecycle.
//!
//! Targets are owned by callers as `Option<RenderTarget>` slots. The slot is
//! filled at most once; later calls reconfigure the target in place so that
//! every `TargetReference` handed out keeps addressing the same target.

mod descriptor;
mod lifecycle;

pub use descriptor::TargetDescriptor;
pub use lifecycle::{DepthSlice, RenderTarget, RenderTargets, TargetId, TargetReference};
