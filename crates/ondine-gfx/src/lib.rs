//! Ondine graphics utility crate.
//!
//! This crate owns the decision logic that sits between a render orchestrator
//! and the host render pipeline:
//! - texture format negotiation against device capabilities
//! - leak-free render-target lifecycle
//! - MSAA policy across pipeline configurations
//! - scoped suppression of pipeline features for a single render

pub mod context;
pub mod device;
pub mod features;
pub mod logging;
pub mod msaa;
pub mod target;

pub use context::{GfxConfig, GfxContext};
