use wgpu::{TextureFormat, TextureUsages};

use crate::device::DEFAULT_FALLBACK_FORMAT;

/// Shape and format of a render target.
///
/// Compared structurally; use [`TargetDescriptor::needs_update_from`] for the
/// narrower shape-only comparison used when deciding to reconfigure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TargetDescriptor {
    /// Width in physical pixels.
    pub width: u32,

    /// Height in physical pixels.
    pub height: u32,

    /// Array layers (XR views) or volume slices.
    pub volume_depth: u32,

    /// The host scales the target dynamically with its resolution scaler.
    pub dynamic_scale: bool,

    pub format: TextureFormat,

    /// MSAA sample count; 1 disables multisampling.
    pub sample_count: u32,

    pub usage: TextureUsages,
}

impl TargetDescriptor {
    /// Single-slice, single-sample color target.
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            volume_depth: 1,
            dynamic_scale: false,
            format,
            sample_count: 1,
            usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
        }
    }

    /// Zero-sized descriptor that only establishes a handle.
    ///
    /// A target with this descriptor cannot be created on the device.
    pub fn placeholder() -> Self {
        Self {
            volume_depth: 0,
            ..Self::new(0, 0, DEFAULT_FALLBACK_FORMAT)
        }
    }

    /// Returns `true` if any dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.volume_depth == 0
    }

    /// Returns `true` if `self` differs from `current` in shape.
    ///
    /// Only width, height, volume depth and the dynamic-scale flag count;
    /// callers manage format and sample count separately.
    pub fn needs_update_from(&self, current: &TargetDescriptor) -> bool {
        self.width != current.width
            || self.height != current.height
            || self.volume_depth != current.volume_depth
            || self.dynamic_scale != current.dynamic_scale
    }

    pub(crate) fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: self.volume_depth,
        }
    }
}
