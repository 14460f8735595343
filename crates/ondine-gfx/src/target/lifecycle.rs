use super::descriptor::TargetDescriptor;

/// Identity of a render target's owning handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TargetId(u64);

/// Which slices of a target a reference binds.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DepthSlice {
    /// Every slice (all XR views).
    #[default]
    All,
    Index(u32),
}

/// Lightweight handle addressing a render target.
///
/// A reference never owns the native allocation and stays valid across
/// reconfiguration of the target it addresses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TargetReference {
    pub target: TargetId,
    pub mip_level: u32,
    pub depth_slice: DepthSlice,
}

impl TargetReference {
    /// Binds mip 0 and every slice of `target`.
    pub fn all_slices(target: TargetId) -> Self {
        Self {
            target,
            mip_level: 0,
            depth_slice: DepthSlice::All,
        }
    }
}

/// Owning handle of a render target.
///
/// The native texture is created lazily by [`RenderTarget::create`] and dropped
/// whenever the target is reconfigured. The handle itself is never replaced.
#[derive(Debug)]
pub struct RenderTarget {
    id: TargetId,
    descriptor: TargetDescriptor,
    texture: Option<wgpu::Texture>,
}

impl RenderTarget {
    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn descriptor(&self) -> &TargetDescriptor {
        &self.descriptor
    }

    /// Returns `true` once the native texture exists.
    pub fn is_created(&self) -> bool {
        self.texture.is_some()
    }

    pub fn texture(&self) -> Option<&wgpu::Texture> {
        self.texture.as_ref()
    }

    /// Returns `true` if `reference` addresses this target.
    pub fn resolves(&self, reference: &TargetReference) -> bool {
        reference.target == self.id
    }

    /// Returns `true` if `descriptor` differs from the current one in shape.
    pub fn needs_update(&self, descriptor: &TargetDescriptor) -> bool {
        descriptor.needs_update_from(&self.descriptor)
    }

    /// Replaces the descriptor in place and releases the stale native texture.
    ///
    /// Call [`RenderTarget::create`] afterwards.
    pub fn reconfigure(&mut self, descriptor: TargetDescriptor) {
        log::debug!(
            "reconfiguring render target {:?}: {}x{}x{} -> {}x{}x{}",
            self.id,
            self.descriptor.width,
            self.descriptor.height,
            self.descriptor.volume_depth,
            descriptor.width,
            descriptor.height,
            descriptor.volume_depth,
        );
        self.release();
        self.descriptor = descriptor;
    }

    /// Creates the native texture if it does not exist yet.
    ///
    /// Returns `false` if the descriptor is empty (e.g. a placeholder); the
    /// target then stays unconfigured.
    pub fn create(&mut self, device: &wgpu::Device) -> bool {
        if self.texture.is_some() {
            return true;
        }

        if self.descriptor.is_empty() {
            log::warn!("render target {:?} has an empty descriptor; not creating", self.id);
            return false;
        }

        // Multisampled textures are limited to a single layer.
        if self.descriptor.sample_count > 1 && self.descriptor.volume_depth > 1 {
            log::warn!(
                "render target {:?} requests {} samples with {} slices; not creating",
                self.id,
                self.descriptor.sample_count,
                self.descriptor.volume_depth,
            );
            return false;
        }

        let d = &self.descriptor;
        self.texture = Some(device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ondine render target"),
            size: d.extent(),
            mip_level_count: 1,
            sample_count: d.sample_count.max(1),
            dimension: wgpu::TextureDimension::D2,
            format: d.format,
            usage: d.usage,
            view_formats: &[],
        }));

        true
    }

    /// Drops the native texture, keeping the handle and descriptor.
    pub fn release(&mut self) {
        if let Some(texture) = self.texture.take() {
            texture.destroy();
        }
    }

    /// Returns `true` if `reference` addresses this target within its mip and
    /// slice range.
    pub fn covers(&self, reference: &TargetReference) -> bool {
        let slice_in_range = match reference.depth_slice {
            DepthSlice::All => true,
            DepthSlice::Index(i) => i < self.descriptor.volume_depth,
        };

        // Targets are created with a single mip level.
        self.resolves(reference) && reference.mip_level == 0 && slice_in_range
    }

    /// Creates a view for `reference`.
    ///
    /// Returns `None` if the reference is not covered by this target or the
    /// native texture has not been created.
    pub fn create_view(&self, reference: &TargetReference) -> Option<wgpu::TextureView> {
        if !self.covers(reference) {
            return None;
        }
        let texture = self.texture.as_ref()?;

        let (dimension, base_array_layer, array_layer_count) = match reference.depth_slice {
            DepthSlice::All if self.descriptor.volume_depth > 1 => {
                (wgpu::TextureViewDimension::D2Array, 0, None)
            }
            DepthSlice::All => (wgpu::TextureViewDimension::D2, 0, None),
            DepthSlice::Index(i) => (wgpu::TextureViewDimension::D2, i, Some(1)),
        };

        Some(texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("ondine render target view"),
            dimension: Some(dimension),
            base_mip_level: reference.mip_level,
            mip_level_count: Some(1),
            base_array_layer,
            array_layer_count,
            ..Default::default()
        }))
    }
}

/// Creates render targets and hands out references to them.
///
/// Owned by [`crate::GfxContext`]; targets themselves are owned by callers.
#[derive(Debug, Default)]
pub struct RenderTargets {
    next_id: u64,
    handles_created: u64,
}

impl RenderTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owning handles created so far.
    pub fn handles_created(&self) -> u64 {
        self.handles_created
    }

    /// Returns a reference to `target`, creating a placeholder if absent.
    ///
    /// An existing target is never replaced. The reference is recomputed on
    /// every call since a stored one can go stale across host reloads.
    pub fn ensure_reference(&mut self, target: &mut Option<RenderTarget>) -> TargetReference {
        let target = target.get_or_insert_with(|| self.allocate(TargetDescriptor::placeholder()));
        TargetReference::all_slices(target.id)
    }

    /// Returns `target` configured for `descriptor`, creating it if absent.
    ///
    /// An existing target is reconfigured in place when the shape changed.
    /// The caller creates the native texture afterwards when needed.
    pub fn ensure_allocated<'t>(
        &mut self,
        target: &'t mut Option<RenderTarget>,
        descriptor: TargetDescriptor,
    ) -> &'t mut RenderTarget {
        let existed = target.is_some();
        let target = target.get_or_insert_with(|| self.allocate(descriptor));

        if existed && target.needs_update(&descriptor) {
            target.reconfigure(descriptor);
        }

        target
    }

    fn allocate(&mut self, descriptor: TargetDescriptor) -> RenderTarget {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.handles_created += 1;

        log::debug!(
            "created render target handle {id:?} ({}x{}x{}, {:?})",
            descriptor.width,
            descriptor.height,
            descriptor.volume_depth,
            descriptor.format,
        );

        RenderTarget {
            id,
            descriptor,
            texture: None,
        }
    }
}
