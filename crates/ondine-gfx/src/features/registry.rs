/// A render-pass extension that can be switched on and off.
///
/// Features are owned by the host pipeline configuration; this crate only
/// reads and flips the active flag.
pub trait PipelineFeature {
    /// Type name used to identify the feature.
    fn name(&self) -> &str;

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);
}

impl<T: PipelineFeature + ?Sized> PipelineFeature for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn set_active(&mut self, active: bool) {
        (**self).set_active(active);
    }
}

/// Plain named feature with an active flag.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NamedFeature {
    pub name: String,
    pub active: bool,
}

impl NamedFeature {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self {
            name: name.into(),
            active,
        }
    }
}

impl PipelineFeature for NamedFeature {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Accessor the host pipeline exposes for per-camera feature lists.
///
/// `camera_renderer` is the camera's explicit renderer index; `None` selects
/// the pipeline's default renderer.
pub trait FeatureRegistry {
    fn renderer_features(
        &self,
        camera_renderer: Option<usize>,
    ) -> Option<&[Box<dyn PipelineFeature>]>;

    fn renderer_features_mut(
        &mut self,
        camera_renderer: Option<usize>,
    ) -> Option<&mut [Box<dyn PipelineFeature>]>;
}

/// Returns the active flag of the feature called `name` on the camera's
/// renderer, or `false` if there is no such feature.
pub fn is_feature_active(
    registry: &dyn FeatureRegistry,
    camera_renderer: Option<usize>,
    name: &str,
) -> bool {
    registry
        .renderer_features(camera_renderer)
        .and_then(|features| features.iter().find(|f| f.name() == name))
        .is_some_and(|f| f.is_active())
}

/// One renderer and its ordered feature list.
#[derive(Default)]
pub struct Renderer {
    pub name: String,
    pub features: Vec<Box<dyn PipelineFeature>>,
}

impl Renderer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: impl PipelineFeature + 'static) -> Self {
        self.features.push(Box::new(feature));
        self
    }
}

/// Renderers of a pipeline asset with its default renderer index.
#[derive(Default)]
pub struct RendererSet {
    pub renderers: Vec<Renderer>,
    pub default_index: usize,
}

impl RendererSet {
    pub fn new(renderers: Vec<Renderer>, default_index: usize) -> Self {
        Self {
            renderers,
            default_index,
        }
    }

    /// Resolves a camera's renderer index, falling back to the default.
    pub fn renderer_index_for(&self, camera_renderer: Option<usize>) -> usize {
        camera_renderer.unwrap_or(self.default_index)
    }
}

impl FeatureRegistry for RendererSet {
    fn renderer_features(
        &self,
        camera_renderer: Option<usize>,
    ) -> Option<&[Box<dyn PipelineFeature>]> {
        let index = self.renderer_index_for(camera_renderer);
        self.renderers.get(index).map(|r| r.features.as_slice())
    }

    fn renderer_features_mut(
        &mut self,
        camera_renderer: Option<usize>,
    ) -> Option<&mut [Box<dyn PipelineFeature>]> {
        let index = self.renderer_index_for(camera_renderer);
        self.renderers.get_mut(index).map(|r| r.features.as_mut_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> RendererSet {
        RendererSet::new(
            vec![
                Renderer::new("forward")
                    .with_feature(NamedFeature::new("ScreenSpaceAmbientOcclusion", false)),
                Renderer::new("ocean")
                    .with_feature(NamedFeature::new("Decals", true))
                    .with_feature(NamedFeature::new("ScreenSpaceAmbientOcclusion", true)),
            ],
            1,
        )
    }

    #[test]
    fn missing_camera_renderer_uses_default() {
        let set = set();
        assert_eq!(set.renderer_index_for(None), 1);
        assert_eq!(set.renderer_index_for(Some(0)), 0);
        assert_eq!(set.renderer_features(None).map(|f| f.len()), Some(2));
    }

    #[test]
    fn feature_lookup_by_name() {
        let set = set();
        assert!(is_feature_active(&set, None, "ScreenSpaceAmbientOcclusion"));
        assert!(!is_feature_active(&set, Some(0), "ScreenSpaceAmbientOcclusion"));
        assert!(!is_feature_active(&set, None, "MotionBlur"));
    }

    #[test]
    fn out_of_range_renderer_has_no_features() {
        let mut set = set();
        assert!(set.renderer_features(Some(7)).is_none());
        assert!(set.renderer_features_mut(Some(7)).is_none());
        assert!(!is_feature_active(&set, Some(7), "Decals"));
    }
}
