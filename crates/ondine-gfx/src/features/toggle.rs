use super::registry::PipelineFeature;

/// Suppresses pipeline features for the duration of one call.
///
/// Holds the activation snapshot buffer so repeated suppression does not
/// allocate. The snapshot is empty whenever no suppression is in progress.
#[derive(Debug, Default)]
pub struct FeatureToggle {
    snapshot: Vec<bool>,
}

impl FeatureToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no activation states are held.
    pub fn is_idle(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Deactivates every feature in `features`, runs `body` once, then restores
    /// each feature's previous active state in order.
    ///
    /// Restoration also runs if `body` panics; the panic resumes afterwards.
    /// A `Result` returned by `body` is passed through untouched.
    pub fn run_suppressed<F, R>(&mut self, features: &mut [F], body: impl FnOnce() -> R) -> R
    where
        F: PipelineFeature,
    {
        let _suppression = Suppression::begin(&mut self.snapshot, features);
        body()
    }
}

/// Scope guard restoring captured activation states on drop.
struct Suppression<'a, F: PipelineFeature> {
    snapshot: &'a mut Vec<bool>,
    features: &'a mut [F],
}

impl<'a, F: PipelineFeature> Suppression<'a, F> {
    fn begin(snapshot: &'a mut Vec<bool>, features: &'a mut [F]) -> Self {
        debug_assert!(snapshot.is_empty(), "feature snapshot not cleared");
        snapshot.clear();

        for feature in features.iter_mut() {
            snapshot.push(feature.is_active());
            feature.set_active(false);
        }

        log::trace!("suppressed {} pipeline features", features.len());

        Self { snapshot, features }
    }
}

impl<F: PipelineFeature> Drop for Suppression<'_, F> {
    fn drop(&mut self) {
        debug_assert_eq!(self.snapshot.len(), self.features.len());

        for (feature, &active) in self.features.iter_mut().zip(self.snapshot.iter()) {
            feature.set_active(active);
        }

        self.snapshot.clear();
    }
}
