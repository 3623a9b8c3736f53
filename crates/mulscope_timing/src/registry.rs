//! Variant-to-model dispatch.

use crate::model::{FixedTiming, ReductionTreeTiming, ShiftAddTiming, TimingModel};
use crate::OPERAND_WIDTH;
use mulscope_common::Variant;
use std::collections::BTreeMap;

/// Maps each variant to the timing model describing its architecture.
///
/// Variants without a registered model fall back to [`FixedTiming`].
/// Supporting a new architecture is a single [`register`](Self::register)
/// call.
#[derive(Debug)]
pub struct TimingModels {
    models: BTreeMap<Variant, Box<dyn TimingModel>>,
    fallback: FixedTiming,
    width: u32,
}

impl TimingModels {
    /// Creates an empty registry for `width`-bit operands.
    pub fn empty(width: u32) -> Self {
        Self {
            models: BTreeMap::new(),
            fallback: FixedTiming::default(),
            width,
        }
    }

    /// The registry for the three known variants at the standard width.
    pub fn standard() -> Self {
        let mut models = Self::empty(OPERAND_WIDTH);
        models.register(Variant::Classical, ShiftAddTiming::default());
        models.register(Variant::Dadda, ReductionTreeTiming::default());
        models.register(Variant::Wallace, ReductionTreeTiming::default());
        models
    }

    /// Registers (or replaces) the model for a variant.
    pub fn register(&mut self, variant: Variant, model: impl TimingModel + 'static) {
        self.models.insert(variant, Box::new(model));
    }

    /// Returns the model used for `variant`.
    pub fn model_for(&self, variant: &Variant) -> &dyn TimingModel {
        self.models
            .get(variant)
            .map_or(&self.fallback as &dyn TimingModel, |model| model.as_ref())
    }

    /// Returns `true` when `variant` has a dedicated model.
    pub fn is_modeled(&self, variant: &Variant) -> bool {
        self.models.contains_key(variant)
    }

    /// The operand width assumed by every model.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Critical-path delay of `variant` in nanoseconds.
    pub fn critical_path_delay_ns(&self, variant: &Variant) -> f64 {
        self.model_for(variant).critical_path_delay_ns(self.width)
    }
}

impl Default for TimingModels {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_delays() {
        let models = TimingModels::standard();
        assert!((models.critical_path_delay_ns(&Variant::Classical) - 9.6).abs() < 1e-12);
        assert_eq!(models.critical_path_delay_ns(&Variant::Wallace), 4.25);
        assert_eq!(models.critical_path_delay_ns(&Variant::Dadda), 4.25);
    }

    #[test]
    fn unknown_variant_uses_fallback() {
        let models = TimingModels::standard();
        let booth = Variant::from_name("Booth");
        assert!(!models.is_modeled(&booth));
        assert_eq!(models.critical_path_delay_ns(&booth), 5.0);
        assert_eq!(
            models.model_for(&booth).describe(),
            "unmodeled (fixed placeholder)"
        );
    }

    #[test]
    fn register_fourth_architecture() {
        let mut models = TimingModels::standard();
        let booth = Variant::from_name("Booth");
        models.register(
            booth.clone(),
            ReductionTreeTiming {
                reduction_factor: 1.8,
                delay_per_level_ns: 0.3,
                final_adder_ns: 1.5,
            },
        );
        assert!(models.is_modeled(&booth));
        // ceil(ln(32) / ln(1.8)) = 6 levels
        assert!((models.critical_path_delay_ns(&booth) - 3.3).abs() < 1e-12);
    }

    #[test]
    fn delay_is_pure_function_of_name() {
        let models = TimingModels::standard();
        for variant in Variant::KNOWN {
            let first = models.critical_path_delay_ns(&variant);
            let second = models.critical_path_delay_ns(&variant);
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
