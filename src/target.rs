//! Scoring profiles that pick a swatch matching prescribed saturation,
//! lightness, and population preferences.

const TARGET_DARK_LUMA: f32 = 0.26;
const MAX_DARK_LUMA: f32 = 0.45;
const MIN_LIGHT_LUMA: f32 = 0.55;
const TARGET_LIGHT_LUMA: f32 = 0.74;
const MIN_NORMAL_LUMA: f32 = 0.3;
const TARGET_NORMAL_LUMA: f32 = 0.5;
const MAX_NORMAL_LUMA: f32 = 0.7;

const TARGET_MUTED_SATURATION: f32 = 0.3;
const MAX_MUTED_SATURATION: f32 = 0.4;
const TARGET_VIBRANT_SATURATION: f32 = 1.0;
const MIN_VIBRANT_SATURATION: f32 = 0.35;

const WEIGHT_SATURATION: f32 = 0.24;
const WEIGHT_LUMA: f32 = 0.52;
const WEIGHT_POPULATION: f32 = 0.24;

/// An immutable profile describing the kind of swatch a palette should
/// select: saturation and lightness ranges with in-range ideals, plus
/// weights balancing how much each axis (and relative population)
/// contributes to the score.
///
/// Ranges default to `[0, 0.5, 1]` and weights to `(0.24, 0.52, 0.24)`
/// for (saturation, lightness, population); targets are exclusive unless
/// configured otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    saturation: [f32; 3],
    lightness: [f32; 3],
    weights: [f32; 3],
    exclusive: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            saturation: [0.0, 0.5, 1.0],
            lightness: [0.0, 0.5, 1.0],
            weights: [WEIGHT_SATURATION, WEIGHT_LUMA, WEIGHT_POPULATION],
            exclusive: true,
        }
    }
}

impl Target {
    /// A saturated swatch in a light image region.
    pub fn light_vibrant() -> Self {
        Self {
            saturation: [MIN_VIBRANT_SATURATION, TARGET_VIBRANT_SATURATION, 1.0],
            lightness: [MIN_LIGHT_LUMA, TARGET_LIGHT_LUMA, 1.0],
            ..Self::default()
        }
    }

    /// A saturated swatch of normal lightness.
    pub fn vibrant() -> Self {
        Self {
            saturation: [MIN_VIBRANT_SATURATION, TARGET_VIBRANT_SATURATION, 1.0],
            lightness: [MIN_NORMAL_LUMA, TARGET_NORMAL_LUMA, MAX_NORMAL_LUMA],
            ..Self::default()
        }
    }

    /// A saturated swatch in a dark image region.
    pub fn dark_vibrant() -> Self {
        Self {
            saturation: [MIN_VIBRANT_SATURATION, TARGET_VIBRANT_SATURATION, 1.0],
            lightness: [0.0, TARGET_DARK_LUMA, MAX_DARK_LUMA],
            ..Self::default()
        }
    }

    /// A desaturated swatch in a light image region.
    pub fn light_muted() -> Self {
        Self {
            saturation: [0.0, TARGET_MUTED_SATURATION, MAX_MUTED_SATURATION],
            lightness: [MIN_LIGHT_LUMA, TARGET_LIGHT_LUMA, 1.0],
            ..Self::default()
        }
    }

    /// A desaturated swatch of normal lightness.
    pub fn muted() -> Self {
        Self {
            saturation: [0.0, TARGET_MUTED_SATURATION, MAX_MUTED_SATURATION],
            lightness: [MIN_NORMAL_LUMA, TARGET_NORMAL_LUMA, MAX_NORMAL_LUMA],
            ..Self::default()
        }
    }

    /// A desaturated swatch in a dark image region.
    pub fn dark_muted() -> Self {
        Self {
            saturation: [0.0, TARGET_MUTED_SATURATION, MAX_MUTED_SATURATION],
            lightness: [0.0, TARGET_DARK_LUMA, MAX_DARK_LUMA],
            ..Self::default()
        }
    }

    pub fn minimum_saturation(&self) -> f32 {
        self.saturation[0]
    }

    pub fn target_saturation(&self) -> f32 {
        self.saturation[1]
    }

    pub fn maximum_saturation(&self) -> f32 {
        self.saturation[2]
    }

    pub fn minimum_lightness(&self) -> f32 {
        self.lightness[0]
    }

    pub fn target_lightness(&self) -> f32 {
        self.lightness[1]
    }

    pub fn maximum_lightness(&self) -> f32 {
        self.lightness[2]
    }

    pub fn saturation_weight(&self) -> f32 {
        self.weights[0]
    }

    pub fn lightness_weight(&self) -> f32 {
        self.weights[1]
    }

    pub fn population_weight(&self) -> f32 {
        self.weights[2]
    }

    /// Whether a swatch selected for this target is withheld from later
    /// targets in the same palette.
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Weights scaled so the positive entries sum to one. Zero weights
    /// stay zero; if every weight is zero, so is every output.
    pub(crate) fn normalized_weights(&self) -> [f32; 3] {
        let sum: f32 = self.weights.iter().filter(|&&w| w > 0.0).sum();
        if sum == 0.0 {
            return [0.0; 3];
        }
        let mut weights = self.weights;
        for w in &mut weights {
            if *w > 0.0 {
                *w /= sum;
            } else {
                *w = 0.0;
            }
        }
        weights
    }
}

/// Chainable construction of a custom [`Target`].
#[derive(Debug, Default)]
pub struct TargetBuilder {
    target: Target,
}

impl TargetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing target, e.g. to tweak a built-in.
    pub fn from_target(target: Target) -> Self {
        Self { target }
    }

    pub fn minimum_saturation(mut self, value: f32) -> Self {
        self.target.saturation[0] = value.clamp(0.0, 1.0);
        self
    }

    pub fn target_saturation(mut self, value: f32) -> Self {
        self.target.saturation[1] = value.clamp(0.0, 1.0);
        self
    }

    pub fn maximum_saturation(mut self, value: f32) -> Self {
        self.target.saturation[2] = value.clamp(0.0, 1.0);
        self
    }

    pub fn minimum_lightness(mut self, value: f32) -> Self {
        self.target.lightness[0] = value.clamp(0.0, 1.0);
        self
    }

    pub fn target_lightness(mut self, value: f32) -> Self {
        self.target.lightness[1] = value.clamp(0.0, 1.0);
        self
    }

    pub fn maximum_lightness(mut self, value: f32) -> Self {
        self.target.lightness[2] = value.clamp(0.0, 1.0);
        self
    }

    pub fn saturation_weight(mut self, weight: f32) -> Self {
        self.target.weights[0] = weight.max(0.0);
        self
    }

    pub fn lightness_weight(mut self, weight: f32) -> Self {
        self.target.weights[1] = weight.max(0.0);
        self
    }

    pub fn population_weight(mut self, weight: f32) -> Self {
        self.target.weights[2] = weight.max(0.0);
        self
    }

    pub fn exclusive(mut self, exclusive: bool) -> Self {
        self.target.exclusive = exclusive;
        self
    }

    pub fn build(self) -> Target {
        self.target
    }
}
