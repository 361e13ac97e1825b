//! The extracted palette: the full swatch list, the dominant swatch, and
//! one selected swatch per target.

use std::collections::HashSet;

use crate::error::PaletteError;
use crate::swatch::Swatch;
use crate::target::Target;

/// A generated palette. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct Palette {
    swatches: Vec<Swatch>,
    targets: Vec<Target>,
    selected: Vec<Option<Swatch>>,
    dominant: Option<Swatch>,
}

impl Palette {
    /// Build a palette from pre-computed swatches with no selection
    /// targets: only the swatch list and the dominant swatch are
    /// available. Use [`crate::PaletteBuilder::from_swatches`] to run
    /// target selection over an existing list.
    pub fn from_swatches(swatches: Vec<Swatch>) -> Result<Self, PaletteError> {
        if swatches.is_empty() {
            return Err(PaletteError::EmptyInput);
        }
        Ok(Self::generate(swatches, Vec::new()))
    }

    /// Select a swatch for each target, in target order, under the
    /// exclusivity rule.
    pub(crate) fn generate(swatches: Vec<Swatch>, targets: Vec<Target>) -> Self {
        let dominant = find_dominant(&swatches).cloned();
        let max_population = dominant.as_ref().map_or(1, Swatch::population);

        // RGB values consumed by exclusive targets; scoped to this call.
        let mut used: HashSet<u32> = HashSet::new();
        let mut selected = Vec::with_capacity(targets.len());
        for target in &targets {
            let best = find_max_scored(&swatches, target, max_population, &used).cloned();
            if let Some(swatch) = &best {
                if target.is_exclusive() {
                    used.insert(swatch.rgb());
                }
            }
            selected.push(best);
        }

        Self {
            swatches,
            targets,
            selected,
            dominant,
        }
    }

    /// All swatches, in quantizer output order.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// The targets this palette was generated against, in order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// The swatch with the largest population, if any.
    pub fn dominant_swatch(&self) -> Option<&Swatch> {
        self.dominant.as_ref()
    }

    pub fn dominant_color(&self, default: u32) -> u32 {
        self.dominant.as_ref().map_or(default, Swatch::rgb)
    }

    /// The swatch selected for `target`, compared by value against the
    /// generation target list.
    pub fn swatch_for_target(&self, target: &Target) -> Option<&Swatch> {
        self.targets
            .iter()
            .position(|t| t == target)
            .and_then(|i| self.selected[i].as_ref())
    }

    pub fn color_for_target(&self, target: &Target, default: u32) -> u32 {
        self.swatch_for_target(target).map_or(default, |s| s.rgb())
    }

    pub fn vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::vibrant())
    }

    pub fn light_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::light_vibrant())
    }

    pub fn dark_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::dark_vibrant())
    }

    pub fn muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::muted())
    }

    pub fn light_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::light_muted())
    }

    pub fn dark_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for_target(&Target::dark_muted())
    }

    pub fn vibrant_color(&self, default: u32) -> u32 {
        self.color_for_target(&Target::vibrant(), default)
    }

    pub fn light_vibrant_color(&self, default: u32) -> u32 {
        self.color_for_target(&Target::light_vibrant(), default)
    }

    pub fn dark_vibrant_color(&self, default: u32) -> u32 {
        self.color_for_target(&Target::dark_vibrant(), default)
    }

    pub fn muted_color(&self, default: u32) -> u32 {
        self.color_for_target(&Target::muted(), default)
    }

    pub fn light_muted_color(&self, default: u32) -> u32 {
        self.color_for_target(&Target::light_muted(), default)
    }

    pub fn dark_muted_color(&self, default: u32) -> u32 {
        self.color_for_target(&Target::dark_muted(), default)
    }
}

/// Max-population swatch; the earliest one on ties.
fn find_dominant(swatches: &[Swatch]) -> Option<&Swatch> {
    let mut best: Option<&Swatch> = None;
    for swatch in swatches {
        if best.map_or(true, |b| swatch.population() > b.population()) {
            best = Some(swatch);
        }
    }
    best
}

/// Highest-scoring eligible swatch; the earliest one on ties.
fn find_max_scored<'a>(
    swatches: &'a [Swatch],
    target: &Target,
    max_population: u32,
    used: &HashSet<u32>,
) -> Option<&'a Swatch> {
    let mut best: Option<(&Swatch, f32)> = None;
    for swatch in swatches {
        if !should_be_scored(swatch, target, used) {
            continue;
        }
        let score = score(swatch, target, max_population);
        match &best {
            Some((_, best_score)) if score <= *best_score => {}
            _ => best = Some((swatch, score)),
        }
    }
    best.map(|(swatch, _)| swatch)
}

fn should_be_scored(swatch: &Swatch, target: &Target, used: &HashSet<u32>) -> bool {
    let hsl = swatch.hsl();
    hsl[1] >= target.minimum_saturation()
        && hsl[1] <= target.maximum_saturation()
        && hsl[2] >= target.minimum_lightness()
        && hsl[2] <= target.maximum_lightness()
        && !used.contains(&swatch.rgb())
}

fn score(swatch: &Swatch, target: &Target, max_population: u32) -> f32 {
    let [w_sat, w_light, w_pop] = target.normalized_weights();
    let hsl = swatch.hsl();

    let saturation = if w_sat > 0.0 {
        w_sat * (1.0 - (hsl[1] - target.target_saturation()).abs())
    } else {
        0.0
    };
    let lightness = if w_light > 0.0 {
        w_light * (1.0 - (hsl[2] - target.target_lightness()).abs())
    } else {
        0.0
    };
    let population = if w_pop > 0.0 {
        w_pop * (swatch.population() as f32 / max_population as f32)
    } else {
        0.0
    };

    saturation + lightness + population
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb;
    use crate::target::TargetBuilder;

    fn swatch(r: u8, g: u8, b: u8, population: u32) -> Swatch {
        Swatch::new(rgb(r, g, b), population)
    }

    #[test]
    fn dominant_is_max_population() {
        let palette = Palette::generate(
            vec![swatch(10, 20, 30, 5), swatch(200, 50, 50, 12), swatch(0, 0, 255, 3)],
            Vec::new(),
        );
        assert_eq!(palette.dominant_swatch().unwrap().population(), 12);
        assert_eq!(palette.dominant_color(0), rgb(200, 50, 50));
    }

    #[test]
    fn dominant_tie_goes_to_earliest() {
        let palette = Palette::generate(
            vec![swatch(1, 2, 3, 7), swatch(4, 5, 6, 7)],
            Vec::new(),
        );
        assert_eq!(palette.dominant_swatch().unwrap().rgb(), rgb(1, 2, 3));
    }

    #[test]
    fn empty_swatch_list_has_no_selections() {
        let palette = Palette::generate(Vec::new(), vec![Target::vibrant()]);
        assert!(palette.dominant_swatch().is_none());
        assert!(palette.vibrant_swatch().is_none());
        assert_eq!(palette.vibrant_color(0xAB), 0xAB);
        assert!(palette.swatches().is_empty());
    }

    #[test]
    fn from_swatches_rejects_empty() {
        assert!(matches!(
            Palette::from_swatches(Vec::new()),
            Err(PaletteError::EmptyInput)
        ));
    }

    #[test]
    fn vibrant_picks_the_saturated_normal_lightness_swatch() {
        // Pure red: s = 1.0, l = 0.5 — squarely vibrant
        let red = swatch(255, 0, 0, 4);
        // Washed-out gray-blue: low saturation
        let dull = swatch(110, 120, 130, 8);
        let palette = Palette::generate(vec![dull, red], vec![Target::vibrant()]);
        assert_eq!(palette.vibrant_swatch().unwrap().rgb(), rgb(255, 0, 0));
    }

    #[test]
    fn range_bounds_exclude_candidates() {
        // l = 0.25 sits below vibrant's 0.3 minimum
        let dark = swatch(128, 0, 0, 4);
        let palette = Palette::generate(vec![dark], vec![Target::vibrant()]);
        assert!(palette.vibrant_swatch().is_none());
    }

    #[test]
    fn exclusive_target_consumes_its_swatch() {
        let only = swatch(255, 0, 0, 4);
        let first = TargetBuilder::from_target(Target::vibrant()).build();
        let second = Target::vibrant();
        // Identical targets; the single candidate can serve only one.
        let palette = Palette::generate(vec![only], vec![first.clone(), second]);
        assert!(palette.swatch_for_target(&first).is_some());
        // Both targets compare equal, so position lookup finds the first;
        // verify through the selection slots directly.
        assert!(palette.selected[0].is_some());
        assert!(palette.selected[1].is_none());
    }

    #[test]
    fn non_exclusive_target_shares_its_swatch() {
        let only = swatch(255, 0, 0, 4);
        let first = TargetBuilder::from_target(Target::vibrant())
            .exclusive(false)
            .build();
        let second = Target::vibrant();
        let palette = Palette::generate(vec![only], vec![first, second]);
        assert!(palette.selected[0].is_some());
        assert!(palette.selected[1].is_some());
    }

    #[test]
    fn equal_scores_keep_the_earliest_swatch() {
        // Population-only scoring; equal populations tie exactly.
        let target = TargetBuilder::new()
            .saturation_weight(0.0)
            .lightness_weight(0.0)
            .population_weight(1.0)
            .build();
        let a = swatch(10, 200, 10, 5);
        let b = swatch(10, 10, 200, 5);
        let palette = Palette::generate(vec![a, b], vec![target.clone()]);
        assert_eq!(
            palette.swatch_for_target(&target).unwrap().rgb(),
            rgb(10, 200, 10)
        );
    }

    #[test]
    fn zero_weight_components_do_not_score() {
        // Lightness-only target: the closer-to-target-lightness swatch
        // wins even with a tiny population.
        let target = TargetBuilder::new()
            .saturation_weight(0.0)
            .lightness_weight(1.0)
            .population_weight(0.0)
            .target_lightness(0.5)
            .build();
        let near = swatch(120, 120, 140, 1);
        let far = swatch(30, 30, 40, 100);
        let palette = Palette::generate(vec![far, near.clone()], vec![target.clone()]);
        assert_eq!(palette.swatch_for_target(&target), Some(&near));
    }

    #[test]
    fn unknown_target_returns_none() {
        let palette = Palette::generate(vec![swatch(255, 0, 0, 1)], vec![Target::vibrant()]);
        assert!(palette.swatch_for_target(&Target::muted()).is_none());
        assert_eq!(palette.muted_color(0x42), 0x42);
    }
}
