//! A single representative color with its population and derived values.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::color;

const MIN_CONTRAST_TITLE_TEXT: f64 = 3.0;
const MIN_CONTRAST_BODY_TEXT: f64 = 4.5;

/// A color extracted from an image together with the number of source
/// pixels it represents.
///
/// HSL and the overlay text colors are computed on first access and
/// memoized; a `Swatch` is immutable and safe to share between threads.
#[derive(Clone)]
pub struct Swatch {
    rgb: u32,
    population: u32,
    hsl: OnceLock<[f32; 3]>,
    text_colors: OnceLock<TextColors>,
}

#[derive(Clone, Copy)]
struct TextColors {
    title: u32,
    body: u32,
}

impl Swatch {
    /// Create a swatch. The alpha byte of `rgb` is forced to opaque.
    pub fn new(rgb: u32, population: u32) -> Self {
        Self {
            rgb: rgb | 0xFF00_0000,
            population,
            hsl: OnceLock::new(),
            text_colors: OnceLock::new(),
        }
    }

    /// The packed opaque ARGB color.
    pub fn rgb(&self) -> u32 {
        self.rgb
    }

    /// The color as a 6-digit `#RRGGBB` string.
    pub fn hex(&self) -> String {
        format!("#{:06X}", self.rgb & 0x00FF_FFFF)
    }

    /// Number of source pixels represented by this swatch.
    pub fn population(&self) -> u32 {
        self.population
    }

    /// The color as `[h, s, l]`, `h` in `[0, 360)`, `s` and `l` in `[0, 1]`.
    ///
    /// Returned by value; the cached triple is never exposed by reference.
    pub fn hsl(&self) -> [f32; 3] {
        *self.hsl.get_or_init(|| {
            color::rgb_to_hsl(
                color::red(self.rgb),
                color::green(self.rgb),
                color::blue(self.rgb),
            )
        })
    }

    /// A title-text overlay color guaranteed to meet a 3.0:1 contrast
    /// ratio against this swatch.
    pub fn title_text_color(&self) -> u32 {
        self.text_colors().title
    }

    /// A body-text overlay color guaranteed to meet a 4.5:1 contrast
    /// ratio against this swatch.
    pub fn body_text_color(&self) -> u32 {
        self.text_colors().body
    }

    fn text_colors(&self) -> TextColors {
        *self.text_colors.get_or_init(|| self.compute_text_colors())
    }

    fn compute_text_colors(&self) -> TextColors {
        // The swatch color is opaque by construction, so the minimum-alpha
        // search cannot fail; -1 only marks an unreachable ratio.
        let light_body =
            color::min_alpha_for_contrast(color::WHITE, self.rgb, MIN_CONTRAST_BODY_TEXT)
                .unwrap_or(-1);
        let light_title =
            color::min_alpha_for_contrast(color::WHITE, self.rgb, MIN_CONTRAST_TITLE_TEXT)
                .unwrap_or(-1);

        if light_body != -1 && light_title != -1 {
            return TextColors {
                title: color::apply_alpha(color::WHITE, light_title as u8),
                body: color::apply_alpha(color::WHITE, light_body as u8),
            };
        }

        let dark_body =
            color::min_alpha_for_contrast(color::BLACK, self.rgb, MIN_CONTRAST_BODY_TEXT)
                .unwrap_or(-1);
        let dark_title =
            color::min_alpha_for_contrast(color::BLACK, self.rgb, MIN_CONTRAST_TITLE_TEXT)
                .unwrap_or(-1);

        if dark_body != -1 && dark_title != -1 {
            return TextColors {
                title: color::apply_alpha(color::BLACK, dark_title as u8),
                body: color::apply_alpha(color::BLACK, dark_body as u8),
            };
        }

        // Mismatched: each role independently takes whichever side found
        // a solution.
        TextColors {
            title: pick_side(light_title, dark_title),
            body: pick_side(light_body, dark_body),
        }
    }
}

fn pick_side(light_alpha: i32, dark_alpha: i32) -> u32 {
    if light_alpha != -1 {
        color::apply_alpha(color::WHITE, light_alpha as u8)
    } else if dark_alpha != -1 {
        color::apply_alpha(color::BLACK, dark_alpha as u8)
    } else {
        color::BLACK
    }
}

impl PartialEq for Swatch {
    fn eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb && self.population == other.population
    }
}

impl Eq for Swatch {}

impl Hash for Swatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rgb.hash(state);
        self.population.hash(state);
    }
}

impl fmt::Debug for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Swatch")
            .field("rgb", &self.hex())
            .field("population", &self.population)
            .finish()
    }
}
