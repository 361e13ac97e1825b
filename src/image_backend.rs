//! `image` crate integration: build a palette straight from a decoded
//! image.
//!
//! The adapter converts any [`DynamicImage`] to 8-bit sRGB with alpha and
//! copies it into the packed buffer the quantizer consumes. Translucent
//! sources should be pre-composited by the caller; the quantizer ignores
//! alpha.

use image::DynamicImage;

use crate::color;
use crate::palette::Palette;
use crate::PaletteBuilder;

impl PaletteBuilder {
    /// Start a builder from a decoded image.
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| color::argb(p.0[3], p.0[0], p.0[1], p.0[2]))
            .collect();
        Self::from_argb_pixels(pixels, width, height)
    }
}

impl Palette {
    /// Shorthand for [`PaletteBuilder::from_image`].
    pub fn from_image(image: &DynamicImage) -> PaletteBuilder {
        PaletteBuilder::from_image(image)
    }
}
