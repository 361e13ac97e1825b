//! Packed-ARGB color math: channel packing, HSL and CIE XYZ conversion,
//! WCAG contrast, alpha compositing, and minimum-alpha search.
//!
//! Colors are `u32` values encoding `(A << 24) | (R << 16) | (G << 8) | B`.
//! The sRGB transfer function (gamma to linear) is delegated to the
//! `linear-srgb` crate's const LUT.

use crate::error::PaletteError;

pub const BLACK: u32 = 0xFF00_0000;
pub const WHITE: u32 = 0xFFFF_FFFF;

const MIN_ALPHA_SEARCH_MAX_ITERATIONS: u32 = 10;
const MIN_ALPHA_SEARCH_PRECISION: u32 = 1;

/// Pack four channels into an ARGB word.
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Pack three channels into a fully opaque ARGB word.
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    argb(255, r, g, b)
}

pub const fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

pub const fn red(color: u32) -> u8 {
    (color >> 16) as u8
}

pub const fn green(color: u32) -> u8 {
    (color >> 8) as u8
}

pub const fn blue(color: u32) -> u8 {
    color as u8
}

/// Replace the alpha component of `color`.
///
/// Fails with [`PaletteError::InvalidAlpha`] when `alpha > 255`.
pub fn with_alpha(color: u32, alpha: u32) -> Result<u32, PaletteError> {
    if alpha > 255 {
        return Err(PaletteError::InvalidAlpha(alpha));
    }
    Ok(apply_alpha(color, alpha as u8))
}

pub(crate) const fn apply_alpha(color: u32, alpha: u8) -> u32 {
    (color & 0x00FF_FFFF) | ((alpha as u32) << 24)
}

/// Convert RGB888 channels to HSL.
///
/// Returns `[h, s, l]` with `h` in `[0, 360)` and `s`, `l` in `[0, 1]`,
/// each clamped to absorb floating-point drift. Achromatic input yields
/// `h = s = 0`.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> [f32; 3] {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let l = (max + min) / 2.0;
    if delta == 0.0 {
        return [0.0, 0.0, l.clamp(0.0, 1.0)];
    }

    let h = if max == rf {
        ((gf - bf) / delta) % 6.0
    } else if max == gf {
        (bf - rf) / delta + 2.0
    } else {
        (rf - gf) / delta + 4.0
    };
    let s = delta / (1.0 - (2.0 * l - 1.0).abs());

    let mut h = (h * 60.0) % 360.0;
    if h < 0.0 {
        h += 360.0;
    }
    if h >= 360.0 {
        h -= 360.0;
    }

    [h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)]
}

/// Convert RGB888 channels to CIE XYZ (D65, 2° observer).
///
/// Components are scaled by 100, so white maps to roughly
/// `[95.05, 100.0, 108.9]`.
pub fn rgb_to_xyz(r: u8, g: u8, b: u8) -> [f64; 3] {
    let sr = linear_srgb::default::srgb_u8_to_linear(r) as f64;
    let sg = linear_srgb::default::srgb_u8_to_linear(g) as f64;
    let sb = linear_srgb::default::srgb_u8_to_linear(b) as f64;

    [
        100.0 * (sr * 0.4124 + sg * 0.3576 + sb * 0.1805),
        100.0 * (sr * 0.2126 + sg * 0.7152 + sb * 0.0722),
        100.0 * (sr * 0.0193 + sg * 0.1192 + sb * 0.9505),
    ]
}

/// WCAG relative luminance of a color in `[0, 1]`.
pub fn luminance(color: u32) -> f64 {
    rgb_to_xyz(red(color), green(color), blue(color))[1] / 100.0
}

/// WCAG 2.0 contrast ratio between a foreground and an opaque background.
///
/// A translucent foreground is composited over the background first.
/// Fails with [`PaletteError::TranslucentBackground`] when the background
/// is not fully opaque.
pub fn contrast_ratio(foreground: u32, background: u32) -> Result<f64, PaletteError> {
    if alpha(background) != 255 {
        return Err(PaletteError::TranslucentBackground);
    }
    let foreground = if alpha(foreground) < 255 {
        composite_over(foreground, background)
    } else {
        foreground
    };

    let l1 = luminance(foreground) + 0.05;
    let l2 = luminance(background) + 0.05;
    Ok(l1.max(l2) / l1.min(l2))
}

/// Porter-Duff "over" compositing of two ARGB colors.
pub fn composite_over(foreground: u32, background: u32) -> u32 {
    let fg_a = alpha(foreground) as u32;
    let bg_a = alpha(background) as u32;
    let a = 255 - ((255 - bg_a) * (255 - fg_a)) / 255;

    let r = composite_component(red(foreground) as u32, fg_a, red(background) as u32, bg_a, a);
    let g = composite_component(
        green(foreground) as u32,
        fg_a,
        green(background) as u32,
        bg_a,
        a,
    );
    let b = composite_component(
        blue(foreground) as u32,
        fg_a,
        blue(background) as u32,
        bg_a,
        a,
    );

    argb(a as u8, r as u8, g as u8, b as u8)
}

fn composite_component(fg_c: u32, fg_a: u32, bg_c: u32, bg_a: u32, a: u32) -> u32 {
    if a == 0 {
        return 0;
    }
    (255 * fg_c * fg_a + bg_c * bg_a * (255 - fg_a)) / (a * 255)
}

/// Minimum alpha for `foreground` to reach `min_contrast` over an opaque
/// `background`.
///
/// Returns `-1` when even the fully opaque foreground cannot reach the
/// ratio. Otherwise runs a bounded binary search over `[0, 255]` and
/// returns the lowest alpha known to pass (the conservative endpoint).
pub fn min_alpha_for_contrast(
    foreground: u32,
    background: u32,
    min_contrast: f64,
) -> Result<i32, PaletteError> {
    if alpha(background) != 255 {
        return Err(PaletteError::TranslucentBackground);
    }

    let opaque = apply_alpha(foreground, 255);
    if contrast_ratio(opaque, background)? < min_contrast {
        return Ok(-1);
    }

    let mut iterations = 0;
    let mut min_alpha = 0u32;
    let mut max_alpha = 255u32;

    while iterations <= MIN_ALPHA_SEARCH_MAX_ITERATIONS
        && max_alpha - min_alpha > MIN_ALPHA_SEARCH_PRECISION
    {
        let test_alpha = (min_alpha + max_alpha) / 2;
        let candidate = apply_alpha(foreground, test_alpha as u8);
        if contrast_ratio(candidate, background)? < min_contrast {
            min_alpha = test_alpha;
        } else {
            max_alpha = test_alpha;
        }
        iterations += 1;
    }

    Ok(max_alpha as i32)
}
