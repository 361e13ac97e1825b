//! Extract representative color swatches from an image and classify them
//! along perceptual axes (vibrant/muted, dark/normal/light).
//!
//! The pipeline reduces a pixel buffer to at most N colors with
//! histogram-backed median-cut quantization, then scores the resulting
//! swatches against configurable saturation/lightness/population targets.

#![forbid(unsafe_code)]

pub mod color;
mod error;
mod filter;
mod histogram;
#[cfg(feature = "image")]
mod image_backend;
mod median_cut;
mod palette;
mod swatch;
mod target;

pub use error::PaletteError;
pub use filter::{DefaultFilter, Filter};
pub use palette::Palette;
pub use swatch::Swatch;
pub use target::{Target, TargetBuilder};

const DEFAULT_RESIZE_BITMAP_AREA: i32 = 112 * 112;
const DEFAULT_CALCULATE_NUMBER_COLORS: u32 = 16;

/// Chainable configuration for palette generation.
///
/// Defaults: 16 colors, downscale to ≤ 12544 pixels (112×112), the
/// [`DefaultFilter`], and the six built-in targets.
///
/// ```
/// let pixels = vec![zenpalette::color::rgb(200, 30, 30); 64];
/// let palette = zenpalette::PaletteBuilder::from_argb_pixels(pixels, 8, 8)
///     .maximum_color_count(8)
///     .generate()
///     .unwrap();
/// assert!(palette.vibrant_swatch().is_some());
/// ```
pub struct PaletteBuilder {
    source: Source,
    max_colors: u32,
    resize_area: i32,
    resize_max_dimension: i32,
    /// `[left, top, right, bottom]`, half-open, in source coordinates.
    region: Option<[u32; 4]>,
    filters: Vec<Box<dyn Filter>>,
    targets: Vec<Target>,
}

enum Source {
    Pixels {
        pixels: Vec<u32>,
        width: u32,
        height: u32,
    },
    Swatches(Vec<Swatch>),
}

impl PaletteBuilder {
    fn with_source(source: Source) -> Self {
        Self {
            source,
            max_colors: DEFAULT_CALCULATE_NUMBER_COLORS,
            resize_area: DEFAULT_RESIZE_BITMAP_AREA,
            resize_max_dimension: -1,
            region: None,
            filters: vec![Box::new(DefaultFilter)],
            targets: vec![
                Target::light_vibrant(),
                Target::vibrant(),
                Target::dark_vibrant(),
                Target::light_muted(),
                Target::muted(),
                Target::dark_muted(),
            ],
        }
    }

    /// Build from a packed ARGB buffer, `width * height` pixels long.
    /// Alpha is ignored by the quantizer; translucent sources should be
    /// pre-composited.
    pub fn from_argb_pixels(pixels: Vec<u32>, width: u32, height: u32) -> Self {
        Self::with_source(Source::Pixels {
            pixels,
            width,
            height,
        })
    }

    /// Build from RGBA component pixels.
    pub fn from_rgba_pixels(pixels: &[rgb::RGBA<u8>], width: u32, height: u32) -> Self {
        let packed = pixels
            .iter()
            .map(|p| color::argb(p.a, p.r, p.g, p.b))
            .collect();
        Self::from_argb_pixels(packed, width, height)
    }

    /// Run target selection over an existing swatch list, skipping the
    /// quantizer entirely.
    pub fn from_swatches(swatches: Vec<Swatch>) -> Self {
        Self::with_source(Source::Swatches(swatches))
    }

    /// Cap the number of colors produced by the quantizer.
    pub fn maximum_color_count(mut self, count: u32) -> Self {
        self.max_colors = count;
        self
    }

    /// Downscale the source so its area is at most `area` pixels before
    /// quantization. Values ≤ 0 disable resizing. Replaces any
    /// max-dimension setting.
    pub fn resize_bitmap_area(mut self, area: i32) -> Self {
        self.resize_area = area;
        self.resize_max_dimension = -1;
        self
    }

    /// Downscale the source so its larger dimension is at most
    /// `dimension` pixels. Values ≤ 0 disable resizing. Replaces any
    /// area setting.
    pub fn resize_bitmap_max_dimension(mut self, dimension: i32) -> Self {
        self.resize_max_dimension = dimension;
        self.resize_area = -1;
        self
    }

    /// Append a filter to the chain consulted by the quantizer.
    pub fn add_filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Remove all filters, including the default one.
    pub fn clear_filters(mut self) -> Self {
        self.filters.clear();
        self
    }

    /// Append a selection target. Duplicates of an already-added target
    /// are ignored.
    pub fn add_target(mut self, target: Target) -> Self {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
        self
    }

    /// Remove all selection targets, including the built-in six.
    pub fn clear_targets(mut self) -> Self {
        self.targets.clear();
        self
    }

    /// Restrict extraction to a sub-rectangle of the source image,
    /// half-open on `right`/`bottom`, in original-image coordinates.
    /// Ignored for swatch-list sources.
    pub fn region(mut self, left: u32, top: u32, right: u32, bottom: u32) -> Self {
        self.region = Some([left, top, right, bottom]);
        self
    }

    /// Extract from the whole image again.
    pub fn clear_region(mut self) -> Self {
        self.region = None;
        self
    }

    /// Run the pipeline and produce the palette.
    pub fn generate(self) -> Result<Palette, PaletteError> {
        match self.source {
            Source::Swatches(swatches) => {
                if swatches.is_empty() {
                    return Err(PaletteError::EmptyInput);
                }
                Ok(Palette::generate(swatches, self.targets))
            }
            Source::Pixels {
                pixels,
                width,
                height,
            } => {
                if width == 0 || height == 0 {
                    return Err(PaletteError::EmptyInput);
                }
                if pixels.len() != (width as usize) * (height as usize) {
                    return Err(PaletteError::BufferSizeMismatch {
                        len: pixels.len(),
                        width,
                        height,
                    });
                }
                if let Some([left, top, right, bottom]) = self.region {
                    if left >= right || top >= bottom || right > width || bottom > height {
                        return Err(PaletteError::InvalidRegion {
                            left,
                            top,
                            right,
                            bottom,
                            width,
                            height,
                        });
                    }
                }

                let (pixels, scaled_width, scaled_height, ratio) = scale_down(
                    pixels,
                    width,
                    height,
                    self.resize_area,
                    self.resize_max_dimension,
                );
                let pixels = match self.region {
                    Some(region) => {
                        crop_region(&pixels, scaled_width, scaled_height, region, ratio)
                    }
                    None => pixels,
                };

                let swatches =
                    median_cut::quantize_pixels(&pixels, self.max_colors as usize, &self.filters);
                Ok(Palette::generate(swatches, self.targets))
            }
        }
    }
}

/// Nearest-neighbor downscale of a packed buffer. Returns the (possibly
/// unchanged) buffer, its dimensions, and the applied ratio.
///
/// Nearest-neighbor keeps every output pixel an exact source color;
/// blending would invent colors the image never contained.
fn scale_down(
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    resize_area: i32,
    resize_max_dimension: i32,
) -> (Vec<u32>, u32, u32, f64) {
    let mut ratio = -1.0f64;
    if resize_area > 0 {
        let area = u64::from(width) * u64::from(height);
        if area > resize_area as u64 {
            ratio = (resize_area as f64 / area as f64).sqrt();
        }
    } else if resize_max_dimension > 0 {
        let max_dimension = width.max(height);
        if max_dimension > resize_max_dimension as u32 {
            ratio = resize_max_dimension as f64 / f64::from(max_dimension);
        }
    }

    if ratio <= 0.0 {
        return (pixels, width, height, 1.0);
    }

    let scaled_width = ((f64::from(width) * ratio).ceil() as u32).max(1);
    let scaled_height = ((f64::from(height) * ratio).ceil() as u32).max(1);
    let mut scaled = Vec::with_capacity((scaled_width * scaled_height) as usize);
    for y in 0..scaled_height {
        let src_y = ((f64::from(y) / ratio) as u32).min(height - 1);
        for x in 0..scaled_width {
            let src_x = ((f64::from(x) / ratio) as u32).min(width - 1);
            scaled.push(pixels[(src_y * width + src_x) as usize]);
        }
    }
    (scaled, scaled_width, scaled_height, ratio)
}

/// Copy out a region given in original-image coordinates, mapped through
/// the resize ratio. Bounds were validated before scaling.
fn crop_region(
    pixels: &[u32],
    width: u32,
    height: u32,
    [left, top, right, bottom]: [u32; 4],
    ratio: f64,
) -> Vec<u32> {
    let left = ((f64::from(left) * ratio).floor() as u32).min(width - 1);
    let top = ((f64::from(top) * ratio).floor() as u32).min(height - 1);
    let right = ((f64::from(right) * ratio).ceil() as u32).clamp(left + 1, width);
    let bottom = ((f64::from(bottom) * ratio).ceil() as u32).clamp(top + 1, height);

    let mut cropped = Vec::with_capacity(((right - left) * (bottom - top)) as usize);
    for y in top..bottom {
        let row = (y * width) as usize;
        cropped.extend_from_slice(&pixels[row + left as usize..row + right as usize]);
    }
    cropped
}
