//! Median-cut quantization over the 15-bit histogram.
//!
//! A max-heap of color boxes, keyed by volume, is repeatedly split along
//! the longest channel axis at the population median until the requested
//! number of boxes exists or nothing can be halved. Each surviving box is
//! averaged into one swatch.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::filter::{self, Filter};
use crate::histogram::{self, QUANTIZE_WORD_MASK, QUANTIZE_WORD_WIDTH};
use crate::swatch::Swatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Red,
    Green,
    Blue,
}

/// Reduce a pixel buffer to at most `max_colors` representative swatches.
///
/// Deterministic for identical `(pixels, max_colors, filters)`. An empty
/// buffer yields an empty list; no error ever surfaces from here.
pub(crate) fn quantize_pixels(
    pixels: &[u32],
    max_colors: usize,
    filters: &[Box<dyn Filter>],
) -> Vec<Swatch> {
    if pixels.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut hist = histogram::build(pixels);
    histogram::apply_filters(&mut hist, filters);
    let mut colors = histogram::distinct_colors(&hist);

    if colors.len() <= max_colors {
        // Fewer distinct quantized colors than requested; each becomes a
        // swatch directly, in key order.
        return colors
            .iter()
            .map(|&key| Swatch::new(histogram::approx_color(key), hist[key as usize]))
            .collect();
    }

    let boxes = split_boxes(&mut colors, &hist, max_colors);
    boxes
        .into_iter()
        .filter_map(|vbox| vbox.average_swatch(&colors, &hist))
        .filter(|swatch| {
            // Averaging can land outside every source bin, so the chain
            // gets a second look at the final color.
            filter::allowed_by_all(filters, swatch.rgb(), swatch.hsl())
        })
        .collect()
}

fn split_boxes(colors: &mut [u16], hist: &[u32], max_colors: usize) -> Vec<VBox> {
    let mut seq = 0u32;
    let mut heap = BinaryHeap::with_capacity(max_colors);
    heap.push(VBox::new(0, colors.len() - 1, &mut seq, colors, hist));

    while heap.len() < max_colors {
        let Some(vbox) = heap.pop() else { break };
        if !vbox.can_split() {
            // Largest box holds a single color, so every box does. Keep
            // it; its population still belongs in the output.
            heap.push(vbox);
            break;
        }
        let (lower_half, upper_half) = vbox.split(colors, hist, &mut seq);
        heap.push(lower_half);
        heap.push(upper_half);
    }

    // Largest volume first; fully defined order for reproducible output.
    let mut boxes = heap.into_sorted_vec();
    boxes.reverse();
    boxes
}

/// An axis-aligned box over a contiguous range of the distinct-color
/// array. Holds indices and cached bounds only; the quantizer owns the
/// shared arrays and passes them in.
#[derive(Debug)]
struct VBox {
    lower: usize,
    upper: usize,
    /// Enqueue sequence number; tie-break for equal volumes.
    seq: u32,
    population: u32,
    min_r: u16,
    max_r: u16,
    min_g: u16,
    max_g: u16,
    min_b: u16,
    max_b: u16,
}

impl VBox {
    fn new(lower: usize, upper: usize, seq: &mut u32, colors: &[u16], hist: &[u32]) -> Self {
        let mut vbox = Self {
            lower,
            upper,
            seq: *seq,
            population: 0,
            min_r: QUANTIZE_WORD_MASK,
            max_r: 0,
            min_g: QUANTIZE_WORD_MASK,
            max_g: 0,
            min_b: QUANTIZE_WORD_MASK,
            max_b: 0,
        };
        *seq += 1;
        vbox.fit(colors, hist);
        vbox
    }

    /// Recompute tight channel bounds and the population sum over the
    /// index range.
    fn fit(&mut self, colors: &[u16], hist: &[u32]) {
        let mut min_r = QUANTIZE_WORD_MASK;
        let mut max_r = 0;
        let mut min_g = QUANTIZE_WORD_MASK;
        let mut max_g = 0;
        let mut min_b = QUANTIZE_WORD_MASK;
        let mut max_b = 0;
        let mut population = 0u32;

        for &key in &colors[self.lower..=self.upper] {
            population += hist[key as usize];
            let r = histogram::key_red(key);
            let g = histogram::key_green(key);
            let b = histogram::key_blue(key);
            min_r = min_r.min(r);
            max_r = max_r.max(r);
            min_g = min_g.min(g);
            max_g = max_g.max(g);
            min_b = min_b.min(b);
            max_b = max_b.max(b);
        }

        self.min_r = min_r;
        self.max_r = max_r;
        self.min_g = min_g;
        self.max_g = max_g;
        self.min_b = min_b;
        self.max_b = max_b;
        self.population = population;
    }

    fn color_count(&self) -> usize {
        self.upper - self.lower + 1
    }

    fn can_split(&self) -> bool {
        self.color_count() > 1
    }

    fn volume(&self) -> u32 {
        (self.max_r - self.min_r + 1) as u32
            * (self.max_g - self.min_g + 1) as u32
            * (self.max_b - self.min_b + 1) as u32
    }

    fn longest_dimension(&self) -> Dimension {
        let r = self.max_r - self.min_r;
        let g = self.max_g - self.min_g;
        let b = self.max_b - self.min_b;
        if r >= g && r >= b {
            Dimension::Red
        } else if g >= b {
            Dimension::Green
        } else {
            Dimension::Blue
        }
    }

    /// Split at the population median along the longest dimension.
    /// Caller must check `can_split` first.
    fn split(self, colors: &mut [u16], hist: &[u32], seq: &mut u32) -> (VBox, VBox) {
        let split_point = self.find_split_point(colors, hist);
        let lower_half = VBox::new(self.lower, split_point, seq, colors, hist);
        let upper_half = VBox::new(split_point + 1, self.upper, seq, colors, hist);
        (lower_half, upper_half)
    }

    fn find_split_point(&self, colors: &mut [u16], hist: &[u32]) -> usize {
        let dimension = self.longest_dimension();

        // Move the chosen channel into the top bits, sort the sub-range,
        // then swap back. The remap is its own inverse.
        let range = &mut colors[self.lower..=self.upper];
        swap_dimension(range, dimension);
        range.sort_unstable();
        swap_dimension(range, dimension);

        let midpoint = self.population / 2;
        let mut count = 0u32;
        for i in self.lower..=self.upper {
            count += hist[colors[i] as usize];
            if count >= midpoint {
                // Clamp so the upper half is never empty.
                return i.min(self.upper - 1);
            }
        }
        self.lower
    }

    /// Population-weighted mean color of the box, widened back to 8-bit.
    fn average_swatch(&self, colors: &[u16], hist: &[u32]) -> Option<Swatch> {
        let mut red_sum = 0u64;
        let mut green_sum = 0u64;
        let mut blue_sum = 0u64;
        let mut total = 0u64;

        for &key in &colors[self.lower..=self.upper] {
            let population = hist[key as usize] as u64;
            total += population;
            red_sum += population * histogram::key_red(key) as u64;
            green_sum += population * histogram::key_green(key) as u64;
            blue_sum += population * histogram::key_blue(key) as u64;
        }

        if total == 0 {
            return None;
        }

        let r = (red_sum as f64 / total as f64).round() as u16;
        let g = (green_sum as f64 / total as f64).round() as u16;
        let b = (blue_sum as f64 / total as f64).round() as u16;
        Some(Swatch::new(
            histogram::approx_rgb888(r, g, b),
            total as u32,
        ))
    }
}

/// Swap the chosen dimension into the key's top five bits. Applying the
/// same swap twice restores the original key.
fn swap_dimension(keys: &mut [u16], dimension: Dimension) {
    match dimension {
        Dimension::Red => {}
        Dimension::Green => {
            for key in keys.iter_mut() {
                *key = (histogram::key_green(*key) << (2 * QUANTIZE_WORD_WIDTH))
                    | (histogram::key_red(*key) << QUANTIZE_WORD_WIDTH)
                    | histogram::key_blue(*key);
            }
        }
        Dimension::Blue => {
            for key in keys.iter_mut() {
                *key = (histogram::key_blue(*key) << (2 * QUANTIZE_WORD_WIDTH))
                    | (histogram::key_green(*key) << QUANTIZE_WORD_WIDTH)
                    | histogram::key_red(*key);
            }
        }
    }
}

impl Ord for VBox {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on volume; equal volumes fall back to enqueue order so
        // runs are reproducible.
        self.volume()
            .cmp(&other.volume())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for VBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VBox {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VBox {}
