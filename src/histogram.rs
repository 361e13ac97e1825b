//! 15-bit color histogram feeding the median-cut quantizer.
//!
//! Each RGB888 pixel is reduced to a 5-bit-per-channel key, giving a
//! fixed 32768-bin histogram (128 KiB of counters). Filtering happens at
//! the bin level: a rejected bin is zeroed before the distinct-color set
//! is collected.

use crate::color;
use crate::filter::{self, Filter};

pub(crate) const QUANTIZE_WORD_WIDTH: u32 = 5;
pub(crate) const QUANTIZE_WORD_MASK: u16 = (1 << QUANTIZE_WORD_WIDTH) - 1;
pub(crate) const BIN_COUNT: usize = 1 << (3 * QUANTIZE_WORD_WIDTH);

const CHANNEL_SHIFT: u32 = 8 - QUANTIZE_WORD_WIDTH;

/// Reduce a packed color to its 15-bit histogram key.
pub(crate) fn quantize_key(color: u32) -> u16 {
    let r = (color::red(color) >> CHANNEL_SHIFT) as u16;
    let g = (color::green(color) >> CHANNEL_SHIFT) as u16;
    let b = (color::blue(color) >> CHANNEL_SHIFT) as u16;
    (r << (2 * QUANTIZE_WORD_WIDTH)) | (g << QUANTIZE_WORD_WIDTH) | b
}

pub(crate) fn key_red(key: u16) -> u16 {
    (key >> (2 * QUANTIZE_WORD_WIDTH)) & QUANTIZE_WORD_MASK
}

pub(crate) fn key_green(key: u16) -> u16 {
    (key >> QUANTIZE_WORD_WIDTH) & QUANTIZE_WORD_MASK
}

pub(crate) fn key_blue(key: u16) -> u16 {
    key & QUANTIZE_WORD_MASK
}

/// Approximate RGB888 from a key. Each 5-bit channel is upshifted by 3;
/// the lost low bits stay zero (no bit replication).
pub(crate) fn approx_color(key: u16) -> u32 {
    approx_rgb888(key_red(key), key_green(key), key_blue(key))
}

/// Widen 5-bit channel values back to a packed 8-bit color.
pub(crate) fn approx_rgb888(r: u16, g: u16, b: u16) -> u32 {
    color::rgb(
        (r << CHANNEL_SHIFT) as u8,
        (g << CHANNEL_SHIFT) as u8,
        (b << CHANNEL_SHIFT) as u8,
    )
}

/// Count pixels per 15-bit key.
pub(crate) fn build(pixels: &[u32]) -> Vec<u32> {
    let mut hist = vec![0u32; BIN_COUNT];
    for &pixel in pixels {
        hist[quantize_key(pixel) as usize] += 1;
    }
    hist
}

/// Zero every populated bin whose approximate color fails the chain.
pub(crate) fn apply_filters(hist: &mut [u32], filters: &[Box<dyn Filter>]) {
    if filters.is_empty() {
        return;
    }
    for key in 0..hist.len() {
        if hist[key] == 0 {
            continue;
        }
        let rgb = approx_color(key as u16);
        let hsl = color::rgb_to_hsl(color::red(rgb), color::green(rgb), color::blue(rgb));
        if !filter::allowed_by_all(filters, rgb, hsl) {
            hist[key] = 0;
        }
    }
}

/// Populated keys, ascending.
pub(crate) fn distinct_colors(hist: &[u32]) -> Vec<u16> {
    hist.iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(key, _)| key as u16)
        .collect()
}
