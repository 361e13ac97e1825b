use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("alpha component must be between 0 and 255, got {0}")]
    InvalidAlpha(u32),

    #[error("background color must be fully opaque")]
    TranslucentBackground,

    #[error("no pixels or swatches to generate a palette from")]
    EmptyInput,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    BufferSizeMismatch {
        len: usize,
        width: u32,
        height: u32,
    },

    #[error(
        "region ({left}, {top})-({right}, {bottom}) does not fit inside a {width}x{height} image"
    )]
    InvalidRegion {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
        width: u32,
        height: u32,
    },
}
