//! Error types for decoding pictures and glow sprites.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeltError {
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("unsupported file type `{0}` (expected image/*)")]
    UnsupportedMime(String),
    #[error("image has no pixels")]
    EmptyImage,
    #[error("rgba buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}
