//! Error types for heatmap rendering and overlay emission.

use thiserror::Error;

use crate::bounds::Bounds;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap operations.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Input Errors ===
    #[error("No points supplied")]
    EmptyInput,

    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Points {bounds} fall outside the geographic range (lon ±180, lat ±90)")]
    OutOfRange { bounds: Bounds },

    // === Scheme Errors ===
    #[error("Invalid color scheme: {0}")]
    InvalidScheme(String),

    #[error("Failed to load gradient image: {0}")]
    ImageLoad(String),

    // === Output Errors ===
    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write output: {0}")]
    WriteFailure(#[from] std::io::Error),
}
