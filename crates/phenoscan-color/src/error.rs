//! Error types for phenoscan-color

use thiserror::Error;

/// Errors that can occur during color analysis
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] phenoscan_core::Error),

    /// Input image has the wrong depth for this operation
    #[error("invalid input: expected {expected}, got {actual} bpp")]
    InvalidInput {
        expected: &'static str,
        actual: u32,
    },

    /// Bin count outside the supported range
    #[error("bin count must be in [1, 256]; got {0}")]
    InvalidBins(u32),

    /// Unknown histogram plot type string
    #[error("unknown histogram plot type {0:?}; expected one of none, all, rgb, lab, hsv")]
    InvalidPlotType(String),

    /// Hue channel contains only background pixels
    #[error("hue channel has no non-background pixels; circular statistics are undefined")]
    DegenerateHue,

    /// Chart rendering failed
    #[error("chart rendering failed: {0}")]
    Render(String),

    /// Artifact encoding failed
    #[error("artifact encoding failed: {0}")]
    Encode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
