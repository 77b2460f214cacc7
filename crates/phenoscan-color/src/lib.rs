//! Phenoscan Color - Color analysis for plant phenotyping
//!
//! This crate provides the color measurement step of a phenotyping
//! pipeline:
//!
//! - **Color space conversion** ([`colorspace`]): 8-bit RGB -> HSV, L*a*b*
//! - **Channel extraction** ([`channel`]): masked-image channel split and
//!   quantization
//! - **Circular statistics** ([`circular`]): hue mean, spread, and median
//!   on the 180-period circle
//! - **Analysis** ([`analysis`]): the `analyze_color` operation and its
//!   report record
//! - **Results aggregation** ([`outputs`]): caller-owned measurement store
//! - **Figures and reporting** ([`plot`]): histogram line charts and debug
//!   artifact delivery

pub mod analysis;
pub mod channel;
pub mod circular;
pub mod colorspace;
pub mod error;
pub mod outputs;
pub mod plot;

// Re-export core types
pub use phenoscan_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export color space types and functions
pub use colorspace::{
    // Types
    Hsv8,
    Lab8,
    // Image-level conversions
    pix_convert_rgb_to_hsv,
    pix_convert_rgb_to_lab,
    // Pixel-level conversions
    rgb_to_hsv,
    rgb_to_lab,
};

// Re-export channel types and functions
pub use channel::{ChannelSet, ColorChannel, quantize_channel};

// Re-export circular statistics
pub use circular::{HUE_PERIOD, HueStats, circular_mean, circular_std, hue_stats, weighted_median};

// Re-export the analysis surface
pub use analysis::{COLOR_CATEGORY, ColorAnalysis, ColorData, HistPlot, ReportValue, analyze_color};

// Re-export outputs and reporting
pub use outputs::{Measurement, Outputs};
pub use plot::{ChannelSeries, DebugMode, HistogramFigure, Reporter};
