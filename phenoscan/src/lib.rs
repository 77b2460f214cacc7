//! Phenoscan - Plant phenotyping image analysis for Rust
//!
//! # Overview
//!
//! Phenoscan measures plant traits from images. This crate bundles the
//! workspace:
//!
//! - Image container and numeric primitives (`Pix`, `Numa`)
//! - Masked color-channel histograms (RGB, L*a*b*, HSV)
//! - Circular hue statistics for color phenotypes
//! - Results aggregation and histogram figures
//!
//! # Example
//!
//! ```
//! use phenoscan::{Pix, PixelDepth};
//!
//! // Create a new 8-bit channel image
//! let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
//! assert_eq!(pix.width(), 640);
//! assert_eq!(pix.height(), 480);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use phenoscan_core::*;

// Re-export the color analysis crate as a module
pub use phenoscan_color as color;
