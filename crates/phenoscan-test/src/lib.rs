//! phenoscan-test - Regression test framework for phenoscan
//!
//! Supports two modes, selected by the `REGTEST_MODE` environment
//! variable:
//!
//! - **Compare** (default): compare computed values with expected values
//! - **Display**: print computed values without comparison
//!
//! # Usage
//!
//! ```
//! use phenoscan_test::RegParams;
//!
//! let mut rp = RegParams::new("histogram");
//! rp.compare_values(16.0, 16.0, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;

pub use params::{RegParams, RegTestMode};
