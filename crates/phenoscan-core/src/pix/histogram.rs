//! Histogram generation for Pix images
//!
//! Computes binned pixel-value distributions, optionally restricted to a
//! masked region.

use super::access::get_pixel_from_line;
use super::mask::validate_mask;
use super::{Pix, PixelDepth};
use crate::error::{Error, Result};
use crate::numa::Numa;

impl Pix {
    /// Compute a binned histogram of an 8 bpp image over a masked region.
    ///
    /// Counts pixel values into `bins` buckets spanning `[0, bins - 1]`.
    /// The image is expected to hold pre-quantized values below `bins`;
    /// larger values are not counted. Pixels whose mask value is zero
    /// never contribute. If `mask` is `None`, every pixel contributes.
    ///
    /// The returned [`Numa`] has exactly `bins` entries and parameters
    /// `startx = 0, delx = 1`.
    ///
    /// # Arguments
    ///
    /// * `mask` - Optional 1 or 8 bpp mask of identical size.
    /// * `bins` - Number of buckets, in `[1, 256]`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image depth is not 8 bpp
    /// - `bins` is 0 or greater than 256
    /// - The mask has an invalid depth or mismatched dimensions
    ///
    /// # Examples
    ///
    /// ```
    /// use phenoscan_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 100, PixelDepth::Bit8).unwrap();
    /// let hist = pix.binned_histogram(None, 16).unwrap();
    /// assert_eq!(hist.len(), 16);
    /// assert_eq!(hist[0], 10000.0);
    /// ```
    pub fn binned_histogram(&self, mask: Option<&Pix>, bins: u32) -> Result<Numa> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if bins == 0 || bins > 256 {
            return Err(Error::InvalidParameter(format!(
                "bins must be in [1, 256]; got {bins}"
            )));
        }
        if let Some(m) = mask {
            validate_mask(m, self.width(), self.height())?;
        }

        let nbins = bins as usize;
        let mut histogram = vec![0.0f32; nbins];

        let width = self.width();
        let height = self.height();
        let depth = self.depth();

        for y in 0..height {
            let line = self.row_data(y);
            let mline = mask.map(|m| (m.row_data(y), m.depth()));
            for x in 0..width {
                if let Some((ml, md)) = mline {
                    if get_pixel_from_line(ml, x, md) == 0 {
                        continue;
                    }
                }
                let val = get_pixel_from_line(line, x, depth) as usize;
                if val < nbins {
                    histogram[val] += 1.0;
                }
            }
        }

        let mut result = Numa::from_vec(histogram);
        result.set_parameters(0.0, 1.0);
        Ok(result)
    }
}
