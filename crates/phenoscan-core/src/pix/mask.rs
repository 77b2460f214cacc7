//! Mask operations
//!
//! A mask is a same-sized 1 bpp or 8 bpp image; a pixel participates in
//! an operation when its mask value is nonzero.

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

/// Check that `mask` is a valid mask for an image of size `w` x `h`.
pub(super) fn validate_mask(mask: &Pix, w: u32, h: u32) -> Result<()> {
    if !matches!(mask.depth(), PixelDepth::Bit1 | PixelDepth::Bit8) {
        return Err(Error::UnsupportedDepth(mask.depth().bits()));
    }
    if mask.width() != w || mask.height() != h {
        return Err(Error::DimensionMismatch {
            expected: (w, h),
            actual: (mask.width(), mask.height()),
        });
    }
    Ok(())
}

impl Pix {
    /// Zero out all pixels not selected by a mask.
    ///
    /// Returns a new image of the same depth where every pixel whose mask
    /// value is zero has been cleared; selected pixels are copied through
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if this image is not 32 bpp or
    /// the mask is not 1 or 8 bpp, and [`Error::DimensionMismatch`] if the
    /// mask size differs from the image size.
    pub fn apply_mask(&self, mask: &Pix) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        validate_mask(mask, self.width(), self.height())?;

        let result = self.create_template();
        let mut result_mut = result.try_into_mut().unwrap();

        for y in 0..self.height() {
            for x in 0..self.width() {
                if mask.get_pixel_unchecked(x, y) != 0 {
                    result_mut.set_pixel_unchecked(x, y, self.get_pixel_unchecked(x, y));
                }
            }
        }

        Ok(result_mut.into())
    }

    /// Count pixels with a nonzero value.
    ///
    /// For masks this is the number of selected pixels.
    pub fn count_nonzero(&self) -> u64 {
        let mut count = 0u64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_pixel_unchecked(x, y) != 0 {
                    count += 1;
                }
            }
        }
        count
    }
}
