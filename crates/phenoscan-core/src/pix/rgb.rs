//! RGB component operations
//!
//! Functions for extracting and composing individual color channels
//! of 32 bpp images.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Color component selector for RGB channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbComponent {
    /// Red channel (bits 24-31)
    Red,
    /// Green channel (bits 16-23)
    Green,
    /// Blue channel (bits 8-15)
    Blue,
    /// Alpha channel (bits 0-7)
    Alpha,
}

impl Pix {
    /// Extract a single color component as an 8 bpp grayscale image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    pub fn get_rgb_component(&self, comp: RgbComponent) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let w = self.width();
        let h = self.height();
        let result = Pix::new(w, h, PixelDepth::Bit8)?;
        let mut result_mut = result.try_into_mut().unwrap();

        for y in 0..h {
            for x in 0..w {
                let pixel = self.get_pixel_unchecked(x, y);
                let val = match comp {
                    RgbComponent::Red => color::red(pixel),
                    RgbComponent::Green => color::green(pixel),
                    RgbComponent::Blue => color::blue(pixel),
                    RgbComponent::Alpha => color::alpha(pixel),
                };
                result_mut.set_pixel_unchecked(x, y, val as u32);
            }
        }

        Ok(result_mut.into())
    }

    /// Create a 32 bpp RGB image from three 8 bpp component images.
    ///
    /// All three images must have the same dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if any component is not 8 bpp,
    /// or [`Error::DimensionMismatch`] if dimensions differ.
    pub fn create_rgb_image(pix_r: &Pix, pix_g: &Pix, pix_b: &Pix) -> Result<Pix> {
        for pix in [pix_r, pix_g, pix_b] {
            if pix.depth() != PixelDepth::Bit8 {
                return Err(Error::UnsupportedDepth(pix.depth().bits()));
            }
        }

        let w = pix_r.width();
        let h = pix_r.height();
        for pix in [pix_g, pix_b] {
            if pix.width() != w || pix.height() != h {
                return Err(Error::DimensionMismatch {
                    expected: (w, h),
                    actual: (pix.width(), pix.height()),
                });
            }
        }

        let result = Pix::new(w, h, PixelDepth::Bit32)?;
        let mut result_mut = result.try_into_mut().unwrap();

        for y in 0..h {
            for x in 0..w {
                let r = pix_r.get_pixel_unchecked(x, y) as u8;
                let g = pix_g.get_pixel_unchecked(x, y) as u8;
                let b = pix_b.get_pixel_unchecked(x, y) as u8;
                result_mut.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
            }
        }

        Ok(result_mut.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_rgb_component() {
        let pix = Pix::new(3, 2, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_rgb(0, 0, 10, 20, 30).unwrap();
        pm.set_rgb(2, 1, 200, 100, 50).unwrap();
        let pix: Pix = pm.into();

        let red = pix.get_rgb_component(RgbComponent::Red).unwrap();
        let green = pix.get_rgb_component(RgbComponent::Green).unwrap();
        let blue = pix.get_rgb_component(RgbComponent::Blue).unwrap();

        assert_eq!(red.depth(), PixelDepth::Bit8);
        assert_eq!(red.get_pixel(0, 0), Some(10));
        assert_eq!(green.get_pixel(0, 0), Some(20));
        assert_eq!(blue.get_pixel(0, 0), Some(30));
        assert_eq!(red.get_pixel(2, 1), Some(200));
        assert_eq!(blue.get_pixel(1, 0), Some(0));
    }

    #[test]
    fn test_get_rgb_component_wrong_depth() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(pix.get_rgb_component(RgbComponent::Red).is_err());
    }

    #[test]
    fn test_create_rgb_image_roundtrip() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for y in 0..4 {
            for x in 0..4 {
                pm.set_rgb(x, y, (x * 60) as u8, (y * 60) as u8, 128).unwrap();
            }
        }
        let pix: Pix = pm.into();

        let r = pix.get_rgb_component(RgbComponent::Red).unwrap();
        let g = pix.get_rgb_component(RgbComponent::Green).unwrap();
        let b = pix.get_rgb_component(RgbComponent::Blue).unwrap();
        let rebuilt = Pix::create_rgb_image(&r, &g, &b).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(rebuilt.get_rgb(x, y), pix.get_rgb(x, y));
            }
        }
    }

    #[test]
    fn test_create_rgb_image_mismatch() {
        let a = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let b = Pix::new(4, 5, PixelDepth::Bit8).unwrap();
        assert!(Pix::create_rgb_image(&a, &a, &b).is_err());

        let c = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(Pix::create_rgb_image(&a, &c, &a).is_err());
    }
}
