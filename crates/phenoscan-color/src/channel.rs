//! Color channels of the analysis
//!
//! The nine channels examined by the color analysis: the RGB components,
//! the L*a*b* components, and the HSV components of the masked image.
//! Each channel carries its display label and a fixed display color used
//! when the channel is drawn in a histogram figure.

use crate::colorspace::{pix_convert_rgb_to_hsv, pix_convert_rgb_to_lab};
use crate::error::{ColorError, ColorResult};
use phenoscan_core::{Pix, PixelDepth, RgbComponent};

/// One of the nine analyzed color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ColorChannel {
    Blue = 0,
    Green = 1,
    Red = 2,
    Lightness = 3,
    GreenMagenta = 4,
    BlueYellow = 5,
    Hue = 6,
    Saturation = 7,
    Value = 8,
}

impl ColorChannel {
    /// All channels, in reporting order.
    pub const ALL: [ColorChannel; 9] = [
        ColorChannel::Blue,
        ColorChannel::Green,
        ColorChannel::Red,
        ColorChannel::Lightness,
        ColorChannel::GreenMagenta,
        ColorChannel::BlueYellow,
        ColorChannel::Hue,
        ColorChannel::Saturation,
        ColorChannel::Value,
    ];

    /// Display label, also used as the measurement field name.
    pub fn label(self) -> &'static str {
        match self {
            ColorChannel::Blue => "blue",
            ColorChannel::Green => "green",
            ColorChannel::Red => "red",
            ColorChannel::Lightness => "lightness",
            ColorChannel::GreenMagenta => "green-magenta",
            ColorChannel::BlueYellow => "blue-yellow",
            ColorChannel::Hue => "hue",
            ColorChannel::Saturation => "saturation",
            ColorChannel::Value => "value",
        }
    }

    /// Fixed display color (RGB) for histogram figures.
    pub fn display_color(self) -> (u8, u8, u8) {
        match self {
            ColorChannel::Blue => (0, 0, 255),            // blue
            ColorChannel::Green => (34, 139, 34),         // forestgreen
            ColorChannel::Red => (255, 0, 0),             // red
            ColorChannel::Lightness => (105, 105, 105),   // dimgray
            ColorChannel::GreenMagenta => (255, 0, 255),  // magenta
            ColorChannel::BlueYellow => (255, 255, 0),    // yellow
            ColorChannel::Hue => (138, 43, 226),          // blueviolet
            ColorChannel::Saturation => (0, 255, 255),    // cyan
            ColorChannel::Value => (255, 165, 0),         // orange
        }
    }
}

/// Quantize an 8 bpp channel image to `bins` levels.
///
/// Each value `v` maps to bucket `v * bins / 256`, so the result is
/// always below `bins`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidBins`] if `bins` is outside `[1, 256]`
/// and [`ColorError::InvalidInput`] if the image is not 8 bpp.
pub fn quantize_channel(pix: &Pix, bins: u32) -> ColorResult<Pix> {
    if bins == 0 || bins > 256 {
        return Err(ColorError::InvalidBins(bins));
    }
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::InvalidInput {
            expected: "an 8 bpp channel image",
            actual: pix.depth().bits(),
        });
    }

    let result = pix.create_template();
    let mut result_mut = result.try_into_mut().unwrap();

    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let val = pix.get_pixel_unchecked(x, y);
            result_mut.set_pixel_unchecked(x, y, val * bins / 256);
        }
    }

    Ok(result_mut.into())
}

/// The nine single-channel images split out of a masked RGB image
#[derive(Debug, Clone)]
pub struct ChannelSet {
    channels: [Pix; 9],
}

impl ChannelSet {
    /// Split a 32 bpp (masked) RGB image into the nine channels.
    ///
    /// Derives the L*a*b* and HSV representations, then extracts each
    /// component as an 8 bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidInput`] if the image is not 32 bpp.
    pub fn split(rgb: &Pix) -> ColorResult<ChannelSet> {
        if rgb.depth() != PixelDepth::Bit32 {
            return Err(ColorError::InvalidInput {
                expected: "a 32 bpp color image",
                actual: rgb.depth().bits(),
            });
        }

        let lab = pix_convert_rgb_to_lab(rgb)?;
        let hsv = pix_convert_rgb_to_hsv(rgb)?;

        // Converted images carry their triple in the R, G, B slots
        let channels = [
            rgb.get_rgb_component(RgbComponent::Blue)?,
            rgb.get_rgb_component(RgbComponent::Green)?,
            rgb.get_rgb_component(RgbComponent::Red)?,
            lab.get_rgb_component(RgbComponent::Red)?,
            lab.get_rgb_component(RgbComponent::Green)?,
            lab.get_rgb_component(RgbComponent::Blue)?,
            hsv.get_rgb_component(RgbComponent::Red)?,
            hsv.get_rgb_component(RgbComponent::Green)?,
            hsv.get_rgb_component(RgbComponent::Blue)?,
        ];

        Ok(ChannelSet { channels })
    }

    /// Get the image for one channel.
    pub fn get(&self, channel: ColorChannel) -> &Pix {
        &self.channels[channel as usize]
    }

    /// Quantize every channel to `bins` levels.
    pub fn quantize(&self, bins: u32) -> ColorResult<ChannelSet> {
        let mut quantized = Vec::with_capacity(9);
        for pix in &self.channels {
            quantized.push(quantize_channel(pix, bins)?);
        }
        // Length is fixed at 9 above
        let channels = quantized.try_into().unwrap();
        Ok(ChannelSet { channels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_rgb(r: u8, g: u8, b: u8, w: u32, h: u32) -> Pix {
        let pix = Pix::new(w, h, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for y in 0..h {
            for x in 0..w {
                pm.set_rgb(x, y, r, g, b).unwrap();
            }
        }
        pm.into()
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = ColorChannel::ALL.iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 9);
    }

    #[test]
    fn test_quantize_channel() {
        let pix = Pix::new(4, 1, PixelDepth::Bit8).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_pixel_unchecked(0, 0, 0);
        pm.set_pixel_unchecked(1, 0, 63);
        pm.set_pixel_unchecked(2, 0, 64);
        pm.set_pixel_unchecked(3, 0, 255);
        let pix: Pix = pm.into();

        let q = quantize_channel(&pix, 4).unwrap();
        assert_eq!(q.get_pixel(0, 0), Some(0));
        assert_eq!(q.get_pixel(1, 0), Some(0));
        assert_eq!(q.get_pixel(2, 0), Some(1));
        assert_eq!(q.get_pixel(3, 0), Some(3));
    }

    #[test]
    fn test_quantize_stays_below_bins() {
        let pix = Pix::new(256, 1, PixelDepth::Bit8).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for x in 0..256 {
            pm.set_pixel_unchecked(x, 0, x);
        }
        let pix: Pix = pm.into();

        for bins in [1u32, 3, 10, 100, 256] {
            let q = quantize_channel(&pix, bins).unwrap();
            for x in 0..256 {
                assert!(q.get_pixel(x, 0).unwrap() < bins);
            }
        }
    }

    #[test]
    fn test_quantize_invalid() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            quantize_channel(&pix, 0),
            Err(ColorError::InvalidBins(0))
        ));
        assert!(quantize_channel(&pix, 300).is_err());

        let rgb = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(quantize_channel(&rgb, 16).is_err());
    }

    #[test]
    fn test_split_uniform_green() {
        let pix = uniform_rgb(0, 255, 0, 3, 3);
        let set = ChannelSet::split(&pix).unwrap();

        assert_eq!(set.get(ColorChannel::Green).get_pixel(0, 0), Some(255));
        assert_eq!(set.get(ColorChannel::Red).get_pixel(0, 0), Some(0));
        assert_eq!(set.get(ColorChannel::Blue).get_pixel(0, 0), Some(0));
        // HSV of pure green
        assert_eq!(set.get(ColorChannel::Hue).get_pixel(0, 0), Some(60));
        assert_eq!(set.get(ColorChannel::Saturation).get_pixel(0, 0), Some(255));
        assert_eq!(set.get(ColorChannel::Value).get_pixel(0, 0), Some(255));
        // a* of green is below neutral, b* above
        assert!(set.get(ColorChannel::GreenMagenta).get_pixel(0, 0).unwrap() < 128);
        assert!(set.get(ColorChannel::BlueYellow).get_pixel(0, 0).unwrap() > 128);
    }

    #[test]
    fn test_split_rejects_gray_input() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            ChannelSet::split(&pix),
            Err(ColorError::InvalidInput { .. })
        ));
    }
}
