//! Color space conversion
//!
//! 8-bit conversions from RGB to the two derived representations used by
//! the color analysis:
//!
//! - HSV with hue stored as halved degrees in `[0, 180)`, saturation and
//!   value in `[0, 255]`
//! - CIE L*a*b* (D65) with L* scaled by 255/100 and a*/b* offset by 128,
//!   so all three components fit in `[0, 255]`
//!
//! Gray pixels (R = G = B) get hue 0 and saturation 0.

use crate::error::{ColorError, ColorResult};
use phenoscan_core::{Pix, PixelDepth, color};

/// HSV color in 8-bit pipeline encoding
///
/// Hue correspondence: 0 red, 30 yellow, 60 green, 90 cyan, 120 blue,
/// 150 magenta. Hue wraps: 180 is stored as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv8 {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// CIE L*a*b* color in 8-bit pipeline encoding
///
/// `a` and `b` are centered on 128: values below 128 lean green
/// (respectively blue), values above lean magenta (respectively yellow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lab8 {
    pub l: u8,
    pub a: u8,
    pub b: u8,
}

/// Convert RGB to HSV with hue in `[0, 180)`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv8 {
    let ri = r as i32;
    let gi = g as i32;
    let bi = b as i32;

    let min = ri.min(gi).min(bi);
    let max = ri.max(gi).max(bi);
    let delta = max - min;

    let v = max as u8;
    if delta == 0 {
        return Hsv8 { h: 0, s: 0, v };
    }

    let s = (255.0 * delta as f32 / max as f32 + 0.5) as u8;
    let h_raw = if ri == max {
        (gi - bi) as f32 / delta as f32
    } else if gi == max {
        2.0 + (bi - ri) as f32 / delta as f32
    } else {
        4.0 + (ri - gi) as f32 / delta as f32
    };

    // Each of the six sectors spans 30 halved degrees
    let mut h = h_raw * 30.0;
    if h < 0.0 {
        h += 180.0;
    }
    if h >= 179.5 {
        h = 0.0;
    }
    let h = (h + 0.5) as u8;

    Hsv8 { h, s, v }
}

const LAB_THRESHOLD: f32 = 0.008856;

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > LAB_THRESHOLD {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn clamp_u8(v: f32) -> u8 {
    (v + 0.5).clamp(0.0, 255.0) as u8
}

/// Convert RGB to L*a*b* (D65 white point).
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab8 {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let x = 0.412453 * rf + 0.357580 * gf + 0.180423 * bf;
    let y = 0.212671 * rf + 0.715160 * gf + 0.072169 * bf;
    let z = 0.019334 * rf + 0.119193 * gf + 0.950227 * bf;

    // Normalize by the D65 reference white
    let xn = x / 0.950456;
    let zn = z / 1.088754;

    let l = if y > LAB_THRESHOLD {
        116.0 * y.cbrt() - 16.0
    } else {
        903.3 * y
    };
    let fx = lab_f(xn);
    let fy = lab_f(y);
    let fz = lab_f(zn);

    let a = 500.0 * (fx - fy) + 128.0;
    let b = 200.0 * (fy - fz) + 128.0;

    Lab8 {
        l: clamp_u8(l * 255.0 / 100.0),
        a: clamp_u8(a),
        b: clamp_u8(b),
    }
}

/// Convert an RGB image to its HSV representation.
///
/// The result is a 32 bpp image with H, S, V stored in the R, G, B
/// slots respectively.
///
/// # Errors
///
/// Returns [`ColorError::InvalidInput`] if the image is not 32 bpp.
pub fn pix_convert_rgb_to_hsv(pix: &Pix) -> ColorResult<Pix> {
    convert_pixels(pix, |r, g, b| {
        let hsv = rgb_to_hsv(r, g, b);
        (hsv.h, hsv.s, hsv.v)
    })
}

/// Convert an RGB image to its L*a*b* representation.
///
/// The result is a 32 bpp image with L*, a*, b* stored in the R, G, B
/// slots respectively.
///
/// # Errors
///
/// Returns [`ColorError::InvalidInput`] if the image is not 32 bpp.
pub fn pix_convert_rgb_to_lab(pix: &Pix) -> ColorResult<Pix> {
    convert_pixels(pix, |r, g, b| {
        let lab = rgb_to_lab(r, g, b);
        (lab.l, lab.a, lab.b)
    })
}

fn convert_pixels(pix: &Pix, f: impl Fn(u8, u8, u8) -> (u8, u8, u8)) -> ColorResult<Pix> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(ColorError::InvalidInput {
            expected: "a 32 bpp color image",
            actual: pix.depth().bits(),
        });
    }

    let result = pix.create_template();
    let mut result_mut = result.try_into_mut().unwrap();

    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
            let (c0, c1, c2) = f(r, g, b);
            result_mut.set_pixel_unchecked(x, y, color::compose_rgb(c0, c1, c2));
        }
    }

    Ok(result_mut.into())
}
