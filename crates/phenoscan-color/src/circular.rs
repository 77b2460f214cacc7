//! Circular statistics over the hue channel
//!
//! Hue is an angular quantity with period 180 in the 8-bit pipeline
//! encoding (degrees halved), so its mean and spread are computed on the
//! circle. Observations are weighted by frequency; hue value 0 is the
//! background produced by masking and is always excluded.

use crate::error::{ColorError, ColorResult};
use phenoscan_core::{Pix, PixelDepth};

/// Period of the hue domain: 8-bit hue is degrees halved.
pub const HUE_PERIOD: f64 = 180.0;

/// Circular statistics of the hue channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueStats {
    /// Circular mean, in `[0, 180)`
    pub circular_mean: f64,
    /// Circular standard deviation
    pub circular_std: f64,
    /// Ordinary (non-circular) weighted median
    pub median: f64,
}

/// Count the frequency of each nonzero hue value in an 8 bpp channel.
///
/// Returns `(value, count)` pairs sorted by value. Value 0 is treated
/// as background and omitted.
///
/// # Errors
///
/// Returns [`ColorError::InvalidInput`] if the image is not 8 bpp.
pub fn hue_frequencies(hue: &Pix) -> ColorResult<Vec<(u8, u64)>> {
    if hue.depth() != PixelDepth::Bit8 {
        return Err(ColorError::InvalidInput {
            expected: "an 8 bpp hue channel",
            actual: hue.depth().bits(),
        });
    }

    let mut counts = [0u64; 256];
    for y in 0..hue.height() {
        for x in 0..hue.width() {
            counts[hue.get_pixel_unchecked(x, y) as usize] += 1;
        }
    }

    Ok((1u16..256)
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (v as u8, counts[v as usize]))
        .collect())
}

/// Weighted sums of the unit vectors for a set of observations.
///
/// Returns `(sin_sum, cos_sum, total_weight)`, or `None` when the total
/// weight is zero.
fn resultant(observations: &[(f64, f64)], period: f64) -> Option<(f64, f64, f64)> {
    let scale = std::f64::consts::TAU / period;
    let mut s = 0.0;
    let mut c = 0.0;
    let mut n = 0.0;
    for &(value, weight) in observations {
        let angle = value * scale;
        s += weight * angle.sin();
        c += weight * angle.cos();
        n += weight;
    }
    (n > 0.0).then_some((s, c, n))
}

/// Circular mean of weighted observations, in `[0, period)`.
pub fn circular_mean(observations: &[(f64, f64)], period: f64) -> Option<f64> {
    let (s, c, _) = resultant(observations, period)?;
    let mut angle = s.atan2(c);
    if angle < 0.0 {
        angle += std::f64::consts::TAU;
    }
    Some(angle * period / std::f64::consts::TAU)
}

/// Circular standard deviation of weighted observations.
///
/// Defined as `sqrt(-2 ln R)` scaled to the period, where `R` is the
/// mean resultant length.
pub fn circular_std(observations: &[(f64, f64)], period: f64) -> Option<f64> {
    let (s, c, n) = resultant(observations, period)?;
    let r = (s.hypot(c) / n).min(1.0);
    Some((-2.0 * r.ln()).sqrt() * period / std::f64::consts::TAU)
}

/// Ordinary median of weighted observations.
///
/// `observations` must be sorted by value. The median is taken over the
/// expanded sequence where each value appears `weight` times; an even
/// total weight averages the two middle observations.
pub fn weighted_median(observations: &[(f64, u64)]) -> Option<f64> {
    let total: u64 = observations.iter().map(|&(_, w)| w).sum();
    if total == 0 {
        return None;
    }

    // 0-based positions of the middle observation(s)
    let lower = (total - 1) / 2;
    let upper = total / 2;

    let mut cumulative = 0u64;
    let mut lower_val = None;
    for &(value, weight) in observations {
        cumulative += weight;
        if lower_val.is_none() && cumulative > lower {
            lower_val = Some(value);
        }
        if cumulative > upper {
            let lo = lower_val.unwrap_or(value);
            return Some((lo + value) / 2.0);
        }
    }
    None
}

/// Compute the circular hue statistics of a quantized hue channel.
///
/// # Errors
///
/// Returns [`ColorError::DegenerateHue`] when every pixel has hue 0,
/// which makes the statistics undefined.
pub fn hue_stats(hue: &Pix) -> ColorResult<HueStats> {
    let frequencies = hue_frequencies(hue)?;
    if frequencies.is_empty() {
        return Err(ColorError::DegenerateHue);
    }

    let weighted: Vec<(f64, f64)> = frequencies
        .iter()
        .map(|&(v, w)| (v as f64, w as f64))
        .collect();
    let median_obs: Vec<(f64, u64)> = frequencies.iter().map(|&(v, w)| (v as f64, w)).collect();

    // Frequencies are non-empty here, so the statistics always exist
    Ok(HueStats {
        circular_mean: circular_mean(&weighted, HUE_PERIOD).unwrap(),
        circular_std: circular_std(&weighted, HUE_PERIOD).unwrap(),
        median: weighted_median(&median_obs).unwrap(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn hue_image(values: &[u8]) -> Pix {
        let pix = Pix::new(values.len() as u32, 1, PixelDepth::Bit8).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for (x, &v) in values.iter().enumerate() {
            pm.set_pixel_unchecked(x as u32, 0, v as u32);
        }
        pm.into()
    }

    #[test]
    fn test_hue_frequencies_excludes_background() {
        let pix = hue_image(&[0, 0, 60, 60, 60, 120]);
        let freqs = hue_frequencies(&pix).unwrap();
        assert_eq!(freqs, vec![(60, 3), (120, 1)]);
    }

    #[test]
    fn test_circular_mean_single_value() {
        let obs = [(45.0, 5.0)];
        assert!((circular_mean(&obs, HUE_PERIOD).unwrap() - 45.0).abs() < EPS);
        // The resultant length of a point mass rounds to 1 within float
        // error, so the spread is only near zero
        assert!(circular_std(&obs, HUE_PERIOD).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_circular_mean_wraps_across_zero() {
        // 170 and 10 are 20 apart on the circle; their mean is 0
        let obs = [(170.0, 1.0), (10.0, 1.0)];
        let mean = circular_mean(&obs, HUE_PERIOD).unwrap();
        assert!(mean < EPS || (HUE_PERIOD - mean) < EPS, "mean = {mean}");
    }

    #[test]
    fn test_circular_stats_rotation_invariance() {
        let obs = [(10.0, 2.0), (50.0, 1.0), (85.0, 3.0)];
        let mean = circular_mean(&obs, HUE_PERIOD).unwrap();
        let std = circular_std(&obs, HUE_PERIOD).unwrap();

        for shift in [30.0, 90.0, 137.0] {
            let shifted: Vec<(f64, f64)> = obs
                .iter()
                .map(|&(v, w)| ((v + shift) % HUE_PERIOD, w))
                .collect();
            let mean_s = circular_mean(&shifted, HUE_PERIOD).unwrap();
            let std_s = circular_std(&shifted, HUE_PERIOD).unwrap();

            let expected = (mean + shift) % HUE_PERIOD;
            let diff = (mean_s - expected).abs();
            let diff = diff.min(HUE_PERIOD - diff);
            assert!(diff < 1e-6, "shift {shift}: {mean_s} vs {expected}");
            assert!((std_s - std).abs() < 1e-6);
        }
    }

    #[test]
    fn test_circular_std_grows_with_spread() {
        let tight = [(40.0, 1.0), (50.0, 1.0)];
        let wide = [(10.0, 1.0), (80.0, 1.0)];
        let std_tight = circular_std(&tight, HUE_PERIOD).unwrap();
        let std_wide = circular_std(&wide, HUE_PERIOD).unwrap();
        assert!(std_wide > std_tight);
    }

    #[test]
    fn test_weighted_median_odd_even() {
        // Expanded: [2, 2, 3] -> 2
        assert_eq!(weighted_median(&[(2.0, 2), (3.0, 1)]), Some(2.0));
        // Expanded: [2, 3] -> 2.5
        assert_eq!(weighted_median(&[(2.0, 1), (3.0, 1)]), Some(2.5));
        // Expanded: [1, 5, 5, 9] -> 5
        assert_eq!(weighted_median(&[(1.0, 1), (5.0, 2), (9.0, 1)]), Some(5.0));
        assert_eq!(weighted_median(&[]), None);
    }

    #[test]
    fn test_weighted_median_middle_straddles_values() {
        // Expanded: [1, 1, 3, 3] -> (1 + 3) / 2 = 2
        assert_eq!(weighted_median(&[(1.0, 2), (3.0, 2)]), Some(2.0));
    }

    #[test]
    fn test_hue_stats_uniform() {
        let pix = hue_image(&[0, 30, 30, 30]);
        let stats = hue_stats(&pix).unwrap();
        assert!((stats.circular_mean - 30.0).abs() < EPS);
        assert!(stats.circular_std.abs() < 1e-6);
        assert!((stats.median - 30.0).abs() < EPS);
    }

    #[test]
    fn test_hue_stats_degenerate() {
        let pix = hue_image(&[0, 0, 0, 0]);
        assert!(matches!(hue_stats(&pix), Err(ColorError::DegenerateHue)));
    }

    #[test]
    fn test_hue_stats_wrong_depth() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            hue_stats(&pix),
            Err(ColorError::InvalidInput { .. })
        ));
    }
}
