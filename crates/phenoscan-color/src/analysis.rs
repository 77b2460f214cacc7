//! Color analysis
//!
//! Computes per-channel histograms of a masked plant image and circular
//! statistics of its hue, the central measurement of a phenotyping
//! pipeline's color step.
//!
//! The analysis proceeds in one pass: mask the image, derive the L*a*b*
//! and HSV representations, quantize all nine channels into `bins`
//! levels, histogram each channel over the masked region, and compute
//! the circular hue statistics. Results land in a [`ColorData`] record
//! and are merged into the caller's [`Outputs`] aggregator. Nothing is
//! written to the aggregator if any step fails.

use crate::channel::{ChannelSet, ColorChannel};
use crate::circular::{self, HueStats};
use crate::error::{ColorError, ColorResult};
use crate::outputs::{Measurement, Outputs};
use crate::plot::{ChannelSeries, HistogramFigure};
use phenoscan_core::{Pix, PixelDepth};
use std::str::FromStr;
use tracing::debug;

/// Measurement category under which color fields are stored
pub const COLOR_CATEGORY: &str = "color_data";

/// Which channel group to draw as a histogram figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistPlot {
    /// All nine channels
    All,
    /// Blue, green, red
    Rgb,
    /// Lightness, green-magenta, blue-yellow
    Lab,
    /// Hue, saturation, value
    Hsv,
}

impl HistPlot {
    /// The channels drawn for this selection.
    pub fn channels(self) -> &'static [ColorChannel] {
        match self {
            HistPlot::All => &ColorChannel::ALL,
            HistPlot::Rgb => &[ColorChannel::Blue, ColorChannel::Green, ColorChannel::Red],
            HistPlot::Lab => &[
                ColorChannel::Lightness,
                ColorChannel::GreenMagenta,
                ColorChannel::BlueYellow,
            ],
            HistPlot::Hsv => &[
                ColorChannel::Hue,
                ColorChannel::Saturation,
                ColorChannel::Value,
            ],
        }
    }

    /// Parse an optional, case-insensitive selector string.
    ///
    /// `None` and `"none"` select no plot; `"all"`, `"rgb"`, `"lab"`,
    /// and `"hsv"` select the corresponding group.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidPlotType`] for any other string.
    pub fn parse(value: Option<&str>) -> ColorResult<Option<HistPlot>> {
        match value {
            None => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("none") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for HistPlot {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(HistPlot::All),
            "rgb" => Ok(HistPlot::Rgb),
            "lab" => Ok(HistPlot::Lab),
            "hsv" => Ok(HistPlot::Hsv),
            _ => Err(ColorError::InvalidPlotType(s.to_string())),
        }
    }
}

/// One cell of the tabular report row
#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    /// Record-type marker
    Tag(&'static str),
    /// Integer count
    Count(u32),
    /// Scalar statistic
    Scalar(f64),
    /// Ordered series
    Series(Vec<f64>),
}

/// The color measurement record
///
/// Carries the bin axis, the nine channel histograms, and the circular
/// hue statistics of one analysis. [`ColorData::HEADER`] and
/// [`ColorData::row`] expose the record as a 15-column table row for
/// reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorData {
    /// Number of quantization bins
    pub bins: u32,
    /// Bin axis: `0, 1, .., bins - 1`
    pub bin_values: Vec<f64>,
    /// Per-channel histograms in [`ColorChannel::ALL`] order
    pub histograms: Vec<(ColorChannel, Vec<f64>)>,
    /// Circular hue statistics
    pub hue: HueStats,
}

impl ColorData {
    /// Column labels of the report row.
    pub const HEADER: [&'static str; 15] = [
        "HEADER_COLOR",
        "bin-number",
        "bin-values",
        "blue",
        "green",
        "red",
        "lightness",
        "green-magenta",
        "blue-yellow",
        "hue",
        "saturation",
        "value",
        "circular_mean",
        "circular_std",
        "median",
    ];

    /// The histogram of one channel.
    pub fn histogram(&self, channel: ColorChannel) -> &[f64] {
        &self.histograms[channel as usize].1
    }

    /// The report row, matching [`ColorData::HEADER`] column for column.
    pub fn row(&self) -> Vec<ReportValue> {
        let mut row = Vec::with_capacity(Self::HEADER.len());
        row.push(ReportValue::Tag("COLOR_DATA"));
        row.push(ReportValue::Count(self.bins));
        row.push(ReportValue::Series(self.bin_values.clone()));
        for (_, hist) in &self.histograms {
            row.push(ReportValue::Series(hist.clone()));
        }
        row.push(ReportValue::Scalar(self.hue.circular_mean));
        row.push(ReportValue::Scalar(self.hue.circular_std));
        row.push(ReportValue::Scalar(self.hue.median));
        row
    }

    /// Merge all fields into the aggregator under [`COLOR_CATEGORY`].
    fn merge_into(&self, outputs: &mut Outputs) {
        outputs.add_measurement(
            COLOR_CATEGORY,
            "bin-number",
            Measurement::Scalar(self.bins as f64),
        );
        outputs.add_measurement(
            COLOR_CATEGORY,
            "bin-values",
            Measurement::Series(self.bin_values.clone()),
        );
        for (channel, hist) in &self.histograms {
            outputs.add_measurement(
                COLOR_CATEGORY,
                channel.label(),
                Measurement::Series(hist.clone()),
            );
        }
        outputs.add_measurement(
            COLOR_CATEGORY,
            "mean",
            Measurement::Scalar(self.hue.circular_mean),
        );
        outputs.add_measurement(
            COLOR_CATEGORY,
            "standard-deviation",
            Measurement::Scalar(self.hue.circular_std),
        );
        outputs.add_measurement(COLOR_CATEGORY, "median", Measurement::Scalar(self.hue.median));
    }
}

/// Result of one color analysis
#[derive(Debug, Clone)]
pub struct ColorAnalysis {
    /// The measurement record
    pub data: ColorData,
    /// The requested histogram figure, if a plot was selected
    pub figure: Option<HistogramFigure>,
    /// The masked input image, for debug reporting
    pub masked: Pix,
}

/// Analyze the color properties of a masked plant image.
///
/// # Arguments
///
/// * `rgb` - 32 bpp color image
/// * `mask` - Binary mask (1 or 8 bpp) of identical size; zero excludes
/// * `bins` - Number of quantization bins per channel, in `[1, 256]`
/// * `plot` - Optional channel group to build a histogram figure for
/// * `outputs` - Aggregator receiving the measurements and any figure
///
/// # Errors
///
/// Returns [`ColorError::InvalidInput`] if `rgb` is not a color image,
/// [`ColorError::InvalidBins`] for an out-of-range bin count,
/// [`ColorError::DegenerateHue`] if the masked region contains no pixel
/// with nonzero hue, and propagates core errors such as a mask dimension
/// mismatch. On error the aggregator is left untouched.
///
/// # Examples
///
/// ```
/// use phenoscan_core::{Pix, PixelDepth};
/// use phenoscan_color::{Outputs, analyze_color};
///
/// // A 2x2 green image, fully masked in
/// let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
/// let mut pm = pix.try_into_mut().unwrap();
/// for y in 0..2 {
///     for x in 0..2 {
///         pm.set_rgb(x, y, 30, 180, 40).unwrap();
///     }
/// }
/// let pix = pm.into();
///
/// let mask = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
/// let mut mm = mask.try_into_mut().unwrap();
/// for y in 0..2 {
///     for x in 0..2 {
///         mm.set_pixel(x, y, 255).unwrap();
///     }
/// }
/// let mask = mm.into();
///
/// let mut outputs = Outputs::new();
/// let analysis = analyze_color(&pix, &mask, 16, None, &mut outputs).unwrap();
/// assert_eq!(analysis.data.histograms.len(), 9);
/// ```
pub fn analyze_color(
    rgb: &Pix,
    mask: &Pix,
    bins: u32,
    plot: Option<HistPlot>,
    outputs: &mut Outputs,
) -> ColorResult<ColorAnalysis> {
    if rgb.depth() != PixelDepth::Bit32 {
        return Err(ColorError::InvalidInput {
            expected: "a 32 bpp color image",
            actual: rgb.depth().bits(),
        });
    }
    if bins == 0 || bins > 256 {
        return Err(ColorError::InvalidBins(bins));
    }

    let masked = rgb.apply_mask(mask)?;
    let channels = ChannelSet::split(&masked)?;
    let quantized = channels.quantize(bins)?;

    let mut histograms = Vec::with_capacity(ColorChannel::ALL.len());
    for channel in ColorChannel::ALL {
        let hist = quantized.get(channel).binned_histogram(Some(mask), bins)?;
        let counts: Vec<f64> = hist.iter().map(f64::from).collect();
        histograms.push((channel, counts));
    }

    let hue = circular::hue_stats(quantized.get(ColorChannel::Hue))?;

    debug!(
        bins,
        masked_pixels = mask.count_nonzero(),
        circular_mean = hue.circular_mean,
        "computed color histograms"
    );

    let bin_values: Vec<f64> = (0..bins).map(f64::from).collect();
    let data = ColorData {
        bins,
        bin_values,
        histograms,
        hue,
    };

    let figure = plot.map(|kind| {
        let series = kind
            .channels()
            .iter()
            .map(|&channel| ChannelSeries {
                channel,
                counts: data
                    .histogram(channel)
                    .iter()
                    .map(|&c| c as f32)
                    .collect(),
            })
            .collect();
        HistogramFigure::new(bins, series)
    });

    // All fallible work is done; the aggregator update cannot be partial
    data.merge_into(outputs);
    if let Some(fig) = &figure {
        outputs.add_artifact(fig.clone());
    }

    Ok(ColorAnalysis {
        data,
        figure,
        masked,
    })
}
