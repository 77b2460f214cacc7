//! Histogram figures and debug reporting
//!
//! A [`HistogramFigure`] is presentation data: the selected channels'
//! binned counts together with their labels and display colors. It stays
//! inert until rendered to a PNG line chart, so the numeric analysis
//! never depends on a drawing backend.
//!
//! The [`Reporter`] decides what happens to debug artifacts based on a
//! [`DebugMode`]: nothing, files in an output directory, or a log event.

use crate::channel::ColorChannel;
use crate::error::{ColorError, ColorResult};
use phenoscan_core::{Pix, PixelDepth};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Binned counts for one channel of a figure
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    pub channel: ColorChannel,
    pub counts: Vec<f32>,
}

/// An overlaid line plot of channel histograms
///
/// X axis is the bin index, y axis the pixel count per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramFigure {
    bins: u32,
    series: Vec<ChannelSeries>,
}

impl HistogramFigure {
    /// Create a figure from per-channel series.
    pub fn new(bins: u32, series: Vec<ChannelSeries>) -> Self {
        Self { bins, series }
    }

    /// Number of bins on the x axis.
    pub fn bins(&self) -> u32 {
        self.bins
    }

    /// The plotted series, in drawing order.
    pub fn series(&self) -> &[ChannelSeries] {
        &self.series
    }

    /// Render the figure as a PNG line chart.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Render`] if the chart cannot be drawn.
    pub fn render_png(&self, path: &Path) -> ColorResult<()> {
        self.draw(path)
            .map_err(|e| ColorError::Render(e.to_string()))
    }

    fn draw(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (720, 480)).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = self
            .series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .fold(0.0f32, f32::max)
            .max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(24)
            .y_label_area_size(32)
            .build_cartesian_2d(0u32..self.bins, 0f32..y_max * 1.05)?;

        // Tick labels are left off; rendering must not depend on fonts
        // being installed on the host
        chart
            .configure_mesh()
            .x_labels(0)
            .y_labels(0)
            .draw()?;

        for s in &self.series {
            let (r, g, b) = s.channel.display_color();
            let color = RGBColor(r, g, b);
            chart.draw_series(LineSeries::new(
                s.counts.iter().enumerate().map(|(i, &c)| (i as u32, c)),
                color.stroke_width(2),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

/// How debug artifacts are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    /// Produce no artifacts
    #[default]
    Off,
    /// Write artifacts as PNG files into the output directory
    Print,
    /// Log a summary of each artifact instead of writing it
    Display,
}

/// Delivers debug artifacts according to a [`DebugMode`]
///
/// Written files are numbered with a per-reporter sequence counter so
/// repeated analyses in one pipeline run do not collide.
#[derive(Debug)]
pub struct Reporter {
    mode: DebugMode,
    outdir: PathBuf,
    sequence: u32,
}

impl Reporter {
    /// Create a reporter writing into `outdir` (in `Print` mode).
    pub fn new(mode: DebugMode, outdir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            outdir: outdir.into(),
            sequence: 0,
        }
    }

    /// The configured debug mode.
    pub fn mode(&self) -> DebugMode {
        self.mode
    }

    /// Deliver a histogram figure.
    ///
    /// Returns the written path in `Print` mode, `None` otherwise.
    pub fn report_figure(&mut self, figure: &HistogramFigure) -> ColorResult<Option<PathBuf>> {
        match self.mode {
            DebugMode::Off => Ok(None),
            DebugMode::Print => {
                self.sequence += 1;
                fs::create_dir_all(&self.outdir)?;
                let path = self
                    .outdir
                    .join(format!("{}_color_histogram.png", self.sequence));
                figure.render_png(&path)?;
                Ok(Some(path))
            }
            DebugMode::Display => {
                self.sequence += 1;
                info!(
                    bins = figure.bins(),
                    series = figure.series().len(),
                    "color histogram figure"
                );
                Ok(None)
            }
        }
    }

    /// Deliver a masked image as a debug artifact.
    ///
    /// Returns the written path in `Print` mode, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidInput`] for non-32-bpp images and
    /// [`ColorError::Encode`] if PNG encoding fails.
    pub fn report_masked_image(&mut self, pix: &Pix) -> ColorResult<Option<PathBuf>> {
        if pix.depth() != PixelDepth::Bit32 {
            return Err(ColorError::InvalidInput {
                expected: "a 32 bpp color image",
                actual: pix.depth().bits(),
            });
        }
        match self.mode {
            DebugMode::Off => Ok(None),
            DebugMode::Print => {
                self.sequence += 1;
                fs::create_dir_all(&self.outdir)?;
                let path = self.outdir.join(format!("{}_masked.png", self.sequence));

                let img = image::RgbImage::from_fn(pix.width(), pix.height(), |x, y| {
                    let (r, g, b) = pix.get_rgb(x, y).unwrap_or((0, 0, 0));
                    image::Rgb([r, g, b])
                });
                img.save(&path)
                    .map_err(|e| ColorError::Encode(e.to_string()))?;
                Ok(Some(path))
            }
            DebugMode::Display => {
                self.sequence += 1;
                info!(
                    width = pix.width(),
                    height = pix.height(),
                    "masked image"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_figure() -> HistogramFigure {
        HistogramFigure::new(
            4,
            vec![
                ChannelSeries {
                    channel: ColorChannel::Blue,
                    counts: vec![0.0, 1.0, 2.0, 13.0],
                },
                ChannelSeries {
                    channel: ColorChannel::Red,
                    counts: vec![4.0, 0.0, 0.0, 12.0],
                },
            ],
        )
    }

    fn temp_outdir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("phenoscan-plot-{name}-{}", std::process::id()))
    }

    #[test]
    fn test_reporter_off_produces_nothing() {
        let mut reporter = Reporter::new(DebugMode::Off, temp_outdir("off"));
        let path = reporter.report_figure(&sample_figure()).unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn test_reporter_print_writes_png() {
        let outdir = temp_outdir("print");
        let mut reporter = Reporter::new(DebugMode::Print, &outdir);

        let path = reporter.report_figure(&sample_figure()).unwrap().unwrap();
        assert!(path.exists());
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("1_"));

        // Sequence advances per artifact
        let path2 = reporter.report_figure(&sample_figure()).unwrap().unwrap();
        assert!(path2.file_name().unwrap().to_str().unwrap().starts_with("2_"));

        fs::remove_dir_all(&outdir).unwrap();
    }

    #[test]
    fn test_reporter_masked_image() {
        let outdir = temp_outdir("masked");
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_rgb(1, 1, 0, 200, 0).unwrap();
        let pix: Pix = pm.into();

        let mut reporter = Reporter::new(DebugMode::Print, &outdir);
        let path = reporter.report_masked_image(&pix).unwrap().unwrap();
        assert!(path.exists());
        fs::remove_dir_all(&outdir).unwrap();

        let mut off = Reporter::new(DebugMode::Off, temp_outdir("masked-off"));
        assert!(off.report_masked_image(&pix).unwrap().is_none());

        let gray = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(off.report_masked_image(&gray).is_err());
    }
}
