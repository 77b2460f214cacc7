//! Results aggregator
//!
//! Analyses report their measurements into an [`Outputs`] value owned by
//! the caller. Measurements are grouped by category (one per analysis
//! kind) and keyed by field name within the category. Repeated analyses
//! overwrite their own fields and leave other categories untouched.
//! Figures emitted by analyses accumulate in a separate artifact list.

use crate::plot::HistogramFigure;
use std::collections::BTreeMap;

/// A single measurement value
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// Scalar measurement
    Scalar(f64),
    /// Ordered series, e.g. a histogram or a bin axis
    Series(Vec<f64>),
}

/// Accumulated measurements and artifacts of an analysis run
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    measurements: BTreeMap<String, BTreeMap<String, Measurement>>,
    artifacts: Vec<HistogramFigure>,
}

impl Outputs {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a measurement, overwriting any previous value of the same
    /// field in the same category.
    pub fn add_measurement(&mut self, category: &str, field: &str, value: Measurement) {
        self.measurements
            .entry(category.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    /// Look up a measurement.
    pub fn measurement(&self, category: &str, field: &str) -> Option<&Measurement> {
        self.measurements.get(category)?.get(field)
    }

    /// All fields of one category.
    pub fn category(&self, category: &str) -> Option<&BTreeMap<String, Measurement>> {
        self.measurements.get(category)
    }

    /// Names of all categories with at least one measurement.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.measurements.keys().map(String::as_str)
    }

    /// Append an emitted figure to the artifact list.
    pub fn add_artifact(&mut self, figure: HistogramFigure) {
        self.artifacts.push(figure);
    }

    /// All artifacts emitted so far, in emission order.
    pub fn artifacts(&self) -> &[HistogramFigure] {
        &self.artifacts
    }
}
