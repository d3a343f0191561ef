//! Report rendering
//!
//! Reporters only format; every number they print comes from a
//! [`CoverageReport`].

use crate::results::{CoverageReport, CoverageRecord, EstimatorCoverage};
use coverage_core::Result;
use serde::Serialize;
use std::io::Write;

/// Renders a coverage report to a byte sink
pub trait Reporter {
    fn render(&self, report: &CoverageReport, out: &mut dyn Write) -> Result<()>;

    /// Render into a `String`
    fn render_to_string(&self, report: &CoverageReport) -> Result<String> {
        let mut buf = Vec::new();
        self.render(report, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Human-readable tabular report
///
/// For every estimator and scenario it prints the scenario header followed by
/// one line per (α, sample size) pair. The miss fraction does not depend on
/// α; it is repeated so each nominal level can be read against the achieved
/// value.
#[derive(Debug, Clone)]
pub struct TextReporter {
    precision: usize,
    show_verdicts: bool,
}

impl Default for TextReporter {
    fn default() -> Self {
        Self {
            precision: 4,
            show_verdicts: true,
        }
    }
}

impl TextReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digits after the decimal point for miss fractions
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Append the per-line "ok"/"EXCEEDS" marks and per-scenario validity
    pub fn with_verdicts(mut self, show: bool) -> Self {
        self.show_verdicts = show;
        self
    }

    fn render_estimator(&self, report: &CoverageReport, est: &EstimatorCoverage, out: &mut dyn Write) -> Result<()> {
        let p = self.precision;
        let rule = "=".repeat(64);

        writeln!(out, "{rule}")?;
        writeln!(out, "Estimator: {}", est.estimator)?;
        writeln!(out, "{rule}")?;

        for sc in &est.scenarios {
            writeln!(out, "{}", sc.scenario)?;
            for &alpha in &report.alphas {
                for point in &sc.points {
                    write!(
                        out,
                        "  alpha = {:<6} n = {:<7} miss = {:.p$} (se {:.p$})",
                        alpha,
                        point.sample_size,
                        point.miss_fraction(),
                        point.standard_error(),
                    )?;
                    if self.show_verdicts {
                        let mark = if point.is_valid_at(alpha) { "ok" } else { "EXCEEDS" };
                        write!(out, "  {mark}")?;
                    }
                    if point.inverted > 0 {
                        write!(out, "  [{} inverted]", point.inverted)?;
                    }
                    writeln!(out)?;
                }
                if self.show_verdicts {
                    writeln!(out, "  alpha = {:<6} {}", alpha, sc.validity(alpha))?;
                }
            }
            writeln!(out)?;
        }

        writeln!(out, "{}", "-".repeat(64))?;
        writeln!(out, "End of estimator: {}", est.estimator)?;
        writeln!(out)?;
        Ok(())
    }
}

impl Reporter for TextReporter {
    fn render(&self, report: &CoverageReport, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "Coverage run: seed {}, {} repeats per bucket",
            report.seed, report.repeats
        )?;
        writeln!(out)?;
        for est in &report.estimators {
            self.render_estimator(report, est, out)?;
        }
        Ok(())
    }
}

/// Structured JSON report of flat coverage records
#[derive(Debug, Clone, Default)]
pub struct JsonReporter {
    pretty: bool,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    seed: u64,
    repeats: usize,
    sample_sizes: &'a [usize],
    alphas: &'a [f64],
    records: Vec<CoverageRecord>,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Reporter for JsonReporter {
    fn render(&self, report: &CoverageReport, out: &mut dyn Write) -> Result<()> {
        let doc = JsonDocument {
            seed: report.seed,
            repeats: report.repeats,
            sample_sizes: &report.sample_sizes,
            alphas: &report.alphas,
            records: report.records(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &doc)?;
        } else {
            serde_json::to_writer(&mut *out, &doc)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
