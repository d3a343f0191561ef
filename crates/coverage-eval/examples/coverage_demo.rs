//! Coverage of a few textbook 95% intervals across the standard catalog
//!
//! Run with `RUST_LOG=coverage_eval=debug` to see per-bucket progress. Pass
//! `--json` for machine-readable output and `--precise` for 100k repeats.

use coverage_eval::{
    estimator_fn, infallible_fn, run_coverage, CoverageConfig, Error, EstimatorRegistry, Interval,
    JsonReporter, Reporter, TextReporter, FAST_REPEATS, HIGH_PRECISION_REPEATS,
};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use tracing_subscriber::EnvFilter;

const LEVEL: f64 = 0.95;

fn mean_and_sd(sample: &[f64]) -> (f64, f64) {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    if sample.len() < 2 {
        return (mean, 0.0);
    }
    let var = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let z = Normal::new(0.0, 1.0)?.inverse_cdf(0.5 + LEVEL / 2.0);

    let registry = EstimatorRegistry::new()
        // Normal approximation with the plug-in proportion variance
        .with(
            "wald",
            infallible_fn(move |s: &[f64]| {
                let (p, _) = mean_and_sd(s);
                let half = z * (p * (1.0 - p) / s.len() as f64).sqrt();
                (p - half, p + half)
            }),
        )?
        .with(
            "student-t",
            estimator_fn(|s: &[f64]| {
                let (mean, sd) = mean_and_sd(s);
                let df = (s.len().max(2) - 1) as f64;
                let t = StudentsT::new(0.0, 1.0, df)
                    .map_err(|e| Error::Other(anyhow::anyhow!("student t: {e}")))?
                    .inverse_cdf(0.5 + LEVEL / 2.0);
                let half = t * sd / (s.len() as f64).sqrt();
                Ok(Interval::new(mean - half, mean + half))
            }),
        )?
        .with(
            "min-max",
            infallible_fn(|s: &[f64]| {
                let lo = s.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (lo, hi)
            }),
        )?
        .with("unit", infallible_fn(|_s: &[f64]| (0.0, 1.0)))?;

    let args: Vec<String> = std::env::args().collect();
    let repeats = if args.iter().any(|a| a == "--precise") {
        HIGH_PRECISION_REPEATS
    } else {
        FAST_REPEATS
    };

    let config = CoverageConfig::new()
        .with_sample_sizes(vec![10, 100, 1000])
        .with_repeats(repeats)
        .with_seed(42);

    let report = run_coverage(config, &registry)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.iter().any(|a| a == "--json") {
        JsonReporter::new().pretty().render(&report, &mut out)?;
    } else {
        TextReporter::new().render(&report, &mut out)?;
    }

    Ok(())
}
