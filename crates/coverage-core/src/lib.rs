//! Core types for Monte Carlo coverage simulation
//!
//! This crate provides the pieces shared by the sampling and evaluation
//! crates:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`execution`]: sequential and rayon-backed execution engines
//! - [`rng`]: hierarchical seeding so every trial has an independent,
//!   reproducible random stream
//!
//! # Example
//!
//! ```rust
//! use coverage_core::{execution::sequential, ExecutionEngine, StreamSeed};
//! use rand::Rng;
//!
//! let engine = sequential();
//! let stream = StreamSeed::new(42).derive(0);
//! let draws: Vec<f64> = engine.execute_batch(4, |i| stream.trial_rng(i as u64).gen());
//! assert_eq!(draws.len(), 4);
//! ```

pub mod error;
pub mod execution;
pub mod rng;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{auto_engine, sequential, AutoEngine, ExecutionEngine, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

pub use rng::{entropy_seed, StreamSeed};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
