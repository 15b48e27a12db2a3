//! Comparison report serialization
//!
//! This module records how the naive and vectorized strategies compare on a
//! problem, and optionally a gradient check, so runs of the diagnostic CLI can
//! be saved and inspected later.

use crate::core::{BatchShape, LossError, Result, Strategy};
use crate::utils::compare::StrategyComparison;
use crate::utils::gradcheck::{GradCheckEntry, GradCheckReport};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable summary of one strategy comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub metadata: ReportMetadata,
    pub losses: LossSummary,
    pub gradient: GradientSummary,
    pub timings_ms: TimingSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grad_check: Option<GradCheckSummary>,
}

/// Where and how the report was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Library version used to create the report
    pub library_version: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    pub shape: ShapeSummary,
    pub reg: f64,
    /// Seed of the random problem, if one was generated
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSummary {
    pub n: usize,
    pub d: usize,
    pub c: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LossSummary {
    pub naive: f64,
    pub vectorized: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GradientSummary {
    pub frobenius_difference: f64,
    pub max_abs_difference: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingSummary {
    pub naive: f64,
    pub vectorized: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradCheckSummary {
    pub strategy: String,
    pub max_relative_error: f64,
    pub entries: Vec<GradCheckEntry>,
}

impl From<BatchShape> for ShapeSummary {
    fn from(shape: BatchShape) -> Self {
        Self {
            n: shape.n,
            d: shape.d,
            c: shape.c,
        }
    }
}

impl ComparisonReport {
    /// Build a report from a finished comparison
    pub fn from_comparison(
        comparison: &StrategyComparison,
        shape: BatchShape,
        reg: f64,
        seed: Option<u64>,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
                shape: shape.into(),
                reg,
                seed,
            },
            losses: LossSummary {
                naive: comparison.naive_loss,
                vectorized: comparison.vectorized_loss,
                difference: comparison.loss_difference,
            },
            gradient: GradientSummary {
                frobenius_difference: comparison.gradient_difference,
                max_abs_difference: comparison.max_gradient_difference,
            },
            timings_ms: TimingSummary {
                naive: comparison.naive_time.as_secs_f64() * 1000.0,
                vectorized: comparison.vectorized_time.as_secs_f64() * 1000.0,
            },
            grad_check: None,
        }
    }

    /// Attach a gradient check run with `strategy`
    pub fn with_grad_check(mut self, strategy: Strategy, report: &GradCheckReport) -> Self {
        self.grad_check = Some(GradCheckSummary {
            strategy: strategy.to_string(),
            max_relative_error: report.max_relative_error(),
            entries: report.entries.clone(),
        });
        self
    }

    /// Save report to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(LossError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| LossError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load report from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(LossError::IoError)?;
        let reader = BufReader::new(file);
        let report = serde_json::from_reader(reader)
            .map_err(|e| LossError::SerializationError(e.to_string()))?;
        Ok(report)
    }

    /// Print report summary
    pub fn print_summary(&self) {
        let shape = self.metadata.shape;
        println!("=== Hinge Loss Comparison ===");
        println!("Problem: N={}, D={}, C={}", shape.n, shape.d, shape.c);
        println!("Regularization: {}", self.metadata.reg);
        if let Some(seed) = self.metadata.seed {
            println!("Seed: {seed}");
        }
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
        println!("Loss:");
        println!("  Naive:      {:.9e}", self.losses.naive);
        println!("  Vectorized: {:.9e}", self.losses.vectorized);
        println!("  Difference: {:.3e}", self.losses.difference);
        println!("Gradient:");
        println!(
            "  Frobenius difference: {:.3e}",
            self.gradient.frobenius_difference
        );
        println!(
            "  Max abs difference:   {:.3e}",
            self.gradient.max_abs_difference
        );
        println!("Timings (ms):");
        println!("  Naive:      {:.3}", self.timings_ms.naive);
        println!("  Vectorized: {:.3}", self.timings_ms.vectorized);

        if let Some(check) = &self.grad_check {
            println!("Gradient check ({}):", check.strategy);
            for entry in &check.entries {
                println!(
                    "  ({}, {}) numerical: {:.6e} analytic: {:.6e} relative error: {:.3e}",
                    entry.row, entry.col, entry.numerical, entry.analytic, entry.relative_error
                );
            }
            println!("  Max relative error: {:.3e}", check.max_relative_error);
        }
    }
}
