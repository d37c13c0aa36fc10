//! Round-trip error reports for the linear codec.

use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Mean absolute round-trip error under which a feature vector counts as
/// faithfully encoded.
pub const DEFAULT_TOLERANCE: f32 = 0.01;

/// Round-trip error between a feature vector and its decoded reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FidelityReport {
    /// Mean absolute error over the compared positions
    pub mean_error: f32,
    /// Largest absolute error over the compared positions
    pub max_error: f32,
    /// Number of positions compared (`min(16, len)` for a single vector)
    pub compared: usize,
}

/// Mean error at or above the tolerance. A measured value, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FidelityWarning {
    pub mean_error: f32,
    pub tolerance: f32,
}

impl fmt::Display for FidelityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean round-trip error {:.6} at or above tolerance {:.6}",
            self.mean_error, self.tolerance
        )
    }
}

impl FidelityReport {
    /// Elementwise comparison over the overlapping prefix of both slices.
    pub fn compare(original: &[f32], recovered: &[f32]) -> Self {
        let mut sum = 0.0f32;
        let mut max_error = 0.0f32;
        let mut compared = 0usize;

        for (orig, recov) in original.iter().zip(recovered.iter()) {
            let err = libm::fabsf(orig - recov);
            sum += err;
            max_error = max_error.max(err);
            compared += 1;
        }

        let mean_error = if compared == 0 {
            0.0
        } else {
            sum / compared as f32
        };

        Self {
            mean_error,
            max_error,
            compared,
        }
    }

    /// Combine per-vector reports: mean of the means, max of the maxes.
    /// Reports that compared nothing are ignored.
    pub fn aggregate<I>(reports: I) -> Self
    where
        I: IntoIterator<Item = FidelityReport>,
    {
        let mut mean_sum = 0.0f64;
        let mut counted = 0usize;
        let mut max_error = 0.0f32;
        let mut compared = 0usize;

        for report in reports.into_iter().filter(|r| r.compared > 0) {
            mean_sum += report.mean_error as f64;
            max_error = max_error.max(report.max_error);
            compared += report.compared;
            counted += 1;
        }

        let mean_error = if counted == 0 {
            0.0
        } else {
            (mean_sum / counted as f64) as f32
        };

        Self {
            mean_error,
            max_error,
            compared,
        }
    }

    #[inline]
    pub fn is_ok(&self, tolerance: f32) -> bool {
        self.mean_error < tolerance
    }

    pub fn warning(&self, tolerance: f32) -> Option<FidelityWarning> {
        if self.is_ok(tolerance) {
            None
        } else {
            Some(FidelityWarning {
                mean_error: self.mean_error,
                tolerance,
            })
        }
    }

    /// One-line status against [`DEFAULT_TOLERANCE`].
    pub fn summary(&self) -> String {
        let status = if self.is_ok(DEFAULT_TOLERANCE) {
            "HIGH FIDELITY"
        } else {
            "DEGRADED"
        };
        format!(
            "{} (mean: {:.6}, max: {:.6}, n={})",
            status, self.mean_error, self.max_error, self.compared
        )
    }
}

impl From<FidelityReport> for (f32, f32) {
    fn from(report: FidelityReport) -> Self {
        (report.mean_error, report.max_error)
    }
}
