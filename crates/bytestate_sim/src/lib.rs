//! Fidelity sweep harness for `bytestate_core`.
//!
//! Draws seeded normal feature vectors at several spreads, pushes them through
//! each pipeline configuration and reports the aggregated round-trip error.

pub mod config;
pub mod sampling;
pub mod sweep;

pub use config::{SweepConfig, SweepOverrides};
pub use sampling::NormalSampler;
pub use sweep::{run_sweep, write_csv, SweepRow};
