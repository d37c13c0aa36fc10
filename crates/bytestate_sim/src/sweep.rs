use bytestate_core::{CodecConfig, FidelityReport, Orchestrator, PipelineConfig, NUM_LAYERS};
use serde::Serialize;
use std::io;
use tracing::{debug, info, warn};

use crate::config::SweepConfig;
use crate::sampling::NormalSampler;

/// One CSV row: aggregated fidelity for a (sigma, config) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    pub sigma: f32,
    pub config: PipelineConfig,
    pub samples: usize,
    pub mean_error: f32,
    pub max_error: f32,
    pub fidelity_ok: bool,
}

/// Run every configured pipeline over the same seeded batch per sigma.
///
/// Fidelity is measured through each orchestrator's own encode/decode, so
/// transform recipes show up as added error.
pub fn run_sweep(config: &SweepConfig) -> Vec<SweepRow> {
    let mut rows = Vec::with_capacity(config.sigmas.len() * config.configs.len());

    for (i, &sigma) in config.sigmas.iter().enumerate() {
        let seed = config.seed.wrapping_add(i as u64);
        let batch = NormalSampler::new(seed, sigma).batch(config.samples, NUM_LAYERS);
        debug!(sigma, seed, vectors = batch.len(), "generated batch");

        for &pipeline in &config.configs {
            let orch = Orchestrator::with_codec_config(CodecConfig {
                pipeline,
                ..config.codec
            });
            let report =
                FidelityReport::aggregate(batch.iter().map(|f| orch.pipeline_fidelity(f)));
            let row = SweepRow {
                sigma,
                config: pipeline,
                samples: batch.len(),
                mean_error: report.mean_error,
                max_error: report.max_error,
                fidelity_ok: report.is_ok(config.codec.fidelity_tolerance),
            };

            if row.fidelity_ok {
                info!(
                    sigma,
                    config = %pipeline,
                    mean_error = row.mean_error,
                    max_error = row.max_error,
                    "sweep row"
                );
            } else {
                warn!(
                    sigma,
                    config = %pipeline,
                    mean_error = row.mean_error,
                    tolerance = config.codec.fidelity_tolerance,
                    "fidelity below tolerance"
                );
            }
            rows.push(row);
        }
    }

    rows
}

/// Write rows as CSV with a header line.
pub fn write_csv<W: io::Write>(rows: &[SweepRow], writer: W) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}
