use anyhow::Context;
use bytestate_core::{CodecConfig, PipelineConfig};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SweepConfig {
    /// Standard deviations of the generated features
    #[serde(default = "default_sigmas")]
    pub sigmas: Vec<f32>,
    /// Feature vectors per sigma
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Base RNG seed; sigma `i` uses `seed + i`
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Pipeline configurations to run
    #[serde(default = "default_configs")]
    pub configs: Vec<PipelineConfig>,
    /// Tolerance and decode clip; `pipeline` is overridden per row
    #[serde(default)]
    pub codec: CodecConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sigmas: default_sigmas(),
            samples: default_samples(),
            seed: default_seed(),
            configs: default_configs(),
            codec: CodecConfig::default(),
        }
    }
}

fn default_sigmas() -> Vec<f32> {
    vec![0.25, 0.5, 1.0, 2.0]
}

fn default_samples() -> usize {
    1000
}

fn default_seed() -> u64 {
    42
}

fn default_configs() -> Vec<PipelineConfig> {
    PipelineConfig::ALL.to_vec()
}

impl SweepConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid sweep config")
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading sweep config {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Command-line overrides layered over a [`SweepConfig`]; unset flags keep
/// the file or default value.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct SweepOverrides {
    /// Comma-separated standard deviations
    #[arg(long, value_delimiter = ',')]
    pub sigma: Vec<f32>,

    /// Pipeline configurations to run
    #[arg(long, value_enum, value_delimiter = ',')]
    pub pipeline: Vec<PipelineConfig>,

    /// Feature vectors per sigma
    #[arg(long)]
    pub samples: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Mean round-trip error at or above which a row is marked degraded
    #[arg(long)]
    pub fidelity_tolerance: Option<f32>,

    /// Decode clamps normalized values into [-clip, clip] before atanh
    #[arg(long)]
    pub decode_clip: Option<f32>,
}

impl SweepOverrides {
    pub fn apply(&self, mut config: SweepConfig) -> SweepConfig {
        if !self.sigma.is_empty() {
            config.sigmas = self.sigma.clone();
        }
        if !self.pipeline.is_empty() {
            config.configs = self.pipeline.clone();
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(tolerance) = self.fidelity_tolerance {
            config.codec.fidelity_tolerance = tolerance;
        }
        if let Some(clip) = self.decode_clip {
            config.codec.decode_clip = clip;
        }
        config
    }
}
