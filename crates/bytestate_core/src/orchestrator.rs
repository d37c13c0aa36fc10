//! Pipeline Orchestrator
//!
//! One surface for:
//! 1. Feature encoding (linear, high fidelity)
//! 2. Semantic transforms (optional post-processing, fixed per orchestrator)
//! 3. Decoding (always the plain linear decode)
//! 4. Fidelity measurement
//!
//! The configuration is chosen at construction and never changes.

use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::codec::LinearCodec;
use crate::config::{CodecConfig, PipelineConfig};
use crate::error::Result;
use crate::fidelity::FidelityReport;
use crate::registry::{self, LayerInfo};
use crate::state::FixedState;
use crate::transform::Recipe;
use crate::NUM_LAYERS;

#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: CodecConfig,
    clip: f32,
    recipe: Option<Recipe>,
}

impl Orchestrator {
    /// Build from a configuration name (`"pure"`, `"with_processing"`,
    /// `"full_semantic"`). Unrecognized names behave as `"pure"`.
    pub fn new(config: &str) -> Self {
        Self::from_config(PipelineConfig::from_name(config))
    }

    pub fn from_config(pipeline: PipelineConfig) -> Self {
        Self::with_codec_config(CodecConfig::with_pipeline(pipeline))
    }

    pub fn with_codec_config(config: CodecConfig) -> Self {
        let recipe = match config.pipeline {
            PipelineConfig::Pure => None,
            PipelineConfig::WithProcessing => Some(Recipe::for_processing_layers()),
            PipelineConfig::FullSemantic => Some(Recipe::full_semantic()),
        };
        log::debug!(
            "orchestrator: {} ({} transform steps)",
            config.pipeline.description(),
            recipe.as_ref().map_or(0, Recipe::len)
        );
        Self {
            clip: config.effective_clip(),
            config,
            recipe,
        }
    }

    pub fn config(&self) -> PipelineConfig {
        self.config.pipeline
    }

    pub fn codec_config(&self) -> &CodecConfig {
        &self.config
    }

    /// Human-readable label of the configuration.
    pub fn config_name(&self) -> &'static str {
        self.config.pipeline.description()
    }

    /// Recipe run after encoding; `None` for `"pure"`.
    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn encode(&self, features: &[f32]) -> FixedState {
        let state = LinearCodec::encode(features);
        match &self.recipe {
            Some(recipe) => recipe.apply(state),
            None => state,
        }
    }

    /// Plain linear decode. Transforms applied by `encode` are not undone.
    pub fn decode(&self, state: &FixedState) -> [f32; NUM_LAYERS] {
        LinearCodec::decode_with_clip(state, self.clip)
    }

    pub fn process(&self, features: &[f32]) -> (FixedState, [f32; NUM_LAYERS]) {
        let state = self.encode(features);
        let recovered = self.decode(&state);
        (state, recovered)
    }

    /// Codec round-trip fidelity, independent of the configured recipe.
    pub fn measure_fidelity(&self, features: &[f32]) -> FidelityReport {
        let report = LinearCodec::measure_fidelity_with_clip(features, self.clip);
        if let Some(warning) = report.warning(self.config.fidelity_tolerance) {
            log::debug!("{}", warning);
        }
        report
    }

    /// Fidelity through this orchestrator's own encode/decode, transforms
    /// included.
    pub fn pipeline_fidelity(&self, features: &[f32]) -> FidelityReport {
        let (_, recovered) = self.process(features);
        FidelityReport::compare(features, &recovered)
    }

    pub fn layer_info(&self, index: usize) -> Result<LayerInfo> {
        registry::lookup(index)
    }

    /// Layer indices for a category name; unknown names give an empty list.
    pub fn layers_by_category(&self, category: &str) -> Vec<usize> {
        registry::layers_by_category_name(category)
    }

    #[cfg(not(feature = "parallel"))]
    pub fn encode_batch<F: AsRef<[f32]>>(&self, batch: &[F]) -> Vec<FixedState> {
        batch.iter().map(|f| self.encode(f.as_ref())).collect()
    }

    /// Encode every vector independently on the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn encode_batch<F: AsRef<[f32]> + Sync>(&self, batch: &[F]) -> Vec<FixedState> {
        batch.par_iter().map(|f| self.encode(f.as_ref())).collect()
    }

    /// Aggregate codec fidelity over a batch (mean of means, max of maxes).
    #[cfg(not(feature = "parallel"))]
    pub fn batch_fidelity<F: AsRef<[f32]>>(&self, batch: &[F]) -> FidelityReport {
        FidelityReport::aggregate(batch.iter().map(|f| self.measure_fidelity(f.as_ref())))
    }

    #[cfg(feature = "parallel")]
    pub fn batch_fidelity<F: AsRef<[f32]> + Sync>(&self, batch: &[F]) -> FidelityReport {
        let reports: Vec<FidelityReport> = batch
            .par_iter()
            .map(|f| self.measure_fidelity(f.as_ref()))
            .collect();
        FidelityReport::aggregate(reports)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::from_config(PipelineConfig::Pure)
    }
}
