use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "cli")]
use clap::ValueEnum;

use crate::codec::LinearCodec;
use crate::fidelity::DEFAULT_TOLERANCE;

/// Which recipe, if any, runs after encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PipelineConfig {
    /// Linear encoding only
    #[default]
    Pure,
    /// Linear encoding + processing-layer recipe
    WithProcessing,
    /// Linear encoding + every group recipe
    FullSemantic,
}

impl PipelineConfig {
    pub const ALL: [PipelineConfig; 3] = [
        PipelineConfig::Pure,
        PipelineConfig::WithProcessing,
        PipelineConfig::FullSemantic,
    ];

    /// Configuration string, as accepted by [`PipelineConfig::from_name`].
    pub const fn name(self) -> &'static str {
        match self {
            PipelineConfig::Pure => "pure",
            PipelineConfig::WithProcessing => "with_processing",
            PipelineConfig::FullSemantic => "full_semantic",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PipelineConfig::Pure => "Pure Linear Encoding",
            PipelineConfig::WithProcessing => "Linear + Processing Transforms",
            PipelineConfig::FullSemantic => "Full Semantic Routing",
        }
    }

    /// Lenient lookup: unrecognized names fall back to [`PipelineConfig::Pure`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown pipeline config {:?}, falling back to \"pure\"", name);
            PipelineConfig::Pure
        })
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized pipeline configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected one of: pure, with_processing, full_semantic")]
pub struct ParsePipelineError;

impl FromStr for PipelineConfig {
    type Err = ParsePipelineError;

    /// Strict: `-` and `_` are interchangeable, case is ignored, anything
    /// else is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PipelineConfig::ALL
            .into_iter()
            .find(|config| {
                config.name().len() == s.len()
                    && config
                        .name()
                        .bytes()
                        .zip(s.bytes())
                        .all(|(a, b)| a == b.to_ascii_lowercase() || (a == b'_' && b == b'-'))
            })
            .ok_or(ParsePipelineError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Transform recipe applied after encoding
    pub pipeline: PipelineConfig,

    /// Mean round-trip error at or above which a fidelity warning is raised
    pub fidelity_tolerance: f32,

    /// Decode clamps normalized values into [-clip, clip] before atanh
    pub decode_clip: f32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::Pure,
            fidelity_tolerance: DEFAULT_TOLERANCE,
            decode_clip: LinearCodec::DEFAULT_CLIP,
        }
    }
}

impl CodecConfig {
    pub fn with_pipeline(pipeline: PipelineConfig) -> Self {
        Self {
            pipeline,
            ..Self::default()
        }
    }

    /// Clip confined to `(0, 1)`; anything else falls back to the default.
    pub fn effective_clip(&self) -> f32 {
        if self.decode_clip > 0.0 && self.decode_clip < 1.0 {
            self.decode_clip
        } else {
            log::warn!(
                "decode_clip {} outside (0, 1), using {}",
                self.decode_clip,
                LinearCodec::DEFAULT_CLIP
            );
            LinearCodec::DEFAULT_CLIP
        }
    }
}
