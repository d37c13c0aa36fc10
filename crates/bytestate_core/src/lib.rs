//! # bytestate_core
//!
//! Fixed-width semantic codec: real-valued feature vectors are quantized into a
//! 16-slot byte state ([`FixedState`]), one slot per semantic layer, and a small
//! closed vocabulary of per-layer transforms ([`Transform`]) is folded over that
//! state according to the layer's category.
//!
//! ```text
//!  features ──tanh──► (-1,1) ──affine──► [0,255] ──► FixedState ──recipe──► FixedState
//!  features ◄─atanh── (-1,1) ◄─affine─── [0,255] ◄──────────────────────────┘ (decode)
//! ```
//!
//! | Layers | Category    | Group transform                        |
//! |--------|-------------|----------------------------------------|
//! | 0-4    | Perception  | identity                               |
//! | 5-7    | Processing  | power(1), power(1), blend-toward-neutral |
//! | 8-A    | Interaction | blend-toward-neutral                   |
//! | B-C    | Emergence   | power(2), power(3)                     |
//! | D-F    | Meta        | power(2), power(2), identity           |
//!
//! The crate is `no_std` + `alloc` by default; transcendental math goes through
//! `libm` so encoding is bit-identical with and without `std`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod byte_unit;
pub mod codec;
pub mod config;
pub mod error;
pub mod fidelity;
pub mod orchestrator;
pub mod registry;
pub mod state;
pub mod transform;

pub use byte_unit::ByteUnit;
pub use codec::LinearCodec;
pub use config::{CodecConfig, PipelineConfig};
pub use error::{CodecError, Result};
pub use fidelity::{FidelityReport, FidelityWarning};
pub use orchestrator::Orchestrator;
pub use registry::{layers_in, lookup, Category, LayerInfo, SemanticLayer};
pub use state::{CollapseStrategy, FixedState};
pub use transform::{apply, full_recipe, Recipe, Transform};

/// Number of slots in a [`FixedState`], one per semantic layer.
pub const NUM_LAYERS: usize = 16;
