//! Linear Codec: real feature vectors <-> [`FixedState`].
//!
//! - Encode: feature → tanh → (-1, 1) → `round((b + 1) * 127.5)` → [0, 255]
//! - Decode: [0, 255] → `b / 127.5 - 1` → clamp(±0.999) → atanh → feature
//!
//! ## Error budget
//!
//! Rounding in the bounded domain costs at most `0.5 / 127.5 ≈ 0.0039`, which
//! atanh stretches by `cosh²(x)`: about `0.0039` near zero, `0.0093` at
//! `|x| = 1`, `0.055` at `|x| = 2`. The decoded range is capped at
//! `atanh(0.999) ≈ 3.8002`, and the two outermost codes decode to
//! `±3.8002` (bytes 0 and 255) and `≈ ±2.77` (bytes 1 and 254). An input
//! with `|x| > 3.8` therefore loses `|x| - 3.8002` outright; inputs between
//! roughly 2.5 and 3.8 land on one of the few saturated codes and may miss by
//! up to about 1.0. No error bound holds deep in saturation.

use crate::byte_unit::ByteUnit;
use crate::fidelity::FidelityReport;
use crate::state::FixedState;
use crate::NUM_LAYERS;

/// Stateless linear tanh quantizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearCodec;

impl LinearCodec {
    /// Bounded-domain half width in byte units: (-1, 1) spans 0..=255.
    pub const SCALE: f32 = 127.5;

    /// Decode clamps the normalized value into `[-clip, clip]` before atanh.
    pub const DEFAULT_CLIP: f32 = 0.999;

    /// Quantize one feature. NaN is treated as `0.0`.
    #[inline]
    pub fn quantize(feature: f32) -> ByteUnit {
        let x = if feature.is_nan() { 0.0 } else { feature };
        let bounded = libm::tanhf(x);
        let byte = libm::roundf((bounded + 1.0) * Self::SCALE).clamp(0.0, 255.0);
        ByteUnit::from_raw(byte as u8)
    }

    /// Inverse of [`LinearCodec::quantize`] up to rounding and the clip.
    #[inline]
    pub fn dequantize(unit: ByteUnit, clip: f32) -> f32 {
        let normalized = unit.to_raw() as f32 / Self::SCALE - 1.0;
        libm::atanhf(normalized.clamp(-clip, clip))
    }

    /// Encode up to sixteen features; extra positions are ignored and missing
    /// positions keep the vacuum value `0`.
    pub fn encode(features: &[f32]) -> FixedState {
        let mut layers = FixedState::vacuum().get_all_layers();
        for (i, (slot, &value)) in layers.iter_mut().zip(features.iter()).enumerate() {
            *slot = Self::quantize(value);
            log::trace!("encode slot {}: {} -> {}", i, value, slot);
        }
        FixedState::from_layers(layers)
    }

    pub fn decode(state: &FixedState) -> [f32; NUM_LAYERS] {
        Self::decode_with_clip(state, Self::DEFAULT_CLIP)
    }

    pub fn decode_with_clip(state: &FixedState, clip: f32) -> [f32; NUM_LAYERS] {
        state.get_all_layers().map(|unit| Self::dequantize(unit, clip))
    }

    /// Encode then decode, comparing the first `min(16, len)` positions.
    pub fn measure_fidelity(features: &[f32]) -> FidelityReport {
        Self::measure_fidelity_with_clip(features, Self::DEFAULT_CLIP)
    }

    pub fn measure_fidelity_with_clip(features: &[f32], clip: f32) -> FidelityReport {
        let recovered = Self::decode_with_clip(&Self::encode(features), clip);
        FidelityReport::compare(features, &recovered)
    }
}
