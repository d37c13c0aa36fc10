//! Transform Pipeline
//!
//! Post-encoding semantic processing. Each category of layers gets its own
//! recipe of [`Transform`]s; a [`Recipe`] is folded over a [`FixedState`]
//! left to right, one slot at a time.
//!
//! Transforms are one-way: nothing here is inverted by decode.

use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::byte_unit::ByteUnit;
use crate::registry::{layers_in, Category, SemanticLayer};
use crate::state::FixedState;
use crate::NUM_LAYERS;

/// Per-slot transform vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// No change
    Identity,

    /// Amplify deviation from the midpoint by `n` ([`ByteUnit::power`])
    Power(u32),

    /// Blend with [`ByteUnit::NEUTRAL`]
    BlendTowardNeutral,

    /// Blend with a specific value
    BlendWith(ByteUnit),

    /// Normalized product with a specific value
    Multiply(ByteUnit),

    /// XOR with a specific value
    BitwiseCombine(ByteUnit),
}

impl Transform {
    #[inline]
    pub fn apply_to(self, unit: ByteUnit) -> ByteUnit {
        match self {
            Transform::Identity => unit,
            Transform::Power(n) => unit.power(n),
            Transform::BlendTowardNeutral => unit.blend(ByteUnit::NEUTRAL),
            Transform::BlendWith(other) => unit.blend(other),
            Transform::Multiply(other) => unit.multiply(other),
            Transform::BitwiseCombine(other) => unit.bitwise_combine(other),
        }
    }

    /// The group transform for `layer`.
    pub const fn recommended_for(layer: SemanticLayer) -> Self {
        match layer {
            // PERCEPTION: raw features pass through
            SemanticLayer::Photonic
            | SemanticLayer::Acoustic
            | SemanticLayer::Olfactory
            | SemanticLayer::Gustatory
            | SemanticLayer::Dermic => Transform::Identity,

            // PROCESSING: mild pass, then environmental blend
            SemanticLayer::Electronic | SemanticLayer::Psychomotor => Transform::Power(1),
            SemanticLayer::Environmental => Transform::BlendTowardNeutral,

            // INTERACTION: blending
            SemanticLayer::Cybernetic
            | SemanticLayer::Geopolitical
            | SemanticLayer::Cosmopolitical => Transform::BlendTowardNeutral,

            // EMERGENCE: amplification
            SemanticLayer::Synergic => Transform::Power(2),
            SemanticLayer::Quantum => Transform::Power(3),

            // META
            SemanticLayer::Superposition | SemanticLayer::Entanglement => Transform::Power(2),
            SemanticLayer::Collapse => Transform::Identity,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => f.write_str("identity"),
            Transform::Power(n) => write!(f, "power({})", n),
            Transform::BlendTowardNeutral => f.write_str("blend-toward-neutral"),
            Transform::BlendWith(other) => write!(f, "blend({})", other),
            Transform::Multiply(other) => write!(f, "multiply({})", other),
            Transform::BitwiseCombine(other) => write!(f, "bitwise-combine({})", other),
        }
    }
}

/// Ordered `(layer_index, transform)` steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    steps: Vec<(usize, Transform)>,
}

impl Recipe {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step. Out-of-range indices are kept and skipped at apply time.
    pub fn with_step(mut self, layer: usize, transform: Transform) -> Self {
        self.steps.push((layer, transform));
        self
    }

    /// Append every step of `other`, preserving order.
    pub fn extend(mut self, other: &Recipe) -> Self {
        self.steps.extend_from_slice(&other.steps);
        self
    }

    /// Group recipe for `category`: each layer in the range with its
    /// recommended transform.
    pub fn for_category(category: Category) -> Self {
        layers_in(category)
            .filter_map(SemanticLayer::from_index)
            .map(|layer| (layer.index(), Transform::recommended_for(layer)))
            .collect()
    }

    pub fn for_perception_layers() -> Self {
        Self::for_category(Category::Perception)
    }

    pub fn for_processing_layers() -> Self {
        Self::for_category(Category::Processing)
    }

    pub fn for_interaction_layers() -> Self {
        Self::for_category(Category::Interaction)
    }

    pub fn for_emergence_layers() -> Self {
        Self::for_category(Category::Emergence)
    }

    pub fn for_meta_layers() -> Self {
        Self::for_category(Category::Meta)
    }

    /// All five group recipes in category order.
    pub fn full_semantic() -> Self {
        Category::ALL
            .into_iter()
            .fold(Recipe::new(), |acc, category| {
                acc.extend(&Recipe::for_category(category))
            })
    }

    pub fn steps(&self) -> &[(usize, Transform)] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, Transform)> + '_ {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fold the recipe over `state`.
    pub fn apply(&self, state: FixedState) -> FixedState {
        apply(state, &self.steps)
    }
}

impl FromIterator<(usize, Transform)> for Recipe {
    fn from_iter<I: IntoIterator<Item = (usize, Transform)>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Recipe {
    type Item = &'a (usize, Transform);
    type IntoIter = core::slice::Iter<'a, (usize, Transform)>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Fold `steps` over `state` left to right: read slot, transform, write back.
///
/// Steps naming a slot outside `0..16` are skipped (logged at `warn`), so any
/// recipe applies without failing.
pub fn apply(state: FixedState, steps: &[(usize, Transform)]) -> FixedState {
    steps.iter().fold(state, |current, &(layer, transform)| {
        let Ok(unit) = current.get_layer(layer) else {
            log::warn!(
                "skipping {} on layer {}: state has {} slots",
                transform,
                layer,
                NUM_LAYERS
            );
            return current;
        };
        let next = transform.apply_to(unit);
        log::debug!("layer {}: {} {} -> {}", layer, transform, unit, next);
        current.with_layer(layer, next).unwrap_or(current)
    })
}

/// Every layer once, with its group transform.
pub fn full_recipe() -> Recipe {
    Recipe::full_semantic()
}
