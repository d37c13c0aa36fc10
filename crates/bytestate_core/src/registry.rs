//! Semantic Layer Registry
//!
//! 16-layer topology, partitioned into contiguous category ranges:
//! - L0-L4:   PERCEPTION  (sensory input)
//! - L5-L7:   PROCESSING  (digital transformation)
//! - L8-LA:   INTERACTION (cross-layer routing)
//! - LB-LC:   EMERGENCE   (synergic properties)
//! - LD-LF:   META        (reflection and collapse)
//!
//! The partition is fixed; transform recipes key off it.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{CodecError, Result};
use crate::NUM_LAYERS;

/// Functional group of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    Perception = 0,
    Processing = 1,
    Interaction = 2,
    Emergence = 3,
    Meta = 4,
}

impl Category {
    /// Every category, in layer order.
    pub const ALL: [Category; 5] = [
        Category::Perception,
        Category::Processing,
        Category::Interaction,
        Category::Emergence,
        Category::Meta,
    ];

    /// Contiguous layer indices owned by this category.
    pub const fn layers(self) -> Range<usize> {
        match self {
            Category::Perception => 0..5,
            Category::Processing => 5..8,
            Category::Interaction => 8..11,
            Category::Emergence => 11..13,
            Category::Meta => 13..16,
        }
    }

    /// Category owning `index`, or `None` past the last layer.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0..=4 => Some(Category::Perception),
            5..=7 => Some(Category::Processing),
            8..=10 => Some(Category::Interaction),
            11..=12 => Some(Category::Emergence),
            13..=15 => Some(Category::Meta),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::Perception => "PERCEPTION",
            Category::Processing => "PROCESSING",
            Category::Interaction => "INTERACTION",
            Category::Emergence => "EMERGENCE",
            Category::Meta => "META",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown semantic category")]
pub struct ParseCategoryError;

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Case-insensitive: `"meta"`, `"Meta"` and `"META"` all parse.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseCategoryError)
    }
}

/// The sixteen named layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SemanticLayer {
    // PERCEPTION (0-4)
    Photonic = 0,
    Acoustic = 1,
    Olfactory = 2,
    Gustatory = 3,
    Dermic = 4,

    // PROCESSING (5-7)
    Electronic = 5,
    Psychomotor = 6,
    Environmental = 7,

    // INTERACTION (8-A)
    Cybernetic = 8,
    Geopolitical = 9,
    Cosmopolitical = 10,

    // EMERGENCE (B-C)
    Synergic = 11,
    Quantum = 12,

    // META (D-F)
    Superposition = 13,
    Entanglement = 14,
    Collapse = 15,
}

const LAYERS: [SemanticLayer; NUM_LAYERS] = [
    SemanticLayer::Photonic,
    SemanticLayer::Acoustic,
    SemanticLayer::Olfactory,
    SemanticLayer::Gustatory,
    SemanticLayer::Dermic,
    SemanticLayer::Electronic,
    SemanticLayer::Psychomotor,
    SemanticLayer::Environmental,
    SemanticLayer::Cybernetic,
    SemanticLayer::Geopolitical,
    SemanticLayer::Cosmopolitical,
    SemanticLayer::Synergic,
    SemanticLayer::Quantum,
    SemanticLayer::Superposition,
    SemanticLayer::Entanglement,
    SemanticLayer::Collapse,
];

impl SemanticLayer {
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_LAYERS {
            Some(LAYERS[index])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            SemanticLayer::Photonic => "Photonic",
            SemanticLayer::Acoustic => "Acoustic",
            SemanticLayer::Olfactory => "Olfactory",
            SemanticLayer::Gustatory => "Gustatory",
            SemanticLayer::Dermic => "Dermic",
            SemanticLayer::Electronic => "Electronic",
            SemanticLayer::Psychomotor => "Psychomotor",
            SemanticLayer::Environmental => "Environmental",
            SemanticLayer::Cybernetic => "Cybernetic",
            SemanticLayer::Geopolitical => "Geopolitical",
            SemanticLayer::Cosmopolitical => "Cosmopolitical",
            SemanticLayer::Synergic => "Synergic",
            SemanticLayer::Quantum => "Quantum",
            SemanticLayer::Superposition => "Superposition",
            SemanticLayer::Entanglement => "Entanglement",
            SemanticLayer::Collapse => "Collapse",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            SemanticLayer::Photonic
            | SemanticLayer::Acoustic
            | SemanticLayer::Olfactory
            | SemanticLayer::Gustatory
            | SemanticLayer::Dermic => Category::Perception,

            SemanticLayer::Electronic
            | SemanticLayer::Psychomotor
            | SemanticLayer::Environmental => Category::Processing,

            SemanticLayer::Cybernetic
            | SemanticLayer::Geopolitical
            | SemanticLayer::Cosmopolitical => Category::Interaction,

            SemanticLayer::Synergic | SemanticLayer::Quantum => Category::Emergence,

            SemanticLayer::Superposition
            | SemanticLayer::Entanglement
            | SemanticLayer::Collapse => Category::Meta,
        }
    }

    /// Perception and Processing layers carry linearly encoded features;
    /// the higher groups hold derived values.
    pub const fn is_linear_encoding(self) -> bool {
        matches!(self.category(), Category::Perception | Category::Processing)
    }

    pub const fn info(self) -> LayerInfo {
        LayerInfo {
            index: self.index(),
            name: self.name(),
            category: self.category(),
        }
    }
}

impl fmt::Display for SemanticLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{:X}:{}", self.index(), self.name())
    }
}

/// One registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerInfo {
    pub index: usize,
    pub name: &'static str,
    pub category: Category,
}

/// Name and category of layer `index`.
pub fn lookup(index: usize) -> Result<LayerInfo> {
    SemanticLayer::from_index(index)
        .map(SemanticLayer::info)
        .ok_or(CodecError::UnknownLayer { index })
}

/// Indices of the layers in `category`, ascending.
pub fn layers_in(category: Category) -> Range<usize> {
    category.layers()
}

/// Like [`layers_in`] but keyed by a category name; unknown names yield an
/// empty list.
pub fn layers_by_category_name(name: &str) -> Vec<usize> {
    name.parse::<Category>()
        .map(|category| layers_in(category).collect())
        .unwrap_or_default()
}

/// Every registry row in index order.
pub fn all_layers() -> [LayerInfo; NUM_LAYERS] {
    LAYERS.map(SemanticLayer::info)
}
