//! FixedState: exactly sixteen [`ByteUnit`] slots, one per semantic layer.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   FIXED STATE (128 bits)                   │
//! ├────────────────────────────────────────────────────────────┤
//! │  L0  L1  L2  L3  L4 │ L5  L6  L7 │ L8  L9  LA │ LB  LC │ LD  LE  LF │
//! │  ◄── PERCEPTION ──► │◄ PROCESS ► │◄ INTERACT ►│◄ EME ► │◄── META ──►│
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state is a 16-byte `Copy` value. Updates return a new state and leave
//! the receiver untouched, so a state handed to one consumer can never change
//! underneath another.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::byte_unit::ByteUnit;
use crate::error::{CodecError, Result};
use crate::registry::Category;
use crate::NUM_LAYERS;

/// Reduction of a whole state to a single slot value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollapseStrategy {
    /// XOR of every slot
    Xor,
    /// Rounded arithmetic mean of the raw bytes
    Mean,
    /// Slot 0
    First,
    /// Slot 15
    Last,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C, align(16))]
pub struct FixedState {
    layers: [ByteUnit; NUM_LAYERS],
}

impl FixedState {
    /// Every slot at raw `0`.
    pub const fn vacuum() -> Self {
        Self {
            layers: [ByteUnit::MIN; NUM_LAYERS],
        }
    }

    /// Every slot at the midpoint `128`.
    pub const fn neutral() -> Self {
        Self {
            layers: [ByteUnit::NEUTRAL; NUM_LAYERS],
        }
    }

    /// Every slot at raw `255`.
    pub const fn maximum() -> Self {
        Self {
            layers: [ByteUnit::MAX; NUM_LAYERS],
        }
    }

    pub const fn from_layers(layers: [ByteUnit; NUM_LAYERS]) -> Self {
        Self { layers }
    }

    pub fn from_bytes(bytes: [u8; NUM_LAYERS]) -> Self {
        Self {
            layers: bytes.map(ByteUnit::from_raw),
        }
    }

    pub fn to_bytes(&self) -> [u8; NUM_LAYERS] {
        self.layers.map(ByteUnit::to_raw)
    }

    /// Copy of this state with slot `index` replaced.
    pub fn with_layer(&self, index: usize, value: ByteUnit) -> Result<Self> {
        if index >= NUM_LAYERS {
            return Err(CodecError::IndexOutOfRange { index });
        }
        let mut next = *self;
        next.layers[index] = value;
        Ok(next)
    }

    pub fn get_layer(&self, index: usize) -> Result<ByteUnit> {
        self.layers
            .get(index)
            .copied()
            .ok_or(CodecError::IndexOutOfRange { index })
    }

    /// Snapshot of all sixteen slots.
    #[inline]
    pub const fn get_all_layers(&self) -> [ByteUnit; NUM_LAYERS] {
        self.layers
    }

    /// Slots belonging to `category`, in index order.
    pub fn layers_of(&self, category: Category) -> &[ByteUnit] {
        &self.layers[category.layers()]
    }

    /// Slot-wise XOR with `other`.
    pub fn bitwise_combine(&self, other: &FixedState) -> FixedState {
        let mut layers = self.layers;
        for (slot, rhs) in layers.iter_mut().zip(other.layers.iter()) {
            *slot = slot.bitwise_combine(*rhs);
        }
        FixedState { layers }
    }

    /// Keep the slots whose bit is set in `mask` (bit i = slot i); the rest
    /// fall back to the vacuum value.
    pub fn project(&self, mask: u16) -> FixedState {
        let mut layers = [ByteUnit::MIN; NUM_LAYERS];
        for (i, slot) in layers.iter_mut().enumerate() {
            if mask & (1 << i) != 0 {
                *slot = self.layers[i];
            }
        }
        FixedState { layers }
    }

    pub fn collapse(&self, strategy: CollapseStrategy) -> ByteUnit {
        match strategy {
            CollapseStrategy::Xor => self
                .layers
                .iter()
                .fold(ByteUnit::MIN, |acc, b| acc.bitwise_combine(*b)),
            CollapseStrategy::Mean => {
                let sum: u32 = self.layers.iter().map(|b| b.to_raw() as u32).sum();
                let n = NUM_LAYERS as u32;
                ByteUnit::from_raw(((sum + n / 2) / n) as u8)
            }
            CollapseStrategy::First => self.layers[0],
            CollapseStrategy::Last => self.layers[NUM_LAYERS - 1],
        }
    }

    /// 128-bit fingerprint; slot `i` occupies bits `8i..8i+8`.
    pub fn fingerprint(&self) -> u128 {
        u128::from_le_bytes(self.to_bytes())
    }
}

impl Default for FixedState {
    fn default() -> Self {
        Self::vacuum()
    }
}

impl From<[u8; NUM_LAYERS]> for FixedState {
    fn from(bytes: [u8; NUM_LAYERS]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for FixedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedState[")?;
        for (i, b) in self.layers.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", b.to_raw())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_states() {
        assert!(FixedState::vacuum().get_all_layers().iter().all(|b| b.to_raw() == 0));
        assert!(FixedState::neutral().get_all_layers().iter().all(|b| b.to_raw() == 128));
        assert_eq!(FixedState::default(), FixedState::vacuum());
    }

    #[test]
    fn with_layer_is_persistent() {
        let s1 = FixedState::vacuum();
        let s2 = s1.with_layer(3, ByteUnit::from_raw(200)).unwrap();

        assert_eq!(s1.get_layer(3).unwrap().to_raw(), 0);
        assert_eq!(s2.get_layer(3).unwrap().to_raw(), 200);
        for i in (0..NUM_LAYERS).filter(|&i| i != 3) {
            assert_eq!(s1.get_layer(i), s2.get_layer(i));
        }
    }

    #[test]
    fn out_of_range_access() {
        let s = FixedState::neutral();
        assert_eq!(s.get_layer(16), Err(CodecError::IndexOutOfRange { index: 16 }));
        assert_eq!(
            s.with_layer(16, ByteUnit::MAX),
            Err(CodecError::IndexOutOfRange { index: 16 })
        );
    }

    #[test]
    fn snapshot_does_not_alias() {
        let s = FixedState::neutral();
        let mut snap = s.get_all_layers();
        snap[0] = ByteUnit::MAX;
        assert_eq!(s.get_layer(0).unwrap(), ByteUnit::NEUTRAL);
    }

    #[test]
    fn bytes_and_fingerprint() {
        let bytes: [u8; 16] = core::array::from_fn(|i| i as u8 * 16);
        let s = FixedState::from_bytes(bytes);
        assert_eq!(s.to_bytes(), bytes);
        assert_eq!(s.fingerprint() & 0xFF, 0);
        assert_eq!((s.fingerprint() >> 8) & 0xFF, 16);
        assert_eq!((s.fingerprint() >> 120) & 0xFF, 240);
    }

    #[test]
    fn category_views() {
        let s = FixedState::from_bytes(core::array::from_fn(|i| i as u8));
        let meta: Vec<u8> = s.layers_of(Category::Meta).iter().map(|b| b.to_raw()).collect();
        assert_eq!(meta, vec![13, 14, 15]);
        assert_eq!(s.layers_of(Category::Perception).len(), 5);
    }

    #[test]
    fn project_and_collapse() {
        let s = FixedState::from_bytes(core::array::from_fn(|i| (i as u8 + 1) * 10));
        let p = s.project(0b101);
        assert_eq!(p.get_layer(0).unwrap().to_raw(), 10);
        assert_eq!(p.get_layer(1).unwrap().to_raw(), 0);
        assert_eq!(p.get_layer(2).unwrap().to_raw(), 30);

        assert_eq!(s.collapse(CollapseStrategy::First).to_raw(), 10);
        assert_eq!(s.collapse(CollapseStrategy::Last).to_raw(), 160);
        assert_eq!(s.collapse(CollapseStrategy::Mean).to_raw(), 85);
        assert_eq!(FixedState::neutral().collapse(CollapseStrategy::Xor), ByteUnit::MIN);
        assert_eq!(s.bitwise_combine(&s), FixedState::vacuum());
    }

    #[test]
    fn debug_is_hex_row() {
        let s = FixedState::neutral().with_layer(0, ByteUnit::MAX).unwrap();
        assert!(format!("{:?}", s).starts_with("FixedState[FF 80"));
    }
}
