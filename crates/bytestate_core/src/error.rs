use thiserror::Error;

/// Errors raised by slot access and registry lookup.
///
/// Both variants carry the offending index. Every other codec operation is
/// total; fidelity below target is reported through
/// [`FidelityWarning`](crate::FidelityWarning), not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Slot index outside `0..16` passed to `with_layer` / `get_layer`.
    #[error("slot index {index} out of range (state has 16 slots)")]
    IndexOutOfRange { index: usize },

    /// Layer index outside `0..16` passed to the registry.
    #[error("unknown semantic layer {index} (registry has 16 layers)")]
    UnknownLayer { index: usize },
}

pub type Result<T> = core::result::Result<T, CodecError>;
