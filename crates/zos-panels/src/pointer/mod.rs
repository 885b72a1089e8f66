//! Pointer normalization
//!
//! Mouse, touch and pointer events all become one stream of
//! [`PointerSample`]s with a canonical phase, session delta and button mask.

mod normalizer;
mod sample;

pub use normalizer::{PointerNormalizer, SubscriptionId};
pub use sample::{
    NativeKind, NativePointerEvent, PointerButtons, PointerOrigin, PointerPhase, PointerSample,
};
