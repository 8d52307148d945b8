//! Bluetooth LE attribute identifiers in their 16, 32 and 128 bit forms.
//!
//! A [`UuidValue`] keeps whatever width it was created with. Comparison
//! across widths goes through the canonical 128-bit expansion built on the
//! Bluetooth base UUID, so `0x180D` and
//! `0000180D-0000-1000-8000-00805F9B34FB` compare equal.

pub mod consts;
pub mod external;
pub mod text;
pub mod value;
pub mod wire;

pub use consts::BASE_UUID;
pub use external::{RawBtUuid, RawBtUuidPayload};
pub use value::{UuidValue, UuidWidth};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UuidError {
    #[error("UUID value not 4, 8, 16 or 36 characters ({len}) - {input}")]
    InvalidLength { len: usize, input: String },

    #[error("Unsupported UUID length tag {0} (expected 2, 4 or 16)")]
    InvalidWidth(u16),

    #[error("Unsupported UUID wire length {0} (expected 2, 4 or 16 bytes)")]
    InvalidWireLength(usize),
}

pub type Result<T> = std::result::Result<T, UuidError>;
