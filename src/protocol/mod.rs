//! Protocol Layer: Binson Encoding
//!
//! Prinsip desain:
//! - Deterministic: Lebar integer/length selalu minimal
//! - Sticky errors: Error pertama disimpan, operasi berikutnya no-op
//! - No allocation: Encode/decode langsung ke/dari buffer milik caller

mod decoder;
mod encoder;
mod error;
pub mod wire;

pub use decoder::{Decoder, Value};
pub use encoder::Encoder;
pub use error::ErrorCode;
pub use wire::{Limits, ValueType};
