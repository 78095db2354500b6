//! Binson - Compact Binary Data Interchange
//!
//! Arsitektur:
//! - Zero-Copy: Nama field dan String/Bytes adalah slice ke buffer input
//! - No-Allocation: Encoder/Decoder bekerja di atas buffer milik caller
//! - Cursor API: Decoder adalah pull parser, tidak membangun tree
//! - Bit-exact: Wire format kompatibel dengan implementasi Binson lain
//!
//! ```
//! use binson::{Decoder, Encoder};
//!
//! // {"a":{"b":2},"c":3}
//! let mut buf = [0u8; 64];
//! let mut e = Encoder::new(&mut buf);
//! e.begin().name("a").begin().name("b").integer(2).end();
//! e.name("c").integer(3).end();
//! let len = e.finish().unwrap().len();
//!
//! let mut d = Decoder::new(&buf[..len]);
//! assert!(d.field("a"));
//! d.go_into_object().unwrap();
//! assert!(d.field("b"));
//! assert_eq!(d.integer(), Some(2));
//! d.go_up_to_object().unwrap();
//! assert!(d.field("c"));
//! assert_eq!(d.integer(), Some(3));
//! ```

pub mod core;
pub mod protocol;

pub use crate::core::{MappedDocument, StorageError};
pub use crate::protocol::{Decoder, Encoder, ErrorCode, Limits, Value, ValueType};
