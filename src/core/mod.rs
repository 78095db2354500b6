//! Core module: utilitas codec dan storage
//!
//! Prinsip desain:
//! - Pure: Helper little-endian tanpa state, tidak pernah panic
//! - Zero-Copy: Dokumen di-mmap, Decoder membaca langsung dari map
//! - No-Allocation: Tidak ada alokasi di hot path

pub mod le;
mod mmap_storage;

pub use mmap_storage::{MappedDocument, StorageError};
