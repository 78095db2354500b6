//! Error codes untuk Encoder dan Decoder
//!
//! Error bersifat sticky: sekali terisi, semua operasi berikutnya
//! pada instance yang sama langsung gagal tanpa menyentuh buffer.

use thiserror::Error;

/// Jenis kegagalan parse/write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    #[error("end of buffer reached")]
    Eof,
    #[error("end of object already reached")]
    EndOfObject,
    #[error("decoder is not positioned to read a field")]
    NotReadyToReadField,
    #[error("unexpected type byte")]
    UnexpectedTypeByte,
    #[error("decoder is not positioned before an array value")]
    NotBeforeArrayValue,
    #[error("decoder is not positioned before an object")]
    NotBeforeObject,
    #[error("decoder is not positioned before an array")]
    NotBeforeArray,
    #[error("cannot go up to enclosing object")]
    CannotGoUpToObject,
    #[error("cannot go up to enclosing array")]
    CannotGoUpToArray,
    #[error("field name is not a string")]
    UnexpectedType,
    #[error("negative length")]
    NegativeLength,
    #[error("length too large")]
    LengthTooLarge,
    #[error("expected object begin")]
    ExpectedBegin,
    #[error("field name too large")]
    NameTooLarge,
    #[error("nesting too deep")]
    DepthExceeded,
}

impl ErrorCode {
    /// Kode numerik stabil (0 dipakai untuk "tidak ada error")
    pub const fn code(self) -> u8 {
        match self {
            Self::Eof => 1,
            Self::EndOfObject => 2,
            Self::NotReadyToReadField => 3,
            Self::UnexpectedTypeByte => 4,
            Self::NotBeforeArrayValue => 5,
            Self::NotBeforeObject => 6,
            Self::NotBeforeArray => 7,
            Self::CannotGoUpToObject => 8,
            Self::CannotGoUpToArray => 9,
            Self::UnexpectedType => 10,
            Self::NegativeLength => 11,
            Self::LengthTooLarge => 12,
            Self::ExpectedBegin => 13,
            Self::NameTooLarge => 14,
            Self::DepthExceeded => 15,
        }
    }

    /// Error kelas EOF (buffer habis saat baca/tulis)
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::Eof)
    }
}
