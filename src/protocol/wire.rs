//! Binson Wire Format
//!
//! Layout setiap item:
//! ┌──────────┬──────────────────────────────────────────┐
//! │ Tag (1B) │ Payload (0/1/2/4/8 bytes + raw bytes)    │
//! └──────────┴──────────────────────────────────────────┘
//!
//! - Object: `0x40 (name value)* 0x41`, name selalu String
//! - Array:  `0x42 (value)* 0x43`
//! - Integer/String/Bytes: 2 bit terbawah tag = lebar payload
//! - Semua multi-byte field little-endian

use std::fmt;

pub const OBJECT_BEGIN: u8 = 0x40;
pub const OBJECT_END: u8 = 0x41;
pub const ARRAY_BEGIN: u8 = 0x42;
pub const ARRAY_END: u8 = 0x43;
pub const TRUE: u8 = 0x44;
pub const FALSE: u8 = 0x45;
pub const DOUBLE: u8 = 0x46;

pub const INTEGER1: u8 = 0x10;
pub const INTEGER2: u8 = 0x11;
pub const INTEGER4: u8 = 0x12;
pub const INTEGER8: u8 = 0x13;

pub const STRING1: u8 = 0x14;
pub const STRING2: u8 = 0x15;
pub const STRING4: u8 = 0x16;

pub const BYTES1: u8 = 0x18;
pub const BYTES2: u8 = 0x19;
pub const BYTES4: u8 = 0x1a;

/// Mask lebar payload pada tag Integer/String/Bytes
pub const WIDTH_MASK: u8 = 0x03;

/// Batas atas panjang String/Bytes yang masih masuk akal
pub const MAX_LENGTH: usize = i32::MAX as usize;

/// Kedalaman nesting maksimum yang bisa dilacak saat skip
pub const MAX_DEPTH_CEILING: u32 = 128;

const TWO_TO_7: i64 = 1 << 7;
const TWO_TO_15: i64 = 1 << 15;
const TWO_TO_31: i64 = 1 << 31;

/// Lebar payload Integer atau length prefix
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    One = 0,
    Two = 1,
    Four = 2,
    Eight = 3,
}

impl Width {
    /// Lebar dari 2 bit terbawah tag
    #[inline(always)]
    pub fn from_tag(tag: u8) -> Self {
        match tag & WIDTH_MASK {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Four,
            _ => Self::Eight,
        }
    }

    /// Lebar minimal untuk value (batas atas right-open)
    ///
    /// `128` butuh 2 byte, `-128` cukup 1 byte.
    #[inline(always)]
    pub fn minimal(v: i64) -> Self {
        if (-TWO_TO_7..TWO_TO_7).contains(&v) {
            Self::One
        } else if (-TWO_TO_15..TWO_TO_15).contains(&v) {
            Self::Two
        } else if (-TWO_TO_31..TWO_TO_31).contains(&v) {
            Self::Four
        } else {
            Self::Eight
        }
    }

    /// Jumlah byte payload
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Tipe value yang terakhir dibaca Decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Boolean,
    Integer,
    Double,
    String,
    Bytes,
    Array,
    Object,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline(always)]
pub fn is_string(tag: u8) -> bool {
    matches!(tag, STRING1 | STRING2 | STRING4)
}

#[inline(always)]
pub fn is_bytes(tag: u8) -> bool {
    matches!(tag, BYTES1 | BYTES2 | BYTES4)
}

#[inline(always)]
pub fn is_integer(tag: u8) -> bool {
    matches!(tag, INTEGER1 | INTEGER2 | INTEGER4 | INTEGER8)
}

/// Batasan yang bisa dikonfigurasi untuk Encoder dan Decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Kedalaman nesting maksimum saat skip/drain (maks 128)
    pub max_depth: u32,
    /// Panjang maksimum nama field dalam bytes
    pub max_name_len: usize,
}

impl Limits {
    pub const DEFAULT: Limits = Limits {
        max_depth: 64,
        max_name_len: MAX_LENGTH,
    };

    /// Set kedalaman nesting, dipotong ke `MAX_DEPTH_CEILING`
    pub const fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = if depth > MAX_DEPTH_CEILING {
            MAX_DEPTH_CEILING
        } else {
            depth
        };
        self
    }

    pub const fn max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = len;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_width_boundaries() {
        assert_eq!(Width::minimal(0), Width::One);
        assert_eq!(Width::minimal(127), Width::One);
        assert_eq!(Width::minimal(-128), Width::One);
        assert_eq!(Width::minimal(128), Width::Two);
        assert_eq!(Width::minimal(-129), Width::Two);
        assert_eq!(Width::minimal(32767), Width::Two);
        assert_eq!(Width::minimal(-32768), Width::Two);
        assert_eq!(Width::minimal(32768), Width::Four);
        assert_eq!(Width::minimal(-32769), Width::Four);
        assert_eq!(Width::minimal(i32::MAX as i64), Width::Four);
        assert_eq!(Width::minimal(i32::MIN as i64), Width::Four);
        assert_eq!(Width::minimal(i32::MAX as i64 + 1), Width::Eight);
        assert_eq!(Width::minimal(i64::MIN), Width::Eight);
        assert_eq!(Width::minimal(i64::MAX), Width::Eight);
    }

    #[test]
    fn test_width_from_tag() {
        assert_eq!(Width::from_tag(INTEGER1), Width::One);
        assert_eq!(Width::from_tag(INTEGER8), Width::Eight);
        assert_eq!(Width::from_tag(STRING2), Width::Two);
        assert_eq!(Width::from_tag(BYTES4), Width::Four);
        assert_eq!(Width::from_tag(BYTES4).bytes(), 4);
    }

    #[test]
    fn test_limits_clamp() {
        let limits = Limits::default().max_depth(1000).max_name_len(16);
        assert_eq!(limits.max_depth, MAX_DEPTH_CEILING);
        assert_eq!(limits.max_name_len, 16);
    }
}
