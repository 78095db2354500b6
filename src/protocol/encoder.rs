//! Zero-Allocation Binson Encoder
//!
//! Encode langsung ke buffer milik caller.
//! Tidak ada alokasi, buffer tidak pernah tumbuh.

use super::error::ErrorCode;
use super::wire::{
    Limits, Width, ARRAY_BEGIN, ARRAY_END, BYTES1, DOUBLE, FALSE, INTEGER1, MAX_LENGTH,
    OBJECT_BEGIN, OBJECT_END, STRING1, TRUE,
};
use crate::core::le;

/// Sequential writer di atas buffer berkapasitas tetap
///
/// Setiap operasi menulis tag + payload di posisi cursor. Jika sisa
/// kapasitas tidak cukup, buffer dan cursor tidak berubah dan encoder
/// menyimpan `ErrorCode::Eof`. Setelah itu semua operasi jadi no-op.
///
/// ```
/// use binson::Encoder;
///
/// let mut buf = [0u8; 32];
/// let mut e = Encoder::new(&mut buf);
/// e.begin().name("a").integer(123).end();
/// assert_eq!(e.finish().unwrap(), &[0x40, 0x14, 0x01, b'a', 0x10, 0x7b, 0x41]);
/// ```
pub struct Encoder<'a> {
    buf: &'a mut [u8],
    offset: usize,
    error: Option<ErrorCode>,
    limits: Limits,
}

impl<'a> Encoder<'a> {
    /// Membuat encoder di atas buffer
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self::with_limits(buf, Limits::default())
    }

    pub fn with_limits(buf: &'a mut [u8], limits: Limits) -> Self {
        Self {
            buf,
            offset: 0,
            error: None,
            limits,
        }
    }

    /// Re-init dengan buffer baru untuk reuse di hot loop
    #[inline(always)]
    pub fn init(&mut self, buf: &'a mut [u8]) {
        self.buf = buf;
        self.offset = 0;
        self.error = None;
    }

    /// OBJECT begin
    #[inline(always)]
    pub fn begin(&mut self) -> &mut Self {
        self.write_tag(OBJECT_BEGIN)
    }

    /// OBJECT end
    #[inline(always)]
    pub fn end(&mut self) -> &mut Self {
        self.write_tag(OBJECT_END)
    }

    #[inline(always)]
    pub fn begin_array(&mut self) -> &mut Self {
        self.write_tag(ARRAY_BEGIN)
    }

    #[inline(always)]
    pub fn end_array(&mut self) -> &mut Self {
        self.write_tag(ARRAY_END)
    }

    #[inline(always)]
    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.write_tag(if v { TRUE } else { FALSE })
    }

    /// Integer dengan lebar minimal (1/2/4/8 byte)
    #[inline(always)]
    pub fn integer(&mut self, v: i64) -> &mut Self {
        self.write_integer_or_length(INTEGER1, v, &[])
    }

    /// Double selalu 8 byte IEEE-754, tanpa optimasi lebar
    #[inline(always)]
    pub fn double(&mut self, v: f64) -> &mut Self {
        if let Some(dst) = self.reserve(1 + 8) {
            dst[0] = DOUBLE;
            le::put_u64(&mut dst[1..], le::f64_to_bits(v));
        }
        self
    }

    #[inline(always)]
    pub fn string(&mut self, v: &str) -> &mut Self {
        self.write_length_prefixed(STRING1, v.as_bytes())
    }

    #[inline(always)]
    pub fn bytes(&mut self, v: &[u8]) -> &mut Self {
        self.write_length_prefixed(BYTES1, v)
    }

    /// Nama field di dalam OBJECT (di-encode sebagai String)
    #[inline(always)]
    pub fn name(&mut self, v: &str) -> &mut Self {
        if self.error.is_none() && v.len() > self.limits.max_name_len {
            self.fail(ErrorCode::NameTooLarge);
            return self;
        }
        self.string(v)
    }

    /// Posisi tulis berikutnya
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Error sticky pertama, jika ada
    #[inline(always)]
    pub fn error(&self) -> Option<ErrorCode> {
        self.error
    }

    /// Bytes yang sudah ditulis
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.offset]
    }

    /// Available space in buffer
    #[inline(always)]
    pub fn available(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Hasil encode, atau error sticky pertama
    pub fn finish(&self) -> Result<&[u8], ErrorCode> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.as_bytes()),
        }
    }

    // === private ===

    fn write_tag(&mut self, tag: u8) -> &mut Self {
        if let Some(dst) = self.reserve(1) {
            dst[0] = tag;
        }
        self
    }

    fn write_length_prefixed(&mut self, base: u8, payload: &[u8]) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        if payload.len() > MAX_LENGTH {
            self.fail(ErrorCode::LengthTooLarge);
            return self;
        }
        self.write_integer_or_length(base, payload.len() as i64, payload)
    }

    /// Tag + integer lebar minimal + payload, ditulis utuh atau tidak sama sekali
    fn write_integer_or_length(&mut self, base: u8, v: i64, payload: &[u8]) -> &mut Self {
        let width = Width::minimal(v);
        let Some(total) = (1 + width.bytes()).checked_add(payload.len()) else {
            self.fail(ErrorCode::LengthTooLarge);
            return self;
        };
        let Some(dst) = self.reserve(total) else {
            return self;
        };

        dst[0] = base | width as u8;
        let (num, rest) = dst[1..].split_at_mut(width.bytes());
        match width {
            Width::One => num[0] = v as i8 as u8,
            Width::Two => {
                le::put_u16(num, v as i16 as u16);
            }
            Width::Four => {
                le::put_u32(num, v as i32 as u32);
            }
            Width::Eight => {
                le::put_u64(num, v as u64);
            }
        }
        rest.copy_from_slice(payload);
        self
    }

    /// Reservasi n byte di cursor. Gagal tanpa menyentuh buffer.
    #[inline(always)]
    fn reserve(&mut self, n: usize) -> Option<&mut [u8]> {
        if self.error.is_some() {
            return None;
        }
        if n > self.available() {
            self.fail(ErrorCode::Eof);
            return None;
        }
        let start = self.offset;
        self.offset += n;
        Some(&mut self.buf[start..start + n])
    }

    #[cold]
    fn fail(&mut self, code: ErrorCode) {
        if self.error.is_none() {
            log::debug!("binson encoder error at offset {}: {}", self.offset, code);
            self.error = Some(code);
        }
    }
}
