//! Zero-Copy Binson Decoder
//!
//! Pull parser di atas buffer milik caller. Tidak membangun tree,
//! nama field dan payload String/Bytes adalah slice langsung ke input.
//!
//! Navigasi:
//! - `next_field` / `next_array_value`: baca item berikutnya di level ini
//! - `go_into_*`: masuk ke OBJECT/ARRAY yang baru saja dilaporkan
//! - `go_up_to_*`: drain sisa level ini lalu kembali ke parent
//! - `field(name)`: scan sampai field dengan nama tersebut
//!
//! Nested value yang dilewati di-skip secara iteratif dengan bit stack
//! berukuran tetap, bukan rekursi.

use std::str;

use super::error::ErrorCode;
use super::wire::{
    is_bytes, is_integer, is_string, Limits, ValueType, Width, ARRAY_BEGIN, ARRAY_END, DOUBLE,
    FALSE, MAX_DEPTH_CEILING, MAX_LENGTH, OBJECT_BEGIN, OBJECT_END, TRUE,
};
use crate::core::le;

/// Posisi decoder dalam grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    BeforeField,
    BeforeArrayValue,
    BeforeArray,
    EndOfArray,
    BeforeObject,
    EndOfObject,
}

/// Value terakhir yang dibaca decoder
///
/// String dan Bytes meminjam langsung dari buffer input (`'a`),
/// tidak ada copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(&'a [u8]),
    Bytes(&'a [u8]),
    Array,
    Object,
}

impl<'a> Value<'a> {
    #[inline(always)]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Array => ValueType::Array,
            Value::Object => ValueType::Object,
        }
    }

    /// Raw bytes untuk String maupun Bytes
    #[inline(always)]
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Value::String(b) | Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// Stack container untuk skip, satu bit per level (1 = object)
struct Nesting {
    bits: u128,
    depth: u32,
    max_depth: u32,
}

impl Nesting {
    fn new(max_depth: u32) -> Self {
        Self {
            bits: 0,
            depth: 0,
            max_depth: max_depth.min(MAX_DEPTH_CEILING),
        }
    }

    #[inline(always)]
    fn push(&mut self, c: Container) -> Result<(), ErrorCode> {
        if self.depth >= self.max_depth {
            return Err(ErrorCode::DepthExceeded);
        }
        self.bits = (self.bits << 1) | u128::from(c == Container::Object);
        self.depth += 1;
        Ok(())
    }

    #[inline(always)]
    fn pop(&mut self) {
        self.bits >>= 1;
        self.depth -= 1;
    }

    #[inline(always)]
    fn top(&self) -> Option<Container> {
        match (self.depth, self.bits & 1) {
            (0, _) => None,
            (_, 1) => Some(Container::Object),
            _ => Some(Container::Array),
        }
    }
}

/// Binson pull parser
///
/// ```
/// use binson::{Decoder, Value};
///
/// // {"cid":38,"z":{}}
/// let buf = b"\x40\x14\x03cid\x10\x26\x14\x01z\x40\x41\x41";
/// let mut d = Decoder::new(buf);
///
/// assert!(d.field("cid"));
/// assert_eq!(d.value(), Value::Integer(38));
/// assert!(d.next_field());
/// assert_eq!(d.name(), b"z");
/// assert!(!d.next_field());
/// assert!(d.error().is_none());
/// ```
pub struct Decoder<'a> {
    buf: &'a [u8],
    offset: usize,
    state: State,
    error: Option<ErrorCode>,
    limits: Limits,
    name: &'a [u8],
    value: Value<'a>,
}

impl<'a> Default for Decoder<'a> {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl<'a> Decoder<'a> {
    /// Membuat decoder dari buffer
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, Limits::default())
    }

    pub fn with_limits(buf: &'a [u8], limits: Limits) -> Self {
        Self {
            buf,
            offset: 0,
            state: State::Start,
            error: None,
            limits,
            name: &[],
            value: Value::Boolean(false),
        }
    }

    /// Re-init dengan buffer baru, tanpa alokasi
    #[inline(always)]
    pub fn init(&mut self, buf: &'a [u8]) {
        self.buf = buf;
        self.offset = 0;
        self.state = State::Start;
        self.error = None;
        self.name = &[];
        self.value = Value::Boolean(false);
    }

    /// Baca field berikutnya di OBJECT saat ini
    ///
    /// Returns `true` jika field ditemukan, `false` jika end-of-object
    /// atau error. OBJECT/ARRAY yang dilaporkan sebelumnya tapi tidak
    /// dimasuki akan di-skip dulu.
    pub fn next_field(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        let r = self.try_next_field();
        self.settle(r).unwrap_or(false)
    }

    /// Baca value berikutnya di ARRAY saat ini
    pub fn next_array_value(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        let r = self.try_next_array_value();
        self.settle(r).unwrap_or(false)
    }

    /// Scan field di level ini sampai nama cocok
    ///
    /// Nested value dari field lain di-skip seluruhnya.
    pub fn field(&mut self, name: impl AsRef<[u8]>) -> bool {
        let name = name.as_ref();
        while self.next_field() {
            if self.name == name {
                return true;
            }
        }
        false
    }

    /// Masuk ke OBJECT yang baru saja dilaporkan
    pub fn go_into_object(&mut self) -> Result<(), ErrorCode> {
        self.status()?;
        if self.state != State::BeforeObject {
            return Err(self.fail(ErrorCode::NotBeforeObject));
        }
        log::trace!("binson: into object at offset {}", self.offset);
        self.state = State::BeforeField;
        Ok(())
    }

    /// Masuk ke ARRAY yang baru saja dilaporkan
    pub fn go_into_array(&mut self) -> Result<(), ErrorCode> {
        self.status()?;
        if self.state != State::BeforeArray {
            return Err(self.fail(ErrorCode::NotBeforeArray));
        }
        log::trace!("binson: into array at offset {}", self.offset);
        self.state = State::BeforeArrayValue;
        Ok(())
    }

    /// Drain level saat ini, lalu lanjut membaca field parent OBJECT
    pub fn go_up_to_object(&mut self) -> Result<(), ErrorCode> {
        self.status()?;
        let r = self.try_go_up(ErrorCode::CannotGoUpToObject, State::BeforeField);
        self.settle(r)
    }

    /// Drain level saat ini, lalu lanjut membaca value parent ARRAY
    pub fn go_up_to_array(&mut self) -> Result<(), ErrorCode> {
        self.status()?;
        let r = self.try_go_up(ErrorCode::CannotGoUpToArray, State::BeforeArrayValue);
        self.settle(r)
    }

    /// Nama field terakhir (slice ke buffer input)
    #[inline(always)]
    pub fn name(&self) -> &'a [u8] {
        self.name
    }

    pub fn name_str(&self) -> Option<&'a str> {
        str::from_utf8(self.name).ok()
    }

    #[inline(always)]
    pub fn value(&self) -> Value<'a> {
        self.value
    }

    #[inline(always)]
    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn boolean(&self) -> Option<bool> {
        match self.value {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.value {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn double(&self) -> Option<f64> {
        match self.value {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn bytes(&self) -> Option<&'a [u8]> {
        match self.value {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// String value, None jika bukan String atau bukan UTF-8 valid
    pub fn string(&self) -> Option<&'a str> {
        match self.value {
            Value::String(v) => str::from_utf8(v).ok(),
            _ => None,
        }
    }

    /// Error sticky pertama, jika ada
    #[inline(always)]
    pub fn error(&self) -> Option<ErrorCode> {
        self.error
    }

    #[inline(always)]
    pub fn status(&self) -> Result<(), ErrorCode> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Posisi baca berikutnya
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    // === private ===

    fn try_next_field(&mut self) -> Result<bool, ErrorCode> {
        match self.state {
            State::Start => self.parse_begin()?,
            State::EndOfObject => return Err(ErrorCode::EndOfObject),
            State::BeforeObject => {
                self.skip_nested(Container::Object)?;
                self.state = State::BeforeField;
            }
            State::BeforeArray => {
                self.skip_nested(Container::Array)?;
                self.state = State::BeforeField;
            }
            _ => {}
        }

        if self.state != State::BeforeField {
            return Err(ErrorCode::NotReadyToReadField);
        }

        let tag = self.read_one()?;
        if tag == OBJECT_END {
            self.state = State::EndOfObject;
            return Ok(false);
        }
        let name = self.parse_name(tag)?;

        let tag = self.read_one()?;
        let (value, state) = self.parse_value(tag, State::BeforeField)?;

        self.name = name;
        self.value = value;
        self.state = state;
        Ok(true)
    }

    fn try_next_array_value(&mut self) -> Result<bool, ErrorCode> {
        match self.state {
            State::BeforeArray => {
                self.skip_nested(Container::Array)?;
                self.state = State::BeforeArrayValue;
            }
            State::BeforeObject => {
                self.skip_nested(Container::Object)?;
                self.state = State::BeforeArrayValue;
            }
            _ => {}
        }

        if self.state != State::BeforeArrayValue {
            return Err(ErrorCode::NotBeforeArrayValue);
        }

        let tag = self.read_one()?;
        if tag == ARRAY_END {
            self.state = State::EndOfArray;
            return Ok(false);
        }
        let (value, state) = self.parse_value(tag, State::BeforeArrayValue)?;

        self.value = value;
        self.state = state;
        Ok(true)
    }

    fn try_go_up(&mut self, err: ErrorCode, resume: State) -> Result<(), ErrorCode> {
        if self.state == State::BeforeArrayValue {
            while self.try_next_array_value()? {}
        }
        if self.state == State::BeforeField {
            while self.try_next_field()? {}
        }
        if !matches!(self.state, State::EndOfObject | State::EndOfArray) {
            return Err(err);
        }
        log::trace!("binson: up to parent at offset {}", self.offset);
        self.state = resume;
        Ok(())
    }

    fn parse_begin(&mut self) -> Result<(), ErrorCode> {
        if self.read_one()? != OBJECT_BEGIN {
            return Err(ErrorCode::ExpectedBegin);
        }
        self.state = State::BeforeField;
        Ok(())
    }

    fn parse_name(&mut self, tag: u8) -> Result<&'a [u8], ErrorCode> {
        if !is_string(tag) {
            return Err(ErrorCode::UnexpectedType);
        }
        let name = self.parse_bytes(tag)?;
        if name.len() > self.limits.max_name_len {
            return Err(ErrorCode::NameTooLarge);
        }
        Ok(name)
    }

    /// Parse value setelah tag. State baru hanya di-commit oleh caller.
    fn parse_value(&mut self, tag: u8, after: State) -> Result<(Value<'a>, State), ErrorCode> {
        let parsed = match tag {
            OBJECT_BEGIN => (Value::Object, State::BeforeObject),
            ARRAY_BEGIN => (Value::Array, State::BeforeArray),
            TRUE => (Value::Boolean(true), after),
            FALSE => (Value::Boolean(false), after),
            DOUBLE => {
                let bits = le::get_u64(self.rest()).ok_or(ErrorCode::Eof)?;
                self.offset += 8;
                (Value::Double(le::f64_from_bits(bits)), after)
            }
            t if is_integer(t) => (Value::Integer(self.parse_integer(t)?), after),
            t if is_string(t) => (Value::String(self.parse_bytes(t)?), after),
            t if is_bytes(t) => (Value::Bytes(self.parse_bytes(t)?), after),
            _ => return Err(ErrorCode::UnexpectedTypeByte),
        };
        Ok(parsed)
    }

    /// Length-prefixed slice: nama field, String, atau Bytes
    fn parse_bytes(&mut self, tag: u8) -> Result<&'a [u8], ErrorCode> {
        let len = self.parse_integer(tag)?;
        if len < 0 {
            return Err(ErrorCode::NegativeLength);
        }
        let len = usize::try_from(len)
            .ok()
            .filter(|&len| len <= MAX_LENGTH)
            .ok_or(ErrorCode::LengthTooLarge)?;

        let out = self.rest().get(..len).ok_or(ErrorCode::Eof)?;
        self.offset += len;
        Ok(out)
    }

    fn parse_integer(&mut self, tag: u8) -> Result<i64, ErrorCode> {
        let rest = self.rest();
        let width = Width::from_tag(tag);
        let v = match width {
            Width::One => rest.first().map(|&b| b as i8 as i64),
            Width::Two => le::get_u16(rest).map(|v| v as i16 as i64),
            Width::Four => le::get_u32(rest).map(|v| v as i32 as i64),
            Width::Eight => le::get_u64(rest).map(|v| v as i64),
        };
        let v = v.ok_or(ErrorCode::Eof)?;
        self.offset += width.bytes();
        Ok(v)
    }

    /// Skip seluruh container yang begin tag-nya sudah dibaca
    ///
    /// Grammar tetap divalidasi: di dalam OBJECT nama harus String.
    fn skip_nested(&mut self, outer: Container) -> Result<(), ErrorCode> {
        let mut nesting = Nesting::new(self.limits.max_depth);
        nesting.push(outer)?;
        let mut expect_name = true;

        while let Some(top) = nesting.top() {
            let tag = self.read_one()?;

            if top == Container::Object && expect_name {
                if tag == OBJECT_END {
                    nesting.pop();
                } else {
                    self.parse_name(tag)?;
                    expect_name = false;
                }
                continue;
            }

            match tag {
                ARRAY_END if top == Container::Array => nesting.pop(),
                OBJECT_BEGIN => nesting.push(Container::Object)?,
                ARRAY_BEGIN => nesting.push(Container::Array)?,
                _ => {
                    self.parse_value(tag, State::BeforeField)?;
                }
            }
            expect_name = true;
        }
        Ok(())
    }

    #[inline(always)]
    fn read_one(&mut self) -> Result<u8, ErrorCode> {
        let b = *self.buf.get(self.offset).ok_or(ErrorCode::Eof)?;
        self.offset += 1;
        Ok(b)
    }

    #[inline(always)]
    fn rest(&self) -> &'a [u8] {
        let buf: &'a [u8] = self.buf;
        buf.get(self.offset..).unwrap_or(&[])
    }

    fn settle<T>(&mut self, r: Result<T, ErrorCode>) -> Result<T, ErrorCode> {
        r.map_err(|e| self.fail(e))
    }

    #[cold]
    fn fail(&mut self, code: ErrorCode) -> ErrorCode {
        match self.error {
            Some(first) => first,
            None => {
                log::debug!("binson decoder error at offset {}: {}", self.offset, code);
                self.error = Some(code);
                code
            }
        }
    }
}
