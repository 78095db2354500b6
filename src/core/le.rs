//! Little-Endian Pack/Unpack
//!
//! Helper murni tanpa state, dipakai Encoder dan Decoder.
//! Semua fungsi bounds-checked: buffer pendek menghasilkan `None`/`false`,
//! tidak pernah panic.

/// Ambil N byte pertama dari buffer
#[inline(always)]
pub fn take<const N: usize>(buf: &[u8]) -> Option<[u8; N]> {
    buf.get(..N)?.try_into().ok()
}

#[inline(always)]
pub fn get_u16(buf: &[u8]) -> Option<u16> {
    take::<2>(buf).map(u16::from_le_bytes)
}

#[inline(always)]
pub fn get_u32(buf: &[u8]) -> Option<u32> {
    take::<4>(buf).map(u32::from_le_bytes)
}

#[inline(always)]
pub fn get_u64(buf: &[u8]) -> Option<u64> {
    take::<8>(buf).map(u64::from_le_bytes)
}

/// Tulis bytes ke awal buffer. Returns `false` jika buffer terlalu kecil.
#[inline(always)]
fn put<const N: usize>(buf: &mut [u8], bytes: [u8; N]) -> bool {
    match buf.get_mut(..N) {
        Some(dst) => {
            dst.copy_from_slice(&bytes);
            true
        }
        None => false,
    }
}

#[inline(always)]
pub fn put_u16(buf: &mut [u8], v: u16) -> bool {
    put(buf, v.to_le_bytes())
}

#[inline(always)]
pub fn put_u32(buf: &mut [u8], v: u32) -> bool {
    put(buf, v.to_le_bytes())
}

#[inline(always)]
pub fn put_u64(buf: &mut [u8], v: u64) -> bool {
    put(buf, v.to_le_bytes())
}

/// IEEE-754 bit pattern dari double
#[inline(always)]
pub fn f64_to_bits(v: f64) -> u64 {
    v.to_bits()
}

/// Double dari IEEE-754 bit pattern
#[inline(always)]
pub fn f64_from_bits(bits: u64) -> f64 {
    f64::from_bits(bits)
}
