//! Variable-length integer encoding and decoding.
//!
//! # Overview
//!
//! Little-endian base-128 integers: each byte carries 7 value bits and a
//! continuation bit in the high position. The wire caps a varint at 8 bytes,
//! so values up to 2^56−1 are representable; unsigned scalars that need more
//! switch to their fixed-width extended form instead.
//!
//! Decoding is liberal: redundant continuation bytes (such as `0x80 0x00` for
//! zero) are accepted. Only an unterminated 8-byte run is rejected, since the
//! value it would carry cannot exist on the wire.

use crate::{buffer::Reader, error::Error};
use bytes::BufMut;

/// The maximum number of bytes in one varint.
pub const MAX_BYTES: usize = 8;

/// The number of data-bearing bits in a byte.
const DATA_BITS_PER_BYTE: usize = 7;

/// The mask for the data-bearing bits in a byte.
const DATA_BITS_MASK: u8 = 0x7F;

/// The mask for the continuation bit in a byte.
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// The largest value an 8-byte varint can carry.
pub const MAX_VALUE: u64 = (1 << (MAX_BYTES * DATA_BITS_PER_BYTE)) - 1;

/// Encodes `value` as a varint.
///
/// Callers keep `value` within [MAX_VALUE]; the scalar encoders guarantee
/// this by range-checking or by switching to an extended form first.
pub fn write(buf: &mut impl BufMut, mut value: u64) {
    debug_assert!(value <= MAX_VALUE);
    while value > u64::from(DATA_BITS_MASK) {
        buf.put_u8(value as u8 | CONTINUATION_BIT_MASK);
        value >>= DATA_BITS_PER_BYTE;
    }
    buf.put_u8(value as u8);
}

/// Decodes a varint.
///
/// Returns [Error::EndOfBuffer] if the input runs out mid-varint, and
/// [Error::OutOfRange] for `field` if the 8th byte still carries a
/// continuation bit.
pub fn read(r: &mut Reader<'_>, field: &'static str) -> Result<u64, Error> {
    let mut result = 0u64;
    for i in 0..MAX_BYTES {
        let byte = r.get_u8()?;
        result |= u64::from(byte & DATA_BITS_MASK) << (i * DATA_BITS_PER_BYTE);
        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
    }
    Err(Error::OutOfRange { field })
}

/// Calculates the number of bytes [write] emits for `value`.
pub fn size(value: u64) -> usize {
    let data_bits = u64::BITS as usize - value.leading_zeros() as usize;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}
