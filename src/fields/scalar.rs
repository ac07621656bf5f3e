//! Field frames for booleans and integers.
//!
//! Unsigned scalars above `uint8` come in two tag variants: a compact form
//! and an extended fixed-width form, selected by the flag bit. `uint16`
//! flags the short form; `uint32` and `uint64` flag the long one. Encoders
//! always pick the shorter variant, decoders take either. Signed integers
//! instead use the flag as a sign bit over a varint magnitude.

use crate::{
    buffer::{Reader, Writer},
    error::Error,
    record::FLAG,
    varint,
};

/// Values below this stay in the `uint32` varint form.
const U32_FIXED_MIN: u32 = 1 << 21;

/// Values below this stay in the `uint64` varint form.
const U64_FIXED_MIN: u64 = 1 << 49;

pub fn write_bool(w: &mut Writer<'_>, index: u8, value: bool) {
    if value {
        w.put_u8(index);
    }
}

pub fn write_u8(w: &mut Writer<'_>, index: u8, value: u8) {
    if value != 0 {
        w.put_u8(index);
        w.put_u8(value);
    }
}

pub fn write_u16(w: &mut Writer<'_>, index: u8, value: u16) {
    if value == 0 {
        return;
    }
    if value < 256 {
        w.put_u8(index | FLAG);
        w.put_u8(value as u8);
    } else {
        w.put_u8(index);
        w.put_u16(value);
    }
}

pub fn write_u32(w: &mut Writer<'_>, index: u8, value: u32) {
    if value == 0 {
        return;
    }
    if value < U32_FIXED_MIN {
        w.put_u8(index);
        w.put_varint(u64::from(value));
    } else {
        w.put_u8(index | FLAG);
        w.put_u32(value);
    }
}

pub fn write_u64(w: &mut Writer<'_>, index: u8, value: u64) {
    if value == 0 {
        return;
    }
    if value < U64_FIXED_MIN {
        w.put_u8(index);
        w.put_varint(value);
    } else {
        w.put_u8(index | FLAG);
        w.put_u64(value);
    }
}

pub fn write_i32(w: &mut Writer<'_>, index: u8, value: i32) {
    if value == 0 {
        return;
    }
    if value < 0 {
        w.put_u8(index | FLAG);
    } else {
        w.put_u8(index);
    }
    w.put_varint(u64::from(value.unsigned_abs()));
}

/// The wire carries signed magnitudes as varints, which cap at 2^56−1;
/// larger magnitudes fail with [Error::OutOfRange].
pub fn write_i64(
    w: &mut Writer<'_>,
    index: u8,
    field: &'static str,
    value: i64,
) -> Result<(), Error> {
    if value == 0 {
        return Ok(());
    }
    let magnitude = value.unsigned_abs();
    if magnitude > varint::MAX_VALUE {
        return Err(Error::OutOfRange { field });
    }
    if value < 0 {
        w.put_u8(index | FLAG);
    } else {
        w.put_u8(index);
    }
    w.put_varint(magnitude);
    Ok(())
}

pub fn read_u8(r: &mut Reader<'_>) -> Result<u8, Error> {
    r.get_u8()
}

/// The unflagged `uint16` form: 2 bytes big-endian.
pub fn read_u16(r: &mut Reader<'_>) -> Result<u16, Error> {
    Ok(u16::from_be_bytes(r.get_array()?))
}

/// The flagged `uint16` form: a single byte.
pub fn read_u16_compact(r: &mut Reader<'_>) -> Result<u16, Error> {
    Ok(u16::from(r.get_u8()?))
}

/// The unflagged `uint32` form: a varint, range-checked against `u32`.
pub fn read_u32(r: &mut Reader<'_>, field: &'static str) -> Result<u32, Error> {
    let value = varint::read(r, field)?;
    u32::try_from(value).map_err(|_| Error::OutOfRange { field })
}

/// The flagged `uint32` form: 4 bytes big-endian.
pub fn read_u32_fixed(r: &mut Reader<'_>) -> Result<u32, Error> {
    Ok(u32::from_be_bytes(r.get_array()?))
}

/// The unflagged `uint64` form: a varint.
pub fn read_u64(r: &mut Reader<'_>, field: &'static str) -> Result<u64, Error> {
    varint::read(r, field)
}

/// The flagged `uint64` form: 8 bytes big-endian.
pub fn read_u64_fixed(r: &mut Reader<'_>) -> Result<u64, Error> {
    Ok(u64::from_be_bytes(r.get_array()?))
}

/// The unflagged `int32` form: a non-negative varint.
pub fn read_i32(r: &mut Reader<'_>, field: &'static str) -> Result<i32, Error> {
    let magnitude = varint::read(r, field)?;
    i32::try_from(magnitude).map_err(|_| Error::OutOfRange { field })
}

/// The flagged `int32` form: a varint holding the negated value.
pub fn read_i32_neg(r: &mut Reader<'_>, field: &'static str) -> Result<i32, Error> {
    let magnitude = varint::read(r, field)?;
    let magnitude = i64::try_from(magnitude).map_err(|_| Error::OutOfRange { field })?;
    i32::try_from(-magnitude).map_err(|_| Error::OutOfRange { field })
}

/// The unflagged `int64` form: a non-negative varint.
pub fn read_i64(r: &mut Reader<'_>, field: &'static str) -> Result<i64, Error> {
    Ok(varint::read(r, field)? as i64)
}

/// The flagged `int64` form: a varint holding the negated value.
pub fn read_i64_neg(r: &mut Reader<'_>, field: &'static str) -> Result<i64, Error> {
    Ok(-(varint::read(r, field)? as i64))
}
