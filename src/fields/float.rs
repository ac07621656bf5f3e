//! Field frames for floats and float lists.
//!
//! Scalars are framed when non-zero, and also when NaN: zero is the field
//! default, but a NaN must survive the round trip, so it is emitted with the
//! canonical quiet-NaN payload. List elements are copied bit-exactly in both
//! directions.

use super::{check_list_len, read_list_count};
use crate::{
    buffer::{Reader, Writer},
    error::Error,
};

/// The quiet NaN emitted for `float32` scalars.
const NAN_BITS_32: u32 = 0x7FC0_0000;

/// The quiet NaN emitted for `float64` scalars.
const NAN_BITS_64: u64 = 0x7FF8_0000_0000_0000;

pub fn write_f32(w: &mut Writer<'_>, index: u8, value: f32) {
    if value.is_nan() {
        w.put_u8(index);
        w.put_u32(NAN_BITS_32);
    } else if value != 0.0 {
        w.put_u8(index);
        w.put_u32(value.to_bits());
    }
}

pub fn write_f64(w: &mut Writer<'_>, index: u8, value: f64) {
    if value.is_nan() {
        w.put_u8(index);
        w.put_u64(NAN_BITS_64);
    } else if value != 0.0 {
        w.put_u8(index);
        w.put_u64(value.to_bits());
    }
}

pub fn write_f32_list(
    w: &mut Writer<'_>,
    index: u8,
    field: &'static str,
    values: &[f32],
) -> Result<(), Error> {
    if values.is_empty() {
        return Ok(());
    }
    check_list_len(field, values.len(), w.list_max())?;
    w.put_u8(index);
    w.put_varint(values.len() as u64);
    for value in values {
        w.put_u32(value.to_bits());
    }
    Ok(())
}

pub fn write_f64_list(
    w: &mut Writer<'_>,
    index: u8,
    field: &'static str,
    values: &[f64],
) -> Result<(), Error> {
    if values.is_empty() {
        return Ok(());
    }
    check_list_len(field, values.len(), w.list_max())?;
    w.put_u8(index);
    w.put_varint(values.len() as u64);
    for value in values {
        w.put_u64(value.to_bits());
    }
    Ok(())
}

pub fn read_f32(r: &mut Reader<'_>) -> Result<f32, Error> {
    Ok(f32::from_bits(u32::from_be_bytes(r.get_array()?)))
}

pub fn read_f64(r: &mut Reader<'_>) -> Result<f64, Error> {
    Ok(f64::from_bits(u64::from_be_bytes(r.get_array()?)))
}

pub fn read_f32_list(
    r: &mut Reader<'_>,
    field: &'static str,
    list_max: usize,
) -> Result<Vec<f32>, Error> {
    let count = read_list_count(r, field, list_max)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_f32(r)?);
    }
    Ok(values)
}

pub fn read_f64_list(
    r: &mut Reader<'_>,
    field: &'static str,
    list_max: usize,
) -> Result<Vec<f64>, Error> {
    let count = read_list_count(r, field, list_max)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_f64(r)?);
    }
    Ok(values)
}
