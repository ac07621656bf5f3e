//! Field frames for nested records and record lists.
//!
//! A nested record's payload is a complete record frame, fields plus
//! sentinel, written in place on the shared buffer and decoded recursively
//! on the shared cursor. Absence is the field default; a present-but-empty
//! record still frames as a bare sentinel.

use super::{check_list_len, read_list_count};
use crate::{
    buffer::{Reader, Writer},
    error::Error,
    record::{Record, SENTINEL},
};

pub fn write_record<T: Record>(
    w: &mut Writer<'_>,
    index: u8,
    value: Option<&T>,
) -> Result<(), Error> {
    let Some(value) = value else {
        return Ok(());
    };
    w.put_u8(index);
    value.write_fields(w)?;
    w.put_u8(SENTINEL);
    Ok(())
}

pub fn write_record_list<T: Record>(
    w: &mut Writer<'_>,
    index: u8,
    field: &'static str,
    values: &[T],
) -> Result<(), Error> {
    if values.is_empty() {
        return Ok(());
    }
    check_list_len(field, values.len(), w.list_max())?;
    w.put_u8(index);
    w.put_varint(values.len() as u64);
    for value in values {
        value.write_fields(w)?;
        w.put_u8(SENTINEL);
    }
    Ok(())
}

pub fn read_record<T: Record>(r: &mut Reader<'_>) -> Result<T, Error> {
    let mut value = T::default();
    value.unmarshal_from(r)?;
    Ok(value)
}

pub fn read_record_list<T: Record>(
    r: &mut Reader<'_>,
    field: &'static str,
    list_max: usize,
) -> Result<Vec<T>, Error> {
    let count = read_list_count(r, field, list_max)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_record(r)?);
    }
    Ok(values)
}
