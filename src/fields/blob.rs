//! Field frames for text and binary payloads and their lists.
//!
//! Both types frame as a varint byte length followed by the payload. Text is
//! UTF-8 and decodes into an owned string, substituting `?` for invalid
//! sequences; binary is copied out verbatim. Length fields are held to the
//! package's `size_max` before any allocation happens.

use super::{check_list_len, read_list_count};
use crate::{
    buffer::{Reader, Writer},
    error::Error,
    text, varint,
};

pub fn write_text(w: &mut Writer<'_>, index: u8, value: &str) {
    if !value.is_empty() {
        w.put_u8(index);
        put_block(w, value.as_bytes());
    }
}

pub fn write_binary(w: &mut Writer<'_>, index: u8, value: &[u8]) {
    if !value.is_empty() {
        w.put_u8(index);
        put_block(w, value);
    }
}

pub fn write_text_list(
    w: &mut Writer<'_>,
    index: u8,
    field: &'static str,
    values: &[String],
) -> Result<(), Error> {
    if values.is_empty() {
        return Ok(());
    }
    check_list_len(field, values.len(), w.list_max())?;
    w.put_u8(index);
    w.put_varint(values.len() as u64);
    for value in values {
        put_block(w, value.as_bytes());
    }
    Ok(())
}

pub fn write_binary_list(
    w: &mut Writer<'_>,
    index: u8,
    field: &'static str,
    values: &[Vec<u8>],
) -> Result<(), Error> {
    if values.is_empty() {
        return Ok(());
    }
    check_list_len(field, values.len(), w.list_max())?;
    w.put_u8(index);
    w.put_varint(values.len() as u64);
    for value in values {
        put_block(w, value);
    }
    Ok(())
}

pub fn read_text(r: &mut Reader<'_>, field: &'static str, size_max: usize) -> Result<String, Error> {
    Ok(text::decode(get_block(r, field, size_max)?))
}

pub fn read_binary(
    r: &mut Reader<'_>,
    field: &'static str,
    size_max: usize,
) -> Result<Vec<u8>, Error> {
    Ok(get_block(r, field, size_max)?.to_vec())
}

pub fn read_text_list(
    r: &mut Reader<'_>,
    field: &'static str,
    size_max: usize,
    list_max: usize,
) -> Result<Vec<String>, Error> {
    let count = read_list_count(r, field, list_max)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(text::decode(get_block(r, field, size_max)?));
    }
    Ok(values)
}

pub fn read_binary_list(
    r: &mut Reader<'_>,
    field: &'static str,
    size_max: usize,
    list_max: usize,
) -> Result<Vec<Vec<u8>>, Error> {
    let count = read_list_count(r, field, list_max)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(get_block(r, field, size_max)?.to_vec());
    }
    Ok(values)
}

/// Writes one length-prefixed block.
fn put_block(w: &mut Writer<'_>, bytes: &[u8]) {
    w.put_varint(bytes.len() as u64);
    w.put_slice(bytes);
}

/// Reads one length-prefixed block, holding the length to `size_max`.
fn get_block<'a>(
    r: &mut Reader<'a>,
    field: &'static str,
    size_max: usize,
) -> Result<&'a [u8], Error> {
    let len = varint::read(r, field)?;
    let size = usize::try_from(len).unwrap_or(usize::MAX);
    if size > size_max {
        return Err(Error::SizeExceeded {
            field,
            size,
            max: size_max,
        });
    }
    r.get_slice(size)
}
