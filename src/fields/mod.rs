//! Field-frame codecs, one pair of halves per schema type.
//!
//! Writers emit a complete frame (tag plus payload) and stay silent when the
//! value is the type's default, so default omission lives here rather than
//! in every [Record](crate::Record) implementation. Readers consume exactly
//! one payload, the tag byte having been dispatched by the record driver;
//! types with two tag variants get one reader per variant, the bare name
//! covering the unflagged form.

mod blob;
mod float;
mod nested;
mod scalar;
mod time;

pub use blob::{
    read_binary, read_binary_list, read_text, read_text_list, write_binary, write_binary_list,
    write_text, write_text_list,
};
pub use float::{
    read_f32, read_f32_list, read_f64, read_f64_list, write_f32, write_f32_list, write_f64,
    write_f64_list,
};
pub use nested::{read_record, read_record_list, write_record, write_record_list};
pub use scalar::{
    read_i32, read_i32_neg, read_i64, read_i64_neg, read_u16, read_u16_compact, read_u32,
    read_u32_fixed, read_u64, read_u64_fixed, read_u8, write_bool, write_i32, write_i64, write_u16,
    write_u32, write_u64, write_u8,
};
pub use time::{read_timestamp, read_timestamp_extended, write_timestamp};

use crate::{buffer::Reader, error::Error, varint};

/// Encode-side list guard.
fn check_list_len(field: &'static str, len: usize, list_max: usize) -> Result<(), Error> {
    if len > list_max {
        return Err(Error::ListTooLong {
            field,
            len,
            max: list_max,
        });
    }
    Ok(())
}

/// Reads a list's element count and holds it to the `list_max` ceiling.
fn read_list_count(
    r: &mut Reader<'_>,
    field: &'static str,
    list_max: usize,
) -> Result<usize, Error> {
    let count = varint::read(r, field)?;
    let len = usize::try_from(count).unwrap_or(usize::MAX);
    if len > list_max {
        return Err(Error::ListTooLong {
            field,
            len,
            max: list_max,
        });
    }
    Ok(len)
}
