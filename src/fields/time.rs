//! Field frames for timestamps.
//!
//! Two payload shapes: 8 bytes (unsigned 32-bit seconds plus nanoseconds)
//! when the instant sits in `[0, 2^32)` seconds, and a flagged 12-byte form
//! (two's-complement 64-bit seconds plus nanoseconds) for everything else,
//! pre-epoch instants included.

use crate::{
    buffer::{Reader, Writer},
    error::Error,
    record::FLAG,
    timestamp::Timestamp,
};

/// Seconds representable by the short form.
const COMPACT_SECONDS_MAX: i64 = (1 << 32) - 1;

pub fn write_timestamp(w: &mut Writer<'_>, index: u8, value: Timestamp) {
    if value.is_zero() {
        return;
    }
    let seconds = value.seconds();
    if (0..=COMPACT_SECONDS_MAX).contains(&seconds) {
        w.put_u8(index);
        w.put_u32(seconds as u32);
    } else {
        w.put_u8(index | FLAG);
        w.put_i64(seconds);
    }
    w.put_u32(value.subsec_nanos());
}

/// The unflagged 8-byte form.
///
/// A nanosecond count at or above one second is folded into the seconds
/// rather than rejected.
pub fn read_timestamp(r: &mut Reader<'_>) -> Result<Timestamp, Error> {
    let seconds = u32::from_be_bytes(r.get_array()?);
    let nanos = u32::from_be_bytes(r.get_array()?);
    Ok(Timestamp::new(i64::from(seconds), i64::from(nanos)))
}

/// The flagged 12-byte form.
pub fn read_timestamp_extended(r: &mut Reader<'_>) -> Result<Timestamp, Error> {
    let seconds = i64::from_be_bytes(r.get_array()?);
    let nanos = u32::from_be_bytes(r.get_array()?);
    Ok(Timestamp::new(seconds, i64::from(nanos)))
}
