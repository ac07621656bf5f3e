//! Error types returned by the wire codec.

use thiserror::Error;

/// Failure of a marshal or unmarshal call.
///
/// All failures are fatal to the current call. A failed marshal leaves the
/// output buffer in an undefined state; a failed unmarshal may leave the
/// record partially populated and the caller must discard it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input ended before a field frame or the record sentinel completed.
    #[error("end of buffer")]
    EndOfBuffer,

    /// A record's serial size, or a text/binary length field, exceeds the
    /// package's `size_max` ceiling.
    #[error("{field}: serial size {size} exceeds {max} bytes")]
    SizeExceeded {
        field: &'static str,
        size: usize,
        max: usize,
    },

    /// A list carries more elements than the package's `list_max` ceiling.
    #[error("{field}: {len} elements exceed {max}")]
    ListTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A scalar does not fit its type's wire range.
    #[error("{field}: value out of range")]
    OutOfRange { field: &'static str },

    /// A tag byte matched no field in the schema and is not the sentinel.
    #[error("unknown header {header:#04x} at byte {at}")]
    UnknownHeader { header: u8, at: usize },

    /// A tag byte re-addressed a field index already populated within the
    /// same record.
    #[error("repeated header {header:#04x} at byte {at}")]
    RepeatedHeader { header: u8, at: usize },
}
