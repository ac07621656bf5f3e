//! Record-level marshal and unmarshal.
//!
//! A record on the wire is a run of field frames closed by the [SENTINEL]
//! byte. Each frame starts with a tag: the field's 7-bit index, with the
//! high [FLAG] bit carrying a per-type meaning. [Record] implementations
//! supply the two per-field halves (emit non-default frames, dispatch one
//! header); the provided methods drive the framing loop, the sentinel, the
//! repeated-header rejection, and the serial-size ceiling.

use crate::{
    buffer::{Reader, Writer},
    error::Error,
};
use bytes::{Bytes, BytesMut};

/// Terminates every record frame. Never valid as a field tag: indices stop
/// at [INDEX_MAX].
pub const SENTINEL: u8 = 0x7F;

/// Masks the field index out of a tag byte.
pub const INDEX_MASK: u8 = 0x7F;

/// The per-type flag bit of a tag byte.
pub const FLAG: u8 = 0x80;

/// The largest usable field index.
pub const INDEX_MAX: u8 = 126;

/// Ceiling on a record's serial size when the package declares none.
pub const DEFAULT_SIZE_MAX: usize = 16 * 1024 * 1024;

/// Ceiling on a list's element count when the package declares none.
pub const DEFAULT_LIST_MAX: usize = 64 * 1024;

/// Initial allocation for [Record::marshal]; the buffer grows on demand up
/// to the size ceiling.
const MARSHAL_RESERVE: usize = 4096;

/// A struct from a Colfer package.
///
/// Implementations are what a schema compiler would emit: one plain data
/// aggregate per schema struct, with [Record::write_fields] walking the
/// fields in schema order and [Record::read_field] matching the tag bytes
/// the type can produce. Everything else is provided.
pub trait Record: Default {
    /// The qualified schema name, used in error context.
    const NAME: &'static str;

    /// The package's `size_max`: no record's serial size may exceed this.
    const SIZE_MAX: usize = DEFAULT_SIZE_MAX;

    /// The package's `list_max`: no list may carry more elements.
    const LIST_MAX: usize = DEFAULT_LIST_MAX;

    /// Writes one frame per non-default field, in schema order, without the
    /// closing sentinel.
    fn write_fields(&self, w: &mut Writer<'_>) -> Result<(), Error>;

    /// Dispatches one tag byte: consumes the frame's payload and populates
    /// the field on a match, returns `Ok(false)` when the header belongs to
    /// no field of this type.
    fn read_field(&mut self, header: u8, r: &mut Reader<'_>) -> Result<bool, Error>;

    /// Serializes the record into a fresh buffer.
    fn marshal(&self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::with_capacity(Self::SIZE_MAX.min(MARSHAL_RESERVE));
        self.marshal_into(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Serializes the record onto the end of `buf`, returning the number of
    /// bytes written. Lets callers reuse one allocation across records.
    fn marshal_into(&self, buf: &mut BytesMut) -> Result<usize, Error> {
        let mut w = Writer::new(buf, Self::SIZE_MAX, Self::LIST_MAX);
        self.write_fields(&mut w)?;
        w.put_u8(SENTINEL);
        let size = w.written();
        if size > Self::SIZE_MAX {
            return Err(Error::SizeExceeded {
                field: Self::NAME,
                size,
                max: Self::SIZE_MAX,
            });
        }
        Ok(size)
    }

    /// Deserializes one record from the front of `data`, returning the
    /// number of bytes consumed. Trailing bytes belong to the caller.
    fn unmarshal(&mut self, data: &[u8]) -> Result<usize, Error> {
        let mut r = Reader::new(data);
        self.unmarshal_from(&mut r)?;
        Ok(r.pos())
    }

    /// Deserializes one record at the reader's cursor. Nested record frames
    /// recurse through here, sharing the outer cursor.
    fn unmarshal_from(&mut self, r: &mut Reader<'_>) -> Result<(), Error> {
        let start = r.pos();
        let mut seen = 0u128;
        let mut header = r.get_u8()?;
        while header != SENTINEL {
            let at = r.pos() - 1;
            if !self.read_field(header, r)? {
                return Err(Error::UnknownHeader { header, at });
            }
            let bit = 1u128 << (header & INDEX_MASK);
            if seen & bit != 0 {
                return Err(Error::RepeatedHeader { header, at });
            }
            seen |= bit;
            header = r.get_u8()?;
        }
        let size = r.pos() - start;
        if size > Self::SIZE_MAX {
            return Err(Error::SizeExceeded {
                field: Self::NAME,
                size,
                max: Self::SIZE_MAX,
            });
        }
        Ok(())
    }
}
