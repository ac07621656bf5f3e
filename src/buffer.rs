//! Byte cursors shared by the field codecs.
//!
//! [Writer] appends field frames to a caller-owned [BytesMut] and carries the
//! package ceilings so list and size guards can run while encoding. [Reader]
//! walks an input slice and reports the byte offset of every failure. Neither
//! retains the underlying buffer past the marshal or unmarshal call.

use crate::{error::Error, varint};
use bytes::{BufMut, BytesMut};

/// Append-only view over an output buffer, scoped to one marshal call.
///
/// All multi-byte puts are big-endian, per the wire format.
pub struct Writer<'a> {
    buf: &'a mut BytesMut,
    start: usize,
    size_max: usize,
    list_max: usize,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(buf: &'a mut BytesMut, size_max: usize, list_max: usize) -> Self {
        let start = buf.len();
        Self {
            buf,
            start,
            size_max,
            list_max,
        }
    }

    /// The package's ceiling on any record's serial size.
    pub fn size_max(&self) -> usize {
        self.size_max
    }

    /// The package's ceiling on any list's element count.
    pub fn list_max(&self) -> usize {
        self.list_max
    }

    /// Bytes appended since this writer was created.
    pub fn written(&self) -> usize {
        self.buf.len() - self.start
    }

    #[inline]
    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    #[inline]
    pub fn put_u16(&mut self, v: u16) {
        self.buf.put_u16(v);
    }

    #[inline]
    pub fn put_u32(&mut self, v: u32) {
        self.buf.put_u32(v);
    }

    #[inline]
    pub fn put_u64(&mut self, v: u64) {
        self.buf.put_u64(v);
    }

    #[inline]
    pub fn put_i64(&mut self, v: i64) {
        self.buf.put_i64(v);
    }

    #[inline]
    pub fn put_slice(&mut self, v: &[u8]) {
        self.buf.put_slice(v);
    }

    #[inline]
    pub fn put_varint(&mut self, v: u64) {
        varint::write(self.buf, v);
    }
}

/// Read cursor over one input slice.
///
/// The cursor position doubles as the byte offset carried by decode errors,
/// and as the consumed-length result of a successful unmarshal.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn get_u8(&mut self) -> Result<u8, Error> {
        let v = *self.data.get(self.pos).ok_or(Error::EndOfBuffer)?;
        self.pos += 1;
        Ok(v)
    }

    /// Takes the next `n` bytes. The returned slice borrows from the input
    /// and must be copied out before the unmarshal call returns it.
    #[inline]
    pub fn get_slice(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let end = self.pos.checked_add(n).ok_or(Error::EndOfBuffer)?;
        let out = self.data.get(self.pos..end).ok_or(Error::EndOfBuffer)?;
        self.pos = end;
        Ok(out)
    }

    #[inline]
    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.get_slice(N)?);
        Ok(out)
    }
}
