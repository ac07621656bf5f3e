//! Serialize records in the Colfer binary wire format.
//!
//! # Overview
//!
//! A runtime codec for a compact, self-delimiting binary format. A record on
//! the wire is a run of field frames closed by a sentinel byte; each frame
//! opens with a tag carrying the field's 7-bit index plus a per-type flag
//! bit. Fields left at their default value stay off the wire entirely, so
//! sparse records serialize to a handful of bytes.
//!
//! The [Record] trait is the runtime contract a schema compiler targets: an
//! implementation lists its fields once for encoding and once for tag
//! dispatch, and the trait drives the framing loop, the guards against the
//! package's `size_max` and `list_max` ceilings, and the error reporting.
//! The [fields] module holds the per-type frame codecs those
//! implementations compose; [schema] models the generation-time input.
//!
//! # Example
//!
//! ```
//! use colfer::{fields, Error, Reader, Record, Writer};
//!
//! /// `text name @0; uint16 port @1;` in schema notation.
//! #[derive(Debug, Default, PartialEq)]
//! struct Endpoint {
//!     name: String,
//!     port: u16,
//! }
//!
//! impl Record for Endpoint {
//!     const NAME: &'static str = "demo.endpoint";
//!
//!     fn write_fields(&self, w: &mut Writer<'_>) -> Result<(), Error> {
//!         fields::write_text(w, 0, &self.name);
//!         fields::write_u16(w, 1, self.port);
//!         Ok(())
//!     }
//!
//!     fn read_field(&mut self, header: u8, r: &mut Reader<'_>) -> Result<bool, Error> {
//!         match header {
//!             0x00 => self.name = fields::read_text(r, "demo.endpoint.name", Self::SIZE_MAX)?,
//!             0x01 => self.port = fields::read_u16(r)?,
//!             0x81 => self.port = fields::read_u16_compact(r)?,
//!             _ => return Ok(false),
//!         }
//!         Ok(true)
//!     }
//! }
//!
//! let record = Endpoint {
//!     name: "db003lz12".into(),
//!     port: 389,
//! };
//! let encoded = record.marshal().unwrap();
//! assert_eq!(*encoded.last().unwrap(), 0x7F);
//!
//! let mut decoded = Endpoint::default();
//! let read = decoded.unmarshal(&encoded).unwrap();
//! assert_eq!(read, encoded.len());
//! assert_eq!(decoded, record);
//! ```

pub mod buffer;
pub mod error;
pub mod fields;
pub mod record;
pub mod schema;
mod text;
pub mod timestamp;
pub mod varint;

// Re-export main types and traits
pub use buffer::{Reader, Writer};
pub use error::Error;
pub use record::{Record, DEFAULT_LIST_MAX, DEFAULT_SIZE_MAX, FLAG, INDEX_MAX, SENTINEL};
pub use timestamp::Timestamp;
