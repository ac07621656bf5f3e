//! Integration tests over hand-rolled records, written the way a schema
//! compiler would emit them: one aggregate per struct, fields framed in
//! schema order, a tag-byte match for dispatch.

use colfer::{fields, Error, Reader, Record, Timestamp, Writer, SENTINEL};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// The classic benchmark schema:
/// `int64 key @0; text host @1; uint16 port @2; int32 size @3;
/// uint64 hash @4; float64 ratio @5; bool route @6;`
#[derive(Debug, Default, Clone, PartialEq)]
struct Conn {
    key: i64,
    host: String,
    port: u16,
    size: i32,
    hash: u64,
    ratio: f64,
    route: bool,
}

impl Record for Conn {
    const NAME: &'static str = "bench.conn";

    fn write_fields(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        fields::write_i64(w, 0, "bench.conn.key", self.key)?;
        fields::write_text(w, 1, &self.host);
        fields::write_u16(w, 2, self.port);
        fields::write_i32(w, 3, self.size);
        fields::write_u64(w, 4, self.hash);
        fields::write_f64(w, 5, self.ratio);
        fields::write_bool(w, 6, self.route);
        Ok(())
    }

    fn read_field(&mut self, header: u8, r: &mut Reader<'_>) -> Result<bool, Error> {
        match header {
            0x00 => self.key = fields::read_i64(r, "bench.conn.key")?,
            0x80 => self.key = fields::read_i64_neg(r, "bench.conn.key")?,
            0x01 => self.host = fields::read_text(r, "bench.conn.host", Self::SIZE_MAX)?,
            0x02 => self.port = fields::read_u16(r)?,
            0x82 => self.port = fields::read_u16_compact(r)?,
            0x03 => self.size = fields::read_i32(r, "bench.conn.size")?,
            0x83 => self.size = fields::read_i32_neg(r, "bench.conn.size")?,
            0x04 => self.hash = fields::read_u64(r, "bench.conn.hash")?,
            0x84 => self.hash = fields::read_u64_fixed(r)?,
            0x05 => self.ratio = fields::read_f64(r)?,
            0x06 => self.route = true,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A nested payload target.
#[derive(Debug, Default, Clone, PartialEq)]
struct Piece {
    num: u32,
}

impl Record for Piece {
    const NAME: &'static str = "demo.piece";

    fn write_fields(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        fields::write_u32(w, 0, self.num);
        Ok(())
    }

    fn read_field(&mut self, header: u8, r: &mut Reader<'_>) -> Result<bool, Error> {
        match header {
            0x00 => self.num = fields::read_u32(r, "demo.piece.num")?,
            0x80 => self.num = fields::read_u32_fixed(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Every schema type in one struct, scalar and list alike.
#[derive(Debug, Default, Clone, PartialEq)]
struct Omni {
    b: bool,
    u8_: u8,
    u16_: u16,
    u32_: u32,
    u64_: u64,
    i32_: i32,
    i64_: i64,
    f32_: f32,
    f64_: f64,
    at: Timestamp,
    s: String,
    a: Vec<u8>,
    piece: Option<Box<Piece>>,
    pieces: Vec<Piece>,
    f32s: Vec<f32>,
    f64s: Vec<f64>,
    texts: Vec<String>,
    blobs: Vec<Vec<u8>>,
}

impl Record for Omni {
    const NAME: &'static str = "demo.omni";

    fn write_fields(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        fields::write_bool(w, 0, self.b);
        fields::write_u8(w, 1, self.u8_);
        fields::write_u16(w, 2, self.u16_);
        fields::write_u32(w, 3, self.u32_);
        fields::write_u64(w, 4, self.u64_);
        fields::write_i32(w, 5, self.i32_);
        fields::write_i64(w, 6, "demo.omni.i64", self.i64_)?;
        fields::write_f32(w, 7, self.f32_);
        fields::write_f64(w, 8, self.f64_);
        fields::write_timestamp(w, 9, self.at);
        fields::write_text(w, 10, &self.s);
        fields::write_binary(w, 11, &self.a);
        fields::write_record(w, 12, self.piece.as_deref())?;
        fields::write_record_list(w, 13, "demo.omni.pieces", &self.pieces)?;
        fields::write_f32_list(w, 14, "demo.omni.f32s", &self.f32s)?;
        fields::write_f64_list(w, 15, "demo.omni.f64s", &self.f64s)?;
        fields::write_text_list(w, 16, "demo.omni.texts", &self.texts)?;
        fields::write_binary_list(w, 17, "demo.omni.blobs", &self.blobs)?;
        Ok(())
    }

    fn read_field(&mut self, header: u8, r: &mut Reader<'_>) -> Result<bool, Error> {
        match header {
            0x00 => self.b = true,
            0x01 => self.u8_ = fields::read_u8(r)?,
            0x02 => self.u16_ = fields::read_u16(r)?,
            0x82 => self.u16_ = fields::read_u16_compact(r)?,
            0x03 => self.u32_ = fields::read_u32(r, "demo.omni.u32")?,
            0x83 => self.u32_ = fields::read_u32_fixed(r)?,
            0x04 => self.u64_ = fields::read_u64(r, "demo.omni.u64")?,
            0x84 => self.u64_ = fields::read_u64_fixed(r)?,
            0x05 => self.i32_ = fields::read_i32(r, "demo.omni.i32")?,
            0x85 => self.i32_ = fields::read_i32_neg(r, "demo.omni.i32")?,
            0x06 => self.i64_ = fields::read_i64(r, "demo.omni.i64")?,
            0x86 => self.i64_ = fields::read_i64_neg(r, "demo.omni.i64")?,
            0x07 => self.f32_ = fields::read_f32(r)?,
            0x08 => self.f64_ = fields::read_f64(r)?,
            0x09 => self.at = fields::read_timestamp(r)?,
            0x89 => self.at = fields::read_timestamp_extended(r)?,
            0x0A => self.s = fields::read_text(r, "demo.omni.s", Self::SIZE_MAX)?,
            0x0B => self.a = fields::read_binary(r, "demo.omni.a", Self::SIZE_MAX)?,
            0x0C => self.piece = Some(Box::new(fields::read_record(r)?)),
            0x0D => self.pieces = fields::read_record_list(r, "demo.omni.pieces", Self::LIST_MAX)?,
            0x0E => self.f32s = fields::read_f32_list(r, "demo.omni.f32s", Self::LIST_MAX)?,
            0x0F => self.f64s = fields::read_f64_list(r, "demo.omni.f64s", Self::LIST_MAX)?,
            0x10 => {
                self.texts =
                    fields::read_text_list(r, "demo.omni.texts", Self::SIZE_MAX, Self::LIST_MAX)?
            }
            0x11 => {
                self.blobs =
                    fields::read_binary_list(r, "demo.omni.blobs", Self::SIZE_MAX, Self::LIST_MAX)?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Field indices match the wire-format examples:
/// `text s @0; uint16 u @1; int32 n @2; bool b @3; timestamp t @4;
/// float64 f @5;`
#[derive(Debug, Default, Clone, PartialEq)]
struct Vectors {
    s: String,
    u: u16,
    n: i32,
    b: bool,
    t: Timestamp,
    f: f64,
}

impl Record for Vectors {
    const NAME: &'static str = "demo.vectors";

    fn write_fields(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        fields::write_text(w, 0, &self.s);
        fields::write_u16(w, 1, self.u);
        fields::write_i32(w, 2, self.n);
        fields::write_bool(w, 3, self.b);
        fields::write_timestamp(w, 4, self.t);
        fields::write_f64(w, 5, self.f);
        Ok(())
    }

    fn read_field(&mut self, header: u8, r: &mut Reader<'_>) -> Result<bool, Error> {
        match header {
            0x00 => self.s = fields::read_text(r, "demo.vectors.s", Self::SIZE_MAX)?,
            0x01 => self.u = fields::read_u16(r)?,
            0x81 => self.u = fields::read_u16_compact(r)?,
            0x02 => self.n = fields::read_i32(r, "demo.vectors.n")?,
            0x82 => self.n = fields::read_i32_neg(r, "demo.vectors.n")?,
            0x03 => self.b = true,
            0x04 => self.t = fields::read_timestamp(r)?,
            0x84 => self.t = fields::read_timestamp_extended(r)?,
            0x05 => self.f = fields::read_f64(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn round_trip<T: Record + PartialEq + std::fmt::Debug>(record: &T) -> usize {
    let encoded = record.marshal().unwrap();
    assert_eq!(*encoded.last().unwrap(), SENTINEL);

    let mut decoded = T::default();
    assert_eq!(decoded.unmarshal(&encoded).unwrap(), encoded.len());
    assert_eq!(&decoded, record);
    encoded.len()
}

#[test]
fn test_wire_vectors() {
    assert_eq!(&Vectors::default().marshal().unwrap()[..], &[0x7F]);

    let v = Vectors {
        b: true,
        ..Default::default()
    };
    assert_eq!(&v.marshal().unwrap()[..], &[0x03, 0x7F]);

    let v = Vectors {
        u: 0x00FF,
        ..Default::default()
    };
    assert_eq!(&v.marshal().unwrap()[..], &[0x81, 0xFF, 0x7F]);

    let v = Vectors {
        n: -5,
        ..Default::default()
    };
    assert_eq!(&v.marshal().unwrap()[..], &[0x82, 0x05, 0x7F]);

    let v = Vectors {
        s: "hi".into(),
        ..Default::default()
    };
    assert_eq!(&v.marshal().unwrap()[..], &[0x00, 0x02, 0x68, 0x69, 0x7F]);

    let v = Vectors {
        t: Timestamp::new(1, 0),
        ..Default::default()
    };
    assert_eq!(
        &v.marshal().unwrap()[..],
        &[0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x7F]
    );
}

#[test]
fn test_nan_survives_round_trip() {
    let v = Vectors {
        f: f64::NAN,
        ..Default::default()
    };
    let encoded = v.marshal().unwrap();
    assert_eq!(
        &encoded[..],
        &[0x05, 0x7F, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x7F]
    );

    let mut decoded = Vectors::default();
    decoded.unmarshal(&encoded).unwrap();
    assert!(decoded.f.is_nan());
}

#[test]
fn test_extended_u16_accepted() {
    let mut decoded = Vectors::default();
    decoded.unmarshal(&[0x01, 0x00, 0xFF, 0x7F]).unwrap();
    assert_eq!(decoded.u, 0x00FF);
}

#[test]
fn test_full_matrix_round_trip() {
    let record = Omni {
        b: true,
        u8_: 200,
        u16_: 0xFEDC,
        u32_: 0x00FF_FFFF,
        u64_: 1 << 52,
        i32_: -1_234_567,
        i64_: -(1 << 40),
        f32_: 2.5,
        f64_: -0.0625,
        at: Timestamp::from_millis(-86_400_001),
        s: "vhost8.dmz.example.com".into(),
        a: vec![0x00, 0x7F, 0x80, 0xFF],
        piece: Some(Box::new(Piece { num: 9 })),
        pieces: vec![Piece { num: 1 }, Piece::default(), Piece { num: 3 }],
        f32s: vec![0.0, -1.5, 3.25],
        f64s: vec![f64::MIN_POSITIVE, 0.0],
        texts: vec!["α".into(), String::new()],
        blobs: vec![vec![], vec![0xAA]],
    };
    round_trip(&record);
}

#[test]
fn test_sparse_records_stay_small() {
    // One field set, one frame on the wire.
    let len = round_trip(&Omni {
        u8_: 1,
        ..Default::default()
    });
    assert_eq!(len, 3);

    assert_eq!(&Omni::default().marshal().unwrap()[..], &[0x7F]);
}

#[test]
fn test_ascending_tag_order() {
    let record = Omni {
        b: true,
        u64_: 7,
        s: "x".into(),
        ..Default::default()
    };
    let encoded = record.marshal().unwrap();
    // Tags 0x00, 0x04, 0x0A in order, then the sentinel.
    assert_eq!(&encoded[..], &[0x00, 0x04, 0x07, 0x0A, 0x01, b'x', 0x7F]);
}

#[test]
fn test_unknown_tag_rejected() {
    // Replace a known tag with an index outside the schema.
    let mut data = Vectors {
        n: -5,
        ..Default::default()
    }
    .marshal()
    .unwrap()
    .to_vec();
    data[0] = 0x70;
    let mut decoded = Vectors::default();
    assert!(matches!(
        decoded.unmarshal(&data),
        Err(Error::UnknownHeader {
            header: 0x70,
            at: 0
        })
    ));
}

#[test]
fn test_truncation_never_passes() {
    let record = Omni {
        b: true,
        u32_: 5_000_000,
        at: Timestamp::new(3, 20),
        s: "truncate me".into(),
        pieces: vec![Piece { num: 300 }],
        ..Default::default()
    };
    let encoded = record.marshal().unwrap();

    for cut in 0..encoded.len() {
        let mut decoded = Omni::default();
        match decoded.unmarshal(&encoded[..cut]) {
            Err(Error::EndOfBuffer) | Err(Error::UnknownHeader { .. }) => {}
            other => panic!("truncation at {cut} produced {other:?}"),
        }
    }
}

#[test]
fn test_trailing_input_ignored() {
    let record = Conn {
        route: true,
        ..Default::default()
    };
    let mut data = record.marshal().unwrap().to_vec();
    let len = data.len();
    data.extend_from_slice(&[0xBE, 0xEF]);

    let mut decoded = Conn::default();
    assert_eq!(decoded.unmarshal(&data).unwrap(), len);
    assert_eq!(decoded, record);
}

fn random_conn(rng: &mut StdRng) -> Conn {
    let hosts = ["db003lz12", "localhost", "kdc.local", "vhost8.dmz.example.com", ""];
    Conn {
        key: rng.gen_range(-(1 << 56) + 1..1 << 56),
        host: hosts[rng.gen_range(0..hosts.len())].into(),
        port: rng.gen(),
        size: rng.gen(),
        hash: rng.gen(),
        ratio: if rng.gen_bool(0.2) {
            0.0
        } else {
            rng.gen::<f64>()
        },
        route: rng.gen(),
    }
}

#[test]
fn test_list_ceiling_on_marshal() {
    let record = Omni {
        texts: vec![String::new(); Omni::LIST_MAX + 1],
        ..Default::default()
    };
    assert!(matches!(
        record.marshal(),
        Err(Error::ListTooLong {
            field: "demo.omni.texts",
            ..
        })
    ));

    // Exactly at the ceiling is fine.
    let record = Omni {
        blobs: vec![Vec::new(); Omni::LIST_MAX],
        ..Default::default()
    };
    round_trip(&record);
}

#[test]
fn test_randomized_round_trips() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..1_000 {
        let record = random_conn(&mut rng);
        round_trip(&record);
    }
}

#[test]
fn test_randomized_timestamps() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..1_000 {
        let record = Vectors {
            t: Timestamp::new(rng.gen_range(i64::MIN / 2..i64::MAX / 2), rng.gen_range(0..1_000_000_000)),
            ..Default::default()
        };
        round_trip(&record);
    }
}
