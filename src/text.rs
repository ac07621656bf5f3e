//! Lossy UTF-8 decoding for text payloads.

/// Decodes a text payload into an owned string, substituting `?` for each
/// invalid byte sequence instead of failing.
///
/// Encoders only ever produce valid UTF-8, but payloads arrive from
/// untrusted peers; a record must still decode when a text field carries
/// mangled bytes.
pub(crate) fn decode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            out.push('?');
        }
    }
    out
}
