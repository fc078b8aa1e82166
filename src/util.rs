//! Text decoding for book and chapter files.

use std::borrow::Cow;
use std::path::Path;

use crate::error::Result;

/// How far into a file to look for a `charset=` declaration.
const SNIFF_LEN: usize = 1024;

/// Encoding label declared by a `<meta charset=...>` or
/// `<?xml encoding=...?>` near the start of the file.
fn declared_charset(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let (pos, key_len) = [&b"charset="[..], &b"encoding="[..]]
        .iter()
        .find_map(|key| memchr::memmem::find(head, key).map(|pos| (pos, key.len())))?;
    let rest = &head[pos + key_len..];
    let rest = rest.strip_prefix(b"\"").or_else(|| rest.strip_prefix(b"'")).unwrap_or(rest);
    let end = rest
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'-' || b == b'_'))
        .unwrap_or(rest.len());
    std::str::from_utf8(&rest[..end]).ok().filter(|s| !s.is_empty())
}

/// Decode bytes to a string.
///
/// UTF-8 is tried first (a BOM is stripped). Malformed input is decoded with
/// the encoding the file declares, falling back to Windows-1252, which is
/// what most legacy etexts are in.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Read and decode a text file.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes, declared_charset(&bytes)).into_owned())
}
