//! Magic-byte checks for declared content types.

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = b"\xff\xd8\xff";

/// Bytes needed from the start of a payload to decide
pub const SNIFF_LEN: usize = 12;

/// Whether `header` plausibly starts a file of `content_type`.
///
/// Types without a known signature always pass.
pub fn matches_signature(content_type: &str, header: &[u8]) -> bool {
    match content_type {
        "image/png" => header.starts_with(PNG_SIGNATURE),
        "image/jpg" | "image/jpeg" => header.starts_with(JPEG_SIGNATURE),
        // ISO-BMFF: 4-byte box size then "ftyp"
        "video/mp4" => header.len() >= 8 && &header[4..8] == b"ftyp",
        _ => true,
    }
}
