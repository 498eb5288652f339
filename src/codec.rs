//! Transport encoding for image payloads.

use crate::{Error, Result};
use base64::Engine as _;

/// Encode raw image bytes as standard, padded base64.
pub fn encode_image(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn decode_image(encoded: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| Error::Validation(format!("Failed to decode base64 image: {}", e)))
}

/// Best-effort format sniffing from magic bytes.
pub fn sniff_image_format(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_empty() {
        assert_eq!(encode_image(&[]), "");
        assert_eq!(decode_image("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_round_trip_single_byte() {
        let encoded = encode_image(&[0xFF]);
        assert_eq!(encoded, "/w==");
        assert_eq!(decode_image(&encoded).unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_round_trip_large_payload() {
        let data: Vec<u8> = (0..(1024 * 1024 + 17)).map(|i| (i * 31 % 256) as u8).collect();
        let decoded = decode_image(&encode_image(&data)).unwrap();
        assert_eq!(decoded.len(), data.len());
        assert!(decoded == data);
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        assert!(decode_image("not base64!").is_err());
    }

    #[test]
    fn test_sniff_formats() {
        assert_eq!(sniff_image_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("jpeg"));
        assert_eq!(
            sniff_image_format(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some("png")
        );
        assert_eq!(
            sniff_image_format(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            Some("webp")
        );
        assert_eq!(sniff_image_format(b"GIF89a"), Some("gif"));
        assert_eq!(sniff_image_format(&[0x00, 0x01]), None);
        assert_eq!(sniff_image_format(&[]), None);
    }
}
