use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Attachments are embedded in the persisted slot as base64, so the cap
/// bounds both memory use and slot size.
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("file is {size} bytes, above the {limit} byte attachment limit")]
    TooLarge { size: usize, limit: usize },
    #[error("unsupported file type (expected an image or a PDF)")]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime: &'static str,
    pub data_uri: String,
}

pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    None
}

pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn from_bytes(bytes: &[u8]) -> Result<Attachment, AttachmentError> {
    if bytes.len() > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            size: bytes.len(),
            limit: MAX_ATTACHMENT_BYTES,
        });
    }
    let mime = sniff_mime(bytes).ok_or(AttachmentError::Unsupported)?;
    Ok(Attachment {
        mime,
        data_uri: to_data_uri(mime, bytes),
    })
}

pub fn load(path: &Path) -> Result<Attachment, AttachmentError> {
    let bytes = fs::read(path).map_err(|source| AttachmentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    from_bytes(&bytes)
}

pub fn is_image(data_uri: &str) -> bool {
    data_uri.starts_with("data:image")
}

pub fn is_pdf(data_uri: &str) -> bool {
    data_uri.starts_with("data:application/pdf")
}

/// Recovers the raw bytes from a `data:<mime>;base64,<payload>` string.
pub fn decode(data_uri: &str) -> Option<Vec<u8>> {
    let (_, payload) = data_uri.split_once(";base64,")?;
    STANDARD.decode(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n rest of file";

    #[test]
    fn sniff_mime_recognizes_each_supported_magic_number() {
        assert_eq!(sniff_mime(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"GIF89a..."), Some("image/gif"));
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"%PDF-1.7"), Some("application/pdf"));
    }

    #[test]
    fn sniff_mime_rejects_unknown_content() {
        assert_eq!(sniff_mime(b"plain text"), None);
        assert_eq!(sniff_mime(b""), None);
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WAVE"), None);
    }

    #[test]
    fn data_uri_round_trips_through_the_codec() {
        let bytes = b"\x89PNG\r\n\x1a\n\x00\x01\x02";
        let uri = to_data_uri("image/png", bytes);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(decode(&uri).as_deref(), Some(bytes.as_slice()));
    }

    #[test]
    fn from_bytes_builds_an_image_attachment() {
        let attachment = from_bytes(PNG_HEADER).expect("png bytes should attach");
        assert_eq!(attachment.mime, "image/png");
        assert!(is_image(&attachment.data_uri));
        assert!(!is_pdf(&attachment.data_uri));
    }

    #[test]
    fn from_bytes_builds_a_pdf_attachment() {
        let attachment = from_bytes(b"%PDF-1.4 stub").expect("pdf bytes should attach");
        assert_eq!(attachment.mime, "application/pdf");
        assert!(is_pdf(&attachment.data_uri));
        assert!(!is_image(&attachment.data_uri));
    }

    #[test]
    fn from_bytes_rejects_oversized_payloads() {
        let oversized = vec![0u8; MAX_ATTACHMENT_BYTES + 1];
        let error = from_bytes(&oversized).expect_err("oversized payload should fail");
        assert!(matches!(
            error,
            AttachmentError::TooLarge {
                size,
                limit: MAX_ATTACHMENT_BYTES
            } if size == MAX_ATTACHMENT_BYTES + 1
        ));
    }

    #[test]
    fn from_bytes_rejects_unsniffable_content() {
        let error = from_bytes(b"not a supported file").expect_err("should fail");
        assert!(matches!(error, AttachmentError::Unsupported));
    }

    #[test]
    fn load_reports_a_missing_file_as_io() {
        let error = load(Path::new("/definitely/not/here.png")).expect_err("should fail");
        assert!(matches!(error, AttachmentError::Io { .. }));
    }

    #[test]
    fn decode_rejects_strings_without_a_base64_payload() {
        assert!(decode("data:image/png").is_none());
        assert!(decode("not a data uri").is_none());
    }
}
