//! MIME classification for candidate files

/// MIME types eligible for upload. Anything else is dropped on acceptance.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "image/heic",
    "image/heif",
    "image/jpeg",
    "image/jpg",
    "video/quicktime",
    "video/mp4",
    "application/pdf",
    "image/png",
    "image/tiff",
    "image/webp",
];

/// Extensions offered by the native file dialog
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "heic", "heif", "jpg", "jpeg", "mov", "mp4", "pdf", "png", "tif", "tiff", "webp",
];

const FALLBACK_MIME: &str = "application/octet-stream";

/// Bytes read from the head of a file for content sniffing
pub const SNIFF_LEN: u64 = 8192;

pub fn is_accepted(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Map a file name's extension to a MIME type, the way a browser file input does.
pub fn mime_from_extension(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "heic" => "image/heic",
        "heif" => "image/heif",
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "mov" | "qt" => "video/quicktime",
        "mp4" | "m4v" => "video/mp4",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "txt" => "text/plain",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

/// Determine the MIME type of a candidate: extension first, then content sniffing.
pub fn detect_mime(name: &str, content: &[u8]) -> &'static str {
    mime_from_extension(name)
        .or_else(|| infer::get(content).map(|t| t.mime_type()))
        .unwrap_or(FALLBACK_MIME)
}

/// Broad category used to pick a thumbnail style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Pdf,
    Other,
}

impl MediaKind {
    pub fn of(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else if mime == "application/pdf" {
            MediaKind::Pdf
        } else {
            MediaKind::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

    #[test]
    fn accepted_set_matches_upload_filter() {
        assert!(is_accepted("image/heic"));
        assert!(is_accepted("video/quicktime"));
        assert!(is_accepted("application/pdf"));
        assert!(!is_accepted("image/gif"));
        assert!(!is_accepted("text/plain"));
        assert!(!is_accepted(""));
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(mime_from_extension("IMG_0001.HEIC"), Some("image/heic"));
        assert_eq!(mime_from_extension("clip.MoV"), Some("video/quicktime"));
        assert_eq!(mime_from_extension("scan.tif"), Some("image/tiff"));
    }

    #[test]
    fn extension_lookup_needs_a_dot() {
        assert_eq!(mime_from_extension("Makefile"), None);
        assert_eq!(mime_from_extension("notes.unknownext"), None);
    }

    #[test]
    fn content_sniffing_covers_missing_extension() {
        assert_eq!(detect_mime("snapshot", PNG_MAGIC), "image/png");
    }

    #[test]
    fn extension_wins_over_content() {
        assert_eq!(detect_mime("report.pdf", PNG_MAGIC), "application/pdf");
    }

    #[test]
    fn unknown_content_falls_back_to_octet_stream() {
        assert_eq!(detect_mime("blob", b"hello"), "application/octet-stream");
        assert!(!is_accepted(detect_mime("blob", b"hello")));
    }

    #[test]
    fn media_kind_groups_mime_types() {
        assert_eq!(MediaKind::of("image/webp"), MediaKind::Image);
        assert_eq!(MediaKind::of("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::of("application/pdf"), MediaKind::Pdf);
        assert_eq!(MediaKind::of("application/zip"), MediaKind::Other);
    }
}
