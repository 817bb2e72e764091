use super::error::AskError;

/// Media category of an accepted file, used for the picker chip icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Document,
    Image,
    Audio,
    Video,
}

impl MediaKind {
    /// Icon name for the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Document => "document",
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

/// Accepted extensions with their MIME type and category.
///
/// One table drives the `accept` attribute, pick validation and MIME
/// inference, so the three cannot drift apart.
const ACCEPTED: &[(&str, &str, MediaKind)] = &[
    // documents
    ("pdf", "application/pdf", MediaKind::Document),
    ("txt", "text/plain", MediaKind::Document),
    ("md", "text/markdown", MediaKind::Document),
    ("csv", "text/csv", MediaKind::Document),
    ("html", "text/html", MediaKind::Document),
    ("xml", "text/xml", MediaKind::Document),
    ("rtf", "text/rtf", MediaKind::Document),
    // images
    ("png", "image/png", MediaKind::Image),
    ("jpg", "image/jpeg", MediaKind::Image),
    ("jpeg", "image/jpeg", MediaKind::Image),
    ("webp", "image/webp", MediaKind::Image),
    ("gif", "image/gif", MediaKind::Image),
    ("heic", "image/heic", MediaKind::Image),
    ("heif", "image/heif", MediaKind::Image),
    // audio
    ("mp3", "audio/mpeg", MediaKind::Audio),
    ("wav", "audio/wav", MediaKind::Audio),
    ("aac", "audio/aac", MediaKind::Audio),
    ("ogg", "audio/ogg", MediaKind::Audio),
    ("flac", "audio/flac", MediaKind::Audio),
    ("aiff", "audio/aiff", MediaKind::Audio),
    // video
    ("mp4", "video/mp4", MediaKind::Video),
    ("mpeg", "video/mpeg", MediaKind::Video),
    ("mov", "video/quicktime", MediaKind::Video),
    ("avi", "video/x-msvideo", MediaKind::Video),
    ("webm", "video/webm", MediaKind::Video),
    ("wmv", "video/x-ms-wmv", MediaKind::Video),
    ("flv", "video/x-flv", MediaKind::Video),
];

/// The service caps inline request payloads at 20 MB.
pub const MAX_INLINE_BYTES: u64 = 20 * 1024 * 1024;

/// Lowercased extension of a file name, if any.
pub fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn entry_for(ext: &str) -> Option<&'static (&'static str, &'static str, MediaKind)> {
    ACCEPTED.iter().find(|(e, _, _)| *e == ext)
}

/// Whether the file name carries one of the accepted extensions.
pub fn extension_allowed(name: &str) -> bool {
    extension_of(name)
        .map(|ext| entry_for(&ext).is_some())
        .unwrap_or(false)
}

/// Category of an accepted file name.
pub fn kind_of(name: &str) -> Option<MediaKind> {
    extension_of(name)
        .and_then(|ext| entry_for(&ext))
        .map(|(_, _, kind)| *kind)
}

/// MIME type for a picked file.
///
/// Browsers leave `File.type` empty for plenty of extensions (`.md`
/// among them), so the reported type is only trusted when non-empty
/// and otherwise inferred from the extension.
pub fn media_type_for(name: &str, reported: &str) -> String {
    let reported = reported.trim();
    if !reported.is_empty() {
        return reported.to_string();
    }
    extension_of(name)
        .and_then(|ext| entry_for(&ext))
        .map(|(_, mime, _)| (*mime).to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Validate a pick before it is stored in the form.
pub fn validate_pick(name: &str, size: u64) -> Result<(), AskError> {
    if !extension_allowed(name) {
        return Err(match extension_of(name) {
            Some(ext) => AskError::validation(format!("Unsupported file type: .{}", ext)),
            None => AskError::validation(format!("Unsupported file type: {}", name)),
        });
    }
    if size > MAX_INLINE_BYTES {
        return Err(AskError::validation(format!(
            "File is too large: {:.1} MB (the inline limit is {} MB)",
            size as f64 / (1024.0 * 1024.0),
            MAX_INLINE_BYTES / (1024 * 1024),
        )));
    }
    Ok(())
}

/// `accept` attribute for the file input, built from the same table.
pub fn accept_attr() -> String {
    ACCEPTED
        .iter()
        .map(|(ext, _, _)| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_extension_is_allowed() {
        for (ext, _, _) in ACCEPTED {
            let name = format!("sample.{}", ext);
            assert!(extension_allowed(&name), "rejected {}", name);
            let upper = format!("SAMPLE.{}", ext.to_ascii_uppercase());
            assert!(extension_allowed(&upper), "rejected {}", upper);
        }
    }

    #[test]
    fn test_unknown_extensions_are_rejected() {
        assert!(!extension_allowed("payload.exe"));
        assert!(!extension_allowed("archive.zip"));
        assert!(!extension_allowed("noextension"));
        assert!(!extension_allowed("trailing."));
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(kind_of("report.pdf"), Some(MediaKind::Document));
        assert_eq!(kind_of("photo.JPG"), Some(MediaKind::Image));
        assert_eq!(kind_of("talk.mp3"), Some(MediaKind::Audio));
        assert_eq!(kind_of("clip.webm"), Some(MediaKind::Video));
        assert_eq!(kind_of("binary.bin"), None);
    }

    #[test]
    fn test_media_type_prefers_reported() {
        assert_eq!(media_type_for("photo.png", "image/png"), "image/png");
        // browser reported something odd but non-empty: trust it
        assert_eq!(media_type_for("photo.png", "image/x-png"), "image/x-png");
    }

    #[test]
    fn test_media_type_inferred_when_report_empty() {
        assert_eq!(media_type_for("notes.md", ""), "text/markdown");
        assert_eq!(media_type_for("scan.PDF", "  "), "application/pdf");
        assert_eq!(media_type_for("movie.mov", ""), "video/quicktime");
        // unknown extension falls back to a generic type
        assert_eq!(media_type_for("data.bin", ""), "application/octet-stream");
    }

    #[test]
    fn test_mime_inference_covers_whole_table() {
        for (ext, mime, _) in ACCEPTED {
            let name = format!("file.{}", ext);
            assert_eq!(&media_type_for(&name, ""), mime);
        }
    }

    #[test]
    fn test_validate_pick_size_cap() {
        assert!(validate_pick("clip.mp4", MAX_INLINE_BYTES).is_ok());
        let err = validate_pick("clip.mp4", MAX_INLINE_BYTES + 1).unwrap_err();
        assert!(matches!(err, AskError::Validation(_)));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_validate_pick_extension() {
        assert!(validate_pick("photo.jpeg", 1024).is_ok());
        let err = validate_pick("script.sh", 1024).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .sh");
    }

    #[test]
    fn test_accept_attr_lists_every_extension() {
        let attr = accept_attr();
        let parts: Vec<&str> = attr.split(',').collect();
        assert_eq!(parts.len(), ACCEPTED.len());
        for (ext, _, _) in ACCEPTED {
            assert!(parts.contains(&format!(".{}", ext).as_str()));
        }
    }
}
