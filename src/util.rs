/// Utility functions shared across the codebase
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::Error;

/// Image extensions served straight from the library tree
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Characters escaped inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// MIME type for an image path, by extension (case-insensitive)
pub fn image_mime(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }

    Some(match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "image/webp",
    })
}

/// Percent-encode every segment of a `/`-separated relative path,
/// dropping empty segments. Returns the encoded path without a leading slash.
pub fn encode_path(rel: &str) -> String {
    rel.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| utf8_percent_encode(s, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// URL of a browsable directory (always with a trailing slash)
pub fn dir_href(rel: &str) -> String {
    let encoded = encode_path(rel);
    if encoded.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", encoded)
    }
}

/// Resolve a thumbnail reference from a metadata file.
/// Remote URLs are returned untouched; anything else is a file path relative
/// to the directory being listed (or to the root, when it starts with `/`).
pub fn thumb_href(dir: &str, thumb: &str) -> String {
    let thumb = thumb.trim();
    if thumb.is_empty() {
        return String::new();
    }

    let lowered = thumb.to_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") || thumb.starts_with("//")
    {
        return thumb.to_string();
    }

    let rel = match thumb.strip_prefix('/') {
        Some(from_root) => from_root.to_string(),
        None if dir.is_empty() => thumb.to_string(),
        None => format!("{}/{}", dir, thumb),
    };

    format!("/{}", encode_path(&rel))
}

/// Helper function to convert template render errors to Error::Internal
pub fn render_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Internal(format!("Template render error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("a/b/pic.PNG"), Some("image/png"));
        assert_eq!(image_mime("test.jpg"), Some("image/jpeg"));
        assert_eq!(image_mime("x.JPEG"), Some("image/jpeg"));
        assert_eq!(image_mime("x.webp"), Some("image/webp"));
        assert_eq!(image_mime("x.nfo"), None);
        assert_eq!(image_mime("jpg"), None);
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("HN/a#b.jpg"), "HN/a%23b.jpg");
        assert_eq!(encode_path("/My Shows//50%/"), "My%20Shows/50%25");
        assert_eq!(encode_path("Åäö"), "%C3%85%C3%A4%C3%B6");
    }

    #[test]
    fn test_dir_href() {
        assert_eq!(dir_href(""), "/");
        assert_eq!(dir_href("HN"), "/HN/");
        assert_eq!(dir_href("a b/c?"), "/a%20b/c%3F/");
    }

    #[test]
    fn test_thumb_href() {
        assert_eq!(thumb_href("HN", "a#b.jpg"), "/HN/a%23b.jpg");
        assert_eq!(thumb_href("", "cover.jpg"), "/cover.jpg");
        assert_eq!(thumb_href("HN", "/art/cover.jpg"), "/art/cover.jpg");
        assert_eq!(
            thumb_href("HN", "https://i3.ytimg.com/vi/x/hqdefault.jpg"),
            "https://i3.ytimg.com/vi/x/hqdefault.jpg"
        );
        assert_eq!(thumb_href("HN", "  "), "");
    }
}
