//! Pointer (`.strm`) and override (`.url`) file readers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A streaming platform recognized in pointer files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Short tag stored on the video record
    pub kind: &'static str,
    /// Lower-case scheme prefix the pointer line must start with
    pub prefix: &'static str,
    /// Query parameter holding the platform id
    pub param: &'static str,
}

pub const YOUTUBE: &str = "youtube";
pub const SVTPLAY: &str = "svtplay";

/// Recognized pointer prefixes. New platforms are added here.
pub const PLATFORMS: &[Platform] = &[
    Platform {
        kind: YOUTUBE,
        prefix: "plugin://plugin.video.youtube",
        param: "video_id",
    },
    Platform {
        kind: SVTPLAY,
        prefix: "plugin://plugin.video.svtplay",
        param: "id",
    },
];

/// Platform and id extracted from a pointer line.
/// Both are empty when the prefix is not recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerTarget {
    pub platform: String,
    pub id: String,
}

/// Read a pointer file and resolve its first non-blank line
pub fn read_pointer(path: &Path) -> std::io::Result<PointerTarget> {
    let line = first_non_blank_line(path)?;
    Ok(resolve_pointer(&line))
}

/// Read an override file: first non-blank line, trimmed. An empty file yields "".
pub fn read_override(path: &Path) -> std::io::Result<String> {
    first_non_blank_line(path)
}

/// Match a pointer line against [`PLATFORMS`] and pull the id out of its query string
pub fn resolve_pointer(line: &str) -> PointerTarget {
    let lowered = line.to_lowercase();
    let Some(platform) = PLATFORMS.iter().find(|p| lowered.starts_with(p.prefix)) else {
        return PointerTarget::default();
    };

    let query = match line.split_once('?') {
        Some((_, query)) => query,
        None => line,
    };

    let id = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == platform.param)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    PointerTarget {
        platform: platform.kind.to_string(),
        id,
    }
}

fn first_non_blank_line(path: &Path) -> std::io::Result<String> {
    let reader = BufReader::new(File::open(path)?);

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_youtube_pointer() {
        let target = resolve_pointer("plugin://plugin.video.youtube/play/?video_id=zbKjqHqy2no");
        assert_eq!(target.platform, YOUTUBE);
        assert_eq!(target.id, "zbKjqHqy2no");
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let target = resolve_pointer("PLUGIN://Plugin.Video.YouTube/play/?foo=1&video_id=abc");
        assert_eq!(target.platform, YOUTUBE);
        assert_eq!(target.id, "abc");
    }

    #[test]
    fn test_svtplay_pointer_decodes_id() {
        let target =
            resolve_pointer("plugin://plugin.video.svtplay/?id=%2Fvideo%2Fabc&mode=video");
        assert_eq!(target.platform, SVTPLAY);
        assert_eq!(target.id, "/video/abc");
    }

    #[test]
    fn test_line_without_query_is_parsed_whole() {
        let target = resolve_pointer("plugin://plugin.video.youtube/video_id=xyz");
        assert_eq!(target.platform, YOUTUBE);
        assert_eq!(target.id, "");

        let target = resolve_pointer("plugin://plugin.video.youtube&video_id=xyz");
        assert_eq!(target.id, "xyz");
    }

    #[test]
    fn test_unknown_prefix() {
        assert_eq!(
            resolve_pointer("https://example.com/watch?video_id=1"),
            PointerTarget::default()
        );
    }

    #[test]
    fn test_read_pointer_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x.strm");
        fs::write(&path, "\n  \nplugin://plugin.video.youtube/play/?video_id=zbKjqHqy2no\n").unwrap();

        let target = read_pointer(&path).unwrap();
        assert_eq!(target.id, "zbKjqHqy2no");
    }

    #[test]
    fn test_read_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x.url");
        fs::write(&path, "  https://youtu.be/abc123  \nsecond line\n").unwrap();
        assert_eq!(read_override(&path).unwrap(), "https://youtu.be/abc123");

        fs::write(&path, "\n\n").unwrap();
        assert_eq!(read_override(&path).unwrap(), "");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_override(&temp_dir.path().join("nope.url")).is_err());
        assert!(read_pointer(&temp_dir.path().join("nope.strm")).is_err());
    }
}
