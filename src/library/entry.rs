use chrono::{DateTime, Utc};
use serde::Serialize;

use super::metadata::Metadata;
use super::pointer::PointerTarget;

/// A playable item: one qualifying sidecar pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    /// Base file name (extension stripped)
    pub name: String,

    /// Platform tag from the pointer file ("" when an override URL is used)
    pub platform: String,

    /// Platform-native id from the pointer file
    pub video_id: String,

    /// Literal URL from the override file
    pub url: String,

    pub title: String,
    pub plot: String,

    /// Thumbnail path or URL as written in the metadata file
    pub thumb: String,

    pub tags: Vec<String>,
}

impl VideoRecord {
    /// Build a record from a resolved override URL and metadata
    pub fn from_override(name: &str, url: String, meta: Metadata) -> Self {
        Self::new(name, PointerTarget::default(), url, meta)
    }

    /// Build a record from a resolved pointer and metadata
    pub fn from_pointer(name: &str, target: PointerTarget, meta: Metadata) -> Self {
        Self::new(name, target, String::new(), meta)
    }

    fn new(name: &str, target: PointerTarget, url: String, meta: Metadata) -> Self {
        Self {
            name: name.to_string(),
            platform: target.platform,
            video_id: target.id,
            url,
            title: meta.title,
            plot: meta.plot,
            thumb: meta.thumb,
            tags: meta.tags,
        }
    }

    /// Title when it has content, otherwise the base name
    pub fn display_name(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// One row of the merged, freshness-ordered view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Dir {
        name: String,
        /// Relative path from the library root, `/`-separated
        path: String,
        modified: DateTime<Utc>,
    },
    Video {
        name: String,
        modified: DateTime<Utc>,
        video: VideoRecord,
    },
}

impl Entry {
    pub fn dir(name: &str, path: String, modified: DateTime<Utc>) -> Self {
        Entry::Dir {
            name: name.to_string(),
            path,
            modified,
        }
    }

    pub fn video(video: VideoRecord, modified: DateTime<Utc>) -> Self {
        Entry::Video {
            name: video.display_name().to_string(),
            modified,
            video,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Dir { name, .. } | Entry::Video { name, .. } => name,
        }
    }

    pub fn modified(&self) -> DateTime<Utc> {
        match self {
            Entry::Dir { modified, .. } | Entry::Video { modified, .. } => *modified,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Dir { .. })
    }
}

impl super::Sortable for Entry {
    fn sort_name(&self) -> &str {
        self.name()
    }

    fn sort_mtime(&self) -> DateTime<Utc> {
        self.modified()
    }
}

/// Contents of one directory, ready for presentation
#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing {
    /// Relative path of the scanned directory ("" at root)
    pub path: String,

    /// Relative path of its parent ("" at root)
    pub parent_path: String,

    /// Subdirectory names, sorted
    pub dirs: Vec<String>,

    /// Videos sorted by title
    pub videos: Vec<VideoRecord>,

    /// Subdirectories and videos sorted by freshness
    pub entries: Vec<Entry>,
}
