pub mod entry;
pub mod freshness;
pub mod guard;
pub mod metadata;
pub mod page;
pub mod pointer;
pub mod sidecar;

// Listing engine
mod manager;

use chrono::{DateTime, Utc};

pub use entry::{Entry, Listing, VideoRecord};
pub use manager::Library;
pub use page::Page;

/// Trait for types that can be ordered by freshness
pub trait Sortable {
    /// Display name, compared case-insensitively to break timestamp ties
    fn sort_name(&self) -> &str;

    /// Timestamp, newest first
    fn sort_mtime(&self) -> DateTime<Utc>;
}

/// Sort newest first; equal timestamps by case-insensitive name.
/// The sort is stable, so full ties keep their relative order.
pub fn sort_by_freshness<T: Sortable>(items: &mut [T]) {
    items.sort_by(|a, b| {
        b.sort_mtime().cmp(&a.sort_mtime()).then_with(|| {
            a.sort_name()
                .to_lowercase()
                .cmp(&b.sort_name().to_lowercase())
        })
    });
}

/// Sort videos by case-insensitive title. Blank titles go last;
/// equal titles are ordered by base name.
pub fn sort_by_title(videos: &mut [VideoRecord]) {
    videos.sort_by_cached_key(|v| (v.title.is_empty(), v.title.to_lowercase(), v.name.clone()));
}
