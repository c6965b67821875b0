//! Kodi-style `.nfo` metadata documents.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};

/// Fields extracted from a metadata document, trimmed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub plot: String,
    pub thumb: String,
    pub tags: Vec<String>,
}

/// Root element of the document. The element name itself (`movie`,
/// `episodedetails`, ...) is not checked; unknown children are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    #[serde(rename = "title")]
    titles: Vec<String>,
    #[serde(rename = "plot")]
    plots: Vec<String>,
    #[serde(rename = "thumb")]
    thumbs: Vec<Thumb>,
    #[serde(rename = "tag")]
    tags: Vec<String>,
}

/// `<thumb aspect="poster">url</thumb>`: only the text matters
#[derive(Debug, Default, Deserialize)]
struct Thumb {
    #[serde(rename = "$text", default)]
    url: String,
}

/// Read and parse a metadata file
pub fn read_metadata(path: &Path) -> Result<Metadata> {
    let content = std::fs::read_to_string(path)?;
    parse_metadata(&content)
}

/// Parse a metadata document
pub fn parse_metadata(content: &str) -> Result<Metadata> {
    let doc: Document = quick_xml::de::from_str(content)
        .map_err(|e| Error::Metadata(format!("invalid metadata document: {}", e)))?;

    let thumb = first_non_blank(doc.thumbs.iter().map(|t| t.url.as_str()));

    let mut tags: Vec<String> = Vec::with_capacity(doc.tags.len());
    for tag in doc.tags {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    Ok(Metadata {
        title: last_non_blank(&doc.titles),
        plot: last_non_blank(&doc.plots),
        thumb,
        tags,
    })
}

fn first_non_blank<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// A repeated scalar element: the last one with content wins
fn last_non_blank(values: &[String]) -> String {
    first_non_blank(values.iter().rev().map(String::as_str))
}
