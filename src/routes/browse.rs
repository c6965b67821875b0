use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    library::{page::parse_page_number, Entry, Listing, Page},
    routes::{
        listing_error,
        play::{watch_url, PlayParams},
    },
    util::{dir_href, image_mime, render_error, thumb_href},
    AppState,
};

/// Query parameters for the listing page
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub page: Option<String>,
}

/// One row of the listing page
struct EntryView {
    is_dir: bool,
    name: String,
    href: String,
    modified: String,
    thumb: String,
    tags: String,
    plot: String,
    play_vals: String,
    watch_url: String,
}

impl EntryView {
    fn new(entry: &Entry, dir: &str) -> Result<Self> {
        let modified = entry.modified().format("%Y-%m-%d %H:%M").to_string();

        Ok(match entry {
            Entry::Dir { name, path, .. } => Self {
                is_dir: true,
                name: name.clone(),
                href: dir_href(path),
                modified,
                thumb: String::new(),
                tags: String::new(),
                plot: String::new(),
                play_vals: String::new(),
                watch_url: String::new(),
            },
            Entry::Video { name, video, .. } => Self {
                is_dir: false,
                name: name.clone(),
                href: String::new(),
                modified,
                thumb: thumb_href(dir, &video.thumb),
                tags: video.tags.join(", "),
                plot: video.plot.clone(),
                play_vals: PlayParams::for_video(video)
                    .map(|p| serde_json::to_string(&p))
                    .transpose()?
                    .unwrap_or_default(),
                watch_url: watch_url(video).unwrap_or_default(),
            },
        })
    }
}

/// Listing page template
#[derive(Template)]
#[template(path = "browse.html")]
struct BrowseTemplate {
    path: String,
    parent_href: String,
    is_root: bool,
    has_prev: bool,
    has_next: bool,
    prev_href: String,
    next_href: String,
    entries: Vec<EntryView>,
}

impl BrowseTemplate {
    fn new(listing: &Listing, page: Page) -> Result<Self> {
        let href = dir_href(&listing.path);
        let entries = page
            .slice(&listing.entries)
            .iter()
            .map(|entry| EntryView::new(entry, &listing.path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: listing.path.clone(),
            parent_href: dir_href(&listing.parent_path),
            is_root: listing.path.is_empty(),
            has_prev: page.has_prev,
            has_next: page.has_next,
            prev_href: format!("{}?page={}", href, page.number.saturating_sub(1).max(1)),
            next_href: format!("{}?page={}", href, page.number + 1),
            entries,
        })
    }
}

/// Main route: GET /
pub async fn browse_root(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Response> {
    render_listing(&state, "", &params).await
}

/// Main route: GET /*path
/// Serves images, redirects bare directory paths and renders directory listings
pub async fn browse_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<BrowseParams>,
    uri: Uri,
) -> Result<Response> {
    if let Some(mime) = image_mime(&path) {
        return serve_image(&state, &path, mime).await;
    }

    if uri.path().ends_with('/') {
        return render_listing(&state, &path, &params).await;
    }

    let (_, target) = state.library.resolve(&path)?;
    let is_dir = tokio::fs::metadata(&target)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(Error::NotFound("unable to read path".to_string()));
    }

    let location = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

async fn render_listing(state: &AppState, rel: &str, params: &BrowseParams) -> Result<Response> {
    let listing = state.library.listing(rel).await.map_err(listing_error)?;
    let page = Page::new(
        listing.entries.len(),
        parse_page_number(params.page.as_deref()),
    );

    let template = BrowseTemplate::new(&listing, page)?;
    Ok(Html(template.render().map_err(render_error)?).into_response())
}

async fn serve_image(state: &AppState, rel: &str, mime: &'static str) -> Result<Response> {
    let (_, target) = state.library.resolve(rel)?;

    let data = tokio::fs::read(&target).await.map_err(|e| {
        tracing::debug!("Image {} unavailable: {}", target.display(), e);
        Error::NotFound(format!("image not found: {}", rel))
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, "public, max-age=60"),
        ],
        data,
    )
        .into_response())
}
