use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    library::{page::parse_page_number, Entry, Page, VideoRecord},
    routes::listing_error,
    AppState,
};

/// Query parameters for the listing API
#[derive(Debug, Deserialize)]
pub struct ListingParams {
    pub path: Option<String>,
    pub page: Option<String>,
}

/// Response body of GET /api/listing
#[derive(Debug, Serialize)]
struct ListingResponse<'a> {
    path: &'a str,
    parent_path: &'a str,
    dirs: &'a [String],
    page: Page,
    entries: &'a [Entry],
    videos: &'a [VideoRecord],
}

/// API route: GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// API route: GET /api/listing?path=<relative dir>&page=N
/// Returns one page of the freshness-ordered entries plus the full title-sorted video list
pub async fn get_listing(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<impl IntoResponse> {
    let rel = params.path.unwrap_or_default();
    let listing = state.library.listing(&rel).await.map_err(listing_error)?;
    let page = Page::new(
        listing.entries.len(),
        parse_page_number(params.page.as_deref()),
    );

    let body = serde_json::to_value(ListingResponse {
        path: &listing.path,
        parent_path: &listing.parent_path,
        dirs: &listing.dirs,
        page,
        entries: page.slice(&listing.entries),
        videos: &listing.videos,
    })?;

    Ok(Json(body))
}
