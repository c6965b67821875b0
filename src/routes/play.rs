use axum::{
    extract::{Query, State},
    http::StatusCode,
    Form,
};
use serde::{Deserialize, Serialize};

use crate::{
    cast::{svtplay::svtplay_url, youtube_watch_url},
    error::{Error, Result},
    library::{
        pointer::{SVTPLAY, YOUTUBE},
        VideoRecord,
    },
    AppState,
};

const SVTPLAY_TYPE: &str = "svtplay";

/// Parameters of a play request (query string or form body)
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl PlayParams {
    /// Parameters that play `video`, or `None` when there is nothing to cast.
    /// An override URL wins over the pointer.
    pub fn for_video(video: &VideoRecord) -> Option<Self> {
        if !video.url.is_empty() {
            return Some(Self {
                url: Some(video.url.clone()),
                ..Self::default()
            });
        }

        if video.video_id.is_empty() {
            return None;
        }

        match video.platform.as_str() {
            YOUTUBE => Some(Self {
                id: Some(video.video_id.clone()),
                ..Self::default()
            }),
            SVTPLAY => Some(Self {
                url: Some(svtplay_url(&video.video_id)),
                kind: Some(SVTPLAY_TYPE.to_string()),
                ..Self::default()
            }),
            _ => None,
        }
    }

    /// Fill fields left blank here from `fallback`
    pub fn or(self, fallback: Self) -> Self {
        Self {
            id: non_blank(self.id).or(non_blank(fallback.id)),
            url: non_blank(self.url).or(non_blank(fallback.url)),
            kind: non_blank(self.kind).or(non_blank(fallback.kind)),
        }
    }
}

/// Browser URL for a video, when one can be derived
pub fn watch_url(video: &VideoRecord) -> Option<String> {
    if !video.url.is_empty() {
        return Some(video.url.clone());
    }
    if video.video_id.is_empty() {
        return None;
    }
    match video.platform.as_str() {
        YOUTUBE => Some(youtube_watch_url(&video.video_id)),
        SVTPLAY => Some(svtplay_url(&video.video_id)),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET|POST /play - cast a video or forward an SVT Play URL.
/// Form body values win; the query string fills whatever the body leaves out.
pub async fn play(
    State(state): State<AppState>,
    Query(query): Query<PlayParams>,
    body: Option<Form<PlayParams>>,
) -> Result<StatusCode> {
    let params = match body {
        Some(Form(body)) => body.or(query),
        None => query.or(PlayParams::default()),
    };
    let url = params.url;

    if params.kind.as_deref() == Some(SVTPLAY_TYPE) {
        let url = url.ok_or_else(|| Error::BadRequest("missing url".to_string()))?;
        let forwarder = state
            .svtplay
            .as_ref()
            .ok_or_else(|| Error::BadRequest("svtplay endpoint not configured".to_string()))?;

        forwarder.forward(&url).await?;
        return Ok(StatusCode::NO_CONTENT);
    }

    let url = match (url, params.id) {
        (Some(url), _) => url,
        (None, Some(id)) => youtube_watch_url(&id),
        (None, None) => return Err(Error::BadRequest("missing id or url".to_string())),
    };

    let device = match state.storage.ytcast_code().await {
        Some(code) => code,
        None => state
            .config
            .ytcast_device
            .clone()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| Error::BadRequest("no ytcast device configured".to_string()))?,
    };

    state
        .caster
        .cast(&device, &url)
        .await
        .map_err(|_| Error::Internal("failed to cast".to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}
