use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    cast::is_pairing_code,
    error::{Error, Result},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CodeParams {
    pub code: Option<String>,
}

impl CodeParams {
    /// The trimmed pairing code, rejected unless it is exactly 12 digits
    fn pairing_code(&self) -> Result<String> {
        let code = self.code.as_deref().map(str::trim).unwrap_or_default();
        if code.is_empty() {
            return Err(Error::BadRequest("missing code".to_string()));
        }
        if !is_pairing_code(code) {
            return Err(Error::BadRequest("code must be 12 digits".to_string()));
        }
        Ok(code.to_string())
    }
}

/// GET /ytcast/list - devices known to ytcast
pub async fn ytcast_list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let devices = state.caster.list_devices().await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], devices))
}

/// GET /ytcast/pair?code= - pair with a TV, then remember its code
pub async fn ytcast_pair(
    State(state): State<AppState>,
    Query(params): Query<CodeParams>,
) -> Result<StatusCode> {
    let code = params.pairing_code()?;
    state.caster.pair(&code).await?;
    state.storage.set_ytcast_code(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /ytcast/set-code?code= - remember a code without pairing
pub async fn ytcast_set_code(
    State(state): State<AppState>,
    Query(params): Query<CodeParams>,
) -> Result<StatusCode> {
    let code = params.pairing_code()?;
    state.storage.set_ytcast_code(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
