use super::AppState;
use crate::core::{ErrorRecord, Lookup, USER_NOT_FOUND};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Json,
};

const LANDING_PAGE: &str = include_str!("../../templates/index.html");

/// `GET /`
pub async fn home() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// `GET /{username}`
///
/// Always 200: the merged profile as JSON, the bare not-found text when the
/// user does not exist upstream, or an [`ErrorRecord`] when aggregation fails.
pub async fn user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    match state.aggregator.get_user_profile(&username).await {
        Ok(Lookup::Found(profile)) => Json(profile).into_response(),
        Ok(Lookup::NotFound) => USER_NOT_FOUND.into_response(),
        Err(e) => {
            tracing::warn!("Failed to aggregate profile for {}: {}", username, e);
            Json(ErrorRecord::from(&e)).into_response()
        }
    }
}
