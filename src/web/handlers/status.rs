use crate::{directory::Phase, web::AppState};
use axum::{extract::Extension, response::Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub phase: Phase,
    pub message: Option<String>,
    pub busy: bool,
    pub cards: usize,
}

#[utoipa::path(
    get,
    path= "/api/status",
    responses (
        (status = 200, description = "Current state of the directory page", body = StatusReport),
    ),
    tag = "userdeck",
)]
/// Report the current status line, whether a load is running, and how many
/// cards are on the page.
#[instrument(skip(state))]
pub async fn status(state: Extension<AppState>) -> Json<StatusReport> {
    let page = state.page.read();

    Json(StatusReport {
        phase: page.phase(),
        message: page.status().map(|status| status.message.clone()),
        busy: state.loader.is_busy(),
        cards: page.card_count(),
    })
}
