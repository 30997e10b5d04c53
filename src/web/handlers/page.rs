//! The directory page itself and its fetch button.

use crate::web::AppState;
use axum::{
    extract::Extension,
    response::{Html, IntoResponse, Redirect},
};
use tracing::{debug, instrument};

/// Render the current page state.
#[instrument(skip(state))]
pub async fn index(state: Extension<AppState>) -> impl IntoResponse {
    Html(state.page.read().to_html())
}

/// Button click: start a load and send the browser back to the page, which
/// shows the loading state until the load settles.
#[instrument(skip(state))]
pub async fn refresh(state: Extension<AppState>) -> impl IntoResponse {
    if state.loader.is_busy() {
        debug!("refresh requested while a load is in flight");
    }

    let _load = state.spawn_load();

    Redirect::to("/")
}
