#![allow(clippy::needless_for_each)]

use crate::{
    directory::{HttpUserSource, LoadOutcome, Loader, Phase, SharedPage},
    web::handlers::{health, page, status},
};
use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, task::JoinHandle};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug, debug_span, info, Instrument, Span};
use ulid::Ulid;
use utoipa::OpenApi;

pub mod handlers;

#[derive(OpenApi)]
#[openapi(
    paths(health::health, status::status),
    components(
        schemas(health::Health, status::StatusReport, Phase)
    ),
    tags(
        (name = "userdeck", description = "User directory cards"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// State shared by every handler: the page model and the loader that writes it.
#[derive(Clone, Debug)]
pub struct AppState {
    pub loader: Arc<Loader<HttpUserSource>>,
    pub page: SharedPage,
}

impl AppState {
    #[must_use]
    pub fn new(source: HttpUserSource) -> Self {
        Self {
            loader: Arc::new(Loader::new(source)),
            page: SharedPage::new(),
        }
    }

    /// Start a load in the background. Overlapping loads resolve to
    /// [`LoadOutcome::Skipped`].
    pub fn spawn_load(&self) -> JoinHandle<LoadOutcome> {
        let loader = self.loader.clone();
        let page = self.page.clone();

        tokio::spawn(
            async move {
                let outcome = loader.load(&page.surface()).await;
                debug!("load finished: {:?}", outcome);
                outcome
            }
            .in_current_span(),
        )
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        // allow `GET` when accessing the resource
        .allow_methods([Method::GET])
        // allow requests from any origin
        .allow_origin(Any);

    Router::new()
        .route("/", get(page::index))
        .route("/refresh", post(page::refresh))
        .route("/api/status", get(status::status))
        .route("/health", get(health::health))
        .route("/openapi.json", get(|| async { Json(openapi()) }))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors),
        )
        .layer(Extension(state))
}

/// Serve the directory page, loading the user list once at startup.
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn new(port: u16, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    // Initial load, the equivalent of the page becoming ready.
    let _initial = state.spawn_load();

    let app = router(state);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Gracefully shutdown");
            }
        })
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let method = request.method();
    let path = request.uri().path();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", %method, path, request_id)
}
