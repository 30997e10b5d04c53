use anyhow::{ensure, Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header::LOCATION, Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;
use userdeck::{
    directory::{render::ERROR_NOTICE, HttpUserSource, LoadOutcome},
    web::{router, AppState},
};

const USERS: &str = r#"[
  {"id":1,"name":"Leanne Graham","email":"Sincere@april.biz","address":{"city":"Gwenborough"}},
  {"id":2,"name":"Ervin Howell","email":"Shanna@melissa.tv","address":{"city":"Wisokyburgh"}},
  {"id":3,"name":"<b>Clementine</b> & Bauch","email":"Nathan@yesenia.net"}
]"#;

async fn spawn_upstream(app: Router) -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service()).await;
    });
    Ok(Url::parse(&format!("http://{addr}/users"))?)
}

async fn state_for(app: Router) -> Result<AppState> {
    let url = spawn_upstream(app).await?;
    Ok(AppState::new(HttpUserSource::new(url, Duration::from_secs(5))?))
}

async fn body_text(response: axum::response::Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

async fn get_status(app: &Router) -> Result<Value> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/status").body(Body::empty())?)
        .await?;
    ensure!(response.status() == StatusCode::OK, "status endpoint failed");
    Ok(serde_json::from_str(&body_text(response).await?)?)
}

async fn wait_until_settled(app: &Router) -> Result<Value> {
    for _ in 0..200 {
        let status = get_status(app).await?;
        let phase = status["phase"].as_str().unwrap_or_default();
        if status["busy"] == Value::Bool(false) && (phase == "success" || phase == "error") {
            return Ok(status);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    anyhow::bail!("load did not settle")
}

#[tokio::test]
async fn refresh_renders_every_user_in_order() -> Result<()> {
    let state = state_for(Router::new().route("/users", get(|| async { USERS }))).await?;
    let app = router(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/refresh")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/")
    );
    assert!(response.headers().contains_key("x-request-id"));

    let status = wait_until_settled(&app).await?;
    assert_eq!(status["phase"], "success");
    assert_eq!(status["cards"], 3);
    assert_eq!(status["message"], "✓ Successfully loaded 3 users.");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;

    assert_eq!(html.matches(r#"class="user-card""#).count(), 3);
    let leanne = html.find("Leanne Graham").context("first card missing")?;
    let ervin = html.find("Ervin Howell").context("second card missing")?;
    assert!(leanne < ervin);
    assert!(html.contains("&lt;b&gt;Clementine&lt;/b&gt; &amp; Bauch"));
    assert!(!html.contains("<b>Clementine</b>"));
    assert!(html.contains("Unknown City"));
    assert!(html.contains(r#"<button id="fetch-btn" type="submit">"#));
    Ok(())
}

#[tokio::test]
async fn upstream_404_shows_error_notice() -> Result<()> {
    let state = state_for(Router::new()).await?;

    let outcome = state.spawn_load().await?;
    let LoadOutcome::Failed(err) = outcome else {
        anyhow::bail!("expected failure, got {outcome:?}");
    };
    assert!(err.to_string().contains("404"));

    let app = router(state);
    let status = get_status(&app).await?;
    assert_eq!(status["phase"], "error");
    assert_eq!(status["cards"], 0);
    assert!(status["message"]
        .as_str()
        .is_some_and(|message| message.contains("404")));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    let html = body_text(response).await?;
    assert!(html.contains(ERROR_NOTICE));
    assert!(html.contains(r#"class="status status--error""#));
    Ok(())
}

#[tokio::test]
async fn empty_payload_reports_no_data() -> Result<()> {
    let state = state_for(Router::new().route("/users", get(|| async { "[]" }))).await?;

    let outcome = state.spawn_load().await?;
    assert!(matches!(outcome, LoadOutcome::Failed(_)));

    let page = state.page.read();
    assert_eq!(page.card_count(), 0);
    assert_eq!(page.grid(), ERROR_NOTICE);
    assert!(page
        .status()
        .is_some_and(|status| status.message.contains("No user data")));
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> Result<()> {
    let state = state_for(Router::new()).await?;
    let app = router(state);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-App"));
    let health: Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(health["name"], "userdeck");

    let response = app
        .oneshot(Request::builder().uri("/openapi.json").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let doc: Value = serde_json::from_str(&body_text(response).await?)?;
    assert!(doc["paths"]["/api/status"].is_object());
    assert!(doc["paths"]["/health"].is_object());
    Ok(())
}
