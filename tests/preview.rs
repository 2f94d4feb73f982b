mod common;

use common::{MockBackend, MockState};
use mister_web::config::AppConfig;
use mister_web::preview::{self, AppState};
use reqwest::StatusCode;

/// Serves the preview router on an ephemeral port and returns its address.
async fn serve_preview(backend: &MockBackend) -> String {
    let state = AppState::new(AppConfig::with_base_url(backend.base_url.as_str())).unwrap();
    let app = preview::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn mister_renders_leaderboard_when_debts_fail() {
    let mut state = MockState::sample();
    state.debts_status = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
    let backend = MockBackend::start(state).await;
    let preview = serve_preview(&backend).await;

    let resp = reqwest::get(format!("{}/mister", preview)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Elena"));
    assert_eq!(backend.state.count("deudas"), 1);
}

#[tokio::test]
async fn mister_errors_when_nothing_renders() {
    let mut state = MockState::sample();
    state.debts_status = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
    let backend = MockBackend::start(state).await;
    let preview = serve_preview(&backend).await;

    let resp = reqwest::get(format!("{}/mister?jornada=9", preview)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn portfolio_query_locale_is_normalised() {
    let backend = MockBackend::start(MockState::sample()).await;
    let preview = serve_preview(&backend).await;

    let resp = reqwest::get(format!("{}/portfolio?lang=en-US", preview)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Hello"));
    assert!(body.contains("About me"));
    assert_eq!(backend.state.hits(), vec!["lang=en"]);
}

#[tokio::test]
async fn portfolio_uses_accept_language_without_query() {
    let backend = MockBackend::start(MockState::sample()).await;
    let preview = serve_preview(&backend).await;

    let resp = reqwest::Client::new()
        .get(format!("{}/portfolio", preview))
        .header("Accept-Language", "en-GB,en;q=0.9")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Hello"));
    assert_eq!(backend.state.hits(), vec!["lang=en"]);
}

#[tokio::test]
async fn portfolio_unusable_locale_falls_back() {
    let backend = MockBackend::start(MockState::sample()).await;
    let preview = serve_preview(&backend).await;

    let resp = reqwest::get(format!("{}/portfolio?lang=12", preview)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Hola"));
    assert_eq!(backend.state.hits(), vec!["lang=es"]);
}
