//! HTTP preview of the pages: each route builds a fresh page against the
//! backend, runs its ready pipeline and serves the resulting document.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::client::MisterClient;
use crate::config::AppConfig;
use crate::controller::SharedDocument;
use crate::error::MisterError;
use crate::i18n::{detect_from_accept_language, detect_language_or};
use crate::page::{LegacyScoresPage, MisterPage, PortfolioPage, ScoresPage};

#[derive(Clone)]
pub struct AppState {
    pub client: MisterClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, MisterError> {
        Ok(Self {
            client: MisterClient::new(&config)?,
            config: Arc::new(config),
        })
    }
}

#[derive(Debug, Deserialize)]
struct JornadaQuery {
    jornada: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mister", get(mister_handler))
        .route("/scores", get(scores_handler))
        .route("/puntos", get(legacy_handler))
        .route("/portfolio", get(portfolio_handler))
        .route("/update", post(update_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

fn error_response(e: MisterError) -> Response {
    let status = match &e {
        MisterError::ApiError { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        MisterError::Http(_) | MisterError::Json(_) => StatusCode::BAD_GATEWAY,
        MisterError::MalformedDebtRow { .. } | MisterError::InconsistentDebtRow { .. } => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("render failed: {}", e);
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

async fn render(doc: SharedDocument) -> Response {
    let html = doc.read().await.to_html();
    Html(html).into_response()
}

async fn mister_handler(
    State(state): State<AppState>,
    Query(params): Query<JornadaQuery>,
) -> impl IntoResponse {
    let page = MisterPage::new(state.client.clone());
    if let Err(e) = page.load(params.jornada.as_deref()).await {
        return error_response(e);
    }
    render(page.document()).await
}

async fn scores_handler(
    State(state): State<AppState>,
    Query(params): Query<JornadaQuery>,
) -> impl IntoResponse {
    let page = ScoresPage::new(state.client.clone());
    if let Err(e) = page.controller().ready_at(params.jornada.as_deref()).await {
        return error_response(e);
    }
    render(page.document()).await
}

async fn legacy_handler(
    State(state): State<AppState>,
    Query(params): Query<JornadaQuery>,
) -> impl IntoResponse {
    let jornadas = match state.client.jornadas().await {
        Ok(j) => j,
        Err(e) => return error_response(e),
    };
    let page = LegacyScoresPage::new(state.client.clone(), &jornadas);
    if let Err(e) = page.controller().ready_at(params.jornada.as_deref()).await {
        return error_response(e);
    }
    render(page.document()).await
}

/// `?lang=` wins over `Accept-Language`; either is reduced to a bundle code
/// before anything is fetched.
async fn portfolio_handler(
    State(state): State<AppState>,
    Query(params): Query<LangQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let fallback = state.config.fallback_language.as_str();
    let lang = match params.lang {
        Some(locale) => detect_language_or(&locale, fallback),
        None => headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(|v| detect_from_accept_language(v, fallback))
            .unwrap_or_else(|| fallback.to_string()),
    };

    let bundle = match state.client.translations(&lang).await {
        Ok(bundle) => bundle,
        Err(e) => return error_response(e),
    };
    let keys = if state.config.portfolio_keys.is_empty() {
        let mut keys: Vec<String> = bundle.keys().map(str::to_string).collect();
        keys.sort();
        keys
    } else {
        state.config.portfolio_keys.clone()
    };

    let doc = Arc::new(RwLock::new(PortfolioPage::skeleton(keys.as_slice())));
    let page = PortfolioPage::new(state.client.clone(), doc, lang.as_str()).with_fallback(fallback);
    let report = page.show(&bundle).await;
    info!(%lang, applied = report.applied, "portfolio rendered");
    render(page.document()).await
}

async fn update_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.client.mister_update().await {
        Ok(resp) => (StatusCode::OK, Json(json!(resp))).into_response(),
        Err(e) => error_response(e),
    }
}
