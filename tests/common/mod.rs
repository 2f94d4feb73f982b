//! In-process stand-in for the Mister backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Notify;

use mister_web::MisterClient;

pub struct MockState {
    pub jornadas: Vec<String>,
    pub leaderboards: HashMap<String, Value>,
    pub delays: HashMap<String, Duration>,
    pub debts: Value,
    pub debts_status: StatusCode,
    pub puntos: HashMap<String, Value>,
    pub bundles: HashMap<String, Value>,
    pub update_status: StatusCode,
    /// When set, `/api/misterupdate` waits on `update_release` before answering.
    pub hold_update: bool,
    pub update_received: Notify,
    pub update_release: Notify,
    hits: Mutex<Vec<String>>,
}

impl MockState {
    pub fn sample() -> Self {
        let board = |names: &[(&str, i64, f64)]| -> Value {
            Value::Array(
                names
                    .iter()
                    .map(|(name, points, debt)| {
                        json!({
                            "image": format!("/img/{}.png", name),
                            "name": name,
                            "username": name.to_lowercase(),
                            "points": points,
                            "debt": debt,
                        })
                    })
                    .collect(),
            )
        };

        let leaderboards = HashMap::from([
            ("0".to_string(), board(&[("Ana", 10, 0.0), ("Bruno", 8, 2.4)])),
            ("1".to_string(), board(&[("Carla", 21, 3.6), ("Dani", 15, 0.0)])),
            ("2".to_string(), board(&[("Elena", 30, 0.0), ("Fede", 28, 1.5)])),
        ]);

        let puntos = HashMap::from([
            (
                "0".to_string(),
                json!([{"nombre": "Jugador 2", "puntos": 12}, {"nombre": "Jugador 1", "puntos": 10}]),
            ),
            (
                "1".to_string(),
                json!([{"nombre": "Jugador 3", "puntos": 14}]),
            ),
        ]);

        let bundles = HashMap::from([
            ("es".to_string(), json!({"title": "Hola", "about": "Sobre mí"})),
            ("en".to_string(), json!({"title": "Hello", "about": "About me"})),
        ]);

        Self {
            jornadas: vec!["Jornada 1".into(), "Jornada 2".into(), "Jornada 3".into()],
            leaderboards,
            delays: HashMap::new(),
            debts: json!([
                ["Ana", "0.00", "5.20", "5.20"],
                ["Bruno", "1.60", "0.00", "1.60"],
            ]),
            debts_status: StatusCode::OK,
            puntos,
            bundles,
            update_status: StatusCode::OK,
            hold_update: false,
            update_received: Notify::new(),
            update_release: Notify::new(),
            hits: Mutex::new(Vec::new()),
        }
    }

    fn hit(&self, what: String) {
        self.hits.lock().unwrap().push(what);
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.hits().iter().filter(|h| h.starts_with(prefix)).count()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start(state: MockState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/api/numjornadas", get(numjornadas))
            .route("/api/jornada", get(jornada))
            .route("/api/deudas", get(deudas))
            .route("/api/puntos", get(puntos))
            .route("/api/misterupdate", post(misterupdate))
            .route("/api/playersupdate", post(playersupdate))
            .route("/static/lan/portfolio/{file}", get(bundle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> MisterClient {
        MisterClient::connect(&self.base_url).unwrap()
    }
}

type Shared = State<Arc<MockState>>;

async fn numjornadas(State(state): Shared) -> impl IntoResponse {
    state.hit("numjornadas".into());
    Json(json!(state.jornadas))
}

async fn jornada(State(state): Shared, Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
    let value = q.get("jornada").cloned().unwrap_or_default();
    state.hit(format!("jornada={}", value));
    if let Some(delay) = state.delays.get(&value) {
        tokio::time::sleep(*delay).await;
    }
    match state.leaderboards.get(&value) {
        Some(rows) => (StatusCode::OK, Json(rows.clone())),
        None => (StatusCode::BAD_REQUEST, Json(json!({"error": "Jornada no válida"}))),
    }
}

async fn deudas(State(state): Shared) -> impl IntoResponse {
    state.hit("deudas".into());
    (state.debts_status, Json(state.debts.clone()))
}

async fn puntos(State(state): Shared, Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
    let value = q.get("jornada").cloned().unwrap_or_default();
    state.hit(format!("puntos={}", value));
    match state.puntos.get(&value) {
        Some(rows) => (StatusCode::OK, Json(rows.clone())),
        None => (StatusCode::BAD_REQUEST, Json(json!({"error": "Jornada no válida"}))),
    }
}

fn update_body(status: StatusCode) -> (StatusCode, Json<Value>) {
    let message = if status.is_success() { "OK" } else { "Error Updating" };
    (status, Json(json!({ "message": message })))
}

async fn misterupdate(State(state): Shared) -> impl IntoResponse {
    state.hit("misterupdate".into());
    state.update_received.notify_one();
    if state.hold_update {
        state.update_release.notified().await;
    }
    update_body(state.update_status)
}

async fn playersupdate(State(state): Shared) -> impl IntoResponse {
    state.hit("playersupdate".into());
    update_body(state.update_status)
}

async fn bundle(State(state): Shared, Path(file): Path<String>) -> impl IntoResponse {
    let lang = file.trim_end_matches(".json").to_string();
    state.hit(format!("lang={}", lang));
    match state.bundles.get(&lang) {
        Some(b) => (StatusCode::OK, Json(b.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))),
    }
}
