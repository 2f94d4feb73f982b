//! Matchday selector and the reload pipeline behind it.
//!
//! Each load takes a sequence number; a response is rendered only if no newer
//! load was started meanwhile, so the last matchday selected is the one left
//! on screen regardless of the order responses arrive in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::client::MisterClient;
use crate::dom::{Document, Element};
use crate::error::MisterError;
use crate::models::jornada::Jornada;
use crate::models::leaderboard::LeaderboardRow;
use crate::models::score::PlayerScore;
use crate::render::leaderboard::render_leaderboard;
use crate::render::legacy::render_score_table;
use crate::render::scores::render_user_list;

pub const SELECTOR_ID: &str = "selector-jornada";

pub type SharedDocument = Arc<RwLock<Document>>;

/// Which endpoint feeds the view and which element it is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreView {
    /// `/api/jornada` into `leaderboard-table`.
    Leaderboard,
    /// `/api/jornada` into `user-list`.
    UserList,
    /// `/api/puntos` into `cuerpo-tabla`.
    LegacyTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading { seq: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { seq: u64 },
    /// A newer load was issued before this one resolved; nothing rendered.
    Stale { seq: u64 },
}

enum Payload {
    Leaderboard(Vec<LeaderboardRow>),
    Scores(Vec<PlayerScore>),
}

pub fn selector_element() -> Element {
    Element::new("select").with_id(SELECTOR_ID)
}

/// Replaces the selector's options with `jornadas` and selects the last one.
/// Returns the selected value.
pub fn populate_selector(doc: &mut Document, jornadas: &[Jornada]) -> Result<Option<String>, MisterError> {
    let selector = doc.element_by_id_mut(SELECTOR_ID)?;
    selector.clear_children();
    for jornada in jornadas {
        selector.append_child(
            Element::new("option")
                .with_attr("value", jornada.value())
                .with_text(jornada.label.as_str()),
        );
    }
    if let Some(last) = jornadas.len().checked_sub(1) {
        selector.set_selected_index(last);
    }
    Ok(selector.value())
}

#[derive(Clone)]
pub struct JornadaController {
    client: MisterClient,
    doc: SharedDocument,
    view: ScoreView,
    latest: Arc<AtomicU64>,
    state: Arc<Mutex<ControllerState>>,
}

impl JornadaController {
    pub fn new(client: MisterClient, doc: SharedDocument, view: ScoreView) -> Self {
        Self {
            client,
            doc,
            view,
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(ControllerState::Idle)),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state.lock().map(|s| *s).unwrap_or(ControllerState::Idle)
    }

    fn set_state(&self, state: ControllerState) {
        if let Ok(mut guard) = self.state.lock() {
            *guard = state;
        }
    }

    /// Fetches the matchday list into the selector; returns the selected value.
    pub async fn load_jornadas(&self) -> Result<Option<String>, MisterError> {
        let jornadas = self.client.jornadas().await?;
        let mut doc = self.doc.write().await;
        let selected = populate_selector(&mut doc, &jornadas)?;
        info!(count = jornadas.len(), selected = ?selected, "matchday selector populated");
        Ok(selected)
    }

    /// Page-ready pipeline. The legacy table keeps the selector it was served
    /// with; the other views rebuild it from `/api/numjornadas` first. With
    /// `jornada` set, that matchday is loaded instead of the default.
    pub async fn ready_at(&self, jornada: Option<&str>) -> Result<Option<LoadOutcome>, MisterError> {
        let default = match self.view {
            ScoreView::LegacyTable => {
                let doc = self.doc.read().await;
                doc.element_by_id(SELECTOR_ID)?.value()
            }
            ScoreView::Leaderboard | ScoreView::UserList => self.load_jornadas().await?,
        };

        let target = match jornada {
            Some(j) => Some(j.to_string()),
            None => default,
        };
        match target {
            Some(value) => Ok(Some(self.change(&value).await?)),
            None => {
                debug!("no matchdays to load");
                Ok(None)
            }
        }
    }

    pub async fn ready(&self) -> Result<Option<LoadOutcome>, MisterError> {
        self.ready_at(None).await
    }

    /// Selector change: marks `value` as selected and loads it. Selection and
    /// sequence number are taken under the same lock so they cannot disagree.
    pub async fn change(&self, value: &str) -> Result<LoadOutcome, MisterError> {
        let seq = {
            let mut doc = self.doc.write().await;
            let selector = doc.element_by_id_mut(SELECTOR_ID)?;
            if !selector.select_value(value) {
                debug!(value, "value not among selector options");
            }
            self.issue()
        };
        self.fetch_and_render(seq, value).await
    }

    fn issue(&self) -> u64 {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(ControllerState::Loading { seq });
        seq
    }

    /// Fetches and renders one matchday, unless a newer load supersedes it.
    async fn fetch_and_render(&self, seq: u64, jornada: &str) -> Result<LoadOutcome, MisterError> {
        debug!(seq, jornada, view = ?self.view, "loading matchday");

        let fetched = match self.view {
            ScoreView::Leaderboard | ScoreView::UserList => {
                self.client.leaderboard(jornada).await.map(Payload::Leaderboard)
            }
            ScoreView::LegacyTable => self.client.scores(jornada).await.map(Payload::Scores),
        };

        let mut doc = self.doc.write().await;
        if self.latest.load(Ordering::SeqCst) != seq {
            debug!(seq, jornada, "dropping superseded response");
            return Ok(LoadOutcome::Stale { seq });
        }
        self.set_state(ControllerState::Idle);

        match fetched? {
            Payload::Leaderboard(rows) => match self.view {
                ScoreView::UserList => render_user_list(&mut doc, &rows)?,
                _ => render_leaderboard(&mut doc, &rows)?,
            },
            Payload::Scores(scores) => render_score_table(&mut doc, &scores)?,
        }
        info!(seq, jornada, view = ?self.view, "matchday rendered");
        Ok(LoadOutcome::Rendered { seq })
    }
}
