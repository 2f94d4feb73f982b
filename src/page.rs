//! Page runtimes: the skeleton each page binds to, its ready pipeline and
//! the event loop that replaces the browser's listeners.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, warn};

use crate::client::MisterClient;
use crate::controller::{selector_element, JornadaController, LoadOutcome, ScoreView, SharedDocument};
use crate::dom::{Document, Element};
use crate::error::MisterError;
use crate::events::PageEvent;
use crate::i18n::{self, apply_translations, TranslationReport, I18N_ATTR};
use crate::models::jornada::Jornada;
use crate::models::translation::TranslationBundle;
use crate::render::debts::{render_debts, DEBTS_TABLE_ID};
use crate::render::leaderboard::LEADERBOARD_TABLE_ID;
use crate::render::legacy::SCORE_TABLE_BODY_ID;
use crate::render::scores::USER_LIST_ID;
use crate::update::{update_button_element, UpdateButton, UpdateOutcome};

fn shared(doc: Document) -> SharedDocument {
    Arc::new(RwLock::new(doc))
}

/// Leaderboard, debt matrix and update button.
#[derive(Clone)]
pub struct MisterPage {
    client: MisterClient,
    doc: SharedDocument,
    leaderboard: JornadaController,
    update: UpdateButton,
}

impl MisterPage {
    pub fn skeleton() -> Document {
        Document::new(vec![
            selector_element(),
            Element::new("div").with_id(LEADERBOARD_TABLE_ID),
            Element::new("div").with_id(DEBTS_TABLE_ID),
            update_button_element(),
        ])
    }

    pub fn new(client: MisterClient) -> Self {
        Self::with_document(client, shared(Self::skeleton()))
    }

    pub fn with_document(client: MisterClient, doc: SharedDocument) -> Self {
        Self {
            leaderboard: JornadaController::new(client.clone(), doc.clone(), ScoreView::Leaderboard),
            update: UpdateButton::new(client.clone(), doc.clone()),
            client,
            doc,
        }
    }

    pub fn document(&self) -> SharedDocument {
        self.doc.clone()
    }

    pub fn leaderboard(&self) -> &JornadaController {
        &self.leaderboard
    }

    pub async fn load_debts(&self) -> Result<(), MisterError> {
        let rows = self.client.debts().await?;
        let mut doc = self.doc.write().await;
        render_debts(&mut doc, &rows)?;
        info!(rows = rows.len(), "debt matrix rendered");
        Ok(())
    }

    /// Leaderboard (at `jornada`, else the latest) and debts load
    /// independently; a failure in one is logged and leaves the other
    /// untouched. Errors only when neither region rendered, with the
    /// leaderboard's error.
    pub async fn load(&self, jornada: Option<&str>) -> Result<(), MisterError> {
        let (board, debts) = tokio::join!(self.leaderboard.ready_at(jornada), self.load_debts());
        match (board, debts) {
            (Err(board), Err(debts)) => {
                error!("debts failed to load: {}", debts);
                Err(board)
            }
            (Err(e), Ok(())) => {
                error!("leaderboard failed to load: {}", e);
                Ok(())
            }
            (Ok(_), Err(e)) => {
                error!("debts failed to load: {}", e);
                Ok(())
            }
            (Ok(_), Ok(())) => Ok(()),
        }
    }

    pub async fn ready(&self) {
        if let Err(e) = self.load(None).await {
            error!("mister page failed to load: {}", e);
        }
    }

    pub async fn change_jornada(&self, value: &str) -> Result<LoadOutcome, MisterError> {
        self.leaderboard.change(value).await
    }

    /// Runs the update request, then reloads the page whatever came back.
    pub async fn click_update(&self) -> Result<UpdateOutcome, MisterError> {
        let outcome = self.update.click().await;
        info!("reloading page after update");
        self.ready().await;
        outcome
    }
}

/// Score list for the selected matchday.
#[derive(Clone)]
pub struct ScoresPage {
    doc: SharedDocument,
    scores: JornadaController,
}

impl ScoresPage {
    pub fn skeleton() -> Document {
        Document::new(vec![selector_element(), Element::new("ul").with_id(USER_LIST_ID)])
    }

    pub fn new(client: MisterClient) -> Self {
        Self::with_document(client, shared(Self::skeleton()))
    }

    pub fn with_document(client: MisterClient, doc: SharedDocument) -> Self {
        Self {
            scores: JornadaController::new(client, doc.clone(), ScoreView::UserList),
            doc,
        }
    }

    pub fn document(&self) -> SharedDocument {
        self.doc.clone()
    }

    pub fn controller(&self) -> &JornadaController {
        &self.scores
    }
}

/// Older score table rebuilt node by node; its selector arrives pre-filled.
#[derive(Clone)]
pub struct LegacyScoresPage {
    doc: SharedDocument,
    scores: JornadaController,
}

impl LegacyScoresPage {
    /// Selector holding `jornadas` with the first one selected, and the
    /// empty `cuerpo-tabla` body.
    pub fn skeleton(jornadas: &[Jornada]) -> Document {
        let mut selector = selector_element();
        for jornada in jornadas {
            selector.append_child(
                Element::new("option")
                    .with_attr("value", jornada.value())
                    .with_text(jornada.label.as_str()),
            );
        }
        let table = Element::new("table").with_child(Element::new("tbody").with_id(SCORE_TABLE_BODY_ID));
        Document::new(vec![selector, table])
    }

    pub fn new(client: MisterClient, jornadas: &[Jornada]) -> Self {
        Self::with_document(client, shared(Self::skeleton(jornadas)))
    }

    pub fn with_document(client: MisterClient, doc: SharedDocument) -> Self {
        Self {
            scores: JornadaController::new(client, doc.clone(), ScoreView::LegacyTable),
            doc,
        }
    }

    pub fn document(&self) -> SharedDocument {
        self.doc.clone()
    }

    pub fn controller(&self) -> &JornadaController {
        &self.scores
    }
}

/// Portfolio text in the visitor's language.
#[derive(Clone)]
pub struct PortfolioPage {
    client: MisterClient,
    doc: SharedDocument,
    locale: String,
    fallback: String,
}

impl PortfolioPage {
    /// One paragraph per `data-i18n` key.
    pub fn skeleton<S: AsRef<str>>(keys: &[S]) -> Document {
        let children = keys
            .iter()
            .map(|k| Element::new("p").with_attr(I18N_ATTR, k.as_ref()))
            .collect();
        Document::new(vec![Element::new("main").with_id("portfolio").with_children(children)])
    }

    pub fn new(client: MisterClient, doc: SharedDocument, locale: impl Into<String>) -> Self {
        Self {
            client,
            doc,
            locale: locale.into(),
            fallback: i18n::FALLBACK_LANGUAGE.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn document(&self) -> SharedDocument {
        self.doc.clone()
    }

    pub fn language(&self) -> String {
        i18n::detect_language_or(&self.locale, &self.fallback)
    }

    pub async fn load(&self) -> Result<TranslationReport, MisterError> {
        let lang = self.language();
        info!(locale = %self.locale, %lang, "portfolio language detected");
        self.change_language(&lang).await
    }

    pub async fn change_language(&self, lang: &str) -> Result<TranslationReport, MisterError> {
        let bundle = self.client.translations(lang).await?;
        Ok(self.show(&bundle).await)
    }

    /// Applies an already fetched bundle.
    pub async fn show(&self, bundle: &TranslationBundle) -> TranslationReport {
        let mut doc = self.doc.write().await;
        apply_translations(&mut doc, bundle)
    }
}

/// Any of the pages, driven by [`PageEvent`]s.
#[derive(Clone)]
pub enum Page {
    Mister(MisterPage),
    Scores(ScoresPage),
    Legacy(LegacyScoresPage),
    Portfolio(PortfolioPage),
}

impl Page {
    pub fn document(&self) -> SharedDocument {
        match self {
            Page::Mister(p) => p.document(),
            Page::Scores(p) => p.document(),
            Page::Legacy(p) => p.document(),
            Page::Portfolio(p) => p.document(),
        }
    }

    fn controller(&self) -> Option<&JornadaController> {
        match self {
            Page::Mister(p) => Some(p.leaderboard()),
            Page::Scores(p) => Some(p.controller()),
            Page::Legacy(p) => Some(p.controller()),
            Page::Portfolio(_) => None,
        }
    }

    async fn ready(&self) {
        let result = match self {
            Page::Mister(p) => {
                p.ready().await;
                Ok(())
            }
            Page::Scores(p) => p.controller().ready().await.map(drop),
            Page::Legacy(p) => p.controller().ready().await.map(drop),
            Page::Portfolio(p) => p.load().await.map(drop),
        };
        if let Err(e) = result {
            error!("page failed to load: {}", e);
        }
    }

    /// Handles one event; failures are logged, never propagated.
    pub async fn handle(&self, event: PageEvent) {
        match event {
            PageEvent::Ready | PageEvent::Reload => self.ready().await,
            PageEvent::SelectorChanged(value) => match self.controller() {
                Some(controller) => {
                    if let Err(e) = controller.change(&value).await {
                        error!(jornada = %value, "matchday failed to load: {}", e);
                    }
                }
                None => warn!("page has no matchday selector"),
            },
            PageEvent::UpdateClicked => match self {
                Page::Mister(p) => {
                    if let Err(e) = p.click_update().await {
                        error!("update button failed: {}", e);
                    }
                }
                _ => warn!("page has no update button"),
            },
        }
    }

    /// Event loop. Selector changes run concurrently so a slow response never
    /// blocks a newer selection; everything else runs in order.
    pub async fn run(&self, mut events: broadcast::Receiver<PageEvent>) {
        loop {
            match events.recv().await {
                Ok(event @ PageEvent::SelectorChanged(_)) => {
                    let page = self.clone();
                    tokio::spawn(async move { page.handle(event).await });
                }
                Ok(event) => self.handle(event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "page fell behind, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
