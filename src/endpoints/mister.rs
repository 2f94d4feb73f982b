use tracing::debug;

use crate::client::{json_body, MisterClient};
use crate::error::MisterError;
use crate::models::debt::DebtRow;
use crate::models::jornada::Jornada;
use crate::models::leaderboard::LeaderboardRow;
use crate::models::score::PlayerScore;
use crate::models::update::{UpdateRequest, UpdateResponse};

impl MisterClient {
    /// Ordered matchday list; the last entry is the current matchday.
    pub async fn jornadas(&self) -> Result<Vec<Jornada>, MisterError> {
        let url = self.url("/api/numjornadas");
        debug!(%url, "fetching matchday list");
        let resp = self.http.get(&url).send().await?;
        let labels: Vec<serde_json::Value> = json_body(resp).await?;
        Ok(Jornada::from_labels(labels))
    }

    /// Leaderboard rows for one matchday, in ranking order.
    pub async fn leaderboard(&self, jornada: &str) -> Result<Vec<LeaderboardRow>, MisterError> {
        let url = self.url("/api/jornada");
        debug!(%url, jornada, "fetching leaderboard");
        let resp = self.http.get(&url).query(&[("jornada", jornada)]).send().await?;
        json_body(resp).await
    }

    /// Debt matrix, one `[user, v1..vN, total]` row per user.
    pub async fn debts(&self) -> Result<Vec<DebtRow>, MisterError> {
        let url = self.url("/api/deudas");
        debug!(%url, "fetching debt matrix");
        let resp = self.http.get(&url).send().await?;
        json_body(resp).await
    }

    /// Legacy per-player points for one matchday.
    pub async fn scores(&self, jornada: &str) -> Result<Vec<PlayerScore>, MisterError> {
        let url = self.url("/api/puntos");
        debug!(%url, jornada, "fetching scores");
        let resp = self.http.get(&url).query(&[("jornada", jornada)]).send().await?;
        json_body(resp).await
    }

    /// Asks the backend to re-scrape matchday points.
    pub async fn mister_update(&self) -> Result<UpdateResponse, MisterError> {
        self.post_update("/api/misterupdate").await
    }

    /// Asks the backend to re-scrape the player list.
    pub async fn players_update(&self) -> Result<UpdateResponse, MisterError> {
        self.post_update("/api/playersupdate").await
    }

    async fn post_update(&self, path: &str) -> Result<UpdateResponse, MisterError> {
        let url = self.url(path);
        debug!(%url, "posting update");
        let resp = self
            .http
            .post(&url)
            .json(&UpdateRequest::default())
            .send()
            .await?;
        json_body(resp).await
    }
}
