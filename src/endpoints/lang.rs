use tracing::debug;

use crate::client::{json_body, MisterClient};
use crate::error::MisterError;
use crate::models::translation::TranslationBundle;

impl MisterClient {
    /// Portfolio translation bundle for a two-letter language code.
    pub async fn translations(&self, lang: &str) -> Result<TranslationBundle, MisterError> {
        let url = self.url(&format!("/static/lan/portfolio/{}.json", lang));
        debug!(%url, lang, "fetching translation bundle");
        let resp = self.http.get(&url).send().await?;
        json_body(resp).await
    }
}
