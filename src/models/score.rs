use serde::{Deserialize, Serialize};

/// Row of the legacy `/api/puntos` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub nombre: String,
    pub puntos: serde_json::Value,
}

impl PlayerScore {
    pub fn puntos_text(&self) -> String {
        match &self.puntos {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
