use serde::{Deserialize, Serialize};

/// Body posted to the update endpoints. The backend ignores its contents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRequest {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub message: String,
}
