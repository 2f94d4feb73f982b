use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat key → text mapping loaded from `/static/lan/portfolio/<code>.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationBundle(pub HashMap<String, String>);

impl TranslationBundle {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TranslationBundle(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
