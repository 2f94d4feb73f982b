//! Portfolio text swapping: locale detection and `data-i18n` rewriting.

use tracing::{info, warn};

use crate::dom::Document;
use crate::models::translation::TranslationBundle;

pub const FALLBACK_LANGUAGE: &str = "es";
pub const I18N_ATTR: &str = "data-i18n";

/// Two-letter language code of a locale such as `en-US` or `pt_BR`, or
/// `fallback` when the locale has no usable primary subtag.
pub fn detect_language_or(locale: &str, fallback: &str) -> String {
    let primary = locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default();

    if primary.len() == 2 && primary.chars().all(|c| c.is_ascii_alphabetic()) {
        primary.to_ascii_lowercase()
    } else {
        fallback.to_string()
    }
}

pub fn detect_language(locale: &str) -> String {
    detect_language_or(locale, FALLBACK_LANGUAGE)
}

/// Picks the highest-weighted range of an `Accept-Language` header, first
/// one winning ties, and reduces it like [`detect_language_or`].
pub fn detect_from_accept_language(header: &str, fallback: &str) -> String {
    let mut best: Option<(&str, f32)> = None;

    for range in header.split(',') {
        let mut parts = range.split(';');
        let tag = parts.next().unwrap_or_default().trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let weight = parts
            .find_map(|p| p.trim().strip_prefix("q="))
            .and_then(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        match best {
            Some((_, w)) if w >= weight => {}
            _ => best = Some((tag, weight)),
        }
    }

    match best {
        Some((tag, _)) => detect_language_or(tag, fallback),
        None => fallback.to_string(),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslationReport {
    pub applied: usize,
    /// Keys the bundle lacked; those elements show the key itself.
    pub missing: Vec<String>,
}

/// Overwrites the text of every `data-i18n` element with the bundle's value.
pub fn apply_translations(doc: &mut Document, bundle: &TranslationBundle) -> TranslationReport {
    let mut report = TranslationReport::default();

    doc.for_each_with_attr_mut(I18N_ATTR, |element| {
        let key = element.attr(I18N_ATTR).unwrap_or_default().to_string();
        match bundle.get(&key) {
            Some(text) => {
                element.set_text(text);
                report.applied += 1;
            }
            None => {
                warn!(key = %key, "missing translation, showing key");
                element.set_text(key.as_str());
                report.missing.push(key);
            }
        }
    });

    info!(applied = report.applied, missing = report.missing.len(), "translations applied");
    report
}
