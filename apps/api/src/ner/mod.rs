//! Named-entity recognition — pluggable, trait-based taggers.
//!
//! Default: `HttpEntityRecognizer` (a standalone tagger service speaking the
//! OntoNotes 5 label set). Alternative: `LlmEntityRecognizer` (the completion
//! model prompted to tag spans).
//!
//! `AppState` holds an `Arc<dyn EntityRecognizer>`, chosen at startup via config.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;

pub mod http;
pub mod llm;
mod prompts;

pub use http::HttpEntityRecognizer;
pub use llm::LlmEntityRecognizer;

#[derive(Debug, Error)]
pub enum NerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tagger returned status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("LLM tagging failed: {0}")]
    Llm(#[from] LlmError),
}

/// A span of text tagged with a semantic category.
///
/// spaCy spans report token indices in `start`/`end` and character offsets in
/// `start_char`/`end_char`. `start`/`end` are read as character offsets only
/// when the `_char` pair is absent (bare span lists, `Doc.to_json()` ents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// May be missing from `Doc.to_json()` ents; see `fill_text_from`.
    #[serde(default)]
    pub text: String,
    #[serde(alias = "label_")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_char: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_char: Option<usize>,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start: None,
            end: None,
            start_char: None,
            end_char: None,
        }
    }

    pub fn with_offsets(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Character span in the source text, if the tagger reported one.
    pub fn char_span(&self) -> Option<(usize, usize)> {
        match (self.start_char, self.end_char) {
            (Some(start), Some(end)) => Some((start, end)),
            (Some(_), None) | (None, Some(_)) => None,
            (None, None) => self.start.zip(self.end),
        }
    }

    /// Character offset the span starts at; the source-order sort key.
    pub fn char_start(&self) -> Option<usize> {
        self.start_char.or(self.start)
    }

    /// Copies the span out of `source` when the tagger sent offsets but no text.
    pub fn fill_text_from(&mut self, source: &str) {
        if !self.text.is_empty() {
            return;
        }
        if let Some((start, end)) = self.char_span() {
            self.text = source
                .chars()
                .skip(start)
                .take(end.saturating_sub(start))
                .collect();
        }
    }
}

/// Text in, tagged spans out. Implement this to swap taggers without touching
/// the classifier or the handlers.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_accepts_spacy_field_names() {
        let json = r#"{"text": "iOS", "label_": "PRODUCT", "start_char": 4, "end_char": 7}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.label, "PRODUCT");
        assert_eq!(entity.char_span(), Some((4, 7)));
    }

    #[test]
    fn test_full_spacy_span_prefers_char_offsets() {
        let json = r#"{"text":"iPhone","label_":"PRODUCT","start":1,"end":2,"start_char":3,"end_char":9}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.start, Some(1));
        assert_eq!(entity.char_span(), Some((3, 9)));
        assert_eq!(entity.char_start(), Some(3));
    }

    #[test]
    fn test_plain_offsets_are_char_offsets() {
        let entity: Entity =
            serde_json::from_str(r#"{"text": "Acme", "label": "ORG", "start": 5, "end": 9}"#)
                .unwrap();
        assert_eq!(entity.char_span(), Some((5, 9)));
        assert_eq!(entity.char_start(), Some(5));
    }

    #[test]
    fn test_entity_offsets_optional() {
        let entity: Entity = serde_json::from_str(r#"{"text": "Acme", "label": "ORG"}"#).unwrap();
        assert_eq!(entity, Entity::new("Acme", "ORG"));
        assert_eq!(entity.char_span(), None);
    }

    #[test]
    fn test_fill_text_slices_by_characters() {
        let mut entity: Entity =
            serde_json::from_str(r#"{"start": 7, "end": 13, "label": "GPE"}"#).unwrap();
        entity.fill_text_from("Café à Zürich");
        assert_eq!(entity.text, "Zürich");
    }

    #[test]
    fn test_fill_text_keeps_existing_text() {
        let mut entity = Entity::new("Berlin", "GPE").with_offsets(0, 2);
        entity.fill_text_from("Berlin");
        assert_eq!(entity.text, "Berlin");
    }
}
