use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Entity, EntityRecognizer, NerError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct TagRequest<'a> {
    text: &'a str,
}

/// Taggers either return a bare span list or a document with an `ents` field.
/// `Doc.to_json()` ents carry offsets but no `text`; it is sliced from the request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagResponse {
    Spans(Vec<Entity>),
    Doc { ents: Vec<Entity> },
}

impl TagResponse {
    fn into_entities(self) -> Vec<Entity> {
        match self {
            TagResponse::Spans(ents) | TagResponse::Doc { ents } => ents,
        }
    }
}

/// Consumes a tagger service: `POST {url}` with `{"text": ...}`.
#[derive(Clone)]
pub struct HttpEntityRecognizer {
    client: Client,
    url: String,
}

impl HttpEntityRecognizer {
    pub fn new(url: impl Into<String>) -> Result<Self, NerError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl EntityRecognizer for HttpEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        let response = self
            .client
            .post(&self.url)
            .json(&TagRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NerError::Service {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let mut entities = response.json::<TagResponse>().await?.into_entities();
        for entity in &mut entities {
            entity.fill_text_from(text);
        }
        entities.retain(|e| !e.text.is_empty());
        debug!("Tagger returned {} entities", entities.len());
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recognize_parses_span_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ner")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"text": "An iPhone app for Canada"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"text": "iPhone", "label": "PRODUCT", "start": 3, "end": 9},
                    {"text": "Canada", "label": "GPE", "start": 18, "end": 24}]"#,
            )
            .create_async()
            .await;

        let recognizer = HttpEntityRecognizer::new(format!("{}/ner", server.url())).unwrap();
        let entities = recognizer.recognize("An iPhone app for Canada").await.unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].text, "iPhone");
        assert_eq!(entities[1].label, "GPE");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recognize_parses_doc_shape() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ents": [{"text": "Acme", "label_": "ORG"}]}"#)
            .create_async()
            .await;

        let recognizer = HttpEntityRecognizer::new(format!("{}/ner", server.url())).unwrap();
        let entities = recognizer.recognize("Acme").await.unwrap();

        assert_eq!(entities, vec![Entity::new("Acme", "ORG")]);
    }

    #[tokio::test]
    async fn test_recognize_accepts_full_spacy_spans() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"text": "iPhone", "label_": "PRODUCT",
                     "start": 1, "end": 2, "start_char": 3, "end_char": 9}]"#,
            )
            .create_async()
            .await;

        let recognizer = HttpEntityRecognizer::new(format!("{}/ner", server.url())).unwrap();
        let entities = recognizer.recognize("An iPhone app").await.unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].char_span(), Some((3, 9)));
    }

    #[tokio::test]
    async fn test_recognize_slices_text_for_doc_json_ents() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"text": "Launch in Canada with Acme",
                    "ents": [{"start": 10, "end": 16, "label": "GPE"},
                             {"start": 22, "end": 26, "label": "ORG"}],
                    "tokens": []}"#,
            )
            .create_async()
            .await;

        let recognizer = HttpEntityRecognizer::new(format!("{}/ner", server.url())).unwrap();
        let entities = recognizer
            .recognize("Launch in Canada with Acme")
            .await
            .unwrap();

        assert_eq!(entities[0].text, "Canada");
        assert_eq!(entities[1].text, "Acme");
    }

    #[tokio::test]
    async fn test_service_failure_is_typed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ner")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let recognizer = HttpEntityRecognizer::new(format!("{}/ner", server.url())).unwrap();
        let err = recognizer.recognize("anything").await.unwrap_err();

        match err {
            NerError::Service { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "model not loaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
