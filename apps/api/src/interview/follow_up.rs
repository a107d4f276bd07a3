//! Follow-up generator — drafts a clarifying question when a response names no features.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::interview::prompts::{FOLLOW_UP_MAX_TOKENS, FOLLOW_UP_PROMPT_TEMPLATE};
use crate::llm_client::LlmClient;

/// Carried in `AppState` as `Arc<dyn FollowUpGenerator>`.
#[async_trait]
pub trait FollowUpGenerator: Send + Sync {
    /// Returns a non-empty, trimmed question.
    async fn follow_up(&self, statement: &str) -> Result<String, AppError>;
}

pub fn build_prompt(statement: &str) -> String {
    FOLLOW_UP_PROMPT_TEMPLATE.replace("{statement}", statement)
}

/// Single-turn chat completion against the shared client.
pub struct LlmFollowUpGenerator(pub LlmClient);

#[async_trait]
impl FollowUpGenerator for LlmFollowUpGenerator {
    async fn follow_up(&self, statement: &str) -> Result<String, AppError> {
        let question = self
            .0
            .complete(&build_prompt(statement), FOLLOW_UP_MAX_TOKENS)
            .await?;
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_prompt_embeds_statement_verbatim() {
        let prompt = build_prompt("  We want something 'simple'  ");
        assert_eq!(
            prompt,
            "Given the following statement, suggest a follow-up question to clarify: '  We want something 'simple'  '"
        );
    }

    #[tokio::test]
    async fn test_follow_up_sends_single_turn_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 60,
                "messages": [{
                    "role": "user",
                    "content": "Given the following statement, suggest a follow-up question to clarify: 'It should be fast'"
                }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "\n How fast is fast enough? "}}]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let llm = LlmClient::new("k".to_string(), server.url()).unwrap();
        let question = LlmFollowUpGenerator(llm)
            .follow_up("It should be fast")
            .await
            .unwrap();

        assert_eq!(question, "How fast is fast enough?");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_failure_is_typed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_body(r#"{"error": {"message": "bad request"}}"#)
            .create_async()
            .await;

        let llm = LlmClient::new("k".to_string(), server.url())
            .unwrap()
            .with_retry_base(Duration::ZERO);
        let err = LlmFollowUpGenerator(llm).follow_up("x").await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
    }
}
