use async_trait::async_trait;

use super::prompts::{NER_MAX_TOKENS, NER_PROMPT_TEMPLATE, NER_SYSTEM};
use super::{Entity, EntityRecognizer, NerError};
use crate::llm_client::LlmClient;

/// Tags entities by prompting the completion model. Used when no tagger
/// service is deployed.
pub struct LlmEntityRecognizer(pub LlmClient);

#[async_trait]
impl EntityRecognizer for LlmEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        let prompt = NER_PROMPT_TEMPLATE.replace("{text}", text);
        let entities = self
            .0
            .call_json::<Vec<Entity>>(&prompt, NER_SYSTEM, NER_MAX_TOKENS)
            .await?;
        Ok(entities)
    }
}
