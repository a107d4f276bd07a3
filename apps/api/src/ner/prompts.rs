use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for entity tagging.
pub const NER_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Entity tagging prompt template. Replace `{text}` before sending.
pub const NER_PROMPT_TEMPLATE: &str = r#"Tag the named entities in the text below using the OntoNotes 5 label set
(PERSON, NORP, FAC, ORG, GPE, LOC, PRODUCT, EVENT, WORK_OF_ART, LAW, LANGUAGE,
DATE, TIME, PERCENT, MONEY, QUANTITY, ORDINAL, CARDINAL).

Return a JSON array, in the order the entities appear in the text, with this EXACT schema:
[
  {"text": "iPhone", "label": "PRODUCT", "start": 12, "end": 18}
]

`text` must be copied verbatim from the input. `start` and `end` are character offsets.
Return [] if there are no entities.

TEXT:
{text}"#;

/// Output budget for a tagging call.
pub const NER_MAX_TOKENS: u32 = 512;
