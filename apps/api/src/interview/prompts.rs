// Prompt constants for the interview flow.

/// Follow-up prompt template. Replace `{statement}` before sending.
pub const FOLLOW_UP_PROMPT_TEMPLATE: &str =
    "Given the following statement, suggest a follow-up question to clarify: '{statement}'";

/// Output budget for a follow-up question.
pub const FOLLOW_UP_MAX_TOKENS: u32 = 60;
