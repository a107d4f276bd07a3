// Requirements interview: fixed question script, entity bucketing,
// follow-up drafting and the append-only session log.
// All LLM calls go through llm_client.

pub mod classifier;
pub mod follow_up;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod session_log;
