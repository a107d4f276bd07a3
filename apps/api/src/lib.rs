pub mod config;
pub mod errors;
pub mod interview;
pub mod llm_client;
pub mod ner;
pub mod publisher;
pub mod routes;
pub mod state;
