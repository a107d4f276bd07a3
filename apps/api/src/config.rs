use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_LOG_PATH: &str = "interview_data.json";

/// Which entity recognizer backs the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NerBackend {
    /// A standalone tagger service reached over HTTP.
    Http { url: String },
    /// The chat-completion model prompted to tag entities.
    Llm,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub ner_backend: NerBackend,
    pub log_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            ner_backend: parse_ner_backend(
                std::env::var("NER_BACKEND").ok().as_deref(),
                std::env::var("NER_SERVICE_URL").ok(),
            )?,
            log_path: std::env::var("INTERVIEW_LOG_PATH")
                .unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_ner_backend(backend: Option<&str>, service_url: Option<String>) -> Result<NerBackend> {
    match backend.map(str::trim).unwrap_or("http") {
        "http" => {
            let url = service_url.filter(|u| !u.trim().is_empty()).context(
                "Required environment variable 'NER_SERVICE_URL' is not set (NER_BACKEND=http)",
            )?;
            Ok(NerBackend::Http { url })
        }
        "llm" => Ok(NerBackend::Llm),
        other => bail!("NER_BACKEND must be 'http' or 'llm', got '{other}'"),
    }
}
