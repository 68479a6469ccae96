//! Runtime configuration, read from environment variables.
//!
//! `main` loads `.env` (or the bundled `assets/config.env`) before this runs,
//! so values set there show up here like any other variable.

use crate::error::{ChatError, ChatResult};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_ASSISTANT_NAME: &str = "Llama";
pub const DEFAULT_GREETING: &str = "Hello, I'm Llama! Ask me anything!";

#[derive(Clone, Debug, PartialEq)]
pub struct ChatConfig {
    pub endpoint: String,
    pub model: String,
    /// `None` means requests wait for the endpoint indefinitely.
    pub timeout: Option<Duration>,
    pub system_prompt: Option<String>,
    pub assistant_name: String,
    pub greeting: Option<String>,
    /// Append a system notice to the conversation when a request fails.
    /// Off by default: failures are only logged.
    pub show_errors: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            system_prompt: None,
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            greeting: Some(DEFAULT_GREETING.to_string()),
            show_errors: false,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> ChatResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ChatResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let timeout = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ChatError::Config(format!("LLM_TIMEOUT_SECS must be whole seconds, got {raw:?}"))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let show_errors = match get("CHAT_SHOW_ERRORS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ChatError::Config(format!("CHAT_SHOW_ERRORS must be a boolean, got {raw:?}"))
            })?,
            None => defaults.show_errors,
        };

        Ok(Self {
            endpoint: get("LLM_ENDPOINT").unwrap_or(defaults.endpoint),
            model: get("LLM_MODEL").unwrap_or(defaults.model),
            timeout,
            system_prompt: get("LLM_SYSTEM_PROMPT"),
            assistant_name: get("CHAT_ASSISTANT_NAME").unwrap_or(defaults.assistant_name),
            greeting: match lookup("CHAT_GREETING") {
                // An explicitly blank value turns the greeting off.
                Some(raw) if raw.trim().is_empty() => None,
                Some(raw) => Some(raw.trim().to_string()),
                None => defaults.greeting,
            },
            show_errors,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
