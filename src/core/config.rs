use std::env;

use clap::ValueEnum;

use crate::chat::UnansweredTurnPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub unanswered_turns: UnansweredTurnPolicy,
}

impl AppConfig {
    /// Apply command line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        unanswered_turns: Option<UnansweredTurnPolicy>,
    ) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        if let Some(policy) = unanswered_turns {
            self.unanswered_turns = policy;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let api_base_url =
            env::var("DOCASSIST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let unanswered_turns = match env::var("DOCASSIST_UNANSWERED_TURNS") {
            Ok(value) => UnansweredTurnPolicy::from_str(&value, true).unwrap_or_else(|_| {
                tracing::warn!(
                    "Ignoring DOCASSIST_UNANSWERED_TURNS={}, expected keep or rollback",
                    value
                );
                UnansweredTurnPolicy::default()
            }),
            Err(_) => UnansweredTurnPolicy::default(),
        };

        Self {
            api_base_url,
            unanswered_turns,
        }
    }
}
