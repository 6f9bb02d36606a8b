use std::future::Future;

use anyhow::{Context, Result};
use async_openai::{Client, config::OpenAIConfig};

use super::prompt::SYSTEM_PROMPT;
use super::response::request_text;
use super::secrets::api_key_from_env;
use crate::config::Config;

/// Source of generated post text.
pub trait TextGenerator {
    fn model(&self) -> &str;

    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>>;
}

pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    /// Fails when no API key is configured, before anything touches the network.
    pub fn from_config(config: &Config) -> Result<Self> {
        let key = api_key_from_env()?;
        let client = initialize_client(&key, config.api_base.as_deref());
        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    pub async fn healthcheck(&self) -> Result<()> {
        self.client
            .models()
            .list()
            .await
            .context("Failed to validate API key with the text generation provider")?;
        Ok(())
    }
}

impl TextGenerator for OpenAiGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> {
        request_text(&self.client, &self.model, SYSTEM_PROMPT, prompt)
    }
}

fn initialize_client(api_key: &str, api_base: Option<&str>) -> Client<OpenAIConfig> {
    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(api_base) = api_base {
        config = config.with_api_base(api_base);
    }
    Client::with_config(config)
}
