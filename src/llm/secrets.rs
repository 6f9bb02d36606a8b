use std::env;

use anyhow::{Result, bail};

use crate::utils::strip_controls_and_escapes;

pub const API_KEY_ENV: &str = "POSTGEN_API_KEY";

/// Reads the API key from the environment. A missing or blank key is fatal
/// and is reported before any request goes out.
pub fn api_key_from_env() -> Result<String> {
    parse_api_key(env::var(API_KEY_ENV).ok())
}

fn parse_api_key(value: Option<String>) -> Result<String> {
    let key = value
        .map(|raw| strip_controls_and_escapes(&raw))
        .unwrap_or_default();

    if key.is_empty() {
        bail!(
            "No API key configured. Set {} to the key for your text generation provider.",
            API_KEY_ENV
        );
    }

    Ok(key)
}
