use anyhow::{Context, Result, bail};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        CreateResponseArgs, InputMessage, InputRole, OutputItem, OutputMessageContent,
    },
};

// A full blog post runs a few thousand tokens; leave headroom for reasoning.
const MAX_OUTPUT_TOKENS: u32 = 16_000;

/// Sends one system + user exchange and returns all text the model produced,
/// joined in output order.
pub async fn request_text(
    client: &Client<OpenAIConfig>,
    model: &str,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String> {
    let request = CreateResponseArgs::default()
        .model(model)
        .max_output_tokens(MAX_OUTPUT_TOKENS)
        .input(vec![
            InputMessage {
                role: InputRole::System,
                content: vec![system_prompt.into()],
                status: None,
            },
            InputMessage {
                role: InputRole::User,
                content: vec![user_prompt.into()],
                status: None,
            },
        ])
        .build()?;

    let response = client
        .responses()
        .create(request)
        .await
        .with_context(|| format!("Failed to get a response from model {model}"))?;

    let mut parts = Vec::new();
    for item in response.output {
        if let OutputItem::Message(message) = item {
            for content in message.content {
                if let OutputMessageContent::OutputText(text) = content {
                    parts.push(text.text);
                }
            }
        }
    }

    let text = parts.concat();
    if text.trim().is_empty() {
        bail!("No text output returned from model {model}");
    }
    Ok(text)
}
