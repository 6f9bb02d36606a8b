pub mod client;
pub mod prompt;
pub mod response;
pub mod secrets;

pub use client::{OpenAiGenerator, TextGenerator};
pub use prompt::build_prompt;
pub use secrets::api_key_from_env;
