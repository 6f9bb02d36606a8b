pub mod commands;
pub mod config;
pub mod history;
pub mod llm;
pub mod palette;
pub mod post;
pub mod utils;
pub mod writer;
