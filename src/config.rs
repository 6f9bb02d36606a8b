use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::ValueEnum;

pub const DEFAULT_OUTPUT_DIR: &str = "docs/posts";
pub const DEFAULT_HISTORY_FILE: &str = "topic_history.json";
pub const DEFAULT_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_AUTHOR: &str = "gemini";
pub const DEFAULT_CATEGORY: &str = "Tech";
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Where the sanitizer looks for the post title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TitleConvention {
    /// First level-1 Markdown heading in the body.
    #[default]
    Heading,
    /// First non-empty line after the frontmatter.
    FirstLine,
}

/// Values used when the generated text lacks its own frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterDefaults {
    pub author: String,
    pub category: String,
}

impl Default for FrontmatterDefaults {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizeOptions {
    pub title_convention: TitleConvention,
    pub defaults: FrontmatterDefaults,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub history_file: PathBuf,
    pub model: String,
    pub api_base: Option<String>,
    pub history_limit: usize,
    pub sanitize: SanitizeOptions,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            model: DEFAULT_MODEL.to_string(),
            api_base: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            sanitize: SanitizeOptions::default(),
            dry_run: false,
        }
    }
}

/// Point in time a run is stamped with. Captured once so the prompt, the
/// fabricated frontmatter and the placeholder title all agree.
#[derive(Debug, Clone, Copy)]
pub struct RunClock {
    now: DateTime<Local>,
}

impl RunClock {
    pub fn now() -> Self {
        Self { now: Local::now() }
    }

    pub fn at(now: DateTime<Local>) -> Self {
        Self { now }
    }

    pub fn date(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }

    pub fn placeholder_title(&self) -> String {
        self.now.format("Post %Y%m%d %H%M%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults_match_the_blog_layout() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("docs/posts"));
        assert_eq!(config.history_file, PathBuf::from("topic_history.json"));
        assert_eq!(config.sanitize.title_convention, TitleConvention::Heading);
        assert!(!config.dry_run);
    }

    #[test]
    fn clock_formats_date_and_placeholder() {
        let clock = RunClock::at(Local.with_ymd_and_hms(2026, 3, 9, 7, 5, 1).unwrap());
        assert_eq!(clock.date(), "2026-03-09");
        assert_eq!(clock.placeholder_title(), "Post 20260309 070501");
    }
}
