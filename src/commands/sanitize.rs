use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::generate::{publish, report_recoveries};
use crate::{
    config::{Config, RunClock},
    history::load_history,
    palette::Palette,
    post::sanitize,
};

/// Cleans up a saved raw response without calling the model. Prints the
/// result, or files it like a generated post when `write` is set.
pub fn run(input: &Path, config: &Config, clock: &RunClock, write: bool) -> Result<String> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read response file at {}", input.display()))?;

    let post = sanitize(&raw, &config.sanitize, clock);
    report_recoveries(&post);
    let slug = post.slug();
    let document = post.render();

    if !write {
        println!("{document}");
        Palette::status(
            Palette::INFO,
            "slug:",
            Palette::paint(Palette::ACCENT, &slug),
        );
        return Ok(slug);
    }

    let load = load_history(&config.history_file);
    load.report(&config.history_file);
    let mut history = load.into_history();
    publish(&mut history, config, &slug, &document)?;
    Ok(slug)
}
