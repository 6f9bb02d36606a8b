use anyhow::Result;

use crate::{config::Config, history::load_history, palette::Palette, utils::pluralize};

/// Prints the most recent slugs, newest last.
pub fn run(config: &Config, limit: usize) -> Result<()> {
    let load = load_history(&config.history_file);
    load.report(&config.history_file);
    let history = load.into_history();

    let recent = history.recent(limit);
    for slug in recent {
        println!("{slug}");
    }

    Palette::status(
        Palette::INFO,
        "history:",
        Palette::dim(format!(
            "showing {} of {}",
            recent.len(),
            pluralize("slug", history.len())
        )),
    );
    Ok(())
}
