use anyhow::Result;

use crate::{
    config::{Config, RunClock},
    history::{History, load_history},
    llm::{TextGenerator, build_prompt},
    palette::Palette,
    post::{SanitizedPost, sanitize},
    writer::{SavedPost, save_post},
};

#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub slug: String,
    pub document: String,
    /// `None` on a dry run.
    pub saved: Option<SavedPost>,
}

pub async fn run<G: TextGenerator>(
    generator: &G,
    config: &Config,
    clock: &RunClock,
) -> Result<GenerateOutcome> {
    let load = load_history(&config.history_file);
    load.report(&config.history_file);
    let mut history = load.into_history();

    let prompt = build_prompt(
        &clock.date(),
        history.recent(config.history_limit),
        &config.sanitize.defaults,
        config.sanitize.title_convention,
    );

    Palette::status(
        Palette::INFO,
        "generating:",
        format!("asking {} for today's post", generator.model()),
    );
    let raw = generator.generate(&prompt).await?;

    let post = sanitize(&raw, &config.sanitize, clock);
    report_recoveries(&post);

    let slug = post.slug();
    let document = post.render();
    if history.contains(&slug) {
        Palette::warn(format!(
            "{} was already generated on an earlier run",
            Palette::paint(Palette::ACCENT, &slug)
        ));
    }

    if config.dry_run {
        println!("{document}");
        Palette::status(
            Palette::INFO,
            "dry run:",
            format!("would save as {}", Palette::paint(Palette::ACCENT, &slug)),
        );
        return Ok(GenerateOutcome {
            slug,
            document,
            saved: None,
        });
    }

    let saved = publish(&mut history, config, &slug, &document)?;
    Ok(GenerateOutcome {
        slug,
        document,
        saved: Some(saved),
    })
}

/// Writes the post, then records its slug in the history file.
pub fn publish(
    history: &mut History,
    config: &Config,
    slug: &str,
    document: &str,
) -> Result<SavedPost> {
    let saved = save_post(&config.output_dir, slug, document)?;
    if saved.overwritten {
        Palette::warn(format!(
            "replaced existing post at {}",
            Palette::paint(Palette::ACCENT, saved.path.display())
        ));
    }

    history.push(slug);
    history.save(&config.history_file)?;

    Palette::status(
        Palette::SUCCESS,
        "saved:",
        Palette::paint(Palette::ACCENT, saved.path.display()),
    );
    Ok(saved)
}

pub fn report_recoveries(post: &SanitizedPost) {
    if post.frontmatter_fabricated {
        Palette::warn("response had no frontmatter, using the default block");
    } else if post.frontmatter.get("date").is_none() {
        Palette::warn("frontmatter has no date field, keeping it as written");
    }
    if post.title.is_none() {
        Palette::warn(format!(
            "response had no title, using \"{}\"",
            post.placeholder_title
        ));
    }
}
