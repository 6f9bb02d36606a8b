use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueHint};

use postgen::commands::{generate, history, sanitize};
use postgen::config::{
    Config, DEFAULT_AUTHOR, DEFAULT_CATEGORY, DEFAULT_HISTORY_FILE, DEFAULT_HISTORY_LIMIT,
    DEFAULT_MODEL, DEFAULT_OUTPUT_DIR, FrontmatterDefaults, RunClock, SanitizeOptions,
    TitleConvention,
};
use postgen::llm::{self, OpenAiGenerator};

#[derive(Parser, Debug)]
#[command(
    name = "postgen",
    version,
    about = "Generate a blog post with an LLM and file it under docs/posts.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate today's post, save it and record its slug
    Generate {
        #[command(flatten)]
        post: PostArgs,
        /// Model identifier sent to the provider
        #[arg(long, value_name = "MODEL", default_value = DEFAULT_MODEL)]
        model: String,
        /// Base URL of an OpenAI-compatible API
        #[arg(long, value_name = "URL", value_hint = ValueHint::Url)]
        api_base: Option<String>,
        /// Number of recent slugs listed in the prompt
        #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_HISTORY_LIMIT)]
        history_limit: usize,
        /// Print the post instead of writing it
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Clean up a saved raw response without calling the model
    Sanitize {
        /// File holding the raw model output
        #[arg(value_name = "PATH", value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[command(flatten)]
        post: PostArgs,
        /// Save the post and append its slug to the history
        #[arg(long, default_value_t = false)]
        write: bool,
    },
    /// Show recently generated slugs
    History {
        #[arg(long, value_name = "PATH", default_value = DEFAULT_HISTORY_FILE, value_hint = ValueHint::FilePath)]
        history_file: PathBuf,
        /// Number of entries to show
        #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
    /// Verify the configured API key by listing models
    CheckKey {
        /// Base URL of an OpenAI-compatible API
        #[arg(long, value_name = "URL", value_hint = ValueHint::Url)]
        api_base: Option<String>,
    },
}

#[derive(Args, Debug)]
struct PostArgs {
    /// Directory posts are written to
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR, value_hint = ValueHint::DirPath)]
    output_dir: PathBuf,
    /// JSON file listing the slugs of earlier posts
    #[arg(long, value_name = "PATH", default_value = DEFAULT_HISTORY_FILE, value_hint = ValueHint::FilePath)]
    history_file: PathBuf,
    /// Author used when the response has no frontmatter
    #[arg(long, value_name = "NAME", default_value = DEFAULT_AUTHOR)]
    author: String,
    /// Category used when the response has no frontmatter
    #[arg(long, value_name = "NAME", default_value = DEFAULT_CATEGORY)]
    category: String,
    /// Where the title is read from
    #[arg(long, value_enum, default_value_t = TitleConvention::Heading)]
    title_from: TitleConvention,
}

impl PostArgs {
    fn into_config(self) -> Config {
        Config {
            output_dir: self.output_dir,
            history_file: self.history_file,
            sanitize: SanitizeOptions {
                title_convention: self.title_from,
                defaults: FrontmatterDefaults {
                    author: self.author,
                    category: self.category,
                },
            },
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let clock = RunClock::now();

    match cli.command {
        Command::Generate {
            post,
            model,
            api_base,
            history_limit,
            dry_run,
        } => {
            let config = Config {
                model,
                api_base,
                history_limit,
                dry_run,
                ..post.into_config()
            };
            let generator = OpenAiGenerator::from_config(&config)?;
            generate::run(&generator, &config, &clock).await?;
        }
        Command::Sanitize { input, post, write } => {
            sanitize::run(&input, &post.into_config(), &clock, write)?;
        }
        Command::History {
            history_file,
            limit,
        } => {
            let config = Config {
                history_file,
                ..Config::default()
            };
            history::run(&config, limit)?;
        }
        Command::CheckKey { api_base } => {
            let config = Config {
                api_base,
                ..Config::default()
            };
            let generator = OpenAiGenerator::from_config(&config)?;
            generator.healthcheck().await?;
            println!("API key from {} is valid.", llm::secrets::API_KEY_ENV);
        }
    }

    Ok(())
}
