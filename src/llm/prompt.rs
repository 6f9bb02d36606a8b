use crate::config::{FrontmatterDefaults, TitleConvention};

pub const SYSTEM_PROMPT: &str = r#"
You are a technical writer for a developer blog.
Every post covers a single concrete topic in depth, with working code where it helps.
Reply with the Markdown document only: no preamble, no closing remarks, no code fence around the whole reply.
"#;

/// Instruction for today's post. Recent slugs are listed so the model can steer
/// away from topics the blog already covered.
pub fn build_prompt(
    date: &str,
    recent: &[String],
    defaults: &FrontmatterDefaults,
    convention: TitleConvention,
) -> String {
    let mut prompt = format!(
        "Write a technical blog post.\n\
         Start with YAML frontmatter between two `---` lines containing, in this order:\n\
         date: {date}\n\
         authors: [{author}]\n\
         categories: [{category}]\n\
         description: one sentence summarizing the post\n",
        author = defaults.author,
        category = defaults.category,
    );

    match convention {
        TitleConvention::Heading => {
            prompt.push_str("Then a single `# Title` heading line, followed by the content.\n")
        }
        TitleConvention::FirstLine => prompt.push_str(
            "Then the title alone on the first line after the frontmatter, followed by the content.\n",
        ),
    }

    if !recent.is_empty() {
        prompt.push_str("\nThese topics were covered recently, pick something different:\n");
        for slug in recent {
            prompt.push_str("- ");
            prompt.push_str(&slug.replace('_', " "));
            prompt.push('\n');
        }
    }

    prompt
}
