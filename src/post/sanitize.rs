use crate::config::{RunClock, SanitizeOptions};
use crate::post::fence::strip_stray_fences;
use crate::post::frontmatter::{Frontmatter, split_frontmatter};
use crate::post::slug::slug_for;
use crate::post::title::{find_title, heading_line, remove_title};
use crate::utils::trim_line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPost {
    pub frontmatter: Frontmatter,
    pub frontmatter_fabricated: bool,
    /// Plain title text. `None` when the text had no recognizable title.
    pub title: Option<String>,
    /// The title's inline Markdown as written, rendered as the heading.
    pub heading: Option<String>,
    pub placeholder_title: String,
    pub body: String,
}

impl SanitizedPost {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.placeholder_title)
    }

    pub fn slug(&self) -> String {
        slug_for(self.title(), &self.placeholder_title)
    }

    /// Frontmatter, blank line, one `# Title` heading, then the body.
    pub fn render(&self) -> String {
        let mut out = self.frontmatter.render();
        out.push_str("\n\n");
        if let Some(heading) = &self.heading {
            out.push_str(&heading_line(heading));
            out.push('\n');
            if !self.body.is_empty() {
                out.push('\n');
            }
        }
        if !self.body.is_empty() {
            out.push_str(&self.body);
            out.push('\n');
        }
        out
    }
}

pub fn sanitize(raw: &str, options: &SanitizeOptions, clock: &RunClock) -> SanitizedPost {
    let text = strip_stray_fences(&raw.replace("\r\n", "\n"));
    let split = split_frontmatter(&text);

    let frontmatter_fabricated = split.frontmatter.is_none();
    let frontmatter = split
        .frontmatter
        .unwrap_or_else(|| Frontmatter::fabricate(&clock.date(), &options.defaults));

    let body = strip_stray_fences(split.body);
    let (title, heading, body) = match find_title(&body, options.title_convention) {
        Some(title) => {
            let rest = remove_title(&body, &title);
            (Some(title.text), Some(title.markdown), rest)
        }
        None => (None, None, body),
    };

    SanitizedPost {
        frontmatter,
        frontmatter_fabricated,
        title,
        heading,
        placeholder_title: clock.placeholder_title(),
        body: trim_blank_lines(&body).to_string(),
    }
}

fn trim_blank_lines(text: &str) -> &str {
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if trim_line(line).is_some() {
            break;
        }
        start += line.len();
    }
    text[start..].trim_end()
}
