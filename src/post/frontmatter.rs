use crate::config::FrontmatterDefaults;
use crate::post::fence::parse_fence;
use crate::utils::trim_line;

pub const DELIMITER: &str = "---";

/// YAML frontmatter kept as its original lines so field order and formatting
/// survive the round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    lines: Vec<String>,
}

impl Frontmatter {
    pub fn fabricate(date: &str, defaults: &FrontmatterDefaults) -> Self {
        Self {
            lines: vec![
                format!("date: {date}"),
                format!("authors: [{}]", defaults.author),
                format!("categories: [{}]", defaults.category),
            ],
        }
    }

    /// Value of a top-level `key: value` entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            (name == key).then(|| value.trim())
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::from(DELIMITER);
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out
    }
}

#[cfg(test)]
impl Frontmatter {
    fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| top_level_key(line))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    pub frontmatter: Option<Frontmatter>,
    pub body: &'a str,
}

/// Splits text into its frontmatter block and the body that follows it.
///
/// Only the first `---` line can open the frontmatter, and only when the text
/// above it is at most one paragraph of chatter with no heading. The block
/// runs to the next `---` line and must read as YAML key-value pairs starting
/// on its first line. Anything before the block is dropped. Text without such
/// a block is returned whole as the body.
pub fn split_frontmatter(text: &str) -> Split<'_> {
    let unsplit = Split {
        frontmatter: None,
        body: text,
    };

    let lines = line_spans(text);
    let mut delimiters = lines
        .iter()
        .enumerate()
        .filter(|(_, (_, line))| line.trim() == DELIMITER)
        .map(|(idx, _)| idx);
    let (Some(open), Some(close)) = (delimiters.next(), delimiters.next()) else {
        return unsplit;
    };

    let inner: Vec<&str> = lines[open + 1..close].iter().map(|(_, l)| *l).collect();
    if !is_chatter(&lines[..open]) || !looks_like_yaml(&inner) {
        return unsplit;
    }

    let mut body_start = lines
        .get(close + 1)
        .map(|(offset, _)| *offset)
        .unwrap_or(text.len());

    if fenced_before(&lines[..open]) {
        body_start = skip_closing_fence(text, body_start);
    }

    Split {
        frontmatter: Some(Frontmatter {
            lines: inner.iter().map(|l| l.trim_end().to_string()).collect(),
        }),
        body: &text[body_start..],
    }
}

fn line_spans(text: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line.trim_end_matches(['\n', '\r']))
        })
        .collect()
}

// "Sure! Here is your post:" and similar. A heading or a second paragraph
// means the post has already started and the `---` is a rule.
fn is_chatter(prefix: &[(usize, &str)]) -> bool {
    let mut paragraphs = 0;
    let mut in_paragraph = false;
    for (_, line) in prefix {
        let Some(trimmed) = trim_line(line) else {
            in_paragraph = false;
            continue;
        };
        if parse_fence(line).is_some() {
            continue;
        }
        if trimmed.starts_with('#') || trimmed.chars().all(|c| c == '=') {
            return false;
        }
        if !in_paragraph {
            paragraphs += 1;
            in_paragraph = true;
        }
    }
    paragraphs <= 1
}

fn looks_like_yaml(lines: &[&str]) -> bool {
    if lines.first().is_none_or(|line| trim_line(line).is_none()) {
        return false;
    }

    let mut keys = 0;
    for line in lines {
        let Some(trimmed) = trim_line(line) else {
            continue;
        };
        if top_level_key(line).is_some() {
            keys += 1;
        } else if !(line.starts_with(char::is_whitespace)
            || trimmed.starts_with("- ")
            || trimmed.starts_with('#'))
        {
            return false;
        }
    }
    keys > 0
}

fn top_level_key(line: &str) -> Option<&str> {
    let (name, rest) = line.split_once(':')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    (valid && (rest.is_empty() || rest.starts_with(' '))).then_some(name)
}

// A fence opened right above the frontmatter means the model wrapped the
// block in ```yaml ... ```.
fn fenced_before(prefix: &[(usize, &str)]) -> bool {
    prefix
        .iter()
        .rev()
        .find(|(_, line)| trim_line(line).is_some())
        .is_some_and(|(_, line)| parse_fence(line).is_some())
}

fn skip_closing_fence(text: &str, body_start: usize) -> usize {
    let mut offset = body_start;
    for (start, line) in line_spans(&text[body_start..]) {
        if trim_line(line).is_none() {
            continue;
        }
        if parse_fence(line).is_some_and(|fence| fence.is_bare()) {
            offset = body_start + start + line.len();
            if text[offset..].starts_with("\r\n") {
                offset += 2;
            } else if text[offset..].starts_with('\n') {
                offset += 1;
            }
        }
        break;
    }
    offset
}
