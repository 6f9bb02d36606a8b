use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::config::TitleConvention;
use crate::utils::trim_line;

/// Title text plus the byte span of the line(s) it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    /// Plain text, used for the slug and to spot repeated titles.
    pub text: String,
    /// Inline Markdown as written, without the heading markers.
    pub markdown: String,
    pub span: Range<usize>,
}

pub fn find_title(body: &str, convention: TitleConvention) -> Option<TitleMatch> {
    match convention {
        TitleConvention::Heading => find_heading_title(body),
        TitleConvention::FirstLine => find_first_line_title(body),
    }
}

/// First level-1 heading, ATX or setext. Headings inside code blocks are
/// ignored since the parser sees them as code.
pub fn find_heading_title(body: &str) -> Option<TitleMatch> {
    let mut current: Option<(Range<usize>, String)> = None;

    for (event, range) in Parser::new_ext(body, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => current = Some((range, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, title)) = current.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, title)) = current.as_mut() {
                    title.push(' ');
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some((range, title)) = current.take()
                    && let Some(text) = trim_line(&title)
                {
                    return Some(TitleMatch {
                        text: text.to_string(),
                        markdown: heading_source(&body[range.clone()]),
                        span: line_span(body, range),
                    });
                }
            }
            _ => {}
        }
    }

    None
}

pub fn find_first_line_title(body: &str) -> Option<TitleMatch> {
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if let Some(text) = normalize_title_line(line) {
            return Some(TitleMatch {
                text,
                markdown: atx_content(line).to_string(),
                span: start..offset,
            });
        }
    }
    None
}

/// Removes the matched title, then any copies of it left at the top of the
/// remaining text.
pub fn remove_title(body: &str, title: &TitleMatch) -> String {
    let mut rest = String::with_capacity(body.len());
    rest.push_str(&body[..title.span.start]);
    rest.push_str(&body[title.span.end..]);

    let mut skip_to = 0;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        match normalize_title_line(line) {
            None => continue,
            Some(text) if text == title.text => skip_to = offset,
            Some(_) => break,
        }
    }

    rest.split_off(skip_to)
}

/// ATX heading for a title. A title ending in `#` gets a closing sequence so
/// the `#` is not read as one.
pub fn heading_line(title: &str) -> String {
    if title.ends_with('#') {
        format!("# {title} #")
    } else {
        format!("# {title}")
    }
}

// "# **Title**", "Title #" and "Title" all read as "Title".
fn normalize_title_line(line: &str) -> Option<String> {
    let mut text = trim_line(line)?.to_string();
    loop {
        let next = normalize_once(&text);
        if next == text {
            return trim_line(&text).map(str::to_string);
        }
        text = next;
    }
}

fn normalize_once(text: &str) -> String {
    atx_content(text)
        .trim_matches(['*', '_'])
        .trim()
        .to_string()
}

// Source of a heading without its markers. Setext content lines are joined
// since the title is rendered back as a single ATX line.
fn heading_source(source: &str) -> String {
    let source = source.trim_end();
    match source.rsplit_once('\n') {
        Some((content, _underline)) => content
            .lines()
            .filter_map(trim_line)
            .collect::<Vec<_>>()
            .join(" "),
        None => atx_content(source).to_string(),
    }
}

// "## Title ##" -> "Title". A trailing `#` only closes the heading when a
// space comes before it.
fn atx_content(line: &str) -> &str {
    let text = line.trim().trim_start_matches('#').trim();
    let without_closing = text.trim_end_matches('#');
    if without_closing.len() < text.len()
        && (without_closing.is_empty() || without_closing.ends_with(' '))
    {
        without_closing.trim_end()
    } else {
        text
    }
}

fn line_span(body: &str, range: Range<usize>) -> Range<usize> {
    let start = body[..range.start].rfind('\n').map_or(0, |idx| idx + 1);
    let end = if range.end > start && body[..range.end].ends_with('\n') {
        range.end
    } else {
        body[range.end..]
            .find('\n')
            .map_or(body.len(), |idx| range.end + idx + 1)
    };
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_atx_heading() {
        let body = "Intro line\n\n# The *Rust* Way\n\nBody\n";
        let title = find_heading_title(body).unwrap();
        assert_eq!(title.text, "The Rust Way");
        assert_eq!(title.markdown, "The *Rust* Way");
        assert_eq!(&body[title.span.clone()], "# The *Rust* Way\n");
    }

    #[test]
    fn finds_setext_heading() {
        let body = "Borrowing `Cow`\n===\n\nBody";
        let title = find_heading_title(body).unwrap();
        assert_eq!(title.text, "Borrowing Cow");
        assert_eq!(title.markdown, "Borrowing `Cow`");
        assert_eq!(&body[title.span.clone()], "Borrowing `Cow`\n===\n");

        let title = find_heading_title("Two\nlines\n===\n").unwrap();
        assert_eq!(title.text, "Two lines");
        assert_eq!(title.markdown, "Two lines");
    }

    #[test]
    fn keeps_code_and_escapes_in_heading_markdown() {
        let body = "# Why `<T>` and \\*args matter ##\n\nBody\n";
        let title = find_heading_title(body).unwrap();
        assert_eq!(title.text, "Why <T> and *args matter");
        assert_eq!(title.markdown, "Why `<T>` and \\*args matter");

        let again = format!("{}\n", heading_line(&title.markdown));
        assert_eq!(
            find_heading_title(&again).unwrap(),
            TitleMatch {
                span: 0..again.len(),
                ..title
            }
        );
    }

    #[test]
    fn skips_headings_in_code_and_lower_levels() {
        let body = "```\n# not a title\n```\n\n## Section\n\n# Real Title\n";
        assert_eq!(find_heading_title(body).unwrap().text, "Real Title");
        assert!(find_heading_title("## Only a section\n").is_none());
    }

    #[test]
    fn first_line_convention_strips_markers() {
        let body = "\n\n**Async Rust in Practice**\n\nBody";
        let title = find_first_line_title(body).unwrap();
        assert_eq!(title.text, "Async Rust in Practice");
        assert_eq!(title.markdown, "**Async Rust in Practice**");
        assert_eq!(&body[title.span.clone()], "**Async Rust in Practice**\n");
    }

    #[test]
    fn removes_title_and_repeats() {
        let body = "# Title\n\nTitle\n\n# Title\nFirst paragraph\n\n# Title\n";
        let title = find_heading_title(body).unwrap();
        assert_eq!(remove_title(body, &title), "First paragraph\n\n# Title\n");
    }

    #[test]
    fn removes_only_the_title_line() {
        let body = "Lead\n# Title\nText";
        let title = find_heading_title(body).unwrap();
        assert_eq!(remove_title(body, &title), "Lead\nText");
    }

    #[test]
    fn removes_copy_left_above_the_heading() {
        let body = "Title\n# Title\nText";
        let title = find_heading_title(body).unwrap();
        assert_eq!(remove_title(body, &title), "Text");
    }

    #[test]
    fn heading_line_keeps_trailing_hash() {
        assert_eq!(heading_line("Why C#"), "# Why C# #");
        assert_eq!(heading_line("Plain"), "# Plain");

        let body = format!("{}\n", heading_line("Why C#"));
        assert_eq!(find_heading_title(&body).unwrap().text, "Why C#");
        assert_eq!(find_first_line_title(&body).unwrap().text, "Why C#");
    }

    #[test]
    fn normalized_titles_are_stable() {
        for line in ["_*# a*_", "## Title ##", "**Bold**", "a #", "C#"] {
            let once = normalize_title_line(line).unwrap();
            assert_eq!(normalize_title_line(&once).as_deref(), Some(once.as_str()));
            assert_eq!(normalize_title_line(&heading_line(&once)), Some(once.clone()));
        }
        assert!(normalize_title_line("***").is_none());
    }

    #[test]
    fn dispatches_on_convention() {
        let body = "Plain first line\n\n# Heading\n";
        assert_eq!(
            find_title(body, TitleConvention::Heading).unwrap().text,
            "Heading"
        );
        assert_eq!(
            find_title(body, TitleConvention::FirstLine).unwrap().text,
            "Plain first line"
        );
    }
}
