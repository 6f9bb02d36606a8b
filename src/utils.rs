pub fn trim_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    pluralize_with(word, count, |n| n.to_string())
}

pub fn pluralize_with<F>(word: &str, count: usize, format_count: F) -> String
where
    F: Fn(usize) -> String,
{
    let count_str = format_count(count);

    if count == 1 {
        format!("{count_str} {word}")
    } else {
        format!("{count_str} {word}s")
    }
}

pub fn strip_controls_and_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // ANSI escape sequence (ESC … letter)
            '\x1b' => {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }

            c if c.is_control() => {}

            c => out.push(c),
        }
    }

    out.trim().to_string()
}

/// Strips a UTF-8 byte order mark, which some editors write at the start of JSON files.
pub fn strip_bom(contents: &str) -> &str {
    contents.strip_prefix('\u{feff}').unwrap_or(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_controls_and_escapes() {
        let input = "\x1b[1mHello\x1b[0m";
        let expected = "Hello";
        assert_eq!(strip_controls_and_escapes(input), expected);
        assert_eq!(strip_controls_and_escapes("sk-abc\r\n"), "sk-abc");
    }

    #[test]
    fn test_trim_line() {
        assert_eq!(trim_line("  title  "), Some("title"));
        assert_eq!(trim_line(" \t "), None);
    }

    #[test]
    fn test_pluralize_single() {
        assert_eq!(pluralize("post", 1), "1 post");
        assert_eq!(pluralize("history entry", 1), "1 history entry");
    }

    #[test]
    fn test_pluralize_multiple() {
        assert_eq!(pluralize("post", 2), "2 posts");
        assert_eq!(pluralize("slug", 5), "5 slugs");
    }

    #[test]
    fn test_pluralize_zero() {
        assert_eq!(pluralize("slug", 0), "0 slugs");
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}[\"a\"]"), "[\"a\"]");
        assert_eq!(strip_bom("[]"), "[]");
    }
}
