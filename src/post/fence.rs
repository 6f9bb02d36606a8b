use crate::utils::trim_line;

// Info strings that mark a fence as a wrapper around the whole response
// rather than a code block inside the post.
const WRAPPER_INFO: [&str; 3] = ["", "markdown", "md"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    marker: char,
    len: usize,
    info: String,
}

impl Fence {
    pub fn is_bare(&self) -> bool {
        self.info.is_empty()
    }

    fn closes(&self, opening: &Fence) -> bool {
        self.is_bare() && self.marker == opening.marker && self.len >= opening.len
    }

    fn is_wrapper(&self) -> bool {
        WRAPPER_INFO
            .iter()
            .any(|info| self.info.eq_ignore_ascii_case(info))
    }
}

pub fn parse_fence(line: &str) -> Option<Fence> {
    let trimmed = line.trim_start();
    if line.len() - trimmed.len() > 3 {
        return None;
    }

    let marker = trimmed.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }

    let len = trimmed.chars().take_while(|&c| c == marker).count();
    if len < 3 {
        return None;
    }

    let info = trimmed[len..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }

    Some(Fence {
        marker,
        len,
        info: info.to_string(),
    })
}

/// Removes code-fence lines that do not belong to a code block in the post:
/// a fence pair wrapping the whole text, a leading ```` ```markdown ```` opener,
/// and any opener that is never closed. Runs until nothing changes.
pub fn strip_stray_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();

    loop {
        let before = lines.len();
        drop_wrapper(&mut lines);
        drop_unmatched(&mut lines);
        if lines.len() == before {
            break;
        }
    }

    lines.join("\n")
}

fn drop_wrapper(lines: &mut Vec<&str>) {
    let Some(first) = lines.iter().position(|line| trim_line(line).is_some()) else {
        return;
    };
    let Some(opening) = parse_fence(lines[first]) else {
        return;
    };

    let pairs = fence_pairs(lines).0;
    let last = lines
        .iter()
        .rposition(|line| trim_line(line).is_some())
        .unwrap_or(first);

    if opening.is_wrapper() && pairs.contains(&(first, last))
        || wraps_nested_blocks(lines, &opening, first, last)
    {
        lines.remove(last);
        lines.remove(first);
    } else if !opening.is_bare() && opening.is_wrapper() {
        // ```markdown never opens a real code block at the top of a post
        lines.remove(first);
    }
}

// A bare fence on the first and last line whose interior holds complete
// code blocks with info strings. Pairing from the top would close the outer
// fence on the first inner block, so the interior is paired on its own.
// Bare-only interiors stay ambiguous and are left alone.
fn wraps_nested_blocks(lines: &[&str], opening: &Fence, first: usize, last: usize) -> bool {
    if !opening.is_bare() || last <= first + 1 {
        return false;
    }
    let Some(closing) = parse_fence(lines[last]) else {
        return false;
    };
    if !closing.closes(opening) {
        return false;
    }

    let interior = &lines[first + 1..last];
    let (_, unmatched) = fence_pairs(interior);
    unmatched.is_none()
        && interior
            .iter()
            .filter_map(|line| parse_fence(line))
            .any(|fence| !fence.is_bare())
}

fn drop_unmatched(lines: &mut Vec<&str>) {
    if let (_, Some(unmatched)) = fence_pairs(lines) {
        lines.remove(unmatched);
    }
}

/// Pairs opening and closing fences. Returns the pairs and the index of an
/// opener left open at the end of the text, if any.
fn fence_pairs(lines: &[&str]) -> (Vec<(usize, usize)>, Option<usize>) {
    let mut pairs = Vec::new();
    let mut open: Option<(usize, Fence)> = None;

    for (idx, line) in lines.iter().enumerate() {
        let Some(fence) = parse_fence(line) else {
            continue;
        };

        match &open {
            Some((start, opening)) if fence.closes(opening) => {
                pairs.push((*start, idx));
                open = None;
            }
            Some(_) => {}
            None => open = Some((idx, fence)),
        }
    }

    (pairs, open.map(|(idx, _)| idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backtick_and_tilde_fences() {
        let fence = parse_fence("```rust").unwrap();
        assert_eq!(fence.info, "rust");
        assert!(parse_fence("~~~~").unwrap().is_bare());
        assert!(parse_fence("``not a fence").is_none());
        assert!(parse_fence("    ```").is_none());
        assert!(parse_fence("``` a`b").is_none());
    }

    #[test]
    fn strips_markdown_wrapper() {
        let text = "```markdown\n# Title\n\nBody\n```";
        assert_eq!(strip_stray_fences(text), "# Title\n\nBody");
    }

    #[test]
    fn strips_markdown_wrapper_around_inner_code_block() {
        let text = "```markdown\n# Title\n```rust\nfn main() {}\n```\nMore\n```";
        assert_eq!(
            strip_stray_fences(text),
            "# Title\n```rust\nfn main() {}\n```\nMore"
        );
    }

    #[test]
    fn strips_plain_wrapper_around_post_with_code() {
        let text = "```\n# Tokio Tips\n\n```rust\nlet x = 1;\n```\n\nEnd\n```";
        assert_eq!(
            strip_stray_fences(text),
            "# Tokio Tips\n\n```rust\nlet x = 1;\n```\n\nEnd"
        );

        let text = "\n~~~\n---\ndate: x\n---\n```sh\nls\n```\n~~~\n";
        assert_eq!(
            strip_stray_fences(text),
            "\n---\ndate: x\n---\n```sh\nls\n```"
        );
    }

    #[test]
    fn strips_unclosed_opener() {
        let text = "```md\n# Title\nBody";
        assert_eq!(strip_stray_fences(text), "# Title\nBody");

        let text = "# Title\nBody\n```";
        assert_eq!(strip_stray_fences(text), "# Title\nBody");
    }

    #[test]
    fn keeps_balanced_code_blocks() {
        let text = "# Title\n\n```python\nprint(1)\n```\n\nDone";
        assert_eq!(strip_stray_fences(text), text);
    }

    #[test]
    fn keeps_two_separate_blocks_at_edges() {
        let text = "```\na\n```\ntext\n```\nb\n```";
        assert_eq!(strip_stray_fences(text), text);
    }

    #[test]
    fn reaches_a_fixpoint() {
        let text = "```\n```rust\ncode";
        let once = strip_stray_fences(text);
        assert_eq!(strip_stray_fences(&once), once);
        assert_eq!(once, "code");
    }
}
