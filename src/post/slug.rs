/// Slugs become file names, and most filesystems cap a name at 255 bytes.
pub const MAX_SLUG_BYTES: usize = 200;

const LAST_RESORT_SLUG: &str = "post";

// things that are kept
// Letters and digits, lowercased (any script)
//
// things that are dropped
// Punctuation and symbols, including '_' and '-'
// Leading/trailing whitespace
//
// things that become a single '_'
// Any run of whitespace between kept characters

pub fn slugify(title: &str) -> Option<String> {
    let lower = title.to_lowercase();

    let mut slug = String::with_capacity(lower.len());
    let mut pending_separator = false;

    for ch in lower.chars() {
        if ch.is_whitespace() {
            pending_separator = !slug.is_empty();
            continue;
        }
        if !is_slug_char(ch) {
            continue;
        }
        if pending_separator {
            slug.push('_');
            pending_separator = false;
        }
        slug.push(ch);
    }

    let slug = truncate(slug);
    if slug.is_empty() { None } else { Some(slug) }
}

/// Slug for a title, falling back to the slug of `placeholder` when the title
/// has no usable characters. Never empty.
pub fn slug_for(title: &str, placeholder: &str) -> String {
    slugify(title)
        .or_else(|| slugify(placeholder))
        .unwrap_or_else(|| LAST_RESORT_SLUG.to_string())
}

fn is_slug_char(ch: char) -> bool {
    ch.is_alphanumeric() && !ch.is_uppercase()
}

// Cuts on a char boundary, then on an underscore when one is available so
// words stay whole.
fn truncate(slug: String) -> String {
    if slug.len() <= MAX_SLUG_BYTES {
        return slug;
    }

    let mut cut = MAX_SLUG_BYTES;
    while !slug.is_char_boundary(cut) {
        cut -= 1;
    }

    let head = &slug[..cut];
    let head = match head.rfind('_') {
        Some(idx) if idx > 0 => &head[..idx],
        _ => head,
    };
    head.trim_end_matches('_').to_string()
}
