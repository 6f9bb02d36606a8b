pub mod fence;
pub mod frontmatter;
pub mod sanitize;
pub mod slug;
pub mod title;

pub use frontmatter::{Frontmatter, split_frontmatter};
pub use sanitize::{SanitizedPost, sanitize};
pub use slug::{slug_for, slugify};
