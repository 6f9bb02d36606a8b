use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPost {
    pub path: PathBuf,
    /// A post with the same slug already existed and was replaced.
    pub overwritten: bool,
}

pub fn post_path(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(format!("{slug}.md"))
}

pub fn save_post(output_dir: &Path, slug: &str, document: &str) -> Result<SavedPost> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory at {}",
            output_dir.display()
        )
    })?;

    let path = post_path(output_dir, slug);
    let overwritten = path.exists();
    write_atomic(&path, document)
        .with_context(|| format!("Failed to write post at {}", path.display()))?;

    Ok(SavedPost { path, overwritten })
}

/// Writes through a temp file in the same directory and renames it over `path`.
/// A replaced file keeps its permissions; a new one gets the usual 0644
/// instead of the temp file's 0600.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    if let Some(permissions) = target_permissions(path) {
        file.as_file().set_permissions(permissions)?;
    }
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn saves_under_slug_and_creates_directory() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("docs").join("posts");

        let saved = save_post(&output_dir, "rust_traits", "---\ndate: x\n---\n").unwrap();

        assert_eq!(saved.path, output_dir.join("rust_traits.md"));
        assert!(!saved.overwritten);
        assert_eq!(
            fs::read_to_string(&saved.path).unwrap(),
            "---\ndate: x\n---\n"
        );
    }

    #[test]
    fn replaces_existing_post() {
        let dir = tempdir().unwrap();
        save_post(dir.path(), "same", "first").unwrap();
        let saved = save_post(dir.path(), "same", "second").unwrap();

        assert!(saved.overwritten);
        assert_eq!(fs::read_to_string(saved.path).unwrap(), "second");
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        write_atomic(&dir.path().join("topic_history.json"), "[]\n").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let saved = save_post(dir.path(), "rust_traits", "body").unwrap();
        let mode = fs::metadata(&saved.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn rewrites_keep_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("topic_history.json");
        fs::write(&path, "[]\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, "[\"a\"]\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\"a\"]\n");
    }
}
