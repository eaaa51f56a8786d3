use std::path::{Component, Path, PathBuf};

use crate::error::{AppError, Result};

/// Derive a filesystem-safe filename from an article topic.
///
/// Lowercases, turns spaces into hyphens, drops anything that is not
/// alphanumeric or a hyphen, then appends `.{extension}`.
pub fn derive_filename(topic: &str, extension: &str) -> String {
    let stem: String = topic
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();
    format!("{stem}.{extension}")
}

/// A filename must be one plain path component so it stays inside the output directory.
pub fn validate_filename(filename: &str) -> Result<()> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == filename => Ok(()),
        _ => Err(AppError::Persist(format!(
            "invalid output filename {filename:?}: must be a plain file name"
        ))),
    }
}

/// Write `content` to `dir/filename`, creating `dir` and replacing any existing file.
pub async fn persist(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    validate_filename(filename)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Persist(format!("Failed to create {}: {e}", dir.display())))?;

    let path = dir.join(filename);
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| AppError::Persist(format!("Failed to write {}: {e}", path.display())))?;

    Ok(path)
}
