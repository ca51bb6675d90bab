//! Score-file discovery.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions recognized as score files, compared case-insensitively.
const SCORE_EXTENSIONS: [&str; 2] = ["mid", "midi"];

/// Collect score files under `root`, depth-first, stopping at `max_files`.
///
/// The order is the traversal order of the filesystem walk; callers should
/// not rely on it being stable across runs unless the filesystem guarantees
/// directory-entry ordering.
pub fn collect_score_files(root: impl AsRef<Path>, max_files: usize) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(root.as_ref(), max_files, &mut files)?;
    debug!(count = files.len(), "collected score files");
    Ok(files)
}

fn walk(dir: &Path, max_files: usize, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        if files.len() >= max_files {
            return Ok(());
        }
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, max_files, files)?;
        } else if is_score_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_score_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SCORE_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.mid"), b"x").unwrap();
        fs::write(dir.path().join("b.MIDI"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join("sub/c.midi"), b"x").unwrap();

        let files = collect_score_files(dir.path(), 100).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|p| is_score_file(p)));
    }

    #[test]
    fn test_collect_stops_at_max_files() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..10 {
            fs::write(dir.path().join(format!("{i}.mid")), b"x").unwrap();
        }
        let files = collect_score_files(dir.path(), 4).unwrap();
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_collect_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_score_files(dir.path(), 10).unwrap().is_empty());
    }
}
