use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// The scan targets for one run: every source file under the scan roots,
/// with contents loaded up front so checkers never touch the filesystem.
#[derive(Debug, Default)]
pub struct SourceTree {
    pub roots: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    sources: HashMap<PathBuf, String>,
}

impl SourceTree {
    /// Discover all .rs files under the given roots and load their contents.
    pub fn discover(roots: &[PathBuf]) -> Result<Self> {
        let mut files = Vec::new();
        let mut sources = HashMap::new();

        for root in roots {
            for path in rs_files_under(root) {
                let source = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read: {}", path.display()))?;
                sources.insert(path.clone(), source);
                files.push(path);
            }
        }
        files.sort();
        files.dedup();

        Ok(Self {
            roots: roots.to_vec(),
            files,
            sources,
        })
    }

    /// Build a tree from in-memory sources (used by tests).
    pub fn from_sources(roots: Vec<PathBuf>, sources: HashMap<PathBuf, String>) -> Self {
        let mut files: Vec<PathBuf> = sources.keys().cloned().collect();
        files.sort();
        Self {
            roots,
            files,
            sources,
        }
    }

    pub fn source(&self, file: &Path) -> Option<&str> {
        self.sources.get(file).map(|s| s.as_str())
    }

    pub fn sources(&self) -> &HashMap<PathBuf, String> {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Discover all .rs files under a path. A single-file path is returned as is;
/// a directory with a src/ subdirectory is narrowed to it.
fn rs_files_under(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let src_dir = path.join("src");
    let search_dir = if src_dir.exists() { src_dir } else { path.to_path_buf() };

    WalkDir::new(search_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .filter(|e| !e.path().to_string_lossy().contains("/target/"))
        .map(|e| e.path().to_path_buf())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sources_sorts_files() {
        let mut sources = HashMap::new();
        sources.insert(PathBuf::from("b.rs"), String::from("fn b() {}"));
        sources.insert(PathBuf::from("a.rs"), String::from("fn a() {}"));
        let tree = SourceTree::from_sources(vec![PathBuf::from(".")], sources);
        assert_eq!(tree.files, vec![PathBuf::from("a.rs"), PathBuf::from("b.rs")]);
        assert_eq!(tree.source(Path::new("a.rs")), Some("fn a() {}"));
    }
}
