//! Filesystem helpers for tooling around the compiler.
//!
//! The compiler itself is pure and does no I/O; these helpers exist for the
//! CLI and for tests that work with article files on disk.

use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("article not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid articles directory: {0}")]
    InvalidArticlesDir(String),
}

/// Read an article body, resolved against the articles root.
pub fn read_article(relative_path: &RelativePath, articles_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(articles_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan for article files (`.md`) under the articles root, sorted.
pub fn scan_articles(articles_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !articles_root.is_dir() {
        return Err(IoError::InvalidArticlesDir(
            articles_root.display().to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(articles_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir).map_err(IoError::Io)? {
        let path = entry.map_err(IoError::Io)?.path();
        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }
    Ok(())
}
