//! Page files on disk.
//!
//! A page is a `.md` file under the pages directory holding one block per
//! line. Titles map to paths relative to that directory, so `Projects/Ideas`
//! lives at `Projects/Ideas.md`.

use relative_path::{Component, RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::Document;
use crate::markup::MarkupConverter;

pub const PAGE_EXTENSION: &str = "md";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Page not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid pages directory: {0}")]
    InvalidPagesDir(String),
    #[error("Invalid page title: {0:?}")]
    InvalidTitle(String),
}

/// Relative path of the page called `title`.
pub fn page_path(title: &str) -> Result<RelativePathBuf, IoError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(IoError::InvalidTitle(title.to_string()));
    }
    let path = RelativePathBuf::from(format!("{trimmed}.{PAGE_EXTENSION}"));
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes || trimmed.starts_with('/') {
        return Err(IoError::InvalidTitle(title.to_string()));
    }
    Ok(path)
}

/// Read a page file and return its content
pub fn read_page(relative_path: &RelativePath, pages_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(pages_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a page file, creating parent directories as needed
pub fn write_page(
    relative_path: &RelativePath,
    pages_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(pages_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Loads the page called `title`; a page that does not exist yet is empty.
pub fn load_document<M: MarkupConverter + ?Sized>(
    title: &str,
    pages_root: &Path,
    markup: &M,
) -> Result<Document, IoError> {
    let relative_path = page_path(title)?;
    match read_page(&relative_path, pages_root) {
        Ok(content) => {
            log::info!("Loaded page {title:?} from {relative_path}");
            Ok(Document::from_source(&content, markup))
        }
        Err(IoError::NotFound(path)) => {
            log::info!("Page {title:?} not found at {}, starting empty", path.display());
            Ok(Document::from_source("", markup))
        }
        Err(e) => Err(e),
    }
}

/// Saves `document` as the page called `title`, one block per line.
pub fn save_document<M: MarkupConverter + ?Sized>(
    title: &str,
    pages_root: &Path,
    document: &Document,
    markup: &M,
) -> Result<(), IoError> {
    let relative_path = page_path(title)?;
    let mut content = document.to_source(markup);
    content.push('\n');
    write_page(&relative_path, pages_root, &content)?;
    log::debug!("Saved page {title:?} ({} blocks)", document.len());
    Ok(())
}

pub fn validate_pages_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidPagesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
