//! Document loading utilities
//!
//! `DocumentLoader` holds one source text, read in full from a file or taken
//! from a string, and runs transforms over it. [`write_page`] persists a
//! result.
//!
//! Files are read as text: `\r\n` and lone `\r` line ends become `\n` before
//! any rule sees the buffer.
//!
//! # Example
//!
//! ```rust,ignore
//! use doxpage_core::rewrite::{write_page, DocumentLoader};
//!
//! let loader = DocumentLoader::from_path("theorycore.md")?;
//! write_page("../pages/theory.txt", &loader.rewrite()?)?;
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::transforms::standard::THEORY_PAGE;
use super::transforms::{Transform, TransformError};

/// Error that can occur when loading sources or writing pages
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The source could not be read
    #[error("failed to read {}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The destination could not be written
    #[error("failed to write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Source text with transform shortcuts
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Read a whole file as the source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoaderError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let source = normalize_line_endings(source);
        info!(path = %path.display(), bytes = source.len(), "read source");
        Ok(DocumentLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Run a transform on a copy of the source
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Convert the source with the default theory page pipeline
    ///
    /// Shortcut for `.with(&THEORY_PAGE)`.
    pub fn rewrite(&self) -> Result<String, LoaderError> {
        self.with(&THEORY_PAGE)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn normalize_line_endings(source: String) -> String {
    if !source.contains('\r') {
        return source;
    }
    source.replace("\r\n", "\n").replace('\r', "\n")
}

/// Write a page to `path`, replacing whatever was there
///
/// The parent directory must already exist. A write that fails partway may
/// leave a truncated file behind.
pub fn write_page<P: AsRef<Path>>(path: P, page: &str) -> Result<(), LoaderError> {
    let path = path.as_ref();
    fs::write(path, page).map_err(|source| LoaderError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = page.len(), "wrote page");
    Ok(())
}
