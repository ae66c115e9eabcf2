//! Rewriting LaTeX-style math and citations into Doxygen markup

pub mod loader;
pub mod page;
pub mod rules;
pub mod transforms;

pub use loader::{write_page, DocumentLoader, LoaderError};
pub use page::PageWrapper;
pub use rules::{BoldMacro, Matcher, Rule, RuleSet};
pub use transforms::standard::{RewriteOptions, THEORY_PAGE};
pub use transforms::{Runnable, Transform, TransformError};

/// Rewrite `source` with the default pipeline.
///
/// Shortcut for `THEORY_PAGE.run(source)`.
pub fn rewrite(source: impl Into<String>) -> Result<String, TransformError> {
    THEORY_PAGE.run(source.into())
}
