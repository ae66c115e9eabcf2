//! Doxygen page wrapper
//!
//! Doxygen only picks up text that sits inside a comment block, and a block that
//! starts with `@page` becomes a standalone page. The wrapper runs after every
//! rule, so the `@` of its own header is never turned into a citation.

use super::transforms::{Runnable, TransformError};

/// Title used when none is configured
pub const DEFAULT_TITLE: &str = "Theory";

/// Wraps a rewritten buffer in `/** @page "<title>"` ... `*/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWrapper {
    title: String,
}

impl PageWrapper {
    pub fn new(title: impl Into<String>) -> Self {
        PageWrapper {
            title: title.into(),
        }
    }

    /// The wrapper for the theory page
    pub fn theory() -> Self {
        PageWrapper::new(DEFAULT_TITLE)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn header(&self) -> String {
        format!("/** @page \"{}\"\n\n", self.title)
    }

    pub fn footer(&self) -> &'static str {
        "\n*/\n"
    }

    pub fn wrap(&self, body: &str) -> String {
        let header = self.header();
        let footer = self.footer();
        let mut page = String::with_capacity(header.len() + body.len() + footer.len());
        page.push_str(&header);
        page.push_str(body);
        page.push_str(footer);
        page
    }
}

impl Default for PageWrapper {
    fn default() -> Self {
        PageWrapper::theory()
    }
}

impl Runnable<String, String> for PageWrapper {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(self.wrap(&input))
    }
}
