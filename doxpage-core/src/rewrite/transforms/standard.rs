//! Standard transform definitions
//!
//! The default pipeline is built once and shared as a static. Callers with
//! non-default options build their own through [`build`].

use once_cell::sync::Lazy;

use crate::rewrite::page::{PageWrapper, DEFAULT_TITLE};
use crate::rewrite::rules::{BoldMacro, RuleSet};
use crate::rewrite::transforms::{Transform, TransformError};

/// Type alias for a full page conversion
pub type PageTransform = Transform<String, String>;

/// Knobs for building a page pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Title written into the `@page` header
    pub title: String,
    /// How `\bm` is rewritten
    pub bold_macro: BoldMacro,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            title: DEFAULT_TITLE.to_string(),
            bold_macro: BoldMacro::default(),
        }
    }
}

/// Build the page pipeline: the theory rules followed by the page wrapper
pub fn build(options: &RewriteOptions) -> Result<PageTransform, TransformError> {
    let rules = RuleSet::theory(options.bold_macro)?;
    Ok(Transform::from_fn(Ok)
        .then(rules)
        .then(PageWrapper::new(options.title.clone())))
}

/// The default theory page pipeline: String → String
///
/// 1. The seven substitution rules
/// 2. The `/** @page "Theory"` wrapper
pub static THEORY_PAGE: Lazy<PageTransform> =
    Lazy::new(|| build(&RewriteOptions::default()).expect("built-in rules compile"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline() {
        let page = THEORY_PAGE.run("$a=b$".to_string()).unwrap();
        assert_eq!(page, "/** @page \"Theory\"\n\n\\f$a=b\\f$\n*/\n");
    }

    #[test]
    fn test_built_pipeline_uses_options() {
        let options = RewriteOptions {
            title: "Notes".to_string(),
            bold_macro: BoldMacro::BraceOnly,
        };
        let page = build(&options)
            .unwrap()
            .run(r"\bmod \bm{v}".to_string())
            .unwrap();
        assert_eq!(page, "/** @page \"Notes\"\n\n\\bmod \\boldsymbol{v}\n*/\n");
    }
}
