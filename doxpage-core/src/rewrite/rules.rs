//! Substitution rules
//!
//! A [`Rule`] pairs a matcher with a replacement. A [`RuleSet`] applies its rules
//! one after another to the whole buffer, and each rule sees the output of the
//! previous one. Order matters:
//!
//! 1. `@` becomes `\cite `
//! 2. `\bm` becomes `\boldsymbol`
//! 3. `$$\begin{aligned}` becomes `\f{eqnarray*}{`
//! 4. `\end{aligned}$$` becomes `\f}`
//! 5. `$$` with only whitespace or `$` up to a line end becomes `\f]`
//! 6. `$$` before the first non-space character becomes `\f[`
//! 7. every remaining `$` becomes `\f$`
//!
//! Rules 3 and 4 have to run before 5 and 6, which would otherwise eat the
//! `$$` of an aligned block. Rule 7 is the fallback and runs last.
//!
//! Whitespace in rules 5 and 6 is Unicode `\s` plus the separators
//! `\x1C`..`\x1F`, the set Python's `str.isspace` accepts.

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::transforms::{Runnable, TransformError};

/// How the `\bm` macro is rewritten
///
/// `\bm` is replaced as a bare substring by default, which also hits longer
/// macros that happen to start with it (`\bmod` turns into `\boldsymbolod`).
/// `BraceOnly` limits the rewrite to `\bm{`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoldMacro {
    #[default]
    Substring,
    BraceOnly,
}

/// What a rule looks for
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact text, replaced verbatim
    Literal(String),
    /// Regular expression; the replacement may use `${name}` back-references
    Pattern(Regex),
}

/// A single substitution applied to the whole buffer
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    description: &'static str,
    matcher: Matcher,
    replacement: String,
}

impl Rule {
    /// A rule that replaces every occurrence of `needle` with `replacement`
    pub fn literal(
        name: &'static str,
        description: &'static str,
        needle: &str,
        replacement: &str,
    ) -> Self {
        Rule {
            name,
            description,
            matcher: Matcher::Literal(needle.to_string()),
            replacement: replacement.to_string(),
        }
    }

    /// A rule that replaces every match of `pattern` with the expanded `template`
    pub fn pattern(
        name: &'static str,
        description: &'static str,
        pattern: &str,
        template: &str,
    ) -> Result<Self, TransformError> {
        let regex = Regex::new(pattern).map_err(|e| TransformError::InvalidPattern {
            rule: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Rule {
            name,
            description,
            matcher: Matcher::Pattern(regex),
            replacement: template.to_string(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Apply this rule to `text`, returning the rewritten buffer
    pub fn apply(&self, text: String) -> String {
        let (rewritten, replacements) = match &self.matcher {
            Matcher::Literal(needle) => {
                let count = text.matches(needle.as_str()).count();
                if count == 0 {
                    (text, 0)
                } else {
                    (text.replace(needle.as_str(), &self.replacement), count)
                }
            }
            Matcher::Pattern(regex) => {
                let count = regex.find_iter(&text).count();
                if count == 0 {
                    (text, 0)
                } else {
                    let replaced = regex.replace_all(&text, self.replacement.as_str());
                    (replaced.into_owned(), count)
                }
            }
        };
        debug!(rule = self.name, replacements, "applied rule");
        rewritten
    }
}

impl Runnable<String, String> for Rule {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(self.apply(input))
    }
}

/// An ordered list of rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }

    /// The seven math and citation rules, in the order they must run
    pub fn theory(bold: BoldMacro) -> Result<Self, TransformError> {
        let bold_rule = match bold {
            BoldMacro::Substring => Rule::literal(
                "bold-math",
                r"`\bm` becomes `\boldsymbol`",
                r"\bm",
                r"\boldsymbol",
            ),
            BoldMacro::BraceOnly => Rule::literal(
                "bold-math",
                r"`\bm{` becomes `\boldsymbol{`",
                r"\bm{",
                r"\boldsymbol{",
            ),
        };

        Ok(RuleSet::new(vec![
            Rule::literal("citation", r"`@` becomes `\cite `", "@", r"\cite "),
            bold_rule,
            Rule::literal(
                "aligned-open",
                r"`$$\begin{aligned}` becomes `\f{eqnarray*}{`",
                r"$$\begin{aligned}",
                r"\f{eqnarray*}{",
            ),
            Rule::literal(
                "aligned-close",
                r"`\end{aligned}$$` becomes `\f}`",
                r"\end{aligned}$$",
                r"\f}",
            ),
            Rule::pattern(
                "display-math-close",
                r"`$$` trailed only by whitespace or `$` up to a line end becomes `\f]`",
                r"\$\$[\s\x1C-\x1F$]*\n",
                "\\f]\n",
            )?,
            Rule::pattern(
                "display-math-open",
                r"`$$` (after optional `$ ` pairs) becomes `\f[` glued to the next non-space character",
                r"(?:\$[\s\x1C-\x1F])*\$\$[\s\x1C-\x1F]*(?P<first_letter>[^\s\x1C-\x1F])",
                r"\f[${first_letter}",
            )?,
            Rule::literal("inline-math", r"every remaining `$` becomes `\f$`", "$", r"\f$"),
        ]))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order
    pub fn apply(&self, text: String) -> String {
        self.rules.iter().fold(text, |text, rule| rule.apply(text))
    }
}

impl Runnable<String, String> for RuleSet {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(self.apply(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::transforms::Transform;

    fn theory_rule(name: &str) -> Rule {
        RuleSet::theory(BoldMacro::Substring)
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    fn apply(name: &str, text: &str) -> String {
        theory_rule(name).apply(text.to_string())
    }

    #[test]
    fn test_rule_order() {
        let rules = RuleSet::theory(BoldMacro::Substring).unwrap();
        let names: Vec<_> = rules.rules().iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec![
                "citation",
                "bold-math",
                "aligned-open",
                "aligned-close",
                "display-math-close",
                "display-math-open",
                "inline-math",
            ]
        );
        assert_eq!(rules.len(), 7);
    }

    #[test]
    fn test_citation() {
        assert_eq!(apply("citation", "@cite1"), r"\cite cite1");
        assert_eq!(apply("citation", "see @a and @b"), r"see \cite a and \cite b");
    }

    #[test]
    fn test_bold_math_substring() {
        assert_eq!(apply("bold-math", r"\bm{x}"), r"\boldsymbol{x}");
        // Bare substring replacement also rewrites longer macros
        assert_eq!(apply("bold-math", r"a \bmod b"), r"a \boldsymbolod b");
    }

    #[test]
    fn test_bold_math_brace_only() {
        let rules = RuleSet::theory(BoldMacro::BraceOnly).unwrap();
        let rule = rules.get("bold-math").unwrap();
        assert_eq!(rule.apply(r"\bm{x}".to_string()), r"\boldsymbol{x}");
        assert_eq!(rule.apply(r"a \bmod b".to_string()), r"a \bmod b");
        assert_eq!(rule.apply(r"\bm x".to_string()), r"\bm x");
    }

    #[test]
    fn test_aligned_markers() {
        let opened = apply("aligned-open", r"$$\begin{aligned} a &= b \end{aligned}$$");
        assert_eq!(opened, r"\f{eqnarray*}{ a &= b \end{aligned}$$");
        assert_eq!(apply("aligned-close", &opened), r"\f{eqnarray*}{ a &= b \f}");
    }

    #[test]
    fn test_display_close_only_at_line_end() {
        assert_eq!(apply("display-math-close", "$$ x + y $$\n"), "$$ x + y \\f]\n");
        assert_eq!(apply("display-math-close", "y $$ $ \t\n"), "y \\f]\n");
        // No line end after the marker: nothing to close
        assert_eq!(apply("display-math-close", "x $$"), "x $$");
    }

    #[test]
    fn test_display_close_swallows_blank_lines() {
        assert_eq!(apply("display-math-close", "$$\n\n\nNext"), "\\f]\nNext");
    }

    #[test]
    fn test_display_open_captures_first_character() {
        assert_eq!(apply("display-math-open", "$$ x + y"), r"\f[x + y");
        assert_eq!(apply("display-math-open", "$$\n\\frac{a}{b}"), r"\f[\frac{a}{b}");
        assert_eq!(apply("display-math-open", "$ $ $$y"), r"\f[y");
    }

    #[test]
    fn test_information_separators_count_as_whitespace() {
        assert_eq!(apply("display-math-open", "x\x1c$$\x1cy"), "x\x1c\\f[y");
        assert_eq!(apply("display-math-open", "$\x1d$$z"), r"\f[z");
        assert_eq!(apply("display-math-close", "a $$\x1f\n"), "a \\f]\n");
    }

    #[test]
    fn test_single_rule_as_stage() {
        let pipeline = Transform::from_fn(Ok)
            .then(theory_rule("citation"))
            .then(theory_rule("inline-math"));
        assert_eq!(
            pipeline.run("@ref $x$".to_string()).unwrap(),
            r"\cite ref \f$x\f$"
        );
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(apply("inline-math", "$a=b$"), r"\f$a=b\f$");
    }

    #[test]
    fn test_rules_leave_unrelated_text_alone() {
        let rules = RuleSet::theory(BoldMacro::Substring).unwrap();
        let text = "Plain prose, with {braces} and \\emph{macros}.\n";
        assert_eq!(rules.apply(text.to_string()), text);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::pattern("unclosed", "", "(", "").unwrap_err();
        match err {
            TransformError::InvalidPattern { rule, .. } => assert_eq!(rule, "unclosed"),
        }
    }

    #[test]
    fn test_empty_rule_set_is_identity() {
        let rules = RuleSet::default();
        assert!(rules.is_empty());
        assert_eq!(rules.run("$@".to_string()).unwrap(), "$@");
    }
}
