//! # doxpage
//!
//! Turns a LaTeX-flavoured theory document into a Doxygen page.
//!
//! The whole conversion is blind text substitution: an ordered list of rules is
//! applied to one owned buffer, then the result is wrapped in the `@page`
//! comment block Doxygen expects. Nothing is parsed, and nothing is validated.
//!
//! Layout
//!
//! src/rewrite
//!   ├── rules        The ordered substitution rules
//!   ├── page         The `/** @page ... */` wrapper
//!   ├── transforms   Stage composition and the standard pipeline
//!   └── loader       Reading sources and writing pages

pub mod rewrite;
