//! Transform pipeline infrastructure
//!
//! A page conversion is a chain of stages that each take the whole buffer and
//! hand back a new one. The chain is built from two pieces:
//!
//! ## The `Runnable` Trait
//!
//! Anything that turns an `I` into an `O`. Rule sets and the page wrapper are
//! both `Runnable<String, String>`:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, TransformError>;
//! }
//! ```
//!
//! ## The `Transform<I, O>` Type
//!
//! A boxed chain of stages. `.then()` appends a stage, and the compiler checks
//! that each stage accepts what the previous one produced:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(rules)                 // String → String
//!     .then(PageWrapper::theory()); // String → String
//! let page = pipeline.run(source)?;
//! ```
//!
//! The default pipeline lives in [`standard`] as a lazily built static.

pub mod standard;

use thiserror::Error;

/// Error that can occur while building or running a transform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A pattern rule did not compile
    #[error("rule '{rule}' has an invalid pattern: {message}")]
    InvalidPattern { rule: String, message: String },
}

/// Trait for anything that can transform an input to an output
///
/// Implemented by the individual stages; [`Transform`] composes them.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline
///
/// `Transform<I, O>` represents a transformation from type `I` to type `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Append a stage, returning a transform with the stage's output type
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
