//! Error types for figura
//!
//! Authoring errors carry source spans so an input form can point at the exact
//! character that went wrong. Runtime evaluation errors are cheap: the sampler
//! produces hundreds of them per curve and turns each one into a path break.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (field name or "<expression>")
    pub name: String,
    /// The full expression text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Authoring Errors
// ============================================================================

/// Errors reported when an expression is entered or compiled
#[derive(Error, Diagnostic, Debug)]
pub enum ExprError {
    #[error("expression is empty")]
    #[diagnostic(
        code(figura::expr::empty),
        help("enter a function of x, for example `x^2 - 1`")
    )]
    Empty,

    #[error("syntax error")]
    #[diagnostic(code(figura::expr::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected {expected}")]
        span: SourceSpan,
        expected: String,
    },

    #[error("unknown name: {name}")]
    #[diagnostic(code(figura::expr::unknown_identifier))]
    UnknownIdentifier {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a variable or constant")]
        span: SourceSpan,
        #[help]
        suggestion: Option<String>,
    },

    #[error("unknown function: {name}")]
    #[diagnostic(code(figura::expr::unknown_function))]
    UnknownFunction {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("no such function")]
        span: SourceSpan,
        #[help]
        suggestion: Option<String>,
    },

    #[error("{function} takes {expected}, got {found}")]
    #[diagnostic(code(figura::expr::arity))]
    Arity {
        function: &'static str,
        expected: String,
        found: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("wrong number of arguments")]
        span: SourceSpan,
    },

    #[error("{name} is not a function")]
    #[diagnostic(
        code(figura::expr::not_a_function),
        help("write `{name} * (...)` to multiply")
    )]
    NotAFunction {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("called here")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(figura::expr::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a finite number")]
        span: SourceSpan,
    },
}

// ============================================================================
// Evaluation Errors
// ============================================================================

/// Errors produced while evaluating an expression at a single point
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The real-valued result does not exist (e.g. `sqrt(-1)`)
    #[error("{function} has no real value here")]
    #[diagnostic(code(figura::eval::complex))]
    Complex { function: &'static str },

    /// The arguments are outside the function's domain
    #[error("{function} is undefined for these arguments")]
    #[diagnostic(code(figura::eval::domain))]
    Domain { function: &'static str },

    /// A custom evaluator failed
    #[error("{message}")]
    #[diagnostic(code(figura::eval::failed))]
    Failed { message: String },
}

impl EvalError {
    /// Build a `Failed` error from any message
    pub fn failed(message: impl Into<String>) -> Self {
        EvalError::Failed {
            message: message.into(),
        }
    }
}
