//! Geometry and reveal-state core for step-by-step math diagrams.
//!
//! The crate turns mathematical descriptions into pixel-space geometry:
//! - [`geometry::mapper`] maps data coordinates onto a padded viewport
//! - [`geometry::sampler`] samples `y = f(x)` into polylines that break at
//!   asymptotes, holes and complex values
//! - [`geometry::arc`] draws angle marks under the short-arc policy
//! - [`geometry::tree`] lays out n-ary trees by leaf weight
//! - [`geometry::collision`] finds and staggers overlapping labels
//! - [`steps`] tracks which steps of an explanation are revealed
//!
//! Rendering itself (markup, colors, text) belongs to the caller; the core only
//! threads a [`config::RenderConfig`] through.

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "expr.pest"]
pub struct ExprParser;

pub mod ast;
pub mod config;
pub mod diagram;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod parse;
pub mod steps;
pub mod types;

pub use config::{Locale, RenderConfig, Theme};
pub use diagram::{Diagram, DiagramKind, StepPlan};
pub use errors::{EvalError, ExprError, SourceContext};
pub use geometry::{CompiledExpr, Evaluator, PathSegment, PlotMapper};
pub use steps::{StepController, StepId, StepIndicator};
pub use types::{Angle, NumericError, Padding, Range, SamplePoint, Viewport};

/// Compile an expression in `x`.
pub fn compile(source: &str) -> Result<CompiledExpr, ExprError> {
    compile_in(source, geometry::defaults::VARIABLE)
}

/// Compile an expression written in terms of `variable`.
pub fn compile_in(source: &str, variable: &str) -> Result<CompiledExpr, ExprError> {
    let ctx = SourceContext::new("expression", source);
    let ast = parse::parse(&ctx, variable)?;
    Ok(CompiledExpr::new(source, variable, ast))
}

/// Check an expression typed into an authoring form.
///
/// The error is a [`miette::Diagnostic`] pointing at the offending span, with a
/// suggestion when a name is close to a known one.
pub fn validate_expression(source: &str) -> Result<CompiledExpr, ExprError> {
    compile(source)
}
