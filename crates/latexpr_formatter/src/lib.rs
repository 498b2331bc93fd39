//! Document-side helpers for `latexpr_ast` trees.
//!
//! Keeps LaTeX macro generation out of the core crate so callers that
//! only evaluate expressions do not pull in presentation concerns.

pub mod latex;

pub use latex::{to_latex_variable, LatexCommand, Part, ToLatexVariable};
