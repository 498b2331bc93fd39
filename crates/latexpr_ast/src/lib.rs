//! Symbolic expression trees that render themselves to LaTeX.
//!
//! Expressions are built from shared [`Variable`] handles, operator
//! nodes from the built-in catalog (or registered custom operators) and
//! named [`Expression`] wrappers. Every tree renders in two modes:
//! symbolically (variable names and operator glyphs) or substituted
//! (current numeric values), and evaluates numerically on demand.
//!
//! ```
//! use latexpr_ast::{mul, Expression, Variable};
//!
//! # fn main() -> latexpr_ast::Result<()> {
//! let r = Variable::new("r", 3.0, "m");
//! let f = Variable::new("F", 4.0, "kN");
//! let m = Expression::new("M", mul(vec![(&r).into(), (&f).into()])?, "kNm");
//! assert_eq!(
//!     m.to_string(),
//!     r"M = {r} \cdot {F} = 3 \cdot 4 = 12 \ \mathrm{kNm}"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Changing a variable's value is visible to every tree that references
//! it; nothing is cached. Variables created with [`Variable::symbolic`]
//! have no value yet, keeping their trees in symbolic form until one is
//! set.

pub mod catalog;
pub mod consts;
pub mod error;
pub mod expression;
pub mod node;
pub mod numfmt;
pub mod operation;
mod ops;
pub mod variable;

pub use catalog::{
    a_brackets, absolute, acos, add, asin, atan, brackets, c_brackets, cos, cosh, div, div2, exp,
    ln, log, log10, lookup, maximum, minimum, minus, mul, neg, plus, pos, power, r_brackets, raw,
    register_operator, root, s_brackets, sin, sinh, sqr, sqrt, sub, sum_elements, tan, tanh, times,
    Arity, DomainIssue, EvalFn, Notation, OpDef,
};
pub use error::{LatexExprError, Result};
pub use expression::Expression;
pub use node::{Node, RenderMode};
pub use numfmt::{Format, Style};
pub use operation::Operation;
pub use variable::Variable;
