//! Error types for expression construction, evaluation and rendering.

use thiserror::Error;

/// Errors raised while building, evaluating or rendering expression trees.
///
/// There are no retries and no partial results: any node failing to
/// evaluate or render fails the whole containing expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatexExprError {
    /// Operand count does not satisfy the operator's arity constraint.
    #[error("operator '{op}' expects {expected} operand(s), got {actual}")]
    Arity {
        op: String,
        expected: String,
        actual: usize,
    },

    /// Evaluation-time invalid input to a mathematical function.
    ///
    /// `operand` carries the rendered symbolic form of the offending
    /// operand, e.g. `{x}` for a negative square root argument.
    #[error("domain error in '{op}': {reason} (operand {operand})")]
    Domain {
        op: String,
        operand: String,
        reason: String,
    },

    /// Operator tag not present in the catalog.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Numeric result requested from a tree containing a value-less
    /// (symbolic) variable.
    #[error("unknown result of symbolic variable '{name}'")]
    SymbolicValue { name: String },

    /// Attempt to register a custom operator under a tag that is already
    /// taken, by a built-in or by an earlier registration.
    #[error("operator '{0}' is already registered")]
    DuplicateOperator(String),

    /// Attempt to register a custom operator whose arity rule does not
    /// match the operand slots of its render notation.
    #[error("operator '{0}' declares an arity incompatible with its notation")]
    NotationArity(String),
}

pub type Result<T> = std::result::Result<T, LatexExprError>;
