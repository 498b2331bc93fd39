//! The polymorphic expression node.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::expression::Expression;
use crate::operation::Operation;
use crate::variable::Variable;

/// Rendering mode: variable names and operator glyphs, or current
/// numeric values in their place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Symbolic,
    Substituted,
}

/// One element of an expression tree.
///
/// Variables are shared handles (the same variable may appear in many
/// trees); operations and expressions are structurally immutable once
/// built, so they are shared behind `Rc` as well. Sharing makes the tree
/// a DAG over variables while operations themselves form a tree.
#[derive(Debug, Clone)]
pub enum Node {
    Var(Variable),
    Op(Rc<Operation>),
    Expr(Rc<Expression>),
}

impl Node {
    /// Bottom-up numeric evaluation.
    pub fn evaluate(&self) -> Result<f64> {
        match self {
            Node::Var(v) => v.evaluate(),
            Node::Op(o) => o.evaluate(),
            Node::Expr(e) => e.evaluate(),
        }
    }

    /// Renders the node as an operand fragment.
    ///
    /// A wrapped [`Expression`] is atomic here: it contributes its name
    /// symbolically and its formatted result when substituted, rather
    /// than inlining its whole subtree.
    pub fn render(&self, mode: RenderMode) -> Result<String> {
        match self {
            Node::Var(v) => v.render(mode),
            Node::Op(o) => o.render(mode),
            Node::Expr(e) => match mode {
                RenderMode::Symbolic => Ok(e.str_symbolic()),
                RenderMode::Substituted => e.str_substituted(),
            },
        }
    }

    /// True when any variable underneath has no value yet.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Node::Var(v) => v.is_symbolic(),
            Node::Op(o) => o.is_symbolic(),
            Node::Expr(e) => e.is_symbolic(),
        }
    }
}

impl fmt::Display for Node {
    /// Delegates to the wrapped element's display form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Var(v) => fmt::Display::fmt(v, f),
            Node::Op(o) => fmt::Display::fmt(o.as_ref(), f),
            Node::Expr(e) => fmt::Display::fmt(e.as_ref(), f),
        }
    }
}

impl From<Variable> for Node {
    fn from(v: Variable) -> Self {
        Node::Var(v)
    }
}

impl From<&Variable> for Node {
    fn from(v: &Variable) -> Self {
        Node::Var(v.clone())
    }
}

impl From<Operation> for Node {
    fn from(o: Operation) -> Self {
        Node::Op(Rc::new(o))
    }
}

impl From<Expression> for Node {
    fn from(e: Expression) -> Self {
        Node::Expr(Rc::new(e))
    }
}

impl From<&Expression> for Node {
    fn from(e: &Expression) -> Self {
        Node::Expr(Rc::new(e.clone()))
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Var(Variable::literal(v))
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Var(Variable::literal_int(v))
    }
}

impl From<i32> for Node {
    fn from(v: i32) -> Self {
        Node::Var(Variable::literal_int(v as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_nodes() {
        let n = Node::from(2.5);
        assert_eq!(n.evaluate(), Ok(2.5));
        assert_eq!(n.render(RenderMode::Symbolic), Ok("{2.5}".to_string()));

        let i = Node::from(2);
        assert_eq!(i.evaluate(), Ok(2.0));
        assert_eq!(i.render(RenderMode::Substituted), Ok("2".to_string()));
    }

    #[test]
    fn test_variable_node_renders_both_modes() {
        let v = Variable::new("x", 1.5, "");
        let n = Node::from(&v);
        assert_eq!(n.render(RenderMode::Symbolic), Ok("{x}".to_string()));
        assert_eq!(n.render(RenderMode::Substituted), Ok("1.5".to_string()));
    }
}
