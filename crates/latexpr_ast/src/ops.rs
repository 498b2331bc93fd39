//! `std::ops` sugar: `a + b`, `a - b`, `a * b`, `a / b` and `-a` build
//! the corresponding operation nodes.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::catalog::tag;
use crate::expression::Expression;
use crate::node::Node;
use crate::operation::Operation;
use crate::variable::Variable;

fn binary(tag: &'static str, lhs: Node, rhs: Node) -> Node {
    Node::from(Operation::builtin(tag, vec![lhs, rhs]))
}

macro_rules! impl_node_ops {
    ($($lhs:ty),* $(,)?) => {
        $(
            impl<T: Into<Node>> Add<T> for $lhs {
                type Output = Node;
                fn add(self, rhs: T) -> Node {
                    binary(tag::ADD, self.into(), rhs.into())
                }
            }

            impl<T: Into<Node>> Sub<T> for $lhs {
                type Output = Node;
                fn sub(self, rhs: T) -> Node {
                    binary(tag::SUB, self.into(), rhs.into())
                }
            }

            impl<T: Into<Node>> Mul<T> for $lhs {
                type Output = Node;
                fn mul(self, rhs: T) -> Node {
                    binary(tag::MUL, self.into(), rhs.into())
                }
            }

            impl<T: Into<Node>> Div<T> for $lhs {
                type Output = Node;
                fn div(self, rhs: T) -> Node {
                    binary(tag::DIV, self.into(), rhs.into())
                }
            }

            impl Neg for $lhs {
                type Output = Node;
                fn neg(self) -> Node {
                    Node::from(Operation::builtin(tag::NEG, vec![self.into()]))
                }
            }
        )*
    };
}

impl_node_ops!(Node, Variable, &Variable, Operation, Expression, &Expression);

// Coherence forbids a blanket right-hand side for `f64`, so each
// expression type on the right gets its own impl.
macro_rules! impl_f64_lhs {
    ($($rhs:ty),* $(,)?) => {
        $(
            impl Add<$rhs> for f64 {
                type Output = Node;
                fn add(self, rhs: $rhs) -> Node {
                    binary(tag::ADD, self.into(), rhs.into())
                }
            }

            impl Sub<$rhs> for f64 {
                type Output = Node;
                fn sub(self, rhs: $rhs) -> Node {
                    binary(tag::SUB, self.into(), rhs.into())
                }
            }

            impl Mul<$rhs> for f64 {
                type Output = Node;
                fn mul(self, rhs: $rhs) -> Node {
                    binary(tag::MUL, self.into(), rhs.into())
                }
            }

            impl Div<$rhs> for f64 {
                type Output = Node;
                fn div(self, rhs: $rhs) -> Node {
                    binary(tag::DIV, self.into(), rhs.into())
                }
            }
        )*
    };
}

impl_f64_lhs!(Node, Variable, &Variable, Operation, Expression, &Expression);

#[cfg(test)]
mod tests {
    use crate::node::RenderMode;
    use crate::variable::Variable;

    #[test]
    fn test_variable_arithmetic() {
        let a = Variable::new("a", 3.0, "");
        let b = Variable::new("b", 2.0, "");
        let n = &a + &b;
        assert_eq!(n.render(RenderMode::Symbolic), Ok("{a} + {b}".to_string()));
        assert_eq!(n.evaluate(), Ok(5.0));
    }

    #[test]
    fn test_chained_operators_bracket_correctly() {
        let a = Variable::new("a", 3.0, "");
        let b = Variable::new("b", 2.0, "");
        let c = Variable::new("c", 1.0, "");
        let n = &a * (&b + &c);
        assert_eq!(
            n.render(RenderMode::Symbolic),
            Ok(r"{a} \cdot \left( {b} + {c} \right)".to_string())
        );
        assert_eq!(n.evaluate(), Ok(9.0));
    }

    #[test]
    fn test_scalar_lhs_and_negation() {
        let x = Variable::new("x", 4.0, "");
        let n = 2.0 * &x;
        assert_eq!(
            n.render(RenderMode::Symbolic),
            Ok(r"{2} \cdot {x}".to_string())
        );
        assert_eq!(n.evaluate(), Ok(8.0));

        let m = -&x;
        assert_eq!(
            m.render(RenderMode::Symbolic),
            Ok(r"\left( - {x} \right)".to_string())
        );
        assert_eq!(m.evaluate(), Ok(-4.0));
    }
}
