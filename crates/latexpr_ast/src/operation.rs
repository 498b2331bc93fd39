//! Internal nodes: an operator applied to an ordered operand list.

use std::fmt;

use crate::catalog::{self, DomainIssue, Notation, OpDef};
use crate::error::{LatexExprError, Result};
use crate::node::{Node, RenderMode};
use crate::numfmt::{Format, Style};
use crate::variable::Variable;

/// An operator applied to one or more child nodes.
///
/// The operand list is arity-checked against the catalog at construction
/// and fixed afterwards; only the values of referenced variables change,
/// so nothing here is cached and every render reflects current values.
#[derive(Debug, Clone)]
pub struct Operation {
    tag: String,
    args: Vec<Node>,
    format: Format,
}

impl Operation {
    /// Builds an operation, validating the tag against the catalog and
    /// the operand count against the operator's arity rule.
    pub fn new(tag: impl Into<String>, args: Vec<Node>) -> Result<Self> {
        let tag = tag.into();
        let def = catalog::lookup(&tag)?;
        if !def.arity.accepts(args.len()) {
            return Err(LatexExprError::Arity {
                op: tag,
                expected: def.arity.describe().to_string(),
                actual: args.len(),
            });
        }
        Ok(Operation {
            tag,
            args,
            format: Format::default(),
        })
    }

    /// Constructor-function path: the tag is a built-in and the operand
    /// count is correct by the caller's signature.
    pub(crate) fn builtin(tag: &'static str, args: Vec<Node>) -> Self {
        Operation {
            tag: tag.to_string(),
            args,
            format: Format::default(),
        }
    }

    pub fn with_format(mut self, style: Style) -> Self {
        self.format.style = style;
        self
    }

    pub fn with_exponent(mut self, exponent: i32) -> Self {
        self.format.exponent = exponent;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn args(&self) -> &[Node] {
        &self.args
    }

    pub fn is_symbolic(&self) -> bool {
        self.args.iter().any(Node::is_symbolic)
    }

    /// Evaluates operands left to right, then applies the operator's
    /// evaluation rule. Domain violations and non-finite results fail
    /// with a [`LatexExprError::Domain`] naming the operator and the
    /// offending operand's symbolic form.
    pub fn evaluate(&self) -> Result<f64> {
        let def = catalog::lookup(&self.tag)?;
        let mut values = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            values.push(arg.evaluate()?);
        }
        let result = (def.eval)(&values).map_err(|issue| self.domain_error(issue))?;
        if !result.is_finite() {
            return Err(LatexExprError::Domain {
                op: self.tag.clone(),
                operand: self.render(RenderMode::Symbolic).unwrap_or_default(),
                reason: "non-finite result".to_string(),
            });
        }
        Ok(result)
    }

    fn domain_error(&self, issue: DomainIssue) -> LatexExprError {
        let operand = self
            .args
            .get(issue.arg)
            .and_then(|n| n.render(RenderMode::Symbolic).ok())
            .unwrap_or_default();
        LatexExprError::Domain {
            op: self.tag.clone(),
            operand,
            reason: issue.reason.to_string(),
        }
    }

    /// Top-down rendering: operands render themselves in the same mode,
    /// get parenthesized where the bracket-insertion rule demands, and
    /// the fragments are composed through the operator's notation.
    pub fn render(&self, mode: RenderMode) -> Result<String> {
        let def = catalog::lookup(&self.tag)?;
        let mut frags = Vec::with_capacity(self.args.len());
        for (idx, arg) in self.args.iter().enumerate() {
            let frag = arg.render(mode)?;
            frags.push(if needs_brackets(&def, arg, idx)? {
                format!(r"\left( {} \right)", frag)
            } else {
                frag
            });
        }
        Ok(compose(&def.notation, &frags))
    }

    pub fn str_symbolic(&self) -> Result<String> {
        self.render(RenderMode::Symbolic)
    }

    pub fn str_substituted(&self) -> Result<String> {
        self.render(RenderMode::Substituted)
    }

    /// Formatted numeric result, or the symbolic form while the tree is
    /// symbolic.
    pub fn str_result(&self) -> Result<String> {
        if self.is_symbolic() {
            return self.render(RenderMode::Symbolic);
        }
        Ok(self.format.format(self.evaluate()?))
    }

    /// New variable carrying this operation's current result.
    pub fn to_variable(&self, name: impl Into<String>) -> Result<Variable> {
        Ok(Variable::new(name, self.evaluate()?, ""))
    }
}

/// The bracket-insertion rule.
///
/// A child operation's fragment is parenthesized when its operator binds
/// strictly looser than the parent's, or equally while the parent is
/// non-associative and the child is not the leftmost operand. Slots the
/// parent's template already delimits are left alone; leaves and named
/// expressions are atomic.
fn needs_brackets(parent: &OpDef, child: &Node, idx: usize) -> Result<bool> {
    if parent.notation.grouped(idx) {
        return Ok(false);
    }
    let child_prec = match child {
        Node::Op(op) => catalog::lookup(op.tag())?.precedence,
        _ => return Ok(false),
    };
    if child_prec < parent.precedence {
        return Ok(true);
    }
    Ok(child_prec == parent.precedence && !parent.associative && idx > 0)
}

fn compose(notation: &Notation, frags: &[String]) -> String {
    match notation {
        Notation::Raw => frags[0].clone(),
        Notation::Infix(glyph) => frags.join(glyph),
        Notation::Sign(sign) => format!(r"\left( {} {} \right)", sign, frags[0]),
        Notation::Fraction => format!(r"\frac{{ {} }}{{ {} }}", frags[0], frags[1]),
        Notation::FloorFraction => format!(
            r"\left \lfloor \frac{{ {} }}{{ {} }} \right \rfloor",
            frags[0], frags[1]
        ),
        Notation::Power => format!(r"{{ {} }}^{{ {} }}", frags[0], frags[1]),
        Notation::Square => format!("{}^2", frags[0]),
        Notation::Root => format!(r"\sqrt[ {} ]{{ {} }}", frags[0], frags[1]),
        Notation::Sqrt => format!(r"\sqrt{{ {} }}", frags[0]),
        Notation::Abs => format!(r"\left| {} \right|", frags[0]),
        Notation::Function(name) => format!(r"{}{{ {} }}", name, frags[0]),
        Notation::Exp => format!(r"\mathrm{{e}}^{{ {} }}", frags[0]),
        Notation::LogBase => format!(r"\log_{{ {} }}{{ {} }}", frags[0], frags[1]),
        Notation::FunctionList(name) => {
            format!(r"{}{{\left( {} \right)}}", name, frags.join(", "))
        }
        Notation::Bracket(open, close) => format!("{} {} {}", open, frags[0], close),
        Notation::CustomFunction(name) => {
            format!(r"\mathrm{{{}}}{{\left( {} \right)}}", name, frags.join(", "))
        }
    }
}

impl fmt::Display for Operation {
    /// `<symbolic> = <substituted>`, collapsing to the symbolic form
    /// while the tree is symbolic or when substitution fails.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = self.render(RenderMode::Symbolic).map_err(|_| fmt::Error)?;
        if self.is_symbolic() {
            return write!(f, "{}", sym);
        }
        match self.render(RenderMode::Substituted) {
            Ok(sub) => write!(f, "{} = {}", sym, sub),
            Err(_) => write!(f, "{}", sym),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{div, sqrt, sub, sum_elements, tag};

    fn var(name: &str, value: f64) -> Variable {
        Variable::new(name, value, "")
    }

    #[test]
    fn test_arity_violation() {
        let a = Node::from(var("a", 1.0));
        let b = Node::from(var("b", 2.0));
        let err = Operation::new(tag::SQRT, vec![a, b]).unwrap_err();
        assert_eq!(
            err,
            LatexExprError::Arity {
                op: tag::SQRT.to_string(),
                expected: "exactly 1".to_string(),
                actual: 2,
            }
        );
    }

    #[test]
    fn test_empty_variadic_rejected() {
        let err = sum_elements(vec![]).unwrap_err();
        assert!(matches!(err, LatexExprError::Arity { .. }));
    }

    #[test]
    fn test_unknown_tag() {
        let err = Operation::new("gamma", vec![Node::from(1.0)]).unwrap_err();
        assert_eq!(err, LatexExprError::UnknownOperator("gamma".to_string()));
    }

    #[test]
    fn test_domain_error_names_operand() {
        let x = var("x", -1.0);
        let err = sqrt(&x).evaluate().unwrap_err();
        assert_eq!(
            err,
            LatexExprError::Domain {
                op: tag::SQRT.to_string(),
                operand: "{x}".to_string(),
                reason: "negative argument to square root".to_string(),
            }
        );
    }

    #[test]
    fn test_division_by_zero_names_denominator() {
        let a = var("a", 1.0);
        let b = var("b", 0.0);
        let err = div(&a, &b).evaluate().unwrap_err();
        assert_eq!(
            err,
            LatexExprError::Domain {
                op: tag::DIV.to_string(),
                operand: "{b}".to_string(),
                reason: "division by zero".to_string(),
            }
        );
    }

    #[test]
    fn test_display_symbolic_and_substituted() {
        let a = var("a", 1.0);
        let b = var("b", 2.0);
        let op = sub(&a, &b);
        assert_eq!(
            op.render(RenderMode::Symbolic).unwrap(),
            "{a} - {b}"
        );
        assert_eq!(op.render(RenderMode::Substituted).unwrap(), "1 - 2");
    }
}
