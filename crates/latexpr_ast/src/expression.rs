//! Named top-level expressions and the four-part result display.

use std::fmt;

use crate::error::Result;
use crate::node::{Node, RenderMode};
use crate::numfmt::{Format, Style};
use crate::variable::Variable;

/// A named wrapper around a single root node, adding the result-display
/// identity `name = <symbolic> = <substituted> = <result> unit`.
///
/// Nothing is cached across variable mutations: every render and
/// evaluation reflects the variables' current values.
#[derive(Debug, Clone)]
pub struct Expression {
    name: String,
    root: Node,
    unit: String,
    format: Format,
}

impl Expression {
    pub fn new(name: impl Into<String>, root: impl Into<Node>, unit: impl Into<String>) -> Self {
        Expression {
            name: name.into(),
            root: root.into(),
            unit: unit.into(),
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn evaluate(&self) -> Result<f64> {
        self.root.evaluate()
    }

    pub fn render(&self, mode: RenderMode) -> Result<String> {
        self.root.render(mode)
    }

    pub fn is_symbolic(&self) -> bool {
        self.root.is_symbolic()
    }

    /// `{name}` — how this expression appears as an operand of a larger
    /// tree.
    pub fn str_symbolic(&self) -> String {
        format!("{{{}}}", self.name)
    }

    /// Operand form under substitution: the formatted result.
    pub fn str_substituted(&self) -> Result<String> {
        self.str_result()
    }

    /// Formatted numeric result, or the substituted rendering of the
    /// root while the tree is symbolic.
    pub fn str_result(&self) -> Result<String> {
        if self.is_symbolic() {
            return self.root.render(RenderMode::Substituted);
        }
        Ok(self.format.format(self.evaluate()?))
    }

    pub fn str_result_with_unit(&self) -> Result<String> {
        if self.unit.is_empty() {
            self.str_result()
        } else {
            Ok(format!(r"{} \ \mathrm{{{}}}", self.str_result()?, self.unit))
        }
    }

    /// New variable carrying this expression's name, unit, format and
    /// current result (value-less while the tree is symbolic).
    pub fn to_variable(&self, new_name: impl Into<String>) -> Result<Variable> {
        let name = {
            let n: String = new_name.into();
            if n.is_empty() {
                self.name.clone()
            } else {
                n
            }
        };
        let value = if self.is_symbolic() {
            None
        } else {
            Some(self.evaluate()?)
        };
        Ok(Variable::with_parts(
            name,
            value,
            self.unit.clone(),
            self.format,
        ))
    }

    /// The canonical four-part display.
    ///
    /// The substituted segment is omitted when the root is a bare
    /// variable (it would duplicate the result), and the numeric
    /// segments are omitted while the tree is symbolic.
    pub fn full_render(&self) -> Result<String> {
        let mut out = format!("{} = {}", self.name, self.render(RenderMode::Symbolic)?);
        if self.is_symbolic() {
            return Ok(out);
        }
        if !matches!(self.root, Node::Var(_)) {
            out.push_str(" = ");
            out.push_str(&self.render(RenderMode::Substituted)?);
        }
        out.push_str(" = ");
        out.push_str(&self.str_result_with_unit()?);
        Ok(out)
    }
}

impl fmt::Display for Expression {
    /// The four-part display, degrading to `name = <symbolic>` when the
    /// tree fails to evaluate (e.g. a division by zero). The fallible
    /// [`Expression::full_render`] carries the precise error.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Ok(full) = self.full_render() {
            return write!(f, "{}", full);
        }
        let sym = self
            .render(RenderMode::Symbolic)
            .map_err(|_| fmt::Error)?;
        write!(f, "{} = {}", self.name, sym)
    }
}
