//! Named leaf values of the expression graph.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{LatexExprError, Result};
use crate::expression::Expression;
use crate::node::RenderMode;
use crate::numfmt::{format_g, Format, Style};

#[derive(Debug)]
struct Inner {
    name: String,
    value: Option<f64>,
    unit: String,
    format: Format,
}

/// A mathematical or physical variable: symbolic name, numeric value,
/// display-only unit and formatting rules.
///
/// `Variable` is a shared handle — clones refer to the same underlying
/// value cell, so the same variable may appear in any number of
/// operations and expressions, and a [`Variable::set_value`] is visible
/// to every referencing tree on its next render or evaluation. Nothing
/// upstream caches, so stale values cannot occur.
///
/// A variable constructed without a value ([`Variable::symbolic`]) is
/// purely symbolic; trees containing it render in symbolic form only and
/// refuse numeric evaluation.
#[derive(Debug, Clone)]
pub struct Variable {
    inner: Rc<RefCell<Inner>>,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self::build(name.into(), Some(value), unit.into())
    }

    /// A value-less variable, rendered by name only until a value is set.
    pub fn symbolic(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::build(name.into(), None, unit.into())
    }

    fn build(name: String, value: Option<f64>, unit: String) -> Self {
        debug_assert!(!name.is_empty(), "variable name must be non-empty");
        Variable {
            inner: Rc::new(RefCell::new(Inner {
                name,
                value,
                unit,
                format: Format::default(),
            })),
        }
    }

    /// Snapshot of an expression's current state: same name, unit and
    /// format, holding the expression's result (value-less while the
    /// expression is still symbolic).
    pub fn from_expression(expr: &Expression) -> Result<Self> {
        expr.to_variable("")
    }

    /// Anonymous literal, named after its own `%g` rendering.
    pub(crate) fn literal(value: f64) -> Self {
        Self::build(format_g(value, 6), Some(value), String::new())
    }

    /// Anonymous integer literal.
    pub(crate) fn literal_int(value: i64) -> Self {
        Self::build(value.to_string(), Some(value as f64), String::new()).with_format(Style::Int)
    }

    pub fn with_format(self, style: Style) -> Self {
        self.inner.borrow_mut().format.style = style;
        self
    }

    pub fn with_exponent(self, exponent: i32) -> Self {
        self.inner.borrow_mut().format.exponent = exponent;
        self
    }

    pub(crate) fn with_parts(
        name: String,
        value: Option<f64>,
        unit: String,
        format: Format,
    ) -> Self {
        let v = Self::build(name, value, unit);
        v.inner.borrow_mut().format = format;
        v
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn unit(&self) -> String {
        self.inner.borrow().unit.clone()
    }

    pub fn format(&self) -> Format {
        self.inner.borrow().format
    }

    pub fn value(&self) -> Option<f64> {
        self.inner.borrow().value
    }

    /// Replaces the value. Passing `None` turns the variable symbolic
    /// again. Every tree referencing this variable sees the change on
    /// its next render or evaluation.
    pub fn set_value(&self, value: impl Into<Option<f64>>) {
        self.inner.borrow_mut().value = value.into();
    }

    pub fn is_symbolic(&self) -> bool {
        self.value().is_none()
    }

    pub fn evaluate(&self) -> Result<f64> {
        self.value()
            .ok_or_else(|| LatexExprError::SymbolicValue { name: self.name() })
    }

    /// `{name}` — the braces keep multi-token names atomic in math mode.
    pub fn str_symbolic(&self) -> String {
        format!("{{{}}}", self.inner.borrow().name)
    }

    /// Formatted current value; symbolic variables fall back to the name.
    pub fn str_substituted(&self) -> String {
        self.str_result()
    }

    pub fn str_result(&self) -> String {
        let inner = self.inner.borrow();
        match inner.value {
            Some(v) => inner.format.format(v),
            None => format!("{{{}}}", inner.name),
        }
    }

    /// Formatted result with the unit suffix, e.g. `3.45 \ \mathrm{mm}`.
    pub fn str_result_with_unit(&self) -> String {
        let unit = self.unit();
        if unit.is_empty() {
            self.str_result()
        } else {
            format!(r"{} \ \mathrm{{{}}}", self.str_result(), unit)
        }
    }

    pub fn render(&self, mode: RenderMode) -> Result<String> {
        Ok(match mode {
            RenderMode::Symbolic => self.str_symbolic(),
            RenderMode::Substituted => self.str_substituted(),
        })
    }
}

impl fmt::Display for Variable {
    /// `name = value \ \mathrm{unit}`; symbolic variables print the bare
    /// name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_symbolic() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{} = {}", self.name(), self.str_result_with_unit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_unit() {
        let v = Variable::new("a_{22}", 3.45, "mm");
        assert_eq!(v.to_string(), r"a_{22} = 3.45 \ \mathrm{mm}");
        assert_eq!(v.str_symbolic(), "{a_{22}}");
        assert_eq!(v.str_substituted(), "3.45");
    }

    #[test]
    fn test_display_without_unit() {
        let v = Variable::new("x", 2.0, "");
        assert_eq!(v.to_string(), "x = 2");
    }

    #[test]
    fn test_custom_format() {
        let v = Variable::new("F", 2.564345, "kN").with_format(Style::Fixed(4));
        assert_eq!(v.to_string(), r"F = 2.5643 \ \mathrm{kN}");
    }

    #[test]
    fn test_exponent_format() {
        let v = Variable::new("F", 4.34, "kN").with_exponent(-2);
        assert_eq!(v.to_string(), r"F = { 434 \cdot 10^{-2} } \ \mathrm{kN}");
    }

    #[test]
    fn test_symbolic_variable() {
        let v = Variable::symbolic("F", "kN");
        assert!(v.is_symbolic());
        assert_eq!(v.to_string(), "F");
        assert_eq!(v.str_substituted(), "{F}");
        assert_eq!(
            v.evaluate(),
            Err(LatexExprError::SymbolicValue {
                name: "F".to_string()
            })
        );
    }

    #[test]
    fn test_set_value_shared_across_clones() {
        let v = Variable::symbolic("F", "kN");
        let alias = v.clone();
        v.set_value(2.34);
        assert_eq!(alias.value(), Some(2.34));
        assert_eq!(alias.evaluate(), Ok(2.34));
    }

    #[test]
    fn test_from_expression_round_trip() {
        let a = Variable::new("a", 3.0, "kN");
        let b = Variable::new("b", 1.0, "kN");
        let e = Expression::new("R", crate::catalog::sub(&a, &b), "kN")
            .with_format(Style::Fixed(2));
        let v = Variable::from_expression(&e).unwrap();
        assert_eq!(v.name(), "R");
        assert_eq!(v.value(), Some(2.0));
        assert_eq!(v.unit(), "kN");
        assert_eq!(v.to_string(), r"R = 2.00 \ \mathrm{kN}");

        let sym = Expression::new("S", crate::catalog::sub(&a, Variable::symbolic("c", "")), "");
        let v = Variable::from_expression(&sym).unwrap();
        assert!(v.is_symbolic());
    }

    #[test]
    fn test_negative_value_parenthesized() {
        let v = Variable::new("F", -6.543, "kN");
        assert_eq!(v.str_result(), r"\left( -6.543 \right)");
    }
}
