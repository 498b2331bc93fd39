//! Predefined variables for common constants.

use std::f64::consts;

use crate::numfmt::Style;
use crate::variable::Variable;

/// The literal `0`.
pub fn zero() -> Variable {
    Variable::new("0", 0.0, "").with_format(Style::Int)
}

/// The literal `1`.
pub fn one() -> Variable {
    Variable::new("1", 1.0, "").with_format(Style::Int)
}

/// The literal `2`.
pub fn two() -> Variable {
    Variable::new("2", 2.0, "").with_format(Style::Int)
}

/// Euler's number, rendered `\mathrm{e}`.
pub fn e() -> Variable {
    Variable::new(r"\mathrm{e}", consts::E, "")
}

/// Pi, rendered `\pi`.
pub fn pi() -> Variable {
    Variable::new(r"\pi", consts::PI, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(pi().value(), Some(std::f64::consts::PI));
        assert_eq!(e().str_symbolic(), r"{\mathrm{e}}");
        assert_eq!(one().str_substituted(), "1");
    }
}
