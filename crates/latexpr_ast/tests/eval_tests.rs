//! Numeric evaluation: operator semantics, domain failures and the
//! symbolic-value guard.

use approx::assert_relative_eq;
use latexpr_ast::{
    absolute, add, asin, atan, c_brackets, cos, div, div2, exp, ln, log, log10, maximum, minimum,
    mul, neg, pos, power, root, sin, sqr, sqrt, sub, tanh, LatexExprError, Variable,
};

fn v(name: &str, value: f64) -> Variable {
    Variable::new(name, value, "")
}

#[test]
fn arithmetic_operators() -> latexpr_ast::Result<()> {
    let a = v("a", 3.0);
    let b = v("b", 2.0);

    assert_eq!(add(vec![(&a).into(), (&b).into()])?.evaluate()?, 5.0);
    assert_eq!(sub(&a, &b).evaluate()?, 1.0);
    assert_eq!(mul(vec![(&a).into(), (&b).into()])?.evaluate()?, 6.0);
    assert_eq!(div(&a, &b).evaluate()?, 1.5);
    assert_eq!(neg(&a).evaluate()?, -3.0);
    assert_eq!(absolute(v("c", -4.5)).evaluate()?, 4.5);
    assert_eq!(sqr(&a).evaluate()?, 9.0);
    assert_eq!(power(&b, 10).evaluate()?, 1024.0);
    Ok(())
}

#[test]
fn floor_division_floors_toward_negative_infinity() -> latexpr_ast::Result<()> {
    assert_eq!(div2(v("a", 7.0), v("b", 2.0)).evaluate()?, 3.0);
    assert_eq!(div2(v("a", -7.0), v("b", 2.0)).evaluate()?, -4.0);
    assert_eq!(div2(v("a", 7.0), v("b", -2.0)).evaluate()?, -4.0);
    assert_eq!(div2(v("a", 7.5), v("b", 2.5)).evaluate()?, 3.0);
    Ok(())
}

#[test]
fn variadic_extrema() -> latexpr_ast::Result<()> {
    let args = vec![v("a", 3.0).into(), v("b", -1.0).into(), v("c", 7.5).into()];
    assert_eq!(maximum(args.clone())?.evaluate()?, 7.5);
    assert_eq!(minimum(args)?.evaluate()?, -1.0);
    Ok(())
}

#[test]
fn roots_and_transcendentals() -> latexpr_ast::Result<()> {
    assert_relative_eq!(root(3, v("x", 8.0)).evaluate()?, 2.0, max_relative = 1e-12);
    assert_relative_eq!(sqrt(v("x", 2.25)).evaluate()?, 1.5, max_relative = 1e-12);
    assert_relative_eq!(
        sin(v("x", std::f64::consts::FRAC_PI_2)).evaluate()?,
        1.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        cos(v("x", 0.0)).evaluate()?,
        1.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(log(2, v("x", 8.0)).evaluate()?, 3.0, max_relative = 1e-12);
    assert_relative_eq!(
        ln(v("x", std::f64::consts::E)).evaluate()?,
        1.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(exp(v("x", 1.0)).evaluate()?, std::f64::consts::E, max_relative = 1e-12);
    Ok(())
}

#[test]
fn identity_and_remaining_unary_operators() -> latexpr_ast::Result<()> {
    assert_eq!(pos(v("a", -3.0)).evaluate()?, -3.0);
    assert_eq!(c_brackets(v("a", 4.5)).evaluate()?, 4.5);
    assert_eq!(tanh(v("x", 0.0)).evaluate()?, 0.0);
    assert_relative_eq!(
        atan(v("x", 1.0)).evaluate()?,
        std::f64::consts::FRAC_PI_4,
        max_relative = 1e-12
    );
    assert_relative_eq!(log10(v("x", 1000.0)).evaluate()?, 3.0, max_relative = 1e-12);
    Ok(())
}

#[test]
fn empty_variadic_is_an_arity_error() {
    let err = add(vec![]).unwrap_err();
    assert!(matches!(err, LatexExprError::Arity { actual: 0, .. }));
}

#[test]
fn domain_errors_name_operator_and_operand() {
    let err = sqrt(v("x", -1.0)).evaluate().unwrap_err();
    assert_eq!(
        err,
        LatexExprError::Domain {
            op: "sqrt".to_string(),
            operand: "{x}".to_string(),
            reason: "negative argument to square root".to_string(),
        }
    );

    let err = asin(v("x", 2.0)).evaluate().unwrap_err();
    assert_eq!(
        err,
        LatexExprError::Domain {
            op: "asin".to_string(),
            operand: "{x}".to_string(),
            reason: "argument outside [-1, 1]".to_string(),
        }
    );

    let err = div(v("a", 1.0), v("b", 0.0)).evaluate().unwrap_err();
    assert_eq!(
        err,
        LatexExprError::Domain {
            op: "/".to_string(),
            operand: "{b}".to_string(),
            reason: "division by zero".to_string(),
        }
    );

    let err = ln(v("x", 0.0)).evaluate().unwrap_err();
    assert!(matches!(err, LatexExprError::Domain { .. }));
}

#[test]
fn overflow_is_reported_as_domain_error() {
    let err = exp(v("x", 1000.0)).evaluate().unwrap_err();
    assert_eq!(
        err,
        LatexExprError::Domain {
            op: "exp".to_string(),
            operand: r"\mathrm{e}^{ {x} }".to_string(),
            reason: "non-finite result".to_string(),
        }
    );
}

#[test]
fn symbolic_variables_refuse_evaluation() {
    let x = Variable::symbolic("x", "");
    let n = sqrt(&x);
    assert!(n.is_symbolic());
    assert_eq!(
        n.evaluate().unwrap_err(),
        LatexExprError::SymbolicValue {
            name: "x".to_string()
        }
    );

    x.set_value(4.0);
    assert_eq!(n.evaluate(), Ok(2.0));
}

#[test]
fn operands_evaluate_left_to_right() {
    // The first failing operand wins.
    let x = Variable::symbolic("x", "");
    let y = Variable::symbolic("y", "");
    let err = sub(&x, &y).evaluate().unwrap_err();
    assert_eq!(
        err,
        LatexExprError::SymbolicValue {
            name: "x".to_string()
        }
    );
}
