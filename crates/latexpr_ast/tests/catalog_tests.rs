//! Operator catalog: lookups and runtime registration.
//!
//! The registry is process-wide, so every test registers under its own
//! tag.

use latexpr_ast::catalog::prec;
use latexpr_ast::{
    lookup, register_operator, Arity, DomainIssue, LatexExprError, Node, Notation, OpDef,
    Operation, RenderMode, Variable,
};

fn sech_eval(args: &[f64]) -> Result<f64, DomainIssue> {
    Ok(1.0 / args[0].cosh())
}

fn sech_def(tag: &str) -> OpDef {
    OpDef {
        tag: tag.to_string(),
        arity: Arity::Unary,
        precedence: prec::ATOM,
        associative: false,
        eval: sech_eval,
        notation: Notation::CustomFunction("sech".to_string()),
    }
}

#[test]
fn registered_operator_evaluates_and_renders() -> latexpr_ast::Result<()> {
    register_operator(sech_def("sech_render"))?;

    let x = Variable::new("x", 0.0, "");
    let op = Operation::new("sech_render", vec![Node::from(&x)])?;
    assert_eq!(op.evaluate()?, 1.0);
    assert_eq!(
        op.render(RenderMode::Symbolic)?,
        r"\mathrm{sech}{\left( {x} \right)}"
    );
    assert_eq!(
        op.render(RenderMode::Substituted)?,
        r"\mathrm{sech}{\left( 0 \right)}"
    );
    Ok(())
}

#[test]
fn duplicate_tags_are_rejected() -> latexpr_ast::Result<()> {
    register_operator(sech_def("sech_dup"))?;
    let err = register_operator(sech_def("sech_dup")).unwrap_err();
    assert_eq!(err, LatexExprError::DuplicateOperator("sech_dup".to_string()));
    Ok(())
}

#[test]
fn builtins_cannot_be_shadowed() {
    let err = register_operator(sech_def("sqrt")).unwrap_err();
    assert_eq!(err, LatexExprError::DuplicateOperator("sqrt".to_string()));
}

#[test]
fn fixed_slot_notation_requires_matching_arity() {
    // A two-slot template with a variadic arity would admit operand
    // counts the template cannot render.
    let def = OpDef {
        tag: "halfpair".to_string(),
        arity: Arity::Variadic,
        precedence: prec::MULTIPLICATIVE,
        associative: false,
        eval: sech_eval,
        notation: Notation::Fraction,
    };
    assert_eq!(
        register_operator(def).unwrap_err(),
        LatexExprError::NotationArity("halfpair".to_string())
    );

    let def = OpDef {
        tag: "halfpair".to_string(),
        arity: Arity::Unary,
        precedence: prec::ATOM,
        associative: false,
        eval: sech_eval,
        notation: Notation::Power,
    };
    assert!(matches!(
        register_operator(def),
        Err(LatexExprError::NotationArity(_))
    ));
}

#[test]
fn unary_bracket_notation_registers_and_renders() -> latexpr_ast::Result<()> {
    let def = OpDef {
        tag: "floor_glyph".to_string(),
        arity: Arity::Unary,
        precedence: prec::ATOM,
        associative: false,
        eval: sech_eval,
        notation: Notation::Bracket(r"\left \lfloor", r"\right \rfloor"),
    };
    register_operator(def)?;
    let op = Operation::new("floor_glyph", vec![Node::from(Variable::new("x", 0.0, ""))])?;
    assert_eq!(
        op.render(RenderMode::Symbolic)?,
        r"\left \lfloor {x} \right \rfloor"
    );
    Ok(())
}

#[test]
fn unknown_tags_fail_lookup_and_construction() {
    assert_eq!(
        lookup("gamma").unwrap_err(),
        LatexExprError::UnknownOperator("gamma".to_string())
    );
    let err = Operation::new("gamma", vec![Node::from(1.0)]).unwrap_err();
    assert_eq!(err, LatexExprError::UnknownOperator("gamma".to_string()));
}

#[test]
fn registered_arity_is_enforced() -> latexpr_ast::Result<()> {
    register_operator(sech_def("sech_arity"))?;
    let err = Operation::new(
        "sech_arity",
        vec![Node::from(1.0), Node::from(2.0)],
    )
    .unwrap_err();
    assert!(matches!(err, LatexExprError::Arity { actual: 2, .. }));
    Ok(())
}
