//! The operator catalog.
//!
//! Every operator is described by one [`OpDef`] record: arity rule,
//! precedence rank, associativity, evaluation function and render
//! notation. The built-in set is seeded into a process-wide registry on
//! first use; [`register_operator`] may add new tags before they are
//! used. The registry is read-mostly and never mutated after setup
//! beyond such registrations.
//!
//! The constructor functions at the bottom of this module are the public
//! way of building [`Operation`] nodes, one per supported operator.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::error::{LatexExprError, Result};
use crate::node::Node;
use crate::operation::Operation;

/// Operand-count rule for one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
    /// One or more operands.
    Variadic,
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Unary => n == 1,
            Arity::Binary => n == 2,
            Arity::Variadic => n >= 1,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Arity::Unary => "exactly 1",
            Arity::Binary => "exactly 2",
            Arity::Variadic => "at least 1",
        }
    }
}

/// Precedence ranks used by the bracket-insertion rule. Higher binds
/// tighter; a child fragment is parenthesized inside a parent of
/// strictly higher rank.
pub mod prec {
    /// Variadic summation join, the loosest binding.
    pub const SUM: u8 = 0;
    /// Binary subtraction.
    pub const ADDITIVE: u8 = 1;
    /// Multiplication, division, floor division.
    pub const MULTIPLICATIVE: u8 = 2;
    /// Unary plus/minus.
    pub const SIGN: u8 = 3;
    /// Powers and roots written as superscripts.
    pub const POWER: u8 = 4;
    /// Functions, brackets and leaves; never needs enclosing brackets.
    pub const ATOM: u8 = 5;
}

/// Render template kinds.
///
/// Slots reported by [`Notation::grouped`] are already visually delimited
/// by the template (fraction bars, radicals, sub/superscripts, bracket
/// glyphs), so the bracket-insertion rule leaves them alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notation {
    /// Identity: the bare operand fragment, no added delimiters.
    Raw,
    /// Operands joined by an infix glyph: `a + b`, `a \cdot b`.
    Infix(&'static str),
    /// `\left( <sign> a \right)` — unary plus/minus.
    Sign(&'static str),
    /// `\frac{ a }{ b }`.
    Fraction,
    /// `\left \lfloor \frac{ a }{ b } \right \rfloor` — floor division.
    FloorFraction,
    /// `{ a }^{ b }`.
    Power,
    /// `a^2`.
    Square,
    /// `\sqrt[ n ]{ a }` (index first, radicand second).
    Root,
    /// `\sqrt{ a }`.
    Sqrt,
    /// `\left| a \right|`.
    Abs,
    /// `\name{ a }` functional form, e.g. `\sin{ x }`.
    Function(&'static str),
    /// `\mathrm{e}^{ a }`.
    Exp,
    /// `\log_{ b }{ a }` (base first, argument second).
    LogBase,
    /// `\name{\left( a, b, ... \right)}` — max/min style.
    FunctionList(&'static str),
    /// Forced bracket glyphs around the single operand.
    Bracket(&'static str, &'static str),
    /// Functional form with an owned name, for registered operators:
    /// `\mathrm{name}{\left( a, ... \right)}`.
    CustomFunction(String),
}

impl Notation {
    /// The arity rule this template can render, where it is fixed by the
    /// number of slots. `None` for templates taking any operand count.
    pub fn required_arity(&self) -> Option<Arity> {
        match self {
            Notation::Raw
            | Notation::Sign(_)
            | Notation::Square
            | Notation::Sqrt
            | Notation::Abs
            | Notation::Function(_)
            | Notation::Exp
            | Notation::Bracket(_, _) => Some(Arity::Unary),
            Notation::Fraction
            | Notation::FloorFraction
            | Notation::Power
            | Notation::Root
            | Notation::LogBase => Some(Arity::Binary),
            Notation::Infix(_) | Notation::FunctionList(_) | Notation::CustomFunction(_) => None,
        }
    }

    /// Whether the template already delimits the operand at `idx`.
    pub fn grouped(&self, idx: usize) -> bool {
        match self {
            Notation::Raw => true,
            Notation::Infix(_) => false,
            Notation::Sign(_) => false,
            Notation::Fraction => true,
            Notation::FloorFraction => true,
            Notation::Power => idx == 1,
            Notation::Square => false,
            Notation::Root => true,
            Notation::Sqrt => true,
            Notation::Abs => true,
            Notation::Function(_) => false,
            Notation::Exp => true,
            Notation::LogBase => idx == 0,
            Notation::FunctionList(_) => true,
            Notation::Bracket(_, _) => true,
            Notation::CustomFunction(_) => false,
        }
    }
}

/// Domain failure reported by an evaluation rule, pointing at the
/// offending operand by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainIssue {
    pub arg: usize,
    pub reason: &'static str,
}

pub type EvalFn = fn(&[f64]) -> std::result::Result<f64, DomainIssue>;

/// Descriptor record for one operator: everything needed to construct,
/// evaluate and render an [`Operation`] carrying its tag.
#[derive(Debug, Clone)]
pub struct OpDef {
    pub tag: String,
    pub arity: Arity,
    pub precedence: u8,
    pub associative: bool,
    pub eval: EvalFn,
    pub notation: Notation,
}

/// Built-in operator tags.
pub mod tag {
    pub const RAW: &str = "";
    pub const ADD: &str = "+";
    pub const SUB: &str = "-";
    pub const MUL: &str = "*";
    pub const DIV: &str = "/";
    pub const DIV2: &str = "//";
    pub const NEG: &str = "neg";
    pub const POS: &str = "pos";
    pub const ABS: &str = "abs";
    pub const MAX: &str = "max";
    pub const MIN: &str = "min";
    pub const POW: &str = "pow";
    pub const SQR: &str = "sqr";
    pub const ROOT: &str = "root";
    pub const SQRT: &str = "sqrt";
    pub const SIN: &str = "sin";
    pub const COS: &str = "cos";
    pub const TAN: &str = "tan";
    pub const ASIN: &str = "asin";
    pub const ACOS: &str = "acos";
    pub const ATAN: &str = "atan";
    pub const SINH: &str = "sinh";
    pub const COSH: &str = "cosh";
    pub const TANH: &str = "tanh";
    pub const EXP: &str = "exp";
    pub const LOG: &str = "log";
    pub const LN: &str = "ln";
    pub const LOG10: &str = "log10";
    pub const RBRACKETS: &str = "()";
    pub const SBRACKETS: &str = "[]";
    pub const CBRACKETS: &str = "{}";
    pub const ABRACKETS: &str = "<>";
}

// ---------------------------------------------------------------------
// Evaluation rules
// ---------------------------------------------------------------------

type EvalResult = std::result::Result<f64, DomainIssue>;

fn eval_identity(args: &[f64]) -> EvalResult {
    Ok(args[0])
}

fn eval_add(args: &[f64]) -> EvalResult {
    Ok(args.iter().sum())
}

fn eval_mul(args: &[f64]) -> EvalResult {
    Ok(args.iter().product())
}

fn eval_max(args: &[f64]) -> EvalResult {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn eval_min(args: &[f64]) -> EvalResult {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

fn eval_sub(args: &[f64]) -> EvalResult {
    Ok(args[0] - args[1])
}

fn eval_div(args: &[f64]) -> EvalResult {
    if args[1] == 0.0 {
        return Err(DomainIssue {
            arg: 1,
            reason: "division by zero",
        });
    }
    Ok(args[0] / args[1])
}

// Floor of the real quotient, for any numeric operands: truncation
// toward negative infinity, not toward zero.
fn eval_div2(args: &[f64]) -> EvalResult {
    if args[1] == 0.0 {
        return Err(DomainIssue {
            arg: 1,
            reason: "division by zero",
        });
    }
    Ok((args[0] / args[1]).floor())
}

fn eval_neg(args: &[f64]) -> EvalResult {
    Ok(-args[0])
}

fn eval_abs(args: &[f64]) -> EvalResult {
    Ok(args[0].abs())
}

fn eval_pow(args: &[f64]) -> EvalResult {
    let r = args[0].powf(args[1]);
    if r.is_nan() {
        return Err(DomainIssue {
            arg: 0,
            reason: "invalid power",
        });
    }
    Ok(r)
}

fn eval_sqr(args: &[f64]) -> EvalResult {
    Ok(args[0] * args[0])
}

fn eval_root(args: &[f64]) -> EvalResult {
    if args[0] == 0.0 {
        return Err(DomainIssue {
            arg: 0,
            reason: "zero root index",
        });
    }
    let r = args[1].powf(1.0 / args[0]);
    if r.is_nan() {
        return Err(DomainIssue {
            arg: 1,
            reason: "invalid argument to root",
        });
    }
    Ok(r)
}

fn eval_sqrt(args: &[f64]) -> EvalResult {
    if args[0] < 0.0 {
        return Err(DomainIssue {
            arg: 0,
            reason: "negative argument to square root",
        });
    }
    Ok(args[0].sqrt())
}

fn eval_sin(args: &[f64]) -> EvalResult {
    Ok(args[0].sin())
}

fn eval_cos(args: &[f64]) -> EvalResult {
    Ok(args[0].cos())
}

fn eval_tan(args: &[f64]) -> EvalResult {
    Ok(args[0].tan())
}

fn eval_asin(args: &[f64]) -> EvalResult {
    if !(-1.0..=1.0).contains(&args[0]) {
        return Err(DomainIssue {
            arg: 0,
            reason: "argument outside [-1, 1]",
        });
    }
    Ok(args[0].asin())
}

fn eval_acos(args: &[f64]) -> EvalResult {
    if !(-1.0..=1.0).contains(&args[0]) {
        return Err(DomainIssue {
            arg: 0,
            reason: "argument outside [-1, 1]",
        });
    }
    Ok(args[0].acos())
}

fn eval_atan(args: &[f64]) -> EvalResult {
    Ok(args[0].atan())
}

fn eval_sinh(args: &[f64]) -> EvalResult {
    Ok(args[0].sinh())
}

fn eval_cosh(args: &[f64]) -> EvalResult {
    Ok(args[0].cosh())
}

fn eval_tanh(args: &[f64]) -> EvalResult {
    Ok(args[0].tanh())
}

fn eval_exp(args: &[f64]) -> EvalResult {
    Ok(args[0].exp())
}

fn eval_log(args: &[f64]) -> EvalResult {
    if args[0] <= 0.0 || args[0] == 1.0 {
        return Err(DomainIssue {
            arg: 0,
            reason: "invalid logarithm base",
        });
    }
    if args[1] <= 0.0 {
        return Err(DomainIssue {
            arg: 1,
            reason: "non-positive argument to logarithm",
        });
    }
    Ok(args[1].ln() / args[0].ln())
}

fn eval_ln(args: &[f64]) -> EvalResult {
    if args[0] <= 0.0 {
        return Err(DomainIssue {
            arg: 0,
            reason: "non-positive argument to logarithm",
        });
    }
    Ok(args[0].ln())
}

fn eval_log10(args: &[f64]) -> EvalResult {
    if args[0] <= 0.0 {
        return Err(DomainIssue {
            arg: 0,
            reason: "non-positive argument to logarithm",
        });
    }
    Ok(args[0].log10())
}

// ---------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------

fn def(
    tag: &str,
    arity: Arity,
    precedence: u8,
    associative: bool,
    eval: EvalFn,
    notation: Notation,
) -> OpDef {
    OpDef {
        tag: tag.to_string(),
        arity,
        precedence,
        associative,
        eval,
        notation,
    }
}

fn builtin_defs() -> HashMap<String, OpDef> {
    use Arity::{Binary, Unary, Variadic};

    let defs = vec![
        def(tag::RAW, Unary, prec::ATOM, false, eval_identity, Notation::Raw),
        def(tag::ADD, Variadic, prec::SUM, true, eval_add, Notation::Infix(" + ")),
        def(tag::SUB, Binary, prec::ADDITIVE, false, eval_sub, Notation::Infix(" - ")),
        def(tag::MUL, Variadic, prec::MULTIPLICATIVE, true, eval_mul, Notation::Infix(r" \cdot ")),
        def(tag::DIV, Binary, prec::MULTIPLICATIVE, false, eval_div, Notation::Fraction),
        def(tag::DIV2, Binary, prec::MULTIPLICATIVE, false, eval_div2, Notation::FloorFraction),
        def(tag::NEG, Unary, prec::SIGN, false, eval_neg, Notation::Sign("-")),
        def(tag::POS, Unary, prec::SIGN, false, eval_identity, Notation::Sign("+")),
        def(tag::ABS, Unary, prec::ATOM, false, eval_abs, Notation::Abs),
        def(tag::MAX, Variadic, prec::ATOM, true, eval_max, Notation::FunctionList(r"\max")),
        def(tag::MIN, Variadic, prec::ATOM, true, eval_min, Notation::FunctionList(r"\min")),
        def(tag::POW, Binary, prec::POWER, false, eval_pow, Notation::Power),
        def(tag::SQR, Unary, prec::POWER, false, eval_sqr, Notation::Square),
        def(tag::ROOT, Binary, prec::ATOM, false, eval_root, Notation::Root),
        def(tag::SQRT, Unary, prec::ATOM, false, eval_sqrt, Notation::Sqrt),
        def(tag::SIN, Unary, prec::ATOM, false, eval_sin, Notation::Function(r"\sin")),
        def(tag::COS, Unary, prec::ATOM, false, eval_cos, Notation::Function(r"\cos")),
        def(tag::TAN, Unary, prec::ATOM, false, eval_tan, Notation::Function(r"\tan")),
        def(tag::ASIN, Unary, prec::ATOM, false, eval_asin, Notation::Function(r"\arcsin")),
        def(tag::ACOS, Unary, prec::ATOM, false, eval_acos, Notation::Function(r"\arccos")),
        def(tag::ATAN, Unary, prec::ATOM, false, eval_atan, Notation::Function(r"\arctan")),
        def(tag::SINH, Unary, prec::ATOM, false, eval_sinh, Notation::Function(r"\sinh")),
        def(tag::COSH, Unary, prec::ATOM, false, eval_cosh, Notation::Function(r"\cosh")),
        def(tag::TANH, Unary, prec::ATOM, false, eval_tanh, Notation::Function(r"\tanh")),
        def(tag::EXP, Unary, prec::ATOM, false, eval_exp, Notation::Exp),
        def(tag::LOG, Binary, prec::ATOM, false, eval_log, Notation::LogBase),
        def(tag::LN, Unary, prec::ATOM, false, eval_ln, Notation::Function(r"\ln")),
        def(tag::LOG10, Unary, prec::ATOM, false, eval_log10, Notation::Function(r"\log_{10}")),
        def(tag::RBRACKETS, Unary, prec::ATOM, false, eval_identity, Notation::Bracket(r"\left(", r"\right)")),
        def(tag::SBRACKETS, Unary, prec::ATOM, false, eval_identity, Notation::Bracket(r"\left[", r"\right]")),
        def(tag::CBRACKETS, Unary, prec::ATOM, false, eval_identity, Notation::Bracket(r"\left\{", r"\right\}")),
        def(tag::ABRACKETS, Unary, prec::ATOM, false, eval_identity, Notation::Bracket(r"\left\langle", r"\right\rangle")),
    ];

    defs.into_iter().map(|d| (d.tag.clone(), d)).collect()
}

static CATALOG: Lazy<RwLock<HashMap<String, OpDef>>> =
    Lazy::new(|| RwLock::new(builtin_defs()));

/// Looks up the descriptor for `tag`.
pub fn lookup(tag: &str) -> Result<OpDef> {
    let catalog = CATALOG.read().unwrap_or_else(|e| e.into_inner());
    catalog
        .get(tag)
        .cloned()
        .ok_or_else(|| LatexExprError::UnknownOperator(tag.to_string()))
}

/// Registers a custom operator before first use.
///
/// The tag must not collide with a built-in or a previously registered
/// operator, and the arity rule must match the notation's operand
/// slots: a fixed-slot template such as `Fraction` cannot be paired
/// with a variadic arity.
pub fn register_operator(def: OpDef) -> Result<()> {
    if def
        .notation
        .required_arity()
        .is_some_and(|required| required != def.arity)
    {
        return Err(LatexExprError::NotationArity(def.tag));
    }
    let mut catalog = CATALOG.write().unwrap_or_else(|e| e.into_inner());
    if catalog.contains_key(&def.tag) {
        return Err(LatexExprError::DuplicateOperator(def.tag));
    }
    catalog.insert(def.tag.clone(), def);
    Ok(())
}

// ---------------------------------------------------------------------
// Constructor functions, one per supported operator
// ---------------------------------------------------------------------

fn variadic(tag: &str, args: Vec<Node>) -> Result<Node> {
    Operation::new(tag, args).map(Node::from)
}

/// Summation of one or more operands: `arg0 + arg1 + ...`.
pub fn sum_elements(args: Vec<Node>) -> Result<Node> {
    variadic(tag::ADD, args)
}

/// Alias for [`sum_elements`].
pub fn add(args: Vec<Node>) -> Result<Node> {
    sum_elements(args)
}

/// Alias for [`sum_elements`].
pub fn plus(args: Vec<Node>) -> Result<Node> {
    sum_elements(args)
}

/// Subtraction: `lhs - rhs`.
pub fn sub(lhs: impl Into<Node>, rhs: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::SUB, vec![lhs.into(), rhs.into()]))
}

/// Alias for [`sub`].
pub fn minus(lhs: impl Into<Node>, rhs: impl Into<Node>) -> Node {
    sub(lhs, rhs)
}

/// Multiplication of one or more operands: `arg0 \cdot arg1 \cdot ...`.
pub fn mul(args: Vec<Node>) -> Result<Node> {
    variadic(tag::MUL, args)
}

/// Alias for [`mul`].
pub fn times(args: Vec<Node>) -> Result<Node> {
    mul(args)
}

/// Division rendered as `\frac{ lhs }{ rhs }`.
pub fn div(lhs: impl Into<Node>, rhs: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::DIV, vec![lhs.into(), rhs.into()]))
}

/// Floor division, rendered inside `\lfloor ... \rfloor` and evaluated
/// as the floor of the real quotient.
pub fn div2(lhs: impl Into<Node>, rhs: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::DIV2, vec![lhs.into(), rhs.into()]))
}

/// Negation: `\left( - arg \right)`.
pub fn neg(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::NEG, vec![arg.into()]))
}

/// Unary plus (identity): `\left( + arg \right)`.
pub fn pos(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::POS, vec![arg.into()]))
}

/// Absolute value: `\left| arg \right|`.
pub fn absolute(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::ABS, vec![arg.into()]))
}

/// Maximum of one or more operands.
pub fn maximum(args: Vec<Node>) -> Result<Node> {
    variadic(tag::MAX, args)
}

/// Minimum of one or more operands.
pub fn minimum(args: Vec<Node>) -> Result<Node> {
    variadic(tag::MIN, args)
}

/// Power: `{ base }^{ exponent }`.
pub fn power(base: impl Into<Node>, exponent: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(
        tag::POW,
        vec![base.into(), exponent.into()],
    ))
}

/// Square: `arg^2`.
pub fn sqr(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::SQR, vec![arg.into()]))
}

/// n-th root: `\sqrt[ index ]{ radicand }`.
pub fn root(index: impl Into<Node>, radicand: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(
        tag::ROOT,
        vec![index.into(), radicand.into()],
    ))
}

/// Square root: `\sqrt{ arg }`.
pub fn sqrt(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::SQRT, vec![arg.into()]))
}

/// Sine.
pub fn sin(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::SIN, vec![arg.into()]))
}

/// Cosine.
pub fn cos(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::COS, vec![arg.into()]))
}

/// Tangent.
pub fn tan(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::TAN, vec![arg.into()]))
}

/// Inverse sine; defined for arguments in `[-1, 1]`.
pub fn asin(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::ASIN, vec![arg.into()]))
}

/// Inverse cosine; defined for arguments in `[-1, 1]`.
pub fn acos(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::ACOS, vec![arg.into()]))
}

/// Inverse tangent.
pub fn atan(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::ATAN, vec![arg.into()]))
}

/// Hyperbolic sine.
pub fn sinh(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::SINH, vec![arg.into()]))
}

/// Hyperbolic cosine.
pub fn cosh(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::COSH, vec![arg.into()]))
}

/// Hyperbolic tangent.
pub fn tanh(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::TANH, vec![arg.into()]))
}

/// Natural exponential: `\mathrm{e}^{ arg }`.
pub fn exp(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::EXP, vec![arg.into()]))
}

/// Logarithm with explicit base: `\log_{ base }{ arg }`.
pub fn log(base: impl Into<Node>, arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::LOG, vec![base.into(), arg.into()]))
}

/// Natural logarithm.
pub fn ln(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::LN, vec![arg.into()]))
}

/// Decadic logarithm.
pub fn log10(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::LOG10, vec![arg.into()]))
}

/// Identity pass-through that adds no brackets of its own.
pub fn raw(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::RAW, vec![arg.into()]))
}

/// Round brackets: `\left( arg \right)`.
pub fn r_brackets(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::RBRACKETS, vec![arg.into()]))
}

/// Alias for [`r_brackets`].
pub fn brackets(arg: impl Into<Node>) -> Node {
    r_brackets(arg)
}

/// Square brackets: `\left[ arg \right]`.
pub fn s_brackets(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::SBRACKETS, vec![arg.into()]))
}

/// Curly brackets: `\left\{ arg \right\}`.
pub fn c_brackets(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::CBRACKETS, vec![arg.into()]))
}

/// Angle brackets: `\left\langle arg \right\rangle`.
pub fn a_brackets(arg: impl Into<Node>) -> Node {
    Node::from(Operation::builtin(tag::ABRACKETS, vec![arg.into()]))
}
