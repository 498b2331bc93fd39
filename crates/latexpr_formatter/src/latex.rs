//! LaTeX macro definitions for computed values.
//!
//! Rendered expressions usually end up in a LaTeX document; defining
//! each value as a macro (`\def\MYVALUE{...}`) keeps the document source
//! free of copied numbers and lets a regeneration run update them all.

use latexpr_ast::{Expression, RenderMode, Variable};

/// Which macro-defining command wraps the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatexCommand {
    /// `\def\NAME{body}`
    #[default]
    Def,
    /// `\newcommand{\NAME}{body}`
    NewCommand,
    /// `\renewcommand{\NAME}{body}`
    RenewCommand,
}

/// Which rendering of the source object becomes the macro body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Bare numeric value, unformatted.
    Float,
    /// Formatted result.
    Result,
    /// Formatted result with the unit suffix.
    ResultWithUnit,
    /// Symbolic rendering.
    Symbolic,
    /// Substituted rendering.
    Substituted,
    /// The full display form, e.g. `name = <symbolic> = ... unit`.
    All,
}

/// Wraps `body` in the requested macro-defining command.
///
/// `name` must be a valid LaTeX control-sequence name (letters only);
/// that is the caller's responsibility.
pub fn to_latex_variable(name: &str, body: &str, command: LatexCommand) -> String {
    match command {
        LatexCommand::Def => format!(r"\def\{}{{{}}}", name, body),
        LatexCommand::NewCommand => format!(r"\newcommand{{\{}}}{{{}}}", name, body),
        LatexCommand::RenewCommand => format!(r"\renewcommand{{\{}}}{{{}}}", name, body),
    }
}

/// Conversion of expression-tree objects into LaTeX macro definitions.
pub trait ToLatexVariable {
    /// The rendering selected by `part`.
    fn part(&self, part: Part) -> latexpr_ast::Result<String>;

    fn to_latex_variable(
        &self,
        name: &str,
        part: Part,
        command: LatexCommand,
    ) -> latexpr_ast::Result<String> {
        Ok(to_latex_variable(name, &self.part(part)?, command))
    }

    /// `\def\NAME{<bare numeric value>}`.
    fn to_latex_variable_float(&self, name: &str) -> latexpr_ast::Result<String> {
        self.to_latex_variable(name, Part::Float, LatexCommand::Def)
    }

    /// `\def\NAME{<formatted result>}`.
    fn to_latex_variable_str(&self, name: &str) -> latexpr_ast::Result<String> {
        self.to_latex_variable(name, Part::Result, LatexCommand::Def)
    }

    /// `\def\NAME{<formatted result with unit>}`.
    fn to_latex_variable_val_unit(&self, name: &str) -> latexpr_ast::Result<String> {
        self.to_latex_variable(name, Part::ResultWithUnit, LatexCommand::Def)
    }

    /// `\def\NAME{<symbolic rendering>}`.
    fn to_latex_variable_symb(&self, name: &str) -> latexpr_ast::Result<String> {
        self.to_latex_variable(name, Part::Symbolic, LatexCommand::Def)
    }

    /// `\def\NAME{<substituted rendering>}`.
    fn to_latex_variable_subst(&self, name: &str) -> latexpr_ast::Result<String> {
        self.to_latex_variable(name, Part::Substituted, LatexCommand::Def)
    }

    /// `\def\NAME{<full display form>}`.
    fn to_latex_variable_all(&self, name: &str) -> latexpr_ast::Result<String> {
        self.to_latex_variable(name, Part::All, LatexCommand::Def)
    }
}

impl ToLatexVariable for Variable {
    fn part(&self, part: Part) -> latexpr_ast::Result<String> {
        Ok(match part {
            Part::Float => self.evaluate()?.to_string(),
            Part::Result => self.str_result(),
            Part::ResultWithUnit => self.str_result_with_unit(),
            Part::Symbolic => self.str_symbolic(),
            Part::Substituted => self.str_substituted(),
            Part::All => self.to_string(),
        })
    }
}

impl ToLatexVariable for Expression {
    fn part(&self, part: Part) -> latexpr_ast::Result<String> {
        Ok(match part {
            Part::Float => self.evaluate()?.to_string(),
            Part::Result => self.str_result()?,
            Part::ResultWithUnit => self.str_result_with_unit()?,
            Part::Symbolic => self.render(RenderMode::Symbolic)?,
            Part::Substituted => self.render(RenderMode::Substituted)?,
            Part::All => self.full_render()?,
        })
    }
}
