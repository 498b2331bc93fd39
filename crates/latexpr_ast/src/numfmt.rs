//! Numeric display formatting.
//!
//! Converts a floating-point value into LaTeX text per configurable
//! precision rules, covering the printf-style `%g`/`%f`/`%e`/`%d` specs
//! and the optional `value \cdot 10^{e}` scientific-exponent display.

/// Precision/style spec for one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `%g`-like: the given number of significant digits, trailing zeros
    /// stripped, scientific notation for very large or very small values.
    Auto(usize),
    /// `%.Nf`: fixed number of decimal places.
    Fixed(usize),
    /// `%.Ne`: scientific notation with N mantissa decimals.
    Sci(usize),
    /// `%d`: rounded to the nearest integer.
    Int,
}

impl Default for Style {
    fn default() -> Self {
        Style::Auto(6)
    }
}

impl Style {
    pub fn apply(self, v: f64) -> String {
        match self {
            Style::Auto(sig) => format_g(v, sig),
            Style::Fixed(dec) => format!("{:.*}", dec, v),
            Style::Sci(dec) => format!("{:.*e}", dec, v),
            Style::Int => format!("{}", v.round() as i64),
        }
    }
}

/// Complete display spec: a [`Style`] plus an optional scientific
/// exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Format {
    pub style: Style,
    /// When non-zero the value is scaled by `10^-exponent` and rendered
    /// as `{ scaled \cdot 10^{exponent} }`.
    pub exponent: i32,
}

impl Format {
    pub fn new(style: Style) -> Self {
        Format { style, exponent: 0 }
    }

    pub fn with_exponent(mut self, exponent: i32) -> Self {
        self.exponent = exponent;
        self
    }

    /// Formats `v` as LaTeX text.
    ///
    /// Negative values are wrapped in `\left( ... \right)` so a leading
    /// minus sign never collides with a preceding operator glyph.
    pub fn format(&self, v: f64) -> String {
        if self.exponent == 0 {
            let body = self.style.apply(v);
            if v < 0.0 {
                format!(r"\left( {} \right)", body)
            } else {
                body
            }
        } else {
            let scaled = v * 10f64.powi(-self.exponent);
            let body = self.style.apply(scaled);
            if v < 0.0 {
                format!(r"\left( {} \cdot 10^{{{}}} \right)", body, self.exponent)
            } else {
                format!(r"{{ {} \cdot 10^{{{}}} }}", body, self.exponent)
            }
        }
    }
}

/// printf `%g` lookalike: `sig` significant digits, trailing zeros
/// stripped, falling back to scientific notation when the magnitude
/// leaves the `[1e-4, 10^sig)` window.
pub fn format_g(v: f64, sig: usize) -> String {
    let sig = sig.max(1);
    if v == 0.0 {
        return "0".to_string();
    }
    let exp = v.abs().log10().floor() as i32;
    if exp < -4 || exp >= sig as i32 {
        let s = format!("{:.*e}", sig - 1, v);
        match s.split_once('e') {
            Some((mantissa, e)) => format!("{}e{}", strip_zeros(mantissa), e),
            None => s,
        }
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, v))
    }
}

fn strip_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
