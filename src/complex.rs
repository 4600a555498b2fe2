//! Complex literals carried as strings by segment records.
//!
//! Accepts the textual forms Python's `complex()` accepts and renders the way
//! Python's `repr` does, so values survive a trip through the generated
//! dataclasses unchanged:
//! - `"3"`, `"-2.5"`, `"1e3"` (real only)
//! - `"4j"`, `"-j"` (imaginary only)
//! - `"1+2j"`, `"(1-2.5J)"` (both parts, optional parentheses)
//! - `"1_000.5+2_0j"` (single underscores between digits)
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

/// Unsigned float body. Digit runs may hold single `_` separators between
/// digits; `nan`/`inf`/`infinity` are spelled out.
const NUM: &str = concat!(
    r"(?:\d(?:_?\d)*\.?(?:\d(?:_?\d)*)?(?:e[+-]?\d(?:_?\d)*)?",
    r"|\.\d(?:_?\d)*(?:e[+-]?\d(?:_?\d)*)?",
    r"|nan|inf(?:inity)?)",
);

static COMPLEX_RE: Lazy<Regex> = Lazy::new(|| {
    let src = format!(
        r"(?i)^(?:(?P<re>[+-]?{NUM})(?P<im>[+-](?:{NUM})?j)?|(?P<imonly>[+-]?(?:{NUM})?j))$"
    );
    Regex::new(&src).expect("complex literal regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseComplexError {
    #[error("empty complex literal")]
    Empty,
    #[error("malformed complex literal: {0:?}")]
    Malformed(String),
}

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl FromStr for Complex {
    type Err = ParseComplexError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut body = src.trim();
        if let Some(inner) = body.strip_prefix('(').and_then(|x| x.strip_suffix(')')) {
            body = inner.trim();
        }
        if body.is_empty() {
            return Err(ParseComplexError::Empty);
        }
        let malformed = || ParseComplexError::Malformed(src.to_string());
        let caps = COMPLEX_RE.captures(body).ok_or_else(malformed)?;

        if let Some(im) = caps.name("imonly") {
            let im = parse_imag(im.as_str()).ok_or_else(malformed)?;
            return Ok(Complex::new(0.0, im));
        }
        let re = caps
            .name("re")
            .and_then(|m| parse_float(m.as_str()))
            .ok_or_else(malformed)?;
        let im = match caps.name("im") {
            Some(m) => parse_imag(m.as_str()).ok_or_else(malformed)?,
            None => 0.0,
        };
        Ok(Complex::new(re, im))
    }
}

/// `"+2.5j"` → 2.5, `"-j"` → -1.0, `"j"` → 1.0
fn parse_imag(src: &str) -> Option<f64> {
    let coeff = &src[..src.len() - 1];
    match coeff {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => parse_float(coeff),
    }
}

fn parse_float(src: &str) -> Option<f64> {
    if src.contains('_') {
        src.replace('_', "").parse().ok()
    } else {
        src.parse().ok()
    }
}

/// Python `repr` switches to exponent form outside `1e-4 <= |x| < 1e16`,
/// with a signed, at least two-digit exponent (`1e+16`, `1e-05`).
fn fmt_part(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    let magnitude = x.abs();
    if !x.is_finite() || magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        return format!("{x}");
    }
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    match exp.strip_prefix('-') {
        Some(digits) => format!("{mantissa}e-{digits:0>2}"),
        None => format!("{mantissa}e+{exp:0>2}"),
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.re == 0.0 && self.re.is_sign_positive() {
            return write!(f, "{}j", fmt_part(self.im));
        }
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() { '-' } else { '+' };
        write!(f, "({}{sign}{}j)", fmt_part(self.re), fmt_part(self.im.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(src: &str) -> Complex {
        src.parse().unwrap()
    }

    #[test]
    fn accepts_python_literal_forms() {
        assert_eq!(c("3"), Complex::new(3.0, 0.0));
        assert_eq!(c("-2.5"), Complex::new(-2.5, 0.0));
        assert_eq!(c("4j"), Complex::new(0.0, 4.0));
        assert_eq!(c("j"), Complex::new(0.0, 1.0));
        assert_eq!(c("-J"), Complex::new(0.0, -1.0));
        assert_eq!(c("1+2j"), Complex::new(1.0, 2.0));
        assert_eq!(c("1+j"), Complex::new(1.0, 1.0));
        assert_eq!(c(" (1-2.5j) "), Complex::new(1.0, -2.5));
        assert_eq!(c("1e3+1E-2J"), Complex::new(1000.0, 0.01));
        assert_eq!(c(".5-.25j"), Complex::new(0.5, -0.25));
        assert!(c("inf+1j").re.is_infinite());
        assert!(c("nanj").im.is_nan());
        assert_eq!(c("1_0j"), Complex::new(0.0, 10.0));
        assert_eq!(c("1_000.2_5-1e1_0j"), Complex::new(1000.25, -1e10));
    }

    #[test]
    fn rejects_non_python_forms() {
        assert_eq!("".parse::<Complex>(), Err(ParseComplexError::Empty));
        assert_eq!("()".parse::<Complex>(), Err(ParseComplexError::Empty));
        assert!("1+2i".parse::<Complex>().is_err());
        assert!("1 + 2j".parse::<Complex>().is_err());
        assert!("((1+2j))".parse::<Complex>().is_err());
        assert!("abc".parse::<Complex>().is_err());
        assert!("1+2".parse::<Complex>().is_err());
        assert!("2jj".parse::<Complex>().is_err());
        assert!("1__0j".parse::<Complex>().is_err());
        assert!("_1j".parse::<Complex>().is_err());
        assert!("1_j".parse::<Complex>().is_err());
        assert!("1_.5".parse::<Complex>().is_err());
    }

    #[test]
    fn renders_like_python_repr() {
        assert_eq!(Complex::new(1.0, 2.0).to_string(), "(1+2j)");
        assert_eq!(Complex::new(1.0, -2.5).to_string(), "(1-2.5j)");
        assert_eq!(Complex::new(0.0, 4.0).to_string(), "4j");
        assert_eq!(Complex::new(3.0, 0.0).to_string(), "(3+0j)");
        assert_eq!(Complex::new(-0.0, 1.0).to_string(), "(-0+1j)");
        assert_eq!(c(&Complex::new(0.5, -0.25).to_string()), Complex::new(0.5, -0.25));
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(Complex::new(1e16, 0.0).to_string(), "(1e+16+0j)");
        assert_eq!(Complex::new(0.0, 1e-5).to_string(), "1e-05j");
        assert_eq!(Complex::new(1.5e300, -2.5e-7).to_string(), "(1.5e+300-2.5e-07j)");
        assert_eq!(Complex::new(1e-4, 9999999999999998.0).to_string(), "(0.0001+9999999999999998j)");
        assert_eq!(Complex::new(f64::INFINITY, 0.0).to_string(), "(inf+0j)");
        let big = Complex::new(-1.5e300, 3e-9);
        assert_eq!(c(&big.to_string()), big);
    }
}
