//! Calculator arithmetic - operators, evaluation and result formatting.
//!
//! Values travel as decimal strings (what the user sees) and are parsed
//! to `f64` only for evaluation. Division by zero is defined as 0 and
//! unparseable text reads as 0, so nothing here can fail.

pub mod state;

#[cfg(test)]
mod tests;

use core::fmt::Write;

use crate::config::{RESULT_PRECISION, VALUE_CAPACITY};

pub use state::{CalculatorState, ClearStage};

/// Fixed-capacity decimal string used for every displayed/stored value.
pub type Value = heapless::String<VALUE_CAPACITY>;

/// Arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'+' => Some(Op::Add),
            b'-' => Some(Op::Sub),
            b'*' => Some(Op::Mul),
            b'/' => Some(Op::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> u8 {
        match self {
            Op::Add => b'+',
            Op::Sub => b'-',
            Op::Mul => b'*',
            Op::Div => b'/',
        }
    }

    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div if b == 0.0 => 0.0,
            Op::Div => a / b,
        }
    }
}

/// Parse a displayed value. Anything unparseable counts as 0.
pub fn parse_value(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Evaluate `a op b` on displayed values and format the result.
pub fn evaluate(a: &str, op: Op, b: &str) -> Value {
    format_result(op.apply(parse_value(a), parse_value(b)))
}

/// Render with fixed fractional precision, then strip trailing zeros and
/// a bare trailing point: `2.500000` → `2.5`, `4.000000` → `4`.
///
/// Magnitudes too wide for the value buffer fall back to exponent form.
pub fn format_result(result: f64) -> Value {
    let mut out = Value::new();
    if write!(out, "{:.*}", RESULT_PRECISION, result).is_err() {
        out.clear();
        // `{:e}` of any f64 fits in well under 32 bytes.
        let _ = write!(out, "{:e}", result);
        return out;
    }

    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    if out.as_str() == "-0" {
        out.clear();
        let _ = out.push('0');
    }
    out
}

/// Build a value from text, truncated to the buffer capacity.
pub fn value_from(text: &str) -> Value {
    let mut value = Value::new();
    for c in text.chars() {
        if value.push(c).is_err() {
            break;
        }
    }
    value
}
