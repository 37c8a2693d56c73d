//! Evaluator for expressions made of `C(n,r)` and `P(n,r)` calls.
//!
//! Calls are found by a left-to-right, non-overlapping scan; every other
//! character in the input is ignored. The value of an expression is the
//! product of all of its calls.
//!
//! Arguments are digit runs of any length. `r > n` yields `0` however wide
//! the digits are; a value that needs an operand beyond `u128` to compute is
//! an overflow.

use crate::core::arithmetic::{arrange, choose};
use crate::domain::model::{Call, CallKind, CallValue, Evaluation, Operand};
use crate::utils::error::{CalcError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::str::FromStr;

static CALL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([CP])\(([0-9]+),\s*([0-9]+)\)").expect("call pattern is valid"));

static SINGLE_CALL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([CP])\(([0-9]+),\s*([0-9]+)\)\s*$").expect("call pattern is valid")
});

fn call_from_captures(caps: &Captures<'_>) -> Option<Call> {
    let kind = caps[1].chars().next().and_then(CallKind::from_marker)?;
    Some(Call {
        kind,
        n: Operand::from_digits(&caps[2]),
        r: Operand::from_digits(&caps[3]),
    })
}

impl Call {
    pub fn evaluate(&self) -> Result<u128> {
        if self.r > self.n {
            return Ok(0);
        }
        match (&self.n, &self.r, self.kind) {
            (Operand::Fits(n), Operand::Fits(r), CallKind::Combination) => choose(*n, *r),
            (Operand::Fits(n), Operand::Fits(r), CallKind::Permutation) => arrange(*n, *r),
            // n is wide from here on
            _ if self.r.is_zero() => Ok(1),
            (_, _, CallKind::Combination) if self.r == self.n => Ok(1),
            _ => Err(CalcError::overflow(self.to_string())),
        }
    }
}

impl FromStr for Call {
    type Err = CalcError;

    /// Parses exactly one call, allowing surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let caps = SINGLE_CALL_PATTERN
            .captures(s)
            .ok_or_else(CalcError::invalid_format)?;
        call_from_captures(&caps).ok_or_else(CalcError::invalid_format)
    }
}

/// Every call in `expression`, in order of appearance.
///
/// An input with no call yields an empty list; only the evaluators treat that
/// as an error.
pub fn parse_calls(expression: &str) -> Vec<Call> {
    CALL_PATTERN
        .captures_iter(expression)
        .filter_map(|caps| call_from_captures(&caps))
        .collect()
}

/// Evaluates every call and multiplies the values together.
///
/// Fails with [`CalcError::InvalidFormat`] when the expression holds no call.
pub fn evaluate_detailed(expression: &str) -> Result<Evaluation> {
    let calls = parse_calls(expression);
    if calls.is_empty() {
        tracing::debug!(expression, "no call found in expression");
        return Err(CalcError::invalid_format());
    }

    let mut result: u128 = 1;
    let mut values = Vec::with_capacity(calls.len());
    for call in calls {
        let value = call.evaluate()?;
        result = result
            .checked_mul(value)
            .ok_or_else(|| CalcError::overflow(format!("product up to {}", call)))?;
        values.push(CallValue { call, value });
    }

    tracing::trace!(expression, calls = values.len(), result = %result, "expression evaluated");
    Ok(Evaluation {
        calls: values,
        result,
    })
}

/// Product of every `C(n,r)` / `P(n,r)` call in `expression`.
pub fn evaluate_expression(expression: &str) -> Result<u128> {
    evaluate_detailed(expression).map(|evaluation| evaluation.result)
}
