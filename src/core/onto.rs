//! Surjection counting and Stirling numbers of the second kind.
//!
//! `S(m,n)` is filled in with `S(i,j) = j·S(i-1,j) + S(i-1,j-1)`. Every entry
//! the table touches is bounded by `S(m,n)`, so an overflow while filling it
//! means the answer itself does not fit. Onto functions are `n! · S(m,n)`.

use crate::core::arithmetic::factorial;
use crate::utils::error::{CalcError, Result};

fn checked_power(base: i128, exp: i64) -> Option<i128> {
    match base {
        0 => Some(if exp == 0 { 1 } else { 0 }),
        1 => Some(1),
        _ => u32::try_from(exp).ok().and_then(|e| base.checked_pow(e)),
    }
}

/// Only rows with `m - n >= i - j` matter, so the table is kept as a single
/// column indexed by `d = i - j`, updated in place row by row.
fn stirling_table(m: usize, n: usize) -> Result<u128> {
    let overflow = || CalcError::overflow(format!("S({},{})", m, n));
    let depth = m - n;

    // col[d] holds S(i, i-d) for the current row i
    let mut col: Vec<u128> = vec![1];
    for i in 2..=m {
        let top = (i - 1).min(depth);
        while col.len() <= top {
            col.push(0);
        }
        for d in (i.saturating_sub(n).max(1)..=top).rev() {
            let j = (i - d) as u128;
            col[d] = j
                .checked_mul(col[d - 1])
                .and_then(|v| v.checked_add(col[d]))
                .ok_or_else(overflow)?;
        }
    }
    Ok(col[depth])
}

/// `S(m,n)`: ways to partition an `m`-element set into `n` non-empty blocks.
pub fn stirling_second_kind(m: i64, n: i64) -> Result<u128> {
    if m < 0 || n < 0 || n > m {
        return Ok(0);
    }
    match (m, n) {
        _ if n == m => Ok(1),
        (_, 0) => Ok(0),
        (_, 1) => Ok(1),
        _ => stirling_table(m as usize, n as usize),
    }
}

/// Number of onto functions from an `m`-element set to an `n`-element set.
///
/// Returns `0` when `n > m`, since no function can then cover the codomain.
pub fn count_onto_functions(m: i64, n: i64) -> Result<u128> {
    if m < 0 || n < 0 || n > m {
        return Ok(0);
    }
    let partitions = stirling_second_kind(m, n)?;
    factorial(n)
        .ok()
        .and_then(|f| f.checked_mul(partitions))
        .ok_or_else(|| CalcError::overflow(format!("onto functions from {} to {}", m, n)))
}

/// Floating-point `S(m,n)` from the inclusion-exclusion sum
/// `Σ (-1)^i · C(n,i) · (n-i)^m / n!` in `f64`. Loses precision for large
/// inputs but never fails.
pub fn stirling_second_kind_f64(m: i64, n: i64) -> f64 {
    if n < 0 {
        return 0.0;
    }

    let fact = |k: i64| (2..=k).fold(1.0_f64, |acc, i| acc * i as f64);
    let comb = |n: i64, k: i64| {
        if k > n {
            0.0
        } else {
            fact(n) / (fact(k) * fact(n - k))
        }
    };

    let mut total = 0.0_f64;
    for i in 0..=n {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        total += sign * comb(n, i) * ((n - i) as f64).powf(m as f64);
    }
    total / fact(n)
}

/// Total number of functions from an `m`-element set to an `n`-element set, `n^m`.
pub fn count_functions(m: i64, n: i64) -> Result<u128> {
    if m < 0 || n < 0 {
        return Ok(0);
    }
    checked_power(n as i128, m)
        .and_then(|v| u128::try_from(v).ok())
        .ok_or_else(|| CalcError::overflow(format!("{}^{}", n, m)))
}
