//! Factorial, combination and permutation over exact `u128` values.
//!
//! Out-of-domain arguments return the `0` sentinel instead of an error, so a
//! half-typed `C(3,5)` still evaluates. Results that do not fit in `u128` are
//! reported as [`CalcError::Overflow`].

use crate::utils::error::{CalcError, Result};

/// `n!`, or `0` when `n` is negative.
pub fn factorial(n: i64) -> Result<u128> {
    if n < 0 {
        return Ok(0);
    }

    let mut result: u128 = 1;
    for i in 2..=n as u128 {
        result = result
            .checked_mul(i)
            .ok_or_else(|| CalcError::overflow(format!("{}!", n)))?;
    }
    Ok(result)
}

/// Number of `r`-element subsets of an `n`-element set; `0` when `r > n`.
pub fn combination(n: i64, r: i64) -> Result<u128> {
    if n < 0 || r < 0 {
        return Ok(0);
    }
    choose(n as u128, r as u128)
}

/// Number of ordered `r`-element sequences from an `n`-element set; `0` when `r > n`.
pub fn permutation(n: i64, r: i64) -> Result<u128> {
    if n < 0 || r < 0 {
        return Ok(0);
    }
    arrange(n as u128, r as u128)
}

/// `C(n,r)` over unsigned operands.
pub fn choose(n: u128, r: u128) -> Result<u128> {
    if r > n {
        return Ok(0);
    }

    // C(n,r) = C(n,n-r)
    let k = r.min(n - r);

    // C(n,i+1) = C(n,i)·(n-i)/(i+1); dividing out the common factor first
    // keeps every intermediate no larger than the next coefficient
    let mut result: u128 = 1;
    for i in 0..k {
        let g = gcd(result, i + 1);
        let factor = (n - i) / ((i + 1) / g);
        result = (result / g)
            .checked_mul(factor)
            .ok_or_else(|| CalcError::overflow(format!("C({},{})", n, r)))?;
    }
    Ok(result)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `P(n,r)` over unsigned operands.
pub fn arrange(n: u128, r: u128) -> Result<u128> {
    if r > n {
        return Ok(0);
    }

    let mut result: u128 = 1;
    for i in 0..r {
        result = result
            .checked_mul(n - i)
            .ok_or_else(|| CalcError::overflow(format!("P({},{})", n, r)))?;
    }
    Ok(result)
}
