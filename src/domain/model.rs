use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which counting formula a call marker selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// `C(n,r)`
    Combination,
    /// `P(n,r)`
    Permutation,
}

impl CallKind {
    pub fn marker(self) -> char {
        match self {
            CallKind::Combination => 'C',
            CallKind::Permutation => 'P',
        }
    }

    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'C' => Some(CallKind::Combination),
            'P' => Some(CallKind::Permutation),
            _ => None,
        }
    }
}

/// Non-negative call argument as written in an expression.
///
/// Digit runs beyond `u128::MAX` are kept as text so the `r > n` rule still
/// applies to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    Fits(u128),
    /// Decimal digits without leading zeros.
    Wide(String),
}

impl Operand {
    pub fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            return Operand::Fits(0);
        }
        match trimmed.parse::<u128>() {
            Ok(value) => Operand::Fits(value),
            Err(_) => Operand::Wide(trimmed.to_string()),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Operand::Fits(0))
    }
}

impl Ord for Operand {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Operand::Fits(a), Operand::Fits(b)) => a.cmp(b),
            (Operand::Fits(_), Operand::Wide(_)) => Ordering::Less,
            (Operand::Wide(_), Operand::Fits(_)) => Ordering::Greater,
            (Operand::Wide(a), Operand::Wide(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        }
    }
}

impl PartialOrd for Operand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Fits(value) => write!(f, "{}", value),
            Operand::Wide(digits) => f.write_str(digits),
        }
    }
}

/// One `C(n,r)` / `P(n,r)` occurrence found in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub kind: CallKind,
    pub n: Operand,
    pub r: Operand,
}

impl Call {
    pub fn combination(n: u128, r: u128) -> Self {
        Self {
            kind: CallKind::Combination,
            n: Operand::Fits(n),
            r: Operand::Fits(r),
        }
    }

    pub fn permutation(n: u128, r: u128) -> Self {
        Self {
            kind: CallKind::Permutation,
            n: Operand::Fits(n),
            r: Operand::Fits(r),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.kind.marker(), self.n, self.r)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CallValue {
    pub call: Call,
    pub value: u128,
}

/// Product of every call in an expression, with the per-call factors kept.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub calls: Vec<CallValue>,
    pub result: u128,
}

impl Evaluation {
    /// Renders the factors as `C(4,2)=6 × P(3,1)=3`.
    pub fn steps(&self) -> String {
        self.calls
            .iter()
            .map(|cv| format!("{}={}", cv.call, cv.value))
            .collect::<Vec<_>>()
            .join(" × ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const ALL: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// A non-blank, non-comment line read from a batch input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionLine {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok(Evaluation),
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    pub line: usize,
    pub expression: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub records: Vec<BatchRecord>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Ok(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }
}
