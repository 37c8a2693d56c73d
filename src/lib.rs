pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{BatchArgs, CliConfig, Command};

pub use config::cli::{LocalStorage, SplitStorage};
pub use config::toml_config::BatchConfig;
pub use crate::core::arithmetic::{combination, factorial, permutation};
pub use crate::core::engine::{BatchEngine, BatchSummary};
pub use crate::core::expression::{evaluate_detailed, evaluate_expression, parse_calls};
pub use crate::core::onto::{count_functions, count_onto_functions, stirling_second_kind, stirling_second_kind_f64};
pub use crate::core::pipeline::BatchPipeline;
pub use domain::model::{Call, CallKind, Evaluation, Operand};
pub use utils::error::{CalcError, Result};
