pub mod arithmetic;
pub mod engine;
pub mod expression;
pub mod onto;
pub mod pipeline;

pub use crate::domain::model::{BatchRecord, BatchReport, ExpressionLine};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
