use crate::domain::model::{BatchReport, ExpressionLine, OutputFormat};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_to_string(&self, path: &str) -> Result<String>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn batch_name(&self) -> &str;
    fn input_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    fn output_stem(&self) -> &str;
}

pub trait Pipeline: Send + Sync {
    fn extract(&self) -> Result<Vec<ExpressionLine>>;
    fn transform(&self, lines: Vec<ExpressionLine>) -> Result<BatchReport>;
    fn load(&self, report: BatchReport) -> Result<Vec<String>>;
}
