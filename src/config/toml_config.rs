use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub batch: BatchInfo,
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
}

impl Default for BatchInfo {
    fn default() -> Self {
        Self {
            name: "batch".to_string(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_output_formats")]
    pub formats: Vec<String>,
    pub filename: Option<String>,
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_output_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            formats: default_output_formats(),
            filename: None,
        }
    }
}

impl BatchConfig {
    /// Config for a run described only by an input file.
    pub fn for_input(input_path: impl Into<String>) -> Self {
        Self {
            batch: BatchInfo::default(),
            input: InputConfig {
                path: input_path.into(),
            },
            output: OutputConfig::default(),
        }
    }

    /// Loads a batch configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalcError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// A `${VAR}` that survived substitution names a variable that was never set.
    fn check_substituted(field: &str, value: &str) -> Result<()> {
        match ENV_VAR_PATTERN.captures(value) {
            Some(caps) => Err(CalcError::ConfigValidationError {
                field: field.to_string(),
                message: format!("environment variable {} is not set", &caps[1]),
            }),
            None => Ok(()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("batch.name", &self.batch.name)?;
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.path", &self.output.path)?;
        Self::check_substituted("input.path", &self.input.path)?;
        Self::check_substituted("output.path", &self.output.path)?;
        validation::validate_choices("output.formats", &self.output.formats, &OutputFormat::ALL)?;
        validation::validate_file_stem("output.filename", self.output_stem())?;
        Ok(())
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl ConfigProvider for BatchConfig {
    fn batch_name(&self) -> &str {
        &self.batch.name
    }

    fn input_path(&self) -> &str {
        &self.input.path
    }

    /// Unknown entries are rejected by validation; here they are skipped.
    fn output_formats(&self) -> Vec<OutputFormat> {
        self.output
            .formats
            .iter()
            .filter_map(|f| f.parse().ok())
            .collect()
    }

    fn output_stem(&self) -> &str {
        self.output.filename.as_deref().unwrap_or(&self.batch.name)
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
