pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{BatchArgs, CliConfig, Command};

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::BatchConfig;
    use crate::utils::error::{CalcError, Result};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "combi-calc")]
    #[command(about = "Combinatorics calculator: C(n,r)/P(n,r) expressions and onto-function counts")]
    pub struct CliConfig {
        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Evaluate an expression such as "C(10,3) P(5,2)"
        Eval {
            #[arg(required = true, num_args = 1..)]
            expression: Vec<String>,

            /// Print each call's value before the product
            #[arg(long)]
            steps: bool,
        },

        /// n!
        #[command(allow_negative_numbers = true)]
        Fact { n: i64 },

        /// C(n,r)
        #[command(allow_negative_numbers = true)]
        Comb { n: i64, r: i64 },

        /// P(n,r)
        #[command(allow_negative_numbers = true)]
        Perm { n: i64, r: i64 },

        /// Stirling number of the second kind S(m,n)
        #[command(allow_negative_numbers = true)]
        Stirling {
            m: i64,
            n: i64,

            /// Use floating-point arithmetic
            #[arg(long)]
            float: bool,
        },

        /// Number of onto functions from an m-element set to an n-element set
        #[command(allow_negative_numbers = true)]
        Onto { m: i64, n: i64 },

        /// Evaluate one expression per line of a file
        Batch(BatchArgs),
    }

    #[derive(Debug, Clone, clap::Args)]
    pub struct BatchArgs {
        /// Path to a TOML batch configuration
        #[arg(short, long)]
        pub config: Option<String>,

        /// Input file, overrides input.path
        #[arg(short, long)]
        pub input: Option<String>,

        /// Output directory, overrides output.path
        #[arg(short, long)]
        pub output: Option<String>,

        /// Output formats, overrides output.formats
        #[arg(long, value_delimiter = ',')]
        pub formats: Vec<String>,

        /// Show what would be processed without writing anything
        #[arg(long)]
        pub dry_run: bool,
    }

    impl BatchArgs {
        /// Loads the TOML config if given, then applies command-line overrides.
        pub fn resolve(&self) -> Result<BatchConfig> {
            let mut config = match (&self.config, &self.input) {
                (Some(path), _) => BatchConfig::from_file(path)?,
                (None, Some(input)) => BatchConfig::for_input(input.clone()),
                (None, None) => {
                    return Err(CalcError::MissingConfigError {
                        field: "input.path".to_string(),
                    })
                }
            };

            if let Some(input) = &self.input {
                config.input.path = input.clone();
            }
            if let Some(output) = &self.output {
                config.output.path = output.clone();
            }
            if !self.formats.is_empty() {
                config.output.formats = self.formats.clone();
            }
            Ok(config)
        }
    }

}
