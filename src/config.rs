use clap::{Parser, ValueEnum};
use sales_aggregator::numeric::NumericPolicy;
use std::path::{Path, PathBuf};

/// Output format for the finished report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Labelled sections, one per aggregate
    #[default]
    Text,
    /// One CSV row per month
    Csv,
    /// The whole report as a JSON object
    Json,
}

/// Handling of quantity and revenue fields that are not numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Treat them as NaN, which poisons the sums they reach
    #[default]
    Propagate,
    /// Leave the row out of the affected aggregate
    Skip,
}

impl From<PolicyArg> for NumericPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Propagate => Self::Propagate,
            PolicyArg::Skip => Self::Skip,
        }
    }
}

/// Trait for reading configuration parameters
pub trait Config {
    fn input_path(&self) -> &Path;
    fn output_format(&self) -> OutputFormat;
    fn numeric_policy(&self) -> NumericPolicy;
}

/// CLI configuration
#[derive(Parser, Debug)]
#[command(
    name = "sales-report",
    about = "Computes monthly sales aggregates from a CSV transaction log",
    version
)]
pub struct CliConfig {
    /// Path to the sales CSV (date,item,category,quantity,revenue)
    #[arg(value_name = "INPUT_FILE", default_value = "sales-data.csv")]
    input_file: PathBuf,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// What to do with non-numeric quantity or revenue fields
    #[arg(long, value_enum, default_value_t = PolicyArg::Propagate)]
    numeric_policy: PolicyArg,
}

impl Config for CliConfig {
    fn input_path(&self) -> &Path {
        &self.input_file
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn numeric_policy(&self) -> NumericPolicy {
        self.numeric_policy.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["sales-report"]);

        assert_eq!(config.input_path(), Path::new("sales-data.csv"));
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.numeric_policy(), NumericPolicy::Propagate);
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "sales-report",
            "q1.csv",
            "--format",
            "json",
            "--numeric-policy",
            "skip",
        ]);

        assert_eq!(config.input_path(), Path::new("q1.csv"));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.numeric_policy(), NumericPolicy::Skip);
    }
}
