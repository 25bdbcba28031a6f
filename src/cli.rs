use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::config::{Config, DEFAULT_PRICING, DEFAULT_USAGES};
use crate::types::FilterCriteria;

#[derive(Parser, Debug)]
#[command(
    name = "spendchart",
    about = "Daily cost chart from usage and pricing CSVs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Usage dataset: file path or http(s) URL [default: usages.csv]
    #[arg(long, global = true)]
    pub usages: Option<String>,

    /// Pricing dataset: file path or http(s) URL [default: costs.csv]
    #[arg(long, global = true)]
    pub pricing: Option<String>,

    /// Only include usage for this model (exact match)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Only include usage of this type (exact match)
    #[arg(long = "type", global = true)]
    pub kind: Option<String>,

    /// Output format: table (default), json
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress diagnostics (for scripting)
    #[arg(long, global = true)]
    pub cli: bool,

    /// Verbose diagnostics, including every skipped row
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Daily cost series (default)
    Daily,
    /// Show a bar chart of daily cost
    Plot,
    /// List the models and types available for filtering
    Options,
    /// Write the filtered usage rows as CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive chart with model/type selectors
    Dashboard,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub fn effective_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Daily)
    }

    pub fn filter(&self) -> FilterCriteria {
        FilterCriteria::new(self.model.clone(), self.kind.clone())
    }

    /// Flags win over the config file, which wins over built-in defaults.
    pub fn usages_location(&self, config: &Config) -> String {
        self.usages
            .clone()
            .or_else(|| config.usages.clone())
            .unwrap_or_else(|| DEFAULT_USAGES.to_string())
    }

    pub fn pricing_location(&self, config: &Config) -> String {
        self.pricing
            .clone()
            .or_else(|| config.pricing.clone())
            .unwrap_or_else(|| DEFAULT_PRICING.to_string())
    }

    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format.or(config.format).unwrap_or(OutputFormat::Table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_daily_table_on_local_files() {
        let cli = Cli::parse_from(["spendchart"]);
        let config = Config::default();
        assert_eq!(cli.effective_command(), Command::Daily);
        assert_eq!(cli.usages_location(&config), "usages.csv");
        assert_eq!(cli.pricing_location(&config), "costs.csv");
        assert_eq!(cli.output_format(&config), OutputFormat::Table);
        assert!(cli.filter().is_unconstrained());
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            usages: Some("cfg-usages.csv".into()),
            pricing: Some("cfg-costs.csv".into()),
            format: Some(OutputFormat::Json),
        };
        let cli = Cli::parse_from(["spendchart", "plot", "--usages", "u.csv", "--format", "table"]);
        assert_eq!(cli.effective_command(), Command::Plot);
        assert_eq!(cli.usages_location(&config), "u.csv");
        assert_eq!(cli.pricing_location(&config), "cfg-costs.csv");
        assert_eq!(cli.output_format(&config), OutputFormat::Table);
    }

    #[test]
    fn model_and_type_flags_build_the_filter() {
        let cli = Cli::parse_from(["spendchart", "--model", "gpt-4", "--type", "chat"]);
        let filter = cli.filter();
        assert_eq!(filter.model(), Some("gpt-4"));
        assert_eq!(filter.kind(), Some("chat"));
    }
}
