mod aggregate;
mod cli;
mod config;
mod cost;
mod dashboard;
mod error;
mod filter;
mod graph;
mod interactive;
mod logging;
mod output;
mod pricing;
mod series;
mod source;
mod tabular;
mod types;
mod usage;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use dashboard::Dashboard;
use series::SeriesView;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.cli);

    let config = config::load_config();
    let mode = cli.effective_command();
    let filter = cli.filter();

    let usages = source::source_from_arg(&cli.usages_location(&config));
    let pricing = source::source_from_arg(&cli.pricing_location(&config));

    let dashboard = Dashboard::load(usages.as_ref(), pricing.as_ref())
        .context("Failed to load dashboard data")?;

    match mode {
        cli::Command::Options => {
            match cli.output_format(&config) {
                cli::OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(dashboard.options())
                        .context("Failed to serialize options")?
                ),
                cli::OutputFormat::Table => output::print_options(dashboard.options()),
            }
            return Ok(());
        }
        cli::Command::Export { ref output } => {
            let rows: Vec<_> = dashboard.records(&filter).iter().map(usage::to_row).collect();
            let text = tabular::to_csv(&rows, usage::USAGE_COLUMNS)?;
            match output {
                Some(path) => fs::write(path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{text}"),
            }
            return Ok(());
        }
        cli::Command::Dashboard => return interactive::run(&dashboard, filter),
        cli::Command::Daily | cli::Command::Plot => {}
    }

    let (series, report) = dashboard.compute_series_with_report(&filter);
    if !cli.cli {
        eprintln!(
            "Found {} usage records, {} priced, {} skipped.",
            dashboard.record_count(),
            report.priced,
            report.skipped()
        );
        if report.malformed_units > 0 {
            eprintln!(
                "{} priced records had unreadable unit counts, counted as zero.",
                report.malformed_units
            );
        }
    }

    let view = SeriesView::new(&series, &filter, dashboard.options());

    if mode == cli::Command::Plot {
        return graph::render(&view);
    }

    match cli.output_format(&config) {
        cli::OutputFormat::Json => output::print_json(&view),
        cli::OutputFormat::Table => output::print_table(&view),
    }

    Ok(())
}
