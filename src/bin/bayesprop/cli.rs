// src/cli.rs
use clap::{Parser, ValueEnum};
/// A CLI tool that summarises variant proportions under a Beta prior.
#[derive(Parser, Debug)]
#[command(name = "bayesprop", version, about = "Bayesian Proportion Summaries")]
pub struct Cli {
    #[arg(
        value_name = "COUNTS",
        help = "File path to the tab-separated count table (variant, successes, trials)"
    )]
    pub counts: String,

    #[arg(
        long,
        short,
        default_value = "bayesprop",
        value_name = "OUT",
        help = "Output directory path"
    )]
    pub out: String,

    #[arg(
        value_enum,
        long,
        default_value = "uniform",
        help = "Prior placed on every variant proportion"
    )]
    pub prior: PriorChoice,

    #[arg(
        long,
        default_value = "1.0",
        help = "Prior alpha, used when --prior custom"
    )]
    pub alpha_prior: f64,

    #[arg(
        long,
        default_value = "1.0",
        help = "Prior beta, used when --prior custom"
    )]
    pub beta_prior: f64,

    #[arg(
        long,
        default_value = "0.95",
        help = "Credibility level for the posterior intervals"
    )]
    pub level: f64,

    #[arg(
        long,
        default_value = "0",
        help = "Points per posterior density grid, 0 disables density output"
    )]
    pub density_points: usize,

    #[arg(
        value_enum,
        long,
        default_value = "normal",
        value_name = "VERBOSITY",
        help = "Verbosity level"
    )]
    pub verbosity: LogLevel,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum PriorChoice {
    uniform,
    jeffreys,
    custom,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    verbose,
    normal,
    silent,
}
