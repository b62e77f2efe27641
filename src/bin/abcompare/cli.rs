// src/cli.rs
use clap::{Parser, ValueEnum};
/// A CLI tool that compares variant posteriors by Monte Carlo sampling.
#[derive(Parser, Debug)]
#[command(name = "abcompare", version, about = "Posterior Comparison of Variant Proportions")]
pub struct Cli {
    #[arg(
        value_name = "COUNTS",
        help = "File path to the tab-separated count table (variant, successes, trials)"
    )]
    pub counts: String,

    #[arg(
        long,
        short,
        default_value = "abcompare.tsv",
        value_name = "OUT",
        help = "Output file path"
    )]
    pub out: String,

    #[arg(
        long,
        default_value = "100000",
        help = "Monte Carlo draws per variant pair"
    )]
    pub samples: usize,

    #[arg(
        long,
        help = "Base seed for reproducible sampling, omit for entropy seeding"
    )]
    pub seed: Option<u64>,

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
