use crate::cli;
use anyhow::{Result, anyhow, bail};
use bayesprop_utils::counts;
use bayesprop_utils::model::BetaParams;
use bayesprop_utils::report::{self, PosteriorSummary};
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::fs::File;
use std::path::Path;

pub fn run(args: &cli::Cli) -> Result<()> {
    info!("Loading count table: {}", args.counts);
    let counts_file = File::open(&args.counts)
        .map_err(|e| anyhow!("Could not open count table: {} ({})", args.counts, e))?;
    let records = counts::read_count_records(counts_file)?;
    info!("Loaded {} count records", records.len());

    let records = counts::merge_by_variant(&records);
    if records.is_empty() {
        bail!("Count table contains no records");
    }
    debug!("{} variants after merging", records.len());

    let prior = resolve_prior(args)?;
    info!("Using prior {}", prior);

    let mut summaries = records
        .iter()
        .map(|record| PosteriorSummary::from_counts(record, &prior, args.level))
        .collect::<Result<Vec<_>>>()?;
    summaries.sort_by_key(|s| Reverse(OrderedFloat(s.posterior_mean)));

    let outdir = Path::new(&args.out);
    let summary_path = outdir.join("summary.tsv");
    let mut writer = report::SummaryWriter::new(&summary_path)?;
    writer.write_header()?;
    writer.write_summaries_iter(summaries.iter())?;
    info!("Wrote {} variant summaries to {}", summaries.len(), summary_path.display());

    let json_path = outdir.join("summary.json");
    let json_file = File::create(&json_path)?;
    report::write_summaries_json(&summaries, json_file)?;
    debug!("Wrote JSON summaries to {}", json_path.display());

    if args.density_points >= 2 {
        let density_dir = outdir.join("density");
        std::fs::create_dir(&density_dir)?;
        for summary in summaries.iter() {
            let grid_path = density_dir.join(format!("{}.tsv", summary.variant));
            report::write_density_grid(&summary.posterior(), args.density_points, &grid_path)?;
        }
        info!("Wrote density grids for {} variants", summaries.len());
    } else if args.density_points == 1 {
        warn!("Density grids need at least 2 points, skipping density output");
    }

    if let Some(best) = summaries.first() {
        info!(
            "Highest posterior mean: {} ({:.4})",
            best.variant, best.posterior_mean
        );
    }
    Ok(())
}

fn resolve_prior(args: &cli::Cli) -> Result<BetaParams> {
    match args.prior {
        cli::PriorChoice::uniform => Ok(BetaParams::uniform()),
        cli::PriorChoice::jeffreys => Ok(BetaParams::jeffreys()),
        cli::PriorChoice::custom => BetaParams::new(args.alpha_prior, args.beta_prior),
    }
}
