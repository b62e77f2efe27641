use crate::cli;
use anyhow::{Result, anyhow, bail};
use bayesprop_utils::compare::compare_posteriors;
use bayesprop_utils::counts;
use bayesprop_utils::model::BetaParams;
use csv::WriterBuilder;
use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
use std::fs::File;
use std::path::Path;

pub fn run(args: &cli::Cli) -> Result<()> {
    info!("Loading count table: {}", args.counts);
    let counts_file = File::open(&args.counts)
        .map_err(|e| anyhow!("Could not open count table: {} ({})", args.counts, e))?;
    let records = counts::read_count_records(counts_file)?;
    let records = counts::merge_by_variant(&records);
    if records.len() < 2 {
        bail!(
            "Need at least two variants to compare, found {}",
            records.len()
        );
    }
    debug!("{} variants after merging", records.len());

    let prior = resolve_prior(args)?;
    info!("Using prior {}", prior);

    let posteriors = records
        .iter()
        .map(|record| {
            let obs = record.observation()?;
            Ok((record.variant.clone(), prior.updated(&obs)))
        })
        .collect::<Result<Vec<(String, BetaParams)>>>()?;

    let leader = posteriors
        .iter()
        .max_by_key(|(_, posterior)| OrderedFloat(posterior.mean()))
        .expect("At least two posteriors present");
    info!(
        "Highest posterior mean: {} ({:.4})",
        leader.0,
        leader.1.mean()
    );

    let out_path = Path::new(&args.out);
    let out_file = File::create(out_path)
        .map_err(|e| anyhow!("Could not create output file: {} ({})", args.out, e))?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(out_file);
    writer.write_record([
        "variant_a",
        "variant_b",
        "mean_a",
        "mean_b",
        "prob_b_greater",
    ])?;

    // One CLI seed reproduces the whole table: pair i samples with seed + i
    for (pair_index, ((variant_a, posterior_a), (variant_b, posterior_b))) in
        posteriors.iter().tuple_combinations::<(_, _)>().enumerate()
    {
        let pair_seed = args.seed.map(|seed| seed + pair_index as u64);
        let estimate = compare_posteriors(posterior_a, posterior_b, args.samples, pair_seed)?;
        info!(
            "P({} < {}) = {:.4} ({} draws)",
            variant_a, variant_b, estimate, args.samples
        );
        writer.write_record(&[
            variant_a.clone(),
            variant_b.clone(),
            format!("{:.6}", posterior_a.mean()),
            format!("{:.6}", posterior_b.mean()),
            format!("{:.6}", estimate),
        ])?;
    }
    writer.flush()?;
    info!("Wrote comparison table to {}", out_path.display());
    Ok(())
}

fn resolve_prior(args: &cli::Cli) -> Result<BetaParams> {
    match args.prior {
        cli::PriorChoice::uniform => Ok(BetaParams::uniform()),
        cli::PriorChoice::jeffreys => Ok(BetaParams::jeffreys()),
        cli::PriorChoice::custom => BetaParams::new(args.alpha_prior, args.beta_prior),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn test_args(counts: String, out: String) -> cli::Cli {
        cli::Cli {
            counts,
            out,
            samples: 20_000,
            seed: Some(42),
            prior: cli::PriorChoice::uniform,
            alpha_prior: 1.0,
            beta_prior: 1.0,
            verbosity: cli::LogLevel::silent,
        }
    }

    fn write_counts(dir: &Path, data: &[u8]) -> String {
        let counts_path = dir.join("counts.tsv");
        let mut counts_file = File::create(&counts_path).unwrap();
        counts_file.write_all(data).unwrap();
        counts_path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_run_writes_pairwise_table() {
        let dir = tempdir().expect("Failed to create temp dir");
        let counts = write_counts(
            dir.path(),
            b"variant\tsuccesses\ttrials\na\t110\t520\nb\t146\t514\nc\t90\t505\n",
        );
        let out = dir.path().join("abcompare.tsv");
        let args = test_args(counts, out.to_str().unwrap().to_string());
        run(&args).expect("run failed");

        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // header plus three unordered pairs
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "variant_a\tvariant_b\tmean_a\tmean_b\tprob_b_greater"
        );
        assert!(lines[1].starts_with("a\tb\t"));
        assert!(lines[2].starts_with("a\tc\t"));
        assert!(lines[3].starts_with("b\tc\t"));

        // a trails b clearly, the estimate should sit near 1
        let prob_a_lt_b: f64 = lines[1].split('\t').last().unwrap().parse().unwrap();
        assert!(prob_a_lt_b > 0.9, "estimate was {}", prob_a_lt_b);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let dir = tempdir().expect("Failed to create temp dir");
        let counts = write_counts(
            dir.path(),
            b"variant\tsuccesses\ttrials\na\t110\t520\nb\t146\t514\n",
        );
        let out_first = dir.path().join("first.tsv");
        let out_second = dir.path().join("second.tsv");
        let args_first = test_args(counts.clone(), out_first.to_str().unwrap().to_string());
        let args_second = test_args(counts, out_second.to_str().unwrap().to_string());
        run(&args_first).expect("first run failed");
        run(&args_second).expect("second run failed");

        let first = fs::read_to_string(&out_first).unwrap();
        let second = fs::read_to_string(&out_second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_rejects_single_variant() {
        let dir = tempdir().expect("Failed to create temp dir");
        let counts = write_counts(dir.path(), b"variant\tsuccesses\ttrials\na\t110\t520\n");
        let out = dir.path().join("abcompare.tsv");
        let args = test_args(counts, out.to_str().unwrap().to_string());
        assert!(run(&args).is_err());
    }
}
