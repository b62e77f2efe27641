use crate::counts::CountRecord;
use crate::credible::posterior_interval;
use crate::model::BetaParams;
use anyhow::{Result, bail};
use csv::{Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write as IoWrite;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SummaryField {
    Variant,
    Successes,
    Trials,
    ObservedRate,
    PosteriorAlpha,
    PosteriorBeta,
    PosteriorMean,
    PosteriorSd,
    IntervalLower,
    IntervalUpper,
    IntervalLevel,
}

impl SummaryField {
    pub fn header(&self) -> &'static str {
        match self {
            SummaryField::Variant => "variant",
            SummaryField::Successes => "successes",
            SummaryField::Trials => "trials",
            SummaryField::ObservedRate => "observed_rate",
            SummaryField::PosteriorAlpha => "posterior_alpha",
            SummaryField::PosteriorBeta => "posterior_beta",
            SummaryField::PosteriorMean => "posterior_mean",
            SummaryField::PosteriorSd => "posterior_sd",
            SummaryField::IntervalLower => "interval_lower",
            SummaryField::IntervalUpper => "interval_upper",
            SummaryField::IntervalLevel => "interval_level",
        }
    }

    pub fn all_as_string() -> Vec<String> {
        SummaryField::iter().map(|f| f.header().to_string()).collect()
    }
}

/// One summary row per variant: raw counts next to the posterior view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSummary {
    pub variant: String,
    pub successes: u64,
    pub trials: u64,
    pub observed_rate: f64,
    pub posterior_alpha: f64,
    pub posterior_beta: f64,
    pub posterior_mean: f64,
    pub posterior_sd: f64,
    pub interval_lower: f64,
    pub interval_upper: f64,
    pub interval_level: f64,
}

impl PosteriorSummary {
    pub fn from_counts(record: &CountRecord, prior: &BetaParams, level: f64) -> Result<Self> {
        let obs = record.observation()?;
        let posterior = prior.updated(&obs);
        let interval = posterior_interval(&posterior, level)?;
        Ok(Self {
            variant: record.variant.clone(),
            successes: record.successes,
            trials: record.trials,
            observed_rate: obs.rate(),
            posterior_alpha: posterior.alpha,
            posterior_beta: posterior.beta,
            posterior_mean: posterior.mean(),
            posterior_sd: posterior.standard_deviation(),
            interval_lower: interval.lower,
            interval_upper: interval.upper,
            interval_level: level,
        })
    }

    pub fn posterior(&self) -> BetaParams {
        BetaParams {
            alpha: self.posterior_alpha,
            beta: self.posterior_beta,
        }
    }
}

pub struct SummaryWriter {
    file: File,
    writer: Writer<File>,
}

impl SummaryWriter {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        let writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_writer(file.try_clone()?);
        Ok(Self { file, writer })
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(SummaryField::all_as_string())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_summary(&mut self, summary: &PosteriorSummary) -> Result<()> {
        self.writer.write_record(&[
            summary.variant.clone(),
            summary.successes.to_string(),
            summary.trials.to_string(),
            format!("{:.6}", summary.observed_rate),
            format!("{:.6}", summary.posterior_alpha),
            format!("{:.6}", summary.posterior_beta),
            format!("{:.6}", summary.posterior_mean),
            format!("{:.6}", summary.posterior_sd),
            format!("{:.6}", summary.interval_lower),
            format!("{:.6}", summary.interval_upper),
            format!("{:.6}", summary.interval_level),
        ])?;
        Ok(())
    }

    pub fn write_summaries_iter<'a, I>(&mut self, summaries: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a PosteriorSummary>,
    {
        for summary in summaries {
            self.write_summary(summary)?;
        }
        self.flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.file.sync_all()?;
        Ok(())
    }
}

pub fn write_summaries_json<W: IoWrite>(summaries: &[PosteriorSummary], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, summaries)?;
    Ok(())
}

/// Writes `probability density` rows for a posterior on an interior grid.
/// Endpoints are excluded, the density can be unbounded there.
pub fn write_density_grid(params: &BetaParams, points: usize, path: &Path) -> Result<()> {
    if points < 2 {
        bail!("density grid needs at least 2 points, got {}", points);
    }
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(file);
    writer.write_record(["probability", "density"])?;
    for i in 0..points {
        let x = (i as f64 + 1.0) / (points as f64 + 1.0);
        writer.write_record(&[format!("{:.6}", x), format!("{:.6}", params.pdf(x))])?;
    }
    writer.flush()?;
    Ok(())
}
