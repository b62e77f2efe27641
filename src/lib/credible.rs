use crate::model::{BetaParams, Observation};
use anyhow::{Result, bail};
use serde::Serialize;
use statrs::distribution::ContinuousCDF;

/// Closed interval on [0, 1] holding a requested share of posterior mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CredibleInterval {
    pub lower: f64,
    pub upper: f64,
}

impl CredibleInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Two-sided credible interval for a Bernoulli proportion.
///
/// Updates the Beta(`alpha_prior`, `beta_prior`) prior with `successes` out
/// of `trials` and returns the equal-tail interval holding `level` posterior
/// mass. Deterministic: no randomness is involved, only posterior quantile
/// lookups.
pub fn credible_interval(
    successes: u64,
    trials: u64,
    alpha_prior: f64,
    beta_prior: f64,
    level: f64,
) -> Result<CredibleInterval> {
    let obs = Observation::new(successes, trials)?;
    let prior = BetaParams::new(alpha_prior, beta_prior)?;
    let posterior = prior.updated(&obs);
    posterior_interval(&posterior, level)
}

/// Equal-tail interval of an already-formed posterior.
pub fn posterior_interval(params: &BetaParams, level: f64) -> Result<CredibleInterval> {
    if !level.is_finite() || level < 0.0 || level > 1.0 {
        bail!("credibility level must be in [0, 1], got {}", level);
    }
    let tail = (1.0 - level) / 2.0;
    let dist = params.to_dist()?;
    let lower = dist.inverse_cdf(tail);
    let upper = dist.inverse_cdf(1.0 - tail);
    Ok(CredibleInterval { lower, upper })
}
