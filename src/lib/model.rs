use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use statrs::distribution::Beta as BetaDist;
use statrs::function::gamma::ln_gamma;
use std::fmt;

/// Shape parameters of a Beta distribution over a proportion.
///
/// `alpha - 1` and `beta - 1` act as pseudo-counts of prior successes and
/// failures, so Beta(1, 1) is the flat prior and the conjugate update for
/// Bernoulli counts stays inside the family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            bail!("alpha must be a positive finite number, got {}", alpha);
        }
        if !beta.is_finite() || beta <= 0.0 {
            bail!("beta must be a positive finite number, got {}", beta);
        }
        Ok(Self { alpha, beta })
    }

    /// Uniform prior Beta(1, 1)
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// Jeffreys prior Beta(0.5, 0.5)
    pub fn jeffreys() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.5,
        }
    }

    /// Posterior parameters after observing `obs`: (α + M, β + (N − M))
    pub fn updated(&self, obs: &Observation) -> Self {
        Self {
            alpha: self.alpha + obs.successes as f64,
            beta: self.beta + obs.failures() as f64,
        }
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    pub fn variance(&self) -> f64 {
        let numerator = self.alpha * self.beta;
        let denominator = (self.alpha + self.beta).powi(2) * (self.alpha + self.beta + 1.0);
        numerator / denominator
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Mode of the distribution, only defined for alpha > 1 and beta > 1
    pub fn mode(&self) -> Option<f64> {
        if self.alpha > 1.0 && self.beta > 1.0 {
            Some((self.alpha - 1.0) / (self.alpha + self.beta - 2.0))
        } else {
            None
        }
    }

    pub fn log_beta(&self) -> f64 {
        ln_gamma(self.alpha) + ln_gamma(self.beta) - ln_gamma(self.alpha + self.beta)
    }

    pub fn log_pdf(&self, x: f64) -> f64 {
        if x < 0.0 || x > 1.0 {
            return f64::NEG_INFINITY;
        }
        (self.alpha - 1.0) * x.ln() + (self.beta - 1.0) * (1.0 - x).ln() - self.log_beta()
    }

    pub fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 || x > 1.0 {
            return 0.0;
        }
        self.log_pdf(x).exp()
    }

    /// Distribution object backing quantile lookup and random sampling
    pub fn to_dist(&self) -> Result<BetaDist> {
        BetaDist::new(self.alpha, self.beta)
            .map_err(|e| anyhow::anyhow!("Invalid Beta parameters ({}, {}): {}", self.alpha, self.beta, e))
    }
}

impl fmt::Display for BetaParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Beta({:.4}, {:.4})", self.alpha, self.beta)
    }
}

/// Observed Bernoulli counts: `successes` out of `trials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub successes: u64,
    pub trials: u64,
}

impl Observation {
    pub fn new(successes: u64, trials: u64) -> Result<Self> {
        if successes > trials {
            bail!(
                "successes ({}) cannot exceed trials ({})",
                successes,
                trials
            );
        }
        Ok(Self { successes, trials })
    }

    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }

    /// Raw observed proportion, 0.0 when no trials were recorded
    pub fn rate(&self) -> f64 {
        if self.trials > 0 {
            self.successes as f64 / self.trials as f64
        } else {
            0.0
        }
    }
}
