use crate::model::BetaParams;
use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::rngs::StdRng;

/// Monte Carlo estimate of P(θ_A < θ_B) for two independent posteriors.
///
/// Draws `num_samples` paired variates from each posterior and returns the
/// fraction of pairs where the A draw falls below the B draw. The two
/// posteriors are treated as independent; that is a modeling assumption of
/// the estimate, not something checked here.
///
/// Passing `Some(seed)` makes the result reproducible bit for bit. With
/// `None` the generator is seeded from entropy and results vary run to run,
/// which is the intended behavior for exploratory use.
pub fn compare_posteriors(
    posterior_a: &BetaParams,
    posterior_b: &BetaParams,
    num_samples: usize,
    seed: Option<u64>,
) -> Result<f64> {
    if num_samples < 1 {
        bail!("num_samples must be at least 1, got {}", num_samples);
    }
    let dist_a = posterior_a.to_dist()?;
    let dist_b = posterior_b.to_dist()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut below = 0usize;
    for _ in 0..num_samples {
        let theta_a = dist_a.sample(&mut rng);
        let theta_b = dist_b.sample(&mut rng);
        if theta_a < theta_b {
            below += 1;
        }
    }
    Ok(below as f64 / num_samples as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearly_separated_posteriors() {
        // Beta(111, 411) mean ~0.213 against Beta(147, 369) mean ~0.285;
        // the analytic P(θ_A < θ_B) is well above 0.99
        let posterior_a = BetaParams::new(111.0, 411.0).unwrap();
        let posterior_b = BetaParams::new(147.0, 369.0).unwrap();
        let estimate = compare_posteriors(&posterior_a, &posterior_b, 100_000, Some(42)).unwrap();
        assert!(estimate > 0.95, "estimate was {}", estimate);
        assert!(estimate <= 1.0);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let posterior_a = BetaParams::new(111.0, 411.0).unwrap();
        let posterior_b = BetaParams::new(147.0, 369.0).unwrap();
        let first = compare_posteriors(&posterior_a, &posterior_b, 10_000, Some(7)).unwrap();
        let second = compare_posteriors(&posterior_a, &posterior_b, 10_000, Some(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_posteriors_near_half() {
        let posterior = BetaParams::new(50.0, 50.0).unwrap();
        let estimate = compare_posteriors(&posterior, &posterior, 100_000, Some(3)).unwrap();
        assert!((estimate - 0.5).abs() < 0.01, "estimate was {}", estimate);
    }

    #[test]
    fn test_estimate_in_unit_range() {
        let posterior_a = BetaParams::new(1.0, 100.0).unwrap();
        let posterior_b = BetaParams::new(100.0, 1.0).unwrap();
        let estimate = compare_posteriors(&posterior_a, &posterior_b, 500, Some(11)).unwrap();
        assert!(estimate >= 0.0 && estimate <= 1.0);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let posterior = BetaParams::new(2.0, 2.0).unwrap();
        assert!(compare_posteriors(&posterior, &posterior, 0, Some(1)).is_err());
    }

    #[test]
    fn test_nonpositive_parameters_rejected() {
        // Bypassing the constructor must still fail at the provider boundary
        let bad = BetaParams {
            alpha: 0.0,
            beta: 1.0,
        };
        let good = BetaParams::new(2.0, 2.0).unwrap();
        assert!(compare_posteriors(&bad, &good, 10, Some(1)).is_err());
        assert!(compare_posteriors(&good, &bad, 10, Some(1)).is_err());
    }

    #[test]
    fn test_single_sample() {
        let posterior_a = BetaParams::new(1.0, 100.0).unwrap();
        let posterior_b = BetaParams::new(100.0, 1.0).unwrap();
        let estimate = compare_posteriors(&posterior_a, &posterior_b, 1, Some(5)).unwrap();
        assert!(estimate == 0.0 || estimate == 1.0);
    }
}
