//! A tool to generate and clamp noise.

use rand::Rng;
use rand_distr::{Normal, Distribution};


/// Parameters used in generating noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParameters {
    /// Mean of distribution
    pub mean: f64,
    /// Standard deviation of distribution
    pub std: f64,
    /// Maximum cutoff value
    pub max: f64,
    /// Minimum cutoff value
    pub min: f64,
}

impl Default for GaussianParameters {
    fn default() -> Self {
        GaussianParameters {
            mean: 1.0, // center of norm distr
            std: 0.0, // std of norm distr
            max: 2.0, // maximum cutoff for norm distr
            min: 0.0, // minimum cutoff for norm distr
        }
    }
}

impl GaussianParameters {
    /// Samples a factor from the clamped distribution
    pub fn get_random_number<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        limited_distr(self.mean, self.std, self.min, self.max, rng)
    }
}

/// Calculates the normal distribution at the given mean and standard deviation and clamps
/// the output value between the given minimum and maximum, if standard deviation is `0.`
/// (or otherwise unusable) the mean is always returned
pub fn limited_distr<R: Rng + ?Sized>(mean: f64, std: f64, minimum: f64, maximum: f64, rng: &mut R) -> f64 {
    if std == 0.0 {
        return mean;
    }

    let normal = match Normal::new(mean, std) {
        Ok(normal) => normal,
        Err(_) => return mean,
    };
    let output: f64 = normal.sample(rng);

    output.max(minimum).min(maximum)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_zero_std_returns_mean() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(limited_distr(1.5, 0., 0., 2., &mut rng), 1.5);
    }

    #[test]
    fn test_samples_are_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = limited_distr(1., 5., 0.5, 1.5, &mut rng);
            assert!((0.5..=1.5).contains(&value));
        }
    }
}
