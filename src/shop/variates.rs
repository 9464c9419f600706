//! Seeded random variate generators
//!
//! Every distribution draws from its own [`StdRng`] stream. The streams are
//! seeded from a single seed generator built from the replication seed, so a
//! fixed seed reproduces every sequence exactly and changing one parameter
//! never shifts the draws of another distribution.

use crate::types::{ConfigValidationError, ShopConfig};
use rand::distributions::{Bernoulli, Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp;

/// End of the early arrival band, in hours since opening
pub const EARLY_BAND_END: f64 = 2.0;
/// End of the peak arrival band, in hours since opening
pub const PEAK_BAND_END: f64 = 8.0;

/// Exponential samples with a fixed mean
#[derive(Debug, Clone)]
pub struct ExponentialVariate {
    dist: Exp<f64>,
    rng: StdRng,
}

impl ExponentialVariate {
    /// Create a stream with the given mean; `name` labels validation errors
    pub fn new(name: &'static str, mean: f64, seed: u64) -> Result<Self, ConfigValidationError> {
        let invalid =
            || ConfigValidationError::InvalidDuration { field: name.to_string(), value: mean };
        if !mean.is_finite() || mean <= 0.0 {
            return Err(invalid());
        }
        let dist = Exp::new(1.0 / mean).map_err(|_| invalid())?;
        Ok(Self { dist, rng: StdRng::seed_from_u64(seed) })
    }

    /// Next sample
    pub fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}

/// Bernoulli trials with a fixed success probability
#[derive(Debug, Clone)]
pub struct BernoulliVariate {
    dist: Bernoulli,
    rng: StdRng,
}

impl BernoulliVariate {
    /// Create a stream with success probability `probability`
    pub fn new(
        name: &'static str,
        probability: f64,
        seed: u64,
    ) -> Result<Self, ConfigValidationError> {
        let dist = Bernoulli::new(probability).map_err(|_| {
            ConfigValidationError::InvalidProbability { field: name.to_string(), value: probability }
        })?;
        Ok(Self { dist, rng: StdRng::seed_from_u64(seed) })
    }

    /// Next trial
    pub fn sample(&mut self) -> bool {
        self.dist.sample(&mut self.rng)
    }
}

/// Integers drawn uniformly from an inclusive range
#[derive(Debug, Clone)]
pub struct DiscreteUniformVariate {
    dist: Uniform<u32>,
    rng: StdRng,
}

impl DiscreteUniformVariate {
    /// Create a stream over `[min, max]`
    pub fn new(min: u32, max: u32, seed: u64) -> Result<Self, ConfigValidationError> {
        if min > max {
            return Err(ConfigValidationError::InvalidBalkRange(min, max));
        }
        Ok(Self { dist: Uniform::new_inclusive(min, max), rng: StdRng::seed_from_u64(seed) })
    }

    /// Next sample
    pub fn sample(&mut self) -> u32 {
        self.dist.sample(&mut self.rng)
    }
}

/// Every distribution one replication of the shop draws from
#[derive(Debug, Clone)]
pub struct ShopVariates {
    arrivals: [ExponentialVariate; 3],
    mechanic_fix: ExponentialVariate,
    specialist_fix: ExponentialVariate,
    referral: BernoulliVariate,
    balk: DiscreteUniformVariate,
}

impl ShopVariates {
    /// Build all streams for one replication from its seed
    pub fn new(config: &ShopConfig, seed: u64) -> Result<Self, ConfigValidationError> {
        let mut seeds = StdRng::seed_from_u64(seed);
        let arrivals = [
            ExponentialVariate::new("arrival_mean_early", config.arrival_mean_early, seeds.gen())?,
            ExponentialVariate::new("arrival_mean_peak", config.arrival_mean_peak, seeds.gen())?,
            ExponentialVariate::new("arrival_mean_late", config.arrival_mean_late, seeds.gen())?,
        ];
        Ok(Self {
            arrivals,
            mechanic_fix: ExponentialVariate::new(
                "mechanic_fix_time",
                config.mechanic_fix_time,
                seeds.gen(),
            )?,
            specialist_fix: ExponentialVariate::new(
                "specialist_fix_time",
                config.specialist_fix_time,
                seeds.gen(),
            )?,
            referral: BernoulliVariate::new(
                "mechanic_refer_rate",
                config.mechanic_refer_rate,
                seeds.gen(),
            )?,
            balk: DiscreteUniformVariate::new(config.balk_min, config.balk_max, seeds.gen())?,
        })
    }

    /// Index of the arrival band the clock falls in
    pub fn arrival_band(now: f64) -> usize {
        if now < EARLY_BAND_END {
            0
        } else if now < PEAK_BAND_END {
            1
        } else {
            2
        }
    }

    /// Gap until the next arrival, drawn from the band the clock is in
    pub fn interarrival(&mut self, now: f64) -> f64 {
        self.arrivals[Self::arrival_band(now)].sample()
    }

    /// Mechanic service duration
    pub fn mechanic_fix_time(&mut self) -> f64 {
        self.mechanic_fix.sample()
    }

    /// Specialist service duration
    pub fn specialist_fix_time(&mut self) -> f64 {
        self.specialist_fix.sample()
    }

    /// Whether the mechanic refers the car onward
    pub fn referral(&mut self) -> bool {
        self.referral.sample()
    }

    /// Balk threshold of an arriving customer
    pub fn balk_threshold(&mut self) -> u32 {
        self.balk.sample()
    }
}
