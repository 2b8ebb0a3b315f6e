//! Basic statistics: mean/variance/standard deviation and random samplers
//! for the exponential and normal distributions.
//!
//! Samplers are generic over a [`rand::Rng`] source so callers (and tests)
//! can supply a seeded generator.

use rand::Rng;

use crate::error::{Error, Result};

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population variance (σ²); 0.0 for fewer than two samples.
pub fn variance(xs: &[f64]) -> f64 {
    variance_with_divisor(xs, xs.len())
}

/// Sample variance (s², Bessel-corrected); 0.0 for fewer than two samples.
pub fn sample_variance(xs: &[f64]) -> f64 {
    variance_with_divisor(xs, xs.len().saturating_sub(1))
}

fn variance_with_divisor(xs: &[f64], divisor: usize) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / divisor as f64
}

/// Population standard deviation (σ); 0.0 for fewer than two samples.
pub fn std_dev(xs: &[f64]) -> f64 {
    variance(xs).sqrt()
}

/// Sample standard deviation (s); 0.0 for fewer than two samples.
pub fn sample_std_dev(xs: &[f64]) -> f64 {
    sample_variance(xs).sqrt()
}

/// A source of f64 samples from some distribution.
pub trait Generator {
    /// Draws a single sample.
    fn generate_one<R: Rng>(&self, rng: &mut R) -> f64;

    /// Draws `num_samples` samples.
    fn generate<R: Rng>(&self, rng: &mut R, num_samples: usize) -> Vec<f64> {
        (0..num_samples).map(|_| self.generate_one(rng)).collect()
    }
}

/// Exponential sampler via the inverse CDF.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialGenerator {
    rate: f64,
}

impl ExponentialGenerator {
    /// Fails with [`Error::InvalidRate`] unless `rate` is positive and
    /// finite.
    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::InvalidRate { rate });
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Generator for ExponentialGenerator {
    fn generate_one<R: Rng>(&self, rng: &mut R) -> f64 {
        // random() is in [0, 1); 1 - u keeps the log argument nonzero.
        let u: f64 = rng.random();
        -(1.0 - u).ln() / self.rate
    }
}

/// Sampling algorithm for [`NormalGenerator`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NormalMethod {
    #[default]
    BoxMuller,
}

/// Normal sampler.
#[derive(Debug, Clone, Copy)]
pub struct NormalGenerator {
    mean: f64,
    std_dev: f64,
    method: NormalMethod,
}

impl NormalGenerator {
    /// Fails with [`Error::InvalidStdDev`] when `std_dev` is negative. A
    /// zero standard deviation degenerates to a constant sampler.
    pub fn new(mean: f64, std_dev: f64, method: NormalMethod) -> Result<Self> {
        if std_dev < 0.0 {
            return Err(Error::InvalidStdDev { std_dev });
        }
        Ok(Self {
            mean,
            std_dev,
            method,
        })
    }

    fn box_muller<R: Rng>(&self, rng: &mut R) -> f64 {
        let u1: f64 = rng.random();
        let u2: f64 = rng.random();
        self.mean
            + self.std_dev
                * (-2.0 * (1.0 - u1).ln()).sqrt()
                * (2.0 * core::f64::consts::PI * u2).cos()
    }
}

impl Generator for NormalGenerator {
    fn generate_one<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.method {
            NormalMethod::BoxMuller => self.box_muller(rng),
        }
    }
}
