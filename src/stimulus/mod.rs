//! Stimulus series generators. A [`StimulusSeries`] holds one input current per
//! timestep and is read-only to the integrators that consume it.

use std::ops::Index;
use rand::Rng;
use crate::distribution::GaussianParameters;
use crate::error::StimulusError;


/// Ordered input currents, one value per simulation step
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusSeries {
    values: Vec<f64>,
}

impl StimulusSeries {
    /// A series of `len` zeros
    pub fn zeros(len: usize) -> Self {
        StimulusSeries::constant(len, 0.)
    }

    /// A series holding `value` at every step
    pub fn constant(len: usize, value: f64) -> Self {
        StimulusSeries { values: vec![value; len] }
    }

    /// Zeros everywhere except `amplitude` on `start..end`
    pub fn step(len: usize, start: usize, end: usize, amplitude: f64) -> Self {
        StimulusSeries::zeros(len).with_window(start, end, amplitude)
    }

    /// Triangular window of the given peak amplitude, matching
    /// `scipy.signal.windows.triang`: the endpoints are non-zero and the
    /// peak is reached at the center (twice for even lengths)
    pub fn triangular(len: usize, amplitude: f64) -> Self {
        let values = (0..len)
            .map(|k| {
                let n = k.min(len - 1 - k) as f64 + 1.;
                let weight = if len % 2 == 0 {
                    (2. * n - 1.) / len as f64
                } else {
                    2. * n / (len as f64 + 1.)
                };

                amplitude * weight
            })
            .collect();

        StimulusSeries { values }
    }

    /// Overwrites `start..end` with `value`, bounds are clamped to the series
    /// the way slice assignment on an array would clamp them
    pub fn with_window(mut self, start: usize, end: usize, value: f64) -> Self {
        let end = end.min(self.values.len());
        if start < end {
            self.values[start..end].iter_mut().for_each(|i| *i = value);
        }

        self
    }

    /// Overwrites everything from `start` onwards with `value`
    pub fn with_value_from(self, start: usize, value: f64) -> Self {
        let len = self.values.len();
        self.with_window(start, len, value)
    }

    /// Scales every value by an independently sampled, clamped normal factor
    pub fn with_gaussian_noise<R: Rng + ?Sized>(mut self, params: &GaussianParameters, rng: &mut R) -> Self {
        self.values.iter_mut()
            .for_each(|i| *i *= params.get_random_number(rng));

        self
    }

    /// Errors unless the series has exactly `expected` values
    pub fn check_length(&self, expected: usize) -> Result<(), StimulusError> {
        if self.values.len() != expected {
            return Err(StimulusError::LengthMismatch { expected, actual: self.values.len() });
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    /// Largest value of the series, `None` when empty
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

impl Index<usize> for StimulusSeries {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}
