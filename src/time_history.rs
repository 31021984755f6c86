//! Uniformly sampled base acceleration time history

use crate::{Result, SrsError};
use serde::Serialize;
use std::{fmt, ops::Deref};

/// Relative tolerance on the sample interval for a time vector to be considered uniform
pub const UNIFORM_SAMPLING_TOLERANCE: f64 = 1e-9;

/// Base acceleration samples with a constant sample interval
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AccelerationTimeHistory {
    /// Sample interval in second
    tau: f64,
    samples: Vec<f64>,
}
impl AccelerationTimeHistory {
    /// Creates a time history from acceleration samples and the sample interval `tau` in second
    pub fn new(samples: Vec<f64>, tau: f64) -> Result<Self> {
        if !(tau.is_finite() && tau > 0.) {
            return Err(SrsError::MalformedInput(format!(
                "sample interval must be positive, found {}s",
                tau
            )));
        }
        if samples.len() < 2 {
            return Err(SrsError::MalformedInput(format!(
                "at least 2 samples are required, found {}",
                samples.len()
            )));
        }
        if let Some((k, u)) = samples.iter().enumerate().find(|(_, u)| !u.is_finite()) {
            return Err(SrsError::MalformedInput(format!(
                "non-finite acceleration sample #{}: {}",
                k, u
            )));
        }
        Ok(Self { tau, samples })
    }
    /// Creates a time history from acceleration samples and the sampling rate in Hz
    pub fn from_sampling_rate(samples: Vec<f64>, sampling_rate: f64) -> Result<Self> {
        Self::new(samples, sampling_rate.recip())
    }
    /// Creates a time history from the sample times and the acceleration samples
    ///
    /// The time vector must be uniformly sampled: every sample interval must match
    /// the first one within [UNIFORM_SAMPLING_TOLERANCE]
    pub fn from_time_samples(time: &[f64], samples: Vec<f64>) -> Result<Self> {
        if time.len() != samples.len() {
            return Err(SrsError::MalformedInput(format!(
                "time and samples length mismatch: {} vs {}",
                time.len(),
                samples.len()
            )));
        }
        if time.len() < 2 {
            return Err(SrsError::MalformedInput(format!(
                "at least 2 samples are required, found {}",
                time.len()
            )));
        }
        let tau = time[1] - time[0];
        if let Some((k, dt)) = time
            .windows(2)
            .map(|t| t[1] - t[0])
            .enumerate()
            .find(|(_, dt)| !((dt - tau).abs() <= UNIFORM_SAMPLING_TOLERANCE * tau.abs()))
        {
            return Err(SrsError::MalformedInput(format!(
                "non-uniform sampling at sample #{}: interval {:e}s instead of {:e}s",
                k + 1,
                dt,
                tau
            )));
        }
        Self::new(samples, tau)
    }
    /// Sample interval in second
    pub fn tau(&self) -> f64 {
        self.tau
    }
    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.tau.recip()
    }
    /// Duration in second from the first to the last sample
    pub fn duration(&self) -> f64 {
        (self.samples.len() - 1) as f64 * self.tau
    }
    /// Iterator over the sample times
    pub fn time(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples.len()).map(|k| k as f64 * self.tau)
    }
    pub fn samples(&self) -> &[f64] {
        self.samples.as_slice()
    }
}
impl Deref for AccelerationTimeHistory {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.samples.as_slice()
    }
}
impl fmt::Display for AccelerationTimeHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "acceleration time history: {} samples at {:.3}Hz ({:.3}s)",
            self.samples.len(),
            self.sampling_rate(),
            self.duration()
        )
    }
}
