//! Shock Response Spectrum sweep
//!
//! The spectrum is computed with [Srs] that is created using the builder [SrsBuilder].
//! For each natural frequency, the oscillator response is computed with both the [LtiReference]
//! solver and the solver `T` under verification, and the maximax of each response is recorded.
//! The frequencies are solved concurrently, each one with its own solver states.
//!
//! # Example
//! ```
//! use sdof_srs::{AccelerationTimeHistory, HalfStepVerlet, SrsBuilder};
//!
//! # fn main() -> sdof_srs::Result<()> {
//! let history = AccelerationTimeHistory::new(vec![0., 1., 1., 0., 0., 0.], 1e-4)?;
//! let srs = SrsBuilder::<HalfStepVerlet>::new()
//!     .quality_factor(10.)
//!     .log_frequencies(10., 2000., 50)
//!     .build()?;
//! let result = srs.compute(&history);
//! assert_eq!(result.points.len(), 50);
//! # Ok(())
//! # }
//! ```

use crate::{
    simulate, AccelerationTimeHistory, LtiReference, Result, Sdof, Solver, SrsError,
    TrapezoidalVerlet,
};
use rayon::prelude::*;
use serde::Serialize;
use std::{fmt, marker::PhantomData};

/// Minimum number of samples per period of the highest natural frequency
pub const SAMPLES_PER_PERIOD: f64 = 20.;

/// Returns `n` frequencies logarithmically spaced from `start` to `end`
pub fn log_frequencies(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let (log_start, log_end) = (start.log10(), end.log10());
            let step = (log_end - log_start) / (n - 1) as f64;
            (0..n)
                .map(|i| 10f64.powf(log_start + i as f64 * step))
                .collect()
        }
    }
}

/// This structure is the SRS builder based on a builder pattern design
pub struct SrsBuilder<T: Solver = TrapezoidalVerlet> {
    quality_factor: Option<f64>,
    frequencies: Vec<f64>,
    phantom: PhantomData<T>,
}
impl<T: Solver> Default for SrsBuilder<T> {
    fn default() -> Self {
        Self {
            quality_factor: None,
            frequencies: Vec::new(),
            phantom: PhantomData,
        }
    }
}
impl<T: Solver> SrsBuilder<T> {
    pub fn new() -> Self {
        Default::default()
    }
    /// Sets the oscillators quality factor
    pub fn quality_factor(self, quality_factor: f64) -> Self {
        Self {
            quality_factor: Some(quality_factor),
            ..self
        }
    }
    /// Sets the oscillators natural frequencies in Hz
    pub fn frequencies(self, frequencies: Vec<f64>) -> Self {
        Self {
            frequencies,
            ..self
        }
    }
    /// Sets `n` natural frequencies logarithmically spaced from `start` to `end` in Hz
    pub fn log_frequencies(self, start: f64, end: f64, n: usize) -> Self {
        Self {
            frequencies: log_frequencies(start, end, n),
            ..self
        }
    }
    pub fn build(self) -> Result<Srs<T>> {
        let quality_factor = self.quality_factor.map_or(
            Err(SrsError::InvalidParameters(
                "quality factor is missing".to_owned(),
            )),
            Ok,
        )?;
        if !(quality_factor.is_finite() && quality_factor > 0.) {
            return Err(SrsError::InvalidParameters(format!(
                "quality factor must be positive, found {}",
                quality_factor
            )));
        }
        log::info!(
            "SRS with Q={:.3} for {} natural frequencies",
            quality_factor,
            self.frequencies.len()
        );
        Ok(Srs {
            quality_factor,
            frequencies: self.frequencies,
            phantom: PhantomData,
        })
    }
}

/// Shock Response Spectrum calculator
#[derive(Debug, Clone)]
pub struct Srs<T: Solver = TrapezoidalVerlet> {
    quality_factor: f64,
    frequencies: Vec<f64>,
    phantom: PhantomData<T>,
}
impl<T: Solver> Srs<T> {
    pub fn quality_factor(&self) -> f64 {
        self.quality_factor
    }
    /// Natural frequencies in Hz
    pub fn frequencies(&self) -> &[f64] {
        self.frequencies.as_slice()
    }
    /// Computes the SRS value of both the reference and the verified solvers at a given frequency
    pub fn solve_frequency(
        &self,
        history: &AccelerationTimeHistory,
        natural_frequency: f64,
    ) -> Result<SrsPoint> {
        let sdof = Sdof::new(natural_frequency, self.quality_factor)?;
        if history.tau() * natural_frequency * SAMPLES_PER_PERIOD > 1. {
            log::warn!(
                "{:.3}Hz oscillator is sampled with less than {} samples per period ({:.1})",
                natural_frequency,
                SAMPLES_PER_PERIOD,
                (history.tau() * natural_frequency).recip()
            );
        }
        let reference = simulate::<LtiReference>(history, &sdof)?.peak();
        let integrator = simulate::<T>(history, &sdof)?.peak();
        log::debug!(
            "{:.3}Hz: reference {:.6}, integrator {:.6}",
            natural_frequency,
            reference,
            integrator
        );
        Ok(SrsPoint {
            frequency: natural_frequency,
            reference,
            integrator,
        })
    }
}
impl<T: Solver + Send + Sync> Srs<T> {
    /// Computes the SRS for all the natural frequencies
    ///
    /// The frequencies that fail are recorded in [SrsResult::failures] and the sweep proceeds with the others
    pub fn compute(&self, history: &AccelerationTimeHistory) -> SrsResult {
        log::info!("{}", history);
        let (points, failures): (Vec<_>, Vec<_>) = self
            .frequencies
            .par_iter()
            .map(|&nu| self.solve_frequency(history, nu).map_err(|e| (nu, e)))
            .collect::<Vec<_>>()
            .into_iter()
            .partition(|x| x.is_ok());
        let failures: Vec<(f64, SrsError)> =
            failures.into_iter().filter_map(|x| x.err()).collect();
        failures
            .iter()
            .for_each(|(nu, e)| log::warn!("{:.3}Hz skipped: {}", nu, e));
        SrsResult {
            quality_factor: self.quality_factor,
            points: points.into_iter().filter_map(|x| x.ok()).collect(),
            failures,
        }
    }
}

/// SRS value at a given natural frequency
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct SrsPoint {
    /// Natural frequency in Hz
    pub frequency: f64,
    /// Maximax of the reference solver response
    pub reference: f64,
    /// Maximax of the verified solver response
    pub integrator: f64,
}
impl SrsPoint {
    /// Relative error of the verified solver with respect to the reference
    pub fn relative_error(&self) -> f64 {
        if self.reference == 0. {
            self.integrator.abs()
        } else {
            ((self.integrator - self.reference) / self.reference).abs()
        }
    }
}

/// Shock Response Spectrum
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct SrsResult {
    pub quality_factor: f64,
    /// SRS values in the natural frequencies order
    pub points: Vec<SrsPoint>,
    /// Natural frequencies that failed to be solved and the reason why
    #[serde(skip)]
    pub failures: Vec<(f64, SrsError)>,
}
impl SrsResult {
    /// Returns true if all the natural frequencies have been solved
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }
    /// Reference solver SRS values
    pub fn reference(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.reference).collect()
    }
    /// Verified solver SRS values
    pub fn integrator(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.integrator).collect()
    }
    /// Largest relative error of the verified solver with respect to the reference
    pub fn max_relative_error(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.relative_error())
            .fold(0f64, f64::max)
    }
}
impl fmt::Display for SrsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.points {
            writeln!(f, "{}, {:.4}, {:.4}", p.frequency, p.reference, p.integrator)?;
        }
        for (nu, e) in &self.failures {
            writeln!(f, "{}, {}", nu, e)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn log_spaced() {
        let nu = log_frequencies(10., 2000., 50);
        assert_eq!(nu.len(), 50);
        assert_relative_eq!(nu[0], 10., max_relative = 1e-12);
        assert_relative_eq!(nu[49], 2000., max_relative = 1e-12);
        nu.windows(2)
            .for_each(|x| assert_relative_eq!(x[1] / x[0], 200f64.powf(1. / 49.), max_relative = 1e-9));
        assert!(log_frequencies(10., 2000., 0).is_empty());
        assert_eq!(log_frequencies(10., 2000., 1), vec![10.]);
    }

    #[test]
    fn missing_quality_factor() {
        assert!(matches!(
            SrsBuilder::<TrapezoidalVerlet>::new()
                .frequencies(vec![100.])
                .build(),
            Err(SrsError::InvalidParameters(_))
        ));
        assert!(matches!(
            SrsBuilder::<TrapezoidalVerlet>::new()
                .quality_factor(-1.)
                .build(),
            Err(SrsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn failures_are_recorded_in_order() {
        let history = AccelerationTimeHistory::new(vec![0., 1., 0.5, 0., 0., 0.], 1e-4).unwrap();
        let result = SrsBuilder::<TrapezoidalVerlet>::new()
            .quality_factor(10.)
            .frequencies(vec![100., -5., 200., 0., 300.])
            .build()
            .unwrap()
            .compute(&history);
        assert_eq!(result.frequencies(), vec![100., 200., 300.]);
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].0, -5.);
        assert_eq!(result.failures[1].0, 0.);
        assert!(result
            .failures
            .iter()
            .all(|(_, e)| matches!(e, SrsError::InvalidParameters(_))));
        assert!(!result.is_complete());
    }

    #[test]
    fn table() {
        let result = SrsResult {
            quality_factor: 10.,
            points: vec![SrsPoint {
                frequency: 100.,
                reference: 16.23779412,
                integrator: 16.2380803,
            }],
            failures: vec![(0., SrsError::InvalidParameters("zero".into()))],
        };
        assert_eq!(
            result.to_string(),
            "100, 16.2378, 16.2381\n0, invalid SDOF parameters: zero\n"
        );
    }

    #[test]
    fn relative_error() {
        let p = SrsPoint {
            frequency: 1.,
            reference: 2.,
            integrator: 2.1,
        };
        assert_relative_eq!(p.relative_error(), 0.05, max_relative = 1e-12);
        let p = SrsPoint {
            frequency: 1.,
            reference: 0.,
            integrator: 0.,
        };
        assert_eq!(p.relative_error(), 0.);
    }
}
