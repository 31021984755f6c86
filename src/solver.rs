//! Response solvers of the base driven SDOF oscillator
//!
//! A [Solver] is built from the sample interval and the oscillator parameters with a zero initial state.
//! It is then fed with the base acceleration one sample at a time and returns the absolute acceleration of the oscillator.
//!
//! The [LtiReference] solver is the ground truth, the others are explicit time integrators
//! differing by how the velocity dependent damping force is evaluated at the end of a time step.

use crate::{AccelerationTimeHistory, Result, Sdof, SrsError};
use serde::Serialize;
use std::ops::Deref;

mod half_step_verlet;
pub use half_step_verlet::HalfStepVerlet;
mod trapezoidal_verlet;
pub use trapezoidal_verlet::TrapezoidalVerlet;
mod symplectic_euler;
pub use symplectic_euler::SymplecticEuler;
mod field_calculator;
pub use field_calculator::FieldCalculator;
mod lti;
pub use lti::LtiReference;

pub trait Solver: Sized {
    /// Creates a solver with a zero state for the sample interval `tau`
    fn from_sdof(tau: f64, sdof: &Sdof) -> Result<Self>;
    /// Returns the absolute acceleration of the current state
    fn response(&self) -> f64;
    /// Advances the state by one sample
    ///
    /// `u` and `u_next` are the base acceleration at the current and next samples,
    /// returns the absolute acceleration at the next sample
    fn solve(&mut self, u: f64, u_next: f64) -> f64;
}

/// Absolute acceleration response, one sample per base acceleration sample
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ResponseTrace(Vec<f64>);
impl ResponseTrace {
    /// Returns the maximum absolute value of the response (maximax)
    pub fn peak(&self) -> f64 {
        self.0.iter().fold(0f64, |m, y| m.max(y.abs()))
    }
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}
impl Deref for ResponseTrace {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

/// Computes the response of the oscillator to the base acceleration with the solver `T`
///
/// Returns [SrsError::InstabilityDetected] at the first non-finite response sample
pub fn simulate<T: Solver>(history: &AccelerationTimeHistory, sdof: &Sdof) -> Result<ResponseTrace> {
    let mut solver = T::from_sdof(history.tau(), sdof)?;
    let instability = |sample: usize| SrsError::InstabilityDetected {
        frequency: sdof.natural_frequency(),
        sample,
    };
    let mut trace = Vec::with_capacity(history.len());
    let y0 = solver.response();
    if !y0.is_finite() {
        return Err(instability(0));
    }
    trace.push(y0);
    for (k, u) in history.windows(2).enumerate() {
        let y = solver.solve(u[0], u[1]);
        if !y.is_finite() {
            return Err(instability(k + 1));
        }
        trace.push(y);
    }
    Ok(ResponseTrace(trace))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_response<T: Solver>() {
        let history = AccelerationTimeHistory::new(vec![0.; 1000], 1e-4).unwrap();
        for nu in [10., 100., 500.] {
            let sdof = Sdof::new(nu, 10.).unwrap();
            let trace = simulate::<T>(&history, &sdof).unwrap();
            assert_eq!(trace.len(), history.len());
            assert_eq!(trace.peak(), 0.);
        }
    }

    #[test]
    fn zero_input_zero_response() {
        zero_response::<LtiReference>();
        zero_response::<TrapezoidalVerlet>();
        zero_response::<HalfStepVerlet>();
        zero_response::<SymplecticEuler>();
        zero_response::<FieldCalculator>();
    }

    #[test]
    fn peak_is_maximax() {
        let trace = ResponseTrace(vec![0., 1.5, -3.25, 2.]);
        assert_eq!(trace.peak(), 3.25);
    }

    #[test]
    fn unstable_time_step() {
        // 2 samples per period of a lightly damped oscillator
        let history = AccelerationTimeHistory::new(vec![1.; 2000], 5e-3).unwrap();
        let sdof = Sdof::new(100., 1000.).unwrap();
        assert!(matches!(
            simulate::<SymplecticEuler>(&history, &sdof),
            Err(SrsError::InstabilityDetected { .. })
        ));
        assert!(simulate::<LtiReference>(&history, &sdof).is_ok());
    }
}
