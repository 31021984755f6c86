//! Hybrid half-step and semi-implicit Euler update of the SRS web calculator
//!
//! Each step first advances the position with the velocity predicted from the acceleration
//! $`a_0 = -u_0`$ of the first sample, which is never updated afterward:
//! $$z' = z_k + (v_k + a_0\tau/2)\tau$$
//! then evaluates the relative acceleration with the advanced position and the current velocity,
//! and applies a semi-implicit Euler step from the advanced position:
//! $$a_k = -u_k - cv_k - kz',\quad v_{k+1} = v_k + a_k\tau,\quad z_{k+1} = z' + v_{k+1}\tau$$
//! The position is advanced twice per sample.
//!
//! The recorded absolute acceleration $`a_k + u_k`$ is evaluated before the velocity update,
//! so [Solver::solve](super::Solver::solve) returns the response of the sample `k` when fed
//! with the samples `k` and `k+1`: the trace lags the input by one sample and its last value
//! is never recorded.
//! The scheme is kept to verify the calculator against the exact reference, not for accuracy.

use crate::{Result, Sdof};
use serde::Serialize;

/// SRS web calculator solver
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct FieldCalculator {
    /// Sampling time is second
    pub tau: f64,
    k: f64,
    c: f64,
    z: f64,
    v: f64,
    // relative acceleration of the first sample
    a: Option<f64>,
}
impl super::Solver for FieldCalculator {
    fn from_sdof(tau: f64, sdof: &Sdof) -> Result<Self> {
        Ok(Self {
            tau,
            k: sdof.stiffness(),
            c: sdof.damping(),
            ..Default::default()
        })
    }
    fn response(&self) -> f64 {
        -self.k * self.z - self.c * self.v
    }
    fn solve(&mut self, u: f64, _u_next: f64) -> f64 {
        let tau = self.tau;
        let (k, c) = (self.k, self.c);
        let (z, v) = (self.z, self.v);
        let a = *self.a.get_or_insert(-u - c * v - k * z);
        let z = z + (v + 0.5 * a * tau) * tau;
        let a_rel = -u - c * v - k * z;
        self.v += a_rel * tau;
        self.z = z + self.v * tau;
        a_rel + u
    }
}
