//! Velocity-Verlet integration with a half-step velocity predictor
//!
//! The acceleration at the end of the step is evaluated with the predicted velocity
//! $`v_{k+1/2} = v_k + a_k\tau/2`$ instead of the unknown $`v_{k+1}`$:
//! $$a_{k+1} = -u_{k+1} - cv_{k+1/2} - kx_{k+1}$$
//! The approximation error grows with $`\zeta\omega_n\tau`$ and limits the scheme to first order under heavy damping.

use crate::{Result, Sdof};
use serde::Serialize;

/// Velocity-Verlet solver with half-step velocity predictor
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct HalfStepVerlet {
    /// Sampling time is second
    pub tau: f64,
    k: f64,
    c: f64,
    x: f64,
    v: f64,
}
impl HalfStepVerlet {
    fn acceleration(&self, u: f64, x: f64, v: f64) -> f64 {
        -u - self.c * v - self.k * x
    }
}
impl super::Solver for HalfStepVerlet {
    fn from_sdof(tau: f64, sdof: &Sdof) -> Result<Self> {
        Ok(Self {
            tau,
            k: sdof.stiffness(),
            c: sdof.damping(),
            ..Default::default()
        })
    }
    fn response(&self) -> f64 {
        -self.k * self.x - self.c * self.v
    }
    fn solve(&mut self, u: f64, u_next: f64) -> f64 {
        let tau = self.tau;
        let a = self.acceleration(u, self.x, self.v);
        let x_new = self.x + self.v * tau + 0.5 * a * tau * tau;
        let v_half = self.v + 0.5 * a * tau;
        let a_new = self.acceleration(u_next, x_new, v_half);
        self.v += 0.5 * (a + a_new) * tau;
        self.x = x_new;
        a_new + u_next
    }
}
