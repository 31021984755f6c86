//! Semi-implicit (symplectic) Euler integration
//!
//! The velocity is updated first with the acceleration of the current state and the
//! position is then updated with the new velocity:
//! $$a_k = -u_k - cv_k - kx_k,\quad v_{k+1} = v_k + a_k\tau,\quad x_{k+1} = x_k + v_{k+1}\tau$$
//! The scheme is first order and stable for $`\omega_n\tau<2`$.

use crate::{Result, Sdof};
use serde::Serialize;

/// Semi-implicit Euler solver
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct SymplecticEuler {
    /// Sampling time is second
    pub tau: f64,
    k: f64,
    c: f64,
    x: (f64, f64),
}
impl super::Solver for SymplecticEuler {
    fn from_sdof(tau: f64, sdof: &Sdof) -> Result<Self> {
        Ok(Self {
            tau,
            k: sdof.stiffness(),
            c: sdof.damping(),
            ..Default::default()
        })
    }
    fn response(&self) -> f64 {
        -self.k * self.x.0 - self.c * self.x.1
    }
    fn solve(&mut self, u: f64, _u_next: f64) -> f64 {
        let a = -u - self.c * self.x.1 - self.k * self.x.0;
        self.x.1 += a * self.tau;
        self.x.0 += self.x.1 * self.tau;
        self.response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solver;
    use approx::assert_relative_eq;

    #[test]
    fn single_step() {
        let sdof = Sdof::new(50., 5.).unwrap();
        let tau = 1e-3;
        let mut solver = SymplecticEuler::from_sdof(tau, &sdof).unwrap();
        let y = solver.solve(2., 0.);
        let v = -2. * tau;
        let x = v * tau;
        assert_relative_eq!(solver.x.1, v);
        assert_relative_eq!(solver.x.0, x);
        assert_relative_eq!(y, -sdof.stiffness() * x - sdof.damping() * v);
    }
}
