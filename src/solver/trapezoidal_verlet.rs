//! Velocity-Verlet integration with the damping force coupling solved exactly
//!
//! The Velocity-Verlet scheme reads
//! $$x_{k+1} = x_k + v_k\tau + {1\over 2}a_k\tau^2$$
//! $$v_{k+1} = v_k + {1\over 2}(a_k+a_{k+1})\tau$$
//! with $`a_k = -u_k - cv_k - kx_k`$.
//! As $`a_{k+1}`$ depends on $`v_{k+1}`$, the update is implicit in the velocity.
//! The relations being linear in $`(x_{k+1},v_{k+1})`$, they form the 2x2 linear system
//! ```math
//! L\begin{bmatrix}x_{k+1}\\v_{k+1}\end{bmatrix} =
//! R\begin{bmatrix}x_k\\v_k\end{bmatrix} + S\begin{bmatrix}u_k\\u_{k+1}\end{bmatrix}
//! ```
//! where
//! ```math
//! L = \begin{bmatrix}
//! 1 & 0 \\
//! {k\tau\over 2} & 1+{c\tau\over 2}
//! \end{bmatrix},
//! R = \begin{bmatrix}
//! 1-{k\tau^2\over 2} & \tau-{c\tau^2\over 2} \\
//! -{k\tau\over 2} & 1-{c\tau\over 2}
//! \end{bmatrix},
//! S = -{\tau\over 2}\begin{bmatrix}
//! \tau & 0 \\
//! 1 & 1
//! \end{bmatrix}
//! ```
//! that is solved once for all into the recurrence $`x_{k+1} = L^{-1}Rx_k + L^{-1}Su_k`$.
//! The scheme is second order accurate.

use crate::{Result, Sdof, SrsError};
use nalgebra::Matrix2;
use serde::Serialize;
use std::fmt;

/// Velocity-Verlet solver with exact velocity coupling
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct TrapezoidalVerlet {
    /// Sampling time is second
    pub tau: f64,
    k: f64,
    c: f64,
    q: (f64, f64, f64, f64),
    m: (f64, f64, f64, f64),
    x: (f64, f64),
}
impl super::Solver for TrapezoidalVerlet {
    fn from_sdof(tau: f64, sdof: &Sdof) -> Result<Self> {
        let (k, c) = (sdof.stiffness(), sdof.damping());
        let tau2 = tau * tau;
        let l = Matrix2::new(1., 0., 0.5 * k * tau, 1. + 0.5 * c * tau);
        let il = l.try_inverse().ok_or_else(|| {
            SrsError::InvalidParameters(format!(
                "singular Velocity-Verlet coupling matrix for {} with {}s sample interval",
                sdof, tau
            ))
        })?;
        let r = Matrix2::new(
            1. - 0.5 * k * tau2,
            tau - 0.5 * c * tau2,
            -0.5 * k * tau,
            1. - 0.5 * c * tau,
        );
        let s = Matrix2::new(-0.5 * tau2, 0., -0.5 * tau, -0.5 * tau);
        let q = il * r;
        let m = il * s;
        Ok(Self {
            tau,
            k,
            c,
            q: (q[(0, 0)], q[(0, 1)], q[(1, 0)], q[(1, 1)]),
            m: (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]),
            x: (0f64, 0f64),
        })
    }
    fn response(&self) -> f64 {
        -self.k * self.x.0 - self.c * self.x.1
    }
    fn solve(&mut self, u: f64, u_next: f64) -> f64 {
        let (x0, x1) = self.x;
        self.x.0 = self.q.0 * x0 + self.q.1 * x1 + self.m.0 * u + self.m.1 * u_next;
        self.x.1 = self.q.2 * x0 + self.q.3 * x1 + self.m.2 * u + self.m.3 * u_next;
        self.response()
    }
}
impl fmt::Display for TrapezoidalVerlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Velocity-Verlet (exact coupling) ({:.3}Hz)\n - A: {:.9?}\n - B: {:.9?}",
            self.tau.recip(),
            self.q,
            self.m
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solver;
    use approx::assert_relative_eq;

    // Direct evaluation of the implicit Velocity-Verlet relations
    fn step(sdof: &Sdof, tau: f64, (x, v): (f64, f64), u: f64, u_next: f64) -> (f64, f64) {
        let (k, c) = (sdof.stiffness(), sdof.damping());
        let a = -u - c * v - k * x;
        let x_new = x + v * tau + 0.5 * a * tau * tau;
        let v_new = (v + 0.5 * tau * (a - u_next - k * x_new)) / (1. + 0.5 * c * tau);
        (x_new, v_new)
    }

    #[test]
    fn recurrence_matches_implicit_relations() {
        let sdof = Sdof::new(250., 3.).unwrap();
        let tau = 1e-4;
        let mut solver = TrapezoidalVerlet::from_sdof(tau, &sdof).unwrap();
        let mut state = (0., 0.);
        let u: Vec<f64> = (0..200).map(|k| (k as f64 * 0.37).sin()).collect();
        for w in u.windows(2) {
            let y = solver.solve(w[0], w[1]);
            state = step(&sdof, tau, state, w[0], w[1]);
            assert_relative_eq!(solver.x.0, state.0, max_relative = 1e-9, epsilon = 1e-15);
            assert_relative_eq!(solver.x.1, state.1, max_relative = 1e-9, epsilon = 1e-15);
            // absolute acceleration is the relative acceleration plus the base acceleration
            let (k, c) = (sdof.stiffness(), sdof.damping());
            let a_new = -w[1] - c * state.1 - k * state.0;
            assert_relative_eq!(y, a_new + w[1], max_relative = 1e-9, epsilon = 1e-12);
        }
    }

    #[test]
    fn recurrence_matrices() {
        // L q = R and L m = S with the 2x2 matrices of the module documentation
        let sdof = Sdof::new(1500., 0.7).unwrap();
        let tau = 2.5e-5;
        let (k, c) = (sdof.stiffness(), sdof.damping());
        let solver = TrapezoidalVerlet::from_sdof(tau, &sdof).unwrap();
        let l = Matrix2::new(1., 0., 0.5 * k * tau, 1. + 0.5 * c * tau);
        let q = Matrix2::new(solver.q.0, solver.q.1, solver.q.2, solver.q.3);
        let m = Matrix2::new(solver.m.0, solver.m.1, solver.m.2, solver.m.3);
        let r = Matrix2::new(
            1. - 0.5 * k * tau * tau,
            tau - 0.5 * c * tau * tau,
            -0.5 * k * tau,
            1. - 0.5 * c * tau,
        );
        let s = Matrix2::new(-0.5 * tau * tau, 0., -0.5 * tau, -0.5 * tau);
        assert_relative_eq!(l * q, r, max_relative = 1e-12, epsilon = 1e-15);
        assert_relative_eq!(l * m, s, max_relative = 1e-12, epsilon = 1e-18);
    }

    #[test]
    fn singular_coupling() {
        // 1 + c tau / 2 vanishes for a negative sample interval of -2/c
        let sdof = Sdof::new(100., 10.).unwrap();
        let tau = -2. / sdof.damping();
        assert!(matches!(
            TrapezoidalVerlet::from_sdof(tau, &sdof),
            Err(SrsError::InvalidParameters(_))
        ));
    }
}
