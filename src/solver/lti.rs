//! Exact discretization of the absolute acceleration transfer function
//!
//! The transfer function from the base acceleration to the absolute acceleration of the mass
//! $$H(s)={cs+k\over s^2+cs+k}$$
//! is realized by the state space model:
//! $$
//! \dot x = Ax + Bu
//! $$
//! $$
//! y = Cx
//! $$
//! where
//! ```math
//! x = \begin{bmatrix}
//! z \\
//! \dot z
//! \end{bmatrix},
//! A = \begin{bmatrix}
//! 0 & 1 \\
//! -k & -c
//! \end{bmatrix}
//! ,
//! B = \begin{bmatrix}
//! 0 \\
//! -1
//! \end{bmatrix}
//! ,
//! C = \begin{bmatrix}
//! -k & -c
//! \end{bmatrix}
//! ```
//! The input is linearly interpolated in between samples (first-order hold) and the model is
//! discretized exactly using the matrix exponential of the augmented matrix
//! ```math
//! \exp\begin{bmatrix}
//! A\tau & B\tau & 0 \\
//! 0 & 0 & 1 \\
//! 0 & 0 & 0
//! \end{bmatrix} =
//! \begin{bmatrix}
//! \Phi & \Gamma_1 & \Gamma_2 \\
//! 0 & 1 & 1 \\
//! 0 & 0 & 1
//! \end{bmatrix}
//! ```
//! leading to the discrete state space model
//! $$
//! x[k+1] = \Phi x\[k\] + (\Gamma_1-\Gamma_2) u\[k\] + \Gamma_2 u[k+1]
//! $$
//! $$
//! y\[k\] = C x\[k\]
//! $$

use crate::{Result, Sdof};
use nalgebra::Matrix4;
use serde::Serialize;
use std::fmt;

/// First-order hold discrete state space model of the SDOF oscillator
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct LtiReference {
    /// Sampling time is second
    pub tau: f64,
    phi: (f64, f64, f64, f64),
    gamma_0: (f64, f64),
    gamma_1: (f64, f64),
    c: (f64, f64),
    x: (f64, f64),
}
impl super::Solver for LtiReference {
    fn from_sdof(tau: f64, sdof: &Sdof) -> Result<Self> {
        let (k, c) = (sdof.stiffness(), sdof.damping());
        #[rustfmt::skip]
        let m = Matrix4::new(
            0.,      tau,      0.,   0.,
            -k * tau, -c * tau, -tau, 0.,
            0.,      0.,       0.,   1.,
            0.,      0.,       0.,   0.,
        );
        let e = m.exp();
        log::debug!("{}: exp(M) =\n{:.6}", sdof, e);
        Ok(Self {
            tau,
            phi: (e[(0, 0)], e[(0, 1)], e[(1, 0)], e[(1, 1)]),
            gamma_0: (e[(0, 2)] - e[(0, 3)], e[(1, 2)] - e[(1, 3)]),
            gamma_1: (e[(0, 3)], e[(1, 3)]),
            c: (-k, -c),
            x: (0f64, 0f64),
        })
    }
    fn response(&self) -> f64 {
        self.c.0 * self.x.0 + self.c.1 * self.x.1
    }
    fn solve(&mut self, u: f64, u_next: f64) -> f64 {
        let (x0, x1) = self.x;
        self.x.0 = self.phi.0 * x0 + self.phi.1 * x1 + self.gamma_0.0 * u + self.gamma_1.0 * u_next;
        self.x.1 = self.phi.2 * x0 + self.phi.3 * x1 + self.gamma_0.1 * u + self.gamma_1.1 * u_next;
        self.response()
    }
}
impl fmt::Display for LtiReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "2x2 first-order hold state space model ({:.3}Hz)\n - A: {:.9?}\n - B: {:.9?} {:.9?}",
            self.tau.recip(),
            self.phi,
            self.gamma_0,
            self.gamma_1
        )
    }
}
