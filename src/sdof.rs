//! Single degree of freedom oscillator parameters
//!
//! An oscillator is defined by its natural frequency $`f_n`$ in Hz and its quality factor $`Q`$.
//! The derived coefficients of the equation of motion are
//! $`\omega_n=2\pi f_n`$, $`\zeta=1/(2Q)`$, $`k=\omega_n^2`$ and $`c=2\zeta\omega_n`$.

use crate::{Result, SrsError};
use num_complex::Complex;
use serde::Serialize;
use std::{f64::consts::PI, fmt};

/// SDOF oscillator parameters
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Sdof {
    natural_frequency: f64,
    quality_factor: f64,
    omega: f64,
    zeta: f64,
}
impl Sdof {
    /// Creates a new oscillator from its natural frequency in Hz and its quality factor
    pub fn new(natural_frequency: f64, quality_factor: f64) -> Result<Self> {
        if !(natural_frequency.is_finite() && natural_frequency > 0.) {
            return Err(SrsError::InvalidParameters(format!(
                "natural frequency must be positive, found {}Hz",
                natural_frequency
            )));
        }
        if !(quality_factor.is_finite() && quality_factor > 0.) {
            return Err(SrsError::InvalidParameters(format!(
                "quality factor must be positive, found {}",
                quality_factor
            )));
        }
        Ok(Self {
            natural_frequency,
            quality_factor,
            omega: 2. * PI * natural_frequency,
            zeta: 0.5 / quality_factor,
        })
    }
    /// Natural frequency in Hz
    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }
    pub fn quality_factor(&self) -> f64 {
        self.quality_factor
    }
    /// Angular natural frequency in radians per second
    pub fn omega(&self) -> f64 {
        self.omega
    }
    /// Damping ratio
    pub fn zeta(&self) -> f64 {
        self.zeta
    }
    /// Stiffness coefficient $`k=\omega_n^2`$
    pub fn stiffness(&self) -> f64 {
        self.omega * self.omega
    }
    /// Damping coefficient $`c=2\zeta\omega_n`$
    pub fn damping(&self) -> f64 {
        2. * self.zeta * self.omega
    }
    /// Evaluates the absolute acceleration transfer function $`H(j2\pi f)`$ at the frequency `f` in Hz
    pub fn transmissibility(&self, f: f64) -> Complex<f64> {
        let s = Complex::new(0., 2. * PI * f);
        let (k, c) = (self.stiffness(), self.damping());
        (c * s + k) / (s * s + c * s + k)
    }
}
impl fmt::Display for Sdof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SDOF oscillator: {:.3}Hz, Q={:.3} (zeta={:.4})",
            self.natural_frequency, self.quality_factor, self.zeta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derived_coefficients() {
        let sdof = Sdof::new(100., 10.).unwrap();
        let omega = 200. * PI;
        assert_relative_eq!(sdof.omega(), omega);
        assert_relative_eq!(sdof.zeta(), 0.05);
        assert_relative_eq!(sdof.stiffness(), omega * omega);
        assert_relative_eq!(sdof.damping(), 0.1 * omega);
    }

    #[test]
    fn invalid_parameters() {
        for (nu, q) in [(0., 10.), (-1., 10.), (100., 0.), (100., -2.), (f64::NAN, 10.)] {
            assert!(matches!(
                Sdof::new(nu, q),
                Err(SrsError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn transmissibility() {
        let sdof = Sdof::new(50., 10.).unwrap();
        assert_relative_eq!(sdof.transmissibility(0.).norm(), 1.);
        let q = sdof.quality_factor();
        assert_relative_eq!(
            sdof.transmissibility(50.).norm(),
            q * (1. + 1. / (q * q)).sqrt(),
            max_relative = 1e-12
        );
        assert!(sdof.transmissibility(5000.).norm() < 0.05);
    }
}
