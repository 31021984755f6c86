//! # Shock Response Spectrum
//!
//! This crate computes the Shock Response Spectrum (SRS) of a single degree of freedom (SDOF)
//! oscillator driven by a base acceleration time history.
//!
//! The relative displacement $`z`$ of an oscillator of natural frequency $`\omega_n`$ and damping ratio $`\zeta`$
//! driven by the base acceleration $`\ddot y`$ obeys $$\ddot z + 2\zeta\omega_n\dot z + \omega_n^2 z = -\ddot y$$
//! and the absolute acceleration of the mass is $$\ddot x = \ddot z + \ddot y = -2\zeta\omega_n\dot z - \omega_n^2 z$$
//! For each natural frequency, the SRS value is the maximax $`\max|\ddot x|`$ of the response.
//!
//! Two independent families of [Solver]s compute the response:
//!  - the [LtiReference] is the exact discretization of the transfer function $$H(s)={cs+k\over s^2+cs+k}$$
//!  - the explicit time integrators [TrapezoidalVerlet], [HalfStepVerlet] and [SymplecticEuler] under verification
//!  - the [FieldCalculator], a literal rendition of the SRS web calculator update, pinned to check the calculator against the reference
//!
//! # Example
//! ```
//! use sdof_srs::{AccelerationTimeHistory, SrsBuilder, TrapezoidalVerlet};
//!
//! # fn main() -> sdof_srs::Result<()> {
//! let tau = 1. / (20. * 2000.);
//! let samples: Vec<f64> = (0..4000)
//!     .map(|i| if i < 400 { 10. * (std::f64::consts::PI * i as f64 / 400.).sin() } else { 0. })
//!     .collect();
//! let history = AccelerationTimeHistory::new(samples, tau)?;
//! let srs = SrsBuilder::<TrapezoidalVerlet>::new()
//!     .quality_factor(10.)
//!     .frequencies(vec![10., 100., 500., 1000., 2000.])
//!     .build()?;
//! let result = srs.compute(&history);
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

use serde_pickle as pkl;
use std::error::Error;
use std::fs::File;
use std::path::Path;

pub mod sdof;
pub use sdof::Sdof;

pub mod time_history;
pub use time_history::AccelerationTimeHistory;

pub mod solver;
pub use solver::{
    simulate, FieldCalculator, HalfStepVerlet, LtiReference, ResponseTrace, Solver,
    SymplecticEuler, TrapezoidalVerlet,
};

pub mod srs;
pub use srs::{log_frequencies, Srs, SrsBuilder, SrsPoint, SrsResult};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SrsError {
    #[error("invalid SDOF parameters: {0}")]
    InvalidParameters(String),
    #[error("malformed acceleration time history: {0}")]
    MalformedInput(String),
    #[error("non-finite response of the {frequency}Hz oscillator at sample #{sample}")]
    InstabilityDetected { frequency: f64, sample: usize },
}
pub type Result<T> = std::result::Result<T, SrsError>;

/// Serialization to a Python pickle file
pub trait ToPickle {
    fn to_pickle<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), Box<dyn Error>>;
}
impl<T: serde::Serialize> ToPickle for T {
    fn to_pickle<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), Box<dyn Error>> {
        let mut f = File::create(path)?;
        pkl::to_writer(&mut f, &self, true)?;
        Ok(())
    }
}
