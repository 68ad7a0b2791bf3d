//! Chebyshev-optimal relaxation factor for the resistor lattice.

use crate::error::{Result, SolverError};
use std::f64::consts::PI;

/// `mu` is the Jacobi spectral radius estimate, `om` the SOR factor derived from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relaxation {
    mu: f64,
    om: f64,
}

impl Relaxation {
    /// The two cosines use `2n` and `2n+1` intervals: the relaxed region is
    /// `2n-1` columns by `2n` rows.
    pub fn for_half_size(n: usize) -> Result<Relaxation> {
        if n == 0 {
            return Err(SolverError::config("n must be > 0"));
        }
        let nf = n as f64;
        let mu = 0.5 * ((PI / (2.0 * nf)).cos() + (PI / (2.0 * nf + 1.0)).cos());
        Self::from_mu(mu)
    }

    pub fn from_mu(mu: f64) -> Result<Relaxation> {
        if !(mu.abs() < 1.0) || mu == 0.0 {
            return Err(SolverError::config(format!(
                "spectral radius estimate mu = {mu} must satisfy 0 < |mu| < 1"
            )));
        }
        let mu2 = mu * mu;
        let om = 2.0 * (1.0 - (1.0 - mu2).sqrt()) / mu2;
        if !(om > 0.0 && om < 2.0) {
            return Err(SolverError::config(format!(
                "relaxation factor om = {om} outside (0, 2)"
            )));
        }
        Ok(Relaxation { mu, om })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn om(&self) -> f64 {
        self.om
    }
}
