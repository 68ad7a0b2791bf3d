use crate::error::{Result, SolverError};

/// How a colour phase is executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepMode {
    #[default]
    Serial,
    /// Row partitions scheduled on the rayon pool; same numbers as `Serial`.
    Parallel,
}

impl SweepMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepMode::Serial => "serial",
            SweepMode::Parallel => "parallel",
        }
    }
}

/// Runtime configuration of a single solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Grid half-dimension; the lattice has `2n+1` columns.
    pub n: usize,
    /// Number of full red+black iterations.
    pub niter: usize,
    /// Print one line per iteration.
    pub verbose: bool,
    pub sweep: SweepMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            n: 1000,
            niter: 10,
            verbose: true,
            sweep: SweepMode::Serial,
        }
    }
}

impl RunConfig {
    pub fn new(n: usize, niter: usize) -> Self {
        RunConfig {
            n,
            niter,
            ..RunConfig::default()
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_sweep(mut self, sweep: SweepMode) -> Self {
        self.sweep = sweep;
        self
    }

    /// Checks everything that does not depend on the relaxation factor.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(SolverError::config("n must be > 0"));
        }
        if self.niter == 0 {
            return Err(SolverError::config("niter must be > 0"));
        }
        if self.sweep == SweepMode::Parallel && !cfg!(feature = "parallel") {
            return Err(SolverError::config(
                "parallel sweep requested but resistor-core was built without the `parallel` feature",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_configuration() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.n, 1000);
        assert_eq!(cfg.niter, 10);
        assert!(cfg.verbose);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_sizes() {
        assert!(matches!(
            RunConfig::new(0, 10).validate(),
            Err(SolverError::Configuration(_))
        ));
        assert!(matches!(
            RunConfig::new(4, 0).validate(),
            Err(SolverError::Configuration(_))
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_allowed_with_feature() {
        let cfg = RunConfig::new(4, 1).with_sweep(SweepMode::Parallel);
        assert!(cfg.validate().is_ok());
    }
}
