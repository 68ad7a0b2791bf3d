pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod params;
pub mod sweep;

pub use config::{RunConfig, SweepMode};
pub use driver::{Driver, IterationReport, Reporter, RunState, RunSummary, TextReporter};
pub use error::{Result, SolverError};
pub use grid::Grid;
pub use params::Relaxation;
pub use sweep::{Color, SweepEngine};

/// Red-black SOR solver for a unit current dipole on a grounded resistor lattice.
///
/// The source sits at `(n, n)` and the sink at `(n, n+1)`; `resistance()` is
/// `2 * V(n, n)`, which equals `V(source) - V(sink)` once the field is
/// antisymmetric about their midpoint.
pub struct SolverCore {
    cfg: RunConfig,
    relax: Relaxation,
    engine: SweepEngine,
    grid: Grid,
    iter: usize,
}

impl SolverCore {
    pub fn new(cfg: RunConfig) -> Result<SolverCore> {
        cfg.validate()?;
        let relax = Relaxation::for_half_size(cfg.n)?;
        let grid = Grid::zeros(cfg.n)?;
        let engine = SweepEngine::new(relax.om(), cfg.sweep, &grid)?;

        Ok(SolverCore {
            cfg,
            relax,
            engine,
            grid,
            iter: 0,
        })
    }

    // ---- Accessors ----

    pub fn n(&self) -> usize {
        self.cfg.n
    }

    pub fn config(&self) -> &RunConfig {
        &self.cfg
    }

    pub fn relaxation(&self) -> Relaxation {
        self.relax
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn field(&self) -> &[f64] {
        self.grid.as_slice()
    }

    pub fn clone_field(&self) -> Vec<f64> {
        self.grid.as_slice().to_vec()
    }

    /// Completed iterations.
    pub fn iterations(&self) -> usize {
        self.iter
    }

    pub fn is_done(&self) -> bool {
        self.iter >= self.cfg.niter
    }

    pub fn source(&self) -> (usize, usize) {
        (self.cfg.n, self.cfg.n)
    }

    pub fn sink(&self) -> (usize, usize) {
        (self.cfg.n, self.cfg.n + 1)
    }

    pub fn resistance(&self) -> f64 {
        let (i, j) = self.source();
        2.0 * self.grid.get(i, j)
    }

    /// Back to the zero field and iteration 0, keeping the allocation.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.iter = 0;
    }

    // ---- Phases ----

    /// Red sweep followed by the current injected at the source.
    pub fn red_phase(&mut self) {
        self.engine.sweep(&mut self.grid, Color::Red);
        let (i, j) = self.source();
        self.grid.add(i, j, self.relax.om() * 0.25);
    }

    /// Black sweep followed by the current withdrawn at the sink.
    pub fn black_phase(&mut self) {
        self.engine.sweep(&mut self.grid, Color::Black);
        let (i, j) = self.sink();
        self.grid.add(i, j, -(self.relax.om() * 0.25));
    }

    /// One full iteration; `None` once `niter` iterations have run.
    pub fn step(&mut self) -> Option<IterationReport> {
        if self.is_done() {
            return None;
        }
        self.red_phase();
        self.black_phase();
        self.iter += 1;
        Some(IterationReport {
            iter: self.iter,
            r: self.resistance(),
        })
    }
}
