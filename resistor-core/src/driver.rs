//! Fixed-count iteration driver and run reporting.

use crate::config::RunConfig;
use crate::error::{Result, SolverError};
use crate::SolverCore;
use std::io::Write;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationReport {
    /// 1-based iteration index.
    pub iter: usize,
    /// `2 * V(n, n)` after this iteration.
    pub r: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub n: usize,
    pub niter: usize,
    pub mu: f64,
    pub om: f64,
    pub elapsed: Duration,
    pub seconds_per_iter: f64,
    pub resistance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Done,
}

/// Receives progress from a [`Driver`]. Any error aborts the run.
pub trait Reporter {
    fn started(&mut self, n: usize) -> Result<()>;
    fn iteration(&mut self, report: &IterationReport) -> Result<()>;
    fn finished(&mut self, summary: &RunSummary) -> Result<()>;
}

/// Accepts everything, prints nothing.
impl Reporter for () {
    fn started(&mut self, _n: usize) -> Result<()> {
        Ok(())
    }
    fn iteration(&mut self, _report: &IterationReport) -> Result<()> {
        Ok(())
    }
    fn finished(&mut self, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }
}

/// Line-oriented report:
///
/// ```text
///
/// Size: n = 2
///
/// Iter =    1, r = 0.6052599669208973
/// time per iter = 0.00000 r = 0.60526
/// ```
pub struct TextReporter<W: Write> {
    out: W,
    verbose: bool,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        TextReporter { out, verbose }
    }

    /// Prints per-iteration lines when `cfg.verbose` is set.
    pub fn for_config(out: W, cfg: &RunConfig) -> Self {
        Self::new(out, cfg.verbose)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn started(&mut self, n: usize) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Size: n = {n}")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn iteration(&mut self, report: &IterationReport) -> Result<()> {
        if self.verbose {
            writeln!(self.out, "Iter = {:4}, r = {:.16}", report.iter, report.r)?;
        }
        Ok(())
    }

    fn finished(&mut self, summary: &RunSummary) -> Result<()> {
        writeln!(
            self.out,
            "time per iter = {:.5} r = {:.5}",
            summary.seconds_per_iter, summary.resistance
        )?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Runs a [`SolverCore`] for exactly `niter` iterations.
pub struct Driver {
    solver: Option<SolverCore>,
    state: RunState,
}

impl Driver {
    pub fn new(cfg: RunConfig) -> Result<Driver> {
        Ok(Driver {
            solver: Some(SolverCore::new(cfg)?),
            state: RunState::Idle,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// `None` once a finished run has released the field.
    pub fn solver(&self) -> Option<&SolverCore> {
        self.solver.as_ref()
    }

    /// Runs to completion and releases the field.
    pub fn run<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<RunSummary> {
        let summary = self.run_keep(reporter);
        self.solver = None;
        summary
    }

    /// Runs to completion, keeping the final field reachable through [`Driver::solver`].
    pub fn run_keep<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<RunSummary> {
        let solver = match (self.state, self.solver.as_mut()) {
            (RunState::Idle, Some(solver)) => solver,
            _ => return Err(SolverError::config("driver has already run")),
        };
        let cfg = *solver.config();
        reporter.started(cfg.n)?;

        self.state = RunState::Running;
        let t0 = Instant::now();
        while let Some(report) = solver.step() {
            reporter.iteration(&report)?;
        }
        let elapsed = t0.elapsed();
        self.state = RunState::Done;

        let relax = solver.relaxation();
        let summary = RunSummary {
            n: cfg.n,
            niter: cfg.niter,
            mu: relax.mu(),
            om: relax.om(),
            elapsed,
            seconds_per_iter: elapsed.as_secs_f64() / cfg.niter as f64,
            resistance: solver.resistance(),
        };
        reporter.finished(&summary)?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect {
        started: Option<usize>,
        rs: Vec<f64>,
        finished: bool,
    }

    impl Reporter for Collect {
        fn started(&mut self, n: usize) -> Result<()> {
            self.started = Some(n);
            Ok(())
        }
        fn iteration(&mut self, report: &IterationReport) -> Result<()> {
            assert_eq!(report.iter, self.rs.len() + 1);
            self.rs.push(report.r);
            Ok(())
        }
        fn finished(&mut self, _summary: &RunSummary) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn driver_reports_every_iteration() {
        let mut driver = Driver::new(RunConfig::new(3, 5)).unwrap();
        assert_eq!(driver.state(), RunState::Idle);
        let mut c = Collect::default();
        let summary = driver.run(&mut c).unwrap();
        assert_eq!(driver.state(), RunState::Done);
        assert!(driver.solver().is_none());
        assert_eq!(c.started, Some(3));
        assert_eq!(c.rs.len(), 5);
        assert!(c.finished);
        assert_eq!(summary.resistance, *c.rs.last().unwrap());
        assert_eq!(summary.niter, 5);
        assert!(summary.seconds_per_iter >= 0.0);
    }

    #[test]
    fn run_keep_ends_done() {
        let mut driver = Driver::new(RunConfig::new(2, 2)).unwrap();
        let summary = driver.run_keep(&mut ()).unwrap();
        assert_eq!(driver.state(), RunState::Done);
        let solver = driver.solver().unwrap();
        assert!(solver.is_done());
        assert_eq!(solver.resistance(), summary.resistance);
        assert!(matches!(
            driver.run(&mut ()),
            Err(SolverError::Configuration(_))
        ));
    }

    #[test]
    fn text_format() {
        let cfg = RunConfig::new(2, 1);
        let mut rep = TextReporter::new(Vec::new(), true);
        let summary = Driver::new(cfg).unwrap().run(&mut rep).unwrap();
        let text = String::from_utf8(rep.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Size: n = 2");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], format!("Iter =    1, r = {:.16}", summary.resistance));
        assert!(lines[4].starts_with("time per iter = "));
        assert!(lines[4].ends_with(&format!(" r = {:.5}", summary.resistance)));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn verbosity_follows_config() {
        for verbose in [true, false] {
            let cfg = RunConfig::new(2, 3).with_verbose(verbose);
            let mut rep = TextReporter::for_config(Vec::new(), &cfg);
            Driver::new(cfg).unwrap().run(&mut rep).unwrap();
            let text = String::from_utf8(rep.into_inner()).unwrap();
            let expected = if verbose { 3 } else { 0 };
            assert_eq!(text.matches("Iter =").count(), expected);
        }
    }

    #[test]
    fn quiet_text_skips_iterations() {
        let mut rep = TextReporter::new(Vec::new(), false);
        Driver::new(RunConfig::new(2, 4)).unwrap().run(&mut rep).unwrap();
        let text = String::from_utf8(rep.into_inner()).unwrap();
        assert!(!text.contains("Iter ="));
        assert!(text.contains("time per iter = "));
    }

    #[test]
    fn reporter_failure_propagates() {
        let mut rep = TextReporter::new(FailingWriter, true);
        let err = Driver::new(RunConfig::new(2, 1)).unwrap().run(&mut rep);
        assert!(matches!(err, Err(SolverError::Io(_))));
    }
}
