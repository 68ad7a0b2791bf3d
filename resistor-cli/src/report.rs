use resistor_core::{IterationReport, Reporter, Result, RunSummary};
use serde::Serialize;
use std::io::Write;
use std::time::Instant;

#[derive(Serialize)]
struct IterRow {
    iter: usize,
    r: f64,
    elapsed_s: f64,
}

#[derive(Serialize)]
struct SummaryRow {
    n: usize,
    niter: usize,
    mu: f64,
    om: f64,
    seconds_per_iter: f64,
    r: f64,
}

/// JSON-lines log: one row per iteration, then the summary.
pub struct JsonlReporter<W: Write> {
    out: W,
    t0: Instant,
}

impl<W: Write> JsonlReporter<W> {
    pub fn new(out: W) -> Self {
        JsonlReporter {
            out,
            t0: Instant::now(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row<T: Serialize>(&mut self, row: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, row).map_err(std::io::Error::from)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Reporter for JsonlReporter<W> {
    fn started(&mut self, _n: usize) -> Result<()> {
        self.t0 = Instant::now();
        Ok(())
    }

    fn iteration(&mut self, report: &IterationReport) -> Result<()> {
        let row = IterRow {
            iter: report.iter,
            r: report.r,
            elapsed_s: self.t0.elapsed().as_secs_f64(),
        };
        self.write_row(&row)
    }

    fn finished(&mut self, summary: &RunSummary) -> Result<()> {
        let row = SummaryRow {
            n: summary.n,
            niter: summary.niter,
            mu: summary.mu,
            om: summary.om,
            seconds_per_iter: summary.seconds_per_iter,
            r: summary.resistance,
        };
        self.write_row(&row)
    }
}

/// Forwards every event to both reporters, first one first.
pub struct Tee<'a>(pub &'a mut dyn Reporter, pub &'a mut dyn Reporter);

impl Reporter for Tee<'_> {
    fn started(&mut self, n: usize) -> Result<()> {
        self.0.started(n)?;
        self.1.started(n)
    }

    fn iteration(&mut self, report: &IterationReport) -> Result<()> {
        self.0.iteration(report)?;
        self.1.iteration(report)
    }

    fn finished(&mut self, summary: &RunSummary) -> Result<()> {
        self.0.finished(summary)?;
        self.1.finished(summary)
    }
}
