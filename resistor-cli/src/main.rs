mod field;
mod report;

use clap::Parser;
use field::write_field;
use report::{JsonlReporter, Tee};
use resistor_core::{Driver, RunConfig, SweepMode, TextReporter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Effective resistance of a grid of unit resistors (red-black SOR)")]
struct Args {
    /// Grid half-size n (lattice is (2n+1) columns)
    #[arg(long, default_value_t = 1000)]
    n: usize,

    /// Number of full red+black iterations
    #[arg(long, default_value_t = 10)]
    niter: usize,

    /// Only print the size line and the final summary
    #[arg(long)]
    quiet: bool,

    /// Sweep each colour phase across the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Write one JSON object per iteration plus a summary line
    #[arg(long)]
    json: Option<PathBuf>,

    /// Dump the final field (u32 columns, u32 rows, then f64 values, little-endian)
    #[arg(long)]
    dump_field: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let sweep = if args.parallel {
        SweepMode::Parallel
    } else {
        SweepMode::Serial
    };
    let cfg = RunConfig::new(args.n, args.niter)
        .with_verbose(!args.quiet)
        .with_sweep(sweep);

    let mut driver = Driver::new(cfg).map_err(|e| format!("cannot set up run: {e}"))?;

    let stdout = io::stdout();
    let mut text = TextReporter::for_config(stdout.lock(), &cfg);

    match &args.json {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            let mut json = JsonlReporter::new(file);
            driver.run_keep(&mut Tee(&mut text, &mut json))?;
            json.into_inner().flush()?;
        }
        None => {
            driver.run_keep(&mut text)?;
        }
    }

    if let (Some(path), Some(solver)) = (&args.dump_field, driver.solver()) {
        let grid = solver.grid();
        let mut w = BufWriter::new(File::create(path)?);
        write_field(&mut w, grid)?;
        w.flush()?;
        eprintln!("Wrote field ({}x{}) to: {}", grid.columns(), grid.rows(), path.display());
    }

    Ok(())
}
