//! Red-black SOR colour phases.
//!
//! A node's five-point stencil only touches nodes of the other colour, so all
//! updates inside one phase are independent. The red phase must finish before
//! the black phase reads it.

use crate::config::SweepMode;
use crate::error::{Result, SolverError};
use crate::grid::Grid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// `i + j` even; holds the source node.
    Red,
    /// `i + j` odd; holds the sink node.
    Black,
}

impl Color {
    pub fn of(i: usize, j: usize) -> Color {
        if (i + j) % 2 == 0 { Color::Red } else { Color::Black }
    }

    fn parity(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    /// First interior column of this colour in row `j`.
    #[inline(always)]
    fn first_column(self, j: usize) -> usize {
        1 + (1 + j + self.parity()) % 2
    }
}

/// Over-relaxed Gauss-Seidel value for the node at flat offset `k`.
#[inline(always)]
fn relax(v: &[f64], k: usize, stride: usize, om: f64) -> f64 {
    (1.0 - om) * v[k] + om * 0.25 * (v[k + 1] + v[k - 1] + v[k + stride] + v[k - stride])
}

pub struct SweepEngine {
    om: f64,
    mode: SweepMode,
    // Staging buffer for parallel phases; empty in serial mode.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    scratch: Vec<f64>,
}

impl SweepEngine {
    pub fn new(om: f64, mode: SweepMode, grid: &Grid) -> Result<SweepEngine> {
        let mut scratch = Vec::new();
        if mode == SweepMode::Parallel {
            let cells = grid.as_slice().len();
            scratch
                .try_reserve_exact(cells)
                .map_err(|e| SolverError::Allocation {
                    cells,
                    reason: e.to_string(),
                })?;
            scratch.resize(cells, 0.0);
        }
        Ok(SweepEngine { om, mode, scratch })
    }

    pub fn om(&self) -> f64 {
        self.om
    }

    pub fn mode(&self) -> SweepMode {
        self.mode
    }

    /// Relax every interior node of `color` once.
    pub fn sweep(&mut self, grid: &mut Grid, color: Color) {
        match self.mode {
            SweepMode::Serial => sweep_serial(grid, self.om, color),
            #[cfg(feature = "parallel")]
            SweepMode::Parallel => sweep_parallel(grid, &mut self.scratch, self.om, color),
            // Rejected by RunConfig::validate.
            #[cfg(not(feature = "parallel"))]
            SweepMode::Parallel => sweep_serial(grid, self.om, color),
        }
    }
}

fn sweep_serial(grid: &mut Grid, om: f64, color: Color) {
    let cols = grid.columns();
    let rows = grid.rows();
    let v = grid.as_mut_slice();

    for j in 1..(rows - 1) {
        let row = j * cols;
        let mut i = color.first_column(j);
        while i < cols - 1 {
            let k = row + i;
            v[k] = relax(v, k, cols, om);
            i += 2;
        }
    }
}

/// Each row is an independent work item: new values are staged in `scratch`
/// from a read-only view of the field, then copied back. The join between
/// the two passes is the barrier.
#[cfg(feature = "parallel")]
fn sweep_parallel(grid: &mut Grid, scratch: &mut [f64], om: f64, color: Color) {
    let cols = grid.columns();
    let rows = grid.rows();

    let v_ro: &[f64] = grid.as_slice();
    scratch
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(j, tmp_row)| {
            if j == 0 || j + 1 == rows {
                return;
            }
            let row = j * cols;
            let mut i = color.first_column(j);
            while i < cols - 1 {
                tmp_row[i] = relax(v_ro, row + i, cols, om);
                i += 2;
            }
        });

    let tmp_ro: &[f64] = scratch;
    grid.as_mut_slice()
        .par_chunks_mut(cols)
        .zip(tmp_ro.par_chunks(cols))
        .enumerate()
        .for_each(|(j, (v_row, tmp_row))| {
            if j == 0 || j + 1 == rows {
                return;
            }
            let mut i = color.first_column(j);
            while i < cols - 1 {
                v_row[i] = tmp_row[i];
                i += 2;
            }
        });
}
