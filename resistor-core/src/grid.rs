use crate::error::{Result, SolverError};

/// Potential field of the resistor lattice.
///
/// `2n+1` columns by `2n+2` rows in one contiguous buffer, `offset = i + (2n+1)*j`.
/// Columns `0` and `2n` and rows `0` and `2n+1` are the grounded boundary: they
/// start at zero and no sweep ever writes them. Everything else is relaxed.
#[derive(Clone, Debug)]
pub struct Grid {
    n: usize,
    columns: usize,
    rows: usize,
    data: Vec<f64>,
}

impl Grid {
    pub fn zeros(n: usize) -> Result<Grid> {
        if n == 0 {
            return Err(SolverError::config("n must be > 0"));
        }
        let overflow = || SolverError::Allocation {
            cells: usize::MAX,
            reason: format!("grid size for n = {n} overflows usize"),
        };
        let columns = n.checked_mul(2).and_then(|v| v.checked_add(1)).ok_or_else(overflow)?;
        let rows = columns.checked_add(1).ok_or_else(overflow)?;
        let cells = columns.checked_mul(rows).ok_or_else(overflow)?;

        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|e| SolverError::Allocation {
                cells,
                reason: e.to_string(),
            })?;
        data.resize(cells, 0.0);

        Ok(Grid {
            n,
            columns,
            rows,
            data,
        })
    }

    // ---- Layout ----

    pub fn half_size(&self) -> usize {
        self.n
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.columns && j < self.rows, "({i}, {j}) outside grid");
        i + self.columns * j
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || i == self.columns - 1 || j == 0 || j == self.rows - 1
    }

    // ---- Access ----

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] = value;
    }

    #[inline(always)]
    pub fn add(&mut self, i: usize, j: usize, delta: f64) {
        let k = self.offset(i, j);
        self.data[k] += delta;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// True when every boundary node still holds exactly zero.
    pub fn boundary_is_grounded(&self) -> bool {
        let last_col = self.columns - 1;
        let last_row = self.rows - 1;
        let rows_ok = (0..self.columns).all(|i| self.get(i, 0) == 0.0 && self.get(i, last_row) == 0.0);
        let cols_ok = (0..self.rows).all(|j| self.get(0, j) == 0.0 && self.get(last_col, j) == 0.0);
        rows_ok && cols_ok
    }
}
