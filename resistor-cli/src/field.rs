use resistor_core::Grid;
use std::io::{self, Write};

/// Writes `u32` columns, `u32` rows, then every value in storage order, all little-endian.
pub fn write_field<W: Write>(w: &mut W, grid: &Grid) -> io::Result<()> {
    let dim = |v: usize| {
        u32::try_from(v).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("grid dimension {v} does not fit the u32 header"),
            )
        })
    };
    let columns = dim(grid.columns())?;
    let rows = dim(grid.rows())?;

    w.write_all(&columns.to_le_bytes())?;
    w.write_all(&rows.to_le_bytes())?;
    write_f64_vec(w, grid.as_slice())
}

fn write_f64_vec<W: Write>(w: &mut W, v: &[f64]) -> io::Result<()> {
    for &x in v {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resistor_core::{RunConfig, SolverCore};

    #[test]
    fn layout_for_smallest_grid() {
        let mut s = SolverCore::new(RunConfig::new(1, 1)).unwrap();
        s.step();
        let mut buf = Vec::new();
        write_field(&mut buf, s.grid()).unwrap();

        // 3 columns x 4 rows.
        assert_eq!(buf.len(), 8 + 12 * 8);
        assert_eq!(buf[0..4], 3u32.to_le_bytes());
        assert_eq!(buf[4..8], 4u32.to_le_bytes());

        let (i, j) = s.source();
        let at = 8 + 8 * s.grid().offset(i, j);
        let bytes: [u8; 8] = buf[at..at + 8].try_into().unwrap();
        let v = f64::from_le_bytes(bytes);
        assert_eq!(v, s.grid().get(i, j));
        assert_eq!(2.0 * v, s.resistance());
        assert!(v != 0.0);
    }

    #[test]
    fn values_follow_storage_order() {
        let mut s = SolverCore::new(RunConfig::new(2, 3)).unwrap();
        while s.step().is_some() {}
        let mut buf = Vec::new();
        write_field(&mut buf, s.grid()).unwrap();

        let values: Vec<f64> = buf[8..]
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(values.as_slice(), s.field());
    }
}
