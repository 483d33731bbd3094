//! The Compressed Sparse Column (CSC) binary-matrix data model.

use std::io::{self, Write};

use crate::error::LoadError;

/// Copies `v` into a freshly, fallibly allocated boxed slice.
///
/// `v` already holds its data by the time a loader calls [`CscBinaryMatrix::from_parts`],
/// but this is the one point every loader funnels through, so it is where a
/// failed allocation for the matrix's final, immutable storage surfaces as
/// [`LoadError::Alloc`] rather than an unconditional `into_boxed_slice` that
/// can never report the failure.
fn try_into_boxed_slice(v: Vec<u32>, op: &'static str) -> Result<Box<[u32]>, LoadError> {
    let mut out: Vec<u32> = Vec::new();
    out.try_reserve_exact(v.len())
        .map_err(|_| LoadError::Alloc { op })?;
    out.extend(v);
    Ok(out.into_boxed_slice())
}

/// A sparse binary (0/1) matrix stored in Compressed Sparse Column form.
///
/// Built only through [`CscBinaryMatrix::from_parts`], which enforces the
/// invariants every algorithm in `concomp-algo` relies on: `nrows == ncols`,
/// `col_ptr[0] == 0`, `col_ptr[ncols] == nnz`, `col_ptr` non-decreasing, and
/// every stored row index in `[0, nrows)`. Once built, a matrix is immutable
/// for the rest of its lifetime — there is no API to mutate `row_idx` or
/// `col_ptr` in place.
///
/// Interpreted as an undirected graph: a stored entry `(r, c)` with `r != c`
/// means the edge `r — c`. Row indices within a column need not be sorted
/// and duplicates are tolerated; every algorithm here is idempotent over
/// duplicate edges.
#[derive(Debug, Clone)]
pub struct CscBinaryMatrix {
    nrows: usize,
    ncols: usize,
    row_idx: Box<[u32]>,
    col_ptr: Box<[u32]>,
}

impl CscBinaryMatrix {
    /// Builds a matrix from its raw CSC parts, validating every invariant in
    /// §3 of the specification.
    ///
    /// `op` names the calling loader, so validation failures read as
    /// `<op>: invalid matrix shape: ...` rather than a bare assertion.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        row_idx: Vec<u32>,
        col_ptr: Vec<u32>,
        op: &'static str,
    ) -> Result<Self, LoadError> {
        if nrows != ncols {
            return Err(LoadError::shape(
                op,
                format!("matrix must be square, got {nrows}x{ncols}"),
            ));
        }
        if col_ptr.len() != ncols + 1 {
            return Err(LoadError::shape(
                op,
                format!(
                    "col_ptr must have ncols+1 = {} entries, got {}",
                    ncols + 1,
                    col_ptr.len()
                ),
            ));
        }
        if col_ptr.first().copied() != Some(0) {
            return Err(LoadError::shape(op, "col_ptr[0] must be 0"));
        }
        let nnz = row_idx.len();
        if col_ptr.last().copied() != Some(nnz as u32) {
            return Err(LoadError::shape(
                op,
                format!("col_ptr[ncols] must equal nnz = {nnz}"),
            ));
        }
        if !col_ptr.windows(2).all(|w| w[0] <= w[1]) {
            return Err(LoadError::shape(op, "col_ptr must be non-decreasing"));
        }
        let n = nrows as u64;
        if let Some(&bad) = row_idx.iter().find(|&&r| r as u64 >= n) {
            return Err(LoadError::shape(
                op,
                format!("row index {bad} out of range for {nrows} rows"),
            ));
        }

        Ok(CscBinaryMatrix {
            nrows,
            ncols,
            row_idx: try_into_boxed_slice(row_idx, op)?,
            col_ptr: try_into_boxed_slice(col_ptr, op)?,
        })
    }

    /// Number of rows (equals [`ncols`](Self::ncols) by construction).
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns (equals [`nrows`](Self::nrows) by construction).
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored non-zero entries.
    #[inline(always)]
    pub fn nnz(&self) -> usize {
        self.row_idx.len()
    }

    /// The row indices, in column-major storage order.
    #[inline(always)]
    pub fn row_idx(&self) -> &[u32] {
        &self.row_idx
    }

    /// Column offsets into [`row_idx`](Self::row_idx); `col_ptr()[c]..col_ptr()[c+1]`
    /// is the slice of row indices stored in column `c`.
    #[inline(always)]
    pub fn col_ptr(&self) -> &[u32] {
        &self.col_ptr
    }

    /// The row indices stored in column `c`.
    #[inline(always)]
    pub fn column(&self, c: usize) -> &[u32] {
        let start = self.col_ptr[c] as usize;
        let end = self.col_ptr[c + 1] as usize;
        &self.row_idx[start..end]
    }

    /// Writes the matrix as `(row, col)` pairs, column-major, intra-column
    /// storage order, 1-based, ten pairs per line.
    ///
    /// Deterministic and used only for diagnostics and round-trip tests —
    /// it is not a canonical on-disk format.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "Binary Sparse Matrix:\nN:{}, M:{}, Non-Zero Elements:{}\n",
            self.nrows,
            self.ncols,
            self.nnz()
        )?;

        let mut in_line = 0usize;
        for c in 0..self.ncols {
            for &r in self.column(c) {
                if in_line > 0 {
                    write!(out, " ")?;
                }
                write!(out, "({},{})", r + 1, c + 1)?;
                in_line += 1;
                if in_line == 10 {
                    writeln!(out)?;
                    in_line = 0;
                }
            }
        }
        if in_line > 0 {
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_square() {
        let err = CscBinaryMatrix::from_parts(2, 3, vec![], vec![0, 0, 0, 0], "test");
        assert!(matches!(err, Err(LoadError::Shape { .. })));
    }

    #[test]
    fn rejects_bad_col_ptr_len() {
        let err = CscBinaryMatrix::from_parts(2, 2, vec![], vec![0, 0], "test");
        assert!(matches!(err, Err(LoadError::Shape { .. })));
    }

    #[test]
    fn rejects_out_of_range_row() {
        let err = CscBinaryMatrix::from_parts(2, 2, vec![5], vec![0, 1, 1], "test");
        assert!(matches!(err, Err(LoadError::Shape { .. })));
    }

    #[test]
    fn rejects_non_monotone_col_ptr() {
        let err = CscBinaryMatrix::from_parts(2, 2, vec![0, 1], vec![0, 2, 1], "test");
        assert!(matches!(err, Err(LoadError::Shape { .. })));
    }

    #[test]
    fn accepts_empty_matrix() {
        let m = CscBinaryMatrix::from_parts(3, 3, vec![], vec![0, 0, 0, 0], "test").unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn accepts_zero_sized_matrix() {
        let m = CscBinaryMatrix::from_parts(0, 0, vec![], vec![0], "test").unwrap();
        assert_eq!(m.nrows(), 0);
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn column_slicing() {
        // column 0: row 1; column 1: rows 0, 2
        let m =
            CscBinaryMatrix::from_parts(3, 3, vec![1, 0, 2], vec![0, 1, 3, 3], "test").unwrap();
        assert_eq!(m.column(0), &[1]);
        assert_eq!(m.column(1), &[0, 2]);
        assert_eq!(m.column(2), &[] as &[u32]);
    }

    #[test]
    fn print_is_one_based_column_major() {
        let m = CscBinaryMatrix::from_parts(2, 2, vec![1, 0], vec![0, 1, 2], "test").unwrap();
        let mut buf = Vec::new();
        m.print(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("(2,1)"));
        assert!(text.contains("(1,2)"));
    }
}
