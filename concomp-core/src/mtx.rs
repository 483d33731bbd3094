//! Matrix Market (`.mtx`) loader.
//!
//! Supports the subset of the format described in spec §6: header line
//! `%%MatrixMarket matrix {coordinate|array} {pattern|real}
//! {general|symmetric|skew-symmetric|hermitian}`, `%`-comments and blank
//! lines skipped up to the size line, coordinate entries `i j [val]` and
//! array entries in column-major order, both 1-based on disk. Only the
//! sparsity pattern matters for this engine — values, when present, are
//! read and discarded (any stored entry is an edge, weighted or not).

use std::io::BufRead;

use crate::error::LoadError;
use crate::matrix::CscBinaryMatrix;

const OP: &str = "mtx::load";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Coordinate,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
    SkewSymmetric,
    Hermitian,
}

struct Header {
    format: Format,
    symmetry: Symmetry,
}

fn parse_header(line: &str) -> Result<Header, LoadError> {
    let mut tokens = line.split_whitespace();
    let banner = tokens.next().unwrap_or("");
    if banner != "%%MatrixMarket" {
        return Err(LoadError::format(OP, "missing %%MatrixMarket banner"));
    }
    let object = tokens.next().unwrap_or("");
    if !object.eq_ignore_ascii_case("matrix") {
        return Err(LoadError::format(
            OP,
            format!("unsupported Matrix Market object '{object}', expected 'matrix'"),
        ));
    }
    let format = match tokens.next().unwrap_or("").to_ascii_lowercase().as_str() {
        "coordinate" => Format::Coordinate,
        "array" => Format::Array,
        other => {
            return Err(LoadError::format(
                OP,
                format!("unsupported Matrix Market format '{other}'"),
            ))
        }
    };
    let field = tokens.next().unwrap_or("").to_ascii_lowercase();
    if field != "pattern" && field != "real" && field != "integer" && field != "double" {
        return Err(LoadError::format(
            OP,
            format!("unsupported Matrix Market field '{field}'"),
        ));
    }
    let symmetry = match tokens.next().unwrap_or("").to_ascii_lowercase().as_str() {
        "general" => Symmetry::General,
        "symmetric" => Symmetry::Symmetric,
        "skew-symmetric" => Symmetry::SkewSymmetric,
        "hermitian" => Symmetry::Hermitian,
        other => {
            return Err(LoadError::format(
                OP,
                format!("unsupported Matrix Market symmetry '{other}'"),
            ))
        }
    };
    Ok(Header { format, symmetry })
}

fn next_significant_line<'a>(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    buf: &'a mut String,
) -> Result<Option<&'a str>, LoadError> {
    loop {
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.map_err(|source| LoadError::Io { op: OP, source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        *buf = trimmed.to_string();
        return Ok(Some(buf.as_str()));
    }
}

/// Loads a CSC binary matrix from a Matrix Market stream.
pub fn load(reader: impl BufRead) -> Result<CscBinaryMatrix, LoadError> {
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| LoadError::format(OP, "empty file"))?
        .map_err(|source| LoadError::Io { op: OP, source })?;
    let header = parse_header(header_line.trim())?;

    let mut buf = String::new();
    let size_line = next_significant_line(&mut lines, &mut buf)?
        .ok_or_else(|| LoadError::format(OP, "missing size line"))?;

    let mut edges: Vec<(u32, u32)> = Vec::new();
    let nrows;
    let ncols;

    match header.format {
        Format::Coordinate => {
            let mut parts = size_line.split_whitespace();
            let r: usize = parse_dim(parts.next(), "nrows")?;
            let c: usize = parse_dim(parts.next(), "ncols")?;
            let nnz: usize = parse_dim(parts.next(), "nnz")?;
            nrows = r;
            ncols = c;
            edges.reserve(nnz * if header.symmetry == Symmetry::General { 1 } else { 2 });

            for _ in 0..nnz {
                let mut line_buf = String::new();
                let line = next_significant_line(&mut lines, &mut line_buf)?
                    .ok_or_else(|| LoadError::format(OP, "unexpected end of entries"))?;
                let mut tokens = line.split_whitespace();
                let i: usize = parse_dim(tokens.next(), "row index")?;
                let j: usize = parse_dim(tokens.next(), "col index")?;
                if i == 0 || j == 0 {
                    return Err(LoadError::format(
                        OP,
                        "Matrix Market indices are 1-based, got 0",
                    ));
                }
                let (row, col) = (i - 1, j - 1);
                push_entry(&mut edges, row, col, header.symmetry);
            }
        }
        Format::Array => {
            let mut parts = size_line.split_whitespace();
            let r: usize = parse_dim(parts.next(), "nrows")?;
            let c: usize = parse_dim(parts.next(), "ncols")?;
            nrows = r;
            ncols = c;

            let total = nrows.checked_mul(ncols).ok_or_else(|| {
                LoadError::format(OP, "array dimensions overflow")
            })?;
            let mut seen = 0usize;
            'outer: for col in 0..ncols {
                for row in 0..nrows {
                    if seen >= total {
                        break 'outer;
                    }
                    let mut line_buf = String::new();
                    let line = next_significant_line(&mut lines, &mut line_buf)?
                        .ok_or_else(|| LoadError::format(OP, "unexpected end of entries"))?;
                    seen += 1;
                    let value: f64 = line
                        .split_whitespace()
                        .next()
                        .unwrap_or("")
                        .parse()
                        .map_err(|_| LoadError::format(OP, format!("bad array value '{line}'")))?;
                    if value != 0.0 {
                        push_entry(&mut edges, row, col, header.symmetry);
                    }
                }
            }
        }
    }

    if nrows != ncols {
        return Err(LoadError::shape(
            OP,
            format!("matrix must be square, got {nrows}x{ncols}"),
        ));
    }

    build_csc(nrows, ncols, edges, OP)
}

fn push_entry(edges: &mut Vec<(u32, u32)>, row: usize, col: usize, symmetry: Symmetry) {
    edges.push((row as u32, col as u32));
    if symmetry != Symmetry::General && row != col {
        edges.push((col as u32, row as u32));
    }
}

fn parse_dim(token: Option<&str>, what: &str) -> Result<usize, LoadError> {
    token
        .ok_or_else(|| LoadError::format(OP, format!("missing {what}")))?
        .parse()
        .map_err(|_| LoadError::format(OP, format!("bad {what}")))
}

/// Builds a [`CscBinaryMatrix`] from an unordered `(row, col)` edge list.
pub(crate) fn build_csc(
    nrows: usize,
    ncols: usize,
    mut edges: Vec<(u32, u32)>,
    op: &'static str,
) -> Result<CscBinaryMatrix, LoadError> {
    edges.sort_unstable_by_key(|&(_, c)| c);

    let mut col_ptr = vec![0u32; ncols + 1];
    for &(_, c) in &edges {
        col_ptr[c as usize + 1] += 1;
    }
    for c in 0..ncols {
        col_ptr[c + 1] += col_ptr[c];
    }
    let row_idx: Vec<u32> = edges.into_iter().map(|(r, _)| r).collect();

    CscBinaryMatrix::from_parts(nrows, ncols, row_idx, col_ptr, op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load_str(s: &str) -> Result<CscBinaryMatrix, LoadError> {
        load(Cursor::new(s.as_bytes()))
    }

    #[test]
    fn s1_no_edges() {
        let m = load_str("%%MatrixMarket matrix coordinate pattern general\n5 5 0\n").unwrap();
        assert_eq!(m.nrows(), 5);
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn s2_triangle_plus_isolated_symmetric_duplicates() {
        let m = load_str(
            "%%MatrixMarket matrix coordinate pattern general\n\
             4 4 6\n\
             1 2\n2 1\n2 3\n3 2\n3 1\n1 3\n",
        )
        .unwrap();
        assert_eq!(m.nrows(), 4);
        assert_eq!(m.nnz(), 6);
    }

    #[test]
    fn s4_self_loops_only() {
        let m = load_str(
            "%%MatrixMarket matrix coordinate pattern general\n3 3 3\n1 1\n2 2\n3 3\n",
        )
        .unwrap();
        assert_eq!(m.nnz(), 3);
        for c in 0..3 {
            assert_eq!(m.column(c), &[c as u32]);
        }
    }

    #[test]
    fn symmetric_materializes_both_sides_but_not_diagonal_twice() {
        let m = load_str(
            "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 2\n2 1\n3 3\n",
        )
        .unwrap();
        // (2,1) -> materializes (1,0) and (0,1) in 0-based row/col.
        // (3,3) diagonal -> materializes once only.
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn rejects_non_square() {
        let err = load_str("%%MatrixMarket matrix coordinate pattern general\n2 3 0\n");
        assert!(matches!(err, Err(LoadError::Shape { .. })));
    }

    #[test]
    fn rejects_zero_based_index() {
        let err =
            load_str("%%MatrixMarket matrix coordinate pattern general\n2 2 1\n0 1\n");
        assert!(matches!(err, Err(LoadError::Format { .. })));
    }

    #[test]
    fn array_format_drops_zeros() {
        // column-major 2x2: col0 = [1, 0], col1 = [0, 1]
        let m = load_str(
            "%%MatrixMarket matrix array real general\n2 2\n1\n0\n0\n1\n",
        )
        .unwrap();
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.column(0), &[0]);
        assert_eq!(m.column(1), &[1]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let m = load_str(
            "%%MatrixMarket matrix coordinate pattern general\n\
             % a comment\n\
             \n\
             3 3 1\n\
             % another comment\n\
             1 2\n",
        )
        .unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.nnz(), 1);
    }
}
