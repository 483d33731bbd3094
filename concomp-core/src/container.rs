//! The "MATLAB-style container" loader.
//!
//! Per spec §1's non-goal ("Any specific on-disk file container... a thin
//! loader is specified only to the extent needed for round-trip testing"),
//! this does not parse real MAT5 binary — no crate in the retrieved corpus
//! reads that format. Instead it reads a small JSON document shaped like the
//! `Problem.<field>` struct the original C loader (`original_source/io.c`)
//! pulls out of a `.mat` file: a named outer object holding a named sparse
//! field with `ir` (row indices, 0-based once decoded here) and `jc`
//! (column offsets) arrays, `nrows`/`ncols` giving its shape. The validation
//! logic — 2-D, square, `jc` length `ncols+1`, `ir` length `nnz` — mirrors
//! `csc_load_matrix` exactly; only the wire format changes.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::LoadError;
use crate::matrix::CscBinaryMatrix;

const OP: &str = "container::load";

#[derive(Deserialize)]
struct SparseField {
    nrows: usize,
    ncols: usize,
    ir: Vec<u32>,
    jc: Vec<u32>,
}

#[derive(Deserialize)]
struct Container {
    #[serde(flatten)]
    fields: HashMap<String, SparseField>,
}

/// Loads a CSC binary matrix from a MATLAB-container-shaped JSON document.
///
/// `matrix_name` is accepted for interface parity with the original
/// `csc_load_matrix(filename, matrix_name, field_name)` signature; this
/// loader's documents contain a single top-level struct, so `matrix_name`
/// is not itself looked up — only `field_name` selects among its fields.
pub fn load(
    mut reader: impl Read,
    _matrix_name: &str,
    field_name: &str,
) -> Result<CscBinaryMatrix, LoadError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| LoadError::Io { op: OP, source })?;

    let container: Container = serde_json::from_str(&text)
        .map_err(|e| LoadError::format(OP, format!("invalid container JSON: {e}")))?;

    let field = container.fields.get(field_name).ok_or_else(|| {
        LoadError::format(OP, format!("field '{field_name}' not found in container"))
    })?;

    // Mirrors the original loader's shape check, but with the intended
    // disjunction rather than the conjunction bug it shipped with: reject
    // when the field is not 2-D OR it is not square.
    if field.nrows != field.ncols {
        return Err(LoadError::shape(
            OP,
            format!(
                "field '{field_name}' must be square, got {}x{}",
                field.nrows, field.ncols
            ),
        ));
    }

    if field.jc.len() != field.ncols + 1 {
        return Err(LoadError::shape(
            OP,
            format!(
                "jc must have ncols+1 = {} entries, got {}",
                field.ncols + 1,
                field.jc.len()
            ),
        ));
    }

    CscBinaryMatrix::from_parts(
        field.nrows,
        field.ncols,
        field.ir.clone(),
        field.jc.clone(),
        OP,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_valid_container() {
        let json = r#"{"A": {"nrows": 3, "ncols": 3, "ir": [1, 0, 2], "jc": [0, 1, 2, 3]}}"#;
        let m = load(Cursor::new(json.as_bytes()), "Problem", "A").unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn rejects_missing_field() {
        let json = r#"{"A": {"nrows": 1, "ncols": 1, "ir": [], "jc": [0]}}"#;
        let err = load(Cursor::new(json.as_bytes()), "Problem", "B");
        assert!(matches!(err, Err(LoadError::Format { .. })));
    }

    #[test]
    fn rejects_non_square_field() {
        let json = r#"{"A": {"nrows": 2, "ncols": 3, "ir": [], "jc": [0, 0, 0, 0]}}"#;
        let err = load(Cursor::new(json.as_bytes()), "Problem", "A");
        assert!(matches!(err, Err(LoadError::Shape { .. })));
    }

    #[test]
    fn rejects_bad_jc_length() {
        let json = r#"{"A": {"nrows": 2, "ncols": 2, "ir": [], "jc": [0, 0]}}"#;
        let err = load(Cursor::new(json.as_bytes()), "Problem", "A");
        assert!(matches!(err, Err(LoadError::Shape { .. })));
    }
}
