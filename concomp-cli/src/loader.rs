//! Input-format auto-detection (spec §6).
//!
//! Sniffs the first non-blank, non-comment line for the `%%MatrixMarket`
//! banner; anything else is handed to the JSON container loader. Grounded
//! in `cli/src/sccs.rs`'s own format-sniffing call (`get_endianness`) ahead
//! of dispatching to a format-specific loader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use concomp_core::CscBinaryMatrix;

fn looks_like_matrix_market(path: &Path) -> Result<bool> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        return Ok(trimmed.starts_with("%%MatrixMarket"));
    }
    Ok(false)
}

/// Loads `path` as a Matrix Market file or a JSON MATLAB-style container,
/// chosen by sniffing the file's first significant line.
///
/// The JSON container loader is a single-field convention here: the CLI
/// has no `--field` flag (the spec's concrete CLI surface names none), so
/// a container is only loadable when it holds exactly one named field.
pub fn load(path: &Path) -> Result<CscBinaryMatrix> {
    if looks_like_matrix_market(path)? {
        log::debug!("{}: detected Matrix Market format", path.display());
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        concomp_core::mtx::load(BufReader::new(file))
            .with_context(|| format!("loading Matrix Market matrix from {}", path.display()))
    } else {
        log::debug!("{}: assuming JSON container format", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let probe: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing {} as JSON container", path.display()))?;
        let object = probe
            .as_object()
            .with_context(|| format!("{}: container must be a JSON object", path.display()))?;
        let mut keys = object.keys();
        let field_name = match (keys.next(), keys.next()) {
            (Some(key), None) => key.clone(),
            (None, _) => bail!("{}: container has no fields", path.display()),
            _ => bail!(
                "{}: container has multiple fields, the CLI cannot choose one",
                path.display()
            ),
        };
        concomp_core::container::load(text.as_bytes(), "Problem", &field_name)
            .with_context(|| format!("loading container field '{field_name}' from {}", path.display()))
    }
}
