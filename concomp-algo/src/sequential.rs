//! Sequential connected-components algorithms.
//!
//! Grounded directly in `original_source/src/algorithms/cc_sequential.c`:
//! label propagation (variant 0) and union-find with path halving
//! (variant 1), both operating on a freshly allocated, per-call `label[]`
//! buffer.

use concomp_core::CscBinaryMatrix;

/// Finds the root of `i` with **path halving**: every step redirects the
/// current node to its grandparent, which approximates full path
/// compression in a single pass.
#[inline]
fn find_root_halving(label: &mut [u32], mut i: u32) -> u32 {
    while label[i as usize] != i {
        label[i as usize] = label[label[i as usize] as usize];
        i = label[i as usize];
    }
    i
}

/// Unites the sets containing `i` and `j`, attaching the larger root to the
/// smaller one. This is a hard contract, not an optimization: other
/// components rely on the canonical root of a component being its minimum
/// node index.
#[inline]
fn union_by_min_root(label: &mut [u32], i: u32, j: u32) {
    let root_i = find_root_halving(label, i);
    let root_j = find_root_halving(label, j);
    if root_i == root_j {
        return;
    }
    if root_i < root_j {
        label[root_j as usize] = root_i;
    } else {
        label[root_i as usize] = root_j;
    }
}

/// Union-find with path halving (spec §4.2, variant 1).
///
/// Initializes each node as its own parent, unions every stored edge, runs
/// a final flattening pass so every `label[i]` equals its root, and counts
/// the roots.
pub fn seq_uf(matrix: &CscBinaryMatrix) -> i64 {
    let n = matrix.nrows();
    if n == 0 {
        return 0;
    }

    let mut label: Vec<u32> = (0..n as u32).collect();

    for col in 0..matrix.ncols() {
        for &row in matrix.column(col) {
            union_by_min_root(&mut label, col as u32, row);
        }
    }

    for i in 0..n as u32 {
        find_root_halving(&mut label, i);
    }

    label
        .iter()
        .enumerate()
        .filter(|&(i, &root)| root as usize == i)
        .count() as i64
}

/// Label propagation (spec §4.2, variant 0).
///
/// Initializes each node with its own index as label, repeatedly sweeps all
/// stored entries propagating the minimum label to both endpoints, and
/// stops when a full sweep makes no change. Counts unique labels by sorting
/// — the specification permits any correct counting method, and a
/// sort-then-scan is the simplest one.
pub fn seq_lp(matrix: &CscBinaryMatrix) -> i64 {
    let n = matrix.nrows();
    if n == 0 {
        return 0;
    }

    let mut label: Vec<u32> = (0..n as u32).collect();

    loop {
        let mut changed = false;
        for col in 0..matrix.ncols() {
            for &row in matrix.column(col) {
                let lc = label[col];
                let lr = label[row as usize];
                if lc != lr {
                    let min = lc.min(lr);
                    label[col] = min;
                    label[row as usize] = min;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    label.sort_unstable();
    label.windows(2).filter(|w| w[0] != w[1]).count() as i64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use concomp_core::mtx;
    use std::io::Cursor;

    fn load(s: &str) -> CscBinaryMatrix {
        mtx::load(Cursor::new(s.as_bytes())).unwrap()
    }

    #[test]
    fn s1_empty_graph_all_singletons() {
        let m = load("%%MatrixMarket matrix coordinate pattern general\n5 5 0\n");
        assert_eq!(seq_uf(&m), 5);
        assert_eq!(seq_lp(&m), 5);
    }

    #[test]
    fn s2_triangle_plus_isolated() {
        let m = load(
            "%%MatrixMarket matrix coordinate pattern general\n\
             4 4 6\n1 2\n2 1\n2 3\n3 2\n3 1\n1 3\n",
        );
        assert_eq!(seq_uf(&m), 2);
        assert_eq!(seq_lp(&m), 2);
    }

    #[test]
    fn s3_general_asymmetric_listing() {
        let m = load(
            "%%MatrixMarket matrix coordinate pattern general\n\
             6 6 4\n1 2\n3 4\n5 6\n2 1\n",
        );
        assert_eq!(seq_uf(&m), 3);
        assert_eq!(seq_lp(&m), 3);
    }

    #[test]
    fn s4_self_loops_only() {
        let m = load("%%MatrixMarket matrix coordinate pattern general\n3 3 3\n1 1\n2 2\n3 3\n");
        assert_eq!(seq_uf(&m), 3);
        assert_eq!(seq_lp(&m), 3);
    }

    #[test]
    fn zero_sized_matrix_has_zero_components() {
        let m = CscBinaryMatrix::from_parts(0, 0, vec![], vec![0], "test").unwrap();
        assert_eq!(seq_uf(&m), 0);
        assert_eq!(seq_lp(&m), 0);
    }

    #[test]
    fn duplicate_edges_do_not_change_count() {
        let m = load(
            "%%MatrixMarket matrix coordinate pattern general\n3 3 4\n1 2\n1 2\n1 2\n2 3\n",
        );
        assert_eq!(seq_uf(&m), 1);
        assert_eq!(seq_lp(&m), 1);
    }

    #[test]
    fn canonical_root_is_minimum_index() {
        let m = load("%%MatrixMarket matrix coordinate pattern general\n4 4 3\n2 3\n3 4\n4 2\n");
        let mut label: Vec<u32> = (0..4).collect();
        for col in 0..m.ncols() {
            for &row in m.column(col) {
                union_by_min_root(&mut label, col as u32, row);
            }
        }
        for i in 0..4u32 {
            find_root_halving(&mut label, i);
        }
        assert!(label.iter().all(|&r| r == 1));
    }
}
