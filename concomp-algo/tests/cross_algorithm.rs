//! Cross-algorithm agreement suite: scenarios S1-S6, each run under all
//! four variants, with S5/S6 additionally run under every thread count in
//! `T ∈ {1, 2, 4, 8, 16}` for the two parallel variants.
//!
//! Grounded in the teacher's `algo/tests/test_sccs.rs` layout (one
//! integration-test file per algorithm family, scenario tables driving
//! parametrized assertions).

use std::io::Cursor;

use concomp_algo::dispatch::{count, Algorithm};
use concomp_core::mtx;
use concomp_core::CscBinaryMatrix;

const THREAD_COUNTS: [usize; 5] = [1, 2, 4, 8, 16];

fn load(s: &str) -> CscBinaryMatrix {
    mtx::load(Cursor::new(s.as_bytes())).unwrap()
}

fn assert_all_variants(matrix: &CscBinaryMatrix, expected: i64) {
    for algorithm in Algorithm::ALL {
        let n_threads = if algorithm.is_parallel() { 4 } else { 1 };
        assert_eq!(
            count(matrix, algorithm, n_threads),
            expected,
            "{} disagreed",
            algorithm.name()
        );
    }
}

fn assert_all_thread_counts(matrix: &CscBinaryMatrix, expected: i64) {
    for algorithm in [Algorithm::ParLp, Algorithm::ParUf] {
        for n_threads in THREAD_COUNTS {
            assert_eq!(
                count(matrix, algorithm, n_threads),
                expected,
                "{} at T={n_threads} disagreed",
                algorithm.name()
            );
        }
    }
}

#[test]
fn s1_no_edges() {
    let m = load("%%MatrixMarket matrix coordinate pattern general\n5 5 0\n");
    assert_all_variants(&m, 5);
}

#[test]
fn s2_triangle_plus_isolated() {
    let m = load(
        "%%MatrixMarket matrix coordinate pattern general\n\
         4 4 3\n1 2\n2 3\n3 1\n",
    );
    assert_all_variants(&m, 2);
}

#[test]
fn s3_general_asymmetric_listing() {
    let m = load(
        "%%MatrixMarket matrix coordinate pattern general\n\
         6 6 4\n1 2\n3 4\n5 6\n2 1\n",
    );
    assert_all_variants(&m, 3);
}

#[test]
fn s4_self_loops_only() {
    let m = load("%%MatrixMarket matrix coordinate pattern general\n3 3 3\n1 1\n2 2\n3 3\n");
    assert_all_variants(&m, 3);
}

/// Two disjoint paths of length 500 in a 1000x1000 matrix.
fn two_disjoint_paths(path_len: usize) -> CscBinaryMatrix {
    let n = path_len * 2;
    let mut edges: Vec<(u32, u32)> = Vec::new();
    for start in [0usize, path_len] {
        for i in 0..(path_len - 1) {
            let (a, b) = (start + i, start + i + 1);
            edges.push((a as u32, b as u32));
            edges.push((b as u32, a as u32));
        }
    }
    csc_from_edges(n, edges)
}

/// A complete graph on `n` nodes (all off-diagonal entries present,
/// symmetric).
fn complete_graph(n: usize) -> CscBinaryMatrix {
    let mut edges: Vec<(u32, u32)> = Vec::with_capacity(n * (n - 1));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                edges.push((i as u32, j as u32));
            }
        }
    }
    csc_from_edges(n, edges)
}

fn csc_from_edges(n: usize, mut edges: Vec<(u32, u32)>) -> CscBinaryMatrix {
    edges.sort_unstable_by_key(|&(_, c)| c);
    let mut col_ptr = vec![0u32; n + 1];
    for &(_, c) in &edges {
        col_ptr[c as usize + 1] += 1;
    }
    for c in 0..n {
        col_ptr[c + 1] += col_ptr[c];
    }
    let row_idx: Vec<u32> = edges.into_iter().map(|(r, _)| r).collect();
    CscBinaryMatrix::from_parts(n, n, row_idx, col_ptr, "test::csc_from_edges").unwrap()
}

#[test]
fn s5_two_disjoint_paths() {
    let m = two_disjoint_paths(500);
    assert_eq!(m.nrows(), 1000);
    assert_all_variants(&m, 2);
    assert_all_thread_counts(&m, 2);
}

#[test]
fn s6_complete_graph() {
    let m = complete_graph(1000);
    assert_eq!(m.nrows(), 1000);
    assert_all_variants(&m, 1);
    assert_all_thread_counts(&m, 1);
}
