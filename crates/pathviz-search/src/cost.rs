use std::f64::consts::SQRT_2;

use pathviz_core::Cell;

/// Cost of moving between two adjacent cells: `√2` for a diagonal move,
/// `1` otherwise.
///
/// Only meaningful for grid-adjacent cells.
#[inline]
pub fn step_cost(a: Cell, b: Cell) -> f64 {
    debug_assert!(a.is_adjacent(b), "step_cost on non-adjacent cells {a} -> {b}");
    if a.is_diagonal_to(b) { SQRT_2 } else { 1.0 }
}

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> f64 {
    ((a.row - b.row).abs() + (a.col - b.col).abs()) as f64
}

/// Octile distance: the exact cost between two cells on an open 8-way grid
/// where straight steps cost 1 and diagonal steps cost `√2`.
#[inline]
pub fn octile(a: Cell, b: Cell) -> f64 {
    let dr = (a.row - b.row).abs() as f64;
    let dc = (a.col - b.col).abs() as f64;
    (dr + dc) + (SQRT_2 - 2.0) * dr.min(dc)
}

/// Admissible, consistent estimate of the remaining cost from `a` to `goal`.
#[inline]
pub fn heuristic(a: Cell, goal: Cell, diagonal: bool) -> f64 {
    if diagonal { octile(a, goal) } else { manhattan(a, goal) }
}
