//! Combinatorial helpers for simplices given as vertex-index tuples.
//!
//! Vertex order inside a tuple carries no orientation here; two simplices are
//! the same iff their sorted index tuples match.

/// Returns the edges of a simplex as `[smaller, larger]` index pairs.
///
/// A triangle `[1, 2, 6]` yields `[[1, 2], [1, 6], [2, 6]]`.
#[must_use]
pub fn simplex_edges(simplex: &[usize]) -> Vec<[usize; 2]> {
    let n = simplex.len();
    let mut edges = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (simplex[i], simplex[j]);
            edges.push(if a <= b { [a, b] } else { [b, a] });
        }
    }
    edges
}

/// Reduces an n-simplex to its `n + 1` component (n-1)-simplices by dropping
/// each vertex in turn.
///
/// A tetrahedron (4 indices) yields its 4 triangles.
#[must_use]
pub fn simplex_faces(simplex: &[usize]) -> Vec<Vec<usize>> {
    (0..simplex.len())
        .map(|skip| {
            simplex
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &v)| v)
                .collect()
        })
        .collect()
}

/// Canonical deduplication key: the sorted copy of the index tuple.
#[must_use]
pub fn canonical_key(simplex: &[usize]) -> Vec<usize> {
    let mut key = simplex.to_vec();
    key.sort_unstable();
    key
}

/// Removes duplicate simplices, where all permutations of a tuple count as
/// the same simplex.
///
/// The output is ordered by canonical key; among permutations of the same
/// simplex the one appearing first in the input survives.
#[must_use]
pub fn dedup_simplices(mut simplices: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    simplices.sort_by_cached_key(|s| canonical_key(s));
    simplices.dedup_by_key(|s| canonical_key(s));
    simplices
}
