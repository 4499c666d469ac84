// pairs.rs - Ranked coupling pair selection

use crate::data::{CouplingMatrix, RankedPair};

/// Pairs closer than this carry mostly backbone signal, not structure.
pub const DEFAULT_MIN_SEPARATION: usize = 4;

/// Bound on the returned candidate list.
pub const DEFAULT_TOP_PAIR_COUNT: usize = 100;

/// Rank column pairs by descending coupling score.
///
/// Only pairs with i < j and |i - j| >= `min_separation` are considered;
/// ties break on column indices so the ordering is deterministic. The
/// list is truncated to `max_pairs`.
pub fn select_top_pairs(
    matrix: &CouplingMatrix,
    min_separation: usize,
    max_pairs: usize,
) -> Vec<RankedPair> {
    let side = matrix.side();
    let mut pairs = Vec::new();
    for i in 0..side {
        for j in (i + 1)..side {
            if j - i < min_separation {
                continue;
            }
            pairs.push(RankedPair {
                i,
                j,
                score: matrix.get(i, j),
            });
        }
    }

    pairs.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| (a.i, a.j).cmp(&(b.i, b.j)))
    });
    pairs.truncate(max_pairs);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separation_filter() {
        let mut matrix = CouplingMatrix::zeros(6);
        matrix.set_symmetric(0, 1, 9.0); // separation 1, filtered
        matrix.set_symmetric(0, 5, 1.0);
        matrix.set_symmetric(1, 5, 2.0);

        let pairs = select_top_pairs(&matrix, 4, 10);
        assert!(pairs.iter().all(|p| p.j - p.i >= 4));
        assert!(pairs.iter().all(|p| p.i < p.j));
        assert!(!pairs.iter().any(|p| p.i == 0 && p.j == 1));
    }

    #[test]
    fn test_descending_order() {
        let mut matrix = CouplingMatrix::zeros(10);
        matrix.set_symmetric(0, 5, 0.3);
        matrix.set_symmetric(1, 8, 0.9);
        matrix.set_symmetric(2, 7, 0.6);

        let pairs = select_top_pairs(&matrix, 4, 3);
        assert_eq!((pairs[0].i, pairs[0].j), (1, 8));
        assert_eq!((pairs[1].i, pairs[1].j), (2, 7));
        assert_eq!((pairs[2].i, pairs[2].j), (0, 5));
    }

    #[test]
    fn test_truncation() {
        let matrix = CouplingMatrix::zeros(20);
        let pairs = select_top_pairs(&matrix, 4, 5);
        assert_eq!(pairs.len(), 5);
    }

    #[test]
    fn test_empty_when_all_filtered() {
        let matrix = CouplingMatrix::zeros(4);
        // Longest separation available is 3
        let pairs = select_top_pairs(&matrix, 4, 10);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_deterministic_tiebreak() {
        let matrix = CouplingMatrix::zeros(10);
        let a = select_top_pairs(&matrix, 4, 100);
        let b = select_top_pairs(&matrix, 4, 100);
        assert_eq!(a, b);
        assert_eq!((a[0].i, a[0].j), (0, 4));
    }
}
