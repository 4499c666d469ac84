// apc.rs - Average product correction

use crate::data::CouplingMatrix;

/// Remove shared background signal from a raw coupling matrix.
///
/// Corrected(i,j) = Raw(i,j) - mean_i * mean_j / grand_mean, with row and
/// grand means taken over off-diagonal entries. Phylogenetic and
/// alignment-depth background inflates every pair involving a noisy
/// column; the product term estimates that background per pair.
///
/// A zero grand mean (already handled upstream by the degenerate
/// shortcut) yields an all-zero matrix rather than a division error.
pub fn apply_apc_correction(raw: &CouplingMatrix) -> CouplingMatrix {
    let side = raw.side();
    let mut corrected = CouplingMatrix::zeros(side);
    if side < 2 {
        return corrected;
    }

    let grand_mean = raw.grand_mean_off_diagonal();
    if grand_mean == 0.0 {
        return corrected;
    }

    let row_means: Vec<f64> = (0..side).map(|i| raw.row_mean_off_diagonal(i)).collect();
    for i in 0..side {
        for j in (i + 1)..side {
            let background = row_means[i] * row_means[j] / grand_mean;
            corrected.set_symmetric(i, j, raw.get(i, j) - background);
        }
    }

    corrected
}
