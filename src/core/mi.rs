// mi.rs - Pairwise mutual information engine

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::core::apc::apply_apc_correction;
use crate::core::frequencies::MsaEncoding;
use crate::core::pairs::{select_top_pairs, DEFAULT_MIN_SEPARATION, DEFAULT_TOP_PAIR_COUNT};
use crate::core::pseudocount::resolve_pseudocount;
use crate::core::weights::resolve_weights;
use crate::data::{
    ChunkParams, CouplingAlias, CouplingMatrix, MiError, MiFeatures, MiParams, Msa, WeightMode,
};

/// Method label of the legacy raw-MI path.
pub const METHOD_BASIC: &str = "mutual_information";

/// Method label of the canonical APC-correcting path.
pub const METHOD_ENHANCED: &str = "mutual_information_enhanced";

/// Caller-tunable knobs for one engine invocation.
#[derive(Debug, Clone)]
pub struct MiOptions {
    /// Smoothing constant; None selects adaptively from alignment depth
    pub pseudocount: Option<f64>,
    /// Per-sequence weights; None means uniform 1/N
    pub weights: Option<Vec<f64>>,
    /// Minimum |i - j| for ranked pairs
    pub min_separation: usize,
    /// Bound on the ranked pair list
    pub top_pair_count: usize,
    /// Diagnostic reporting only, no effect on results
    pub verbose: bool,
}

impl Default for MiOptions {
    fn default() -> Self {
        Self {
            pseudocount: None,
            weights: None,
            min_separation: DEFAULT_MIN_SEPARATION,
            top_pair_count: DEFAULT_TOP_PAIR_COUNT,
            verbose: false,
        }
    }
}

/// Resolved inputs shared by the full and window-restricted sweeps.
pub(crate) struct PairContext {
    pub encoding: MsaEncoding,
    pub weights: Vec<f64>,
    pub marginals: Vec<Vec<f64>>,
    pub pseudocount: f64,
}

impl PairContext {
    pub fn new(msa: &Msa, weights: Vec<f64>, pseudocount: f64) -> Self {
        let encoding = MsaEncoding::encode(msa);
        let marginals = (0..encoding.length())
            .map(|column| encoding.column_frequencies(column, &weights, pseudocount))
            .collect();
        Self {
            encoding,
            weights,
            marginals,
            pseudocount,
        }
    }
}

/// Mutual information in bits between columns i and j.
///
/// The joint table is weighted counts plus the pseudocount in every
/// symbol-pair cell, normalized to 1; marginals are the per-column
/// smoothed tables. Terms with zero joint probability contribute zero.
/// The sum is clamped at 0 against floating-point round-off.
fn pair_mutual_information(ctx: &PairContext, i: usize, j: usize) -> f64 {
    let k = ctx.encoding.alphabet_size();
    let mut joint = vec![ctx.pseudocount; k * k];
    for (row, weight) in ctx.encoding.rows().iter().zip(&ctx.weights) {
        joint[row[i] as usize * k + row[j] as usize] += *weight;
    }
    let total: f64 = ctx.weights.iter().sum::<f64>() + ctx.pseudocount * (k * k) as f64;

    let pi = &ctx.marginals[i];
    let pj = &ctx.marginals[j];
    let mut mi = 0.0;
    for a in 0..k {
        for b in 0..k {
            let p = joint[a * k + b] / total;
            if p > 0.0 {
                let expected = pi[a] * pj[b];
                if expected > 0.0 {
                    mi += p * (p / expected).log2();
                }
            }
        }
    }

    mi.max(0.0)
}

/// Compute scores for all pairs (i, j) with i in `rows`, j in `cols`,
/// i < j. Pairs are independent, so the sweep parallelizes freely
/// without affecting results.
pub(crate) fn compute_mi_block(
    ctx: &PairContext,
    rows: Range<usize>,
    cols: Range<usize>,
) -> Vec<(usize, usize, f64)> {
    let pairs: Vec<(usize, usize)> = rows
        .flat_map(|i| cols.clone().filter(move |j| *j > i).map(move |j| (i, j)))
        .collect();

    pairs
        .into_par_iter()
        .map(|(i, j)| (i, j, pair_mutual_information(ctx, i, j)))
        .collect()
}

/// Full upper-triangle sweep with symmetric fill.
pub(crate) fn compute_mi_matrix(ctx: &PairContext, verbose: bool) -> CouplingMatrix {
    let length = ctx.encoding.length();
    let mut matrix = CouplingMatrix::zeros(length);
    let total_pairs = length * length.saturating_sub(1) / 2;

    let scores = if verbose {
        println!(
            "🔄 Computing MI matrix ({} x {} = {} column pairs)...",
            length, length, total_pairs
        );
        let pb = ProgressBar::new(total_pairs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
                .unwrap()
                .progress_chars("#>-"),
        );

        // Update every 1% to reduce contention
        let update_interval = std::cmp::max(1, total_pairs / 100);
        let counter = Arc::new(AtomicUsize::new(0));

        let pairs: Vec<(usize, usize)> = (0..length)
            .flat_map(|i| ((i + 1)..length).map(move |j| (i, j)))
            .collect();
        let scores: Vec<(usize, usize, f64)> = pairs
            .into_par_iter()
            .map(|(i, j)| {
                let value = pair_mutual_information(ctx, i, j);
                let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                if done % update_interval == 0 {
                    pb.set_position(done as u64);
                }
                (i, j, value)
            })
            .collect();

        pb.finish_with_message("✅ MI matrix computation completed!");
        scores
    } else {
        compute_mi_block(ctx, 0..length, 0..length)
    };

    for (i, j, value) in scores {
        matrix.set_symmetric(i, j, value);
    }
    matrix
}

/// Validate and resolve per-run parameters before any computation.
pub(crate) fn resolve_run(
    msa: &Msa,
    options: &MiOptions,
) -> Result<(Vec<f64>, WeightMode, f64), MiError> {
    let (weights, weight_mode) = resolve_weights(msa.depth(), options.weights.as_deref())?;
    let pseudocount = resolve_pseudocount(options.pseudocount, msa.depth());
    Ok((weights, weight_mode, pseudocount))
}

/// All-zero result for alignments with no covariation signal.
///
/// No pair sweep, no chunk bookkeeping; costs one zero allocation even
/// for thousands of columns.
pub(crate) fn degenerate_features(
    length: usize,
    method: &str,
    alias: CouplingAlias,
    pseudocount: f64,
    weight_mode: WeightMode,
) -> MiFeatures {
    let mi_matrix = CouplingMatrix::zeros(length);
    let apc_matrix = match alias {
        CouplingAlias::ApcCorrected => Some(mi_matrix.clone()),
        CouplingAlias::RawMi => None,
    };
    MiFeatures {
        mi_matrix,
        apc_matrix,
        alias,
        method: method.to_string(),
        top_pairs: Vec::new(),
        params: MiParams {
            pseudocount,
            weights: weight_mode,
            single_sequence: true,
            chunking: None,
        },
    }
}

/// APC-correct an assembled raw matrix and package the canonical result.
pub(crate) fn assemble_enhanced(
    mi_matrix: CouplingMatrix,
    pseudocount: f64,
    weight_mode: WeightMode,
    options: &MiOptions,
    chunking: Option<ChunkParams>,
) -> MiFeatures {
    let apc_matrix = apply_apc_correction(&mi_matrix);
    let top_pairs = select_top_pairs(&apc_matrix, options.min_separation, options.top_pair_count);
    MiFeatures {
        mi_matrix,
        apc_matrix: Some(apc_matrix),
        alias: CouplingAlias::ApcCorrected,
        method: METHOD_ENHANCED.to_string(),
        top_pairs,
        params: MiParams {
            pseudocount,
            weights: weight_mode,
            single_sequence: false,
            chunking,
        },
    }
}

/// Legacy raw-MI path: no correction, `scores`/`coupling_matrix` alias
/// the raw matrix.
pub fn calculate_mutual_information(
    msa: &Msa,
    options: &MiOptions,
) -> Result<MiFeatures, MiError> {
    let (weights, weight_mode, pseudocount) = resolve_run(msa, options)?;

    if msa.is_degenerate() {
        if options.verbose {
            println!(
                "⚡ Degenerate alignment ({} distinct sequence), returning zero couplings",
                msa.distinct_count()
            );
        }
        return Ok(degenerate_features(
            msa.length(),
            METHOD_BASIC,
            CouplingAlias::RawMi,
            pseudocount,
            weight_mode,
        ));
    }

    if options.verbose {
        println!(
            "🧬 Mutual information: {} sequences x {} columns (pseudocount {})",
            msa.depth(),
            msa.length(),
            pseudocount
        );
    }

    let ctx = PairContext::new(msa, weights, pseudocount);
    let mi_matrix = compute_mi_matrix(&ctx, options.verbose);
    let top_pairs = select_top_pairs(&mi_matrix, options.min_separation, options.top_pair_count);

    Ok(MiFeatures {
        mi_matrix,
        apc_matrix: None,
        alias: CouplingAlias::RawMi,
        method: METHOD_BASIC.to_string(),
        top_pairs,
        params: MiParams {
            pseudocount,
            weights: weight_mode,
            single_sequence: false,
            chunking: None,
        },
    })
}

/// Canonical path: raw MI plus APC correction; `scores` /
/// `coupling_matrix` alias the corrected matrix.
pub fn calculate_mutual_information_enhanced(
    msa: &Msa,
    options: &MiOptions,
) -> Result<MiFeatures, MiError> {
    let (weights, weight_mode, pseudocount) = resolve_run(msa, options)?;

    if msa.is_degenerate() {
        if options.verbose {
            println!(
                "⚡ Degenerate alignment ({} distinct sequence), returning zero couplings",
                msa.distinct_count()
            );
        }
        return Ok(degenerate_features(
            msa.length(),
            METHOD_ENHANCED,
            CouplingAlias::ApcCorrected,
            pseudocount,
            weight_mode,
        ));
    }

    if options.verbose {
        println!(
            "🧬 Enhanced mutual information: {} sequences x {} columns (pseudocount {})",
            msa.depth(),
            msa.length(),
            pseudocount
        );
    }

    let ctx = PairContext::new(msa, weights, pseudocount);
    let mi_matrix = compute_mi_matrix(&ctx, options.verbose);
    Ok(assemble_enhanced(
        mi_matrix,
        pseudocount,
        weight_mode,
        options,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_msa() -> Msa {
        Msa::from_strs(&[
            "ACGUCGAUCGAUCGA",
            "ACGUCGAUCGAUCCA",
            "ACGUCGAUCGAUCAA",
        ])
        .unwrap()
    }

    fn small_msa() -> Msa {
        Msa::from_strs(&["ACGUACGU", "ACGCACGU", "ACGAACGU", "ACGCACGU"]).unwrap()
    }

    #[test]
    fn test_single_sequence_shortcut_basic() {
        let msa = Msa::from_strs(&["ACGUCGAUCGAUCGA"]).unwrap();
        let result = calculate_mutual_information(&msa, &MiOptions::default()).unwrap();

        assert_eq!(result.scores().total(), 0.0);
        assert_eq!(result.coupling_matrix().total(), 0.0);
        assert_eq!(result.method, METHOD_BASIC);
        assert!(result.top_pairs.is_empty());
        assert!(result.params.single_sequence);
        assert!(result.params.chunking.is_none());
    }

    #[test]
    fn test_identical_sequences_shortcut() {
        let msa =
            Msa::from_strs(&["ACGUCGAUCGAUCGA", "ACGUCGAUCGAUCGA", "ACGUCGAUCGAUCGA"]).unwrap();
        let result = calculate_mutual_information(&msa, &MiOptions::default()).unwrap();

        assert!(result.params.single_sequence);
        assert_eq!(result.scores().total(), 0.0);
    }

    #[test]
    fn test_single_sequence_shortcut_enhanced() {
        let msa = Msa::from_strs(&["ACGUCGAUCGAUCGA"]).unwrap();
        let result = calculate_mutual_information_enhanced(&msa, &MiOptions::default()).unwrap();

        assert_eq!(result.mi_matrix.total(), 0.0);
        assert_eq!(result.apc_matrix.as_ref().unwrap().total(), 0.0);
        assert_eq!(result.scores().total(), 0.0);
        assert_eq!(result.method, METHOD_ENHANCED);
        assert!(result.top_pairs.is_empty());
        assert!(result.params.single_sequence);
    }

    #[test]
    fn test_long_single_sequence_is_fast() {
        let msa = Msa::from_sequences(vec!["A".repeat(3000)]).unwrap();

        let start = std::time::Instant::now();
        let result = calculate_mutual_information(&msa, &MiOptions::default()).unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed.as_secs_f64() < 0.5, "shortcut took {:?}", elapsed);
        assert_eq!(result.shape(), 3000);
        assert_eq!(result.scores().total(), 0.0);
    }

    #[test]
    fn test_normal_msa_has_signal() {
        let msa = normal_msa();
        let basic = calculate_mutual_information(&msa, &MiOptions::default()).unwrap();
        let enhanced = calculate_mutual_information_enhanced(&msa, &MiOptions::default()).unwrap();

        assert!(!basic.params.single_sequence);
        assert!(!enhanced.params.single_sequence);
        assert!(basic.scores().total() > 0.0);
        assert!(enhanced.mi_matrix.total() > 0.0);
    }

    #[test]
    fn test_raw_matrix_nonnegative_and_symmetric() {
        let msa = small_msa();
        let result = calculate_mutual_information_enhanced(&msa, &MiOptions::default()).unwrap();

        assert!(result.mi_matrix.is_symmetric());
        assert!(result.mi_matrix.as_slice().iter().all(|v| *v >= 0.0));
        for i in 0..result.shape() {
            assert_eq!(result.mi_matrix.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_pseudocount_sensitivity() {
        let msa = small_msa();
        let without = calculate_mutual_information(
            &msa,
            &MiOptions {
                pseudocount: Some(0.0),
                ..Default::default()
            },
        )
        .unwrap();
        let with = calculate_mutual_information(
            &msa,
            &MiOptions {
                pseudocount: Some(0.5),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(without.params.pseudocount, 0.0);
        assert_eq!(with.params.pseudocount, 0.5);
        assert_ne!(
            without.coupling_matrix().as_slice(),
            with.coupling_matrix().as_slice()
        );
    }

    #[test]
    fn test_adaptive_pseudocount_recorded() {
        let msa = small_msa();
        let basic = calculate_mutual_information(&msa, &MiOptions::default()).unwrap();
        let enhanced = calculate_mutual_information_enhanced(&msa, &MiOptions::default()).unwrap();

        // 4 sequences -> adaptive 0.5, identical on both paths
        assert_eq!(basic.params.pseudocount, 0.5);
        assert_eq!(enhanced.params.pseudocount, 0.5);
    }

    #[test]
    fn test_alias_semantics_differ_between_paths() {
        let msa = normal_msa();
        let basic = calculate_mutual_information(&msa, &MiOptions::default()).unwrap();
        let enhanced = calculate_mutual_information_enhanced(&msa, &MiOptions::default()).unwrap();

        assert_eq!(basic.alias, CouplingAlias::RawMi);
        assert_eq!(basic.scores().as_slice(), basic.mi_matrix.as_slice());
        assert!(basic.apc_matrix.is_none());

        assert_eq!(enhanced.alias, CouplingAlias::ApcCorrected);
        let apc = enhanced.apc_matrix.as_ref().unwrap();
        assert_eq!(enhanced.scores().as_slice(), apc.as_slice());
        assert_ne!(apc.as_slice(), enhanced.mi_matrix.as_slice());
    }

    #[test]
    fn test_explicit_weights_accepted() {
        let msa = small_msa();
        let weights = vec![0.25; 4];
        let result = calculate_mutual_information_enhanced(
            &msa,
            &MiOptions {
                weights: Some(weights.clone()),
                pseudocount: Some(0.5),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(result.params.pseudocount, 0.5);
        assert_eq!(result.params.weights, WeightMode::Explicit(weights));
    }

    #[test]
    fn test_invalid_weights_rejected_before_compute() {
        let msa = small_msa();
        let err = calculate_mutual_information_enhanced(
            &msa,
            &MiOptions {
                weights: Some(vec![0.5, 0.5]),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, MiError::InvalidWeights(_)));

        // Weight validation applies on the degenerate path too
        let degenerate = Msa::from_strs(&["AAAA", "AAAA"]).unwrap();
        let err = calculate_mutual_information(
            &degenerate,
            &MiOptions {
                weights: Some(vec![0.9, 0.9]),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, MiError::InvalidWeights(_)));
    }

    #[test]
    fn test_uniform_weight_mode_recorded() {
        let msa = small_msa();
        let result = calculate_mutual_information(&msa, &MiOptions::default()).unwrap();
        assert_eq!(result.params.weights, WeightMode::Uniform);
    }

    #[test]
    fn test_shape_invariant() {
        for msa in [small_msa(), normal_msa()] {
            let result = calculate_mutual_information_enhanced(&msa, &MiOptions::default()).unwrap();
            assert_eq!(result.mi_matrix.side(), msa.length());
            assert_eq!(result.apc_matrix.as_ref().unwrap().side(), msa.length());
            assert_eq!(result.scores().side(), msa.length());
        }
    }
}
