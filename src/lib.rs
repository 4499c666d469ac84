// lib.rs - rnami library root

//! # rnami - High-performance mutual information coupling calculator for RNA MSAs
//!
//! This library computes position-by-position coupling matrices from RNA
//! multiple sequence alignments for downstream structure-prediction
//! models. Couplings are weighted mutual information scores with
//! pseudocount smoothing and average product correction (APC) to remove
//! phylogenetic background signal.
//!
//! ## Features
//!
//! - **Adaptive smoothing**: pseudocounts selected from alignment depth
//! - **Sequence weighting**: caller-supplied weights down-weight redundant sequences
//! - **APC correction**: background covariation removed from raw couplings
//! - **Degenerate fast path**: single-sequence alignments short-circuit to zero matrices
//! - **Chunked analysis**: column windows bound peak memory for long alignments
//! - **Parallel**: column pairs computed across threads without changing results
//!
//! ## Basic Usage
//!
//! ```rust
//! use rnami::prelude::*;
//!
//! let msa = Msa::from_strs(&[
//!     "ACGUCGAUCGAUCGA",
//!     "ACGUCGAUCGAUCCA",
//!     "ACGUCGAUCGAUCAA",
//! ])?;
//!
//! let features = calculate_mutual_information_enhanced(&msa, &MiOptions::default())?;
//! assert_eq!(features.shape(), 15);
//!
//! // `scores` aliases the APC-corrected matrix on the enhanced path
//! assert_eq!(features.scores().side(), 15);
//! # Ok::<(), rnami::MiError>(())
//! ```

// Re-export all main modules
pub mod config;
pub mod core;
pub mod data;
pub mod output;
pub mod storage;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::config::MiConfig;
    pub use crate::core::{
        calculate_mutual_information, calculate_mutual_information_enhanced, chunk_and_analyze,
        MiOptions,
    };
    pub use crate::core::{get_adaptive_pseudocount, resolve_pseudocount, resolve_weights};
    pub use crate::data::{
        ChunkParams, CouplingAlias, CouplingMatrix, MiError, MiFeatures, MiParams, Msa,
        RankedPair, WeightMode,
    };
    pub use crate::output::{write_matrix_csv, write_matrix_tsv, write_summary_json, write_top_pairs_csv};
    pub use crate::storage::FeatureStore;
}

// Re-export main types at the root level for convenience
pub use crate::config::MiConfig;
pub use crate::core::{
    calculate_mutual_information, calculate_mutual_information_enhanced, chunk_and_analyze,
    MiOptions,
};
pub use crate::data::{CouplingMatrix, MiError, MiFeatures, MiParams, Msa, RankedPair};
pub use crate::storage::FeatureStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "rnami v{} - High-performance MI coupling calculator for RNA MSAs",
        VERSION
    )
}
