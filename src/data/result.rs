// result.rs - Engine result records

use serde::{Deserialize, Serialize};

use crate::data::matrix::CouplingMatrix;

/// Which matrix the legacy `scores` / `coupling_matrix` aliases resolve to.
///
/// The enhanced computation path aliases the APC-corrected matrix; the
/// basic path predates the correction and aliases raw mutual information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouplingAlias {
    RawMi,
    ApcCorrected,
}

/// One ranked column pair, i < j, scored by corrected coupling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPair {
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

/// How sequence weights were resolved for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeightMode {
    /// No weights supplied; every sequence contributed 1/N
    Uniform,
    /// Caller-supplied weight vector, index-aligned with the alignment
    Explicit(Vec<f64>),
}

/// Column-window bookkeeping, present only when windows actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkParams {
    pub max_chunk_length: usize,
    pub num_chunks: usize,
}

/// Parameters resolved for one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiParams {
    /// Smoothing constant actually applied (explicit or adaptive)
    pub pseudocount: f64,
    pub weights: WeightMode,
    /// True when the degenerate shortcut produced the result
    pub single_sequence: bool,
    pub chunking: Option<ChunkParams>,
}

/// Complete output of one coupling computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiFeatures {
    /// Raw mutual information matrix (L x L)
    pub mi_matrix: CouplingMatrix,
    /// APC-corrected matrix; absent on the basic path
    pub apc_matrix: Option<CouplingMatrix>,
    pub alias: CouplingAlias,
    pub method: String,
    pub top_pairs: Vec<RankedPair>,
    pub params: MiParams,
}

impl MiFeatures {
    /// Legacy `scores` alias: the matrix downstream consumers rank by.
    pub fn scores(&self) -> &CouplingMatrix {
        match self.alias {
            CouplingAlias::ApcCorrected => self
                .apc_matrix
                .as_ref()
                .unwrap_or(&self.mi_matrix),
            CouplingAlias::RawMi => &self.mi_matrix,
        }
    }

    /// Legacy `coupling_matrix` alias, identical to `scores`.
    pub fn coupling_matrix(&self) -> &CouplingMatrix {
        self.scores()
    }

    /// Side length of the result matrices.
    pub fn shape(&self) -> usize {
        self.mi_matrix.side()
    }
}
