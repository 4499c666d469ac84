// alignment.rs - Validated multiple sequence alignment input

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised by the coupling engine.
///
/// All variants are produced during entry validation, before any matrix
/// computation starts, so a failed call never returns a partial result.
#[derive(Debug, Clone, PartialEq)]
pub enum MiError {
    /// Zero sequences, or sequences of zero length
    EmptyAlignment(String),
    /// Sequences of unequal length
    RaggedAlignment {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// Weight vector with wrong length, negative entries, or bad sum
    InvalidWeights(String),
    /// Non-positive column window size for the chunked path
    InvalidChunkSize(usize),
}

impl fmt::Display for MiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiError::EmptyAlignment(msg) => write!(f, "Empty alignment: {}", msg),
            MiError::RaggedAlignment {
                index,
                expected,
                found,
            } => write!(
                f,
                "Ragged alignment: sequence {} has length {} (expected {})",
                index, found, expected
            ),
            MiError::InvalidWeights(msg) => write!(f, "Invalid sequence weights: {}", msg),
            MiError::InvalidChunkSize(size) => {
                write!(f, "Invalid chunk size: {} (must be positive)", size)
            }
        }
    }
}

impl std::error::Error for MiError {}

/// Rectangular multiple sequence alignment.
///
/// Rows are equal-length strings over a nucleotide alphabet; gap and
/// ambiguity symbols are permitted and treated as ordinary symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Msa {
    sequences: Vec<String>,
    length: usize,
}

impl Msa {
    /// Build a validated alignment from owned sequences.
    ///
    /// Fails when there are no sequences, when sequences are zero-length,
    /// or when row lengths differ.
    pub fn from_sequences(sequences: Vec<String>) -> Result<Self, MiError> {
        if sequences.is_empty() {
            return Err(MiError::EmptyAlignment(
                "alignment contains no sequences".to_string(),
            ));
        }

        let length = sequences[0].chars().count();
        if length == 0 {
            return Err(MiError::EmptyAlignment(
                "sequences have zero length".to_string(),
            ));
        }

        for (index, sequence) in sequences.iter().enumerate().skip(1) {
            let found = sequence.chars().count();
            if found != length {
                return Err(MiError::RaggedAlignment {
                    index,
                    expected: length,
                    found,
                });
            }
        }

        Ok(Self { sequences, length })
    }

    /// Convenience constructor from string slices.
    pub fn from_strs(sequences: &[&str]) -> Result<Self, MiError> {
        Self::from_sequences(sequences.iter().map(|s| s.to_string()).collect())
    }

    /// Number of sequences (alignment depth N).
    pub fn depth(&self) -> usize {
        self.sequences.len()
    }

    /// Number of columns (per-sequence length L).
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn sequences(&self) -> &[String] {
        &self.sequences
    }

    /// Number of distinct sequences (exact string identity).
    pub fn distinct_count(&self) -> usize {
        let distinct: HashSet<&str> = self.sequences.iter().map(|s| s.as_str()).collect();
        distinct.len()
    }

    /// An alignment with at most one distinct sequence carries no
    /// covariation signal.
    pub fn is_degenerate(&self) -> bool {
        self.distinct_count() <= 1
    }
}
