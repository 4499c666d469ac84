// mod.rs - Data structures module

pub mod alignment;
pub mod matrix;
pub mod result;

// Re-export main types for convenience
pub use alignment::{MiError, Msa};
pub use matrix::CouplingMatrix;
pub use result::{ChunkParams, CouplingAlias, MiFeatures, MiParams, RankedPair, WeightMode};
