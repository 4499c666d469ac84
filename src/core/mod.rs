// mod.rs - Core engine module

pub mod apc;
pub mod chunking;
pub mod frequencies;
pub mod mi;
pub mod pairs;
pub mod pseudocount;
pub mod weights;

// Re-export main types for convenience
pub use apc::apply_apc_correction;
pub use chunking::{chunk_and_analyze, chunk_windows};
pub use frequencies::MsaEncoding;
pub use mi::{
    calculate_mutual_information, calculate_mutual_information_enhanced, MiOptions, METHOD_BASIC,
    METHOD_ENHANCED,
};
pub use pairs::{select_top_pairs, DEFAULT_MIN_SEPARATION, DEFAULT_TOP_PAIR_COUNT};
pub use pseudocount::{get_adaptive_pseudocount, resolve_pseudocount};
pub use weights::{resolve_weights, WEIGHT_SUM_TOLERANCE};
