// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::mi::MiOptions;
use crate::core::pairs::{DEFAULT_MIN_SEPARATION, DEFAULT_TOP_PAIR_COUNT};

/// TOML-backed run configuration. Every field is optional; unset fields
/// fall back to engine defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MiConfig {
    // Smoothing
    pub pseudocount: Option<f64>,

    // Chunked analysis
    pub max_chunk_length: Option<usize>,

    // Pair ranking
    pub min_separation: Option<usize>,
    pub top_pair_count: Option<usize>,

    // Storage
    pub data_dir: Option<String>,

    // Diagnostics
    pub verbose: Option<bool>,
}

impl MiConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: MiConfig = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Engine options for one invocation. Sequence weights are per-target
    /// inputs, not configuration, so they stay None here.
    pub fn to_options(&self) -> MiOptions {
        MiOptions {
            pseudocount: self.pseudocount,
            weights: None,
            min_separation: self.min_separation.unwrap_or(DEFAULT_MIN_SEPARATION),
            top_pair_count: self.top_pair_count.unwrap_or(DEFAULT_TOP_PAIR_COUNT),
            verbose: self.verbose.unwrap_or(false),
        }
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# rnami.toml - Configuration file for rnami

# =============================================================================
# SMOOTHING
# =============================================================================

# Pseudocount added to every symbol count before normalization.
# Omit to select adaptively from alignment depth:
#   <= 25 sequences -> 0.5, 26-100 -> 0.2, > 100 -> 0.0
# pseudocount = 0.5

# =============================================================================
# CHUNKED ANALYSIS
# =============================================================================

# Maximum columns per window for long alignments.
# Alignments at or below this length are computed in one pass.
max_chunk_length = 750

# =============================================================================
# PAIR RANKING
# =============================================================================

# Minimum |i - j| for ranked coupling pairs
min_separation = 4

# Bound on the ranked pair list
top_pair_count = 100

# =============================================================================
# STORAGE
# =============================================================================

# Directory for compressed feature archives
data_dir = "features"

# =============================================================================
# DIAGNOSTICS
# =============================================================================

# Progress and timing reports (no effect on results)
verbose = false
"#
        .to_string()
    }
}
