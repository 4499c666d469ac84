// mod.rs - Compressed feature archive storage

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::MiFeatures;

const FORMAT_VERSION: u32 = 1;

/// Archive envelope: metadata plus the bincode-encoded feature record.
///
/// The payload stays binary so numeric arrays round-trip bit-identical;
/// the checksum is verified before any decode of the payload.
#[derive(Debug, Serialize, Deserialize)]
struct FeatureArchive {
    metadata: ArchiveMetadata,
    payload: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArchiveMetadata {
    version: String,
    created: String,
    target_id: String,
    payload_checksum: u32,
    format_version: u32,
}

/// Compute CRC32 checksum of an encoded payload
fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// On-disk store for per-target feature records.
///
/// Archives are LZ4-compressed and keyed by a caller-supplied target
/// identifier; the engine itself never touches the filesystem.
pub struct FeatureStore {
    data_dir: PathBuf,
}

impl FeatureStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, String> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| {
            format!(
                "Failed to create feature directory '{}': {}",
                data_dir.display(),
                e
            )
        })?;
        Ok(Self { data_dir })
    }

    /// Archive path for a target.
    pub fn feature_path(&self, target_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}_mi.feat.lz4", target_id))
    }

    pub fn has_features(&self, target_id: &str) -> bool {
        self.feature_path(target_id).exists()
    }

    /// Serialize, checksum, compress, and write one feature record.
    pub fn save_features(
        &self,
        target_id: &str,
        features: &MiFeatures,
    ) -> Result<PathBuf, String> {
        let payload = bincode::serialize(features)
            .map_err(|e| format!("Failed to serialize features: {}", e))?;

        let metadata = ArchiveMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            target_id: target_id.to_string(),
            payload_checksum: compute_crc32(&payload),
            format_version: FORMAT_VERSION,
        };

        let archive = FeatureArchive { metadata, payload };
        let encoded = bincode::serialize(&archive)
            .map_err(|e| format!("Failed to serialize archive: {}", e))?;
        let compressed = lz4_flex::compress_prepend_size(&encoded);

        let path = self.feature_path(target_id);
        fs::write(&path, &compressed)
            .map_err(|e| format!("Failed to write feature archive '{}': {}", path.display(), e))?;

        Ok(path)
    }

    /// Read one feature record back, verifying the payload checksum
    /// before decoding.
    pub fn load_features(&self, target_id: &str) -> Result<MiFeatures, String> {
        let path = self.feature_path(target_id);
        let compressed = fs::read(&path)
            .map_err(|e| format!("Failed to read feature archive '{}': {}", path.display(), e))?;

        let decoded = lz4_flex::decompress_size_prepended(&compressed)
            .map_err(|e| format!("Failed to decompress feature archive '{}': {}", path.display(), e))?;

        let archive: FeatureArchive = bincode::deserialize(&decoded)
            .map_err(|e| format!("Failed to decode feature archive '{}': {}", path.display(), e))?;

        if archive.metadata.format_version != FORMAT_VERSION {
            return Err(format!(
                "Feature archive '{}' has unsupported format version {}",
                path.display(),
                archive.metadata.format_version
            ));
        }
        if compute_crc32(&archive.payload) != archive.metadata.payload_checksum {
            return Err(format!(
                "Feature archive '{}' is corrupted (checksum mismatch)",
                path.display()
            ));
        }

        bincode::deserialize(&archive.payload)
            .map_err(|e| format!("Failed to decode features for '{}': {}", target_id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mi::{calculate_mutual_information_enhanced, MiOptions};
    use crate::data::Msa;

    fn temp_store(name: &str) -> (FeatureStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("rnami_store_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        (FeatureStore::new(&dir).unwrap(), dir)
    }

    fn sample_features() -> MiFeatures {
        let msa = Msa::from_strs(&["ACGUACGU", "ACGCACGU", "ACGAACGU", "ACGCACGU"]).unwrap();
        calculate_mutual_information_enhanced(&msa, &MiOptions::default()).unwrap()
    }

    #[test]
    fn test_round_trip_is_bit_identical() {
        let (store, dir) = temp_store("roundtrip");
        let features = sample_features();

        store.save_features("target_001", &features).unwrap();
        assert!(store.has_features("target_001"));

        let loaded = store.load_features("target_001").unwrap();
        assert_eq!(loaded, features);
        assert_eq!(
            loaded.mi_matrix.as_slice(),
            features.mi_matrix.as_slice()
        );
        assert_eq!(loaded.params, features.params);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_target() {
        let (store, dir) = temp_store("missing");
        assert!(!store.has_features("nonexistent"));
        assert!(store.load_features("nonexistent").is_err());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupted_archive_rejected() {
        let (store, dir) = temp_store("corrupt");
        let features = sample_features();
        let path = store.save_features("target_002", &features).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let middle = bytes.len() / 2;
        bytes[middle] ^= 0xFF;
        fs::write(&path, &bytes).unwrap();

        assert!(store.load_features("target_002").is_err());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_feature_path_is_target_keyed() {
        let (store, dir) = temp_store("paths");
        let path = store.feature_path("abc");
        assert!(path.ends_with("abc_mi.feat.lz4"));
        let _ = fs::remove_dir_all(dir);
    }
}
