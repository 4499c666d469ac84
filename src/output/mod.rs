// mod.rs - Output formatters module

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data::{CouplingMatrix, MiFeatures, RankedPair};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

/// Write a coupling matrix in TSV format with position labels
pub fn write_matrix_tsv(
    file_path: &str,
    target_id: &str,
    matrix: &CouplingMatrix,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Target: {}", target_id).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# rnami v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;

    // Header
    write!(writer, "Position").map_err(|e| format!("Write error: {}", e))?;
    for j in 0..matrix.side() {
        write!(writer, "\t{}", j).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    // Matrix
    for i in 0..matrix.side() {
        write!(writer, "{}", i).map_err(|e| format!("Write error: {}", e))?;
        for j in 0..matrix.side() {
            write!(writer, "\t{:.6}", matrix.get(i, j)).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write a coupling matrix in CSV format with position labels
pub fn write_matrix_csv(
    file_path: &str,
    target_id: &str,
    matrix: &CouplingMatrix,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Target: {}", target_id).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# rnami v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;

    write!(writer, "Position").map_err(|e| format!("Write error: {}", e))?;
    for j in 0..matrix.side() {
        write!(writer, ",{}", j).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    for i in 0..matrix.side() {
        write!(writer, "{}", i).map_err(|e| format!("Write error: {}", e))?;
        for j in 0..matrix.side() {
            write!(writer, ",{:.6}", matrix.get(i, j)).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write the ranked pair list as CSV
pub fn write_top_pairs_csv(file_path: &str, pairs: &[RankedPair]) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::Writer::from_path(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;

    for pair in pairs {
        writer
            .serialize(pair)
            .map_err(|e| format!("Failed to write pair record: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write a human-readable JSON summary of one result record.
///
/// Matrices are summarized by shape, not dumped; the binary archive is
/// the round-trip format.
pub fn write_summary_json(
    file_path: &str,
    target_id: &str,
    features: &MiFeatures,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;

    let summary = serde_json::json!({
        "target_id": target_id,
        "generated": chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        "version": env!("CARGO_PKG_VERSION"),
        "method": features.method,
        "shape": [features.shape(), features.shape()],
        "params": features.params,
        "top_pairs": features.top_pairs,
    });

    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary)
        .map_err(|e| format!("Failed to write summary: {}", e))?;

    Ok(())
}
