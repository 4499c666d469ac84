// frequencies.rs - Alignment encoding and column frequency tables

use std::collections::{BTreeMap, BTreeSet};

use crate::data::Msa;

/// Alignment encoded over its observed symbol alphabet.
///
/// Every distinct symbol in the alignment (nucleotides, gaps, ambiguity
/// codes alike) gets a compact code; rows become code vectors so the
/// pairwise sweep indexes fixed-size count tables instead of hashing
/// characters.
#[derive(Debug, Clone)]
pub struct MsaEncoding {
    alphabet: Vec<char>,
    rows: Vec<Vec<u8>>,
    length: usize,
}

impl MsaEncoding {
    pub fn encode(msa: &Msa) -> Self {
        let symbols: BTreeSet<char> = msa
            .sequences()
            .iter()
            .flat_map(|sequence| sequence.chars())
            .collect();
        assert!(
            symbols.len() <= u8::MAX as usize + 1,
            "alignment alphabet exceeds 256 symbols"
        );

        let alphabet: Vec<char> = symbols.into_iter().collect();
        let codes: BTreeMap<char, u8> = alphabet
            .iter()
            .enumerate()
            .map(|(code, symbol)| (*symbol, code as u8))
            .collect();

        let rows = msa
            .sequences()
            .iter()
            .map(|sequence| sequence.chars().map(|symbol| codes[&symbol]).collect())
            .collect();

        Self {
            alphabet,
            rows,
            length: msa.length(),
        }
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Raw unweighted symbol counts for one column.
    pub fn column_counts(&self, column: usize) -> Vec<usize> {
        let mut counts = vec![0usize; self.alphabet.len()];
        for row in &self.rows {
            counts[row[column] as usize] += 1;
        }
        counts
    }

    /// Weighted, pseudocount-smoothed symbol probabilities for one column.
    ///
    /// The table sums to 1; with a positive pseudocount every symbol of
    /// the observed alphabet has nonzero probability.
    pub fn column_frequencies(&self, column: usize, weights: &[f64], pseudocount: f64) -> Vec<f64> {
        let k = self.alphabet.len();
        let mut table = vec![pseudocount; k];
        for (row, weight) in self.rows.iter().zip(weights) {
            table[row[column] as usize] += weight;
        }
        let total: f64 = weights.iter().sum::<f64>() + pseudocount * k as f64;
        for entry in &mut table {
            *entry /= total;
        }
        table
    }
}
