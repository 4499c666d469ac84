// matrix.rs - Dense symmetric coupling matrix

use serde::{Deserialize, Serialize};

/// Dense L x L matrix of coupling scores, stored row-major.
///
/// The raw variant is non-negative with a zero diagonal; the corrected
/// variant keeps the zero diagonal but may hold negative entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingMatrix {
    side: usize,
    data: Vec<f64>,
}

impl CouplingMatrix {
    /// All-zero matrix of the given side length.
    pub fn zeros(side: usize) -> Self {
        Self {
            side,
            data: vec![0.0; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.side + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.side + j] = value;
    }

    /// Write both (i, j) and (j, i).
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.side + j] = value;
        self.data[j * self.side + i] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Sum of all entries.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Mean of row i excluding the diagonal entry.
    pub fn row_mean_off_diagonal(&self, i: usize) -> f64 {
        if self.side < 2 {
            return 0.0;
        }
        let row = &self.data[i * self.side..(i + 1) * self.side];
        let sum: f64 = row.iter().sum::<f64>() - row[i];
        sum / (self.side - 1) as f64
    }

    /// Mean over all off-diagonal entries.
    pub fn grand_mean_off_diagonal(&self) -> f64 {
        if self.side < 2 {
            return 0.0;
        }
        let diagonal: f64 = (0..self.side).map(|i| self.get(i, i)).sum();
        let sum: f64 = self.data.iter().sum::<f64>() - diagonal;
        sum / (self.side * (self.side - 1)) as f64
    }

    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.side {
            for j in (i + 1)..self.side {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}
