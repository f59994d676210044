//! Feature standardization.

use serde::{Deserialize, Serialize};

/// Per-column zero-mean/unit-variance scaler.
///
/// Statistics are computed once at fit time and reused verbatim at
/// predict time; they are never refit on new data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit column statistics over a row-major matrix.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n_cols = rows.first().map_or(0, |r| r.len());
        let n = rows.len() as f64;
        let mut means = vec![0.0; n_cols];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = vec![0.0; n_cols];
        for row in rows {
            for ((s, v), m) in stds.iter_mut().zip(row).zip(&means) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
        }

        Self { means, stds }
    }

    /// Standardize one row. Zero-variance columns transform to 0.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.means)
            .zip(&self.stds)
            .map(|((v, m), s)| if *s > 0.0 { (v - m) / s } else { 0.0 })
            .collect()
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }
}
