//! Per-Column Standardization
//!
//! Rescales each course column to zero mean and unit variance. The scaler is
//! fit fresh on the current matrix for every request and discarded
//! afterwards; the fitted parameters also transform the single query row so
//! query and table live in the same space.

use rayon::prelude::*;

use crate::matrix::InteractionMatrix;
use crate::types::EPSILON;

#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fits column means and population standard deviations.
    pub fn fit(matrix: &InteractionMatrix) -> Self {
        let rows = matrix.row_count();
        let stats: Vec<(f64, f64)> = (0..matrix.col_count())
            .into_par_iter()
            .map(|col| {
                let sum: f64 = (0..rows).map(|row| matrix.get(row, col)).sum();
                let mean = sum / rows as f64;
                let var: f64 = (0..rows)
                    .map(|row| {
                        let d = matrix.get(row, col) - mean;
                        d * d
                    })
                    .sum::<f64>()
                    / rows as f64;
                (mean, var.sqrt())
            })
            .collect();

        let (means, stds) = stats.into_iter().unzip();
        Self { means, stds }
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    /// Standardizes one raw row with the fitted parameters. Zero-variance
    /// columns map to 0 instead of dividing by zero.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(&value, (&mean, &std))| {
                if std <= EPSILON {
                    0.0
                } else {
                    (value - mean) / std
                }
            })
            .collect()
    }

    /// Maps a standardized row back to raw values; zero-variance columns
    /// recover their mean.
    pub fn inverse_transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(&value, (&mean, &std))| {
                if std <= EPSILON {
                    mean
                } else {
                    value * std + mean
                }
            })
            .collect()
    }

    /// Standardizes every row of the matrix.
    pub fn transform_matrix(&self, matrix: &InteractionMatrix) -> Vec<Vec<f64>> {
        (0..matrix.row_count())
            .into_par_iter()
            .map(|row| self.transform_row(matrix.row(row)))
            .collect()
    }
}
