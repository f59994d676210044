//! Ridge least squares via normal equations and Gaussian elimination.

use forecast_spi::{ForecastError, Result};

/// Solve `(X'X + lambda I) beta = X'y` for the coefficient vector.
/// The intercept column (index 0) is not penalized.
pub fn ridge_solve(rows: &[Vec<f64>], targets: &[f64], lambda: f64) -> Result<Vec<f64>> {
    let n = rows.len();
    if n == 0 || n != targets.len() {
        return Err(ForecastError::Numerical(
            "design matrix and target length mismatch".to_string(),
        ));
    }
    let p = rows[0].len();

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];
    for (row, &y) in rows.iter().zip(targets) {
        for i in 0..p {
            xty[i] += row[i] * y;
            for j in i..p {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..p {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }
    for i in 1..p {
        xtx[i][i] += lambda;
    }

    solve(xtx, xty)
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return Err(ForecastError::Numerical(
                "singular normal equations; series has no usable variation".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in row + 1..n {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}

/// Dot product of a design row and the coefficient vector.
pub fn predict_row(row: &[f64], beta: &[f64]) -> f64 {
    row.iter().zip(beta).map(|(a, b)| a * b).sum()
}
