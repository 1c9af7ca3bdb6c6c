use geofilters_core::{GeometryError, Result};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Ordinary least-squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Perpendicular distance from `(x, y)` to the line.
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        (y - self.predict(x)).abs() / (1.0 + self.slope * self.slope).sqrt()
    }
}

/// Fits `ys` against `xs` by ordinary least squares.
///
/// The slope is `(Σxy - n·x̄·ȳ) / (Σxx - n·x̄²)` and the intercept
/// `ȳ - slope·x̄`. Fails with `Computation` unless `xs` holds at least two
/// distinct values.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<LinearFit> {
    if xs.len() != ys.len() {
        return Err(GeometryError::invalid(format!(
            "regression needs paired samples, got {} x and {} y values",
            xs.len(),
            ys.len()
        )));
    }
    let Some(&first) = xs.first() else {
        return Err(GeometryError::computation("regression over zero samples"));
    };
    if xs.iter().all(|&x| x == first) {
        return Err(GeometryError::computation(format!(
            "regression is degenerate: all {} samples share x = {first}",
            xs.len()
        )));
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;
    let sum_xx: f64 = xs.iter().map(|x| x * x).sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();

    let ss_xx = sum_xx - n * x_mean * x_mean;
    let ss_xy = sum_xy - n * x_mean * y_mean;
    if ss_xx == 0.0 || !ss_xx.is_finite() {
        return Err(GeometryError::computation(format!(
            "regression is degenerate: x variance evaluates to {ss_xx}"
        )));
    }

    let slope = ss_xy / ss_xx;
    Ok(LinearFit {
        intercept: y_mean - slope * x_mean,
        slope,
    })
}
