use crate::regression::fit_line;
use geofilters_core::{ImageGeometry, Progress, Result, Silent, Ticker};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Line fitted through boundary points and the mean perpendicular distance
/// of those points from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RoughnessParams {
    pub mean_distance: f64,
    pub intercept: f64,
    pub slope: f64,
}

impl RoughnessParams {
    /// `[mean_distance, intercept, slope]`, the layout hosts store.
    pub fn to_array(&self) -> [f64; 3] {
        [self.mean_distance, self.intercept, self.slope]
    }
}

/// Fits `y = a + b·x` through `points` and averages their perpendicular
/// distance to it.
///
/// Fewer than two distinct `x` values is a `Computation` error.
pub fn surface_roughness(points: &[[f64; 2]]) -> Result<RoughnessParams> {
    let xs: Vec<f64> = points.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = points.iter().map(|p| p[1]).collect();
    let line = fit_line(&xs, &ys)?;

    let total: f64 = points.iter().map(|p| line.distance(p[0], p[1])).sum();
    let mean_distance = total / points.len() as f64;

    log::debug!(
        "roughness over {} points: line y = {} + {}x, mean distance {}",
        points.len(),
        line.intercept,
        line.slope,
        mean_distance
    );

    Ok(RoughnessParams {
        mean_distance,
        intercept: line.intercept,
        slope: line.slope,
    })
}

/// [`surface_roughness`] over the `(x, y)` centres of every cell of `image`
/// flagged `> 0` in `cells`, gathered in z, y, x order.
pub fn surface_roughness_from_boundary_cells(image: &ImageGeometry, cells: &[i8]) -> Result<RoughnessParams> {
    surface_roughness_from_boundary_cells_with_progress(image, cells, &mut Silent)
}

pub fn surface_roughness_from_boundary_cells_with_progress<G: Progress + ?Sized>(
    image: &ImageGeometry,
    cells: &[i8],
    progress: &mut G,
) -> Result<RoughnessParams> {
    image.check_buffer_len(cells.len(), "boundary cell array")?;

    let mut points = Vec::new();
    let mut ticker = Ticker::new(progress, "Gathering boundary cells", cells.len());
    for (index, &flag) in cells.iter().enumerate() {
        if flag > 0 {
            let c = image.cell_center(index);
            points.push([c[0], c[1]]);
        }
        ticker.tick(index)?;
    }
    ticker.finish()?;

    surface_roughness(&points)
}
