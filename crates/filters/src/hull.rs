use geofilters_core::{GeometryError, PointCloud, PointSet, Progress, Result, Silent, Ticker};
use geofilters_spatial::UniformGrid;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Parameters of [`approximate_hull`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HullParams {
    /// Grid cell edge length per axis.
    pub cell_size: [f32; 3],
    /// A cell is kept only if *more than* this many of its neighbours are empty.
    pub min_empty_neighbors: i32,
}

impl Default for HullParams {
    fn default() -> Self {
        Self {
            cell_size: [1.0; 3],
            min_empty_neighbors: 1,
        }
    }
}

impl HullParams {
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.iter().all(|c| c.is_finite() && *c > 0.0) {
            return Err(GeometryError::invalid(format!(
                "cell size must be > 0 and finite on every axis, got {:?}",
                self.cell_size
            )));
        }
        if self.min_empty_neighbors < 0 {
            return Err(GeometryError::invalid(format!(
                "minimum number of empty neighbours must be >= 0, got {}",
                self.min_empty_neighbors
            )));
        }
        Ok(())
    }
}

/// Approximates the outer boundary of a point cloud.
///
/// Points are binned into a [`UniformGrid`]; an occupied cell survives when
/// the number of its in-bounds neighbours that are empty is strictly greater
/// than `min_empty_neighbors`. Each surviving cell contributes the centroid of
/// its points. Output order is grid order (z, then y, then x), not input order.
///
/// A cell with no in-bounds neighbours is never kept, whatever the threshold.
pub fn approximate_hull<P: PointSet + ?Sized>(points: &P, params: &HullParams) -> Result<PointCloud> {
    approximate_hull_with_progress(points, params, &mut Silent)
}

pub fn approximate_hull_with_progress<P, G>(points: &P, params: &HullParams, progress: &mut G) -> Result<PointCloud>
where
    P: PointSet + ?Sized,
    G: Progress + ?Sized,
{
    params.validate()?;
    points.validate()?;

    if points.is_empty() {
        return Ok(PointCloud::new());
    }

    let grid = UniformGrid::build_with_progress(points, params.cell_size, progress)?;
    let kept = retained_cells_with_progress(&grid, params.min_empty_neighbors, progress)?;

    let mut hull = PointCloud::with_capacity(kept.len());
    for &cell in &kept {
        let members = grid.points_in_cell(cell);
        let mut sum = [0.0f64; 3];
        for &i in members {
            let p = points.point(i);
            for a in 0..3 {
                sum[a] += p[a] as f64;
            }
        }
        let n = members.len() as f64;
        hull.push(sum.map(|s| (s / n) as f32));
    }

    log::debug!(
        "hull: {} points -> {} of {} occupied cells kept (k = {})",
        points.len(),
        hull.len(),
        grid.num_occupied(),
        params.min_empty_neighbors
    );

    Ok(hull)
}

/// Occupied cells of `grid` with more than `min_empty_neighbors` empty
/// neighbours, in ascending linear index.
pub fn retained_cells(grid: &UniformGrid, min_empty_neighbors: i32) -> Result<Vec<usize>> {
    retained_cells_with_progress(grid, min_empty_neighbors, &mut Silent)
}

pub fn retained_cells_with_progress<G: Progress + ?Sized>(
    grid: &UniformGrid,
    min_empty_neighbors: i32,
    progress: &mut G,
) -> Result<Vec<usize>> {
    if min_empty_neighbors < 0 {
        return Err(GeometryError::invalid(format!(
            "minimum number of empty neighbours must be >= 0, got {min_empty_neighbors}"
        )));
    }
    let threshold = min_empty_neighbors as usize;

    let mut kept = Vec::new();
    let mut ticker = Ticker::new(progress, "Finding boundary cells", grid.num_occupied());
    for (done, (cell, _)) in grid.occupied_cells().enumerate() {
        let empty = grid
            .neighbors(grid.cell_coords(cell))
            .filter(|&n| !grid.is_occupied(n))
            .count();
        if empty > threshold {
            kept.push(cell);
        }
        ticker.tick(done)?;
    }
    ticker.finish()?;

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofilters_core::{CancelFlag, CloudView};
    use proptest::prelude::*;

    fn solid_block(n: usize, step: f32) -> PointCloud {
        let mut cloud = PointCloud::new();
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    cloud.push([x as f32 * step, y as f32 * step, z as f32 * step]);
                }
            }
        }
        cloud
    }

    #[test]
    fn threshold_is_strict() {
        // A lone point sits in the top corner cell of a 2x2x2 grid: 7 in-bounds
        // neighbours, all empty.
        let cloud = PointCloud::from_points([[0.0, 0.0, 0.0]]);
        let grid = UniformGrid::build(&cloud, [1.0; 3]).unwrap();
        assert_eq!(grid.dims(), [2, 2, 2]);
        assert_eq!(grid.neighbors([1, 1, 1]).count(), 7);

        let keep = |k| {
            let params = HullParams {
                cell_size: [1.0; 3],
                min_empty_neighbors: k,
            };
            approximate_hull(&cloud, &params).unwrap().len()
        };
        assert_eq!(keep(6), 1);
        assert_eq!(keep(7), 0);
    }

    #[test]
    fn interior_cells_are_dropped() {
        // 3x3x3 block at 2..=4 with two isolated anchors widening the grid so
        // every block cell has in-bounds neighbours on all sides.
        let mut cloud = solid_block(3, 1.0);
        for i in 0..cloud.len() {
            cloud.x[i] += 2.0;
            cloud.y[i] += 2.0;
            cloud.z[i] += 2.0;
        }
        cloud.push([0.0, 0.0, 0.0]);
        cloud.push([6.0, 6.0, 6.0]);
        let params = HullParams {
            cell_size: [1.0; 3],
            min_empty_neighbors: 0,
        };
        let hull = approximate_hull(&cloud, &params).unwrap();
        assert_eq!(hull.len(), 26 + 2);
        assert!(hull.iter_points().all(|p| p != [3.0, 3.0, 3.0]));
    }

    #[test]
    fn centroid_of_cell_members_is_emitted() {
        let cloud = PointCloud::from_points([[0.1, 0.1, 0.1], [0.3, 0.5, 0.1], [5.2, 5.2, 5.2]]);
        let params = HullParams {
            cell_size: [1.0; 3],
            min_empty_neighbors: 1,
        };
        let hull = approximate_hull(&cloud, &params).unwrap();
        assert_eq!(hull.len(), 2);
        let first = hull.point(0);
        assert!((first[0] - 0.2).abs() < 1e-6);
        assert!((first[1] - 0.3).abs() < 1e-6);
        assert!((first[2] - 0.1).abs() < 1e-6);
        assert_eq!(hull.point(1), [5.2, 5.2, 5.2]);
    }

    #[test]
    fn output_follows_grid_order() {
        let cloud = PointCloud::from_points([[4.0, 4.0, 4.0], [0.0, 4.0, 0.0], [4.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        let hull = approximate_hull(&cloud, &HullParams::default()).unwrap();
        let pts: Vec<[f32; 3]> = hull.iter_points().collect();
        assert_eq!(
            pts,
            vec![[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [4.0, 4.0, 4.0]]
        );
    }

    #[test]
    fn works_on_borrowed_buffers() {
        let buf = [0.0, 0.0, 0.0, 3.0, 3.0, 3.0];
        let view = CloudView::from_interleaved_xyz(&buf).unwrap();
        let hull = approximate_hull(&view, &HullParams::default()).unwrap();
        assert_eq!(hull.len(), 2);
    }

    #[test]
    fn empty_input_gives_empty_hull() {
        let hull = approximate_hull(&PointCloud::new(), &HullParams::default()).unwrap();
        assert!(hull.is_empty());
    }

    #[test]
    fn invalid_params_are_rejected_before_work() {
        let cloud = solid_block(2, 1.0);
        let negative_k = HullParams {
            min_empty_neighbors: -1,
            ..HullParams::default()
        };
        let zero_cell = HullParams {
            cell_size: [1.0, 0.0, 1.0],
            ..HullParams::default()
        };
        for params in [negative_k, zero_cell] {
            let err = approximate_hull(&cloud, &params).unwrap_err();
            assert!(matches!(err, GeometryError::InvalidParameter(_)));
            // also on empty input
            let err = approximate_hull(&PointCloud::new(), &params).unwrap_err();
            assert!(matches!(err, GeometryError::InvalidParameter(_)));
        }
    }

    #[test]
    fn non_finite_point_is_a_computation_error() {
        let cloud = PointCloud::from_points([[0.0; 3], [0.0, f32::INFINITY, 0.0]]);
        let err = approximate_hull(&cloud, &HullParams::default()).unwrap_err();
        assert!(matches!(err, GeometryError::Computation(_)));
    }

    #[test]
    fn cancellation_produces_no_output() {
        let flag = CancelFlag::new();
        flag.cancel();
        let cloud = solid_block(12, 1.0);
        let err = approximate_hull_with_progress(&cloud, &HullParams::default(), &mut flag.clone()).unwrap_err();
        assert_eq!(err, GeometryError::Cancelled);
    }

    proptest! {
        #[test]
        fn raising_the_threshold_never_adds_cells(
            pts in prop::collection::vec((0.0f32..20.0f32, 0.0f32..20.0f32, 0.0f32..20.0f32), 1..600),
            cs in 0.5f32..4.0f32,
            k in 0i32..25,
        ) {
            let cloud = PointCloud::from_points(pts.iter().map(|p| [p.0, p.1, p.2]));
            let grid = UniformGrid::build(&cloud, [cs; 3]).unwrap();
            let loose = retained_cells(&grid, k).unwrap();
            let strict = retained_cells(&grid, k + 1).unwrap();
            prop_assert!(strict.len() <= loose.len());
            prop_assert!(strict.iter().all(|c| loose.binary_search(c).is_ok()));
        }
    }
}
