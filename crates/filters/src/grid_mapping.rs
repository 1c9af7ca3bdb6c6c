use geofilters_core::{Aabb, GeometryError, ImageGeometry, PointSet, Progress, Result, Silent, Ticker};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Requested resolution of the grid built by [`regular_grid_for_cloud`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridMappingParams {
    pub dims: [usize; 3],
}

impl Default for GridMappingParams {
    fn default() -> Self {
        Self { dims: [10, 10, 10] }
    }
}

impl GridMappingParams {
    pub fn validate(&self) -> Result<()> {
        if self.dims.contains(&0) {
            return Err(GeometryError::invalid(format!(
                "grid dimensions must be >= 1 on every axis, got {:?}",
                self.dims
            )));
        }
        Ok(())
    }
}

fn check_mask<P: PointSet + ?Sized>(points: &P, mask: Option<&[bool]>) -> Result<()> {
    points.validate()?;
    match mask {
        Some(m) if m.len() != points.len() => Err(GeometryError::invalid(format!(
            "mask has {} values but there are {} points",
            m.len(),
            points.len()
        ))),
        _ => Ok(()),
    }
}

/// Derives an image geometry enclosing the (masked) points.
///
/// For an axis with `dims > 1` the extent is split into `dims` intervals and
/// one extra cell is added, so the outermost points sit on cell centres. An
/// axis with `dims == 1` gets a single cell 1.25 times the extent. Zero extent
/// falls back to a unit cell.
pub fn regular_grid_for_cloud<P: PointSet + ?Sized>(
    points: &P,
    params: &GridMappingParams,
    mask: Option<&[bool]>,
) -> Result<ImageGeometry> {
    params.validate()?;
    check_mask(points, mask)?;

    let mut bounds = Aabb::empty();
    let mut skipped = 0usize;
    for i in 0..points.len() {
        if mask.is_some_and(|m| !m[i]) {
            continue;
        }
        if !bounds.expand_with_point(points.point(i)) {
            skipped += 1;
        }
    }
    if skipped > 0 {
        log::warn!("{skipped} points with non-finite coordinates ignored while sizing the grid");
    }
    if bounds.is_empty() {
        return Err(GeometryError::computation("no finite points to enclose in a grid"));
    }

    let mut dims = params.dims;
    let mut spacing = [0.0f32; 3];
    let mut origin = [0.0f32; 3];
    for a in 0..3 {
        let lo = bounds.min[a];
        let extent = bounds.max[a] - lo;
        if dims[a] > 1 {
            let res = extent / dims[a] as f32;
            if res == 0.0 {
                spacing[a] = 1.0;
                dims[a] = 1;
            } else {
                spacing[a] = res;
                dims[a] += 1;
            }
            origin[a] = lo - spacing[a] / 2.0;
        } else if extent == 0.0 {
            spacing[a] = 1.0;
            origin[a] = -0.5;
        } else {
            spacing[a] = 1.25 * extent;
            origin[a] = lo - spacing[a] * 0.1;
        }
    }

    log::debug!("regular grid: dims {dims:?}, spacing {spacing:?}, origin {origin:?}");
    Ok(ImageGeometry::new(dims, spacing, origin))
}

/// Maps every point to the linear index of the image cell containing it.
///
/// Indices are `floor((p - origin) / spacing)` per axis, clamped into the
/// image. Points excluded by `mask` map to `None`. A selected point with a
/// non-finite coordinate is a `Computation` error.
pub fn map_points_to_grid<P: PointSet + ?Sized>(
    points: &P,
    image: &ImageGeometry,
    mask: Option<&[bool]>,
) -> Result<Vec<Option<usize>>> {
    map_points_to_grid_with_progress(points, image, mask, &mut Silent)
}

pub fn map_points_to_grid_with_progress<P, G>(
    points: &P,
    image: &ImageGeometry,
    mask: Option<&[bool]>,
    progress: &mut G,
) -> Result<Vec<Option<usize>>>
where
    P: PointSet + ?Sized,
    G: Progress + ?Sized,
{
    check_mask(points, mask)?;
    if image.dims.contains(&0) {
        return Err(GeometryError::invalid(format!(
            "image dimensions must be >= 1 on every axis, got {:?}",
            image.dims
        )));
    }
    if image.checked_num_cells().is_none() {
        return Err(GeometryError::invalid(format!(
            "image dimensions {:?} overflow the cell count",
            image.dims
        )));
    }
    if !image.spacing.iter().all(|s| s.is_finite() && *s > 0.0) {
        return Err(GeometryError::invalid(format!(
            "image spacing must be > 0 and finite on every axis, got {:?}",
            image.spacing
        )));
    }

    let n = points.len();
    let mut indices = Vec::with_capacity(n);
    let mut below = 0usize;
    let mut ticker = Ticker::new(progress, "Computing point cloud voxel indices", n);
    for i in 0..n {
        if mask.is_some_and(|m| !m[i]) {
            indices.push(None);
            ticker.tick(i)?;
            continue;
        }
        let p = points.point(i);
        if !p.iter().all(|v| v.is_finite()) {
            return Err(GeometryError::computation(format!(
                "point {i} has a non-finite coordinate: {p:?}"
            )));
        }
        let mut ijk = [0usize; 3];
        for a in 0..3 {
            let rel = (p[a] as f64 - image.origin[a] as f64) / image.spacing[a] as f64;
            if rel < 0.0 {
                below += 1;
            }
            ijk[a] = (rel.floor().max(0.0) as usize).min(image.dims[a] - 1);
        }
        indices.push(Some(image.linear_index(ijk)));
        ticker.tick(i)?;
    }
    ticker.finish()?;

    if below > 0 {
        log::warn!("{below} point coordinates lie below the image origin and were clamped to the first cell");
    }
    Ok(indices)
}
