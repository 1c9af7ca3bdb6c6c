use geofilters_core::{GeometryError, PointSet, Progress, Result, Silent, Ticker};
use hashbrown::HashMap;

/// The 26 cell offsets surrounding a cell: every `{-1, 0, 1}^3` triple except
/// the centre, faces first, then edges, then corners.
pub const NEIGHBOR_OFFSETS: [[i64; 3]; 26] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [1, 0, -1],
    [-1, 0, 1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, 1, -1],
    [0, -1, 1],
    [0, -1, -1],
    [1, 1, 1],
    [1, 1, -1],
    [1, -1, 1],
    [1, -1, -1],
    [-1, 1, 1],
    [-1, 1, -1],
    [-1, -1, 1],
    [-1, -1, -1],
];

// Keeps integer cell coordinates exactly representable in f64.
const MAX_CELL_COORD: f64 = (1u64 << 52) as f64;

/// A regular axis-aligned grid binning a point set by cell.
///
/// The grid covers the points' bounding box grown by half a cell on every
/// side, snapped to multiples of the cell size. Cells are addressed by a
/// linear index `x + y * dims[0] + z * dims[0] * dims[1]`. Only occupied
/// cells are stored.
///
/// The grid keeps point *indices* into the set it was built from; it does
/// not borrow or copy the coordinates.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    cell_size: [f32; 3],
    floor_min: [i64; 3],
    dims: [usize; 3],
    cells: HashMap<usize, Vec<usize>>,
    occupied: Vec<usize>,
}

impl UniformGrid {
    /// Bins `points` into cells of `cell_size`.
    ///
    /// Fails with `InvalidParameter` if any cell size is not a positive finite
    /// number or the grid would have more cells than fit in `usize`, and with
    /// `Computation` if a point has a non-finite coordinate. An empty point set
    /// yields an empty grid with `dims == [0, 0, 0]`.
    pub fn build<P: PointSet + ?Sized>(points: &P, cell_size: [f32; 3]) -> Result<Self> {
        Self::build_with_progress(points, cell_size, &mut Silent)
    }

    pub fn build_with_progress<P, G>(points: &P, cell_size: [f32; 3], progress: &mut G) -> Result<Self>
    where
        P: PointSet + ?Sized,
        G: Progress + ?Sized,
    {
        validate_cell_size(cell_size)?;
        points.validate()?;

        let n = points.len();
        if n == 0 {
            return Ok(Self {
                cell_size,
                floor_min: [0; 3],
                dims: [0; 3],
                cells: HashMap::new(),
                occupied: Vec::new(),
            });
        }

        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for i in 0..n {
            let p = points.point(i);
            if !p.iter().all(|v| v.is_finite()) {
                return Err(GeometryError::computation(format!(
                    "point {i} has a non-finite coordinate {p:?}"
                )));
            }
            for a in 0..3 {
                min[a] = min[a].min(p[a] as f64);
                max[a] = max[a].max(p[a] as f64);
            }
        }

        let inv = cell_size.map(|c| 1.0 / c as f64);
        let mut floor_min = [0i64; 3];
        let mut dims = [0usize; 3];
        let too_large = || {
            GeometryError::invalid(format!(
                "cell size {cell_size:?} is too small for the extent of the points"
            ))
        };
        for a in 0..3 {
            let half = 0.5 * cell_size[a] as f64;
            let lo = ((min[a] - half) * inv[a]).floor();
            let hi = ((max[a] + half) * inv[a]).floor();
            if lo.abs() > MAX_CELL_COORD || hi.abs() > MAX_CELL_COORD {
                return Err(too_large());
            }
            floor_min[a] = lo as i64;
            dims[a] = (hi as i64 - lo as i64 + 1) as usize;
        }
        dims[0]
            .checked_mul(dims[1])
            .and_then(|v| v.checked_mul(dims[2]))
            .ok_or_else(too_large)?;

        log::debug!("uniform grid: {n} points, dims {dims:?}, cell size {cell_size:?}");

        let mut cells: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut ticker = Ticker::new(progress, "Mapping points to cells", n);
        for i in 0..n {
            let p = points.point(i);
            let mut ijk = [0usize; 3];
            for a in 0..3 {
                let c = ((p[a] as f64 * inv[a]).floor() as i64 - floor_min[a])
                    // rounding at the upper boundary
                    .clamp(0, dims[a] as i64 - 1);
                ijk[a] = c as usize;
            }
            let index = ijk[0] + ijk[1] * dims[0] + ijk[2] * dims[0] * dims[1];
            cells.entry(index).or_default().push(i);
            ticker.tick(i)?;
        }
        ticker.finish()?;

        let mut occupied: Vec<usize> = cells.keys().copied().collect();
        occupied.sort_unstable();

        Ok(Self {
            cell_size,
            floor_min,
            dims,
            cells,
            occupied,
        })
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn cell_size(&self) -> [f32; 3] {
        self.cell_size
    }

    /// Minimum corner of cell `(0, 0, 0)`.
    pub fn origin(&self) -> [f32; 3] {
        let mut o = [0.0f32; 3];
        for a in 0..3 {
            o[a] = (self.floor_min[a] as f64 * self.cell_size[a] as f64) as f32;
        }
        o
    }

    /// Total number of cells, empty or not.
    pub fn num_cells(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    pub fn num_occupied(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn linear_index(&self, [x, y, z]: [usize; 3]) -> usize {
        x + y * self.dims[0] + z * self.dims[0] * self.dims[1]
    }

    pub fn cell_coords(&self, index: usize) -> [usize; 3] {
        let plane = self.dims[0] * self.dims[1];
        [
            index % self.dims[0],
            (index / self.dims[0]) % self.dims[1],
            index / plane,
        ]
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.cells.contains_key(&index)
    }

    /// Point indices binned into `index`, in input order. Empty for
    /// unoccupied cells.
    pub fn points_in_cell(&self, index: usize) -> &[usize] {
        self.cells.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Occupied cells in ascending linear index, which is z-major, then y,
    /// then x.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.occupied
            .iter()
            .map(move |&idx| (idx, self.points_in_cell(idx)))
    }

    /// Linear indices of the in-bounds neighbours of the cell at `coords`, in
    /// [`NEIGHBOR_OFFSETS`] order.
    pub fn neighbors(&self, coords: [usize; 3]) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |off| {
            let mut n = [0usize; 3];
            for a in 0..3 {
                let c = coords[a] as i64 + off[a];
                if c < 0 || c >= self.dims[a] as i64 {
                    return None;
                }
                n[a] = c as usize;
            }
            Some(self.linear_index(n))
        })
    }

    /// World-space `[min, max)` bounds of a cell, in `f64`.
    pub fn cell_bounds(&self, index: usize) -> ([f64; 3], [f64; 3]) {
        let ijk = self.cell_coords(index);
        let mut lo = [0.0f64; 3];
        let mut hi = [0.0f64; 3];
        for a in 0..3 {
            let cs = self.cell_size[a] as f64;
            let k = self.floor_min[a] + ijk[a] as i64;
            lo[a] = k as f64 * cs;
            hi[a] = (k + 1) as f64 * cs;
        }
        (lo, hi)
    }
}

fn validate_cell_size(cell_size: [f32; 3]) -> Result<()> {
    if cell_size.iter().all(|c| c.is_finite() && *c > 0.0) {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "cell size must be > 0 and finite on every axis, got {cell_size:?}"
        )))
    }
}
