use crate::{GeometryError, Result};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A regular voxel grid: per-axis cell counts, cell spacing and the
/// position of the grid's minimum corner.
///
/// Cells are stored x-fastest: `index = x + y * dims[0] + z * dims[0] * dims[1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ImageGeometry {
    pub dims: [usize; 3],
    pub spacing: [f32; 3],
    pub origin: [f32; 3],
}

impl ImageGeometry {
    pub fn new(dims: [usize; 3], spacing: [f32; 3], origin: [f32; 3]) -> Self {
        Self {
            dims,
            spacing,
            origin,
        }
    }

    /// Unit spacing, origin at zero.
    pub fn with_dims(dims: [usize; 3]) -> Self {
        Self::new(dims, [1.0; 3], [0.0; 3])
    }

    pub fn num_cells(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// `None` when the cell count does not fit in `usize`.
    pub fn checked_num_cells(&self) -> Option<usize> {
        self.dims[0].checked_mul(self.dims[1])?.checked_mul(self.dims[2])
    }

    pub fn is_isotropic(&self) -> bool {
        self.spacing[0] == self.spacing[1] && self.spacing[1] == self.spacing[2]
    }

    /// Checks that the grid is non-degenerate and that `len` matches the
    /// number of cells.
    pub fn check_buffer_len(&self, len: usize, what: &str) -> Result<()> {
        if self.dims.contains(&0) {
            return Err(GeometryError::invalid(format!(
                "image dimensions must be >= 1 on every axis, got {:?}",
                self.dims
            )));
        }
        let Some(cells) = self.checked_num_cells() else {
            return Err(GeometryError::invalid(format!(
                "image dimensions {:?} overflow the cell count",
                self.dims
            )));
        };
        if len != cells {
            return Err(GeometryError::invalid(format!(
                "{what} has {len} values but the image has {cells} cells"
            )));
        }
        Ok(())
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

    /// World-space centre of a cell.
    pub fn cell_center(&self, index: usize) -> [f64; 3] {
        let ijk = self.cell_coords(index);
        let mut c = [0.0f64; 3];
        for a in 0..3 {
            c[a] = self.origin[a] as f64 + (ijk[a] as f64 + 0.5) * self.spacing[a] as f64;
        }
        c
    }
}
