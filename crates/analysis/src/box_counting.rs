//! Minkowski–Bouligand (box-counting) dimension of a voxel mask.
//!
//! The mask is centred in the smallest power-of-two cube (or square, for a
//! mask with a unit-length axis) enclosing it, then halved repeatedly by
//! OR-reducing 2×2(×2) blocks until one cell remains. The dimension is the
//! least-squares slope of `ln(occupied cells)` against `ln(1 / edge)`.
//!
//! # Memory
//!
//! The working lattice has `E³` cells where `E` is the next power of two of
//! the largest image dimension. For a `513³` image that is `1024³` booleans,
//! roughly eight times the input. Coarser levels add at most a further
//! seventh.

use crate::regression::fit_line;
use geofilters_core::{check_cancelled, GeometryError, ImageGeometry, Progress, Result, Silent, Ticker};
use rayon::prelude::*;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Lattices with at least this many coarse cells are reduced in parallel.
const PARALLEL_CELLS: usize = 1 << 15;

/// Per-scale counts and the fitted dimension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoxCountingResult {
    /// Fitted slope, the dimension estimate. `0.0` for an empty mask.
    pub dimension: f64,
    /// 2 when the image has an axis of length 1, else 3.
    pub dimensionality: usize,
    /// Edge length of the finest lattice, a power of two.
    pub edge: usize,
    /// Lattice edge length per level: `edge, edge / 2, ..., 1`.
    pub box_sizes: Vec<usize>,
    /// Occupied cells per level, aligned with `box_sizes`. The last entry is
    /// 1 whenever the mask has any occupied voxel.
    pub covering: Vec<usize>,
}

/// Estimates the box-counting dimension of `mask` over `image`.
///
/// Requires isotropic spacing. The mask is indexed like the image
/// (`x + y * dims[0] + z * dims[0] * dims[1]`).
pub fn minkowski_bouligand_dimension(image: &ImageGeometry, mask: &[bool]) -> Result<BoxCountingResult> {
    minkowski_bouligand_dimension_with_progress(image, mask, &mut Silent)
}

pub fn minkowski_bouligand_dimension_with_progress<G: Progress + ?Sized>(
    image: &ImageGeometry,
    mask: &[bool],
    progress: &mut G,
) -> Result<BoxCountingResult> {
    if !image.is_isotropic() {
        return Err(GeometryError::invalid(format!(
            "box counting needs isotropic spacing, got {:?}",
            image.spacing
        )));
    }
    image.check_buffer_len(mask.len(), "mask")?;

    let (dims, dimensionality) = collapse_unit_axis(image.dims);
    let planar = dimensionality == 2;

    let max_dim = dims.iter().copied().max().unwrap_or(1);
    let edge = max_dim
        .checked_next_power_of_two()
        .ok_or_else(|| GeometryError::invalid(format!("image dimension {max_dim} is too large")))?;
    let exponent = edge.trailing_zeros() as usize;
    let lattice_len = edge.checked_pow(dimensionality as u32).ok_or_else(|| {
        GeometryError::invalid(format!(
            "a {dimensionality}-d lattice of edge {edge} does not fit in memory"
        ))
    })?;

    log::debug!(
        "box counting: image {:?} as {dimensionality}-d, lattice edge {edge} ({lattice_len} cells)",
        image.dims
    );

    let mut lattice = embed(mask, dims, edge, planar, lattice_len);
    check_cancelled(progress)?;

    let box_sizes: Vec<usize> = (0..=exponent).map(|i| edge >> i).collect();
    let mut covering = vec![0usize; exponent + 1];
    covering[0] = lattice.iter().filter(|&&b| b).count();
    log::trace!("level 0: edge {edge}, {} occupied", covering[0]);

    let mut ticker = Ticker::new(progress, "Coarsening lattice", exponent.max(1));
    for level in 1..exponent {
        lattice = coarsen(&lattice, box_sizes[level - 1], planar);
        covering[level] = lattice.iter().filter(|&&b| b).count();
        log::trace!(
            "level {level}: edge {}, {} occupied",
            box_sizes[level],
            covering[level]
        );
        ticker.tick(level)?;
    }
    ticker.finish()?;

    if covering[0] == 0 {
        log::debug!("box counting: mask is empty, dimension 0");
        return Ok(BoxCountingResult {
            dimension: 0.0,
            dimensionality,
            edge,
            box_sizes,
            covering,
        });
    }
    covering[exponent] = 1;

    if exponent == 0 {
        return Err(GeometryError::computation(
            "a single occupied voxel gives one scale, too few to fit a dimension",
        ));
    }

    // Box size i pairs with the covering count of level `exponent - i`.
    let xs: Vec<f64> = box_sizes.iter().map(|&e| (1.0 / e as f64).ln()).collect();
    let ys: Vec<f64> = (0..=exponent)
        .map(|i| (covering[exponent - i] as f64).ln())
        .collect();
    let dimension = fit_line(&xs, &ys)?.slope;

    log::debug!("box counting: covering {covering:?}, dimension {dimension}");

    Ok(BoxCountingResult {
        dimension,
        dimensionality,
        edge,
        box_sizes,
        covering,
    })
}

/// Drops a unit-length axis, keeping the remaining axes in memory order.
fn collapse_unit_axis(dims: [usize; 3]) -> ([usize; 3], usize) {
    if !dims.contains(&1) {
        return (dims, 3);
    }
    let collapsed = if dims[0] == 1 {
        [dims[1], dims[2], 1]
    } else if dims[1] == 1 {
        [dims[0], dims[2], 1]
    } else {
        [dims[0], dims[1], 1]
    };
    (collapsed, 2)
}

/// Copies the mask into the centre of an `edge`-sided lattice.
fn embed(mask: &[bool], dims: [usize; 3], edge: usize, planar: bool, lattice_len: usize) -> Vec<bool> {
    let mut offsets = [
        (edge - dims[0]) / 2,
        (edge - dims[1]) / 2,
        (edge - dims[2]) / 2,
    ];
    if planar {
        offsets[2] = 0;
    }

    let mut lattice = vec![false; lattice_len];
    for z in 0..dims[2] {
        for y in 0..dims[1] {
            let src = z * dims[1] * dims[0] + y * dims[0];
            let dst = (z + offsets[2]) * edge * edge + (y + offsets[1]) * edge + offsets[0];
            lattice[dst..dst + dims[0]].copy_from_slice(&mask[src..src + dims[0]]);
        }
    }
    lattice
}

/// Halves a lattice of edge `edge`: a coarse cell is set iff any of its
/// 4 (planar) or 8 children is set.
fn coarsen(fine: &[bool], edge: usize, planar: bool) -> Vec<bool> {
    let half = edge / 2;
    let depth = if planar { 1 } else { half };
    let slice = half * half;
    let child_layers = if planar { 1 } else { 2 };

    let reduce_slice = |z: usize, out: &mut [bool]| {
        for y in 0..half {
            for x in 0..half {
                let mut any = false;
                'children: for dz in 0..child_layers {
                    for dy in 0..2 {
                        let row = (2 * z + dz) * edge * edge + (2 * y + dy) * edge + 2 * x;
                        if fine[row] || fine[row + 1] {
                            any = true;
                            break 'children;
                        }
                    }
                }
                out[y * half + x] = any;
            }
        }
    };

    let mut coarse = vec![false; slice * depth];
    if coarse.len() >= PARALLEL_CELLS {
        coarse
            .par_chunks_mut(slice)
            .enumerate()
            .for_each(|(z, out)| reduce_slice(z, out));
    } else {
        coarse
            .chunks_mut(slice)
            .enumerate()
            .for_each(|(z, out)| reduce_slice(z, out));
    }
    coarse
}
