#![forbid(unsafe_code)]

pub mod box_counting;
pub mod regression;
pub mod roughness;

pub use box_counting::{
    minkowski_bouligand_dimension, minkowski_bouligand_dimension_with_progress, BoxCountingResult,
};
pub use regression::{fit_line, LinearFit};
pub use roughness::{
    surface_roughness, surface_roughness_from_boundary_cells,
    surface_roughness_from_boundary_cells_with_progress, RoughnessParams,
};
