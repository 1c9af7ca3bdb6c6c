#![forbid(unsafe_code)]

pub mod uniform_grid;

pub use uniform_grid::{UniformGrid, NEIGHBOR_OFFSETS};
