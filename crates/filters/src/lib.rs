#![forbid(unsafe_code)]

pub mod grid_mapping;
pub mod hull;

pub use grid_mapping::{
    map_points_to_grid, map_points_to_grid_with_progress, regular_grid_for_cloud, GridMappingParams,
};
pub use hull::{
    approximate_hull, approximate_hull_with_progress, retained_cells, retained_cells_with_progress,
    HullParams,
};
