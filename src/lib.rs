//! Grid-based geometry filters over point clouds, voxel masks and triangle
//! meshes.
//!
//! - [`spatial`]: uniform grid binning with 26-neighbour lookups.
//! - [`filters`]: voxel-grid hull approximation and point-to-grid mapping.
//! - [`analysis`]: box-counting dimension, surface roughness and the
//!   least-squares line they share.
//! - [`segmentation`]: connected-region labelling of triangle meshes.
//!
//! Every operation returns [`GeometryError`] on bad input and has a
//! `*_with_progress` variant that reports through a [`Progress`] and stops
//! with [`GeometryError::Cancelled`] when asked to.

#![forbid(unsafe_code)]

pub use geofilters_analysis as analysis;
pub use geofilters_core as core;
pub use geofilters_filters as filters;
pub use geofilters_segmentation as segmentation;
pub use geofilters_spatial as spatial;

pub use geofilters_core::{
    Aabb, CancelFlag, CloudView, FaceAdjacency, FaceNeighbors, GeometryError, ImageGeometry,
    PointCloud, PointSet, Progress, Result, Silent, TriangleMesh,
};

pub mod prelude {
    pub use geofilters_analysis::{
        fit_line, minkowski_bouligand_dimension, surface_roughness,
        surface_roughness_from_boundary_cells, BoxCountingResult, LinearFit, RoughnessParams,
    };
    pub use geofilters_core::{
        Aabb, CancelFlag, CloudView, FaceAdjacency, GeometryError, ImageGeometry, PointCloud,
        PointSet, Progress, Silent, TriangleMesh,
    };
    pub use geofilters_filters::{
        approximate_hull, map_points_to_grid, regular_grid_for_cloud, GridMappingParams,
        HullParams,
    };
    pub use geofilters_segmentation::{label_triangle_regions, RegionLabelParams, RegionLabeling};
    pub use geofilters_spatial::UniformGrid;
}
