#![forbid(unsafe_code)]

pub mod region_labels;

pub use region_labels::{
    label_triangle_regions, label_triangle_regions_with_progress, Component, RegionLabelParams,
    RegionLabeling,
};
