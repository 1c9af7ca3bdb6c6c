#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod cloud_view;
pub mod error;
pub mod image;
pub mod mesh;
pub mod progress;
pub mod traits;

pub use bbox::Aabb;
pub use cloud::PointCloud;
pub use cloud_view::CloudView;
pub use error::{GeometryError, Result};
pub use image::ImageGeometry;
pub use mesh::{FaceNeighbors, TriangleMesh};
pub use progress::{check_cancelled, CancelFlag, Silent, Ticker};
pub use traits::{FaceAdjacency, PointSet, Progress};
