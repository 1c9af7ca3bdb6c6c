use crate::{Aabb, CloudView, GeometryError, PointSet, Result};

/// An owned point set stored as separate coordinate columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    /// # Panics
    ///
    /// Panics if the three columns differ in length.
    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self { x, y, z }
    }

    /// Copies an interleaved `x y z ...` buffer into columns.
    pub fn from_array(data: &[f32]) -> Result<Self> {
        let view = CloudView::from_interleaved_xyz(data)?;
        Ok(Self::from_points(view.iter_points()))
    }

    pub fn from_points(points: impl IntoIterator<Item = [f32; 3]>) -> Self {
        let mut cloud = Self::new();
        for p in points {
            cloud.push(p);
        }
        cloud
    }

    pub fn push(&mut self, p: [f32; 3]) {
        self.x.push(p[0]);
        self.y.push(p[1]);
        self.z.push(p[2]);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// The columns are public, so they can drift apart after construction.
    pub fn check_columns(&self) -> Result<()> {
        if self.y.len() != self.x.len() || self.z.len() != self.x.len() {
            return Err(GeometryError::invalid(format!(
                "coordinate columns differ in length: x {}, y {}, z {}",
                self.x.len(),
                self.y.len(),
                self.z.len()
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_xyz(&self.x, &self.y, &self.z)
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Arithmetic mean of all points, accumulated in `f64`.
    pub fn centroid(&self) -> Result<[f32; 3]> {
        if self.is_empty() {
            return Err(GeometryError::computation(
                "cannot average an empty point set",
            ));
        }
        let mut sum = [0.0f64; 3];
        for p in self.iter_points() {
            for a in 0..3 {
                sum[a] += p[a] as f64;
            }
        }
        let n = self.len() as f64;
        Ok([
            (sum[0] / n) as f32,
            (sum[1] / n) as f32,
            (sum[2] / n) as f32,
        ])
    }

    pub fn to_array(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for i in 0..self.len() {
            out.push(self.x[i]);
            out.push(self.y[i]);
            out.push(self.z[i]);
        }
        out
    }
}

impl PointSet for PointCloud {
    fn len(&self) -> usize {
        PointCloud::len(self)
    }

    fn point(&self, i: usize) -> [f32; 3] {
        PointCloud::point(self, i)
    }

    fn validate(&self) -> Result<()> {
        self.check_columns()
    }
}
