use crate::{GeometryError, PointSet, Result};

/// Borrowed view of an interleaved `x y z x y z ...` coordinate buffer.
#[derive(Debug, Clone, Copy)]
pub struct CloudView<'a> {
    data: &'a [f32],
    num_points: usize,
}

impl<'a> CloudView<'a> {
    pub fn from_interleaved_xyz(data: &'a [f32]) -> Result<Self> {
        if data.len() % 3 != 0 {
            return Err(GeometryError::invalid(format!(
                "interleaved xyz buffer length {} is not a multiple of 3",
                data.len()
            )));
        }
        Ok(Self {
            data,
            num_points: data.len() / 3,
        })
    }

    pub fn len(&self) -> usize {
        self.num_points
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        assert!(i < self.num_points, "index out of bounds");
        let base = i * 3;
        [self.data[base], self.data[base + 1], self.data[base + 2]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.data
            .chunks_exact(3)
            .take(self.num_points)
            .map(|c| [c[0], c[1], c[2]])
    }

    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }
}

impl PointSet for CloudView<'_> {
    fn len(&self) -> usize {
        self.num_points
    }

    fn point(&self, i: usize) -> [f32; 3] {
        CloudView::point(self, i)
    }
}
