/// Indexed read access to a set of 3D points.
///
/// Implemented by the owned [`PointCloud`](crate::PointCloud) and the borrowed
/// [`CloudView`](crate::CloudView), so the filters run directly on host
/// buffers without copying them.
pub trait PointSet {
    fn len(&self) -> usize;

    fn point(&self, i: usize) -> [f32; 3];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that every index below `len` can be read.
    fn validate(&self) -> crate::Result<()> {
        Ok(())
    }
}

/// Per-triangle lists of edge-sharing triangles.
pub trait FaceAdjacency {
    /// Number of triangles the adjacency was built for.
    fn num_faces(&self) -> usize;

    /// Triangles sharing an edge with `face`.
    fn neighbors(&self, face: usize) -> &[u32];
}

impl FaceAdjacency for [Vec<u32>] {
    fn num_faces(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, face: usize) -> &[u32] {
        &self[face]
    }
}

impl FaceAdjacency for Vec<Vec<u32>> {
    fn num_faces(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, face: usize) -> &[u32] {
        &self[face]
    }
}

/// Cooperative cancellation and progress reporting.
///
/// Long loops poll [`should_cancel`](Progress::should_cancel) roughly every
/// percent of their work and report through
/// [`report_progress`](Progress::report_progress).
pub trait Progress {
    fn should_cancel(&self) -> bool {
        false
    }

    fn report_progress(&mut self, _stage: &str, _percent: u8) {}
}
