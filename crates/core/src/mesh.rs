use crate::{Aabb, FaceAdjacency, GeometryError, Result};
use hashbrown::HashMap;

/// An indexed triangle mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Builds a mesh, checking that every triangle references existing vertices.
    pub fn new(vertices: Vec<[f32; 3]>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        let mesh = Self {
            vertices,
            triangles,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks that every triangle references existing vertices.
    ///
    /// The fields are public, so operations that index vertices call this
    /// again rather than trusting the constructor.
    pub fn validate(&self) -> Result<()> {
        let num_vertices = self.vertices.len();
        for (t, tri) in self.triangles.iter().enumerate() {
            if let Some(&v) = tri.iter().find(|&&v| v as usize >= num_vertices) {
                return Err(GeometryError::invalid(format!(
                    "triangle {t} references vertex {v} but the mesh has {num_vertices} vertices"
                )));
            }
        }
        Ok(())
    }

    /// Builds a mesh from flat host buffers (`3 * num_vertices` coordinates,
    /// `3 * num_triangles` indices).
    pub fn from_buffers(vertex_buf: &[f32], index_buf: &[u32]) -> Result<Self> {
        if vertex_buf.len() % 3 != 0 {
            return Err(GeometryError::invalid(format!(
                "vertex buffer length {} is not a multiple of 3",
                vertex_buf.len()
            )));
        }
        if index_buf.len() % 3 != 0 {
            return Err(GeometryError::invalid(format!(
                "index buffer length {} is not a multiple of 3",
                index_buf.len()
            )));
        }
        let vertices = vertex_buf
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        let triangles = index_buf
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(vertices, triangles)
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_vertices(&self, t: usize) -> [[f32; 3]; 3] {
        self.triangles[t].map(|v| self.vertices[v as usize])
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Appends another mesh, offsetting its vertex indices.
    pub fn append(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles
            .extend(other.triangles.iter().map(|t| t.map(|v| v + base)));
    }

    /// Per-triangle lists of triangles sharing an edge, ascending and without
    /// duplicates. Non-manifold edges connect every triangle using them.
    pub fn face_neighbors(&self) -> FaceNeighbors {
        let mut edge_faces: HashMap<(u32, u32), Vec<u32>> =
            HashMap::with_capacity(self.triangles.len() * 3 / 2);

        for (t, tri) in self.triangles.iter().enumerate() {
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                if a == b {
                    continue;
                }
                let key = if a < b { (a, b) } else { (b, a) };
                edge_faces.entry(key).or_default().push(t as u32);
            }
        }

        let mut offsets = Vec::with_capacity(self.triangles.len() + 1);
        let mut items = Vec::with_capacity(self.triangles.len() * 3);
        offsets.push(0);

        let mut scratch = Vec::new();
        for (t, tri) in self.triangles.iter().enumerate() {
            scratch.clear();
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                let key = if a < b { (a, b) } else { (b, a) };
                if let Some(faces) = edge_faces.get(&key) {
                    scratch.extend(faces.iter().copied().filter(|&f| f as usize != t));
                }
            }
            scratch.sort_unstable();
            scratch.dedup();
            items.extend_from_slice(&scratch);
            offsets.push(items.len());
        }

        FaceNeighbors { offsets, items }
    }
}

/// Compressed per-face adjacency lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaceNeighbors {
    offsets: Vec<usize>,
    items: Vec<u32>,
}

impl FaceNeighbors {
    pub fn from_lists(lists: &[Vec<u32>]) -> Self {
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut items = Vec::new();
        offsets.push(0);
        for list in lists {
            items.extend_from_slice(list);
            offsets.push(items.len());
        }
        Self { offsets, items }
    }

    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FaceAdjacency for FaceNeighbors {
    fn num_faces(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, face: usize) -> &[u32] {
        &self.items[self.offsets[face]..self.offsets[face + 1]]
    }
}
