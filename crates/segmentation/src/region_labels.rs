use geofilters_core::{Aabb, FaceAdjacency, GeometryError, Progress, Result, Silent, Ticker, TriangleMesh};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The flood-fill stack grows by this many entries at a time.
const STACK_CHUNK: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RegionLabelParams {
    /// Fold components whose bounding box lies strictly inside another
    /// component's box into the outermost enclosing component's label.
    pub merge_enclosed: bool,
}

impl Default for RegionLabelParams {
    fn default() -> Self {
        Self {
            merge_enclosed: true,
        }
    }
}


/// One edge-connected set of triangles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Component {
    /// Bounds of the component's vertices.
    pub bounds: Aabb,
    pub num_triangles: usize,
    /// The last component (in discovery order) whose box strictly contains
    /// this one's.
    pub enclosed_by: Option<usize>,
    /// Output label given to this component's triangles.
    pub label: u32,
}

/// Result of [`label_triangle_regions`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RegionLabeling {
    labels: Vec<u32>,
    num_regions: usize,
    components: Vec<Component>,
}

impl RegionLabeling {
    /// Per-triangle labels in `1..=num_regions`.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }

    /// Number of distinct output labels.
    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    /// Connected components in discovery order (component `c` was seeded
    /// from the lowest-indexed triangle not in components `0..c`).
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Triangles per output label, indexed by `label - 1`.
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.num_regions];
        for c in &self.components {
            sizes[c.label as usize - 1] += c.num_triangles;
        }
        sizes
    }
}

/// Labels the edge-connected regions of a triangle mesh.
///
/// Components are found by depth-first flood fill over `adjacency`, seeded in
/// triangle order. A component whose bounding box lies strictly inside
/// another's (on every axis) is recorded as enclosed by the last such
/// component; with [`RegionLabelParams::merge_enclosed`] its triangles then
/// take the label of the root of its enclosure chain. Surviving labels are
/// contiguous from 1 in discovery order.
///
/// The enclosure pass compares every pair of components, so it is quadratic
/// in the number of components.
pub fn label_triangle_regions<A: FaceAdjacency + ?Sized>(
    mesh: &TriangleMesh,
    adjacency: &A,
    params: &RegionLabelParams,
) -> Result<RegionLabeling> {
    label_triangle_regions_with_progress(mesh, adjacency, params, &mut Silent)
}

pub fn label_triangle_regions_with_progress<A, G>(
    mesh: &TriangleMesh,
    adjacency: &A,
    params: &RegionLabelParams,
    progress: &mut G,
) -> Result<RegionLabeling>
where
    A: FaceAdjacency + ?Sized,
    G: Progress + ?Sized,
{
    mesh.validate()?;
    let n = mesh.num_triangles();
    if adjacency.num_faces() != n {
        return Err(GeometryError::invalid(format!(
            "adjacency covers {} triangles but the mesh has {n}",
            adjacency.num_faces()
        )));
    }

    let region_of = flood_fill(adjacency, n, progress)?;
    let num_components = region_of.iter().copied().max().unwrap_or(0) as usize;

    let mut bounds = vec![Aabb::empty(); num_components];
    let mut sizes = vec![0usize; num_components];
    let mut non_finite = 0usize;
    for (t, &r) in region_of.iter().enumerate() {
        let c = r as usize - 1;
        sizes[c] += 1;
        for v in mesh.triangle_vertices(t) {
            if !bounds[c].expand_with_point(v) {
                non_finite += 1;
            }
        }
    }
    if non_finite > 0 {
        log::warn!("{non_finite} non-finite vertex references ignored in region bounds");
    }

    let enclosed_by = find_enclosures(&bounds, progress)?;

    // Strict containment is a strict order on boxes, so chains end.
    let root = |mut c: usize| {
        while let Some(outer) = enclosed_by[c] {
            c = outer;
        }
        c
    };

    let mut labels_of = vec![0u32; num_components];
    let mut next = 0u32;
    for c in 0..num_components {
        if !params.merge_enclosed || enclosed_by[c].is_none() {
            next += 1;
            labels_of[c] = next;
        }
    }
    if params.merge_enclosed {
        for c in 0..num_components {
            labels_of[c] = labels_of[root(c)];
        }
    }

    let labels: Vec<u32> = region_of.iter().map(|&r| labels_of[r as usize - 1]).collect();
    let components = (0..num_components)
        .map(|c| Component {
            bounds: bounds[c],
            num_triangles: sizes[c],
            enclosed_by: enclosed_by[c],
            label: labels_of[c],
        })
        .collect();

    log::debug!(
        "region labelling: {n} triangles, {num_components} components, {next} regions",
    );

    Ok(RegionLabeling {
        labels,
        num_regions: next as usize,
        components,
    })
}

/// Assigns 1-based component ids by iterative depth-first flood fill.
fn flood_fill<A, G>(adjacency: &A, n: usize, progress: &mut G) -> Result<Vec<u32>>
where
    A: FaceAdjacency + ?Sized,
    G: Progress + ?Sized,
{
    let mut region_of = vec![0u32; n];
    let mut stack: Vec<usize> = Vec::with_capacity(STACK_CHUNK.min(n.max(1)));
    let mut current = 0u32;

    let mut ticker = Ticker::new(progress, "Labeling connected regions", n);
    for seed in 0..n {
        ticker.tick(seed)?;
        if region_of[seed] != 0 {
            continue;
        }
        current += 1;
        region_of[seed] = current;
        stack.push(seed);

        while let Some(t) = stack.pop() {
            for &nb in adjacency.neighbors(t) {
                let nb = nb as usize;
                if nb >= n {
                    return Err(GeometryError::invalid(format!(
                        "triangle {t} lists neighbour {nb} but the mesh has {n} triangles"
                    )));
                }
                if region_of[nb] == 0 {
                    region_of[nb] = current;
                    if stack.len() == stack.capacity() {
                        stack.reserve_exact(STACK_CHUNK);
                    }
                    stack.push(nb);
                }
            }
        }
    }
    ticker.finish()?;

    Ok(region_of)
}

/// For each component, the last component whose box strictly contains it.
fn find_enclosures<G: Progress + ?Sized>(bounds: &[Aabb], progress: &mut G) -> Result<Vec<Option<usize>>> {
    let mut enclosed_by = vec![None; bounds.len()];
    let mut ticker = Ticker::new(progress, "Resolving enclosed regions", bounds.len());
    for (i, inner) in bounds.iter().enumerate() {
        for (j, outer) in bounds.iter().enumerate() {
            if inner.is_strictly_inside(outer) {
                enclosed_by[i] = Some(j);
            }
        }
        ticker.tick(i)?;
    }
    ticker.finish()?;
    Ok(enclosed_by)
}
