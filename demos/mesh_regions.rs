use geofilters::prelude::*;

fn tetrahedron(offset: [f32; 3], scale: f32) -> TriangleMesh {
    let v = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        .map(|p: [f32; 3]| [0usize, 1, 2].map(|a| offset[a] + p[a] * scale));
    TriangleMesh {
        vertices: v.to_vec(),
        triangles: vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
    }
}

fn main() -> geofilters::Result<()> {
    // Two separate parts; the first holds a smaller shell inside it
    let mut mesh = tetrahedron([0.0; 3], 4.0);
    mesh.append(&tetrahedron([0.5; 3], 1.0));
    mesh.append(&tetrahedron([10.0, 0.0, 0.0], 2.0));
    println!("Mesh: {} vertices, {} triangles", mesh.num_vertices(), mesh.num_triangles());

    let adjacency = mesh.face_neighbors();
    for merge_enclosed in [false, true] {
        let labeling = label_triangle_regions(&mesh, &adjacency, &RegionLabelParams { merge_enclosed })?;
        println!(
            "merge_enclosed={merge_enclosed}: {} regions, sizes {:?}",
            labeling.num_regions(),
            labeling.region_sizes()
        );
        for (i, c) in labeling.components().iter().enumerate() {
            println!(
                "  component {i}: {} triangles, label {}, enclosed by {:?}",
                c.num_triangles, c.label, c.enclosed_by
            );
        }
        println!("  labels: {:?}", labeling.labels());
    }
    Ok(())
}
