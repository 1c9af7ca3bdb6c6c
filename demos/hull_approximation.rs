use geofilters::prelude::*;

fn main() -> geofilters::Result<()> {
    // Solid 10x10x10 block sampled on a 0.25 lattice
    let steps = 41;
    let cloud = PointCloud::from_points((0..steps * steps * steps).map(|i| {
        let (x, y, z) = (i % steps, (i / steps) % steps, i / (steps * steps));
        [x as f32 * 0.25, y as f32 * 0.25, z as f32 * 0.25]
    }));
    println!("Original cloud: {} points", cloud.len());

    let grid = UniformGrid::build(&cloud, [1.0; 3])?;
    println!(
        "Grid: dims={:?}, {} of {} cells occupied",
        grid.dims(),
        grid.num_occupied(),
        grid.num_cells()
    );

    for k in [0, 1, 8, 17] {
        let params = HullParams {
            cell_size: [1.0; 3],
            min_empty_neighbors: k,
        };
        let hull = approximate_hull(&cloud, &params)?;
        println!("Hull (more than {k} empty neighbours): {} points", hull.len());
    }

    // Fractal dimension of the block's occupancy
    let image = regular_grid_for_cloud(&cloud, &GridMappingParams { dims: [31; 3] }, None)?;
    let mut mask = vec![false; image.num_cells()];
    for idx in map_points_to_grid(&cloud, &image, None)?.into_iter().flatten() {
        mask[idx] = true;
    }
    let result = minkowski_bouligand_dimension(&image, &mask)?;
    println!(
        "Box counting: edge={}, coverings={:?}, dimension={:.3}",
        result.edge, result.covering, result.dimension
    );
    Ok(())
}
