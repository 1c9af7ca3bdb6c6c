use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geofilters_core::PointCloud;
use geofilters_spatial::UniformGrid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_cloud(n: usize, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Vec<f32> = (0..n).map(|_| rng.gen_range(0.0f32..100.0)).collect();
    let y: Vec<f32> = (0..n).map(|_| rng.gen_range(0.0f32..100.0)).collect();
    let z: Vec<f32> = (0..n).map(|_| rng.gen_range(0.0f32..100.0)).collect();
    PointCloud::from_xyz(x, y, z)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform_grid_build");
    for size in [100_000, 1_000_000] {
        let cloud = random_cloud(size, 42);
        group.bench_with_input(BenchmarkId::new("geofilters", size), &cloud, |b, cloud| {
            b.iter(|| UniformGrid::build(cloud, [1.0; 3]))
        });
    }
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform_grid_neighbors");
    for size in [100_000, 1_000_000] {
        let cloud = random_cloud(size, 42);
        let grid = UniformGrid::build(&cloud, [1.0; 3]).unwrap();
        group.bench_with_input(BenchmarkId::new("geofilters", size), &grid, |b, grid| {
            b.iter(|| {
                grid.occupied_cells()
                    .map(|(idx, _)| {
                        grid.neighbors(grid.cell_coords(idx))
                            .filter(|&n| grid.is_occupied(n))
                            .count()
                    })
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_neighbors);
criterion_main!(benches);
