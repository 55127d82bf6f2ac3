//! Criterion benchmarks for building meshes and population aggregation.
//!
//! Run with: cargo bench --bench mesh_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hexstead::city::{population_cap, BuildingInstance, BuildingType, Level};
use hexstead::renderer::{create_mesh, update_mesh};
use hexstead::spatial::HexCoord;

// ---------------------------------------------------------------------------
// Benchmark: mesh creation and in-place update
// ---------------------------------------------------------------------------

fn bench_meshes(c: &mut Criterion) {
    let mut group = c.benchmark_group("building_mesh");

    group.bench_function("create_all_kinds", |b| {
        b.iter(|| {
            for kind in BuildingType::ALL {
                black_box(create_mesh(kind, black_box(HexCoord::new(3, -2)), 1, Level::Two));
            }
        });
    });

    let mut node = create_mesh(BuildingType::MageTower, HexCoord::new(0, 0), 5, Level::One);
    group.bench_function("update_in_place", |b| {
        b.iter(|| update_mesh(&mut node, BuildingType::MageTower, black_box(3)));
    });

    group.bench_function("tessellate_cylinder", |b| {
        b.iter(|| black_box(node.geometry.tessellate()));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: population cap over a large settlement
// ---------------------------------------------------------------------------

fn bench_population_cap(c: &mut Criterion) {
    let origin = HexCoord::new(0, 0);
    let buildings: Vec<BuildingInstance> = origin
        .hexes_in_range(20)
        .into_iter()
        .enumerate()
        .map(|(i, coord)| {
            let mut b = BuildingInstance::new(BuildingType::ALL[i % 8], coord);
            b.turns_remaining = (i % 3) as u32;
            b
        })
        .collect();

    c.bench_function("population_cap_1261_buildings", |b| {
        b.iter(|| black_box(population_cap(black_box(&buildings))));
    });
}

criterion_group!(benches, bench_meshes, bench_population_cap);
criterion_main!(benches);
