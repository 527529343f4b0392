//! Benchmarks for the cloth solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use velvet_core::scene::SimpleClothScene;
use velvet_core::solver::ClothSolver;
use velvet_core::{ClothVertex, SimulationParameters};

fn bench_simple_scene(c: &mut Criterion) {
    c.bench_function("simple_scene_16x16_60_ticks", |b| {
        b.iter(|| {
            let mut scene = SimpleClothScene::with_resolution(16).unwrap();
            for _ in 0..60 {
                scene.tick();
            }
            scene.solver.average_height()
        });
    });
}

fn bench_heavy_solver(c: &mut Criterion) {
    c.bench_function("cloth_64x64_20_substeps_1_tick", |b| {
        let params = SimulationParameters::default()
            .with_substeps(20)
            .with_iterations(5);
        let mut solver = ClothSolver::with_resolution(64).unwrap();
        b.iter(|| {
            solver.step(black_box(1.0 / 60.0), &params, &mut []);
        });
    });
}

fn bench_vertex_output(c: &mut Criterion) {
    c.bench_function("vertex_output_64x64", |b| {
        let mut solver = ClothSolver::with_resolution(64).unwrap();
        let mut vertices: Vec<ClothVertex> = Vec::new();
        b.iter(|| {
            solver.write_vertices(&mut vertices);
            vertices.len()
        });
    });
}

criterion_group!(benches, bench_simple_scene, bench_heavy_solver, bench_vertex_output);
criterion_main!(benches);
