use criterion::{black_box, criterion_group, criterion_main, Criterion};

use map_projections::distortion::compute_distortion;
use map_projections::grid::{globe_uniform_grid, map_image_grid, project_grid, regular_grid};
use map_projections::proj::tobler::Tobler;
use map_projections::rotation::AspectPreset;
use map_projections::{DistortionConfig, ObliqueProjection, Pole, Projection, ProjectionKind};

fn sample_points(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            ((t * 2.0 - 1.0) * 1.4, (t * 37.0).sin() * 3.1)
        })
        .collect()
}

fn bench_project_throughput(c: &mut Criterion) {
    let points = sample_points(10_000);
    for kind in ProjectionKind::ALL {
        let proj = kind.configure_default();
        c.bench_function(&format!("project_{kind:?}_10k"), |b| {
            b.iter(|| {
                let mut coords = points.clone();
                proj.project_batch(&mut coords);
                black_box(coords)
            });
        });
    }
}

fn bench_inverse_iterative(c: &mut Criterion) {
    // kinds whose inverse runs Newton iterations
    let kinds = [
        ProjectionKind::Aitoff,
        ProjectionKind::WinkelTripel,
        ProjectionKind::VanDerGrinten,
        ProjectionKind::Magnifier,
        ProjectionKind::PeirceQuincuncial,
    ];
    let points = sample_points(2_000);
    for kind in kinds {
        let proj = kind.configure_default();
        let mut planes = points.clone();
        proj.project_batch(&mut planes);
        c.bench_function(&format!("inverse_{kind:?}_2k"), |b| {
            b.iter(|| {
                let mut coords = planes.clone();
                proj.inverse_batch(&mut coords);
                black_box(coords)
            });
        });
    }
}

fn bench_tobler_configure(c: &mut Criterion) {
    for &n in &[2_000, 20_000, 200_000] {
        c.bench_function(&format!("tobler_table_{n}"), |b| {
            b.iter(|| black_box(Tobler::with_resolution(0.2, 2.5, n)))
        });
    }
}

fn bench_map_image(c: &mut Criterion) {
    let proj = ObliqueProjection::new(
        ProjectionKind::Mollweide.configure_default(),
        AspectPreset::Jerusalem.pole(),
    );
    for &size in &[256, 512, 1024] {
        c.bench_function(&format!("map_image_mollweide_{size}"), |b| {
            b.iter(|| black_box(map_image_grid(&proj, size, true).unwrap()))
        });
    }
}

fn bench_distortion(c: &mut Criterion) {
    let config = DistortionConfig::default();
    let proj = ObliqueProjection::new(ProjectionKind::WinkelTripel.configure_default(), Pole::NORTH);
    let globe = globe_uniform_grid(0.02).unwrap();
    c.bench_function("distortion_winkel_globe_0.02", |b| {
        b.iter(|| black_box(compute_distortion(&proj, &globe, &config)))
    });

    let regular = regular_grid(1024, true).unwrap();
    c.bench_function("project_grid_winkel_1024", |b| {
        b.iter(|| black_box(project_grid(&proj, &regular)))
    });
}

fn bench_distortion_thread_scaling(c: &mut Criterion) {
    // Hammer at 512 columns with different thread counts
    let config = DistortionConfig::default();
    let proj = ProjectionKind::Hammer.configure_default();
    let grid = regular_grid(512, true).unwrap();

    for &threads in &[1, 2, 4, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        c.bench_function(&format!("distortion_threads_{threads}_hammer_512"), |b| {
            b.iter(|| black_box(pool.install(|| compute_distortion(&proj, &grid, &config))))
        });
    }
}

criterion_group!(
    benches,
    bench_project_throughput,
    bench_inverse_iterative,
    bench_tobler_configure,
    bench_map_image,
    bench_distortion,
    bench_distortion_thread_scaling,
);
criterion_main!(benches);
