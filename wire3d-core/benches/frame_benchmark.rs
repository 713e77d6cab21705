// benches/frame_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::f64::consts::PI;
use wire3d_core::{CameraState, Mesh, Projection, Rasterizer, Rgb, Surface, Vertex};

/// UV sphere of radius 1 centred five units in front of the camera.
fn sphere(stacks: u32, slices: u32) -> Mesh {
    let mut vertices = vec![Vertex::new(0.0, 1.0, -5.0)];
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            vertices.push(Vertex::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin() - 5.0,
            ));
        }
    }
    vertices.push(Vertex::new(0.0, -1.0, -5.0));

    let bottom = vertices.len() as i64;
    let ring = |i: u32, j: u32| (2 + (i - 1) * slices + j % slices) as i64;
    let mut faces = Vec::new();
    for j in 0..slices {
        faces.push([1, ring(1, j + 1), ring(1, j)]);
        faces.push([ring(stacks - 1, j), ring(stacks - 1, j + 1), bottom]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            faces.push([ring(i, j), ring(i, j + 1), ring(i + 1, j + 1)]);
            faces.push([ring(i, j), ring(i + 1, j + 1), ring(i + 1, j)]);
        }
    }

    Mesh::new(vertices, faces).unwrap()
}

fn frame_benchmark_fn(c: &mut Criterion) {
    let mesh = sphere(32, 64);
    let projection = Projection::new(70f64.to_radians(), 800, 600);
    let mut camera = CameraState::default();

    let mut group = c.benchmark_group("FrameOperations");

    group.bench_function("transform_sphere_2k_vertices", |b| {
        b.iter(|| projection.transform(black_box(&camera), black_box(mesh.vertices())))
    });

    group.bench_function("transform_and_rasterize_sphere", |b| {
        let mut surface = Surface::new(800, 600, Rgb::WHITE).with_colorkey(Rgb::WHITE);
        b.iter(|| {
            camera.azi += 0.001;
            surface.fill(Rgb::WHITE);
            let transformed = projection.transform(&camera, mesh.vertices());
            Rasterizer::draw_wireframe(
                black_box(&mut surface),
                mesh.faces(),
                &transformed,
                Rgb::BLACK,
                1,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, frame_benchmark_fn);
criterion_main!(benches);
