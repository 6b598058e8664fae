use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kubus::math::{Mat4, Vec4};
use kubus::render::{FrameBuffer, ScanlineRasterizer, FAR_DEPTH};
use kubus::{Bitmap, Mesh, Projection, Renderer, Transform, Vertex};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffers() -> (Vec<u32>, Vec<f32>) {
    let size = (BUFFER_WIDTH * BUFFER_HEIGHT) as usize;
    (vec![0u32; size], vec![FAR_DEPTH; size])
}

fn screen_vertex(x: f32, y: f32, u: f32, v: f32, w: f32) -> Vertex {
    Vertex::new(Vec4::new(x, y, 0.5, w), Vec4::new(u, v, 0.0, 0.0))
}

fn small_triangle() -> [Vertex; 3] {
    [
        screen_vertex(100.0, 100.0, 0.0, 0.0, 1.0),
        screen_vertex(120.0, 100.0, 1.0, 0.0, 1.5),
        screen_vertex(110.0, 120.0, 0.5, 1.0, 2.0),
    ]
}

fn medium_triangle() -> [Vertex; 3] {
    [
        screen_vertex(100.0, 100.0, 0.0, 0.0, 1.0),
        screen_vertex(300.0, 100.0, 1.0, 0.0, 1.5),
        screen_vertex(200.0, 300.0, 0.5, 1.0, 2.0),
    ]
}

fn large_triangle() -> [Vertex; 3] {
    [
        screen_vertex(50.0, 50.0, 0.0, 0.0, 1.0),
        screen_vertex(750.0, 100.0, 1.0, 0.0, 1.5),
        screen_vertex(400.0, 550.0, 0.5, 1.0, 2.0),
    ]
}

fn checker_texture() -> Bitmap {
    let texels = (0..64 * 64)
        .map(|i| if (i % 64 + i / 64) % 2 == 0 { 0xFFFFFFFF } else { 0xFF000000 })
        .collect();
    Bitmap::from_pixels(64, 64, texels).expect("64x64 texels")
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let texture = checker_texture();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let (mut color, mut depth) = create_buffers();
            b.iter(|| {
                depth.fill(FAR_DEPTH);
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                let [v0, v1, v2] = black_box(tri);
                scanline.fill_triangle(v0, v1, v2, &texture, &mut fb)
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let scanline = ScanlineRasterizer::new();
    let texture = checker_texture();

    // Generate a grid of small triangles
    let triangles: Vec<[Vertex; 3]> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                [
                    screen_vertex(x, y, 0.0, 0.0, 1.0),
                    screen_vertex(x + 35.0, y, 1.0, 0.0, 1.0),
                    screen_vertex(x + 17.5, y + 25.0, 0.5, 1.0, 1.0),
                ]
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let (mut color, mut depth) = create_buffers();
        b.iter(|| {
            depth.fill(FAR_DEPTH);
            let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
            for [v0, v1, v2] in &triangles {
                scanline.fill_triangle(black_box(v0), v1, v2, &texture, &mut fb);
            }
        });
    });

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
    let texture = checker_texture();
    let cube = Mesh::cube();
    let projection = Projection::from_degrees(60.0, 800.0 / 600.0, 0.1, 100.0);
    let mut transform = Transform::new();
    transform.set_position_xyz(0.0, 0.0, 4.0).set_rotation_xyz(0.4, 0.7, 0.0);
    let model = transform.to_matrix();
    let view_projection: Mat4 = projection.matrix();

    c.bench_function("cube_frame", |b| {
        b.iter(|| {
            renderer.fill(0xFF000000);
            renderer.clear_depth_buffer();
            cube.draw(&mut renderer, black_box(&view_projection), &model, &texture)
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_cube_frame
);
criterion_main!(benches);
