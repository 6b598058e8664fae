//! Demo: a spinning textured cube.
//!
//! Pass an image path (and optionally an OBJ path) to replace the built-in
//! checkerboard and cube: `kubus [texture.png] [model.obj]`.

mod window;

use log::info;

use kubus::prelude::*;
use window::{FrameLimiter, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};

const ROTATION_SPEED: f32 = 0.8; // radians per second
const CHECKER_SIZE: u32 = 8;

fn checkerboard() -> Result<Bitmap, AssetError> {
    let light = colors::gray(0xE0);
    let dark = colors::pack_argb(0xFF, 0x30, 0x60, 0xA0);
    let texels = (0..CHECKER_SIZE * CHECKER_SIZE)
        .map(|i| {
            let (x, y) = (i % CHECKER_SIZE, i / CHECKER_SIZE);
            if (x + y) % 2 == 0 {
                light
            } else {
                dark
            }
        })
        .collect();
    Bitmap::from_pixels(CHECKER_SIZE, CHECKER_SIZE, texels)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let texture = match args.next() {
        Some(path) => Bitmap::from_file_or_fallback(path),
        None => checkerboard()?,
    };
    let mesh = match args.next() {
        Some(path) => Mesh::from_obj_or_empty(path),
        None => Mesh::cube(),
    };
    info!("drawing {} triangles", mesh.triangle_count());

    let mut window = Window::new("kubus", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut renderer = Renderer::new(window.width(), window.height());
    let mut projection = Projection::from_degrees(
        60.0,
        window.width() as f32 / window.height() as f32,
        0.1,
        100.0,
    );
    let mut transform = Transform::new();
    transform.set_position_xyz(0.0, 0.0, 5.0);
    // Fit arbitrary models into the same 2-unit box as the cube.
    if let Some((lo, hi)) = mesh.bounds() {
        let extent = (hi - lo).max_component();
        if extent > 0.0 {
            transform.set_scale_uniform(2.0 / extent);
        }
    }

    let mut limiter = FrameLimiter::new(&window);
    let mut paused = false;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                renderer.resize(w, h);
                projection.set_viewport(w, h);
            }
            WindowEvent::TogglePause => paused = !paused,
            WindowEvent::None => {}
        }

        let delta = limiter.wait_and_get_delta(&window);
        if !paused {
            transform
                .rotate_x(ROTATION_SPEED * 0.5 * delta)
                .rotate_y(ROTATION_SPEED * delta);
        }

        renderer.fill(colors::BACKGROUND);
        renderer.clear_depth_buffer();
        mesh.draw(&mut renderer, &projection.matrix(), &transform.to_matrix(), &texture);

        window.present(renderer.as_bytes())?;
    }

    info!("exiting");
    Ok(())
}
