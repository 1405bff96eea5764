//! Headless demo: records a typical tracking debug scene and reports what the
//! renderer would receive.
//!
//! `cargo run --example fiducials_demo`
//!
//! Run with `RUST_LOG=debug` to see per-batch logging from the canvas.

use anyhow::{Context, Result};
use cgmath::{Deg, SquareMatrix};
use fiducials_draw::prelude::*;
use log::{info, warn};

fn record_scene(canvas: &mut Canvas) -> Result<()> {
    draw_grid(canvas)?;
    draw_axis(canvas, 1.0)?;

    // Camera looking at the target from above, tilted a little.
    let k = Matrix3::new(520.0, 0.0, 0.0, 0.0, 520.0, 0.0, 320.0, 240.0, 1.0);
    let k_inv = k.invert().context("intrinsics are singular")?;
    let t_wc = RigidTransform::new(Basis3::from_angle_x(Deg(170.0)), Vector3::new(0.5, 0.5, 2.0));
    canvas.set_color(Color::YELLOW);
    draw_frustum_at(canvas, &k_inv, 640, 480, &t_wc, 0.2)?;
    canvas.with_frame(&t_wc, |c| draw_axis(c, 0.1))?;

    let target = Target::grid(5, 7, 0.1, 0.03)?;
    let style = TargetStyle::default().with_saturation(0.8);
    draw_target(canvas, &target, Vector2::new(0.0, 0.0), &style)?;

    // Observations that were identified against the target, plus a miss.
    let map = [3, -1, 17, 34];
    draw_target_remapped(canvas, &map, &target, Vector2::new(0.0, 0.0), &style.with_value(0.5))?;

    canvas.set_color(Color::WHITE);
    draw_plane(canvas, &Plane::new(Vector3::new(0.0, -1.0, 0.0), 1.0), 0.25, 4)?;

    // Image-space overlays.
    draw_rectangle(canvas, &Rect::new(10, 10, 630, 470))?;
    let radius = canvas.style().cross_radius;
    draw_cross(canvas, 320.0, 240.0, radius)?;
    draw_circle(canvas, Vector2::new(320.0, 240.0), 12.0)?;

    canvas.set_pixel_transfer_scale(1.5)?;
    let thumbnail = vec![96u8; 8 * 8 * 4];
    canvas.blit_image([0.0, 0.0], 8, 8, &thumbnail)?;
    canvas.set_pixel_transfer_scale(1.0)?;

    // A plane facing +z has no well-defined basis.
    if let Err(err) = draw_plane(canvas, &Plane::new(Vector3::unit_z(), 0.0), 1.0, 2) {
        warn!("skipping plane: {}", err);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut canvas = Canvas::new();
    record_scene(&mut canvas)?;
    let list = canvas.finish()?;

    info!(
        "recorded {} segments, {} points, {} images",
        list.line_count(),
        list.point_count(),
        list.images().len()
    );
    Ok(())
}
