//! Orbit demo — wires the math core to the registry the way the renderer
//! would.
//!
//! Creates an entity with a [`Transformation`], spins it for a few frames,
//! and logs the model matrix plus the camera view/projection pair a
//! model-view-projection pipeline would consume.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prism_ecs::Registry;
use prism_math::{Mat4, Transformation, Vector3f};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("orbit=info".parse()?))
        .init();

    let mut registry = Registry::new();

    // The entity starts at (1, 0, 2) — the same smoke scenario the renderer
    // uses: a point at (1, 0, 0) in local space lands at (2, 0, 2) in world
    // space.
    let entity = registry.create();
    registry.attach(entity, Transformation::from_position(Vector3f::new(1.0, 0.0, 2.0)))?;
    info!(%entity, "spawned entity with transformation");

    if let Some(transform) = registry.get_mut::<Transformation>(entity) {
        let model = transform.matrix().transpose();
        let world = Vector3f::new(1.0, 0.0, 0.0).transform(&model);
        info!(local = %Vector3f::new(1.0, 0.0, 0.0), %world, "local point mapped to world space");
    }

    // Camera setup: view + projection with matching (right) handedness.
    let eye = Vector3f::new(0.0, 2.0, 6.0);
    let view = Mat4::look_at_rh(eye, Vector3f::ZERO, Vector3f::Y_AXIS)?;
    let projection = Mat4::perspective_rh(70.0, 16.0 / 9.0, 0.1, 1000.0);
    info!(row0 = ?view.row(0), "view matrix ready");
    info!(row0 = ?projection.row(0), "projection matrix ready");

    // Spin the entity; the cache only recomputes on frames that mutated it.
    for frame in 0..4_u32 {
        if let Some(transform) = registry.get_mut::<Transformation>(entity) {
            if frame % 2 == 0 {
                transform.set_rotation(Vector3f::new(0.0, 90.0 * frame as f32, 0.0));
            }
            let recomputed = transform.update();
            let model = transform.matrix();
            info!(frame, recomputed, translation = ?model.row(3), "frame model matrix");
        }
    }

    Ok(())
}
