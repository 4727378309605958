use macroquad::prelude::*;

use crate::body::ArticulatedBody;
use crate::camera::CameraController;
use crate::segment::ShapeKind;
use crate::stats::VivariumStats;
use crate::vivarium::VivariumState;

/// Render one frame: tank shell, every live body's segments from their
/// cached world transforms, and optional bounding-sphere overlays.
pub fn draw(viv: &VivariumState, camera: &CameraController, show_bounds: bool) {
    clear_background(Color::new(0.04, 0.06, 0.09, 1.0));
    set_camera(&camera.to_macroquad_camera());

    draw_cube_wires(Vec3::ZERO, viv.tank.dimensions, SKYBLUE);

    for (slot, agent) in viv.arena.iter_alive() {
        if let Some(body) = viv.bodies[slot].as_ref() {
            draw_body(body);
        }
        if show_bounds {
            draw_sphere_wires(
                agent.pos,
                agent.bound_radius,
                None,
                Color::new(1.0, 1.0, 1.0, 0.25),
            );
        }
    }

    set_default_camera();
}

fn draw_body(body: &ArticulatedBody) {
    for (id, seg) in body.skeleton.segments() {
        if !seg.visible {
            continue;
        }
        let world = body.skeleton.world_transform(id);
        match seg.shape {
            ShapeKind::Sphere { radius } => {
                // Geometry sits ahead of the pivot along local +Z.
                let center = world.transform_point3(vec3(0.0, 0.0, seg.length * 0.5));
                draw_sphere(center, radius, None, seg.color);
            }
            ShapeKind::Box { half } => {
                let origin = world.transform_point3(vec3(-half.x, -half.y, 0.0));
                let e1 = world.transform_vector3(vec3(2.0 * half.x, 0.0, 0.0));
                let e2 = world.transform_vector3(vec3(0.0, 2.0 * half.y, 0.0));
                let e3 = world.transform_vector3(vec3(0.0, 0.0, 2.0 * half.z));
                draw_affine_parallelepiped(origin, e1, e2, e3, None, seg.color);
            }
        }
    }
}

/// 2D overlay drawn after the 3D pass.
pub fn draw_hud(viv: &VivariumState, stats: &VivariumStats) {
    let lines = [
        format!("tick {}", viv.tick_count),
        format!(
            "prey {}   predators {}   eaten {}",
            viv.prey_count(),
            viv.predator_count(),
            viv.total_predations
        ),
        format!(
            "mean predator step {:.4}",
            stats.predator_step.last().unwrap_or(0.0)
        ),
        "space pause  p/o spawn  b bounds  wasd orbit  scroll zoom".to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 12.0, 24.0 + 20.0 * i as f32, 20.0, WHITE);
    }
}
