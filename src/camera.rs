use macroquad::prelude::*;

use crate::config;

/// Orbit camera circling the tank center.
pub struct CameraController {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    smooth_yaw: f32,
    smooth_pitch: f32,
    smooth_distance: f32,
}

impl CameraController {
    pub fn new() -> Self {
        let (yaw, pitch, distance) = (0.7, 0.45, 7.0);
        Self {
            yaw,
            pitch,
            distance,
            smooth_yaw: yaw,
            smooth_pitch: pitch,
            smooth_distance: distance,
        }
    }

    pub fn update(&mut self, dt: f32) {
        // Arrow keys / WASD orbit
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            self.yaw -= config::CAMERA_ORBIT_SPEED * dt;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            self.yaw += config::CAMERA_ORBIT_SPEED * dt;
        }
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            self.pitch += config::CAMERA_ORBIT_SPEED * dt;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            self.pitch -= config::CAMERA_ORBIT_SPEED * dt;
        }
        self.pitch = self.pitch.clamp(-1.4, 1.4);

        // Scroll zoom
        let (_, scroll_y) = mouse_wheel();
        if scroll_y != 0.0 {
            let zoom_factor = 1.0 - scroll_y.signum() * config::CAMERA_ZOOM_SPEED;
            self.distance = (self.distance * zoom_factor)
                .clamp(config::CAMERA_DISTANCE_MIN, config::CAMERA_DISTANCE_MAX);
        }

        // Smooth interpolation
        let smooth = 1.0 - (-config::CAMERA_SMOOTH_SPEED * dt).exp();
        self.smooth_yaw += (self.yaw - self.smooth_yaw) * smooth;
        self.smooth_pitch += (self.pitch - self.smooth_pitch) * smooth;
        self.smooth_distance += (self.distance - self.smooth_distance) * smooth;
    }

    pub fn to_macroquad_camera(&self) -> Camera3D {
        let position = vec3(
            self.smooth_distance * self.smooth_pitch.cos() * self.smooth_yaw.sin(),
            self.smooth_distance * self.smooth_pitch.sin(),
            self.smooth_distance * self.smooth_pitch.cos() * self.smooth_yaw.cos(),
        );
        Camera3D {
            position,
            up: vec3(0.0, 1.0, 0.0),
            target: Vec3::ZERO,
            ..Default::default()
        }
    }
}
