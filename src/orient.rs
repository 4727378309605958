use macroquad::prelude::*;

use crate::config;

/// Canonical forward axis a creature model faces before any reorientation.
pub const FORWARD: Vec3 = Vec3::Z;

/// Minimal rotation carrying the canonical forward axis onto `target`.
///
/// Degenerate targets resolve to the identity; an exactly opposed target is
/// a half-turn about a fixed fallback axis, since the cross product gives no
/// usable rotation axis there.
pub fn orientation_toward(target: Vec3) -> Quat {
    if target.length() < config::DISTANCE_EPSILON {
        return Quat::IDENTITY;
    }
    let target = target.normalize();
    let axis = FORWARD.cross(target);
    let axis_len = axis.length();
    let angle = FORWARD.dot(target).clamp(-1.0, 1.0).acos();

    if axis_len < config::DISTANCE_EPSILON {
        if angle < config::DISTANCE_EPSILON {
            return Quat::IDENTITY;
        }
        // Anti-parallel: any axis orthogonal to forward works.
        return Quat::from_axis_angle(Vec3::X, std::f32::consts::PI);
    }

    Quat::from_axis_angle(axis / axis_len, angle).normalize()
}
