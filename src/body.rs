use macroquad::prelude::*;

use crate::segment::{Axis, SegmentId, Skeleton};

/// One animated joint: a segment plus one signed sweep speed per axis
/// (degrees per tick). A zero speed leaves that axis alone.
#[derive(Clone, Copy, Debug)]
pub struct JointOscillator {
    pub segment: SegmentId,
    pub speed: [f32; 3],
}

/// A named creature skeleton plus the flat list of joints that oscillate
/// every tick.
pub struct ArticulatedBody {
    pub name: &'static str,
    pub skeleton: Skeleton,
    oscillators: Vec<JointOscillator>,
}

impl ArticulatedBody {
    pub fn new(name: &'static str, skeleton: Skeleton) -> Self {
        Self {
            name,
            skeleton,
            oscillators: Vec::new(),
        }
    }

    pub fn add_oscillator(&mut self, segment: SegmentId, speed: [f32; 3]) {
        self.oscillators.push(JointOscillator { segment, speed });
    }

    /// Advance the idle pose by one tick: every oscillating joint sweeps by
    /// its per-axis speed, and a speed is negated exactly when the clamped
    /// angle lands on a bound. Produces a triangle wave between the two
    /// extents, never overshooting, with no randomness.
    pub fn animation_update(&mut self) {
        for osc in &mut self.oscillators {
            for (i, axis) in Axis::ALL.into_iter().enumerate() {
                if osc.speed[i] == 0.0 {
                    continue;
                }
                self.skeleton.rotate(osc.segment, osc.speed[i], axis);
                if self.skeleton.segment(osc.segment).at_extent(axis) {
                    osc.speed[i] = -osc.speed[i];
                }
            }
        }
    }

    /// Recompute every segment's world transform below the given anchor
    /// (agent translation and facing).
    pub fn update_world_transforms(&mut self, anchor: Mat4) {
        self.skeleton.update_world_transforms(anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Segment, ShapeKind};

    fn one_joint_body(min: f32, max: f32, speed: f32) -> (ArticulatedBody, SegmentId) {
        let mut skel = Skeleton::new();
        let id = skel.add_root(Segment::new(
            Vec3::ZERO,
            0.4,
            ShapeKind::Sphere { radius: 0.1 },
            GRAY,
        ));
        skel.set_rotate_extent(id, Axis::U, min, max).unwrap();
        let mut body = ArticulatedBody::new("test", skel);
        body.add_oscillator(id, [speed, 0.0, 0.0]);
        (body, id)
    }

    #[test]
    fn oscillation_stays_within_extent_and_reverses() {
        let (mut body, id) = one_joint_body(0.0, 5.0, 1.0);

        let mut angles = Vec::new();
        for _ in 0..25 {
            body.animation_update();
            angles.push(body.skeleton.segment(id).angle(Axis::U));
        }

        assert!(angles.iter().all(|a| (0.0..=5.0).contains(a)));
        // Reaches the top bound, comes back to the bottom, heads up again.
        assert_eq!(angles[4], 5.0);
        assert_eq!(angles[9], 0.0);
        assert_eq!(angles[10], 1.0);
    }

    #[test]
    fn oscillation_is_deterministic() {
        let (mut a, id_a) = one_joint_body(-10.0, 10.0, 0.7);
        let (mut b, id_b) = one_joint_body(-10.0, 10.0, 0.7);

        for _ in 0..200 {
            a.animation_update();
            b.animation_update();
        }
        assert_eq!(
            a.skeleton.segment(id_a).angle(Axis::U),
            b.skeleton.segment(id_b).angle(Axis::U)
        );
    }

    #[test]
    fn zero_speed_axes_are_untouched() {
        let (mut body, id) = one_joint_body(0.0, 35.0, 0.5);
        for _ in 0..50 {
            body.animation_update();
        }
        assert_eq!(body.skeleton.segment(id).angle(Axis::V), 0.0);
        assert_eq!(body.skeleton.segment(id).angle(Axis::W), 0.0);
    }
}
