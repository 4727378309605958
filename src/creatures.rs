use macroquad::prelude::*;

use crate::body::ArticulatedBody;
use crate::config;
use crate::segment::{Axis, Segment, SegmentId, ShapeKind, Skeleton};

/// Four chained links forming one swimming limb. Each link pivots at its
/// near end and carries the next link at its far end.
fn add_limb(
    skel: &mut Skeleton,
    parent: SegmentId,
    link_length: f32,
    mirrored: bool,
) -> Result<Vec<SegmentId>, String> {
    let half = vec3(link_length / 8.0, link_length / 8.0, link_length / 2.0);
    let colors = [ORANGE, GOLD, BEIGE, YELLOW];

    let mut links = Vec::with_capacity(4);
    let mut attach = parent;
    for (i, color) in colors.into_iter().enumerate() {
        let offset = if i == 0 {
            Vec3::ZERO
        } else {
            vec3(0.0, 0.0, link_length)
        };
        let link = skel.add_child(
            attach,
            Segment::new(offset, link_length, ShapeKind::Box { half }, color),
        );
        skel.set_rotate_extent(link, Axis::U, 0.0, 35.0)?;
        skel.set_rotate_extent(link, Axis::V, -45.0, 45.0)?;
        skel.set_rotate_extent(link, Axis::W, -45.0, 45.0)?;
        links.push(link);
        attach = link;
    }

    if mirrored {
        // Flip the limb root through the head so the pair sweeps symmetrically.
        skel.set_default_angle(links[0], Axis::U, 180.0);
        skel.set_default_angle(links[0], Axis::V, 180.0);
    }
    Ok(links)
}

/// Prey: a head with two eyes and two mirrored four-link limbs that paddle
/// between their joint extents.
pub fn prey() -> Result<ArticulatedBody, String> {
    let mut skel = Skeleton::new();

    let head = skel.add_root(Segment::new(
        Vec3::ZERO,
        0.2,
        ShapeKind::Sphere { radius: 0.15 },
        SKYBLUE,
    ));
    for x in [0.06, -0.06] {
        skel.add_child(
            head,
            Segment::new(
                vec3(x, 0.08, 0.12),
                0.05,
                ShapeKind::Sphere { radius: 0.03 },
                WHITE,
            ),
        );
    }

    let limb_a = add_limb(&mut skel, head, 0.1, false)?;
    let limb_b = add_limb(&mut skel, head, 0.1, true)?;

    let mut body = ArticulatedBody::new("prey", skel);
    for link in limb_a.into_iter().chain(limb_b) {
        body.add_oscillator(link, [config::PREY_LIMB_SWING_SPEED, 0.0, 0.0]);
    }
    Ok(body)
}

/// Predator: a larger body with a head, eyes and two swinging legs hung from
/// pivot joints. The body rests yawed 90 degrees so it leads with its flank.
pub fn predator() -> Result<ArticulatedBody, String> {
    let mut skel = Skeleton::new();

    let torso = skel.add_root(Segment::new(
        Vec3::ZERO,
        0.5,
        ShapeKind::Sphere { radius: 0.3 },
        GREEN,
    ));
    skel.set_default_angle(torso, Axis::V, 90.0);

    let head = skel.add_child(
        torso,
        Segment::new(
            vec3(0.0, 0.15, 0.25),
            0.2,
            ShapeKind::Sphere { radius: 0.15 },
            GREEN,
        ),
    );
    for x in [0.07, -0.07] {
        skel.add_child(
            head,
            Segment::new(
                vec3(x, 0.1, 0.05),
                0.05,
                ShapeKind::Sphere { radius: 0.04 },
                WHITE,
            ),
        );
    }

    let mut body = ArticulatedBody::new("predator", skel);
    for x in [0.15, -0.15] {
        let pivot = body.skeleton.add_child(
            torso,
            Segment::new(
                vec3(x, -0.1, -0.15),
                0.02,
                ShapeKind::Sphere { radius: 0.01 },
                DARKGREEN,
            ),
        );
        body.skeleton
            .set_rotate_extent(pivot, Axis::U, -35.0, 35.0)?;
        body.skeleton.add_child(
            pivot,
            Segment::new(
                Vec3::ZERO,
                0.25,
                ShapeKind::Box {
                    half: vec3(0.05, 0.05, 0.125),
                },
                DARKGREEN,
            ),
        );
        body.add_oscillator(pivot, [config::PREDATOR_LEG_SWING_SPEED, 0.0, 0.0]);
    }
    Ok(body)
}

/// Obstacle: a single drifting boulder with no moving parts.
pub fn obstacle() -> Result<ArticulatedBody, String> {
    let mut skel = Skeleton::new();
    skel.add_root(Segment::new(
        Vec3::ZERO,
        config::OBSTACLE_BOUND_RADIUS * 2.0,
        ShapeKind::Sphere {
            radius: config::OBSTACLE_BOUND_RADIUS,
        },
        GRAY,
    ));
    Ok(ArticulatedBody::new("obstacle", skel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prey_limbs_oscillate_within_their_extents() {
        let mut body = prey().unwrap();
        for _ in 0..500 {
            body.animation_update();
        }
        for (_, seg) in body.skeleton.segments() {
            for axis in Axis::ALL {
                if let Some((min, max)) = seg.extent(axis) {
                    let a = seg.angle(axis);
                    assert!(a >= min && a <= max, "angle {a} outside [{min}, {max}]");
                }
            }
        }
    }

    #[test]
    fn predator_legs_swing_and_reverse() {
        let mut body = predator().unwrap();
        let pivots: Vec<_> = body
            .skeleton
            .segments()
            .filter(|(_, s)| s.extent(Axis::U) == Some((-35.0, 35.0)))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(pivots.len(), 2);

        let mut seen_positive = false;
        let mut seen_negative = false;
        for _ in 0..200 {
            body.animation_update();
            let a = body.skeleton.segment(pivots[0]).angle(Axis::U);
            seen_positive |= a > 10.0;
            seen_negative |= a < -10.0;
        }
        assert!(seen_positive && seen_negative);
    }

    #[test]
    fn builders_produce_well_formed_skeletons() {
        assert!(prey().unwrap().skeleton.len() > 8);
        assert!(predator().unwrap().skeleton.len() > 5);
        assert_eq!(obstacle().unwrap().skeleton.len(), 1);
    }
}
