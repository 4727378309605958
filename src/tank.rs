use macroquad::prelude::*;

/// The bounded environment: an origin-centered box whose full dimensions are
/// supplied by scene setup.
pub struct Tank {
    pub dimensions: Vec3,
}

impl Tank {
    pub fn new(dimensions: Vec3) -> Self {
        Self { dimensions }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.dimensions * 0.5
    }

    /// Reflective wall containment, each axis independent: when the sphere
    /// of `radius` at the tentative position would touch a wall, the heading
    /// component on that axis is negated and the tentative component is
    /// recomputed from the corrected heading. Returns (position, heading).
    pub fn contain(
        &self,
        pos: Vec3,
        mut tentative: Vec3,
        mut heading: Vec3,
        radius: f32,
        step_size: f32,
    ) -> (Vec3, Vec3) {
        let half = self.half_extents();
        for i in 0..3 {
            if tentative[i].abs() + radius >= half[i] {
                heading[i] = -heading[i];
                tentative[i] = pos[i] + heading[i] * step_size;
            }
        }
        (tentative, heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_contact_reflects_only_the_offending_axis() {
        let tank = Tank::new(vec3(4.0, 4.0, 4.0));
        let pos = vec3(1.75, 0.0, 0.0);
        let heading = vec3(1.0, 0.0, 0.0);
        let tentative = pos + heading * 0.1;

        let (next, new_heading) = tank.contain(pos, tentative, heading, 0.2, 0.1);
        assert_eq!(new_heading, vec3(-1.0, 0.0, 0.0));
        assert_eq!(next, vec3(1.65, 0.0, 0.0));
    }

    #[test]
    fn interior_positions_pass_through_unchanged() {
        let tank = Tank::new(vec3(4.0, 4.0, 4.0));
        let pos = Vec3::ZERO;
        let heading = vec3(0.0, 1.0, 0.0);
        let tentative = pos + heading * 0.1;

        let (next, new_heading) = tank.contain(pos, tentative, heading, 0.2, 0.1);
        assert_eq!(new_heading, heading);
        assert_eq!(next, tentative);
    }

    #[test]
    fn corner_contact_reflects_every_touching_axis() {
        let tank = Tank::new(vec3(4.0, 4.0, 4.0));
        let pos = vec3(1.75, -1.75, 0.0);
        let heading = vec3(1.0, -1.0, 0.0).normalize();
        let step = 0.2;
        let tentative = pos + heading * step;

        let (next, new_heading) = tank.contain(pos, tentative, heading, 0.2, step);
        assert!(new_heading.x < 0.0 && new_heading.y > 0.0);
        let half = tank.half_extents();
        assert!(next.x.abs() + 0.2 < half.x);
        assert!(next.y.abs() + 0.2 < half.y);
    }
}
