use macroquad::prelude::*;

use crate::agent::Species;
use crate::config;

/// How one species' potential field responds to another's presence.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ForceRule {
    Flee,
    Chase,
    Ignore,
}

/// How one species responds to touching another.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CollisionRule {
    Consumed,
    Reflect,
    Boost,
    Ignore,
}

/// Species-pair force behavior as data: (me, other) -> rule.
pub fn force_rule(me: Species, other: Species) -> ForceRule {
    use Species::*;
    match (me, other) {
        (Prey, Predator) => ForceRule::Flee,
        (Predator, Prey) => ForceRule::Chase,
        _ => ForceRule::Ignore,
    }
}

/// Species-pair collision behavior as data: (me, other) -> rule.
pub fn collision_rule(me: Species, other: Species) -> CollisionRule {
    use Species::*;
    match (me, other) {
        (Prey, Predator) => CollisionRule::Consumed,
        (Prey, Prey) => CollisionRule::Reflect,
        (Predator, Prey) => CollisionRule::Boost,
        (Predator, Predator) => CollisionRule::Reflect,
        (Prey, Obstacle) | (Predator, Obstacle) => CollisionRule::Reflect,
        (Obstacle, _) => CollisionRule::Ignore,
    }
}

fn rule_strength(rule: ForceRule) -> f32 {
    match rule {
        ForceRule::Flee => -config::PREY_FLEE_STRENGTH,
        ForceRule::Chase => config::PREDATOR_CHASE_STRENGTH,
        ForceRule::Ignore => 0.0,
    }
}

/// Snapshot of another live agent, read at force/collision time.
#[derive(Clone, Copy, Debug)]
pub struct NeighborView {
    pub pos: Vec3,
    pub bound_radius: f32,
    pub species: Species,
}

/// Net potential-field force on an agent at `pos`: each in-range neighbor
/// contributes strength / d² along the connecting line, signed by the
/// species-pair rule. Coincident neighbors are skipped so the division can
/// never blow up.
pub fn potential_force(species: Species, pos: Vec3, neighbors: &[NeighborView]) -> Vec3 {
    let mut net = Vec3::ZERO;
    for other in neighbors {
        let rule = force_rule(species, other.species);
        if rule == ForceRule::Ignore {
            continue;
        }
        let delta = other.pos - pos;
        let distance = delta.length();
        if distance > config::INFLUENCE_RADIUS || distance < config::DISTANCE_EPSILON {
            continue;
        }
        let toward = delta / distance;
        net += toward * rule_strength(rule) / (distance * distance);
    }
    net
}

/// Bounding-sphere test on current centers.
pub fn check_collision(pos_a: Vec3, radius_a: f32, pos_b: Vec3, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Mirror `direction` about the collision normal toward `other_pos`,
/// renormalized. A degenerate normal (coincident centers) falls back to
/// heading negation.
pub fn reflect(direction: Vec3, self_pos: Vec3, other_pos: Vec3) -> Vec3 {
    let normal = other_pos - self_pos;
    if normal.length() < config::DISTANCE_EPSILON {
        return -direction;
    }
    let normal = normal.normalize();
    let reflected = direction - 2.0 * direction.dot(normal) * normal;
    reflected.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(pos: Vec3, species: Species) -> NeighborView {
        NeighborView {
            pos,
            bound_radius: 0.2,
            species,
        }
    }

    #[test]
    fn prey_is_repelled_inside_the_influence_radius() {
        let predator = neighbor(vec3(2.5, 0.0, 0.0), Species::Predator);
        let force = potential_force(Species::Prey, Vec3::ZERO, &[predator]);
        assert!(force.length() > 0.0);
        // Directed away from the predator.
        assert!(force.dot(Vec3::X) < 0.0);
    }

    #[test]
    fn force_cuts_off_beyond_the_influence_radius() {
        let predator = neighbor(vec3(3.5, 0.0, 0.0), Species::Predator);
        let force = potential_force(Species::Prey, Vec3::ZERO, &[predator]);
        assert_eq!(force, Vec3::ZERO);
    }

    #[test]
    fn predator_is_attracted_toward_prey() {
        let prey = neighbor(vec3(0.0, 2.0, 0.0), Species::Prey);
        let force = potential_force(Species::Predator, Vec3::ZERO, &[prey]);
        assert!(force.dot(Vec3::Y) > 0.0);
    }

    #[test]
    fn same_species_and_coincident_pairs_contribute_nothing() {
        let twin = neighbor(vec3(1.0, 0.0, 0.0), Species::Prey);
        assert_eq!(potential_force(Species::Prey, Vec3::ZERO, &[twin]), Vec3::ZERO);

        let on_top = neighbor(Vec3::ZERO, Species::Predator);
        assert_eq!(
            potential_force(Species::Prey, Vec3::ZERO, &[on_top]),
            Vec3::ZERO
        );
    }

    #[test]
    fn closer_threats_push_harder() {
        let near = neighbor(vec3(1.0, 0.0, 0.0), Species::Predator);
        let far = neighbor(vec3(2.0, 0.0, 0.0), Species::Predator);
        let f_near = potential_force(Species::Prey, Vec3::ZERO, &[near]).length();
        let f_far = potential_force(Species::Prey, Vec3::ZERO, &[far]).length();
        assert!(f_near > f_far);
    }

    #[test]
    fn collision_requires_overlapping_bounding_spheres() {
        // Two prey 0.05 apart with radii 0.2 each: sum 0.4 > 0.05.
        assert!(check_collision(
            Vec3::ZERO,
            0.2,
            vec3(0.05, 0.0, 0.0),
            0.2
        ));
        assert!(!check_collision(
            Vec3::ZERO,
            0.2,
            vec3(0.5, 0.0, 0.0),
            0.2
        ));
    }

    #[test]
    fn reflection_mirrors_about_the_collision_normal() {
        let d = vec3(1.0, 1.0, 0.0).normalize();
        let r = reflect(d, Vec3::ZERO, vec3(1.0, 0.0, 0.0));
        let n = Vec3::X;

        assert!((r.dot(n) + d.dot(n)).abs() < 1e-6);
        assert!((r.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coincident_collision_normal_negates_the_heading() {
        let d = Vec3::Z;
        assert_eq!(reflect(d, Vec3::ZERO, Vec3::ZERO), -d);
    }

    #[test]
    fn collision_rules_match_the_species_table() {
        use Species::*;
        assert_eq!(collision_rule(Prey, Predator), CollisionRule::Consumed);
        assert_eq!(collision_rule(Predator, Prey), CollisionRule::Boost);
        assert_eq!(collision_rule(Prey, Prey), CollisionRule::Reflect);
        assert_eq!(collision_rule(Predator, Predator), CollisionRule::Reflect);
        assert_eq!(collision_rule(Prey, Obstacle), CollisionRule::Reflect);
        assert_eq!(collision_rule(Obstacle, Prey), CollisionRule::Ignore);
    }
}
