use macroquad::prelude::*;
use ::rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::agent::{Agent, AgentArena, AgentId, Species};
use crate::body::ArticulatedBody;
use crate::config;
use crate::creatures;
use crate::orient;
use crate::steering::{self, CollisionRule, NeighborView};
use crate::tank::Tank;

/// A prey agent eaten this tick, kept for stats and effects.
#[derive(Clone, Copy, Debug)]
pub struct PredationEvent {
    pub tick: u64,
    pub pos: Vec3,
}

/// The bounded environment and its simulation driver: owns the live agent
/// registry, the per-slot articulated bodies, and the seeded RNG used only
/// at spawn time.
pub struct VivariumState {
    pub tank: Tank,
    pub arena: AgentArena,
    pub bodies: Vec<Option<ArticulatedBody>>,
    pub rng: ChaCha8Rng,
    pub tick_count: u64,
    pub total_predations: u64,
    pub predation_events: Vec<PredationEvent>,
    pub paused: bool,
    pub speed_multiplier: f32,
}

impl VivariumState {
    /// An empty tank with the configured dimensions.
    pub fn empty(seed: u64) -> Self {
        Self {
            tank: Tank::new(vec3(
                config::TANK_WIDTH,
                config::TANK_HEIGHT,
                config::TANK_DEPTH,
            )),
            arena: AgentArena::new(config::MAX_AGENT_COUNT),
            bodies: (0..config::MAX_AGENT_COUNT).map(|_| None).collect(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick_count: 0,
            total_predations: 0,
            predation_events: Vec::new(),
            paused: false,
            speed_multiplier: 1.0,
        }
    }

    /// A tank populated with the configured initial creatures.
    pub fn new(seed: u64) -> Self {
        let mut viv = Self::empty(seed);
        for _ in 0..config::INITIAL_PREY_COUNT {
            let pos = viv.random_position(config::PREY_BOUND_RADIUS);
            viv.spawn_prey(pos).expect("prey configuration is valid");
        }
        for _ in 0..config::INITIAL_PREDATOR_COUNT {
            let pos = viv.random_position(config::PREDATOR_BOUND_RADIUS);
            viv.spawn_predator(pos)
                .expect("predator configuration is valid");
        }
        for _ in 0..config::INITIAL_OBSTACLE_COUNT {
            let pos = viv.random_position(config::OBSTACLE_BOUND_RADIUS);
            viv.spawn_obstacle(pos)
                .expect("obstacle configuration is valid");
        }
        viv
    }

    fn random_position(&mut self, radius: f32) -> Vec3 {
        let half = self.tank.half_extents();
        let margin = radius + 0.2;
        vec3(
            self.rng.gen_range(-(half.x - margin)..(half.x - margin)),
            self.rng.gen_range(-(half.y - margin)..(half.y - margin)),
            self.rng.gen_range(-(half.z - margin)..(half.z - margin)),
        )
    }

    fn random_heading(&mut self) -> Vec3 {
        let v = vec3(
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-1.0..1.0),
        );
        if v.length() < config::DISTANCE_EPSILON {
            Vec3::X
        } else {
            v
        }
    }

    pub fn spawn_prey(&mut self, pos: Vec3) -> Result<AgentId, String> {
        let heading = self.random_heading();
        let agent = Agent::new(
            pos,
            heading,
            config::PREY_BOUND_RADIUS,
            Species::Prey,
            config::PREY_STEP_SIZE,
            self.tick_count,
        )?;
        self.insert(agent, creatures::prey()?)
    }

    pub fn spawn_predator(&mut self, pos: Vec3) -> Result<AgentId, String> {
        let heading = self.random_heading();
        let agent = Agent::new(
            pos,
            heading,
            config::PREDATOR_BOUND_RADIUS,
            Species::Predator,
            config::PREDATOR_STEP_SIZE,
            self.tick_count,
        )?;
        self.insert(agent, creatures::predator()?)
    }

    pub fn spawn_obstacle(&mut self, pos: Vec3) -> Result<AgentId, String> {
        let agent = Agent::new(
            pos,
            Vec3::Z,
            config::OBSTACLE_BOUND_RADIUS,
            Species::Obstacle,
            0.0,
            self.tick_count,
        )?;
        self.insert(agent, creatures::obstacle()?)
    }

    /// Interactive spawns at a random interior position.
    pub fn spawn_random_prey(&mut self) -> Result<AgentId, String> {
        let pos = self.random_position(config::PREY_BOUND_RADIUS);
        self.spawn_prey(pos)
    }

    pub fn spawn_random_predator(&mut self) -> Result<AgentId, String> {
        let pos = self.random_position(config::PREDATOR_BOUND_RADIUS);
        self.spawn_predator(pos)
    }

    fn insert(&mut self, agent: Agent, body: ArticulatedBody) -> Result<AgentId, String> {
        let id = self
            .arena
            .spawn(agent)
            .ok_or_else(|| "agent registry is full".to_string())?;
        let slot = id.index as usize;
        if slot >= self.bodies.len() {
            self.bodies.resize_with(slot + 1, || None);
        }
        self.bodies[slot] = Some(body);
        Ok(id)
    }

    /// Advance the simulation by one tick: pose animation for every live
    /// body, then locomotion for every live motile agent in ascending slot
    /// order, then a dead sweep. Stepping reads the registry as it is at
    /// that moment, so later slots observe earlier slots' committed updates
    /// within the same tick; the stable order keeps runs reproducible.
    pub fn tick(&mut self) {
        self.predation_events.clear();

        for slot in 0..self.arena.capacity() {
            let animate = matches!(self.arena.get_by_index(slot), Some(a) if a.alive);
            if animate {
                if let Some(body) = self.bodies.get_mut(slot).and_then(|b| b.as_mut()) {
                    body.animation_update();
                }
            }
        }

        for slot in 0..self.arena.capacity() {
            self.step_forward(slot);
        }

        for slot in self.arena.sweep_dead() {
            self.bodies[slot] = None;
        }

        self.update_world_transforms();
        self.tick_count += 1;
    }

    /// One locomotion transition for the agent in `slot`: potential force,
    /// heading update, collision response, wall containment, reorientation,
    /// commit. Terminal state: removed by predation.
    fn step_forward(&mut self, slot: usize) {
        let me = match self.arena.get_by_index(slot) {
            Some(a) if a.alive && a.species.is_motile() => a.clone(),
            _ => return,
        };

        let neighbors: Vec<NeighborView> = self
            .arena
            .iter_alive()
            .filter(|(i, _)| *i != slot)
            .map(|(_, a)| NeighborView {
                pos: a.pos,
                bound_radius: a.bound_radius,
                species: a.species,
            })
            .collect();

        let force = steering::potential_force(me.species, me.pos, &neighbors);

        let mut heading = me.heading;
        let candidate = heading + force;
        if candidate.length() >= config::DISTANCE_EPSILON {
            heading = candidate.normalize();
        }

        let mut step_size = me.step_size;
        for other in &neighbors {
            if !steering::check_collision(me.pos, me.bound_radius, other.pos, other.bound_radius) {
                continue;
            }
            match steering::collision_rule(me.species, other.species) {
                CollisionRule::Consumed => {
                    if let Some(a) = self.arena.get_mut_by_index(slot) {
                        a.alive = false;
                    }
                    self.total_predations += 1;
                    self.predation_events.push(PredationEvent {
                        tick: self.tick_count,
                        pos: me.pos,
                    });
                    return;
                }
                CollisionRule::Reflect => {
                    heading = steering::reflect(heading, me.pos, other.pos);
                }
                CollisionRule::Boost => {
                    step_size =
                        (step_size * config::PREDATOR_STEP_BOOST).min(config::PREDATOR_STEP_MAX);
                }
                CollisionRule::Ignore => continue,
            }
            // Exactly one collision response per tick.
            break;
        }

        let tentative = me.pos + heading * step_size;
        let (next_pos, heading) =
            self.tank
                .contain(me.pos, tentative, heading, me.bound_radius, step_size);

        let orientation = orient::orientation_toward(heading);
        if let Some(a) = self.arena.get_mut_by_index(slot) {
            a.pos = next_pos;
            a.heading = heading;
            a.orientation = orientation;
            a.step_size = step_size;
        }
    }

    /// Refresh every live body's cached world transforms from its agent's
    /// anchor (translation composed with the visual facing).
    pub fn update_world_transforms(&mut self) {
        for (slot, agent) in self.arena.agents.iter().enumerate() {
            let Some(agent) = agent.as_ref().filter(|a| a.alive) else {
                continue;
            };
            let anchor =
                Mat4::from_translation(agent.pos) * Mat4::from_quat(agent.orientation);
            if let Some(body) = self.bodies.get_mut(slot).and_then(|b| b.as_mut()) {
                body.update_world_transforms(anchor);
            }
        }
    }

    pub fn prey_count(&self) -> usize {
        self.arena
            .iter_alive()
            .filter(|(_, a)| a.species == Species::Prey)
            .count()
    }

    pub fn predator_count(&self) -> usize {
        self.arena
            .iter_alive()
            .filter(|(_, a)| a.species == Species::Predator)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_prey_reflect_and_survive() {
        let mut viv = VivariumState::empty(7);
        let a = viv.spawn_prey(vec3(0.0, 0.0, 0.0)).unwrap();
        let b = viv.spawn_prey(vec3(0.05, 0.0, 0.0)).unwrap();

        let heading_a = viv.arena.get(a).unwrap().heading;
        let heading_b = viv.arena.get(b).unwrap().heading;
        viv.tick();

        let agent_a = viv.arena.get(a).unwrap();
        let agent_b = viv.arena.get(b).unwrap();
        assert!(agent_a.alive && agent_b.alive);
        assert_ne!(agent_a.heading, heading_a);
        assert_ne!(agent_b.heading, heading_b);
        assert_eq!(viv.total_predations, 0);
    }

    #[test]
    fn predation_removes_prey_and_boosts_predator() {
        let mut viv = VivariumState::empty(7);
        // Predator in the earlier slot: it sees the prey before the prey is
        // consumed later in the same tick.
        let predator = viv.spawn_predator(Vec3::ZERO).unwrap();
        let prey = viv.spawn_prey(vec3(0.3, 0.0, 0.0)).unwrap();

        viv.tick();

        assert!(viv.arena.get(prey).is_none());
        assert_eq!(viv.prey_count(), 0);
        assert_eq!(viv.total_predations, 1);
        let boosted = viv.arena.get(predator).unwrap().step_size;
        let expected = config::PREDATOR_STEP_SIZE * config::PREDATOR_STEP_BOOST;
        assert!((boosted - expected).abs() < 1e-7);
    }

    #[test]
    fn predator_step_boost_is_capped() {
        let mut viv = VivariumState::empty(7);
        let predator = viv.spawn_predator(Vec3::ZERO).unwrap();

        // Feed it a fresh prey every tick until the boost saturates.
        for _ in 0..40 {
            let pos = viv.arena.get(predator).unwrap().pos;
            viv.spawn_prey(pos + vec3(0.3, 0.0, 0.0)).unwrap();
            viv.tick();
        }
        let step = viv.arena.get(predator).unwrap().step_size;
        assert!(step <= config::PREDATOR_STEP_MAX + 1e-7);
    }

    #[test]
    fn headings_stay_unit_length() {
        let mut viv = VivariumState::new(42);
        for _ in 0..120 {
            viv.tick();
            for (_, agent) in viv.arena.iter_alive() {
                if agent.species.is_motile() {
                    assert!((agent.heading.length() - 1.0).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn agents_never_tunnel_through_walls() {
        let mut viv = VivariumState::new(9);
        let half = viv.tank.half_extents();
        for _ in 0..300 {
            viv.tick();
            for (_, agent) in viv.arena.iter_alive() {
                for i in 0..3 {
                    assert!(
                        agent.pos[i].abs() + agent.bound_radius < half[i] + 1e-4,
                        "agent at {:?} breached axis {i}",
                        agent.pos
                    );
                }
            }
        }
    }

    #[test]
    fn same_seed_runs_are_identical() {
        let mut a = VivariumState::new(1234);
        let mut b = VivariumState::new(1234);
        for _ in 0..100 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.tick_count, b.tick_count);
        assert_eq!(a.total_predations, b.total_predations);
        let pos_a: Vec<Vec3> = a.arena.iter_alive().map(|(_, ag)| ag.pos).collect();
        let pos_b: Vec<Vec3> = b.arena.iter_alive().map(|(_, ag)| ag.pos).collect();
        assert_eq!(pos_a, pos_b);
    }

    #[test]
    fn swept_slots_are_recycled_with_new_generations() {
        let mut viv = VivariumState::empty(5);
        viv.spawn_predator(Vec3::ZERO).unwrap();
        let prey = viv.spawn_prey(vec3(0.3, 0.0, 0.0)).unwrap();
        viv.tick();
        assert!(viv.arena.get(prey).is_none());
        assert!(viv.bodies[prey.index as usize].is_none());

        let replacement = viv.spawn_prey(vec3(1.5, 1.5, 1.5)).unwrap();
        assert_eq!(replacement.index, prey.index);
        assert_ne!(replacement.generation, prey.generation);
    }
}
