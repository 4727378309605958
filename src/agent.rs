use macroquad::prelude::*;
use serde::Serialize;

use crate::config;

/// Species classification used by the steering rule tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Species {
    Prey,
    Predator,
    Obstacle,
}

impl Species {
    /// Obstacles drift where they were placed; only prey and predators step.
    pub fn is_motile(self) -> bool {
        !matches!(self, Species::Obstacle)
    }
}

/// Stable handle to an agent. The generation field invalidates stale
/// references after a slot is recycled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AgentId {
    pub index: u32,
    pub generation: u32,
}

/// One autonomous creature tracked by the vivarium.
#[derive(Clone, Debug)]
pub struct Agent {
    pub pos: Vec3,
    pub heading: Vec3,
    pub orientation: Quat,
    pub bound_radius: f32,
    pub species: Species,
    pub step_size: f32,
    pub alive: bool,
    pub tick_born: u64,
}

impl Agent {
    /// Validates the configuration; a bad radius or unusable heading rejects
    /// the agent before it ever enters the simulation.
    pub fn new(
        pos: Vec3,
        heading: Vec3,
        bound_radius: f32,
        species: Species,
        step_size: f32,
        tick_born: u64,
    ) -> Result<Self, String> {
        if bound_radius <= 0.0 {
            return Err(format!("bound radius must be positive, got {bound_radius}"));
        }
        if step_size < 0.0 {
            return Err(format!("step size must be non-negative, got {step_size}"));
        }
        if heading.length() < config::DISTANCE_EPSILON {
            return Err("initial heading is degenerate".to_string());
        }
        Ok(Self {
            pos,
            heading: heading.normalize(),
            orientation: Quat::IDENTITY,
            bound_radius,
            species,
            step_size,
            alive: true,
            tick_born,
        })
    }
}

/// Arena-based agent registry with generational indices and a free list.
/// Removal is mark-then-compact: predation flips `alive` mid-tick and
/// `sweep_dead` reclaims slots once the tick's traversal is done.
pub struct AgentArena {
    pub agents: Vec<Option<Agent>>,
    pub generations: Vec<u32>,
    pub free_list: Vec<u32>,
    pub count: usize,
}

impl AgentArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            agents: vec![None; capacity],
            generations: vec![0; capacity],
            free_list: (0..capacity as u32).rev().collect(),
            count: 0,
        }
    }

    pub fn spawn(&mut self, agent: Agent) -> Option<AgentId> {
        if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            self.agents[idx] = Some(agent);
            self.count += 1;
            Some(AgentId {
                index,
                generation: self.generations[idx],
            })
        } else {
            let index = self.agents.len() as u32;
            self.agents.push(Some(agent));
            self.generations.push(0);
            self.count += 1;
            Some(AgentId {
                index,
                generation: 0,
            })
        }
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        let idx = id.index as usize;
        if idx < self.agents.len() && self.generations[idx] == id.generation {
            self.agents[idx].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        let idx = id.index as usize;
        if idx < self.agents.len() && self.generations[idx] == id.generation {
            self.agents[idx].as_mut()
        } else {
            None
        }
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index).and_then(|a| a.as_ref())
    }

    pub fn get_mut_by_index(&mut self, index: usize) -> Option<&mut Agent> {
        self.agents.get_mut(index).and_then(|a| a.as_mut())
    }

    /// Reclaim the slots of agents marked dead. Returns the freed indices so
    /// the owner can drop per-slot side data.
    pub fn sweep_dead(&mut self) -> Vec<usize> {
        let mut freed = Vec::new();
        for (idx, slot) in self.agents.iter_mut().enumerate() {
            if let Some(agent) = slot {
                if !agent.alive {
                    freed.push(idx);
                    *slot = None;
                    self.generations[idx] += 1;
                    self.free_list.push(idx as u32);
                    self.count -= 1;
                }
            }
        }
        freed
    }

    /// Iterate over (slot, &Agent) for all live agents in slot order.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &Agent)> {
        self.agents.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .and_then(|a| if a.alive { Some((i, a)) } else { None })
        })
    }

    pub fn capacity(&self) -> usize {
        self.agents.len()
    }
}
