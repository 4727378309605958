// Rolling statistics for population tracking and the HUD.

use crate::agent::Species;
use crate::vivarium::VivariumState;

/// Ring buffer that stores the last N samples of a metric.
pub struct RingBuffer {
    values: Vec<f32>,
    capacity: usize,
    next: usize,
    filled: bool,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: vec![0.0; capacity],
            capacity,
            next: 0,
            filled: false,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.values[self.next] = value;
        self.next = (self.next + 1) % self.capacity;
        if self.next == 0 {
            self.filled = true;
        }
    }

    pub fn len(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.next
        }
    }

    /// Samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let (older, newer) = if self.filled {
            (&self.values[self.next..], &self.values[..self.next])
        } else {
            (&self.values[..self.next], &self.values[..0])
        };
        older.iter().chain(newer.iter()).copied()
    }

    pub fn last(&self) -> Option<f32> {
        if self.len() == 0 {
            None
        } else {
            Some(self.values[(self.next + self.capacity - 1) % self.capacity])
        }
    }

    pub fn mean(&self) -> f32 {
        let n = self.len();
        if n == 0 {
            0.0
        } else {
            self.iter().sum::<f32>() / n as f32
        }
    }
}

/// Tracked vivarium metrics, sampled every few ticks.
pub struct VivariumStats {
    pub prey: RingBuffer,
    pub predators: RingBuffer,
    pub predations: RingBuffer,
    pub predator_step: RingBuffer,
    pub sample_interval: u64,
    tick_counter: u64,
}

impl VivariumStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            prey: RingBuffer::new(capacity),
            predators: RingBuffer::new(capacity),
            predations: RingBuffer::new(capacity),
            predator_step: RingBuffer::new(capacity),
            sample_interval: 10,
            tick_counter: 0,
        }
    }

    /// Record one tick's state; only every `sample_interval`th tick lands in
    /// the buffers.
    pub fn record(&mut self, viv: &VivariumState) {
        self.tick_counter += 1;
        if self.tick_counter % self.sample_interval != 0 {
            return;
        }

        self.prey.push(viv.prey_count() as f32);
        self.predators.push(viv.predator_count() as f32);
        self.predations.push(viv.total_predations as f32);

        let (mut sum, mut n) = (0.0f32, 0u32);
        for (_, agent) in viv.arena.iter_alive() {
            if agent.species == Species::Predator {
                sum += agent.step_size;
                n += 1;
            }
        }
        self.predator_step
            .push(if n > 0 { sum / n as f32 } else { 0.0 });
    }
}
