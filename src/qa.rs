use macroquad::prelude::*;
use serde::Serialize;

use crate::config;
use crate::segment::Axis;
use crate::vivarium::VivariumState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum QaScenario {
    Baseline,
    PredationProbe,
}

impl QaScenario {
    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "baseline" => Some(Self::Baseline),
            "predation" | "predation-probe" | "chase" => Some(Self::PredationProbe),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::PredationProbe => "predation_probe",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QaCheck {
    pub name: String,
    pub passed: bool,
    pub details: String,
}

/// Min/mean/max of one sampled quantity over the whole run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QaSummary {
    pub min: f32,
    pub mean: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Default)]
struct Aggregate {
    min: f32,
    max: f32,
    sum: f64,
    count: u64,
}

impl Aggregate {
    fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }

    fn push(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value as f64;
        self.count += 1;
    }

    fn summary(&self) -> QaSummary {
        if self.count == 0 {
            return QaSummary {
                min: 0.0,
                mean: 0.0,
                max: 0.0,
            };
        }
        QaSummary {
            min: self.min,
            mean: (self.sum / self.count as f64) as f32,
            max: self.max,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    pub scenario: String,
    pub seed: u64,
    pub ticks: u64,
    pub initial_prey: usize,
    pub final_prey: usize,
    pub predations: u64,
    pub heading_error: QaSummary,
    pub containment_margin: QaSummary,
    pub overall_status: String,
    pub checks: Vec<QaCheck>,
}

fn build_scenario(scenario: QaScenario, seed: u64) -> VivariumState {
    match scenario {
        QaScenario::Baseline => VivariumState::new(seed),
        QaScenario::PredationProbe => {
            let mut viv = VivariumState::empty(seed);
            viv.spawn_predator(Vec3::ZERO)
                .expect("predator configuration is valid");
            viv.spawn_prey(vec3(0.8, 0.0, 0.0))
                .expect("prey configuration is valid");
            viv
        }
    }
}

/// Run a seeded scenario headless, sampling the simulation's invariants
/// every tick, and fold the result into a pass/fail report.
pub fn run(scenario: QaScenario, seed: u64, ticks: u64) -> QaReport {
    let mut viv = build_scenario(scenario, seed);
    let half = viv.tank.half_extents();
    let initial_prey = viv.prey_count();

    let mut heading_error = Aggregate::new();
    let mut containment_margin = Aggregate::new();
    let mut non_finite = 0u64;
    let mut joint_violations = 0u64;
    let mut step_cap_violations = 0u64;
    let mut prey_regressions = 0u64;
    let mut prev_prey = initial_prey;

    for _ in 0..ticks {
        viv.tick();

        for (slot, agent) in viv.arena.iter_alive() {
            if !agent.pos.is_finite() {
                non_finite += 1;
            }
            if agent.species.is_motile() {
                heading_error.push((agent.heading.length() - 1.0).abs());
            }
            for i in 0..3 {
                containment_margin.push(half[i] - (agent.pos[i].abs() + agent.bound_radius));
            }
            if agent.step_size > config::PREDATOR_STEP_MAX + 1e-6 {
                step_cap_violations += 1;
            }
            if let Some(body) = viv.bodies[slot].as_ref() {
                for (_, seg) in body.skeleton.segments() {
                    for axis in Axis::ALL {
                        if let Some((min, max)) = seg.extent(axis) {
                            let a = seg.angle(axis);
                            if a < min || a > max {
                                joint_violations += 1;
                            }
                        }
                    }
                }
            }
        }

        let prey = viv.prey_count();
        if prey > prev_prey {
            prey_regressions += 1;
        }
        prev_prey = prey;
    }

    let mut checks = vec![
        QaCheck {
            name: "headings_unit".to_string(),
            passed: heading_error.summary().max < 1e-3,
            details: format!("max deviation {:.2e}", heading_error.summary().max),
        },
        QaCheck {
            name: "wall_containment".to_string(),
            passed: containment_margin.summary().min > 0.0,
            details: format!("min margin {:.4}", containment_margin.summary().min),
        },
        QaCheck {
            name: "joint_extents".to_string(),
            passed: joint_violations == 0,
            details: format!("{joint_violations} violations"),
        },
        QaCheck {
            name: "finite_positions".to_string(),
            passed: non_finite == 0,
            details: format!("{non_finite} non-finite samples"),
        },
        QaCheck {
            name: "predator_step_cap".to_string(),
            passed: step_cap_violations == 0,
            details: format!("{step_cap_violations} violations"),
        },
        QaCheck {
            name: "prey_never_resurrects".to_string(),
            passed: prey_regressions == 0,
            details: format!("{prey_regressions} regressions"),
        },
    ];
    if scenario == QaScenario::PredationProbe {
        checks.push(QaCheck {
            name: "predation_occurred".to_string(),
            passed: viv.total_predations > 0,
            details: format!("{} predations", viv.total_predations),
        });
    }

    let overall = if checks.iter().all(|c| c.passed) {
        "pass"
    } else {
        "fail"
    };
    QaReport {
        scenario: scenario.label().to_string(),
        seed,
        ticks,
        initial_prey,
        final_prey: viv.prey_count(),
        predations: viv.total_predations,
        heading_error: heading_error.summary(),
        containment_margin: containment_margin.summary(),
        overall_status: overall.to_string(),
        checks,
    }
}

pub fn write_report(report: &QaReport, path: &str) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("serialize QA report failed: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("write QA report {path} failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_scenario_passes_every_check() {
        let report = run(QaScenario::Baseline, 42, 300);
        assert_eq!(report.overall_status, "pass", "checks: {:?}", report.checks);
    }

    #[test]
    fn predation_probe_records_a_capture() {
        let report = run(QaScenario::PredationProbe, 42, 2000);
        assert!(report.predations > 0);
        assert_eq!(report.final_prey, report.initial_prey - report.predations as usize);
    }

    #[test]
    fn scenario_names_parse_from_cli() {
        assert_eq!(QaScenario::parse_cli("baseline"), Some(QaScenario::Baseline));
        assert_eq!(
            QaScenario::parse_cli("PREDATION"),
            Some(QaScenario::PredationProbe)
        );
        assert_eq!(QaScenario::parse_cli("nope"), None);
    }
}
