//! Force-directed placement.
//!
//! A spring embedder in the Fruchterman-Reingold family:
//!
//! 1. **Seeding**: caller-supplied positions are kept; every other node takes
//!    the next free slot of a sunflower spiral around the seeds' centroid.
//!    Slots within half a spacing of an occupied spot are skipped using an
//!    R-tree over the seeds and the slots claimed so far.
//! 2. **Repulsion**: every pair of nodes pushes apart with `C / d²`,
//!    `C = repulsion * k³` (`k` = spacing), capped at `max_repulsion * k`.
//!    Coincident pairs separate along a fixed per-pair direction.
//! 3. **Springs**: every link pulls with `spring_constant * (d - k)`, so
//!    links longer than the spacing contract and shorter ones stretch.
//! 4. **Integration**: `v = (v + F) * damping`, then the step is capped at
//!    the current temperature, which cools linearly to zero over
//!    `max_iterations`.
//!
//! The run stops early once the mean step length of an iteration drops
//! below `convergence_epsilon * k`. There is no randomness anywhere, so
//! equal inputs give bit-identical outputs.

use serde::{Deserialize, Serialize};

use crate::geometry::Position;
use crate::graph::Subgraph;
use crate::spatial::SpatialIndex;

/// Golden angle in radians, `π (3 - √5)`.
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Spiral slot radius growth, relative to spacing.
const SPIRAL_SCALE: f64 = 0.6;

/// Spiral slots tried per node before accepting an occupied one.
const MAX_SLOT_ATTEMPTS: usize = 64;

/// Distances below this fraction of spacing count as coincident.
const COINCIDENT_RATIO: f64 = 1e-6;

/// Seeds farther than this from the origin are ignored. Differences of
/// accepted seeds stay finite.
pub const MAX_SEED_MAGNITUDE: f64 = 1e15;

/// Force simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceConfig {
    /// Iteration cap (default: 300).
    pub max_iterations: usize,
    /// Velocity retained per iteration (default: 0.85).
    pub damping: f64,
    /// Spring stiffness per unit of stretch (default: 0.1).
    pub spring_constant: f64,
    /// Repulsion strength relative to spacing (default: 0.05).
    pub repulsion: f64,
    /// Per-pair repulsion cap relative to spacing (default: 1.0).
    pub max_repulsion: f64,
    /// Starting step cap relative to spacing (default: 0.5).
    pub initial_temperature: f64,
    /// Mean step, relative to spacing, below which the run stops (default: 0.01).
    pub convergence_epsilon: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            damping: 0.85,
            spring_constant: 0.1,
            repulsion: 0.05,
            max_repulsion: 1.0,
            initial_temperature: 0.5,
            convergence_epsilon: 0.01,
        }
    }
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceReport {
    /// Iterations actually run.
    pub iterations: usize,
    /// Whether the run stopped on the convergence threshold.
    pub converged: bool,
    /// Sum of step lengths over all nodes, per iteration.
    pub displacement: Vec<f64>,
}

impl ForceConfig {
    /// Replace out-of-range parameters with their defaults.
    ///
    /// `damping` must lie in `(0, 1]`. Spring and repulsion strengths must
    /// be finite and non-negative; the repulsion cap, temperature and
    /// convergence threshold must be finite and positive.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let non_negative = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 { value } else { fallback }
        };
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        };

        Self {
            max_iterations: self.max_iterations,
            damping: if self.damping > 0.0 && self.damping <= 1.0 {
                self.damping
            } else {
                defaults.damping
            },
            spring_constant: non_negative(self.spring_constant, defaults.spring_constant),
            repulsion: non_negative(self.repulsion, defaults.repulsion),
            max_repulsion: positive(self.max_repulsion, defaults.max_repulsion),
            initial_temperature: positive(self.initial_temperature, defaults.initial_temperature),
            convergence_epsilon: positive(self.convergence_epsilon, defaults.convergence_epsilon),
        }
    }
}

impl ForceReport {
    /// Displacement of the last iteration, or zero when none ran.
    pub fn final_displacement(&self) -> f64 {
        self.displacement.last().copied().unwrap_or(0.0)
    }
}

/// Spring embedder over one connected component.
#[derive(Debug, Clone)]
pub struct ForceLayout {
    config: ForceConfig,
    spacing: f64,
}

impl ForceLayout {
    /// Out-of-range parameters fall back to their defaults, see
    /// [`ForceConfig::sanitized`].
    pub fn new(config: ForceConfig, spacing: f64) -> Self {
        Self {
            config: config.sanitized(),
            spacing,
        }
    }

    /// Run the simulation. `seeds` is indexed by local node; `None`,
    /// non-finite or overly distant entries get a generated start.
    pub fn run(&self, graph: &Subgraph, seeds: &[Option<Position>]) -> (Vec<Position>, ForceReport) {
        let mut positions = self.seed(graph.len(), seeds);
        let mut report = ForceReport::default();
        if positions.len() < 2 {
            report.converged = true;
            return (positions, report);
        }

        let links: Vec<(usize, usize)> = graph.links().collect();
        let count = positions.len();
        let mut velocity = vec![Position::ORIGIN; count];
        let mut force = vec![Position::ORIGIN; count];
        let threshold = self.config.convergence_epsilon * self.spacing * count as f64;

        for iteration in 0..self.config.max_iterations {
            force.fill(Position::ORIGIN);
            self.apply_repulsion(&positions, &mut force);
            self.apply_springs(&positions, &links, &mut force);

            let temperature = self.temperature(iteration);
            let mut total = 0.0;
            for node in 0..count {
                let mut step = velocity[node].add(force[node]).scale(self.config.damping);
                let length = step.length();
                if !length.is_finite() {
                    step = Position::ORIGIN;
                } else if length > temperature {
                    step = step.scale(temperature / length);
                }
                velocity[node] = step;
                positions[node] = positions[node].add(step);
                total += step.length();
            }

            report.iterations = iteration + 1;
            report.displacement.push(total);
            if total < threshold {
                report.converged = true;
                break;
            }
        }

        (positions, report)
    }

    /// Starting positions: usable seeds as given, spiral slots for the rest.
    /// A seed is usable when its distance from the origin is finite and at
    /// most [`MAX_SEED_MAGNITUDE`].
    pub fn seed(&self, count: usize, seeds: &[Option<Position>]) -> Vec<Position> {
        let given: Vec<(usize, Position)> = (0..count)
            .filter_map(|node| {
                seeds
                    .get(node)
                    .copied()
                    .flatten()
                    .filter(|p| p.length() <= MAX_SEED_MAGNITUDE)
                    .map(|p| (node, p))
            })
            .collect();

        let center = if given.is_empty() {
            Position::ORIGIN
        } else {
            given
                .iter()
                .fold(Position::ORIGIN, |sum, &(_, p)| sum.add(p))
                .scale(1.0 / given.len() as f64)
        };
        let mut occupied = SpatialIndex::from_points(&given);
        let clearance = self.spacing / 2.0;

        let mut positions = vec![Position::ORIGIN; count];
        for &(node, p) in &given {
            positions[node] = p;
        }

        let mut slot = 0;
        let mut cursor = 0;
        for node in 0..count {
            if given.get(cursor).is_some_and(|&(seeded, _)| seeded == node) {
                cursor += 1;
                continue;
            }
            let mut candidate = center.add(self.spiral_slot(slot));
            slot += 1;
            for _ in 1..MAX_SLOT_ATTEMPTS {
                if !occupied.is_occupied(candidate, clearance) {
                    break;
                }
                candidate = center.add(self.spiral_slot(slot));
                slot += 1;
            }
            occupied.insert(node, candidate);
            positions[node] = candidate;
        }

        positions
    }

    /// Offset of a sunflower spiral slot from the spiral center.
    fn spiral_slot(&self, slot: usize) -> Position {
        let radius = SPIRAL_SCALE * self.spacing * (slot as f64 + 0.5).sqrt();
        Position::polar(radius, slot as f64 * GOLDEN_ANGLE)
    }

    /// Step cap for an iteration, cooling linearly to zero.
    fn temperature(&self, iteration: usize) -> f64 {
        let progress = iteration as f64 / self.config.max_iterations.max(1) as f64;
        self.config.initial_temperature * self.spacing * (1.0 - progress)
    }

    fn apply_repulsion(&self, positions: &[Position], force: &mut [Position]) {
        let k = self.spacing;
        let strength = self.config.repulsion * k * k * k;
        let cap = self.config.max_repulsion * k;
        let coincident = COINCIDENT_RATIO * k;

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let delta = positions[i].sub(positions[j]);
                let distance = delta.length();
                if !distance.is_finite() {
                    continue;
                }
                let push = if distance < coincident {
                    Position::polar(cap, GOLDEN_ANGLE * (i + j + 1) as f64)
                } else {
                    let magnitude = (strength / (distance * distance)).min(cap);
                    delta.scale(magnitude / distance)
                };
                force[i] = force[i].add(push);
                force[j] = force[j].sub(push);
            }
        }
    }

    fn apply_springs(&self, positions: &[Position], links: &[(usize, usize)], force: &mut [Position]) {
        let k = self.spacing;
        for &(a, b) in links {
            let delta = positions[b].sub(positions[a]);
            let distance = delta.length();
            if !distance.is_finite() || distance < COINCIDENT_RATIO * k {
                continue;
            }
            // positive stretch pulls a towards b
            let pull = delta.scale(self.config.spring_constant * (distance - k) / distance);
            force[a] = force[a].add(pull);
            force[b] = force[b].sub(pull);
        }
    }
}
