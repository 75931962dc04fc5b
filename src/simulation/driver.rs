//! Simulation facade and time-step driver

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use crate::core::config::{check_fraction, SimConfig};
use crate::core::error::{Result, SchellingError};
use crate::core::types::{Cell, Position};
use crate::grid::{Grid, Population};
use crate::simulation::happiness;
use crate::simulation::movement;

/// How a simulation run ended. All three are normal termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Every resident reached the happiness threshold.
    FullyHappy,
    /// Aggregate happiness stopped changing near the end of the budget.
    Stagnated,
    /// The step budget ran out first.
    StepBudgetExhausted,
}

/// Summary of a `simulate` run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub outcome: Outcome,
    pub steps: u32,
    pub final_happiness: f64,
    pub duration_ms: u64,
}

/// Owns the grid and drives the segregation model.
///
/// Single-threaded by design: the grid is mutated exclusively through this
/// facade, one step at a time.
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    radius: usize,
    happiness_threshold: f64,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Build a freshly populated simulation from a validated config.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let mut sim = Self {
            grid: Grid::new(config.size),
            radius: config.neighborhood_radius,
            happiness_threshold: config.happiness_threshold,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        };
        sim.repopulate(config.vacant_fraction, config.red_fraction);
        Ok(sim)
    }

    fn repopulate(&mut self, vacant_fraction: f64, red_fraction: f64) {
        let population =
            Population::from_fractions(self.grid.size(), vacant_fraction, red_fraction);
        self.grid.repopulate(population, &mut self.rng);
    }

    /// Regenerate the population counts and reshuffle every cell.
    ///
    /// All fractions are validated before any state changes.
    pub fn reset(
        &mut self,
        vacant_fraction: f64,
        red_fraction: f64,
        happiness_threshold: f64,
    ) -> Result<()> {
        check_fraction("vacant_fraction", vacant_fraction)?;
        check_fraction("red_fraction", red_fraction)?;
        check_fraction("happiness_threshold", happiness_threshold)?;

        self.happiness_threshold = happiness_threshold;
        self.repopulate(vacant_fraction, red_fraction);
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn happiness_threshold(&self) -> f64 {
        self.happiness_threshold
    }

    pub fn color(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(Position::new(row, col))
    }

    /// Returns false when the position is out of bounds.
    pub fn set_color(&mut self, row: usize, col: usize, color: Cell) -> bool {
        self.grid.set(Position::new(row, col), color)
    }

    /// Cycle a cell Vacant -> Red -> Blue -> Vacant.
    pub fn shift_color(&mut self, row: usize, col: usize) -> bool {
        self.grid.shift(Position::new(row, col))
    }

    fn checked_position(&self, row: usize, col: usize) -> Result<Position> {
        if self.grid.in_bounds(row, col) {
            Ok(Position::new(row, col))
        } else {
            Err(SchellingError::OutOfBounds {
                row,
                col,
                size: self.grid.size(),
            })
        }
    }

    /// Hypothetical happiness of `color` at (row, col).
    pub fn happiness(&self, row: usize, col: usize, color: Cell) -> Result<f64> {
        let pos = self.checked_position(row, col)?;
        happiness::happiness(&self.grid, pos, color, self.radius)
            .ok_or(SchellingError::EmptyNeighborhood)
    }

    /// Whether the resident at (row, col) meets the happiness threshold.
    ///
    /// Happiness is only defined for residents: querying a vacant cell is
    /// an error, as is a position outside the grid.
    pub fn is_happy(&self, row: usize, col: usize) -> Result<bool> {
        let pos = self.checked_position(row, col)?;
        match self.grid.get(pos) {
            Some(color) if color.is_occupied() => {
                let fraction = happiness::happiness(&self.grid, pos, color, self.radius)
                    .ok_or(SchellingError::EmptyNeighborhood)?;
                Ok(fraction >= self.happiness_threshold)
            }
            _ => Err(SchellingError::VacantCell { row, col }),
        }
    }

    /// Fraction of residents currently happy.
    pub fn fraction_happy(&self) -> f64 {
        happiness::fraction_happy(&self.grid, self.radius, self.happiness_threshold)
    }

    /// One unordered randomizing step.
    pub fn one_time_step(&mut self) {
        movement::random_step(
            &mut self.grid,
            self.radius,
            self.happiness_threshold,
            &mut self.rng,
        );
    }

    /// One greedy directed step.
    pub fn directed_step(&mut self) {
        movement::directed_step(&mut self.grid, self.radius, self.happiness_threshold);
    }

    /// Run directed steps until everyone is happy, progress stalls for
    /// good, or the step budget runs out.
    ///
    /// A step whose aggregate happiness matches the previous baseline
    /// triggers one randomizing step while more than 15 steps remain;
    /// afterwards it counts toward the stall limit of 10.
    pub fn simulate(&mut self, max_steps: u32) -> SimulationReport {
        let start = Instant::now();
        let mut baseline = 0.0;
        let mut stalled = 0;
        let mut outcome = Outcome::StepBudgetExhausted;
        let mut steps = max_steps;

        for step in 0..max_steps {
            self.directed_step();

            let measured = self.fraction_happy();
            if measured >= 1.0 {
                info!("every resident is happy after {} steps", step + 1);
                outcome = Outcome::FullyHappy;
                steps = step + 1;
                break;
            }

            if measured == baseline {
                if step + 15 < max_steps {
                    info!(
                        "happiness stuck at {:.1}%, randomizing unhappy residents",
                        measured * 100.0
                    );
                    self.one_time_step();
                } else {
                    stalled += 1;
                }
            }

            if stalled >= 10 {
                info!(
                    "not everyone can be happy in this configuration, stopping at {:.1}%",
                    baseline * 100.0
                );
                outcome = Outcome::Stagnated;
                steps = step + 1;
                break;
            }

            baseline = self.fraction_happy();
            info!("step {}: happiness at {:.1}%", step + 1, baseline * 100.0);
        }

        SimulationReport {
            outcome,
            steps,
            final_happiness: self.fraction_happy(),
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}
