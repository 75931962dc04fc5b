//! Segregation simulation engine
//!
//! Ties together happiness evaluation, vacancy ranking, and the two
//! relocation strategies under a single `Simulation` facade.

pub mod driver;
pub mod happiness;
pub mod movement;
pub mod ranking;

pub use driver::{Outcome, Simulation, SimulationReport};
pub use ranking::RankedVacancy;
