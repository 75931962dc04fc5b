//! Schelling-style residential segregation simulation engine.
//!
//! A square grid of cells, each vacant or housing a red or blue resident.
//! Unhappy residents relocate over discrete time steps toward neighborhoods
//! with enough same-color neighbors.

pub mod core;
pub mod grid;
pub mod simulation;
