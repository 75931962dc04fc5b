//! Relocation strategies
//!
//! `random_step` pairs unhappy residents with vacancies uniformly at random
//! and moves them unconditionally; it exists to shake the grid out of a
//! fixed point. `directed_step` assigns the best-ranked vacancies first and
//! only accepts moves that strictly improve the mover's happiness.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Cell, Position};
use crate::grid::Grid;
use crate::simulation::happiness::{self, is_happy};
use crate::simulation::ranking::{self, RankedVacancy};

/// One unordered time step: as many unhappy residents as can be paired with
/// a vacancy each move to a uniformly random one.
///
/// Index draws are re-drawn against the current pool sizes; pools shrink by
/// swap-remove after every move. Origins freed during the step do not
/// rejoin the vacancy pool.
pub fn random_step(grid: &mut Grid, radius: usize, threshold: f64, rng: &mut ChaCha8Rng) {
    let mut vacancies: Vec<Position> = Vec::new();
    let mut unhappy: Vec<Position> = Vec::new();
    for pos in grid.positions() {
        match grid.get(pos) {
            Some(Cell::Vacant) => vacancies.push(pos),
            Some(_) => {
                if !is_happy(grid, pos, radius, threshold) {
                    unhappy.push(pos);
                }
            }
            None => {}
        }
    }

    let moves = vacancies.len().min(unhappy.len());
    for _ in 0..moves {
        let target = vacancies.swap_remove(rng.gen_range(0..vacancies.len()));
        let origin = unhappy.swap_remove(rng.gen_range(0..unhappy.len()));
        if let Some(color) = grid.get(origin) {
            grid.set(target, color);
            grid.set(origin, Cell::Vacant);
        }
    }
}

/// One directed time step.
///
/// Vacancies are ranked by the happiness their preferred color would enjoy
/// there, best first. Each round pairs the head vacancy with the head of
/// the matching unhappy queue and moves it only if it gains happiness over
/// staying home. When one color's queue empties, the remaining vacancies
/// are re-ranked once for the other color.
pub fn directed_step(grid: &mut Grid, radius: usize, threshold: f64) {
    let mut unhappy_red: VecDeque<Position> = VecDeque::new();
    let mut unhappy_blue: VecDeque<Position> = VecDeque::new();
    let mut vacancies: Vec<RankedVacancy> = Vec::new();

    for pos in grid.positions() {
        let Some(cell) = grid.get(pos) else { continue };
        match cell {
            Cell::Vacant => {
                let red = happiness::happiness(grid, pos, Cell::Red, radius).unwrap_or(0.0);
                let blue = happiness::happiness(grid, pos, Cell::Blue, radius).unwrap_or(0.0);
                vacancies.push(RankedVacancy::new(pos, red, blue));
            }
            Cell::Red if !is_happy(grid, pos, radius, threshold) => unhappy_red.push_back(pos),
            Cell::Blue if !is_happy(grid, pos, radius, threshold) => unhappy_blue.push_back(pos),
            _ => {}
        }
    }

    ranking::sort_by_score(&mut vacancies);

    let moves = (unhappy_red.len() + unhappy_blue.len()).min(vacancies.len());
    let mut rescored = false;

    for _ in 0..moves {
        // Once a color runs out of unhappy residents, re-rank the remaining
        // vacancies for the other color. At most once per step.
        if !rescored {
            if unhappy_red.is_empty() {
                ranking::rescore_and_sort(&mut vacancies, Cell::Blue);
                rescored = true;
            } else if unhappy_blue.is_empty() {
                ranking::rescore_and_sort(&mut vacancies, Cell::Red);
                rescored = true;
            }
        }

        match vacancies[0].preferred {
            Cell::Red => {
                if !unhappy_red.is_empty() {
                    attempt_move(grid, radius, &mut unhappy_red, &mut vacancies, Cell::Red);
                } else if !unhappy_blue.is_empty() {
                    attempt_move(grid, radius, &mut unhappy_blue, &mut vacancies, Cell::Blue);
                }
            }
            Cell::Blue => {
                if !unhappy_blue.is_empty() {
                    attempt_move(grid, radius, &mut unhappy_blue, &mut vacancies, Cell::Blue);
                } else if !unhappy_red.is_empty() {
                    attempt_move(grid, radius, &mut unhappy_red, &mut vacancies, Cell::Red);
                }
            }
            Cell::Vacant => unreachable!("vacancy preference is always an occupant color"),
        }
    }
}

/// Move the head of `movers` into the head vacancy if its happiness there
/// strictly exceeds its happiness at home, measured with the mover's own
/// cell vacated so it does not count as its own neighbor. Both heads are
/// consumed either way.
fn attempt_move(
    grid: &mut Grid,
    radius: usize,
    movers: &mut VecDeque<Position>,
    vacancies: &mut Vec<RankedVacancy>,
    color: Cell,
) {
    let target = vacancies.remove(0).pos;
    let Some(origin) = movers.pop_front() else {
        return;
    };

    grid.set(origin, Cell::Vacant);
    let at_target = happiness::happiness(grid, target, color, radius).unwrap_or(0.0);
    let at_origin = happiness::happiness(grid, origin, color, radius).unwrap_or(0.0);
    if at_target > at_origin {
        grid.set(target, color);
    } else {
        grid.set(origin, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    use crate::grid::Population;

    fn seeded_grid(size: usize, vacant: f64, red: f64, seed: u64) -> (Grid, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::new(size);
        grid.repopulate(Population::from_fractions(size, vacant, red), &mut rng);
        (grid, rng)
    }

    #[test]
    fn test_directed_step_moves_isolated_red_toward_cluster() {
        let mut grid = Grid::new(3);
        grid.set(Position::new(0, 0), Cell::Blue);
        grid.set(Position::new(0, 1), Cell::Red);
        grid.set(Position::new(2, 1), Cell::Red);
        grid.set(Position::new(2, 2), Cell::Red);

        directed_step(&mut grid, 1, 1.0);

        // The isolated red at (0,1) relocates into the best-ranked vacancy
        // (1,2), adjacent to the cluster. Every other resident stays put:
        // no remaining vacancy strictly improves on their current spot.
        assert_eq!(grid.get(Position::new(0, 1)), Some(Cell::Vacant));
        assert_eq!(grid.get(Position::new(1, 2)), Some(Cell::Red));
        assert_eq!(grid.get(Position::new(0, 0)), Some(Cell::Blue));
        assert_eq!(grid.get(Position::new(2, 1)), Some(Cell::Red));
        assert_eq!(grid.get(Position::new(2, 2)), Some(Cell::Red));
    }

    #[test]
    fn test_directed_step_rejects_moves_that_do_not_improve() {
        // Three reds around one vacancy at threshold 1.0. The vacancy ranks
        // at a perfect 1.0 for red, but once the candidate vacates its own
        // cell the move is 2/3 -> 2/3: no strict gain, so nobody moves.
        let mut grid = Grid::new(2);
        grid.set(Position::new(0, 0), Cell::Red);
        grid.set(Position::new(0, 1), Cell::Red);
        grid.set(Position::new(1, 0), Cell::Red);
        let before = grid.clone();

        directed_step(&mut grid, 1, 1.0);

        assert_eq!(grid, before);
    }

    #[test]
    fn test_directed_step_without_vacancies_is_noop() {
        let mut grid = Grid::new(2);
        grid.set(Position::new(0, 0), Cell::Red);
        grid.set(Position::new(0, 1), Cell::Blue);
        grid.set(Position::new(1, 0), Cell::Blue);
        grid.set(Position::new(1, 1), Cell::Red);
        let before = grid.clone();

        directed_step(&mut grid, 1, 1.0);

        assert_eq!(grid, before);
    }

    #[test]
    fn test_random_step_moves_every_unhappy_resident_when_room_allows() {
        // Threshold 1.0 with mixed colors adjacent: both residents unhappy,
        // seven vacancies available, so both must relocate.
        let mut grid = Grid::new(3);
        grid.set(Position::new(0, 0), Cell::Red);
        grid.set(Position::new(0, 1), Cell::Blue);

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        random_step(&mut grid, 1, 1.0, &mut rng);

        assert_eq!(grid.get(Position::new(0, 0)), Some(Cell::Vacant));
        assert_eq!(grid.get(Position::new(0, 1)), Some(Cell::Vacant));
        assert_eq!(grid.count(Cell::Red), 1);
        assert_eq!(grid.count(Cell::Blue), 1);
        assert_eq!(grid.count(Cell::Vacant), 7);
    }

    #[test]
    fn test_random_step_leaves_happy_grid_alone() {
        // At threshold 0.2 both reds clear the bar (1/3 and 1/5 same-color
        // neighbors), so there is nothing to reshuffle.
        let mut grid = Grid::new(3);
        grid.set(Position::new(0, 0), Cell::Red);
        grid.set(Position::new(0, 1), Cell::Red);
        let before = grid.clone();

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        random_step(&mut grid, 1, 0.2, &mut rng);

        assert_eq!(grid, before);
    }

    proptest! {
        #[test]
        fn prop_steps_conserve_color_counts(
            size in 2usize..10,
            vacant in 0.0f64..=1.0,
            red in 0.0f64..=1.0,
            threshold in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let (mut grid, mut rng) = seeded_grid(size, vacant, red, seed);
            let reds = grid.count(Cell::Red);
            let blues = grid.count(Cell::Blue);

            directed_step(&mut grid, 1, threshold);
            prop_assert_eq!(grid.count(Cell::Red), reds);
            prop_assert_eq!(grid.count(Cell::Blue), blues);

            random_step(&mut grid, 1, threshold, &mut rng);
            prop_assert_eq!(grid.count(Cell::Red), reds);
            prop_assert_eq!(grid.count(Cell::Blue), blues);
        }
    }
}
