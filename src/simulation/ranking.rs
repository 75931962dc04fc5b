//! Vacancy ranking for the directed movement strategy

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::core::types::{Cell, Position};

/// A vacant cell scored by the hypothetical happiness of each color there.
///
/// Recomputed from scratch every directed step; carries no identity across
/// steps.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVacancy {
    pub pos: Position,
    pub red_happiness: f64,
    pub blue_happiness: f64,
    pub preferred: Cell,
    pub score: f64,
}

impl RankedVacancy {
    /// The preferred color is whichever would be happier at `pos`; ties go
    /// to red.
    pub fn new(pos: Position, red_happiness: f64, blue_happiness: f64) -> Self {
        let (preferred, score) = if blue_happiness > red_happiness {
            (Cell::Blue, blue_happiness)
        } else {
            (Cell::Red, red_happiness)
        };
        Self {
            pos,
            red_happiness,
            blue_happiness,
            preferred,
            score,
        }
    }

    /// Re-target the ranking score at a fixed color.
    pub fn rescore_for(&mut self, color: Cell) {
        self.preferred = color;
        self.score = match color {
            Cell::Red => self.red_happiness,
            Cell::Blue => self.blue_happiness,
            Cell::Vacant => unreachable!("vacancies are never scored for the vacant state"),
        };
    }
}

/// Stable descending sort by score; equal scores keep their input order.
pub fn sort_by_score(vacancies: &mut [RankedVacancy]) {
    vacancies.sort_by_key(|v| Reverse(OrderedFloat(v.score)));
}

/// Re-score every vacancy against one color, then re-sort.
///
/// Used once per directed step when one color has no unhappy residents
/// left, so the remaining vacancies are ranked purely for the other color.
pub fn rescore_and_sort(vacancies: &mut [RankedVacancy], color: Cell) {
    for vacancy in vacancies.iter_mut() {
        vacancy.rescore_for(color);
    }
    sort_by_score(vacancies);
}
