use rand::{seq::SliceRandom, Rng};

use crate::geometry::Grid;
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell not covered by the snake, or `None` when the
/// snake fills the whole board.
///
/// Random draws are tried first since free cells vastly outnumber the snake
/// on any sensible board. After `grid.area()` misses the free cells are
/// enumerated and one is chosen from that list instead.
pub fn place_apple<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Position> {
    if grid.area() == 0 {
        return None;
    }

    for _ in 0..grid.area() {
        let candidate = Position::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let choices: Vec<Position> = grid.cells().filter(|pos| !snake.occupies(*pos)).collect();
    choices.choose(rng).copied()
}
