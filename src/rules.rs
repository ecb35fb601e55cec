use rand::Rng;
use tracing::trace;

use crate::apple::place_apple;
use crate::geometry::Grid;
use crate::snake::{Position, Snake, Velocity};

/// Cells the trail keeps beyond the score: the snake is `score + 3` long.
const TRAIL_BASE: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Itself,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved { ate: bool },
    Crashed { cause: Collision, ate: bool },
}

/// All mutable gameplay state for one round.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    snake: Snake,
    apple: Option<Position>,
    velocity: Velocity,
    previous_velocity: Velocity,
    score: u32,
    ticks: u64,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Board {
            grid,
            snake: Snake::new(grid.center()),
            apple: None,
            velocity: Velocity::STILL,
            previous_velocity: Velocity::STILL,
            score: 0,
            ticks: 0,
        }
    }

    /// Fresh round: snake at the origin heading up, empty trail, new apple.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.snake = Snake::new(self.grid.center());
        self.score = 0;
        self.ticks = 0;
        self.velocity = Velocity::UP;
        self.previous_velocity = Velocity::UP;
        self.apple = place_apple(&self.grid, &self.snake, rng);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Option<Position> {
        self.apple
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn previous_velocity(&self) -> Velocity {
        self.previous_velocity
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Queues `velocity` for the next tick unless it would turn the snake
    /// straight back onto itself. Last write wins.
    pub fn steer(&mut self, velocity: Velocity) -> bool {
        if velocity.is_reverse_of(self.previous_velocity) {
            return false;
        }
        self.velocity = velocity;
        true
    }

    pub fn freeze(&mut self) {
        self.velocity = Velocity::STILL;
    }

    /// Advances one tick. The wall is checked, then the apple, then the
    /// trail. A crash leaves the snake where it was, though an apple eaten on
    /// the same tick still scores.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickOutcome {
        let next_head = self.snake.head().offset(self.velocity);
        let ate = self.apple == Some(next_head);
        if ate {
            self.score += 1;
        }

        let step = self.snake.step(self.velocity, &self.grid, self.score as usize + TRAIL_BASE);
        if step.hit_wall {
            return TickOutcome::Crashed { cause: Collision::Wall, ate };
        }
        if step.hit_self {
            return TickOutcome::Crashed { cause: Collision::Itself, ate };
        }

        self.snake = step.next;
        self.previous_velocity = self.velocity;
        self.ticks += 1;
        if ate {
            self.apple = place_apple(&self.grid, &self.snake, rng);
        }

        trace!(head = ?self.snake.head(), score = self.score, "tick");
        TickOutcome::Moved { ate }
    }
}

#[cfg(test)]
impl Board {
    pub(crate) fn set_apple(&mut self, apple: Option<Position>) {
        self.apple = apple;
    }

    pub(crate) fn set_snake(&mut self, snake: Snake, velocity: Velocity) {
        self.snake = snake;
        self.velocity = velocity;
        self.previous_velocity = velocity;
    }
}
