use std::collections::VecDeque;

use crate::geometry::Grid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Position { col, row }
    }

    pub fn offset(self, velocity: Velocity) -> Self {
        Position::new(self.col + velocity.dx as i32, self.row + velocity.dy as i32)
    }
}

/// Movement per tick. Once moving, exactly one axis is non-zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i8,
    pub dy: i8,
}

impl Velocity {
    pub const STILL: Velocity = Velocity { dx: 0, dy: 0 };
    pub const UP: Velocity = Velocity { dx: 0, dy: -1 };
    pub const DOWN: Velocity = Velocity { dx: 0, dy: 1 };
    pub const LEFT: Velocity = Velocity { dx: -1, dy: 0 };
    pub const RIGHT: Velocity = Velocity { dx: 1, dy: 0 };

    pub fn is_reverse_of(self, other: Velocity) -> bool {
        self != Velocity::STILL && self.dx == -other.dx && self.dy == -other.dy
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity::STILL
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    head: Position,
    trail: VecDeque<Position>,
}

/// The result of advancing a snake by one tick. Nothing is committed until
/// the caller decides the tick survived.
#[derive(Clone, Debug)]
pub struct Step {
    pub next: Snake,
    pub hit_wall: bool,
    pub hit_self: bool,
}

impl Step {
    pub fn crashed(&self) -> bool {
        self.hit_wall || self.hit_self
    }
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake { head, trail: VecDeque::new() }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    /// Body cells, oldest first.
    pub fn trail(&self) -> &VecDeque<Position> {
        &self.trail
    }

    pub fn len(&self) -> usize {
        self.trail.len() + 1
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.trail.contains(&pos)
    }

    /// Head first, then the trail from newest to oldest.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.trail.iter().rev().copied())
    }

    /// Moves the head by `velocity`. The old head joins the trail, which is
    /// then trimmed from the oldest end down to `trail_cap` cells, so the
    /// body lags the head by one step.
    pub fn step(&self, velocity: Velocity, grid: &Grid, trail_cap: usize) -> Step {
        let next_head = self.head.offset(velocity);
        let hit_wall = !grid.contains(next_head);

        let mut trail = self.trail.clone();
        trail.push_back(self.head);
        while trail.len() > trail_cap {
            trail.pop_front();
        }

        let hit_self = trail.contains(&next_head);

        Step { next: Snake { head: next_head, trail }, hit_wall, hit_self }
    }
}

#[cfg(test)]
impl Snake {
    pub(crate) fn from_parts(head: Position, trail: &[Position]) -> Self {
        Snake { head, trail: trail.iter().copied().collect() }
    }
}
