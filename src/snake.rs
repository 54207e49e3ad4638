use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step `(dx, dy)`, with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// Body segments, head at the front. Turns requested between two moves are
/// held in `pending` and only take effect on the next `commit_turn`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
}

impl Snake {
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();

        let body = (0..size as i32)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body, direction, pending: None }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        Snake { body: cells.iter().copied().collect(), direction, pending: None }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Reversals are judged against the direction of the last move, so a
    /// burst of turns between two moves can never fold the head into the neck.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if !new_direction.is_opposite(self.direction) {
            self.pending = Some(new_direction);
        }
    }

    pub fn commit_turn(&mut self) {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }
    }

    pub fn next_head(&self) -> Cell {
        let (dx, dy) = self.direction.delta();
        let head = self.head();
        (head.0 + dx, head.1 + dy)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}
