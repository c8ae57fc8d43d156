use std::collections::VecDeque;

use crate::grid::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// True if turning from `self` to `other` would make the snake run back
    /// into its own neck.
    pub fn is_reverse_of(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }

    /// Offset of one step, in cells. `y` grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Body cells, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A straight snake of `size` cells with its head at `head`, trailing away
    /// from `direction`.
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..size.max(1) as i32)
            .map(|i| head.offset((-dx * i, -dy * i)))
            .collect();
        Snake { body }
    }

    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Snake { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Everything behind the head.
    pub fn tail_cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter().skip(1)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Pushes a new head one cell towards `direction`. Unless `grow` is set the
    /// last cell is dropped and returned.
    pub fn step(&mut self, direction: Direction, grow: bool) -> Option<Cell> {
        let new_head = self.head().offset(direction.delta());
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}
