use std::collections::{vec_deque, VecDeque};

use crate::board::Board;
use crate::config::MIN_SNAKE_LENGTH;
use crate::error::SnakeError;
use Direction::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub row: i32,
    pub col: i32,
}

impl Segment {
    pub fn new(row: i32, col: i32) -> Self {
        Segment { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Segment::new(self.row + dr, self.col + dc)
    }

    pub fn manhattan(self, other: Segment) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    /// (row, col) delta of one step.
    pub fn offset(self) -> (i32, i32) {
        match self {
            North => (-1, 0),
            East => (0, 1),
            South => (1, 0),
            West => (0, -1),
        }
    }
}

/// The snake's body, head first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Segment>,
    heading: Direction,
    min_len: usize,
}

impl Snake {
    /// Lays out `length` segments with the head at `head`, trailing behind it
    /// opposite to `facing`.
    pub fn new(head: Segment, length: usize, facing: Direction) -> Self {
        assert!(length >= 1, "a snake needs at least one segment");

        let back = facing.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut pos = head;
        for _ in 0..length {
            body.push_back(pos);
            pos = pos.step(back);
        }

        Snake { body, heading: facing, min_len: MIN_SNAKE_LENGTH.min(length) }
    }

    pub fn centered(board: &Board, length: usize, facing: Direction) -> Self {
        Snake::new(board.center(), length, facing)
    }

    pub fn head(&self) -> Segment {
        self.body[0]
    }

    pub fn tail(&self) -> Segment {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn body(&self) -> vec_deque::Iter<'_, Segment> {
        self.body.iter()
    }

    pub fn contains(&self, seg: Segment) -> bool {
        self.body.contains(&seg)
    }

    /// Whether the head shares its cell with any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|s| *s == head)
    }

    /// Moves one cell towards `direction`: a new head in front, the tail dropped.
    pub fn advance(&mut self, direction: Direction) -> Segment {
        let new_head = self.head().step(direction);

        self.body.push_front(new_head);
        self.body.pop_back();
        self.heading = direction;

        new_head
    }

    /// Extends the tail by `count` cells, away from the current heading.
    pub fn grow(&mut self, count: usize) {
        let back = self.heading.opposite();
        for _ in 0..count {
            let new_tail = self.tail().step(back);
            self.body.push_back(new_tail);
        }
    }

    pub fn shrink(&mut self, count: usize) -> Result<(), SnakeError> {
        let length = self.body.len();
        if length < self.min_len + count {
            return Err(SnakeError::TooShort { length, count, min: self.min_len });
        }

        self.body.truncate(length - count);
        Ok(())
    }

    /// Moves the head to `to` in place, leaving the rest of the body and the length untouched.
    pub fn warp_head(&mut self, to: Segment) {
        self.body[0] = to;
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            North => '^',
            South => 'v',
            West => '<',
            East => '>',
        }
    }
}
