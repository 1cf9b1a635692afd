use log::debug;
use rand::{seq::IteratorRandom, Rng};

use crate::board::Board;
use crate::config::PLACEMENT_ATTEMPTS;
use crate::snake::{Segment, Snake};

/// The single pickup on the board. `None` means it still has to be placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Food {
    pos: Option<Segment>,
}

impl Food {
    pub fn new() -> Self {
        Food { pos: None }
    }

    pub fn position(&self) -> Option<Segment> {
        self.pos
    }

    pub fn is_set(&self) -> bool {
        self.pos.is_some()
    }

    pub fn is_at(&self, seg: Segment) -> bool {
        self.pos == Some(seg)
    }

    pub fn consume(&mut self) {
        self.pos = None;
    }

    /// Puts the food on a random free interior cell. Random sampling gives up
    /// after `PLACEMENT_ATTEMPTS` tries and picks among the remaining free cells
    /// instead. Returns `None` when the snake covers the whole interior.
    pub fn place<R: Rng>(&mut self, board: &Board, snake: &Snake, rng: &mut R) -> Option<Segment> {
        self.place_with_attempts(board, snake, rng, PLACEMENT_ATTEMPTS)
    }

    pub fn place_with_attempts<R: Rng>(
        &mut self,
        board: &Board,
        snake: &Snake,
        rng: &mut R,
        attempts: usize,
    ) -> Option<Segment> {
        self.pos = sample(board, snake, rng, attempts).or_else(|| {
            debug!("Random food placement failed, scanning for free cells");
            board
                .interior_cells()
                .filter(|cell| !snake.contains(*cell))
                .choose(rng)
        });

        self.pos
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, pos: Segment) {
        self.pos = Some(pos);
    }
}

fn sample<R: Rng>(board: &Board, snake: &Snake, rng: &mut R, attempts: usize) -> Option<Segment> {
    if board.interior_size() == 0 {
        return None;
    }

    (0..attempts)
        .map(|_| {
            Segment::new(
                rng.gen_range(1..board.rows() - 1),
                rng.gen_range(1..board.cols() - 1),
            )
        })
        .find(|cell| !snake.contains(*cell))
}
