use crate::config::{MAX_COLS, MAX_ROWS};
use crate::snake::Segment;

/// Playable bounds. Row 0, col 0, row `rows - 1` and col `cols - 1` are the
/// frame; everything strictly inside is the interior the snake lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    rows: i32,
    cols: i32,
}

impl Board {
    pub fn new(rows: i32, cols: i32) -> Self {
        Board { rows, cols }
    }

    /// Board filling a terminal of the given size, capped at `MAX_ROWS` x `MAX_COLS`.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Board::new(
            (height as i32).min(MAX_ROWS),
            (width as i32).min(MAX_COLS),
        )
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn center(&self) -> Segment {
        Segment::new(self.rows / 2, self.cols / 2)
    }

    pub fn is_interior(&self, seg: Segment) -> bool {
        seg.row >= 1 && seg.row <= self.rows - 2 && seg.col >= 1 && seg.col <= self.cols - 2
    }

    /// Where a segment that left the interior re-enters it on the opposite edge.
    pub fn wrap(&self, seg: Segment) -> Segment {
        let (max_row, max_col) = (self.rows - 2, self.cols - 2);

        let row = if seg.row > max_row {
            1
        } else if seg.row < 1 {
            max_row
        } else {
            seg.row
        };

        let col = if seg.col > max_col {
            1
        } else if seg.col < 1 {
            max_col
        } else {
            seg.col
        };

        Segment::new(row, col)
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = Segment> {
        let (rows, cols) = (self.rows, self.cols);
        (1..rows - 1).flat_map(move |row| (1..cols - 1).map(move |col| Segment::new(row, col)))
    }

    pub fn interior_size(&self) -> usize {
        ((self.rows - 2).max(0) * (self.cols - 2).max(0)) as usize
    }
}
