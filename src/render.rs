use crate::board::Board;
use crate::error::Result;
use crate::game::GameState;
use crate::input::KeyBindings;
use crate::snake::{Direction, Segment, Snake};
use crate::term::{Coords, TermManager};

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Everything a renderer gets to see after a tick.
pub struct View<'a> {
    pub board: &'a Board,
    pub snake: &'a Snake,
    pub food: Option<Segment>,
    pub direction: Direction,
    pub score: u64,
    pub high_score: u64,
    pub new_high: bool,
    pub state: GameState,
    pub frame: u64,
}

pub trait Renderer {
    fn draw(&mut self, view: &View<'_>) -> Result<()>;
}

/// Draws on the terminal. Each frame blanks the cells of the previous snake and
/// food, then draws them again at their new positions.
pub struct TermRenderer {
    term: TermManager,
    debug: bool,
    drawn: Vec<Segment>,
    last_state: Option<GameState>,
}

impl TermRenderer {
    pub fn new(term: TermManager, debug: bool) -> Self {
        TermRenderer { term, debug, drawn: vec![], last_state: None }
    }

    pub fn show_intro(&mut self, bindings: KeyBindings) -> Result<()> {
        self.term.show_message(&[
            bindings.help(),
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ])
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    fn erase_snake(&mut self) -> Result<()> {
        for seg in std::mem::take(&mut self.drawn) {
            self.term.print_at(to_coords(seg), ' ')?;
        }
        Ok(())
    }

    fn print_snake(&mut self, view: &View<'_>, alive: bool) -> Result<()> {
        for (i, seg) in view.snake.body().enumerate().rev() {
            if !view.board.is_interior(*seg) {
                continue;
            }

            let ch = match (alive, i) {
                (false, _) => DEAD_SNAKE_CHAR,
                (true, 0) => view.snake.head_char(),
                (true, _) => SNAKE_BODY_CHAR,
            };
            self.term.print_at(to_coords(*seg), ch)?;
            self.drawn.push(*seg);
        }
        Ok(())
    }

    fn print_food(&mut self, view: &View<'_>) -> Result<()> {
        if let Some(food) = view.food {
            self.term.print_at(to_coords(food), APPLE_CHAR)?;
            self.drawn.push(food);
        }
        Ok(())
    }

    /// Top border with the score between bars, the high score on the left.
    fn print_score(&mut self, view: &View<'_>) -> Result<()> {
        let cols = view.board.cols() as u16;
        for x in 1..cols.saturating_sub(1) {
            self.term.print_at((x, 0), '-')?;
        }

        let hi = format!(" HI {} ", view.high_score);
        if (hi.len() as u16) + 4 < cols {
            self.term.print_str_at((2, 0), &hi)?;
        }

        let score = format!("|{}|", view.score);
        let x = (cols / 2).saturating_sub(score.len() as u16 / 2);
        self.term.print_str_at((x, 0), &score)
    }

    fn print_debug(&mut self, view: &View<'_>) -> Result<()> {
        let head = view.snake.head();
        let lines = [
            "DEBUG:".to_string(),
            format!("{}", view.frame),
            format!("{:?}", view.direction),
            format!("{} {}", head.row, head.col),
            match view.food {
                Some(f) => format!("{} {}", f.row, f.col),
                None => "-".to_string(),
            },
            format!("{} {}", view.board.rows(), view.board.cols()),
        ];

        let max_row = view.board.rows() - 2;
        for (i, line) in lines.iter().enumerate() {
            let row = i as i32 + 1;
            if row > max_row {
                break;
            }
            self.term.print_str_at((1, row as u16), &format!("{:<12}", line))?;
        }
        Ok(())
    }

    fn game_over(&mut self, view: &View<'_>) -> Result<()> {
        let won = view.state == GameState::Won;
        if !won {
            self.print_snake(view, false)?;
        }

        let score = format!("Score: {}", view.score);
        let mut lines = vec![if won {"You won!"} else {"Game over!"}, score.as_str()];
        if view.new_high {
            lines.push("New Highscore");
        }
        lines.extend_from_slice(&["", "Press SPACE to play again,", "or q to quit."]);

        self.term.show_message(&lines)
    }
}

impl Renderer for TermRenderer {
    fn draw(&mut self, view: &View<'_>) -> Result<()> {
        let changed = self.last_state != Some(view.state);
        let first = self.last_state.is_none();
        self.last_state = Some(view.state);

        if first {
            self.term.hide_message()?;
            self.term.clear()?;
            self.term.draw_borders(view.board)?;
        }

        match view.state {
            GameState::Playing | GameState::Idle => {
                if changed {
                    self.term.hide_message()?;
                }
                self.erase_snake()?;
                if self.debug {
                    self.print_debug(view)?;
                }
                self.print_food(view)?;
                self.print_snake(view, true)?;
                self.print_score(view)?;
            }
            GameState::Paused if changed => {
                self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
            }
            GameState::GameOver | GameState::Won if changed => {
                self.print_score(view)?;
                self.game_over(view)?;
            }
            _ => {}
        }

        self.term.flush()
    }
}

fn to_coords(seg: Segment) -> Coords {
    (seg.col.max(0) as u16, seg.row.max(0) as u16)
}
