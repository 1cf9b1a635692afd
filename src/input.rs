use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::error::Result;
use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Pause,
    Quit,
}

/// Which letters steer. Arrow keys work with either.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyBindings {
    /// w a s d
    Classic,
    /// k h j l
    Vim,
}

impl KeyBindings {
    pub fn command_for(self, ev: &KeyEvent) -> Option<Command> {
        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Up => Some(Command::Turn(North)),
            KeyCode::Left => Some(Command::Turn(West)),
            KeyCode::Down => Some(Command::Turn(South)),
            KeyCode::Right => Some(Command::Turn(East)),
            KeyCode::Esc => Some(Command::Pause),
            KeyCode::Char(' ') => Some(Command::Restart),
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char(c) => self.letter_direction(c.to_ascii_lowercase()).map(Command::Turn),
            _ => None,
        }
    }

    /// Movement line for the intro screen.
    pub fn help(self) -> &'static str {
        match self {
            KeyBindings::Classic => "Arrow keys or WASD to move",
            KeyBindings::Vim => "Arrow keys or HJKL to move",
        }
    }

    fn letter_direction(self, c: char) -> Option<Direction> {
        match (self, c) {
            (KeyBindings::Classic, 'w') | (KeyBindings::Vim, 'k') => Some(North),
            (KeyBindings::Classic, 'a') | (KeyBindings::Vim, 'h') => Some(West),
            (KeyBindings::Classic, 's') | (KeyBindings::Vim, 'j') => Some(South),
            (KeyBindings::Classic, 'd') | (KeyBindings::Vim, 'l') => Some(East),
            _ => None,
        }
    }
}

pub trait Input {
    /// Waits at most `timeout` for one key and maps it to a command.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Command>>;
}

/// Keys read from the terminal through crossterm.
pub struct Keyboard {
    bindings: KeyBindings,
}

impl Keyboard {
    pub fn new(bindings: KeyBindings) -> Self {
        Keyboard { bindings }
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = event::read()? {
                return Ok(ev);
            }
        }
    }
}

impl Input for Keyboard {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(ev) => Ok(self.bindings.command_for(&ev)),
            _ => Ok(None),
        }
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
