use std::time::Instant;

use anyhow::{bail, Result};
use rand::Rng;
use tracing::info;

use snake::{Cell, EndReason, Session, SessionState, TickEvent};

use crate::input::{command_for, Command};
use crate::term::{Coords, TermManager};

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Terminal front-end: owns the screen, feeds key presses into the session
/// and ticks it at the configured rate.
pub struct SnakeGame<R> {
    session: Session<R>,
    term: TermManager,
    paused: bool,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(session: Session<R>, term: TermManager) -> Result<Self> {
        let grid = session.grid();
        let (need_w, need_h) = (grid.width() + 2, grid.height() + 3);
        let (w, h) = term.get_terminal_size();

        if w < need_w || h < need_h {
            bail!(
                "terminal is {}x{}, a {}x{} grid needs at least {}x{}",
                w, h, grid.width(), grid.height(), need_w, need_h
            );
        }

        Ok(SnakeGame { session, term, paused: false })
    }

    /// Runs until the player quits. The terminal is restored even when the
    /// game loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.play();
        self.term.restore()?;
        res
    }

    fn play(&mut self) -> Result<()> {
        self.draw_all()?;
        if !self.show_intro()? {
            return Ok(());
        }

        let interval = self.session.config().tick_interval();
        let mut last_tick = Instant::now();

        loop {
            let timeout = interval.saturating_sub(last_tick.elapsed());

            for key_ev in self.term.read_key_events(timeout)? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Turn(dir)) if !self.paused => self.session.request_direction(dir),
                    Some(Command::Pause) if !self.session.is_ended() => self.toggle_pause()?,
                    Some(Command::Restart) if self.session.is_ended() => {
                        self.session.reset();
                        info!("new round");
                        self.draw_all()?;
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() < interval {
                continue;
            }
            last_tick = Instant::now();

            if self.paused { continue; }

            match self.session.tick() {
                TickEvent::Idle => {}
                TickEvent::Moved { new_head, old_head, old_tail } => {
                    self.print_snake_update(new_head, old_head, old_tail)?;
                }
                TickEvent::Ate { new_head, old_head, old_tail, food } => {
                    self.print_snake_update(new_head, old_head, old_tail)?;
                    self.term.print_at(to_screen(food), APPLE_CHAR)?;
                    self.print_score()?;
                }
                TickEvent::BoardFull { new_head, old_head, old_tail } => {
                    self.print_snake_update(new_head, old_head, old_tail)?;
                    self.print_score()?;
                    self.game_over()?;
                }
                TickEvent::Crashed => self.game_over()?,
            }

            self.term.flush()?;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Returns false if the player quit from the intro screen.
    fn show_intro(&mut self) -> Result<bool> {
        let center = self.board_center();
        self.term.show_message(center, &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ])?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        match command_for(&key) {
            Some(Command::Quit) => return Ok(false),
            Some(Command::Turn(dir)) => self.session.request_direction(dir),
            _ => {}
        }
        Ok(true)
    }

    fn game_over(&mut self) -> Result<()> {
        let win = self.session.state() == SessionState::Ended(EndReason::BoardFull);
        let s = if win {"You won!"} else {"Game over!"};
        info!(score = self.session.score(), win, "round over");

        if !win {
            let body: Vec<Cell> = self.session.snake().positions().copied().collect();
            for pos in body {
                self.term.print_at(to_screen(pos), DEAD_SNAKE_CHAR)?;
            }
        }

        let score = format!("Final score: {}", self.session.score());
        let center = self.board_center();
        self.term.show_message(center, &[
            s,
            score.as_str(),
            "",
            "Press SPACE to play again,",
            "or q to quit."
        ])?;
        Ok(())
    }

    fn draw_all(&mut self) -> Result<()> {
        let grid = self.session.grid();
        self.term.clear()?;
        self.term.draw_borders((grid.width() + 2, grid.height() + 2))?;

        self.term.print_at(to_screen(self.session.food().position()), APPLE_CHAR)?;

        let head_char = self.session.snake().head_char();
        let body: Vec<Cell> = self.session.snake().positions().copied().collect();
        for (i, pos) in body.into_iter().enumerate() {
            let ch = if i == 0 {head_char} else {SNAKE_BODY_CHAR};
            self.term.print_at(to_screen(pos), ch)?;
        }

        self.print_score()?;
        self.term.flush()?;
        Ok(())
    }

    fn print_snake_update(&mut self, new_head: Cell, old_head: Cell, old_tail: Option<Cell>) -> Result<()> {
        if let Some(old_tail_pos) = old_tail {
            self.term.print_at(to_screen(old_tail_pos), ' ')?;
        }

        self.term.print_at(to_screen(old_head), SNAKE_BODY_CHAR)?;
        self.term.print_at(to_screen(new_head), self.session.snake().head_char())?;
        Ok(())
    }

    fn print_score(&mut self) -> Result<()> {
        let row = self.session.grid().height() + 2;
        self.term.print_str_at((0, row), &format!("Score: {:<8}", self.session.score()))?;
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            let center = self.board_center();
            self.term.show_message(center, &["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }

    fn board_center(&self) -> Coords {
        let grid = self.session.grid();
        ((grid.width() + 2) / 2, (grid.height() + 2) / 2)
    }
}

/// Board cells sit inside a one character border.
fn to_screen(cell: Cell) -> Coords {
    (cell.x + 1, cell.y + 1)
}
