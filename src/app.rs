use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::config::Config;
use crate::game::{Game, Status};
use crate::input::{Input, Key};
use crate::piece::ShapeSource;
use crate::ui;

/// Drives a [`Game`] in the terminal: draws and ticks once per frame, and
/// forwards key presses as they arrive.
pub struct App<S: ShapeSource> {
    game: Game<S>,
    input: Input,
    block: String,
    frame_interval: Duration,
    /// Cleared at game over; no frame is scheduled after that.
    scheduling: bool,
    running: bool,
}

impl<S: ShapeSource> App<S> {
    pub fn new(game: Game<S>, config: &Config) -> Self {
        Self {
            game,
            input: Input::empty(),
            block: config.block.clone(),
            frame_interval: config.frame_interval(),
            scheduling: true,
            running: false,
        }
    }

    pub fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> Result<()> {
        self.running = true;
        let mut next_frame = Instant::now();
        while self.running {
            if self.scheduling {
                let timeout = next_frame.saturating_duration_since(Instant::now());
                if let Some(event) = next_event(Some(timeout))? {
                    self.handle_event(event, &mut terminal)?;
                }
                if self.scheduling && Instant::now() >= next_frame {
                    self.frame(&mut terminal)?;
                    next_frame = Instant::now() + self.frame_interval;
                }
            } else if let Some(event) = next_event(None)? {
                self.handle_event(event, &mut terminal)?;
            }
        }
        info!("{}", self.game.score_label());
        Ok(())
    }

    /// Draw, then advance the game by one tick.
    fn frame<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if !self.scheduling {
            return Ok(());
        }
        self.draw(terminal)?;
        self.input = Input::empty();
        if self.game.tick() == Status::GameOver {
            self.stop(terminal)?;
        }
        Ok(())
    }

    fn handle_event<B: Backend>(&mut self, event: Event, terminal: &mut Terminal<B>) -> Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Esc | KeyCode::Char('q' | 'Q') => self.quit(),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
                code => {
                    let Some(key) = Key::from_code(code) else {
                        return Ok(());
                    };
                    if self.game.is_over() {
                        return Ok(());
                    }
                    debug!("key {key:?}");
                    self.input |= key.into();
                    self.game.handle_input(key);
                    if self.game.is_over() {
                        self.stop(terminal)?;
                    }
                }
            },
            Event::Resize(_, _) if !self.scheduling => self.draw(terminal)?,
            _ => {}
        }
        Ok(())
    }

    /// Renders the final screen once and stops scheduling frames.
    fn stop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.scheduling = false;
        self.draw(terminal)
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| ui::draw(frame, &self.game, self.input, &self.block))?;
        Ok(())
    }

    fn quit(&mut self) {
        self.running = false;
    }
}

/// Waits up to `timeout` for one event, forever when `None`.
fn next_event(timeout: Option<Duration>) -> Result<Option<Event>> {
    if let Some(timeout) = timeout {
        if !event::poll(timeout)? {
            return Ok(None);
        }
    }
    Ok(Some(event::read()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::ShapeSequence;
    use crate::shape::Tetromino;
    use crate::ui::{MIN_HEIGHT, MIN_WIDTH};
    use ratatui::backend::TestBackend;

    fn app_of(tetrominoes: &[Tetromino]) -> App<ShapeSequence> {
        App::new(
            Game::new(ShapeSequence::of(tetrominoes)),
            &Config::default(),
        )
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(MIN_WIDTH, MIN_HEIGHT)).unwrap()
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_frame_draws_then_ticks() {
        let mut app = app_of(&[Tetromino::I]);
        let mut terminal = terminal();
        app.frame(&mut terminal).unwrap();
        assert_eq!(1, app.game.current().pos.y());
        assert!(screen(&terminal).contains("[][][][]"));
        assert!(app.scheduling);
    }

    #[test]
    fn test_key_indicator_resets_each_frame() {
        let mut app = app_of(&[Tetromino::I]);
        let mut terminal = terminal();
        app.handle_event(press(KeyCode::Left), &mut terminal).unwrap();
        app.handle_event(press(KeyCode::Up), &mut terminal).unwrap();
        assert_eq!(Input::Left | Input::Up, app.input);

        app.frame(&mut terminal).unwrap();
        assert_eq!(Input::empty(), app.input);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut app = app_of(&[Tetromino::T]);
        let mut terminal = terminal();
        let before = app.game.current().clone();
        app.handle_event(press(KeyCode::Char('x')), &mut terminal).unwrap();
        assert_eq!(before, *app.game.current());
        assert_eq!(Input::empty(), app.input);
    }

    #[test]
    fn test_game_over_tick_stops_scheduling() {
        let mut app = app_of(&[Tetromino::O]);
        let mut terminal = terminal();
        let mut frames = 0;
        while app.scheduling {
            app.frame(&mut terminal).unwrap();
            frames += 1;
            assert!(frames < 1000, "no game over");
        }
        assert!(app.game.is_over());
        assert!(screen(&terminal).contains("GAME OVER"));

        let piece = app.game.current().clone();
        let grid = app.game.grid().clone();
        app.frame(&mut terminal).unwrap();
        for code in [KeyCode::Left, KeyCode::Right, KeyCode::Down, KeyCode::Up] {
            app.handle_event(press(code), &mut terminal).unwrap();
        }
        assert_eq!(piece, *app.game.current());
        assert_eq!(grid, *app.game.grid());
        assert_eq!(Input::empty(), app.input);
        assert!(!app.scheduling);
    }

    #[test]
    fn test_game_over_soft_drop_stops_scheduling() {
        let mut app = app_of(&[Tetromino::O]);
        let mut terminal = terminal();
        let mut presses = 0;
        while app.scheduling {
            app.handle_event(press(KeyCode::Down), &mut terminal).unwrap();
            presses += 1;
            assert!(presses < 1000, "no game over");
        }
        assert!(app.game.is_over());
        assert!(screen(&terminal).contains("GAME OVER"));

        let grid = app.game.grid().clone();
        app.frame(&mut terminal).unwrap();
        app.handle_event(press(KeyCode::Down), &mut terminal).unwrap();
        assert_eq!(grid, *app.game.grid());
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            let mut app = app_of(&[Tetromino::T]);
            app.running = true;
            app.handle_event(event, &mut terminal()).unwrap();
            assert!(!app.running);
        }
    }
}
