use super::board_widget::BoardStyle;
use super::game_view;
use crate::config::UiConfig;
use crate::game::{GameState, MoveError, Placement, Position, BOARD_SIZE};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::fmt;
use std::io;
use std::time::Duration;
use tracing::{debug, info};

pub struct App {
    game_state: GameState,
    cursor: Position,
    should_quit: bool,
    message: Option<String>,
    config: UiConfig,
    /// Size of the last drawn frame, for mapping mouse clicks to the board.
    frame_area: Rect,
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        App {
            game_state: GameState::initial(),
            cursor: center(),
            should_quit: false,
            message: None,
            config,
            frame_area: Rect::default(),
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: fmt::Display,
    {
        info!("entering game loop");
        loop {
            self.draw(terminal)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Draw one frame, remembering its size for mouse hit-testing
    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: fmt::Display,
    {
        let mut frame_area = self.frame_area;
        terminal
            .draw(|f| {
                frame_area = f.area();
                self.render(f);
            })
            .map_err(|e| io::Error::other(e.to_string()))?;
        self.frame_area = frame_area;
        Ok(())
    }

    /// Read game state for rendering and tests
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Handle keyboard and mouse events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.config.poll_interval_ms))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("quit requested");
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place_stone(self.cursor);
            }
            KeyCode::Char('r') => {
                self.game_state.reset();
                self.cursor = center();
                info!("game reset");
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Left click places a stone on the intersection under the pointer
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.config.mouse {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let geometry = game_view::board_geometry(self.frame_area);
        match geometry.cell_at(mouse.column, mouse.row) {
            Some(pos) => {
                self.message = None;
                self.cursor = pos;
                self.place_stone(pos);
            }
            None => debug!(x = mouse.column, y = mouse.row, "click outside the board"),
        }
    }

    /// Move the cursor, stopping at the board edge
    fn move_cursor(&mut self, dr: isize, dc: isize) {
        if let Some(next) = self.cursor.offset(dr, dc) {
            self.cursor = next;
        }
    }

    /// Place a stone for the current player at `pos`
    fn place_stone(&mut self, pos: Position) {
        let player = self.game_state.current_player();

        match self.game_state.place(pos.row, pos.col) {
            Ok(Placement::Win) => {
                info!(
                    winner = player.name(),
                    position = %pos,
                    stones = self.game_state.move_count(),
                    "game won"
                );
                self.message = Some(format!("{} wins! Press 'r' to play again.", player.name()));
            }
            Ok(Placement::Continue) => {
                info!(player = player.name(), position = %pos, "stone placed");
                if self.game_state.board().is_full() {
                    info!("board full with no winner");
                    self.message = Some("Board is full. Press 'r' to restart.".to_string());
                }
            }
            Err(err) => {
                debug!(?err, position = %pos, "placement rejected");
                self.message = Some(
                    match err {
                        MoveError::Occupied => "That intersection is taken!",
                        MoveError::OutOfBounds => "That is off the board!",
                        MoveError::GameOver => "Game over! Press 'r' to restart.",
                    }
                    .to_string(),
                );
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let style = BoardStyle {
            cursor: Some(self.cursor),
            highlight_last_move: self.config.highlight_last_move,
        };
        game_view::render(frame, &self.game_state, style, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

fn center() -> Position {
    Position::new(BOARD_SIZE / 2, BOARD_SIZE / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn app_with_frame() -> App {
        let mut app = App::default();
        app.frame_area = Rect::new(0, 0, 80, 30);
        app
    }

    #[test]
    fn test_new_app_starts_centered() {
        let app = App::default();
        assert_eq!(app.cursor, Position::new(7, 7));
        assert_eq!(app.game_state().current_player(), Player::Black);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut app = App::default();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, Position::new(6, 6));

        for _ in 0..20 {
            press(&mut app, KeyCode::Up);
            press(&mut app, KeyCode::Char('h'));
        }
        assert_eq!(app.cursor, Position::new(0, 0));

        for _ in 0..20 {
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Char('l'));
        }
        assert_eq!(app.cursor, Position::new(14, 14));
    }

    #[test]
    fn test_enter_places_at_cursor() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.game_state().board().get(7, 7), Cell::Black);
        assert_eq!(app.game_state().current_player(), Player::White);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.game_state().board().get(7, 8), Cell::White);
    }

    #[test]
    fn test_occupied_cell_reports_message() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message.as_deref(), Some("That intersection is taken!"));
        assert_eq!(app.game_state().current_player(), Player::White);
    }

    #[test]
    fn test_win_then_moves_rejected_then_reset() {
        let mut app = App::default();
        for (row, col) in [(0, 0), (5, 0), (0, 1), (5, 2), (0, 2), (5, 4), (0, 3), (5, 6), (0, 4)] {
            app.place_stone(Position::new(row, col));
        }
        assert_eq!(app.game_state().winner(), Some(Player::Black));
        assert_eq!(app.message.as_deref(), Some("Black wins! Press 'r' to play again."));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message.as_deref(), Some("Game over! Press 'r' to restart."));
        assert_eq!(app.game_state().board().get(7, 7), Cell::Empty);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game_state(), &GameState::initial());
        assert_eq!(app.cursor, Position::new(7, 7));
        assert_eq!(app.message.as_deref(), Some("New game started!"));
    }

    #[test]
    fn test_full_board_reports_message_and_stays_in_progress() {
        let mut app = App::default();
        // Two-row stripes alternating by column never line up five stones
        let (black, white): (Vec<_>, Vec<_>) = (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
            .partition(|pos| (pos.row / 2 + pos.col) % 2 == 0);
        assert_eq!(black.len(), white.len() + 1);

        for (b, w) in black.iter().zip(&white) {
            app.place_stone(*b);
            app.place_stone(*w);
            assert_eq!(app.message, None);
        }
        assert_eq!(app.game_state().move_count(), 224);

        let last = *black.last().unwrap();
        app.place_stone(last);
        assert!(app.game_state().board().is_full());
        assert!(!app.game_state().is_over());
        assert_eq!(app.game_state().winner(), None);
        assert_eq!(
            app.message.as_deref(),
            Some("Board is full. Press 'r' to restart.")
        );

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message.as_deref(), Some("That intersection is taken!"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = App::default();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_click_places_stone() {
        let mut app = app_with_frame();
        let target = Position::new(3, 11);
        let (x, y) = game_view::board_geometry(app.frame_area).screen_cell(target);

        click(&mut app, x, y);
        assert_eq!(app.game_state().board().get(3, 11), Cell::Black);
        assert_eq!(app.game_state().last_move(), Some(target));
        assert_eq!(app.cursor, target);
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut app = app_with_frame();
        click(&mut app, 0, 0);
        click(&mut app, 79, 29);
        assert_eq!(app.game_state(), &GameState::initial());
    }

    #[test]
    fn test_right_click_is_ignored() {
        let mut app = app_with_frame();
        let (x, y) = game_view::board_geometry(app.frame_area).screen_cell(Position::new(1, 1));
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.game_state().move_count(), 0);
    }

    #[test]
    fn test_mouse_disabled_in_config() {
        let config = UiConfig {
            mouse: false,
            ..UiConfig::default()
        };
        let mut app = App::new(config);
        app.frame_area = Rect::new(0, 0, 80, 30);
        let (x, y) = game_view::board_geometry(app.frame_area).screen_cell(Position::new(2, 2));

        click(&mut app, x, y);
        assert_eq!(app.game_state().move_count(), 0);
    }

    #[test]
    fn test_draw_records_frame_size_for_clicks() {
        let mut app = App::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        app.draw(&mut terminal).unwrap();
        assert_eq!(app.frame_area, Rect::new(0, 0, 100, 40));

        let target = Position::new(14, 0);
        let (x, y) = game_view::board_geometry(app.frame_area).screen_cell(target);
        click(&mut app, x, y);
        assert_eq!(app.game_state().board().get(14, 0), Cell::Black);
    }
}
