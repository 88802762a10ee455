use std::rc::Rc;

use super::board_widget::{self, BoardGeometry, BoardStyle, BOARD_HEIGHT};
use crate::game::{GameState, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Min(BOARD_HEIGHT), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(3),         // Controls
        ])
        .split(area)
}

/// Where the board lands for a frame of the given size.
pub fn board_geometry(frame_area: Rect) -> BoardGeometry {
    BoardGeometry::centered_in(layout(frame_area)[1])
}

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    style: BoardStyle,
    message: &Option<String>,
) {
    let chunks = layout(frame.area());

    render_header(frame, game_state, chunks[0]);
    board_widget::render_board(frame, game_state, style, BoardGeometry::centered_in(chunks[1]));
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Black => Color::Gray,
        Player::White => Color::White,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let current_player = game_state.current_player();

    let status = match game_state.winner() {
        Some(winner) => format!(
            "{} wins after {} stones!",
            winner.name(),
            game_state.move_count()
        ),
        None if game_state.board().is_full() => format!(
            "Board full  |  No winner after {} stones",
            game_state.move_count()
        ),
        None => format!(
            "Current Player: {}  |  Move {}",
            current_player.name(),
            game_state.move_count() + 1
        ),
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current_player))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Gomoku"));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←↑↓→/hjkl: Move  |  Enter/Click: Place  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BOARD_SIZE;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(state: &GameState, message: Option<String>) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render(f, state, BoardStyle::default(), &message))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_current_player() {
        let mut state = GameState::initial();
        assert!(screen_text(&state, None).contains("Current Player: Black  |  Move 1"));

        state.place(7, 7).unwrap();
        assert!(screen_text(&state, None).contains("Current Player: White  |  Move 2"));
    }

    #[test]
    fn test_header_shows_winner() {
        let mut state = GameState::initial();
        for (row, col) in [(0, 0), (5, 0), (0, 1), (5, 2), (0, 2), (5, 4), (0, 3), (5, 6), (0, 4)] {
            state.place(row, col).unwrap();
        }
        assert!(screen_text(&state, None).contains("Black wins after 9 stones!"));
    }

    #[test]
    fn test_header_on_full_board_without_winner() {
        let mut state = GameState::initial();
        // Stripes two rows tall, alternating every column: no run longer than
        // two in any direction. Black gets 113 cells, White 112.
        let (black, white): (Vec<_>, Vec<_>) = (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .partition(|&(row, col)| (row / 2 + col) % 2 == 0);
        for i in 0..black.len() {
            state.place(black[i].0, black[i].1).unwrap();
            if let Some(&(row, col)) = white.get(i) {
                state.place(row, col).unwrap();
            }
        }
        assert!(state.board().is_full());
        assert!(!state.is_over());

        let text = screen_text(&state, None);
        assert!(text.contains("Board full  |  No winner after 225 stones"));
        assert!(!text.contains("Move 226"));
    }

    #[test]
    fn test_message_is_rendered() {
        let state = GameState::initial();
        let text = screen_text(&state, Some("New game started!".to_string()));
        assert!(text.contains("New game started!"));
    }

    #[test]
    fn test_board_geometry_matches_layout() {
        let area = Rect::new(0, 0, 80, 30);
        let geometry = board_geometry(area);
        // Header takes the first three lines; the board is centered below it
        assert!(geometry.area().y >= 3);
        assert_eq!(geometry.area().x, (80 - board_widget::BOARD_WIDTH) / 2);
        assert_eq!(geometry.area().height, BOARD_HEIGHT);
    }
}
