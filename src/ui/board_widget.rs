use crate::game::{Cell, GameState, Position, BOARD_SIZE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Terminal columns per intersection.
const CELL_WIDTH: u16 = 3;
/// Room for the row labels on the left ("15 ").
const LABEL_WIDTH: u16 = 3;
/// One line of column labels above the grid.
const LABEL_HEIGHT: u16 = 1;

pub const BOARD_WIDTH: u16 = LABEL_WIDTH + CELL_WIDTH * BOARD_SIZE as u16;
pub const BOARD_HEIGHT: u16 = LABEL_HEIGHT + BOARD_SIZE as u16;

const WOOD: Color = Color::Rgb(220, 179, 92);

/// Where the board sits on screen. Rendering and mouse hit-testing both go
/// through this, so a click always maps to the intersection drawn under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    area: Rect,
}

impl BoardGeometry {
    /// Center the board inside `area`, clipping it if the area is too small.
    pub fn centered_in(area: Rect) -> Self {
        let width = BOARD_WIDTH.min(area.width);
        let height = BOARD_HEIGHT.min(area.height);
        BoardGeometry {
            area: Rect {
                x: area.x + (area.width - width) / 2,
                y: area.y + (area.height - height) / 2,
                width,
                height,
            },
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// The intersection under a terminal cell, if any.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.area;
        if column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let dx = (column - area.x).checked_sub(LABEL_WIDTH)?;
        let dy = (row - area.y).checked_sub(LABEL_HEIGHT)?;
        let pos = Position::new(usize::from(dy), usize::from(dx / CELL_WIDTH));
        pos.in_bounds().then_some(pos)
    }

    /// The terminal cell holding the stone glyph for `pos`.
    pub fn screen_cell(&self, pos: Position) -> (u16, u16) {
        let col = u16::try_from(pos.col).unwrap_or(u16::MAX);
        let row = u16::try_from(pos.row).unwrap_or(u16::MAX);
        (
            self.area.x + LABEL_WIDTH + col * CELL_WIDTH + 1,
            self.area.y + LABEL_HEIGHT + row,
        )
    }
}

/// Display options that don't come from the game state.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardStyle {
    pub cursor: Option<Position>,
    pub highlight_last_move: bool,
}

/// Render the board with coordinate labels into `geometry`.
pub fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    style: BoardStyle,
    geometry: BoardGeometry,
) {
    let board = game_state.board();
    let last_move = if style.highlight_last_move {
        game_state.last_move()
    } else {
        None
    };
    let winning_line = game_state.winning_line().unwrap_or_default();

    let label_style = Style::default().fg(Color::Black).bg(WOOD);
    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);

    let mut col_labels = vec![Span::styled("   ", label_style)];
    for col in 0..BOARD_SIZE {
        let label = Position::new(0, col).to_string();
        let letter = label.chars().next().unwrap_or(' ');
        col_labels.push(Span::styled(format!(" {letter} "), label_style));
    }
    lines.push(Line::from(col_labels));

    for row in 0..BOARD_SIZE {
        let mut spans = vec![Span::styled(format!("{:>2} ", row + 1), label_style)];
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            spans.push(cell_span(
                board.get(row, col),
                last_move == Some(pos),
                style.cursor == Some(pos),
                winning_line.contains(&pos),
            ));
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines).style(Style::default().bg(WOOD));
    frame.render_widget(widget, geometry.area());
}

fn cell_span(cell: Cell, last: bool, cursor: bool, winning: bool) -> Span<'static> {
    let (glyph, fg) = match cell {
        Cell::Empty => ("+", Color::Rgb(120, 90, 40)),
        Cell::Black => ("\u{25cf}", Color::Black),
        Cell::White => ("\u{25cf}", Color::White),
    };
    let text = if last {
        format!("[{glyph}]")
    } else {
        format!(" {glyph} ")
    };

    let mut style = Style::default().fg(fg).bg(WOOD);
    if winning {
        style = style.bg(Color::Red).add_modifier(Modifier::BOLD);
    }
    if cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(text, style)
}
