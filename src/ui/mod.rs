//! Terminal UI: the board view, keyboard cursor, and mouse input.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
