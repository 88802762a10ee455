//! # Gomoku
//!
//! Five-in-a-row on a 15×15 board for two players sharing one terminal.
//! The terminal UI is built with Ratatui and accepts both keyboard and mouse
//! input.
//!
//! ## Modules
//!
//! - [`game`] — Core rules: board, player, win detection, turn state machine
//! - [`ui`] — Terminal UI: board rendering, cursor, click hit-testing
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
