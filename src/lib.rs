//! Minesweeper on a fixed 10x10 grid: board generation, cascading reveal,
//! and a session object that owns the game state, counters, and clock.
//! The TUI and line-mode front-ends are thin adapters over `session`.

pub mod engine;
pub mod session;
pub mod tui;
