use std::time::{Duration, Instant};

use crate::engine::{Board, CellView, GameError, GameState, RevealResult};

pub const GRID_SIZE: usize = 10;
pub const MINE_COUNT: usize = 15;

/// Which terminal message to show, when there is one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMessage {
    Won,
    Lost,
}

impl GameMessage {
    pub fn text(self) -> &'static str {
        match self {
            GameMessage::Won => "Congratulations! You cleared the board!",
            GameMessage::Lost => "Boom! You hit a mine. Game over.",
        }
    }
}

// One stopwatch per session. Stopping is a one-way transition that freezes
// the elapsed value, so no later read can observe time advancing.
#[derive(Debug)]
enum Stopwatch {
    Running { started: Instant },
    Stopped { took: Duration },
}

impl Stopwatch {
    fn start() -> Self {
        Stopwatch::Running { started: Instant::now() }
    }

    fn stop(&mut self) {
        if let Stopwatch::Running { started } = *self {
            *self = Stopwatch::Stopped { took: started.elapsed() };
        }
    }

    fn elapsed(&self) -> Duration {
        match *self {
            Stopwatch::Running { started } => started.elapsed(),
            Stopwatch::Stopped { took } => took,
        }
    }
}

/// Owns the board, the clock, and the generation settings. All player input
/// is routed through the two action methods; front-ends read state back
/// through the query methods and never touch cells directly.
pub struct GameSession {
    board: Board,
    clock: Stopwatch,
    exclude_corners: bool,
    seed: u64,
}

impl GameSession {
    /// Starts a session on a fresh standard board. A non-zero seed makes
    /// every game of this session reproduce the same layout.
    pub fn new(exclude_corners: bool, seed: u64) -> Result<Self, GameError> {
        let board = Board::new(GRID_SIZE, MINE_COUNT, exclude_corners, seed)?;
        Ok(Self { board, clock: Stopwatch::start(), exclude_corners, seed })
    }

    /// Wraps a prepared board, typically one built with `Board::with_mines`.
    pub fn from_board(board: Board) -> Self {
        Self { board, clock: Stopwatch::start(), exclude_corners: true, seed: 0 }
    }

    /// Replaces the board with a freshly generated standard one and restarts
    /// the clock from zero.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        self.board = Board::new(GRID_SIZE, MINE_COUNT, self.exclude_corners, self.seed)?;
        self.clock = Stopwatch::start();
        log::debug!("new game started");
        Ok(())
    }

    /// Reveal at (row, col). No-op once the game is over; the clock freezes
    /// in the same call that reaches a terminal state.
    pub fn primary_action(&mut self, row: usize, col: usize) -> RevealResult {
        let result = self.board.reveal(row, col);
        if matches!(result, RevealResult::HitMine | RevealResult::Won) {
            self.clock.stop();
        }
        result
    }

    /// Toggle a flag at (row, col). No-op once the game is over or on a
    /// revealed cell.
    pub fn secondary_action(&mut self, row: usize, col: usize) -> bool {
        self.board.toggle_flag(row, col)
    }

    pub fn cell_view(&self, row: usize, col: usize) -> Option<CellView> {
        self.board.cell_view(row, col)
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn is_over(&self) -> bool {
        self.board.state().is_terminal()
    }

    pub fn mines_remaining(&self) -> i32 {
        self.board.mines_remaining()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed().as_secs()
    }

    pub fn message(&self) -> Option<GameMessage> {
        match self.board.state() {
            GameState::Playing => None,
            GameState::Won => Some(GameMessage::Won),
            GameState::Lost => Some(GameMessage::Lost),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}
