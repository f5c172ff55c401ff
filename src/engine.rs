use std::fmt::{self, Write as _};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("board size must be positive")]
    ZeroSize,
    #[error("too many mines: {mines} requested, {available} cells available")]
    TooManyMines { mines: usize, available: usize },
    #[error("cell ({row},{col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// Outcome of a single reveal action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealResult {
    NoOp,
    Revealed,
    HitMine,
    Won,
}

/// Player-visible state of one cell; the only cell state front-ends see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

#[derive(Clone, Debug, Default)]
struct Cell {
    is_mine: bool,
    adjacent: u8,
    revealed: bool,
    flagged: bool,
}

#[derive(Debug)]
pub struct Board {
    size: usize,
    mines: usize,
    cells: Vec<Cell>,
    revealed_count: usize,
    flagged_count: usize,
    state: GameState,
}

impl Board {
    /// Generates a `size`x`size` board with `mines` mines at uniformly random
    /// distinct cells, skipping the four corners when `exclude_corners` is set.
    /// A seed of 0 draws one from the thread RNG; any other value reproduces
    /// the same board.
    pub fn new(size: usize, mines: usize, exclude_corners: bool, mut seed: u64) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::ZeroSize);
        }
        let total = size * size;
        let corners = if exclude_corners {
            if size == 1 { 1 } else { 4 }
        } else {
            0
        };
        // Impossible configurations are rejected here, never discovered by
        // the placement loop below spinning forever.
        let available = total - corners;
        if mines >= available {
            return Err(GameError::TooManyMines { mines, available });
        }

        if seed == 0 {
            seed = rand::thread_rng().gen();
        }
        let mut rng = StdRng::seed_from_u64(seed);

        let mut cells = vec![Cell::default(); total];
        let mut placed = 0;
        while placed < mines {
            let row = rng.gen_range(0..size);
            let col = rng.gen_range(0..size);
            if exclude_corners && is_corner(size, row, col) {
                continue;
            }
            let cell = &mut cells[idx(size, row, col)];
            if !cell.is_mine {
                cell.is_mine = true;
                placed += 1;
            }
        }

        let mut board = Self {
            size,
            mines,
            cells,
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::Playing,
        };
        board.compute_adjacency();
        log::debug!("generated {}x{} board with {} mines (seed {})", size, size, mines, seed);
        Ok(board)
    }

    /// Builds a board with mines at exactly the given coordinates. Duplicates
    /// collapse; the mine count is the number of distinct coordinates.
    pub fn with_mines(size: usize, mine_coords: &[(usize, usize)]) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::ZeroSize);
        }
        let total = size * size;
        let mut cells = vec![Cell::default(); total];
        let mut placed = 0;
        for &(row, col) in mine_coords {
            if row >= size || col >= size {
                return Err(GameError::OutOfBounds { row, col });
            }
            let cell = &mut cells[idx(size, row, col)];
            if !cell.is_mine {
                cell.is_mine = true;
                placed += 1;
            }
        }
        if placed >= total {
            return Err(GameError::TooManyMines { mines: placed, available: total });
        }

        let mut board = Self {
            size,
            mines: placed,
            cells,
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::Playing,
        };
        board.compute_adjacency();
        Ok(board)
    }

    fn compute_adjacency(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                let i0 = idx(self.size, row, col);
                if self.cells[i0].is_mine {
                    continue;
                }
                let mut count = 0u8;
                for (nr, nc) in neighbors(self.size, row, col) {
                    if self.cells[idx(self.size, nr, nc)].is_mine {
                        count += 1;
                    }
                }
                self.cells[i0].adjacent = count;
            }
        }
    }

    /// Flips the flag on a hidden cell. Returns false when nothing changed:
    /// out of bounds, already revealed, or the game is over.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        if row >= self.size || col >= self.size {
            return false;
        }
        let cell = &mut self.cells[idx(self.size, row, col)];
        if cell.revealed {
            return false;
        }
        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        true
    }

    /// Reveals a cell. Flagged cells are protected: revealing one is a no-op
    /// until it is unflagged. Revealing a mine loses the game and exposes
    /// every mine on the board; revealing the last safe cell wins it.
    pub fn reveal(&mut self, row: usize, col: usize) -> RevealResult {
        if self.state.is_terminal() {
            return RevealResult::NoOp;
        }
        if row >= self.size || col >= self.size {
            return RevealResult::NoOp;
        }
        let i = idx(self.size, row, col);
        if self.cells[i].revealed || self.cells[i].flagged {
            return RevealResult::NoOp;
        }

        if self.cells[i].is_mine {
            self.expose_mines();
            self.state = GameState::Lost;
            log::debug!("mine hit at ({},{})", row, col);
            return RevealResult::HitMine;
        }

        self.flood_reveal(row, col);
        if self.revealed_count == self.size * self.size - self.mines {
            self.state = GameState::Won;
            log::debug!("all {} safe cells revealed", self.revealed_count);
            RevealResult::Won
        } else {
            RevealResult::Revealed
        }
    }

    // Work-list flood fill; each popped cell re-checks the revealed/flagged/
    // mine guards, so the revealed flag alone terminates the traversal.
    fn flood_reveal(&mut self, row: usize, col: usize) {
        let mut stack = vec![(row, col)];
        while let Some((r, c)) = stack.pop() {
            let i = idx(self.size, r, c);
            if self.cells[i].revealed || self.cells[i].flagged || self.cells[i].is_mine {
                continue;
            }
            self.cells[i].revealed = true;
            self.revealed_count += 1;
            if self.cells[i].adjacent == 0 {
                for (nr, nc) in neighbors(self.size, r, c) {
                    if !self.cells[idx(self.size, nr, nc)].revealed {
                        stack.push((nr, nc));
                    }
                }
            }
        }
    }

    fn expose_mines(&mut self) {
        for cell in &mut self.cells {
            if cell.is_mine {
                cell.revealed = true;
            }
        }
    }

    /// What the player sees at (row, col). None when out of bounds.
    pub fn cell_view(&self, row: usize, col: usize) -> Option<CellView> {
        if row >= self.size || col >= self.size {
            return None;
        }
        let cell = &self.cells[idx(self.size, row, col)];
        Some(if cell.revealed {
            if cell.is_mine {
                CellView::Mine
            } else {
                CellView::Revealed(cell.adjacent)
            }
        } else if cell.flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        })
    }

    pub fn render(&self, show_all: bool, one_based: bool) -> String {
        let mut s = String::new();
        // Column header
        s.push_str("    ");
        for col in 0..self.size {
            let label = if one_based { col + 1 } else { col };
            let _ = write!(s, "{:>2} ", label);
        }
        s.push('\n');
        s.push_str("   ");
        s.push_str(&"-".repeat(self.size * 3 + 1));
        s.push('\n');

        for row in 0..self.size {
            let row_label = if one_based { row + 1 } else { row };
            let _ = write!(s, "{:>2} | ", row_label);
            for col in 0..self.size {
                let ch = if show_all && self.has_mine_at(row, col) {
                    '*'
                } else {
                    match self.cell_view(row, col).unwrap_or(CellView::Hidden) {
                        CellView::Mine => '*',
                        CellView::Revealed(0) => ' ',
                        CellView::Revealed(n) => char::from_digit(n as u32, 10).unwrap_or('?'),
                        CellView::Flagged => 'F',
                        CellView::Hidden => '.',
                    }
                };
                let _ = write!(s, "{}  ", ch);
            }
            s.push('\n');
        }
        s
    }
}

fn idx(size: usize, row: usize, col: usize) -> usize {
    row * size + col
}

fn is_corner(size: usize, row: usize, col: usize) -> bool {
    (row == 0 || row == size - 1) && (col == 0 || col == size - 1)
}

fn neighbors(size: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let row = row as isize;
    let col = col as isize;
    let size = size as isize;
    let mut out = Vec::with_capacity(8);
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let nr = row + dr;
            let nc = col + dc;
            if nr >= 0 && nc >= 0 && nr < size && nc < size {
                out.push((nr as usize, nc as usize));
            }
        }
    }
    out.into_iter()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, true))
    }
}

// Public getters for encapsulation
impl Board {
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn mine_count(&self) -> usize {
        self.mines
    }
    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }
    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }
    /// Mines minus flags; goes negative when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        self.mines as i32 - self.flagged_count as i32
    }
    pub fn state(&self) -> GameState {
        self.state
    }
    pub fn has_mine_at(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[idx(self.size, row, col)].is_mine
    }
    /// Stored neighbor-mine count; meaningful for non-mine cells only.
    pub fn adjacent_mines(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.size && col < self.size {
            Some(self.cells[idx(self.size, row, col)].adjacent)
        } else {
            None
        }
    }
}
