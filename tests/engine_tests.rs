use minefield::engine::{Board, CellView, GameError, GameState, RevealResult};

fn neighbors(size: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let row = row as isize; let col = col as isize; let size = size as isize;
    let mut out = Vec::new();
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 { continue; }
            let nr = row + dr; let nc = col + dc;
            if nr >= 0 && nc >= 0 && nr < size && nc < size { out.push((nr as usize, nc as usize)); }
        }
    }
    out.into_iter()
}

fn count_mines(b: &Board) -> usize {
    let mut mines = 0;
    for row in 0..b.size() {
        for col in 0..b.size() {
            if b.has_mine_at(row, col) { mines += 1; }
        }
    }
    mines
}

#[test]
fn generated_boards_have_exact_mine_count() {
    for seed in 1..=20 {
        let b = Board::new(10, 15, false, seed).expect("board");
        assert_eq!(count_mines(&b), 15, "wrong mine count for seed {}", seed);
    }
}

#[test]
fn corner_exclusion_keeps_corners_clear() {
    for seed in 1..=25 {
        let b = Board::new(10, 15, true, seed).expect("board");
        assert_eq!(count_mines(&b), 15);
        for (row, col) in [(0, 0), (0, 9), (9, 0), (9, 9)] {
            assert!(!b.has_mine_at(row, col), "mine in corner ({},{}) for seed {}", row, col, seed);
        }
    }
}

#[test]
fn adjacency_matches_neighbor_mines() {
    let b = Board::new(10, 15, false, 999).expect("board");
    for row in 0..b.size() {
        for col in 0..b.size() {
            if b.has_mine_at(row, col) { continue; }
            let mut adj = 0;
            for (nr, nc) in neighbors(b.size(), row, col) {
                if b.has_mine_at(nr, nc) { adj += 1; }
            }
            assert_eq!(b.adjacent_mines(row, col).unwrap() as usize, adj, "adjacency mismatch at ({},{})", row, col);
        }
    }
}

#[test]
fn same_seed_reproduces_the_same_board() {
    let a = Board::new(10, 15, false, 4242).expect("board");
    let b = Board::new(10, 15, false, 4242).expect("board");
    for row in 0..10 {
        for col in 0..10 {
            assert_eq!(a.has_mine_at(row, col), b.has_mine_at(row, col));
        }
    }
}

#[test]
fn impossible_configurations_are_rejected() {
    assert_eq!(Board::new(0, 0, false, 1).unwrap_err(), GameError::ZeroSize);
    assert_eq!(
        Board::new(3, 9, false, 1).unwrap_err(),
        GameError::TooManyMines { mines: 9, available: 9 }
    );
    // corner exclusion shrinks the available cells
    assert_eq!(
        Board::new(10, 96, true, 1).unwrap_err(),
        GameError::TooManyMines { mines: 96, available: 96 }
    );
    assert!(Board::new(10, 95, true, 1).is_ok());
}

#[test]
fn with_mines_rejects_bad_coords_and_full_boards() {
    assert_eq!(
        Board::with_mines(3, &[(3, 0)]).unwrap_err(),
        GameError::OutOfBounds { row: 3, col: 0 }
    );
    assert_eq!(
        Board::with_mines(2, &[(0, 0), (0, 1), (1, 0), (1, 1)]).unwrap_err(),
        GameError::TooManyMines { mines: 4, available: 4 }
    );
    // duplicates collapse to a single mine
    let b = Board::with_mines(3, &[(1, 1), (1, 1)]).expect("board");
    assert_eq!(b.mine_count(), 1);
}

#[test]
fn revealing_a_flagged_cell_is_a_noop() {
    let mut b = Board::with_mines(3, &[(2, 2)]).expect("board");
    assert!(b.toggle_flag(0, 0));
    assert_eq!(b.reveal(0, 0), RevealResult::NoOp);
    assert_eq!(b.cell_view(0, 0), Some(CellView::Flagged));
    assert_eq!(b.revealed_count(), 0);
}

#[test]
fn cascade_reveals_zero_region_and_its_border_only() {
    // Wall of mines down column 2 splits the board into two regions.
    let mut b = Board::with_mines(5, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]).expect("board");
    assert_eq!(b.reveal(0, 0), RevealResult::Revealed);

    for row in 0..5 {
        assert_eq!(b.cell_view(row, 0), Some(CellView::Revealed(0)), "({},0)", row);
        match b.cell_view(row, 1) {
            Some(CellView::Revealed(n)) => assert!(n > 0, "({},1) should border the wall", row),
            other => panic!("({},1) not revealed: {:?}", row, other),
        }
        // the wall and everything beyond it stays hidden
        for col in 2..5 {
            assert_eq!(b.cell_view(row, col), Some(CellView::Hidden), "({},{})", row, col);
        }
    }
    assert_eq!(b.revealed_count(), 10);
    assert_eq!(b.state(), GameState::Playing);
}

#[test]
fn cascade_skips_flagged_cells() {
    let mut b = Board::with_mines(5, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]).expect("board");
    assert!(b.toggle_flag(1, 0));
    assert_eq!(b.reveal(0, 0), RevealResult::Revealed);

    // the flag survives and cuts the zero-chain below it
    assert_eq!(b.cell_view(1, 0), Some(CellView::Flagged));
    assert_eq!(b.cell_view(2, 0), Some(CellView::Hidden));
}

#[test]
fn win_exactly_when_all_safe_cells_revealed() {
    let mut b = Board::with_mines(2, &[(0, 0)]).expect("board");
    assert_eq!(b.reveal(0, 1), RevealResult::Revealed);
    assert_eq!(b.state(), GameState::Playing);
    assert_eq!(b.reveal(1, 0), RevealResult::Revealed);
    assert_eq!(b.state(), GameState::Playing);
    assert_eq!(b.reveal(1, 1), RevealResult::Won);
    assert_eq!(b.state(), GameState::Won);
    assert_eq!(b.revealed_count(), 3);
}

#[test]
fn loss_exposes_every_mine_even_flagged_ones() {
    let mut b = Board::with_mines(3, &[(0, 0), (2, 2)]).expect("board");
    assert!(b.toggle_flag(2, 2));
    assert_eq!(b.reveal(0, 0), RevealResult::HitMine);
    assert_eq!(b.state(), GameState::Lost);
    assert_eq!(b.cell_view(0, 0), Some(CellView::Mine));
    assert_eq!(b.cell_view(2, 2), Some(CellView::Mine));
}

#[test]
fn terminal_state_blocks_further_actions() {
    let mut b = Board::with_mines(3, &[(0, 0)]).expect("board");
    assert_eq!(b.reveal(0, 0), RevealResult::HitMine);

    let revealed_before = b.revealed_count();
    assert_eq!(b.reveal(1, 1), RevealResult::NoOp);
    assert!(!b.toggle_flag(1, 1));
    assert_eq!(b.revealed_count(), revealed_before);
    assert_eq!(b.cell_view(1, 1), Some(CellView::Hidden));
}

#[test]
fn out_of_bounds_actions_are_noops() {
    let mut b = Board::with_mines(10, &[(5, 5)]).expect("board");
    assert_eq!(b.reveal(10, 0), RevealResult::NoOp);
    assert_eq!(b.reveal(0, 10), RevealResult::NoOp);
    assert!(!b.toggle_flag(10, 10));
    assert_eq!(b.cell_view(10, 0), None);
}

#[test]
fn corner_mine_loses_immediately() {
    let mut b = Board::with_mines(10, &[(0, 0)]).expect("board");
    assert_eq!(b.reveal(0, 0), RevealResult::HitMine);
    assert_eq!(b.state(), GameState::Lost);
}

#[test]
fn flag_toggle_restores_the_counter() {
    let mut b = Board::new(10, 15, false, 7).expect("board");
    assert_eq!(b.mines_remaining(), 15);
    assert!(b.toggle_flag(1, 1));
    assert_eq!(b.mines_remaining(), 14);
    assert!(b.toggle_flag(1, 1));
    assert_eq!(b.mines_remaining(), 15);
    assert_eq!(b.cell_view(1, 1), Some(CellView::Hidden));
}

#[test]
fn over_flagging_drives_the_counter_negative() {
    let mut b = Board::with_mines(3, &[(0, 0)]).expect("board");
    assert!(b.toggle_flag(0, 1));
    assert!(b.toggle_flag(1, 1));
    assert!(b.toggle_flag(2, 2));
    assert_eq!(b.mines_remaining(), -2);
}
