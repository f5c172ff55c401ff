use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use crate::engine::CellView;
use crate::session::{GameSession, GRID_SIZE, MINE_COUNT};

pub fn run_tui(exclude_corners: bool, seed: u64) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = GameSession::new(exclude_corners, seed)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    // cursor is (row, col)
    let mut cursor = (0usize, 0usize);
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(250);

    let mut last_inner_board = Rect::default();
    let res = loop {
        terminal.draw(|f| { last_inner_board = ui(f, &session, cursor); })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                        KeyCode::Char('h') | KeyCode::Left => {
                            if cursor.1 > 0 { cursor.1 -= 1; }
                        }
                        KeyCode::Char('l') | KeyCode::Right => {
                            if cursor.1 + 1 < GRID_SIZE { cursor.1 += 1; }
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            if cursor.0 > 0 { cursor.0 -= 1; }
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            if cursor.0 + 1 < GRID_SIZE { cursor.0 += 1; }
                        }
                        KeyCode::Char('f') => { let _ = session.secondary_action(cursor.0, cursor.1); }
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                            let _ = session.primary_action(cursor.0, cursor.1);
                        }
                        KeyCode::Char('n') => { let _ = session.new_game(); }
                        _ => {}
                    }
                }
                Event::Mouse(m) => {
                    // Map mouse to cell coordinates within the inner board area
                    if let MouseEventKind::Down(btn) = m.kind {
                        if let Some((row, col)) = pos_to_cell(m.column, m.row, last_inner_board) {
                            match btn {
                                MouseButton::Left => { let _ = session.primary_action(row, col); }
                                MouseButton::Right => { let _ = session.secondary_action(row, col); }
                                MouseButton::Middle => {}
                            }
                        }
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    };

    // teardown via guard; just ensure cursor visible
    terminal.show_cursor()?;
    res
}

fn ui(f: &mut ratatui::Frame, session: &GameSession, cursor: (usize, usize)) -> Rect {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(f.size());

    // Header
    let status = match session.message() {
        Some(msg) => format!("{} n to restart, q to quit", msg.text()),
        None => "Mouse: left=reveal, right=flag • Arrows/HJKL move • Enter/Space reveal • f flag • n new • q quit".to_string(),
    };
    let header = Paragraph::new(status)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minefield"));
    f.render_widget(header, root[0]);

    // Board area
    let area = centered_grid_area(root[1]);
    // Draw the board and compute the inner area used by cells (inside borders)
    let inner = inner_area(area);
    draw_board(f, session, area, cursor);

    let footer = Paragraph::new(format!(
        "Mines: {}  Time: {}s  Size: {}x{}",
        session.mines_remaining(),
        session.elapsed_secs(),
        GRID_SIZE,
        GRID_SIZE
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    inner
}

fn centered_grid_area(parent: Rect) -> Rect {
    let cell_w = 2; // one char + one space
    let cell_h = 1;
    let grid_w = GRID_SIZE as u16 * cell_w;
    let grid_h = GRID_SIZE as u16 * cell_h;
    let x = parent.x.saturating_add((parent.width.saturating_sub(grid_w)) / 2);
    let y = parent.y.saturating_add((parent.height.saturating_sub(grid_h)) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_board(f: &mut ratatui::Frame, session: &GameSession, area: Rect, cursor: (usize, usize)) {
    // Build lines of text representing each row.
    let mut lines: Vec<Line> = Vec::with_capacity(GRID_SIZE);
    for row in 0..GRID_SIZE {
        let mut spans: Vec<Span> = Vec::with_capacity(GRID_SIZE * 2);
        for col in 0..GRID_SIZE {
            let view = session.cell_view(row, col).unwrap_or(CellView::Hidden);

            let (mut ch, mut style) = match view {
                CellView::Mine => ('*', Style::default().fg(Color::Red)),
                CellView::Flagged => ('F', Style::default().fg(Color::Yellow)),
                CellView::Revealed(0) => (' ', number_style(0)),
                CellView::Revealed(n) => {
                    (char::from_digit(n as u32, 10).unwrap_or('?'), number_style(n))
                }
                CellView::Hidden => ('·', Style::default().fg(Color::DarkGray)),
            };

            // Highlight selected cell
            if cursor.0 == row && cursor.1 == col {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' { ch = '·'; }
            }

            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let board_block = Block::default().borders(Borders::ALL).title(format!("{} mines", MINE_COUNT));
    let para = Paragraph::new(lines).block(board_block);
    f.render_widget(para, area);
}

fn number_style(n: u8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn inner_area(area: Rect) -> Rect {
    // Match Block::inner() for Borders::ALL: shrink by 1 on each side
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

fn pos_to_cell(mx: u16, my: u16, inner: Rect) -> Option<(usize, usize)> {
    if mx < inner.x || my < inner.y { return None; }
    let rel_x = mx - inner.x;
    let rel_y = my - inner.y;
    let cell_w = 2u16; // must match centered_grid_area and rendering width
    let col = (rel_x / cell_w) as usize;
    let row = rel_y as usize;
    if row < GRID_SIZE && col < GRID_SIZE { Some((row, col)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        use crossterm::ExecutableCommand;
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
