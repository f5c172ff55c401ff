use std::io::{self, Write};

use clap::Parser;
use minefield::session::{GameSession, GRID_SIZE, MINE_COUNT};
use minefield::tui;

#[derive(Parser, Debug)]
#[command(name = "minefield", about = "Terminal Minesweeper on a fixed 10x10 grid", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Seed (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Allow mines in the four corner cells
    #[arg(long)]
    corner_mines: bool,
}

fn print_help() {
    println!("Commands:");
    println!("  r row col - reveal cell at row, col (1-based)");
    println!("  f row col - toggle flag at row, col (1-based)");
    println!("  n         - start a new game");
    println!("  q         - quit");
    println!("  h/help    - show this help");
}

fn main() {
    let args = Args::parse();
    let exclude_corners = !args.corner_mines;
    if args.tui {
        if let Err(e) = tui::run_tui(exclude_corners, args.seed) {
            eprintln!("TUI error: {}", e);
        }
        return;
    }
    let mut session = match GameSession::new(exclude_corners, args.seed) {
        Ok(s) => s,
        Err(e) => { eprintln!("{}", e); return; }
    };

    println!("Minefield {}x{} with {} mines{}", GRID_SIZE, GRID_SIZE, MINE_COUNT, if args.seed != 0 { format!(" (seed {})", args.seed) } else { String::new() });
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    loop {
        println!("\n{}", session.board());
        println!("Mines: {}  Time: {}s", session.mines_remaining(), session.elapsed_secs());
        if let Some(msg) = session.message() {
            println!("{}", msg.text());
            println!("Final board (mines shown):\n{}", session.board().render(true, true));
            println!("Type 'n' for a new game or 'q' to quit.");
        }

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        if io::stdin().read_line(&mut input).is_err() { break; }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => { print_help(); continue; },
            "n" | "new" => {
                if let Err(e) = session.new_game() { eprintln!("{}", e); break; }
            }
            "r" | "reveal" => {
                if parts.len() < 3 { println!("Usage: r row col"); continue; }
                let row = match parts[1].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid row"); continue; } };
                let col = match parts[2].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid col"); continue; } };
                if row == 0 || col == 0 { println!("Use 1-based coordinates"); continue; }
                let _ = session.primary_action(row - 1, col - 1);
            }
            "f" | "flag" => {
                if parts.len() < 3 { println!("Usage: f row col"); continue; }
                let row = match parts[1].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid row"); continue; } };
                let col = match parts[2].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid col"); continue; } };
                if row == 0 || col == 0 { println!("Use 1-based coordinates"); continue; }
                if !session.secondary_action(row - 1, col - 1) { println!("Cannot flag revealed cell or out of bounds"); }
            }
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
            }
        }
    }
}
