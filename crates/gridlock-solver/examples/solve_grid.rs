//! Example demonstrating the solver on a textual grid.
//!
//! The grid is given as rows from top to bottom; digits 1-9 are pre-filled
//! cells and `.`, `_`, or `0` are empty. Whitespace separates rows.
//!
//! # Usage
//!
//! Solve the built-in sample puzzle:
//!
//! ```sh
//! cargo run --example solve_grid
//! ```
//!
//! Solve a puzzle of your own:
//!
//! ```sh
//! cargo run --example solve_grid -- "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! ```

use std::process;

use clap::Parser;
use gridlock_solver::Puzzle;

const SAMPLE: &str = "
    7__ _21 3_9
    25_ 3__ 718
    __1 ___ _4_
    5_2 8__ __4
    3_6 _1_ 9_7
    1__ __4 5_2
    _2_ ___ 4__
    415 __7 _23
    6_3 24_ __1
";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid rows from top to bottom; digits are givens, `.`/`_`/`0` empty.
    #[arg(value_name = "GRID")]
    grid: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let grid = args.grid.as_deref().unwrap_or(SAMPLE);

    let mut puzzle = match build_puzzle(grid) {
        Ok(puzzle) => puzzle,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };
    puzzle.on_complete(|| println!("Puzzle solved."));

    if let Err(error) = puzzle.solve() {
        eprintln!("{error}");
        process::exit(1);
    }

    print_grid(&puzzle);
}

/// Parses a grid string into a pre-filled puzzle. Rows are given top to
/// bottom while the engine counts `y` bottom to top.
fn build_puzzle(grid: &str) -> Result<Puzzle, String> {
    let rows: Vec<Vec<u8>> = grid
        .split_whitespace()
        .collect::<String>()
        .chars()
        .map(cell_of)
        .collect::<Result<Vec<_>, _>>()?
        .chunks(9)
        .map(<[u8]>::to_vec)
        .collect();
    if rows.len() != 9 || rows.iter().any(|row| row.len() != 9) {
        return Err(format!(
            "expected 81 cells, got {}",
            rows.iter().map(Vec::len).sum::<usize>()
        ));
    }

    let mut puzzle = Puzzle::new(9).map_err(|error| error.to_string())?;
    for (row, cells) in rows.iter().enumerate() {
        for (column, &value) in cells.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let x = u8::try_from(column).expect("column fits in u8");
            let y = 8 - u8::try_from(row).expect("row fits in u8");
            puzzle
                .set_cell_value(x, y, value)
                .map_err(|error| error.to_string())?;
        }
    }
    Ok(puzzle)
}

fn cell_of(c: char) -> Result<u8, String> {
    match c {
        '.' | '_' | '0' => Ok(0),
        _ => c
            .to_digit(10)
            .and_then(|digit| u8::try_from(digit).ok())
            .ok_or_else(|| format!("unexpected character {c:?} in grid")),
    }
}

fn print_grid(puzzle: &Puzzle) {
    for row in 0..9 {
        let y = 8 - row;
        let line: Vec<String> = (0..9)
            .map(|x| {
                let value = puzzle.cell_value(x, y).expect("coordinates within bounds");
                if value.is_empty() { "_".to_owned() } else { value }
            })
            .collect();
        println!("{}", line.join(" "));
    }
}
