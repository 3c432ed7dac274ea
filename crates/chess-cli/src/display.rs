//! Text rendering of the board.

use chess_engine::Board;

/// Draws the board, optionally framed by rank numbers and file letters.
pub fn render(board: &Board, coordinates: bool) -> String {
    let grid = board.to_string();
    if !coordinates {
        return grid;
    }

    let mut out = String::new();
    for (row, line) in grid.lines().enumerate() {
        out.push_str(&format!("{} {}\n", 8 - row, line));
    }
    out.push_str("  a b c d e f g h\n");
    out
}
