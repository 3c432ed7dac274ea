//! The 8×8 grid of square contents.

use chess_core::{Color, Move, MoveFlag, Piece, PieceKind, Placement, Square};
use std::fmt;

/// Contents of all 64 squares.
///
/// `Board` is a plain `Copy` value, so simulating a move on a scratch copy
/// costs one 128-byte memcpy and never allocates.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

const fn back_rank(color: Color) -> [Option<Piece>; 8] {
    const ORDER: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    let mut rank = [None; 8];
    let mut col = 0;
    while col < 8 {
        rank[col] = Some(Piece::new(color, ORDER[col]));
        col += 1;
    }
    rank
}

const fn standard_cells() -> [Option<Piece>; 64] {
    let mut cells = [None; 64];
    let black = back_rank(Color::Black);
    let white = back_rank(Color::White);
    let mut col = 0;
    while col < 8 {
        cells[col] = black[col];
        cells[8 + col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        cells[48 + col] = Some(Piece::new(Color::White, PieceKind::Pawn));
        cells[56 + col] = white[col];
        col += 1;
    }
    cells
}

impl Board {
    /// A board with no pieces at all.
    pub const EMPTY: Board = Board { cells: [None; 64] };

    /// The standard starting arrangement.
    pub const STANDARD: Board = Board {
        cells: standard_cells(),
    };

    /// Builds a board from a row-major placement grid.
    pub fn from_placement(placement: &Placement) -> Self {
        let mut board = Board::EMPTY;
        for (row, cells) in placement.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                board.cells[row * 8 + col] = cell;
            }
        }
        board
    }

    /// Returns the board as a row-major placement grid.
    pub fn to_placement(&self) -> Placement {
        let mut placement: Placement = [[None; 8]; 8];
        for sq in Square::all() {
            placement[sq.row() as usize][sq.col() as usize] = self.get(sq);
        }
        placement
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    /// Places (or clears) a square.
    #[inline]
    pub fn set(&mut self, sq: Square, cell: Option<Piece>) {
        self.cells[sq.index() as usize] = cell;
    }

    /// Empties a square, returning what stood there.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize].take()
    }

    /// Returns true if the square holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over the occupied squares of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Returns the square of the given side's king, if it is on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::all().find(|&sq| self.get(sq) == Some(king))
    }

    /// Moves pieces on the grid as `m` describes.
    ///
    /// Besides relocating the moving piece this removes a pawn captured en
    /// passant, relocates the rook of a castling move, and swaps a promoting
    /// pawn for the promotion piece. No legality is checked.
    pub fn apply_move(&mut self, m: Move) {
        match m.flag {
            MoveFlag::EnPassant => {
                // The captured pawn sits beside the mover, not on the destination
                if let Some(victim) = Square::new(m.from.row() as usize, m.to.col() as usize) {
                    self.take(victim);
                }
            }
            flag if flag.is_castling() => {
                let (rook_from, rook_to) = castling_rook_squares(m.color(), m.flag);
                let rook = self.take(rook_from);
                self.set(rook_to, rook);
            }
            _ => {}
        }

        let moving = self.take(m.from);
        let landed = match m.flag.promotion_piece() {
            Some(kind) => Some(Piece::new(m.color(), kind)),
            None => moving,
        };
        self.set(m.to, landed);
    }

    /// Returns a copy of the board with `m` applied.
    #[inline]
    pub fn with_move(mut self, m: Move) -> Board {
        self.apply_move(m);
        self
    }

    /// Returns the board seen from the other side: rows flipped and every
    /// piece handed to the opposite color.
    pub fn mirrored(&self) -> Board {
        let mut board = Board::EMPTY;
        for sq in Square::all() {
            board.set(
                sq.flip_vertical(),
                self.get(sq).map(Piece::with_opposite_color),
            );
        }
        board
    }
}

/// Returns the rook's (from, to) squares for a castling move.
pub fn castling_rook_squares(color: Color, flag: MoveFlag) -> (Square, Square) {
    match (color, flag) {
        (Color::White, MoveFlag::CastleQueenside) => (Square::A1, Square::D1),
        (Color::White, _) => (Square::H1, Square::F1),
        (Color::Black, MoveFlag::CastleQueenside) => (Square::A8, Square::D8),
        (Color::Black, _) => (Square::H8, Square::F8),
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::STANDARD
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                if col > 0 {
                    write!(f, " ")?;
                }
                let c = Square::new(row, col)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        write!(f, "{}", self)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_layout() {
        let board = Board::STANDARD;
        assert_eq!(
            board.get(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.get(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            board.get(sq("g1")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(board.pieces_of(Color::White).count(), 16);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
        assert!(board.is_empty(sq("e4")));
    }

    #[test]
    fn display_draws_rows_top_down() {
        let text = Board::STANDARD.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "r n b q k b n r");
        assert_eq!(lines[4], ". . . . . . . .");
        assert_eq!(lines[7], "R N B Q K B N R");
    }

    #[test]
    fn king_square() {
        assert_eq!(Board::STANDARD.king_square(Color::White), Some(Square::E1));
        assert_eq!(Board::STANDARD.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::EMPTY.king_square(Color::White), None);
    }

    #[test]
    fn placement_roundtrip() {
        let board = Board::STANDARD;
        assert_eq!(Board::from_placement(&board.to_placement()), board);
    }

    #[test]
    fn apply_en_passant_removes_passed_pawn() {
        let mut board = Board::EMPTY;
        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
        let black_pawn = Piece::new(Color::Black, PieceKind::Pawn);
        board.set(sq("e5"), Some(white_pawn));
        board.set(sq("d5"), Some(black_pawn));

        board.apply_move(Move::new(sq("e5"), sq("d6"), white_pawn, MoveFlag::EnPassant));

        assert_eq!(board.get(sq("d6")), Some(white_pawn));
        assert!(board.is_empty(sq("d5")));
        assert!(board.is_empty(sq("e5")));
    }

    #[test]
    fn apply_castling_moves_both_pieces() {
        let mut board = Board::EMPTY;
        let king = Piece::new(Color::Black, PieceKind::King);
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        board.set(Square::E8, Some(king));
        board.set(Square::A8, Some(rook));

        board.apply_move(Move::new(
            Square::E8,
            Square::C8,
            king,
            MoveFlag::CastleQueenside,
        ));

        assert_eq!(board.get(Square::C8), Some(king));
        assert_eq!(board.get(Square::D8), Some(rook));
        assert!(board.is_empty(Square::A8));
        assert!(board.is_empty(Square::E8));
    }

    #[test]
    fn apply_promotion_replaces_pawn() {
        let mut board = Board::EMPTY;
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        board.set(sq("b7"), Some(pawn));

        let board = board.with_move(Move::new(sq("b7"), sq("b8"), pawn, MoveFlag::PromoteQueen));

        assert_eq!(
            board.get(sq("b8")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert!(board.is_empty(sq("b7")));
    }

    #[test]
    fn mirrored_standard_board_is_itself() {
        assert_eq!(Board::STANDARD.mirrored(), Board::STANDARD);
    }
}
