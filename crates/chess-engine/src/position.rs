//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Move, MoveFlag, Piece, PieceKind, Square};

use crate::movegen::attacks::is_king_attacked;
use crate::Board;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses the FEN castling field ("KQkq", "Kq", "-", ...).
    pub fn from_fen(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights::new(flags)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Drops every right that depends on the piece starting on `sq`.
    ///
    /// A king leaving its home square loses both rights; a rook leaving or
    /// being captured on its corner loses the right on that wing.
    pub fn remove_touching(&mut self, sq: Square) {
        let mask = match sq {
            Square::E1 => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::E8 => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            Square::A8 => Self::BLACK_QUEENSIDE,
            _ => 0,
        };
        self.0 &= !mask;
    }

    /// Formats the rights as the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        let mut field = String::with_capacity(4);
        if self.can_castle_kingside(Color::White) {
            field.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            field.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            field.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            field.push('q');
        }
        field
    }
}

/// Complete game state: the grid, whose turn it is, and every move so far.
///
/// History is append-only. Castling and en passant legality are answered
/// by reading it rather than by tracking separate flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// The 64 squares.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Moves applied since the position was set up, oldest first.
    history: Vec<Move>,

    /// Castling rights at setup time, before any history entry.
    initial_castling: CastlingRights,

    /// Half-moves since the last capture or pawn move. Only carried for
    /// the FEN round trip; no rule reads it.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move). Also
    /// FEN-only.
    pub fullmove_number: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::STANDARD,
            side_to_move: Color::White,
            history: Vec::new(),
            initial_castling: CastlingRights::ALL,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Restores the standard starting arrangement and clears history.
    pub fn reset(&mut self) {
        *self = Self::startpos();
    }

    /// Creates a position from a FEN string.
    ///
    /// An en passant target is recorded as the opponent's double push, the
    /// last entry of an otherwise empty history. A position where the side
    /// not on move is in check is rejected, since its king could be taken.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position {
            board: Board::from_placement(&parsed.placement),
            side_to_move: parsed.active_color,
            history: Vec::new(),
            initial_castling: CastlingRights::from_fen(&parsed.castling),
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        };

        if let Some(target) = parsed.en_passant {
            let pusher = parsed.active_color.opposite();
            let invalid = || FenError::InvalidEnPassantSquare(target.to_algebraic());
            let dir = pusher.pawn_direction();
            let from = target.offset(-dir, 0).ok_or_else(invalid)?;
            let landing = target.offset(dir, 0).ok_or_else(invalid)?;
            let pawn = Piece::new(pusher, PieceKind::Pawn);

            if from.row() != pusher.pawn_start_row()
                || position.board.get(landing) != Some(pawn)
                || !position.board.is_empty(target)
                || !position.board.is_empty(from)
            {
                return Err(invalid());
            }
            position
                .history
                .push(Move::new(from, landing, pawn, MoveFlag::DoublePush));
        }

        let waiting = position.side_to_move.opposite();
        if is_king_attacked(&position.board, waiting) {
            return Err(FenError::OpponentInCheck(waiting));
        }

        Ok(position)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let en_passant = match self.last_move() {
            Some(m) if m.is_double_push() => {
                let skipped = m.from.offset(m.color().pawn_direction(), 0);
                skipped.map_or_else(|| "-".to_string(), Square::to_algebraic)
            }
            _ => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            FenParser::placement_to_fen(&self.board.to_placement()),
            match self.side_to_move {
                Color::White => 'w',
                Color::Black => 'b',
            },
            self.castling_rights().to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Returns every move applied so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the most recent move, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Returns the castling rights still alive given the move history.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = self.initial_castling;
        for m in &self.history {
            rights.remove_touching(m.from);
            rights.remove_touching(m.to);
        }
        rights
    }

    /// Applies a move that has already been validated.
    ///
    /// Updates the grid (including en passant removal, the castling rook and
    /// promotion), appends the move to history and passes the turn.
    pub fn apply(&mut self, m: Move) {
        let is_capture = m.flag == MoveFlag::EnPassant || !self.board.is_empty(m.to);
        if is_capture || m.piece.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if m.color() == Color::Black {
            self.fullmove_number += 1;
        }

        self.board.apply_move(m);
        self.history.push(m);
        self.side_to_move = self.side_to_move.opposite();
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_fen() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
        assert!(pos.history().is_empty());
        assert_eq!(pos.side_to_move, Color::White);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn en_passant_target_becomes_history() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let pos = Position::from_fen(fen).unwrap();
        let last = pos.last_move().unwrap();
        assert_eq!(last.from, sq("d7"));
        assert_eq!(last.to, sq("d5"));
        assert!(last.is_double_push());
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn en_passant_target_without_pawn_is_rejected() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq d6 0 1";
        assert!(matches!(
            Position::from_fen(fen),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn waiting_side_in_check_is_rejected() {
        // White to move while the black king stands in the rook's line
        let fen = "4k3/8/8/8/8/8/8/4RK2 w - - 0 1";
        assert_eq!(
            Position::from_fen(fen),
            Err(FenError::OpponentInCheck(Color::Black))
        );
    }

    #[test]
    fn apply_updates_grid_history_and_turn() {
        let mut pos = Position::startpos();
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        pos.apply(Move::new(sq("e2"), sq("e4"), pawn, MoveFlag::DoublePush));

        assert_eq!(pos.piece_at(sq("e4")), Some(pawn));
        assert_eq!(pos.piece_at(sq("e2")), None);
        assert_eq!(pos.history().len(), 1);
        assert_eq!(pos.side_to_move, Color::Black);
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn reset_restores_start() {
        let mut pos = Position::startpos();
        let knight = Piece::new(Color::White, PieceKind::Knight);
        pos.apply(Move::normal(sq("g1"), sq("f3"), knight));
        pos.reset();
        assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn king_move_forfeits_both_rights() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let king = Piece::new(Color::White, PieceKind::King);
        pos.apply(Move::normal(Square::E1, sq("e2"), king));
        let rights = pos.castling_rights();
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn rook_captured_at_home_forfeits_its_wing() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let rook = Piece::new(Color::White, PieceKind::Rook);
        pos.apply(Move::normal(Square::H1, Square::H8, rook));
        let rights = pos.castling_rights();
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));
        assert_eq!(rights.to_fen(), "Qq");
    }

    #[test]
    fn castling_rights_parse() {
        assert_eq!(CastlingRights::from_fen("KQkq"), CastlingRights::ALL);
        assert_eq!(CastlingRights::from_fen("-"), CastlingRights::NONE);
        let rights = CastlingRights::from_fen("Kq");
        assert!(rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));
        assert_eq!(rights.to_fen(), "Kq");
    }

    #[test]
    fn clocks_follow_moves() {
        let mut pos = Position::startpos();
        let knight = Piece::new(Color::White, PieceKind::Knight);
        let black_knight = Piece::new(Color::Black, PieceKind::Knight);
        pos.apply(Move::normal(sq("g1"), sq("f3"), knight));
        assert_eq!((pos.halfmove_clock, pos.fullmove_number), (1, 1));
        pos.apply(Move::normal(sq("g8"), sq("f6"), black_knight));
        assert_eq!((pos.halfmove_clock, pos.fullmove_number), (2, 2));
    }
}
