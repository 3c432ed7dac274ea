//! Chess piece representation.

use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the lowercase letter used for this kind in FEN and UCI.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parses a letter (either case) into a piece kind.
    pub const fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece standing on the board: a kind tagged with its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Returns the same kind owned by the other side.
    #[inline]
    pub const fn with_opposite_color(self) -> Self {
        Piece::new(self.color.opposite(), self.kind)
    }

    /// Returns the FEN character (uppercase for White).
    pub const fn to_fen_char(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceKind::from_letter(c) {
            Some(kind) => Some(Piece::new(color, kind)),
            None => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_fen() {
        assert_eq!(Piece::new(Color::White, PieceKind::Pawn).to_fen_char(), 'P');
        assert_eq!(Piece::new(Color::Black, PieceKind::Pawn).to_fen_char(), 'p');
        assert_eq!(Piece::new(Color::White, PieceKind::King).to_fen_char(), 'K');
        assert_eq!(Piece::new(Color::Black, PieceKind::Knight).to_fen_char(), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(
            Piece::from_fen_char('Q'),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(
            Piece::from_fen_char('r'),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('+'), None);
    }

    #[test]
    fn opposite_color_keeps_kind() {
        let knight = Piece::new(Color::White, PieceKind::Knight);
        assert_eq!(
            knight.with_opposite_color(),
            Piece::new(Color::Black, PieceKind::Knight)
        );
    }

    #[test]
    fn display() {
        let piece = Piece::new(Color::Black, PieceKind::Bishop);
        assert_eq!(piece.to_string(), "Black Bishop");
    }
}
