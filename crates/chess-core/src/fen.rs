//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Color, Piece, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid king count: {color} has {count} kings, expected exactly 1")]
    InvalidKingCount { color: Color, count: usize },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

/// Row-major piece placement, row 0 being rank 8.
pub type Placement = [[Option<Piece>; 8]; 8];

/// Parsed FEN data.
///
/// The placement is already decoded into pieces; the engine turns this
/// into its own position representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Decoded piece placement.
    pub placement: Placement,
    /// Side to move.
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-")
    pub castling: String,
    /// En passant target square, the square a double-pushed pawn skipped.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule)
    pub halfmove_clock: u32,
    /// Fullmove number
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            placement,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(field: &str) -> Result<Placement, FenError> {
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut placement: Placement = [[None; 8]; 8];
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += skip as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if col < 8 {
                        placement[row][col] = Some(piece);
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }

        for color in Color::ALL {
            let king = Some(Piece::new(color, PieceKind::King));
            let count = placement.iter().flatten().filter(|&&p| p == king).count();
            if count != 1 {
                return Err(FenError::InvalidKingCount { color, count });
            }
        }

        Ok(placement)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            // Only ranks 3 and 6 can be skipped by a double push
            Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// Encodes a placement grid as the first FEN field.
    pub fn placement_to_fen(placement: &Placement) -> String {
        let mut fen = String::new();
        for (row, cells) in placement.iter().enumerate() {
            let mut empty_count = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }
        fen
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            Self::placement_to_fen(&self.placement),
            match self.active_color {
                Color::White => 'w',
                Color::Black => 'b',
            },
            self.castling,
            self.en_passant
                .map_or_else(|| "-".to_string(), Square::to_algebraic),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(
            fen.placement[7][4],
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            fen.placement[0][3],
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(fen.placement[4][4], None);
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = FenParser::parse(original).unwrap();
        assert_eq!(parsed.en_passant, Square::from_algebraic("e3"));
        assert_eq!(parsed.to_fen(), original);
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenParser::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));

        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement() {
        // Too few ranks
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Unknown piece letter
        assert!(matches!(
            FenParser::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Nine squares in a rank
        assert!(matches!(
            FenParser::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // A zero skip count is not a thing
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/08/4K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn each_side_needs_exactly_one_king() {
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidKingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert_eq!(
            FenParser::parse("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(FenError::InvalidKingCount {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for ep in ["abc", "x3", "e4"] {
            let fen = format!("4k3/8/8/8/8/8/8/4K3 w - {} 0 1", ep);
            assert!(matches!(
                FenParser::parse(&fen),
                Err(FenError::InvalidEnPassantSquare(_))
            ));
        }
    }

    #[test]
    fn invalid_clocks() {
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidKingCount {
            color: Color::Black,
            count: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid king count: Black has 0 kings, expected exactly 1"
        );

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}
