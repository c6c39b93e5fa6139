use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    CastlingRights, Piece, PieceInfo, Side, Square,
    error::{ChessError, ChessResult},
};

/// A move packed into 16 bits:
/// ```text
/// 15 14 13 12 | 11 .. 6 | 5 .. 0
///  P  C S1 S0 |   to    |  from
/// ```
/// The four flag bits (Promotion, Capture, Special1, Special0) combine as:
///
/// | flags | meaning                                     |
/// |-------|---------------------------------------------|
/// | 0000  | quiet                                       |
/// | 0001  | double pawn push                            |
/// | 0010  | kingside castle                             |
/// | 0011  | queenside castle                            |
/// | 0100  | capture                                     |
/// | 0101  | en passant capture                          |
/// | 10xx  | promotion, xx = knight/bishop/rook/queen    |
/// | 11xx  | promotion capture, same piece selection     |
///
/// On the wire a move is `"<from> <to> <flags>"` with `flags` in decimal,
/// e.g. `"e2 e4 1"`.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
#[repr(transparent)]
pub struct Move(pub u16);

impl Move {
    pub const PROMOTION: u8 = 0b1000;
    pub const CAPTURE_BIT: u8 = 0b0100;
    pub const SPECIAL_1: u8 = 0b0010;
    pub const SPECIAL_0: u8 = 0b0001;

    pub const QUIET: u8 = 0b0000;
    pub const DOUBLE_PAWN: u8 = Self::SPECIAL_0;
    pub const KING_CASTLE: u8 = Self::SPECIAL_1;
    pub const QUEEN_CASTLE: u8 = Self::SPECIAL_1 | Self::SPECIAL_0;
    pub const CAPTURE: u8 = Self::CAPTURE_BIT;
    pub const EN_PASSANT: u8 = Self::CAPTURE_BIT | Self::SPECIAL_0;

    pub const PROMO_N: u8 = Self::PROMOTION;
    pub const PROMO_B: u8 = Self::PROMOTION | Self::SPECIAL_0;
    pub const PROMO_R: u8 = Self::PROMOTION | Self::SPECIAL_1;
    pub const PROMO_Q: u8 = Self::PROMOTION | Self::SPECIAL_1 | Self::SPECIAL_0;
    pub const PROMO_QC: u8 = Self::PROMO_Q | Self::CAPTURE_BIT;

    /// Promotion flag sets in generation order: queen, rook, bishop, knight
    pub const PROMOTIONS: [u8; 4] = [Self::PROMO_Q, Self::PROMO_R, Self::PROMO_B, Self::PROMO_N];

    #[inline(always)]
    pub const fn new(from: Square, to: Square, flags: u8) -> Self {
        Self(
            (from.index() as u16 & 0x3f)
                | ((to.index() as u16 & 0x3f) << 6)
                | (((flags & 0xf) as u16) << 12),
        )
    }

    #[inline(always)]
    pub const fn from_sq(&self) -> Square {
        Square::from_masked(self.0)
    }

    #[inline(always)]
    pub const fn to_sq(&self) -> Square {
        Square::from_masked(self.0 >> 6)
    }

    #[inline(always)]
    pub const fn flags(&self) -> u8 {
        (self.0 >> 12) as u8
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.flags() & Self::CAPTURE_BIT != 0
    }

    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.flags() & Self::PROMOTION != 0
    }

    #[inline(always)]
    pub const fn is_double_push(&self) -> bool {
        self.flags() == Self::DOUBLE_PAWN
    }

    #[inline(always)]
    pub const fn is_enpassant(&self) -> bool {
        self.flags() == Self::EN_PASSANT
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self.flags(), Self::KING_CASTLE | Self::QUEEN_CASTLE)
    }

    #[inline(always)]
    pub const fn is_kingside_castle(&self) -> bool {
        self.flags() == Self::KING_CASTLE
    }

    /// Piece a pawn becomes, selected by the low two flag bits
    pub const fn promotion_piece(&self) -> Option<Piece> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self.flags() & 0b11 {
            0b00 => Piece::Knight,
            0b01 => Piece::Bishop,
            0b10 => Piece::Rook,
            _ => Piece::Queen,
        })
    }

    /// Long algebraic form, e.g. `e7e8q`
    pub fn uci(&self) -> String {
        let mut out = format!("{}{}", self.from_sq(), self.to_sq());
        if let Some(promo) = self.promotion_piece() {
            out.push(PieceInfo::new(promo, Side::Minor).symbol());
        }
        out
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.from_sq(), self.to_sq(), self.flags())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> ChessResult<Self> {
        let malformed = || ChessError::MalformedToken(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(from), Some(to), Some(flags), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let from: Square = from.parse()?;
        let to: Square = to.parse()?;
        if !flags.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let flags: u8 = flags.parse().map_err(|_| malformed())?;
        if flags > 0xf {
            return Err(malformed());
        }
        Ok(Move::new(from, to, flags))
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = ChessError;

    fn try_from(value: String) -> ChessResult<Self> {
        value.parse()
    }
}

/// Everything [`crate::Board::unmake_move`] needs to undo a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInfo {
    pub mov: Move,
    pub moved: PieceInfo,
    pub captured: Option<PieceInfo>,
    /// Differs from the destination only for en passant
    pub captured_sq: Square,
    pub stm: Side,                        // prev
    pub castling_rights: CastlingRights,  // prev
    pub enpassant_square: Option<Square>, // prev
    pub halfmove_clock: u16,              // prev
    pub fullmove_counter: u16,            // prev
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_packing() {
        let mov = Move::new(sq("e7"), sq("d8"), Move::PROMO_QC);
        assert_eq!(mov.from_sq(), sq("e7"));
        assert_eq!(mov.to_sq(), sq("d8"));
        assert_eq!(mov.flags(), 15);
        assert!(mov.is_capture());
        assert!(mov.is_promotion());
        assert_eq!(mov.promotion_piece(), Some(Piece::Queen));
        assert_eq!(mov.uci(), "e7d8q");
    }

    #[test]
    fn test_flag_meanings() {
        let e2 = sq("e2");
        let e4 = sq("e4");
        assert!(Move::new(e2, e4, Move::DOUBLE_PAWN).is_double_push());
        assert!(Move::new(e2, e4, Move::EN_PASSANT).is_enpassant());
        assert!(Move::new(e2, e4, Move::EN_PASSANT).is_capture());
        assert!(Move::new(e2, e4, Move::KING_CASTLE).is_kingside_castle());
        assert!(Move::new(e2, e4, Move::QUEEN_CASTLE).is_castle());
        assert!(!Move::new(e2, e4, Move::QUEEN_CASTLE).is_kingside_castle());
        // promotion with both special bits is not a castle
        assert!(!Move::new(e2, e4, Move::PROMO_Q).is_castle());

        let pieces: Vec<_> = [Move::PROMO_N, Move::PROMO_B, Move::PROMO_R, Move::PROMO_Q]
            .iter()
            .map(|&f| Move::new(e2, e4, f).promotion_piece())
            .collect();
        assert_eq!(
            pieces,
            vec![
                Some(Piece::Knight),
                Some(Piece::Bishop),
                Some(Piece::Rook),
                Some(Piece::Queen)
            ]
        );
    }

    #[test]
    fn test_wire_text() {
        let mov: Move = "e2 e4 1".parse().unwrap();
        assert_eq!(mov, Move::new(sq("e2"), sq("e4"), Move::DOUBLE_PAWN));
        assert_eq!(mov.to_string(), "e2 e4 1");

        for bad in [
            "e2 e4",
            "e2 e4 16",
            "e2 e4 x",
            "e2 e9 0",
            "e2 e4 0 0",
            "",
            "e2 e4 +1",
            "e2 e4 -0",
        ] {
            assert!(bad.parse::<Move>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_serde_uses_wire_text() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Line {
            moves: Vec<Move>,
        }
        let line = Line {
            moves: vec![
                "e2 e4 1".parse().unwrap(),
                "e7 e5 1".parse().unwrap(),
                "g1 f3 0".parse().unwrap(),
            ],
        };
        let text = toml::to_string(&line).unwrap();
        assert!(text.contains(r#""e2 e4 1""#), "unexpected encoding: {text}");
        assert!(text.contains(r#""g1 f3 0""#), "unexpected encoding: {text}");
        let back: Line = toml::from_str(&text).unwrap();
        assert_eq!(back, line);
    }
}
