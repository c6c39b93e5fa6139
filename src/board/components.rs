use std::{
    fmt::Display,
    ops::{BitAnd, BitOr, BitOrAssign},
    str::FromStr,
};

use crate::{
    board::notation,
    error::{ChessError, ChessResult},
};

/// 64 bit mask over the board. Bit `i` is the square with linear index `i`,
/// so a1 is bit 0 and h8 is bit 63.
#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
#[repr(transparent)]
pub struct BitBoard(pub u64);

impl BitOrAssign for BitBoard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitOr for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitBoard {
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn iter_bits(&self) -> BitBoardIterator {
        BitBoardIterator { remaining: self.0 }
    }

    #[inline(always)]
    pub const fn contains_square(&self, index: usize) -> bool {
        (self.0 & (1 << index)) != 0
    }

    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.contains_square(square.index())
    }
}

/// Iterator that yields each set bit position in a BitBoard
pub struct BitBoardIterator {
    remaining: u64,
}

impl Iterator for BitBoardIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.remaining.trailing_zeros() as usize;
        self.remaining &= self.remaining - 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.remaining.count_ones() as usize;
        (exact, Some(exact))
    }
}

impl ExactSizeIterator for BitBoardIterator {}

/// The two sides. `Major` is the side that moves first (conventionally white,
/// uppercase letters in a record), `Minor` the other one.
#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
pub enum Side {
    #[default]
    Major,
    Minor,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Side::Major => write!(f, "Major"),
            Side::Minor => write!(f, "Minor"),
        }
    }
}

impl Side {
    pub const fn flip(&self) -> Self {
        match self {
            Side::Major => Side::Minor,
            Side::Minor => Side::Major,
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Side::Major => 0,
            Side::Minor => 1,
        }
    }

    /// +1 for Major (up the board), -1 for Minor
    pub const fn pawn_dir(&self) -> i8 {
        match self {
            Side::Major => 1,
            Side::Minor => -1,
        }
    }

    /// NOTE: Rank is 1 indexed
    pub const fn pawn_start_rank(&self) -> u8 {
        match self {
            Side::Major => 2,
            Side::Minor => 7,
        }
    }

    /// NOTE: Rank is 1 indexed
    pub const fn promotion_rank(&self) -> u8 {
        match self {
            Side::Major => 8,
            Side::Minor => 1,
        }
    }

    /// Rank of the en passant targets this side can capture onto. NOTE: Rank is 1 indexed
    pub const fn enpassant_rank(&self) -> u8 {
        match self {
            Side::Major => 6,
            Side::Minor => 3,
        }
    }

    /// Rank the king and rooks start on. NOTE: Rank is 1 indexed
    pub const fn back_rank(&self) -> u8 {
        match self {
            Side::Major => 1,
            Side::Minor => 8,
        }
    }
}

#[derive(Default, PartialEq, Eq, Debug, PartialOrd, Clone, Copy, Hash)]
pub enum Piece {
    #[default]
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Piece::Pawn => write!(f, "Pawn"),
            Piece::Knight => write!(f, "Knight"),
            Piece::Bishop => write!(f, "Bishop"),
            Piece::Rook => write!(f, "Rook"),
            Piece::Queen => write!(f, "Queen"),
            Piece::King => write!(f, "King"),
        }
    }
}

impl Piece {
    pub const PIECE_CHARS: [[char; 6]; 2] = [
        ['P', 'N', 'B', 'R', 'Q', 'K'], // Major
        ['p', 'n', 'b', 'r', 'q', 'k'], // Minor
    ];

    #[inline(always)]
    pub const fn index(&self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

}

/// Compact struct to hold piece and side
#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
pub struct PieceInfo {
    pub piece: Piece,
    pub side: Side,
}

impl PieceInfo {
    pub const fn new(piece: Piece, side: Side) -> Self {
        Self { piece, side }
    }

    /// Letter used for this piece in a position record
    pub const fn symbol(&self) -> char {
        Piece::PIECE_CHARS[self.side.index()][self.piece.index()]
    }

    pub fn from_symbol(symbol: char) -> ChessResult<Self> {
        let side = if symbol.is_ascii_uppercase() {
            Side::Major
        } else {
            Side::Minor
        };
        let piece = match symbol.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return Err(ChessError::InvalidPieceSymbol(symbol)),
        };
        Ok(Self::new(piece, side))
    }
}

impl Display for PieceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Mailbox of the 64 squares. Each square holds at most one piece.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
pub struct BoardState {
    mailbox: [Option<PieceInfo>; 64],
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            mailbox: [None; 64],
        }
    }
}

impl BoardState {
    pub fn to_fen_pieces(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.mailbox[rank * 8 + file] {
                    Some(info) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(info.symbol());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }

            if rank > 0 {
                fen.push('/');
            }
        }

        fen
    }

    #[inline(always)]
    pub const fn get_piece_at(&self, square: Square) -> Option<PieceInfo> {
        self.mailbox[square.index()]
    }

    #[inline(always)]
    pub const fn is_occupied(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Places a piece, returning whatever stood there before
    #[inline(always)]
    pub fn set(&mut self, square: Square, info: PieceInfo) -> Option<PieceInfo> {
        self.mailbox[square.index()].replace(info)
    }

    #[inline(always)]
    pub fn remove_piece(&mut self, square: Square) -> Option<PieceInfo> {
        self.mailbox[square.index()].take()
    }

    /// Moves whatever stands on `from` to `to`. Returns the piece that was
    /// on `to`, if any.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<PieceInfo> {
        let moving = self.mailbox[from.index()].take();
        std::mem::replace(&mut self.mailbox[to.index()], moving)
    }

    /// Occupied squares in ascending index order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceInfo)> + '_ {
        self.mailbox
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|info| (Square(idx), info)))
    }

    pub fn find(&self, info: PieceInfo) -> Option<Square> {
        self.pieces()
            .find_map(|(square, found)| (found == info).then_some(square))
    }
}

/// Castling rights are stored in a [`u8`], which is divided into the following parts:
/// ```text
/// Bit: 7 6 5 4 3 2 1 0
///      - - - - q k Q K
///              | | | |
///              | | | +-- Major kingside right
///              | | +---- Major queenside right
///              | +------ Minor kingside right
///              +-------- Minor queenside right
/// ```
/// Rights only ever get removed while playing; nothing but record import
/// adds them.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
#[repr(transparent)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NO_CASTLING: u8 = 0;
    /// Major King side castling
    pub const MAJOR_00: u8 = 0b00000001;
    /// Major Queen side castling
    pub const MAJOR_000: u8 = 0b00000010;
    /// Minor King side castling
    pub const MINOR_00: u8 = 0b00000100;
    /// Minor Queen side castling
    pub const MINOR_000: u8 = 0b00001000;

    pub const MAJOR_CASTLING: Self = Self(Self::MAJOR_00 | Self::MAJOR_000);
    pub const MINOR_CASTLING: Self = Self(Self::MINOR_00 | Self::MINOR_000);
    pub const ANY_CASTLING: Self = Self(Self::MAJOR_CASTLING.0 | Self::MINOR_CASTLING.0);

    #[inline(always)]
    pub const fn add_right(&mut self, rights: CastlingRights) {
        self.0 |= rights.0;
    }

    #[inline(always)]
    pub const fn all() -> Self {
        Self::ANY_CASTLING
    }

    #[inline(always)]
    pub const fn empty() -> Self {
        Self(Self::NO_CASTLING)
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == Self::NO_CASTLING
    }

    #[inline(always)]
    pub const fn allows(&self, rights: CastlingRights) -> bool {
        self.0 & rights.0 != Self::NO_CASTLING
    }

    /// The single right bit for `side` castling on the given wing
    #[inline(always)]
    pub const fn right_for(side: Side, kingside: bool) -> Self {
        match (side, kingside) {
            (Side::Major, true) => Self(Self::MAJOR_00),
            (Side::Major, false) => Self(Self::MAJOR_000),
            (Side::Minor, true) => Self(Self::MINOR_00),
            (Side::Minor, false) => Self(Self::MINOR_000),
        }
    }

    /// Only the mover's own bit for that wing is consulted
    #[inline(always)]
    pub const fn can_castle(&self, side: Side, kingside: bool) -> bool {
        self.allows(Self::right_for(side, kingside))
    }

    #[inline(always)]
    pub const fn remove_right(&mut self, rights: &CastlingRights) {
        self.0 &= !rights.0
    }

    #[inline(always)]
    pub const fn side_rights(side: Side) -> Self {
        match side {
            Side::Major => Self::MAJOR_CASTLING,
            Side::Minor => Self::MINOR_CASTLING,
        }
    }

    /// Right lost when a rook leaves, or is captured on, `square`
    pub const fn corner_right(square: Square) -> Option<Self> {
        match square.index() {
            0 => Some(Self(Self::MAJOR_000)),  // a1
            7 => Some(Self(Self::MAJOR_00)),   // h1
            56 => Some(Self(Self::MINOR_000)), // a8
            63 => Some(Self(Self::MINOR_00)),  // h8
            _ => None,
        }
    }
}

impl BitOr<CastlingRights> for CastlingRights {
    type Output = CastlingRights;

    fn bitor(self, rhs: CastlingRights) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.allows(Self(Self::MAJOR_00)) {
            write!(f, "K")?;
        }
        if self.allows(Self(Self::MAJOR_000)) {
            write!(f, "Q")?;
        }
        if self.allows(Self(Self::MINOR_00)) {
            write!(f, "k")?;
        }
        if self.allows(Self(Self::MINOR_000)) {
            write!(f, "q")?;
        }
        if self.is_empty() {
            write!(f, "-")?;
        }
        Ok(())
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::empty()
    }
}

/// Represents a single square on the board.
/// # Representation
/// index = (file - 1) + (rank - 1) * 8
/// ```text
///  A8(56) B8 C8 D8 E8 F8 G8 H8(63)
///  ...
///  A1(0)  B1 C1 D1 E1 F1 G1 H1(7)
///```
#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[repr(transparent)]
pub struct Square(usize);

impl Square {
    /// Returns a Square from a given index. Will return None if index is out of bounds
    /// index should be [0, 63]
    #[inline(always)]
    pub const fn new(index: usize) -> Option<Self> {
        if index < 64 {
            return Some(Self(index));
        }
        None
    }

    /// Square from the low 6 bits of a packed field
    #[inline(always)]
    pub(crate) const fn from_masked(bits: u16) -> Self {
        Self((bits & 0x3f) as usize)
    }

    /// Square at 1-indexed `file` and `rank`.
    pub fn at(file: u8, rank: u8) -> ChessResult<Self> {
        if file < 1 || file > 8 || rank < 1 || rank > 8 {
            return Err(ChessError::InvalidCoordinate { file, rank });
        }
        Ok(Self((file as usize - 1) + (rank as usize - 1) * 8))
    }

    /// Steps `df` files and `dr` ranks away, or None when that leaves the board
    #[inline(always)]
    pub const fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = (self.0 % 8) as i8 + df;
        let rank = (self.0 / 8) as i8 + dr;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Self(rank as usize * 8 + file as usize))
    }

    /// NOTE: Rank is 1 indexed
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        (self.0 / 8 + 1) as u8
    }

    /// NOTE: File is 1 indexed
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        (self.0 % 8 + 1) as u8
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (file, rank) = notation::from_algebraic(s)?;
        Square::at(file, rank)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (self.0 % 8) as u8 + b'a';
        let rank = (self.0 / 8) as u8 + b'1';
        write!(f, "{}{}", file as char, rank as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_bits() {
        let bb = BitBoard(1 | 1 << 17 | 1 << 63);
        assert_eq!(bb.iter_bits().len(), 3);
        assert_eq!(bb.iter_bits().collect::<Vec<_>>(), vec![0, 17, 63]);
    }

    #[test]
    fn test_display_square() {
        assert_eq!(format!("{}", Square(0)), "a1");
        assert_eq!(format!("{}", Square(7)), "h1");
        assert_eq!(format!("{}", Square(8)), "a2");
        assert_eq!(format!("{}", Square(11)), "d2");
        assert_eq!(format!("{}", Square(18)), "c3");
        assert_eq!(format!("{}", Square(28)), "e4");
        assert_eq!(format!("{}", Square(56)), "a8");
        assert_eq!(format!("{}", Square(63)), "h8");
    }

    #[test]
    fn test_square_at() {
        assert_eq!(Square::at(1, 1), Ok(Square(0)));
        assert_eq!(Square::at(8, 8), Ok(Square(63)));
        assert_eq!(Square::at(5, 4), Ok(Square(28)));
        assert_eq!(
            Square::at(0, 4),
            Err(ChessError::InvalidCoordinate { file: 0, rank: 4 })
        );
        assert_eq!(
            Square::at(3, 9),
            Err(ChessError::InvalidCoordinate { file: 3, rank: 9 })
        );
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let h4 = Square::at(8, 4).unwrap();
        assert_eq!(h4.offset(1, 0), None);
        assert_eq!(h4.offset(-1, 1), Square::at(7, 5).ok());
        let a1 = Square(0);
        assert_eq!(a1.offset(-1, -1), None);
        assert_eq!(a1.offset(2, 1), Some(Square(10)));
    }

    #[test]
    fn test_square_from_str() {
        assert_eq!("e3".parse::<Square>(), Ok(Square(20)));
        assert!("E3".parse::<Square>().is_err());
        assert!("i1".parse::<Square>().is_err());
    }

    #[test]
    fn test_piece_symbols() {
        let info = PieceInfo::from_symbol('N').unwrap();
        assert_eq!(info, PieceInfo::new(Piece::Knight, Side::Major));
        assert_eq!(info.symbol(), 'N');
        assert_eq!(
            PieceInfo::from_symbol('q').unwrap(),
            PieceInfo::new(Piece::Queen, Side::Minor)
        );
        assert_eq!(
            PieceInfo::from_symbol('x'),
            Err(ChessError::InvalidPieceSymbol('x'))
        );
    }

    #[test]
    fn test_castling_display() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::empty().to_string(), "-");
        let mut rights = CastlingRights::all();
        rights.remove_right(&CastlingRights::MAJOR_CASTLING);
        assert_eq!(rights.to_string(), "kq");
        assert!(rights.can_castle(Side::Minor, true));
        assert!(!rights.can_castle(Side::Major, false));
    }

    #[test]
    fn test_castling_right_is_side_specific() {
        // Only the Minor queenside bit is set; Major must not be able to castle
        let rights = CastlingRights(CastlingRights::MINOR_000);
        assert!(!rights.can_castle(Side::Major, true));
        assert!(!rights.can_castle(Side::Major, false));
        assert!(!rights.can_castle(Side::Minor, true));
        assert!(rights.can_castle(Side::Minor, false));
    }

    #[test]
    fn test_board_state_move_piece() {
        let mut state = BoardState::default();
        let e2 = Square(12);
        let e4 = Square(28);
        state.set(e2, PieceInfo::new(Piece::Pawn, Side::Major));
        assert_eq!(state.move_piece(e2, e4), None);
        assert!(!state.is_occupied(e2));
        assert_eq!(
            state.get_piece_at(e4),
            Some(PieceInfo::new(Piece::Pawn, Side::Major))
        );
        assert_eq!(state.pieces().count(), 1);
    }
}
