use std::fmt::Display;
use std::str::FromStr;

use tracing::trace;

use crate::{
    error::{ChessError, ChessResult},
    moves::{legal, move_info::Move, move_info::MoveInfo},
};

pub mod components;
pub mod fen;
pub mod notation;


use components::{BoardState, CastlingRights, Piece, PieceInfo, Side, Square};

/// Standard initial array, rank 1 first
const INITIAL_GRID: [[char; 8]; 8] = [
    ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'],
    ['P', 'P', 'P', 'P', 'P', 'P', 'P', 'P'],
    [' ', ' ', ' ', ' ', ' ', ' ', ' ', ' '],
    [' ', ' ', ' ', ' ', ' ', ' ', ' ', ' '],
    [' ', ' ', ' ', ' ', ' ', ' ', ' ', ' '],
    [' ', ' ', ' ', ' ', ' ', ' ', ' ', ' '],
    ['p', 'p', 'p', 'p', 'p', 'p', 'p', 'p'],
    ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r'],
];

/// A chess position: piece placement, side to move, castling rights,
/// en passant target and the two move counters.
///
/// The position owns its placement outright. Mutation goes through
/// [`Board::make_move`] / [`Board::unmake_move`], or wholesale through
/// [`Board::restore`].
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct Board {
    pub(crate) positions: BoardState,
    pub(crate) stm: Side,
    pub(crate) castling_rights: CastlingRights,
    /// Set only for the ply right after a double pawn push
    pub(crate) enpassant_square: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_counter: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position
    pub fn new() -> Self {
        let mut positions = BoardState::default();
        for (rank, row) in INITIAL_GRID.iter().enumerate() {
            for (file, &c) in row.iter().enumerate() {
                if c == ' ' {
                    continue;
                }
                if let (Some(square), Ok(info)) =
                    (Square::new(rank * 8 + file), PieceInfo::from_symbol(c))
                {
                    positions.set(square, info);
                }
            }
        }
        Self::with_placement(positions)
    }

    /// Build a position from a char grid indexed `[rank][file]`, rank 1 and
    /// file a first. `' '` marks an empty square.
    ///
    /// The grid is copied; later changes to it do not reach the board.
    /// Game state starts fresh: Major to move, all castling rights, no en
    /// passant target, clocks at 0 and 1.
    pub fn from_grid(grid: &[[char; 8]; 8]) -> ChessResult<Self> {
        let mut positions = BoardState::default();
        for (rank, row) in grid.iter().enumerate() {
            for (file, &c) in row.iter().enumerate() {
                if c == ' ' {
                    continue;
                }
                let info = PieceInfo::from_symbol(c)?;
                if let Some(square) = Square::new(rank * 8 + file) {
                    positions.set(square, info);
                }
            }
        }
        Ok(Self::with_placement(positions))
    }

    fn with_placement(positions: BoardState) -> Self {
        Self {
            positions,
            stm: Side::Major,
            castling_rights: CastlingRights::all(),
            enpassant_square: None,
            halfmove_clock: 0,
            fullmove_counter: 1,
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        fen::parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    /// Bounds checked read, 1-indexed
    pub fn get_piece(&self, file: u8, rank: u8) -> ChessResult<Option<PieceInfo>> {
        Ok(self.positions.get_piece_at(Square::at(file, rank)?))
    }

    #[inline(always)]
    pub fn get_piece_at(&self, square: Square) -> Option<PieceInfo> {
        self.positions.get_piece_at(square)
    }

    #[inline(always)]
    pub const fn positions(&self) -> &BoardState {
        &self.positions
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Side {
        self.stm
    }

    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline(always)]
    pub const fn enpassant_square(&self) -> Option<Square> {
        self.enpassant_square
    }

    #[inline(always)]
    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline(always)]
    pub const fn fullmove_number(&self) -> u16 {
        self.fullmove_counter
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.positions.find(PieceInfo::new(Piece::King, side))
    }

    /// Save the full state as a position record
    pub fn snapshot(&self) -> String {
        self.to_fen()
    }

    /// Replace the full state with a record taken by [`Board::snapshot`]
    pub fn restore(&mut self, record: &str) -> ChessResult<()> {
        *self = fen::parse_fen(record)?;
        Ok(())
    }

    /// Apply `mov` only if it is legal in the current position
    pub fn try_move(&mut self, mov: Move) -> ChessResult<MoveInfo> {
        if !legal::legal_moves(self).contains(&mov) {
            return Err(ChessError::IllegalMove(mov.to_string()));
        }
        self.make_move(mov)
    }

    /// Apply `mov` without checking it against the rules.
    ///
    /// - the piece on the source moves to the destination, replacing any
    ///   occupant; en passant removes the pawn behind the destination instead
    /// - promotions swap in the chosen piece, castling also relocates the rook
    /// - a king move drops both of its side's castling rights; a move from or
    ///   onto a rook corner drops that corner's right
    /// - the en passant target is set by a double push and cleared otherwise
    /// - the halfmove clock resets on a pawn move or capture, else increments
    /// - the fullmove number increments after Minor moves
    pub fn make_move(&mut self, mov: Move) -> ChessResult<MoveInfo> {
        let from = mov.from_sq();
        let to = mov.to_sq();
        let moved = self
            .positions
            .get_piece_at(from)
            .ok_or(ChessError::EmptySquare(from))?;
        let side = moved.side;

        let captured_sq = if mov.is_enpassant() {
            to.offset(0, -side.pawn_dir()).unwrap_or(to)
        } else {
            to
        };

        let mut info = MoveInfo {
            mov,
            moved,
            captured: None,
            captured_sq,
            stm: self.stm,
            castling_rights: self.castling_rights,
            enpassant_square: self.enpassant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_counter: self.fullmove_counter,
        };

        info.captured = self.positions.remove_piece(captured_sq);
        self.positions.move_piece(from, to);

        if let Some(promo) = mov.promotion_piece() {
            self.positions.set(to, PieceInfo::new(promo, side));
        }

        if let Some((rook_from, rook_to)) = castle_rook_squares(mov) {
            self.positions.move_piece(rook_from, rook_to);
        }

        if moved.piece == Piece::King {
            self.castling_rights
                .remove_right(&CastlingRights::side_rights(side));
        }
        for sq in [from, to] {
            if let Some(right) = CastlingRights::corner_right(sq) {
                self.castling_rights.remove_right(&right);
            }
        }

        self.enpassant_square = if mov.is_double_push() {
            from.offset(0, side.pawn_dir())
        } else {
            None
        };

        if moved.piece == Piece::Pawn || info.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if side == Side::Minor {
            self.fullmove_counter = self.fullmove_counter.saturating_add(1);
        }
        self.stm = side.flip();

        trace!("make {mov} -> {}", self.to_fen());
        Ok(info)
    }

    /// Exact inverse of the [`Board::make_move`] that produced `info`
    pub fn unmake_move(&mut self, info: &MoveInfo) {
        let mov = info.mov;
        let from = mov.from_sq();
        let to = mov.to_sq();

        if let Some((rook_from, rook_to)) = castle_rook_squares(mov) {
            self.positions.move_piece(rook_to, rook_from);
        }

        self.positions.remove_piece(to);
        self.positions.set(from, info.moved);
        if let Some(captured) = info.captured {
            self.positions.set(info.captured_sq, captured);
        }

        self.stm = info.stm;
        self.castling_rights = info.castling_rights;
        self.enpassant_square = info.enpassant_square;
        self.halfmove_clock = info.halfmove_clock;
        self.fullmove_counter = info.fullmove_counter;
        trace!("unmake {mov}");
    }
}

/// Rook (from, to) for a castling move, derived from the king's squares
fn castle_rook_squares(mov: Move) -> Option<(Square, Square)> {
    if !mov.is_castle() {
        return None;
    }
    let king_from = mov.from_sq();
    if mov.is_kingside_castle() {
        Some((king_from.offset(3, 0)?, king_from.offset(1, 0)?))
    } else {
        Some((king_from.offset(-4, 0)?, king_from.offset(-1, 0)?))
    }
}

impl FromStr for Board {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fen::parse_fen(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
