//! Legality filtering and game status.

use std::ops::Deref;

use tracing::trace;

use crate::{
    Board, Move, MoveInfo, Piece, Side, Square,
    consts::FIFTY_MOVE_LIMIT,
    error::ChessResult,
    moves::{attacks, move_gen},
};

/// A move applied to a board for inspection. Dropping it undoes the move,
/// so the board is restored on every path out of the caller.
struct Trial<'a> {
    board: &'a mut Board,
    info: MoveInfo,
}

impl<'a> Trial<'a> {
    fn make(board: &'a mut Board, mov: Move) -> ChessResult<Self> {
        let info = board.make_move(mov)?;
        Ok(Self { board, info })
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.unmake_move(&self.info);
    }
}

/// Where `side`'s king stands after `mov` was played on `board`
fn king_after(board: &Board, mov: Move, side: Side) -> Option<Square> {
    match board.get_piece_at(mov.to_sq()) {
        Some(info) if info.piece == Piece::King && info.side == side => Some(mov.to_sq()),
        _ => board.king_square(side),
    }
}

/// Whether `mov` leaves the mover's king out of the opponent's attack set.
/// A side without a king is never in check.
fn keeps_king_safe(board: &mut Board, mov: Move) -> bool {
    let side = board.side_to_move();
    let Ok(trial) = Trial::make(board, mov) else {
        return false;
    };
    let safe = match king_after(&trial, mov, side) {
        Some(king) => !attacks::is_square_attacked(&trial, king, side.flip()),
        None => true,
    };
    if !safe {
        trace!("rejecting {mov}: king left in check");
    }
    safe
}

/// Every legal move of the side to move.
///
/// Each candidate is judged against the original position; the board is
/// unchanged on return.
pub fn legal_moves(board: &mut Board) -> Vec<Move> {
    move_gen::all_pseudo_legal_moves(board)
        .into_iter()
        .filter(|&mov| keeps_king_safe(board, mov))
        .collect()
}

/// Legal moves of the piece on (`file`, `rank`). Empty when the square is
/// empty or holds a piece of the side not to move.
pub fn legal_moves_from(board: &mut Board, file: u8, rank: u8) -> ChessResult<Vec<Move>> {
    let square = Square::at(file, rank)?;
    match board.get_piece_at(square) {
        Some(info) if info.side == board.side_to_move() => Ok(move_gen::moves_from(board, square)
            .into_iter()
            .filter(|&mov| keeps_king_safe(board, mov))
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// The same filter driven by full record snapshots instead of make/unmake.
/// Slower; kept as the reference the fast path is checked against.
pub fn legal_moves_by_snapshot(board: &mut Board) -> ChessResult<Vec<Move>> {
    let side = board.side_to_move();
    let snapshot = board.snapshot();
    let mut legal = Vec::new();
    for mov in move_gen::all_pseudo_legal_moves(board) {
        let applied = board.make_move(mov).map(|_| {
            king_after(board, mov, side)
                .is_none_or(|king| !attacks::is_square_attacked(board, king, side.flip()))
        });
        board.restore(&snapshot)?;
        if applied? {
            legal.push(mov);
        }
    }
    Ok(legal)
}

pub fn is_in_check(board: &Board, side: Side) -> bool {
    board
        .king_square(side)
        .is_some_and(|king| attacks::is_square_attacked(board, king, side.flip()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    /// 100 halfmoves without a pawn move or capture
    FiftyMoveDraw,
}

impl GameStatus {
    pub const fn is_over(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::FiftyMoveDraw
        )
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::FiftyMoveDraw => "draw by fifty-move rule",
        };
        write!(f, "{s}")
    }
}

/// Status of the side to move. The fifty-move draw wins over everything,
/// even when legal moves remain.
pub fn game_status(board: &mut Board) -> GameStatus {
    if board.halfmove_clock() >= FIFTY_MOVE_LIMIT {
        return GameStatus::FiftyMoveDraw;
    }
    let in_check = is_in_check(board, board.side_to_move());
    let has_moves = !legal_moves(board).is_empty();
    match (in_check, has_moves) {
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Ongoing,
    }
}
