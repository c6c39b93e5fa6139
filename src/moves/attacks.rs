//! Occupancy and attack bitboards.
//!
//! Nothing is precomputed or cached: every query walks the live board.
//! With 64 squares and at most 8 rays per piece that stays cheap.

use crate::{
    BitBoard, Board, Piece, PieceInfo, Side, Square,
    moves::Direction,
};

/// Every non-empty square
pub fn occupied(board: &Board) -> BitBoard {
    collect(board, |_| true)
}

/// Squares held by `side`
pub fn occupied_by(board: &Board, side: Side) -> BitBoard {
    collect(board, |info| info.side == side)
}

/// Squares holding a `piece` of either side
pub fn occupied_by_kind(board: &Board, piece: Piece) -> BitBoard {
    collect(board, |info| info.piece == piece)
}

fn collect(board: &Board, keep: impl Fn(PieceInfo) -> bool) -> BitBoard {
    board
        .positions()
        .pieces()
        .filter(|&(_, info)| keep(info))
        .fold(BitBoard::default(), |acc, (square, _)| {
            acc | BitBoard::from_square(square)
        })
}

/// Union of the attack patterns of every piece `by` owns.
///
/// Squares holding `by`'s own pieces are included when they are hit, so the
/// result answers "would a piece standing here be attacked" for any square.
pub fn attacked(board: &Board, by: Side) -> BitBoard {
    board
        .positions()
        .pieces()
        .filter(|(_, info)| info.side == by)
        .fold(BitBoard::default(), |acc, (square, info)| {
            acc | attacks_from(board, square, info)
        })
}

pub fn is_square_attacked(board: &Board, square: Square, by: Side) -> bool {
    attacked(board, by).contains(square)
}

/// Squares a single `info` standing on `square` attacks.
///
/// Rays stop after marking the first occupied square, whoever owns it.
/// Pawns only attack their two forward diagonals.
pub fn attacks_from(board: &Board, square: Square, info: PieceInfo) -> BitBoard {
    match info.piece {
        Piece::Pawn => {
            let dir = info.side.pawn_dir();
            step_targets(square, &[(-1, dir), (1, dir)])
        }
        Piece::Knight => step_targets(square, &Direction::KNIGHT),
        Piece::King => step_targets(square, &Direction::ALL),
        Piece::Bishop | Piece::Rook | Piece::Queen => {
            let mut attacks = BitBoard::default();
            for &(df, dr) in Direction::slider_dirs(info.piece) {
                let mut current = square;
                while let Some(next) = current.offset(df, dr) {
                    attacks |= BitBoard::from_square(next);
                    if board.positions().is_occupied(next) {
                        break;
                    }
                    current = next;
                }
            }
            attacks
        }
    }
}

fn step_targets(square: Square, offsets: &[(i8, i8)]) -> BitBoard {
    offsets
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .fold(BitBoard::default(), |acc, target| {
            acc | BitBoard::from_square(target)
        })
}
