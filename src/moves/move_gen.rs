//! Pseudo-legal move generation.
//!
//! Moves here follow each piece's movement rules but may leave the mover's
//! own king attacked; [`super::legal`] filters those out.
//!
//! Kings are never generated as capture targets. Check is detected through
//! attack maps, not by letting a king be taken.

use crate::{
    BitBoard, Board, Move, Piece, PieceInfo, Side, Square,
    error::{ChessError, ChessResult},
    moves::{Direction, attacks},
};

pub fn gen_pawn_moves(board: &Board, file: u8, rank: u8) -> ChessResult<Vec<Move>> {
    generate_for(board, file, rank, Piece::Pawn)
}

pub fn gen_knight_moves(board: &Board, file: u8, rank: u8) -> ChessResult<Vec<Move>> {
    generate_for(board, file, rank, Piece::Knight)
}

pub fn gen_bishop_moves(board: &Board, file: u8, rank: u8) -> ChessResult<Vec<Move>> {
    generate_for(board, file, rank, Piece::Bishop)
}

pub fn gen_rook_moves(board: &Board, file: u8, rank: u8) -> ChessResult<Vec<Move>> {
    generate_for(board, file, rank, Piece::Rook)
}

pub fn gen_queen_moves(board: &Board, file: u8, rank: u8) -> ChessResult<Vec<Move>> {
    generate_for(board, file, rank, Piece::Queen)
}

/// Includes castling when the mover's own right for that wing is held, the
/// squares between king and rook are empty, and none of the squares the
/// king starts on, crosses, or lands on is attacked.
pub fn gen_king_moves(board: &Board, file: u8, rank: u8) -> ChessResult<Vec<Move>> {
    generate_for(board, file, rank, Piece::King)
}

fn generate_for(board: &Board, file: u8, rank: u8, expected: Piece) -> ChessResult<Vec<Move>> {
    let square = Square::at(file, rank)?;
    match board.get_piece_at(square) {
        Some(info) if info.piece == expected => {
            let mut moves = Vec::new();
            gen_piece_moves(board, square, info, &mut moves);
            Ok(moves)
        }
        found => Err(ChessError::WrongPieceKind {
            square,
            expected,
            found: found.map(|info| info.piece),
        }),
    }
}

/// Every pseudo-legal move of the side to move
pub fn all_pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let side = board.side_to_move();
    for (square, info) in board.positions().pieces() {
        if info.side == side {
            gen_piece_moves(board, square, info, &mut moves);
        }
    }
    moves
}

/// Pseudo-legal moves of whatever stands on `square`, for its own side
pub fn moves_from(board: &Board, square: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    if let Some(info) = board.get_piece_at(square) {
        gen_piece_moves(board, square, info, &mut moves);
    }
    moves
}

pub(crate) fn gen_piece_moves(board: &Board, from: Square, info: PieceInfo, moves: &mut Vec<Move>) {
    match info.piece {
        Piece::Pawn => push_pawn_moves(board, from, info.side, moves),
        Piece::Knight => push_step_moves(board, from, info, moves),
        Piece::King => {
            push_step_moves(board, from, info, moves);
            push_castle_moves(board, from, info.side, moves);
        }
        Piece::Bishop | Piece::Rook | Piece::Queen => push_slider_moves(
            board,
            from,
            info.side,
            Direction::slider_dirs(info.piece),
            moves,
        ),
    }
}

/// An enemy piece other than the king
#[inline(always)]
fn is_capturable(target: PieceInfo, side: Side) -> bool {
    target.side != side && target.piece != Piece::King
}

fn push_slider_moves(
    board: &Board,
    from: Square,
    side: Side,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            match board.get_piece_at(next) {
                None => moves.push(Move::new(from, next, Move::QUIET)),
                Some(target) => {
                    if is_capturable(target, side) {
                        moves.push(Move::new(from, next, Move::CAPTURE));
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Knight and king moves, read off the piece's attack pattern
fn push_step_moves(board: &Board, from: Square, info: PieceInfo, moves: &mut Vec<Move>) {
    let targets = attacks::attacks_from(board, from, info);
    for to in targets.iter_bits().filter_map(Square::new) {
        match board.get_piece_at(to) {
            None => moves.push(Move::new(from, to, Move::QUIET)),
            Some(target) if is_capturable(target, info.side) => {
                moves.push(Move::new(from, to, Move::CAPTURE))
            }
            Some(_) => {}
        }
    }
}

fn push_pawn_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
    let dir = side.pawn_dir();

    // Quiet pushes
    if let Some(one) = from.offset(0, dir) {
        if !board.positions().is_occupied(one) {
            push_pawn_target(from, one, side, Move::QUIET, moves);

            if from.rank() == side.pawn_start_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if !board.positions().is_occupied(two) {
                        moves.push(Move::new(from, two, Move::DOUBLE_PAWN));
                    }
                }
            }
        }
    }

    // Captures
    for df in [-1, 1] {
        let Some(target) = from.offset(df, dir) else {
            continue;
        };
        match board.get_piece_at(target) {
            Some(other) if is_capturable(other, side) => {
                push_pawn_target(from, target, side, Move::CAPTURE, moves)
            }
            _ => {
                if board.enpassant_square() == Some(target)
                    && target.rank() == side.enpassant_rank()
                {
                    moves.push(Move::new(from, target, Move::EN_PASSANT));
                }
            }
        }
    }
}

/// A single pawn move, or its four promotion variants on the last rank
fn push_pawn_target(from: Square, to: Square, side: Side, flags: u8, moves: &mut Vec<Move>) {
    if to.rank() == side.promotion_rank() {
        for promo in Move::PROMOTIONS {
            moves.push(Move::new(from, to, promo | flags));
        }
    } else {
        moves.push(Move::new(from, to, flags));
    }
}

fn push_castle_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
    // Rights imply an unmoved king, but a hand-made record may disagree
    if from.file() != 5 || from.rank() != side.back_rank() {
        return;
    }
    let rights = board.castling_rights();
    let occupied = attacks::occupied(board);
    let mut enemy_attacks: Option<BitBoard> = None;

    // (kingside, rook offset, squares between, king path incl. start and landing, flags)
    let wings: [(bool, i8, &[i8], [i8; 3], u8); 2] = [
        (true, 3, &[1, 2], [0, 1, 2], Move::KING_CASTLE),
        (false, -4, &[-1, -2, -3], [0, -1, -2], Move::QUEEN_CASTLE),
    ];

    for (kingside, rook_offset, between, path, flags) in wings {
        if !rights.can_castle(side, kingside) {
            continue;
        }
        let rook_home = from
            .offset(rook_offset, 0)
            .and_then(|sq| board.get_piece_at(sq));
        if rook_home != Some(PieceInfo::new(Piece::Rook, side)) {
            continue;
        }
        let clear = between
            .iter()
            .filter_map(|&df| from.offset(df, 0))
            .all(|sq| !occupied.contains(sq));
        if !clear {
            continue;
        }
        let attacked = *enemy_attacks.get_or_insert_with(|| attacks::attacked(board, side.flip()));
        let safe = path
            .iter()
            .filter_map(|&df| from.offset(df, 0))
            .all(|sq| !attacked.contains(sq));
        if !safe {
            continue;
        }
        if let Some(to) = from.offset(path[2], 0) {
            moves.push(Move::new(from, to, flags));
        }
    }
}
