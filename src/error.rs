//! Errors raised by the rules core.
//!
//! Every failure here is a deterministic validation of data the caller
//! already holds, so none of them are worth retrying.

use miette::Diagnostic;
use thiserror::Error;

use crate::board::components::{Piece, Square};

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// File or rank outside `1..=8`
    #[error("coordinate out of range: file = {file}, rank = {rank}")]
    #[diagnostic(
        code(chesskit::invalid_coordinate),
        help("files and ranks are 1-indexed and must lie in 1..=8")
    )]
    InvalidCoordinate { file: u8, rank: u8 },

    #[error("malformed position record: {0}")]
    #[diagnostic(
        code(chesskit::malformed_record),
        help("expected 6 space separated fields, and 8 files on every rank")
    )]
    MalformedRecord(String),

    #[error("malformed token: {0:?}")]
    #[diagnostic(code(chesskit::malformed_token))]
    MalformedToken(String),

    #[error("invalid piece symbol: {0:?}")]
    #[diagnostic(
        code(chesskit::invalid_piece_symbol),
        help("valid symbols are PNBRQK for major, pnbrqk for minor, and ' ' for empty")
    )]
    InvalidPieceSymbol(char),

    /// A per-kind generator was pointed at a square holding something else
    #[error("expected a {expected} on {square}, found {}", occupant_name(.found))]
    #[diagnostic(code(chesskit::wrong_piece_kind))]
    WrongPieceKind {
        square: Square,
        expected: Piece,
        found: Option<Piece>,
    },

    #[error("no piece on {0}")]
    #[diagnostic(code(chesskit::empty_square))]
    EmptySquare(Square),

    #[error("illegal move: {0}")]
    #[diagnostic(code(chesskit::illegal_move))]
    IllegalMove(String),
}

fn occupant_name(found: &Option<Piece>) -> String {
    match found {
        Some(piece) => piece.to_string(),
        None => "an empty square".to_string(),
    }
}

pub type ChessResult<T> = std::result::Result<T, ChessError>;
