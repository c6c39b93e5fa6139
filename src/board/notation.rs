//! Algebraic square names.
//!
//! Files are letters `a..=h`, ranks digits `1..=8`; both are 1-indexed on
//! the coordinate side, so `b7` is `(2, 7)`.

use crate::error::{ChessError, ChessResult};

pub fn to_algebraic(file: u8, rank: u8) -> ChessResult<String> {
    if !(1..=8).contains(&file) || !(1..=8).contains(&rank) {
        return Err(ChessError::InvalidCoordinate { file, rank });
    }
    let mut out = String::with_capacity(2);
    out.push((b'a' + file - 1) as char);
    out.push((b'0' + rank) as char);
    Ok(out)
}

/// Parses exactly one letter `a..=h` followed by one digit `1..=8`.
/// Input is expected to be trimmed already.
pub fn from_algebraic(s: &str) -> ChessResult<(u8, u8)> {
    match s.as_bytes() {
        &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok((f - b'a' + 1, r - b'0')),
        _ => Err(ChessError::MalformedToken(s.to_string())),
    }
}

/// Linear 0..64 index of a 1-indexed coordinate
pub fn to_index(file: u8, rank: u8) -> ChessResult<usize> {
    if !(1..=8).contains(&file) || !(1..=8).contains(&rank) {
        return Err(ChessError::InvalidCoordinate { file, rank });
    }
    Ok((file as usize - 1) + (rank as usize - 1) * 8)
}

/// 1-indexed `(file, rank)` of a linear index
pub fn from_index(index: usize) -> Option<(u8, u8)> {
    (index < 64).then(|| ((index % 8 + 1) as u8, (index / 8 + 1) as u8))
}
