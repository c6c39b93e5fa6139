use tracing::debug;

use super::{
    Board,
    components::{BoardState, CastlingRights, PieceInfo, Side, Square},
};
use crate::error::{ChessError, ChessResult};

/// Parse a six field position record:
/// placement, side to move, castling, en passant, halfmove clock, fullmove number.
///
/// Placement lists ranks from 8 down to 1 separated by '/', each rank a run of
/// piece letters (uppercase for Major) and digits counting empty squares.
pub fn parse_fen(fen: &str) -> ChessResult<Board> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        debug!("Rejecting record with {} fields: {fen:?}", parts.len());
        return Err(ChessError::MalformedRecord(format!(
            "expected 6 fields, found {}",
            parts.len()
        )));
    }

    let positions = parse_placement(parts[0])?;
    let stm = parse_stm(parts[1])?;
    let castling_rights = parse_castle(parts[2])?;
    let enpassant_square = parse_enpassant(parts[3])?;
    if let Some(ep) = enpassant_square {
        if positions.is_occupied(ep) {
            return Err(ChessError::MalformedRecord(format!(
                "en passant square {ep} is occupied"
            )));
        }
    }
    let halfmove_clock = parse_counter(parts[4], "halfmove clock")?;
    let fullmove_counter = parse_counter(parts[5], "fullmove number")?;

    Ok(Board {
        positions,
        stm,
        castling_rights,
        enpassant_square,
        halfmove_clock,
        fullmove_counter,
    })
}

/// Inverse of [`parse_fen`]
pub fn to_fen(board: &Board) -> String {
    format!(
        "{} {} {} {} {} {}",
        board.positions.to_fen_pieces(),
        match board.stm {
            Side::Major => 'w',
            Side::Minor => 'b',
        },
        board.castling_rights,
        board
            .enpassant_square
            .map_or_else(|| "-".to_string(), |sq| sq.to_string()),
        board.halfmove_clock,
        board.fullmove_counter,
    )
}

fn parse_placement(placement: &str) -> ChessResult<BoardState> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::MalformedRecord(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut state = BoardState::default();
    // The first listed rank is rank 8
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(ChessError::MalformedRecord(format!(
                        "bad empty run {c:?} on rank {}",
                        rank + 1
                    )));
                }
                file += run as usize;
            } else {
                let info = PieceInfo::from_symbol(c)?;
                if file < 8 {
                    // file < 8 and rank < 8 keep the index on the board
                    if let Some(square) = Square::new(rank * 8 + file) {
                        state.set(square, info);
                    }
                }
                file += 1;
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(ChessError::MalformedRecord(format!(
                "rank {} covers {file} files instead of 8",
                rank + 1
            )));
        }
    }
    Ok(state)
}

fn parse_stm(stm: &str) -> ChessResult<Side> {
    match stm {
        "w" => Ok(Side::Major),
        "b" => Ok(Side::Minor),
        _ => Err(ChessError::MalformedRecord(format!(
            "invalid side to move {stm:?}"
        ))),
    }
}

fn parse_castle(castle: &str) -> ChessResult<CastlingRights> {
    if castle == "-" {
        return Ok(CastlingRights::empty());
    }
    let mut res = CastlingRights::empty();
    for c in castle.chars() {
        let right = match c {
            'K' => CastlingRights::MAJOR_00,
            'Q' => CastlingRights::MAJOR_000,
            'k' => CastlingRights::MINOR_00,
            'q' => CastlingRights::MINOR_000,
            _ => {
                return Err(ChessError::MalformedRecord(format!(
                    "unexpected castling character {c:?}"
                )));
            }
        };
        res.add_right(CastlingRights(right));
    }
    Ok(res)
}

fn parse_enpassant(enpassant: &str) -> ChessResult<Option<Square>> {
    if enpassant == "-" {
        return Ok(None);
    }
    let square: Square = enpassant.parse().map_err(|_| {
        ChessError::MalformedRecord(format!("invalid en passant square {enpassant:?}"))
    })?;
    if square.rank() != 3 && square.rank() != 6 {
        return Err(ChessError::MalformedRecord(format!(
            "en passant square {square} is not on rank 3 or 6"
        )));
    }
    Ok(Some(square))
}

fn parse_counter(field: &str, name: &str) -> ChessResult<u16> {
    // `u16::from_str` would also take a leading '+'
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChessError::MalformedRecord(format!(
            "{name} {field:?} is not a decimal number"
        )));
    }
    field
        .parse::<u16>()
        .map_err(|e| ChessError::MalformedRecord(format!("{name} {field:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{KIWIPETE, START_FEN};

    #[test]
    fn test_parse_fen() {
        let board = parse_fen(START_FEN).unwrap();
        assert_eq!(board.side_to_move(), Side::Major);
        assert_eq!(board.castling_rights(), CastlingRights::all());
        assert_eq!(board.enpassant_square(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_export_matches_input() {
        for fen in [
            START_FEN,
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "4k3/8/8/8/8/8/8/4K3 b - - 99 120",
        ] {
            assert_eq!(to_fen(&parse_fen(fen).unwrap()), fen);
        }
    }

    #[test]
    fn test_field_count() {
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            Err(ChessError::MalformedRecord(_))
        ));
        assert!(matches!(
            parse_fen(&format!("{START_FEN} extra")),
            Err(ChessError::MalformedRecord(_))
        ));
        assert!(matches!(parse_fen(""), Err(ChessError::MalformedRecord(_))));
    }

    #[test]
    fn test_rank_widths() {
        // 9 files on rank 8
        assert!(matches!(
            parse_fen("rnbqkbnrp/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ChessError::MalformedRecord(_))
        ));
        // 7 files on rank 1
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1"),
            Err(ChessError::MalformedRecord(_))
        ));
        // runs adding past 8
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1"),
            Err(ChessError::MalformedRecord(_))
        ));
        // only 7 ranks
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_bad_piece_letter() {
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4X3 w - - 0 1"),
            Err(ChessError::InvalidPieceSymbol('X'))
        );
    }

    #[test]
    fn test_parse_enpassant() {
        assert_eq!(parse_enpassant("e3").unwrap(), Square::new(20));
        assert_eq!(parse_enpassant("-").unwrap(), None);
        assert!(parse_enpassant("e").is_err());
        assert!(parse_enpassant("").is_err());
        assert!(parse_enpassant("e4").is_err());
    }

    #[test]
    fn test_occupied_enpassant_rejected() {
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/4P3/8/4K3 b - e3 0 1"),
            Err(ChessError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_castle() {
        assert_eq!(parse_castle("-").unwrap(), CastlingRights::empty());
        assert_eq!(
            parse_castle("Kq").unwrap(),
            CastlingRights(CastlingRights::MAJOR_00 | CastlingRights::MINOR_000)
        );
        assert!(parse_castle("KX").is_err());
    }

    #[test]
    fn test_counters_are_plain_digits() {
        assert_eq!(parse_counter("42", "halfmove clock"), Ok(42));
        for bad in ["+5", "-1", " 5", "5x", "70000"] {
            assert!(
                parse_counter(bad, "halfmove clock").is_err(),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - +5 1"),
            Err(ChessError::MalformedRecord(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 5 +1"),
            Err(ChessError::MalformedRecord(_))
        ));
    }
}
