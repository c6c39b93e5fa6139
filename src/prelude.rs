pub use crate::board::fen;
pub use crate::board::notation::{self, from_algebraic, to_algebraic};
pub use crate::board::{
    self, Board,
    components::{
        BitBoard, BitBoardIterator, BoardState, CastlingRights, Piece, PieceInfo, Side, Square,
    },
};
pub use crate::consts::*;
pub use crate::error::{ChessError, ChessResult};
pub use crate::moves::{
    self, Direction, attacks,
    legal::{self, GameStatus, game_status, is_in_check, legal_moves, legal_moves_from},
    move_gen,
    move_info::{Move, MoveInfo},
};
pub use crate::utils::{self, config::Config, log::*, perft::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
