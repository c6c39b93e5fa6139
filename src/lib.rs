pub mod board;
pub mod error;
pub mod moves;
pub mod prelude;
pub mod utils;

pub use board::{
    Board,
    components::{BitBoard, CastlingRights, Piece, PieceInfo, Side, Square},
};
pub use error::{ChessError, ChessResult};
pub use moves::move_info::{Move, MoveInfo};

pub mod consts {
    pub const NUM_RANKS: usize = 8;

    /// Halfmoves without a pawn move or capture before the game is drawn
    pub const FIFTY_MOVE_LIMIT: u16 = 100;

    pub const RANK_MASKS: [u64; NUM_RANKS] = [
        0x00000000000000FF, // Rank 1
        0x000000000000FF00, // Rank 2
        0x0000000000FF0000, // Rank 3
        0x00000000FF000000, // Rank 4
        0x000000FF00000000, // Rank 5
        0x0000FF0000000000, // Rank 6
        0x00FF000000000000, // Rank 7
        0xFF00000000000000, // Rank 8
    ];

    pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    pub const KIWIPETE: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
}
