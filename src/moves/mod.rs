pub mod attacks;
pub mod legal;
pub mod move_gen;
pub mod move_info;


/// Board steps as (file delta, rank delta).
/// First 4 are orthogonal, rest are diagonal
///  (N, S, W, E, NE, SE, SW, NW)
pub struct Direction;
impl Direction {
    pub const NORTH: (i8, i8) = (0, 1);
    pub const SOUTH: (i8, i8) = (0, -1);
    pub const WEST: (i8, i8) = (-1, 0);
    pub const EAST: (i8, i8) = (1, 0);
    pub const NORTHEAST: (i8, i8) = (1, 1);
    pub const SOUTHEAST: (i8, i8) = (1, -1);
    pub const SOUTHWEST: (i8, i8) = (-1, -1);
    pub const NORTHWEST: (i8, i8) = (-1, 1);

    pub const ORTHO: [(i8, i8); 4] = [Self::NORTH, Self::SOUTH, Self::WEST, Self::EAST];
    pub const DIAG: [(i8, i8); 4] = [
        Self::NORTHEAST,
        Self::SOUTHEAST,
        Self::SOUTHWEST,
        Self::NORTHWEST,
    ];
    pub const ALL: [(i8, i8); 8] = [
        Self::NORTH,
        Self::SOUTH,
        Self::WEST,
        Self::EAST,
        Self::NORTHEAST,
        Self::SOUTHEAST,
        Self::SOUTHWEST,
        Self::NORTHWEST,
    ];

    pub const KNIGHT: [(i8, i8); 8] = [
        (1, 2),
        (2, 1),
        (2, -1),
        (1, -2),
        (-1, -2),
        (-2, -1),
        (-2, 1),
        (-1, 2),
    ];

    /// Ray directions of a sliding piece; empty for everything else
    pub const fn slider_dirs(piece: crate::board::components::Piece) -> &'static [(i8, i8)] {
        use crate::board::components::Piece;
        match piece {
            Piece::Bishop => &Self::DIAG,
            Piece::Rook => &Self::ORTHO,
            Piece::Queen => &Self::ALL,
            _ => &[],
        }
    }
}
