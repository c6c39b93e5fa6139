use chesskit::prelude::*;

fn nodes(fen: &str, depth: u8) -> u64 {
    let mut board = Board::from_fen(fen).unwrap();
    let result = perft(&mut board, depth, false);
    assert_eq!(board.to_fen(), fen, "perft must leave the position as it found it");
    result.nodes
}

#[test]
fn start_position() {
    init();
    assert_eq!(nodes(START_FEN, 1), 20);
    assert_eq!(nodes(START_FEN, 2), 400);
    assert_eq!(nodes(START_FEN, 3), 8902);
    assert_eq!(nodes(START_FEN, 4), 197281);
}

#[test]
fn kiwipete() {
    assert_eq!(nodes(KIWIPETE, 1), 48);
    assert_eq!(nodes(KIWIPETE, 2), 2039);
    assert_eq!(nodes(KIWIPETE, 3), 97862);
}

#[test]
fn position_3() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    assert_eq!(nodes(fen, 1), 14);
    assert_eq!(nodes(fen, 2), 191);
    assert_eq!(nodes(fen, 3), 2812);
    assert_eq!(nodes(fen, 4), 43238);
}

#[test]
fn position_4() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(nodes(fen, 1), 6);
    assert_eq!(nodes(fen, 2), 264);
    assert_eq!(nodes(fen, 3), 9467);

    // Mirrored with colours swapped
    let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    assert_eq!(nodes(fen, 1), 6);
    assert_eq!(nodes(fen, 2), 264);
    assert_eq!(nodes(fen, 3), 9467);
}

#[test]
fn position_5() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(nodes(fen, 1), 44);
    assert_eq!(nodes(fen, 2), 1486);
    assert_eq!(nodes(fen, 3), 62379);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_agrees() {
    let board = Board::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft_parallel(&board, 3).nodes, 97862);
    assert_eq!(perft_parallel(&Board::new(), 3).nodes, 8902);
}
