use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::moves::legal::legal_moves;
use crate::{Board, Move};

#[derive(Debug)]
pub struct PerftResult {
    /// Total nodes counted
    pub nodes: u64,
    /// Time taken
    pub duration: Duration,
    /// Nodes per second
    pub nps: u64,
    /// Move breakdown showing count for each move
    pub move_counts: Option<Vec<(Move, u64)>>,
}

impl PerftResult {
    /// Creates a new PerftResult with the given data
    pub fn new(nodes: u64, duration: Duration, move_counts: Option<Vec<(Move, u64)>>) -> Self {
        let nanos = duration.as_nanos();
        let nps = if nanos > 0 {
            (nodes as u128 * 1_000_000_000 / nanos) as u64
        } else {
            0
        };

        Self {
            nodes,
            duration,
            nps,
            move_counts,
        }
    }
}

/// Leaf nodes below `board` at `depth`, restoring the board on the way out
fn count_nodes(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for m in moves {
        let Ok(move_data) = board.make_move(m) else {
            continue;
        };
        nodes += count_nodes(board, depth - 1);
        board.unmake_move(&move_data);
    }
    nodes
}

#[instrument(skip(board))]
pub fn perft(board: &mut Board, depth: u8, divide: bool) -> PerftResult {
    let start_time = Instant::now();

    if depth == 0 {
        return PerftResult::new(1, start_time.elapsed(), None);
    }

    if !divide {
        let nodes = count_nodes(board, depth);
        return PerftResult::new(nodes, start_time.elapsed(), None);
    }

    let legal_moves = legal_moves(board);
    let mut total_nodes = 0;
    let mut move_counts = Vec::with_capacity(legal_moves.len());

    for m in legal_moves {
        let move_data = match board.make_move(m) {
            Ok(data) => data,
            Err(_) => continue,
        };
        let sub_nodes = count_nodes(board, depth - 1);
        board.unmake_move(&move_data);

        debug!("{m}: {sub_nodes}");
        total_nodes += sub_nodes;
        move_counts.push((m, sub_nodes));
    }

    PerftResult::new(total_nodes, start_time.elapsed(), Some(move_counts))
}

/// Perft with the root moves split over the rayon pool. Each worker plays
/// on its own copy of the board.
#[cfg(feature = "parallel")]
#[instrument(skip(board))]
pub fn perft_parallel(board: &Board, depth: u8) -> PerftResult {
    use rayon::prelude::*;

    let start_time = Instant::now();
    if depth == 0 {
        return PerftResult::new(1, start_time.elapsed(), None);
    }

    let mut root = *board;
    let move_counts: Vec<(Move, u64)> = legal_moves(&mut root)
        .into_par_iter()
        .filter_map(|m| {
            let mut worker = *board;
            worker.make_move(m).ok()?;
            Some((m, count_nodes(&mut worker, depth - 1)))
        })
        .collect();
    let nodes = move_counts.iter().map(|(_, n)| n).sum();

    PerftResult::new(nodes, start_time.elapsed(), Some(move_counts))
}

/// Performs a Perft test and prints a detailed breakdown
pub fn perft_divide(board: &mut Board, depth: u8) -> PerftResult {
    println!("Starting perft...");
    let result = perft(board, depth, true);

    if let Some(ref move_counts) = result.move_counts {
        println!("Perft results at depth {depth}");
        println!("----------------------------");

        for (mov, count) in move_counts {
            println!("{}: {count}", mov.uci());
        }

        println!("----------------------------");
        println!("Total nodes: {}", result.nodes);
        println!("Time: {} ms", result.duration.as_millis());
        println!("Nodes per second: {}", result.nps);
    }

    result
}

/// Runs a suite of perft tests for depths 1 through max_depth
pub fn run_perft_suite(board: &mut Board, max_depth: u8) -> Vec<PerftResult> {
    println!("Running Perft suite up to depth {max_depth}");
    println!("----------------------------");

    let mut results = Vec::with_capacity(max_depth as usize);
    for depth in 1..=max_depth {
        let result = perft(board, depth, false);
        println!(
            "Depth {}: {} nodes in {} ms ({} nps)",
            depth,
            result.nodes,
            result.duration.as_millis(),
            result.nps
        );
        results.push(result);
    }

    println!("----------------------------");
    results
}

#[cfg(test)]
mod perft_tests {
    use super::*;
    use crate::consts::{KIWIPETE, START_FEN};
    use crate::utils::log::init;

    /// Known Perft values for the starting position
    const STARTING_PERFT: &[(u8, u64)] = &[
        (1, 20),     // depth 1: 20 nodes
        (2, 400),    // depth 2: 400 nodes
        (3, 8902),   // depth 3: 8,902 nodes
        (4, 197281), // depth 4: 197,281 nodes
    ];

    /// Known Perft values for position 2
    const KIWIPETE_PERFT: &[(u8, u64)] = &[
        (1, 48),    // depth 1: 48 nodes
        (2, 2039),  // depth 2: 2,039 nodes
        (3, 97862), // depth 3: 97,862 nodes
    ];

    fn check(fen: &str, expected: &[(u8, u64)]) {
        let mut board = Board::from_fen(fen).unwrap();
        for &(depth, nodes) in expected {
            let result = perft(&mut board, depth, false);
            assert_eq!(
                result.nodes, nodes,
                "Perft failed at depth {depth} for {fen}: got {} expected {nodes}",
                result.nodes
            );
            assert_eq!(board.to_fen(), fen, "perft left the board changed");
        }
    }

    #[test]
    fn test_perft_starting_position() {
        init();
        // limit to depth 3 for time
        check(START_FEN, &STARTING_PERFT[..3]);
    }

    #[test]
    fn test_perft_kiwipete() {
        init();
        check(KIWIPETE, &KIWIPETE_PERFT[..2]);
    }

    #[test]
    fn test_perft_position3() {
        init();
        // Position 3 from CPW
        check(
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            &[(1, 14), (2, 191), (3, 2812)],
        );
    }

    #[test]
    fn test_perft_position4() {
        init();
        // Position 4 from CPW (en passant capture test)
        check(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            &[(1, 6), (2, 264), (3, 9467)],
        );
    }

    #[test]
    fn test_perft_position5() {
        init();
        check(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            &[(1, 44), (2, 1486)],
        );
    }

    #[test]
    fn test_divide_sums_to_total() {
        let mut board = Board::new();
        let result = perft(&mut board, 2, true);
        let counts = result.move_counts.unwrap();
        assert_eq!(counts.len(), 20);
        assert!(counts.iter().all(|&(_, n)| n == 20));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<u64>(), result.nodes);
    }

    #[test]
    fn test_suite_depths() {
        let mut board = Board::new();
        let nodes: Vec<u64> = run_perft_suite(&mut board, 2)
            .iter()
            .map(|r| r.nodes)
            .collect();
        assert_eq!(nodes, vec![20, 400]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let mut board = Board::from_fen(KIWIPETE).unwrap();
        let serial = perft(&mut board, 2, true);
        let parallel = perft_parallel(&board, 2);
        assert_eq!(parallel.nodes, serial.nodes);
        assert_eq!(parallel.move_counts, serial.move_counts);
    }
}
