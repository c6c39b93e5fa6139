use chesskit::prelude::*;
use chesskit::utils::cli::{Cli, Commands};
use clap::Parser;

fn main() -> miette::Result<()> {
    init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply()?;

    let span = span!(Level::DEBUG, "main");
    let _guard = span.enter();

    match cli.command {
        Commands::Perft {
            fen,
            depth,
            divide,
            serial,
        } => {
            let fen = fen.unwrap_or_else(|| config.fen.clone());
            let depth = depth.unwrap_or(config.perft_depth);
            trace!("Running perft with fen: {fen:?}, depth: {depth}, divide: {divide}");
            let mut board = Board::from_fen(&fen)?;
            println!("{board}");
            if divide {
                perft_divide(&mut board, depth);
            } else if config.parallel && !serial {
                run_parallel(&mut board, depth);
            } else {
                run_perft_suite(&mut board, depth);
            }
        }
        Commands::Moves { fen } => {
            let mut board = load_board(fen, &config)?;
            let moves = legal_moves(&mut board);
            for mov in &moves {
                println!("{mov}");
            }
            info!("{} legal moves", moves.len());
        }
        Commands::Status { fen } => {
            let mut board = load_board(fen, &config)?;
            println!("{}", game_status(&mut board));
        }
        Commands::Apply { fen, moves } => {
            let mut board = load_board(fen, &config)?;
            for mov in moves {
                board
                    .try_move(mov)
                    .with_context(|| format!("Applying {mov} to {board}"))?;
            }
            println!("{board}");
        }
    }
    Ok(())
}

fn load_board(fen: Option<String>, config: &Config) -> miette::Result<Board> {
    let fen = fen.unwrap_or_else(|| config.fen.clone());
    Board::from_fen(&fen).with_context(|| format!("Reading position {fen:?}"))
}

#[cfg(feature = "parallel")]
fn run_parallel(board: &mut Board, depth: u8) {
    let result = perft_parallel(board, depth);
    println!(
        "Depth {}: {} nodes in {} ms ({} nps)",
        depth,
        result.nodes,
        result.duration.as_millis(),
        result.nps
    );
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(board: &mut Board, depth: u8) {
    warn!("Built without the parallel feature, counting on one thread");
    run_perft_suite(board, depth);
}
