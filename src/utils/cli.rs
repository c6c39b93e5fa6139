use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::Move;

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("APP_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// TOML config file; flags given here win over its values
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Position record, defaults to the configured one
        #[arg(short, long)]
        fen: Option<String>,
        /// Depth to search, defaults to the configured one
        #[arg(short, long)]
        depth: Option<u8>,
        /// Print the node count under each root move
        #[arg(long, default_value = "false")]
        divide: bool,
        /// Count on a single thread even when parallel perft is available
        #[arg(long, default_value = "false")]
        serial: bool,
    },

    /// List the legal moves of the side to move
    Moves {
        #[arg(short, long)]
        fen: Option<String>,
    },

    /// Report check, checkmate, stalemate or fifty-move draw
    Status {
        #[arg(short, long)]
        fen: Option<String>,
    },

    /// Play moves given as "<from> <to> <flags>" and print the resulting record
    #[clap(visible_alias = "a")]
    Apply {
        #[arg(short, long)]
        fen: Option<String>,
        /// Moves in order, each quoted, e.g. "e2 e4 1"
        moves: Vec<Move>,
    },
}
