//! graph-walk: load a JSON graph document and query it.
//!
//! Wraps graph-walk-core to answer neighbor queries and run the reference
//! walk from the command line. Results go to stdout as JSON lines; logs go
//! to stderr.

mod config;
mod error;
mod load;
mod neighbors;
mod status;
mod util;
mod walk;

use std::io::Write;

use clap::{Parser, Subcommand};
use graph_walk_core::{Direction, WalkOptions};
use tracing_subscriber::EnvFilter;

use crate::config::{FilterArgs, Settings};
use crate::error::Result;
use crate::util::parse_direction;

#[derive(Parser, Debug)]
#[command(name = "graph-walk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show counts and memory for the loaded graph
    Status,

    /// List vertexes reached through outgoing edges
    Next {
        /// Vertex id to start from
        id: String,

        /// Print bare vertexes instead of edge + vertex rows
        #[arg(long)]
        vertexes_only: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List vertexes reached through incoming edges
    Prev {
        /// Vertex id to start from
        id: String,

        /// Print bare vertexes instead of edge + vertex rows
        #[arg(long)]
        vertexes_only: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Walk breadth-first from a vertex, reporting branches and loops
    Walk {
        /// Vertex id to start from
        id: String,

        /// outgoing | incoming
        #[arg(long, default_value = "outgoing", value_parser = parse_direction)]
        direction: Direction,

        /// Steps beyond the start vertex
        #[arg(
            long,
            default_value_t = 8,
            value_parser = clap::value_parser!(u32).range(0..=1024)
        )]
        max_depth: u32,

        /// Stop after this many recorded steps
        #[arg(
            long,
            default_value_t = 10_000,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=10_000_000)
        )]
        max_steps: usize,

        /// Skip vertexes already reached by another branch
        #[arg(long)]
        unique: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.settings.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let loaded = load::load_graph(&cli.settings)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Status => status::run(&loaded, &mut out)?,
        Commands::Next {
            id,
            vertexes_only,
            filter,
        } => {
            let condition = filter.to_condition();
            neighbors::run(
                &loaded.repo,
                &id,
                Direction::Outgoing,
                condition.as_ref(),
                vertexes_only,
                &mut out,
            )?;
        }
        Commands::Prev {
            id,
            vertexes_only,
            filter,
        } => {
            let condition = filter.to_condition();
            neighbors::run(
                &loaded.repo,
                &id,
                Direction::Incoming,
                condition.as_ref(),
                vertexes_only,
                &mut out,
            )?;
        }
        Commands::Walk {
            id,
            direction,
            max_depth,
            max_steps,
            unique,
            filter,
        } => {
            let options = WalkOptions {
                direction,
                max_depth,
                condition: filter.to_condition(),
                unique_vertexes: unique,
                max_steps,
            };
            walk::run(&loaded.repo, &id, &options, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
