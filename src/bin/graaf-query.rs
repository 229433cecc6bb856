use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use graaf::LinkGraph;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Inspect a link graph edge list", long_about = None)]
struct Args {
    /// Edge list to load
    #[arg(long, default_value = graaf::INPUT_PATH)]
    input: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print node and edge counts
    Stats,
    /// Print the fewest-hop path between two nodes
    Path { src: String, dst: String },
    /// Write the deduplicated graph back out in edge-list form
    Dump { out: PathBuf },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let graph = LinkGraph::read_from(&args.input)?;

    match args.command {
        Command::Stats => println!("{}", graph.summary()),
        Command::Path { src, dst } => match graph.shortest_path(&src, &dst)? {
            Some(route) => println!("{route}"),
            None => return Err(format!("{dst} is not reachable from {src}").into()),
        },
        Command::Dump { out } => {
            let mut writer = BufWriter::new(File::create(&out)?);
            graph.write_edge_list(&mut writer)?;
            writer.flush()?;
            tracing::info!(path = %out.display(), "wrote edge list");
        }
    }

    Ok(())
}
