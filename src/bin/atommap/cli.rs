use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "atommap",
    about = "Compute atom-atom maps for reactions written as adjacency lists",
    version
)]
pub struct Cli {
    /// Species dictionary (named adjacency lists separated by blank lines)
    #[arg(long, value_name = "FILE")]
    pub species: PathBuf,

    /// Reaction list (YAML with a top-level `reactions` sequence)
    #[arg(long, value_name = "FILE")]
    pub reactions: PathBuf,

    /// Where to write the JSON result
    #[arg(short, long, value_name = "FILE", default_value = "atom-atom-maps.json")]
    pub output: PathBuf,

    /// Mapper settings as JSON; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Give every unlabeled atom a fresh label before mapping
    #[arg(long)]
    pub synthesize_labels: bool,

    /// Fail reactions whose reactant x product combinations exceed N
    #[arg(long, value_name = "N")]
    pub max_combinations: Option<usize>,

    /// Exit with an error if any component matched more than one species
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse() -> Cli {
    Cli::parse()
}
