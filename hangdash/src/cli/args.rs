//! CLI argument definitions

use crate::export::DateRange;
use crate::retrieval::DEFAULT_BASE_URL;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hangdash",
    about = "Aggregate hang profiles into per-day graphs",
    after_help = "\
EXAMPLES:
    hangdash --dir ./mirror                          Whole call tree of thread 0
    hangdash --dir ./mirror --thread 1 --stack 42    Subtree rooted at stack 42
    hangdash --dir ./mirror --stack 42 --children    Also list the children of stack 42
    hangdash --dir ./mirror --export graph.json      Write the graph as JSON"
)]
pub struct Args {
    /// Directory holding the fetched fragment files
    #[arg(short, long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Duration specifier of the aggregate (e.g. 30, 7)
    #[arg(long, default_value = "30")]
    pub duration: String,

    /// Request the historical aggregate
    #[arg(long)]
    pub historical: bool,

    /// Payload identifier qualifying the aggregate
    #[arg(long, value_name = "ID")]
    pub payload_id: Option<String>,

    /// Root URL the fragments are published under
    #[arg(long, env = "HANGDASH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Thread to graph (index into the profile's threads)
    #[arg(short, long, default_value = "0")]
    pub thread: usize,

    /// Root of the subtree to graph (omit for the whole call tree)
    #[arg(short, long)]
    pub stack: Option<usize>,

    /// List the direct children of the selected stack
    #[arg(long)]
    pub children: bool,

    /// Inclusive range of date indices to display, as START:END
    #[arg(long, value_name = "START:END")]
    pub range: Option<DateRange>,

    /// Export the date graph to a JSON file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}
