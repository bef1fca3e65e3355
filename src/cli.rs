//! Command-line argument surface (spec §4.L, spec.md §6's "CLI surface").

use clap::Parser;

/// Mines frequent connected subgraphs from a transaction database read
/// from stdin.
#[derive(Debug, Parser)]
#[command(name = "gspan", about = "Frequent connected subgraph mining (gSpan)")]
pub struct Cli {
    /// Minimum number of transactions a pattern must occur in.
    pub minsup: String,

    /// Treat input edges as directed rather than bidirectional.
    #[arg(long = "dir")]
    pub directed: bool,

    /// Print the canonical DFS code instead of the transaction-graph
    /// form.
    #[arg(long = "dfsc")]
    pub dfs_code: bool,

    /// Verbose diagnostics on stderr; in `--dfsc` mode, also appends
    /// each pattern's embeddings.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Parses `minsup` as a positive integer. Kept as a plain `String`
    /// field on the struct (rather than a `u32` with `clap`'s built-in
    /// parsing) so an unparsable value surfaces through this crate's own
    /// usage-error path with exit code 1, matching spec.md §6/§7's
    /// "exit status 1" boundary rather than clap's own exit code 2 for
    /// a missing/malformed positional.
    pub fn minsup(&self) -> Result<usize, String> {
        self.minsup
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("minsup must be a positive integer, got {:?}", self.minsup))
    }
}
