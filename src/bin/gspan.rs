//! CLI entry point (spec §4.L): `gspan <minsup> [--dir] [--dfsc] [-v]`,
//! reading a transaction database from stdin and writing mined patterns
//! to stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use gspan_miner::cli::Cli;
use gspan_miner::io::{OutputMode, ResultWriter, TransactionNames, TransactionReader};
use gspan_miner::label::{DirectedPolicy, LabelPolicy, UndirectedPolicy};
use gspan_miner::miner::{MiningConfig, mine};

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let minsup = cli.minsup()?;

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    println!("{}", if cli.directed { "#directed" } else { "#undirected" });

    let policy: Box<dyn LabelPolicy> = if cli.directed {
        Box::new(DirectedPolicy)
    } else {
        Box::new(UndirectedPolicy)
    };

    let stdin = io::stdin();
    let mut reader = TransactionReader::new(stdin.lock());
    let (graphs, stats) = reader.read_all(policy.as_ref());
    log::info!(
        "read {} transactions ({} malformed, {} unlabeled skipped)",
        stats.parsed,
        stats.skipped_malformed,
        stats.skipped_unlabeled
    );

    let names = TransactionNames::new(graphs.iter().map(|g| g.name().to_string()).collect());
    let mode = if cli.dfs_code {
        OutputMode::DfsCode {
            verbose: cli.verbose,
        }
    } else {
        OutputMode::TransactionGraph
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let mut writer = ResultWriter::new(&mut handle, mode, names);

    let config = MiningConfig::new(minsup);
    mine(&graphs, &config, policy.as_ref(), &mut |code, projection, arena| {
        if let Err(err) = writer.emit(code, projection, arena) {
            log::error!("failed to write pattern: {err}");
        }
    })
    .map_err(|err| format!("mining failed: {err}"))?;

    handle.flush().map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("gspan: {message}");
            ExitCode::FAILURE
        }
    }
}
