//! Result writers (spec §4.J, spec.md §6's "Output format"). Two small
//! free functions over a `dyn Write`, plus a [`ResultWriter`] that
//! bundles the chosen mode and a running pattern counter — mirroring the
//! teacher's small free-function-per-format style in `output.rs`.

use std::io::{self, Write};

use crate::dfscode::DfsCode;
use crate::embedding::SbgArena;
use crate::label::Label;
use crate::projection::Projection;

/// Maps a host graph's position in the database to its transaction
/// name, for the `#found_in:` line.
pub struct TransactionNames {
    names: Vec<String>,
}

impl TransactionNames {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn name(&self, id: usize) -> &str {
        self.names
            .get(id)
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }
}

/// Which output format a run produces (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `t # k` / `v` / `e` / `#found_in:` blocks (the default).
    TransactionGraph,
    /// One line per pattern, the canonical DFS code; with embeddings
    /// appended when verbose.
    DfsCode { verbose: bool },
}

/// Emits one pattern in transaction-graph form: vertices and edges in
/// ascending index order, void-labeled vertices omitted, followed by a
/// `#found_in:` line naming the distinct host graphs.
pub fn write_transaction_graph<W: Write>(
    out: &mut W,
    index: usize,
    code: &DfsCode,
    projection: &Projection,
    arena: &SbgArena,
    names: &TransactionNames,
) -> io::Result<()> {
    writeln!(out, "t # {index}")?;

    let n = code.rightmost_vertex().map(|v| v + 1).unwrap_or(0);
    let mut labels: Vec<Option<&Label>> = vec![None; n];
    for e in code.iter() {
        if labels[e.vi_from].is_none() {
            labels[e.vi_from] = Some(&e.vl_from);
        }
        if labels[e.vi_to].is_none() {
            labels[e.vi_to] = Some(&e.vl_to);
        }
    }
    for (idx, label) in labels.into_iter().enumerate() {
        let label = label.expect("every vertex id is mentioned by some edge");
        if label.is_void() {
            continue;
        }
        writeln!(out, "v {idx} {label}")?;
    }
    for e in code.iter() {
        writeln!(out, "e {} {} {}", e.vi_from, e.vi_to, e.el)?;
    }

    let host_names: Vec<&str> = projection
        .support_graphs(arena)
        .into_iter()
        .map(|id| names.name(id))
        .collect();
    writeln!(out, "#found_in: {}", host_names.join(", "))?;
    writeln!(out)
}

/// Emits the canonical printed form of `code` on one line: a sequence of
/// `(vi_from vi_to vl_from el vl_to)` tuples. In verbose mode, appends
/// one tab-indented line per embedding listing its host edge chain.
pub fn write_dfs_code<W: Write>(
    out: &mut W,
    code: &DfsCode,
    projection: &Projection,
    arena: &SbgArena,
    verbose: bool,
) -> io::Result<()> {
    let tuples: Vec<String> = code
        .iter()
        .map(|e| {
            format!(
                "({} {} {} {} {})",
                e.vi_from, e.vi_to, e.vl_from, e.el, e.vl_to
            )
        })
        .collect();
    writeln!(out, "{}", tuples.join(" "))?;

    if verbose {
        for &sbg in projection.members() {
            let edges: Vec<String> = arena
                .edges(sbg)
                .into_iter()
                .map(|e| format!("{}", e.index()))
                .collect();
            writeln!(out, "\thost={} edges=[{}]", arena.host(sbg), edges.join(","))?;
        }
    }
    Ok(())
}

/// Bundles a chosen [`OutputMode`], a running 1-based pattern counter,
/// and the host-name table, so the miner's visitor closure only has to
/// call [`ResultWriter::emit`] once per accepted pattern — the same
/// "small stateful struct instantiated once per run" shape as
/// `original_source/main.cpp`'s result-graph bookkeeping.
pub struct ResultWriter<'a, W> {
    out: &'a mut W,
    mode: OutputMode,
    names: TransactionNames,
    next_index: usize,
}

impl<'a, W: Write> ResultWriter<'a, W> {
    pub fn new(out: &'a mut W, mode: OutputMode, names: TransactionNames) -> Self {
        Self {
            out,
            mode,
            names,
            next_index: 1,
        }
    }

    pub fn emit(&mut self, code: &DfsCode, projection: &Projection, arena: &SbgArena) -> io::Result<()> {
        match self.mode {
            OutputMode::TransactionGraph => {
                write_transaction_graph(self.out, self.next_index, code, projection, arena, &self.names)?;
            }
            OutputMode::DfsCode { verbose } => {
                write_dfs_code(self.out, code, projection, arena, verbose)?;
            }
        }
        self.next_index += 1;
        Ok(())
    }
}
