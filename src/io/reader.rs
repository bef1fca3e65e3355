//! Transaction-database reader (spec §4.I, spec.md §6's "Input format").
//!
//! Line-oriented, `BufRead`-driven, same shape as the teacher's
//! `input.rs::parse_graph_from_custom_format` — read lines, split on
//! whitespace, build up a graph — except malformed records become
//! `Result`s here instead of `panic!`, per spec.md §7.
//!
//! `t # <name>` opens a transaction; a second `t` line closes it, and
//! that line is buffered (`pending`) so the next call resumes there,
//! mirroring `original_source/main.cpp`'s "read one block, push back the
//! next `t` line" protocol.

use std::io::BufRead;

use hashbrown::HashMap;
use log::warn;

use crate::error::{MiningError, Result};
use crate::graph::{Graph, HostVertex};
use crate::label::{Label, LabelPolicy};

/// The token that denotes an unlabeled (void) vertex or edge in the
/// textual format.
const VOID_TOKEN: &str = "_";

/// Counts accumulated across a [`TransactionReader::read_all`] run, for
/// the verbose banner (spec.md §7's "counted, optionally logged").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub parsed: usize,
    pub skipped_malformed: usize,
    pub skipped_unlabeled: usize,
}

/// Stateful reader over one `BufRead` source, able to resume a
/// transaction stream across multiple [`TransactionReader::read_transaction`]
/// calls.
pub struct TransactionReader<R> {
    lines: std::io::Lines<R>,
    pending: Option<String>,
}

fn parse_label(token: &str) -> Label {
    if token == VOID_TOKEN {
        Label::Void
    } else {
        Label::concrete(token)
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: None,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        match self.lines.next() {
            None => Ok(None),
            Some(line) => Ok(Some(line?)),
        }
    }

    /// Discards lines until (and not including) the next `t`-opening
    /// line, to resynchronize after a malformed record. The resync
    /// target is buffered back via `pending`.
    fn resync(&mut self) -> Result<()> {
        loop {
            match self.next_line()? {
                None => return Ok(()),
                Some(line) => {
                    if line.trim_start().starts_with('t') {
                        self.pending = Some(line);
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Reads zero or one transaction. Returns `Ok(None)` at end of
    /// input. A malformed record yields `Err(MalformedInput)`; a void
    /// vertex under a policy that forbids it yields
    /// `Err(UnlabeledVertex)`. In both cases the reader has already
    /// resynchronized to the next transaction, so the caller may call
    /// again immediately.
    pub fn read_transaction(&mut self, policy: &dyn LabelPolicy) -> Result<Option<(Graph, String)>> {
        let mut line_no = 0usize;

        let header = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) => {
                    line_no += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    break trimmed.to_string();
                }
            }
        };

        let header_tokens: Vec<&str> = header.split_whitespace().collect();
        if header_tokens.first() != Some(&"t") {
            self.resync()?;
            return Err(MiningError::MalformedInput {
                line: line_no,
                detail: format!("expected 't # <name>', got {header:?}"),
            });
        }
        let name = header_tokens
            .iter()
            .skip(2)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        let mut graph = Graph::new(name.clone(), policy.directed());
        let mut id_to_index: HashMap<usize, HostVertex> = HashMap::new();
        let mut first_unlabeled_vertex: Option<usize> = None;

        loop {
            let line = match self.next_line()? {
                None => break,
                Some(line) => line,
            };
            line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            match tokens.first() {
                Some(&"t") => {
                    self.pending = Some(line);
                    break;
                }
                Some(&"v") => {
                    if tokens.len() != 3 {
                        self.resync()?;
                        return Err(MiningError::MalformedInput {
                            line: line_no,
                            detail: format!("expected 'v <index> <label>', got {tokens:?}"),
                        });
                    }
                    let Ok(index) = tokens[1].parse::<usize>() else {
                        self.resync()?;
                        return Err(MiningError::MalformedInput {
                            line: line_no,
                            detail: format!("vertex index is not an integer: {:?}", tokens[1]),
                        });
                    };
                    if index != id_to_index.len() {
                        self.resync()?;
                        return Err(MiningError::MalformedInput {
                            line: line_no,
                            detail: format!("vertex indices must be dense from 0, got {index}"),
                        });
                    }
                    let label = parse_label(tokens[2]);
                    if label.is_void() && first_unlabeled_vertex.is_none() {
                        first_unlabeled_vertex = Some(index);
                    }
                    let vertex = graph.add_vertex(label);
                    id_to_index.insert(index, vertex);
                }
                Some(&"e") => {
                    if tokens.len() != 4 {
                        self.resync()?;
                        return Err(MiningError::MalformedInput {
                            line: line_no,
                            detail: format!("expected 'e <from> <to> <label>', got {tokens:?}"),
                        });
                    }
                    let parsed = tokens[1].parse::<usize>().and_then(|a| {
                        tokens[2].parse::<usize>().map(|b| (a, b))
                    });
                    let Ok((from, to)) = parsed else {
                        self.resync()?;
                        return Err(MiningError::MalformedInput {
                            line: line_no,
                            detail: format!("edge endpoints are not integers: {tokens:?}"),
                        });
                    };
                    let (Some(&from_idx), Some(&to_idx)) =
                        (id_to_index.get(&from), id_to_index.get(&to))
                    else {
                        self.resync()?;
                        return Err(MiningError::MalformedInput {
                            line: line_no,
                            detail: format!("edge references unknown vertex in {tokens:?}"),
                        });
                    };
                    graph.add_edge(from_idx, to_idx, parse_label(tokens[3]));
                }
                _ => {
                    self.resync()?;
                    return Err(MiningError::MalformedInput {
                        line: line_no,
                        detail: format!("unrecognized record: {tokens:?}"),
                    });
                }
            }
        }

        if let Some(vertex) = first_unlabeled_vertex {
            if !policy.allows_void() {
                return Err(MiningError::UnlabeledVertex {
                    transaction: name,
                    vertex,
                });
            }
        }

        Ok(Some((graph, name)))
    }

    /// Drives [`TransactionReader::read_transaction`] in a loop,
    /// accumulating every successfully parsed graph plus a [`ReadStats`]
    /// summary of what was skipped and why.
    pub fn read_all(&mut self, policy: &dyn LabelPolicy) -> (Vec<Graph>, ReadStats) {
        let mut graphs = Vec::new();
        let mut stats = ReadStats::default();

        loop {
            match self.read_transaction(policy) {
                Ok(None) => break,
                Ok(Some((graph, _name))) => {
                    stats.parsed += 1;
                    graphs.push(graph);
                }
                Err(MiningError::UnlabeledVertex { transaction, .. }) => {
                    stats.skipped_unlabeled += 1;
                    warn!("skipping transaction {transaction}: contains an unlabeled vertex");
                }
                Err(MiningError::MalformedInput { line, detail }) => {
                    stats.skipped_malformed += 1;
                    warn!("skipping malformed record at line {line}: {detail}");
                }
                Err(other) => {
                    warn!("unexpected reader error: {other}");
                    break;
                }
            }
        }

        (graphs, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::UndirectedPolicy;
    use std::io::Cursor;

    #[test]
    fn reads_single_transaction() {
        let input = "t # G1\nv 0 A\nv 1 B\ne 0 1 x\n";
        let mut reader = TransactionReader::new(Cursor::new(input));
        let (graph, name) = reader
            .read_transaction(&UndirectedPolicy)
            .unwrap()
            .expect("one transaction");
        assert_eq!(name, "G1");
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(reader.read_transaction(&UndirectedPolicy).unwrap().is_none());
    }

    #[test]
    fn resumes_cleanly_after_second_transaction_header() {
        let input = "t # G1\nv 0 A\nt # G2\nv 0 B\n";
        let mut reader = TransactionReader::new(Cursor::new(input));
        let (g1, name1) = reader.read_transaction(&UndirectedPolicy).unwrap().unwrap();
        assert_eq!(name1, "G1");
        assert_eq!(g1.vertex_count(), 1);

        let (g2, name2) = reader.read_transaction(&UndirectedPolicy).unwrap().unwrap();
        assert_eq!(name2, "G2");
        assert_eq!(g2.vertex_count(), 1);
    }

    #[test]
    fn malformed_record_is_skipped_and_reader_resyncs() {
        let input = "t # G1\nv not_a_number A\nt # G2\nv 0 A\n";
        let mut reader = TransactionReader::new(Cursor::new(input));
        assert!(reader.read_transaction(&UndirectedPolicy).is_err());
        let (g2, name2) = reader.read_transaction(&UndirectedPolicy).unwrap().unwrap();
        assert_eq!(name2, "G2");
        assert_eq!(g2.vertex_count(), 1);
    }

    #[test]
    fn void_vertex_rejected_under_forbidding_policy() {
        let input = "t # G1\nv 0 _\nv 1 A\ne 0 1 x\n";
        let mut reader = TransactionReader::new(Cursor::new(input));
        let err = reader.read_transaction(&UndirectedPolicy).unwrap_err();
        assert!(matches!(err, MiningError::UnlabeledVertex { .. }));
    }

    #[test]
    fn read_all_accumulates_stats() {
        let input = "t # G1\nv 0 A\nv 1 B\ne 0 1 x\nt # G2\nv 0 _\n";
        let mut reader = TransactionReader::new(Cursor::new(input));
        let (graphs, stats) = reader.read_all(&UndirectedPolicy);
        assert_eq!(graphs.len(), 1);
        assert_eq!(stats.parsed, 1);
        assert_eq!(stats.skipped_unlabeled, 1);
    }
}
