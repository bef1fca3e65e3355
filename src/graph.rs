//! Labeled vertex/edge container with adjacency queries (spec §4.A).
//!
//! Built on [`petgraph`], same as the teacher's `UnGraph`/`DiGraph`
//! wrappers. Rather than choosing between `petgraph::graph::UnGraph` and
//! `DiGraph` at compile time, every [`Graph`] stores edges directionally
//! and synthesizes the reverse half-edge at traversal time when the run
//! is undirected — this is what lets one engine serve both orientations
//! (spec §3, §9).

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::label::Label;

/// A vertex index within a [`Graph`].
pub type HostVertex = NodeIndex<u32>;
/// A stable edge id within a [`Graph`], used for duplicate-edge detection
/// inside an embedding chain (spec §4.A, §4.C).
pub type HostEdge = EdgeIndex<u32>;

/// A connected-or-not labeled multigraph over vertex indices `0..n-1`.
/// Immutable once built, per spec §3's lifecycle note.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    directed: bool,
    inner: DiGraph<Label, Label, u32>,
}

impl Graph {
    /// Creates an empty graph tagged with a transaction name and a fixed
    /// orientation policy.
    pub fn new(name: impl Into<String>, directed: bool) -> Self {
        Self {
            name: name.into(),
            directed,
            inner: DiGraph::default(),
        }
    }

    /// The transaction name this graph was read under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this graph's edges are directed or bidirectional.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Adds a labeled vertex, returning its index.
    pub fn add_vertex(&mut self, label: Label) -> HostVertex {
        self.inner.add_node(label)
    }

    /// Adds a labeled edge from `from` to `to`, returning its id.
    pub fn add_edge(&mut self, from: HostVertex, to: HostVertex, label: Label) -> HostEdge {
        self.inner.add_edge(from, to, label)
    }

    /// The label of a vertex.
    pub fn vertex_label(&self, v: HostVertex) -> &Label {
        &self.inner[v]
    }

    /// The label of an edge.
    pub fn edge_label(&self, e: HostEdge) -> &Label {
        &self.inner[e]
    }

    /// The `(source, target)` endpoints of an edge, in the direction it
    /// was added.
    pub fn edge_endpoints(&self, e: HostEdge) -> (HostVertex, HostVertex) {
        self.inner
            .edge_endpoints(e)
            .expect("edge id should belong to this graph")
    }

    /// All vertex indices, in ascending order.
    pub fn vertex_indices(&self) -> impl Iterator<Item = HostVertex> + '_ {
        self.inner.node_indices()
    }

    /// Incident edges of `v` as `(other_vertex, edge_id, edge_label)`,
    /// sorted deterministically by `(other.index(), edge_id.index())`
    /// (spec §9's "traversal determinism" note).
    ///
    /// Directed runs yield only out-edges of `v`, matching spec §4.A's
    /// "directed edges appear in their natural sense only". Undirected
    /// runs yield both halves of every incident edge.
    pub fn incident_edges(&self, v: HostVertex) -> Vec<(HostVertex, HostEdge, &Label)> {
        let mut result: Vec<(HostVertex, HostEdge, &Label)> = self
            .inner
            .edges_directed(v, Direction::Outgoing)
            .map(|e| (e.target(), e.id(), e.weight()))
            .collect();

        if !self.directed {
            result.extend(
                self.inner
                    .edges_directed(v, Direction::Incoming)
                    .map(|e| (e.source(), e.id(), e.weight())),
            );
        }

        result.sort_by_key(|&(other, eid, _)| (other.index(), eid.index()));
        result
    }
}
