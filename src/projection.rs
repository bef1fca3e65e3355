//! Projections: the set of embeddings of one growing pattern across the
//! whole transaction database, and the support count derived from it
//! (spec §4.D).

use hashbrown::{HashMap, HashSet};

use crate::embedding::{HostGraphId, SbgArena, SbgId};
use crate::graph::{Graph, HostEdge};
use crate::label::{Label, LabelPolicy};

/// Every embedding of one pattern, across every host graph it occurs in.
/// Order is insertion order (host-graph appearance order), not sorted —
/// callers that need a deterministic host-id set should use
/// [`Projection::support_graphs`], which sorts.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    members: Vec<SbgId>,
}

impl Projection {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    pub fn push(&mut self, sbg: SbgId) {
        self.members.push(sbg);
    }

    pub fn members(&self) -> &[SbgId] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Distinct host graphs this pattern occurs in at least once. This
    /// is the support count gSpan mines against (spec §4.D, §5): a
    /// pattern embedded three times in one host graph still counts once.
    pub fn support(&self, arena: &SbgArena) -> usize {
        self.support_graphs(arena).len()
    }

    /// The distinct host-graph ids this pattern occurs in, sorted
    /// ascending (appearance order) so output and logging are
    /// deterministic regardless of hashbrown's iteration order (spec
    /// §6's `#found_in:` line).
    pub fn support_graphs(&self, arena: &SbgArena) -> Vec<HostGraphId> {
        let mut ids: Vec<HostGraphId> = self
            .members
            .iter()
            .map(|&sbg| arena.host(sbg))
            .collect::<hashbrown::HashSet<_>>()
            .into_iter()
            .collect();
        radsort::sort(&mut ids);
        ids
    }
}

/// Canonical key for a 1-edge seed pattern. Undirected runs fold a
/// physical edge's two label readings (visited from either endpoint) onto
/// one key by sorting `(vl_from, vl_to)`; directed runs must *not* do
/// this — `vl_from`/`vl_to` name the edge's actual source/target label
/// and swapping them would claim a pattern edge in the opposite direction
/// from the host edge it was seeded from (spec §3, §8.5).
pub(crate) fn seed_key(
    vl_from: &Label,
    el: &Label,
    vl_to: &Label,
    directed: bool,
) -> (Label, Label, Label) {
    if !directed && vl_from > vl_to {
        (vl_to.clone(), el.clone(), vl_from.clone())
    } else {
        (vl_from.clone(), el.clone(), vl_to.clone())
    }
}

/// Builds the initial projections: one per distinct 1-edge label tuple,
/// across the whole database. `policy` governs whether edges are walked
/// in one direction or both (spec §4.H).
///
/// Each physical host edge is seeded exactly once. Undirected
/// [`Graph::incident_edges`] yields both halves of an edge (once from
/// each endpoint), so a per-host `seeded` set records which edge ids have
/// already produced an [`crate::embedding::SbgArena::seed`] — without it,
/// every undirected edge would be counted (and later extended) twice,
/// doubling every projection and arena for no real occurrence.
pub fn seed_projections(
    hosts: &[Graph],
    policy: &dyn LabelPolicy,
    arena: &mut SbgArena,
) -> HashMap<(Label, Label, Label), Projection> {
    let mut projections: HashMap<(Label, Label, Label), Projection> = HashMap::new();

    for (host_id, host) in hosts.iter().enumerate() {
        let mut seeded: HashSet<HostEdge> = HashSet::new();
        for v in host.vertex_indices() {
            let vl_from = host.vertex_label(v).clone();
            for (_, edge_id, el) in host.incident_edges(v) {
                if !seeded.insert(edge_id) {
                    continue;
                }
                let (from, to) = host.edge_endpoints(edge_id);
                let other = if from == v { to } else { from };
                let vl_to = host.vertex_label(other).clone();
                let key = seed_key(&vl_from, el, &vl_to, policy.directed());
                let sbg = arena.seed(host_id, edge_id);
                projections.entry(key).or_default().push(sbg);
            }
        }
    }

    projections
}
