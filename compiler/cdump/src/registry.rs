//! Identity Registry: node → dump id, and "already dumped?".
//!
//! Keyed by arena index, so both tables are plain vectors sized to the
//! arena. Entries are only ever added during a run.

use cdump_ir::NodeId;

use crate::{DumpId, IdScheme};

#[derive(Clone, Debug)]
pub struct IdentityRegistry {
    /// Assigned ids, `DumpId::INVALID` where none yet.
    ids: Vec<DumpId>,
    /// Nodes whose dump has started (and, once the traversal returns, finished).
    entered: Vec<bool>,
    scheme: IdScheme,
    next: u32,
    assigned: usize,
    dumped: usize,
}

impl IdentityRegistry {
    /// Registry for an arena of `node_count` nodes.
    pub fn new(node_count: usize, scheme: IdScheme) -> Self {
        Self {
            ids: vec![DumpId::INVALID; node_count],
            entered: vec![false; node_count],
            scheme,
            next: 0,
            assigned: 0,
            dumped: 0,
        }
    }

    /// Id of `node`, assigned on the first call. Every later call returns
    /// the same id.
    ///
    /// # Panics
    /// Panics if `node` is outside the arena the registry was sized for.
    pub fn id_of(&mut self, node: NodeId) -> DumpId {
        let slot = &mut self.ids[node.index()];
        if !slot.is_valid() {
            *slot = match self.scheme {
                IdScheme::Sequential => {
                    let id = DumpId::new(self.next);
                    self.next += 1;
                    id
                }
                IdScheme::NodeIndex => DumpId::new(node.raw()),
            };
            self.assigned += 1;
        }
        *slot
    }

    /// Id of `node` if one was assigned.
    pub fn get(&self, node: NodeId) -> Option<DumpId> {
        self.ids
            .get(node.index())
            .copied()
            .filter(|id| id.is_valid())
    }

    /// Whether `node` has been entered for dumping.
    pub fn is_dumped(&self, node: NodeId) -> bool {
        self.entered.get(node.index()).copied().unwrap_or(false)
    }

    /// Claim `node` for dumping and make sure it has an id.
    ///
    /// Returns `false` if it was already claimed. Claiming happens before
    /// any of the node's children are visited, which is what stops a
    /// reference cycle from recursing forever.
    pub fn enter(&mut self, node: NodeId) -> bool {
        if self.entered[node.index()] {
            return false;
        }
        self.entered[node.index()] = true;
        self.dumped += 1;
        self.id_of(node);
        true
    }

    /// Number of nodes with an id.
    pub fn len(&self) -> usize {
        self.assigned
    }

    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Number of nodes entered for dumping.
    pub fn dumped_count(&self) -> usize {
        self.dumped
    }
}
