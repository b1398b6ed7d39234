//! Top-Level Visitors.
//!
//! One entry point per broad category (`visit_type`, `visit_stmt`,
//! `visit_decl`), plus [`Dumper::visit`] which routes by category. These are
//! the only places that consult the registry: a node already entered is
//! never expanded again, so shared nodes are dumped once and reference
//! cycles terminate.

use cdump_ir::{Node, NodeArena, NodeCategory, NodeId, QualTypeNode};
use smallvec::smallvec;

use crate::record::ChildList;
use crate::{DumpConfig, DumpError, DumpId, DumpRecord, DumpSink, IdentityRegistry, RecordKind};

/// State of one traversal: the arena being dumped, the registry, and the sink.
///
/// Several roots can be visited through the same `Dumper`; nodes shared
/// between them are still dumped once.
pub struct Dumper<'a, S: DumpSink + ?Sized> {
    pub(crate) arena: &'a NodeArena,
    registry: IdentityRegistry,
    sink: &'a mut S,
    config: DumpConfig,
    records: usize,
}

impl<'a, S: DumpSink + ?Sized> Dumper<'a, S> {
    pub fn new(arena: &'a NodeArena, sink: &'a mut S, config: DumpConfig) -> Self {
        sink.begin_run(config.run_id);
        Self {
            arena,
            registry: IdentityRegistry::new(arena.len(), config.id_scheme),
            sink,
            config,
            records: 0,
        }
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Records handed to the sink so far.
    pub fn records_emitted(&self) -> usize {
        self.records
    }

    /// Visit `id` through the visitor for its category.
    pub fn visit(&mut self, id: NodeId) -> Result<DumpId, DumpError> {
        match self.lookup(id)?.category() {
            NodeCategory::Type | NodeCategory::QualType => self.visit_type(id),
            NodeCategory::Stmt => self.visit_stmt(id),
            NodeCategory::Decl => self.visit_decl(id),
        }
    }

    /// Type-like visitor. Handles both unqualified types and qualified-type
    /// wrappers.
    pub fn visit_type(&mut self, id: NodeId) -> Result<DumpId, DumpError> {
        match self.lookup(id)? {
            Node::Type(_) => self.enter(id, |this| this.dispatch(id)),
            Node::QualType(qual) => self.enter(id, |this| this.dump_qualified(id, qual)),
            other => Err(mismatch(id, "type", other)),
        }
    }

    pub fn visit_stmt(&mut self, id: NodeId) -> Result<DumpId, DumpError> {
        match self.lookup(id)? {
            Node::Stmt(_) => self.enter(id, |this| this.dispatch(id)),
            other => Err(mismatch(id, "statement", other)),
        }
    }

    pub fn visit_decl(&mut self, id: NodeId) -> Result<DumpId, DumpError> {
        match self.lookup(id)? {
            Node::Decl(_) => self.enter(id, |this| this.dispatch(id)),
            other => Err(mismatch(id, "declaration", other)),
        }
    }

    /// Emit `id`'s finished record.
    pub(crate) fn emit(
        &mut self,
        id: NodeId,
        kind: RecordKind,
        children: ChildList,
    ) -> Result<(), DumpError> {
        let record = DumpRecord {
            id: self.registry.id_of(id),
            kind,
            children: children.into_vec(),
        };
        tracing::trace!(
            node = ?id,
            id = ?record.id,
            %kind,
            children = record.children.len(),
            "dump"
        );
        self.sink.record(record)?;
        self.records += 1;
        Ok(())
    }

    /// Claim `id`, run `dump` if this is the first claim, and return its id.
    fn enter(
        &mut self,
        id: NodeId,
        dump: impl FnOnce(&mut Self) -> Result<(), DumpError>,
    ) -> Result<DumpId, DumpError> {
        if self.registry.enter(id) {
            cdump_stack::guarded(self.config.grow_stack, || dump(self))?;
        }
        Ok(self.registry.id_of(id))
    }

    /// The wrapper's only child is its unqualified type.
    fn dump_qualified(&mut self, id: NodeId, qual: &QualTypeNode) -> Result<(), DumpError> {
        let underlying = self.visit_type(qual.underlying)?;
        self.emit(id, RecordKind::QualType, smallvec![underlying])
    }

    fn lookup(&self, id: NodeId) -> Result<&'a Node, DumpError> {
        let arena = self.arena;
        if arena.contains(id) {
            Ok(arena.get(id))
        } else {
            Err(DumpError::RootOutOfRange {
                root: id,
                len: arena.len(),
            })
        }
    }
}

fn mismatch(id: NodeId, expected: &'static str, found: &Node) -> DumpError {
    DumpError::CategoryMismatch {
        id,
        expected,
        found: found.category(),
    }
}
