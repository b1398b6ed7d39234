//! Visit Dispatcher.
//!
//! Picks the enumerator for a node's kind, then hands the finished child
//! list to the sink. The kind comes from the shape the classifier fixed at
//! ingestion, and the choice of enumerator is an exhaustive `match` over
//! that shape.

use cdump_ir::{Node, NodeId, TypeKind, TypeNode, TypeShape};

use crate::record::ChildList;
use crate::{DumpError, DumpSink, Dumper, RecordKind};

/// Semantic kind of an ingested type.
#[inline]
pub fn classify(node: &TypeNode) -> TypeKind {
    node.shape.kind()
}

impl<S: DumpSink + ?Sized> Dumper<'_, S> {
    /// Enumerate `id`'s children and dump it. `id` must already be entered.
    pub(crate) fn dispatch(&mut self, id: NodeId) -> Result<(), DumpError> {
        let arena = self.arena;
        let (kind, children) = match arena.get(id) {
            Node::Type(node) => {
                let kind = classify(node);
                let _span = tracing::trace_span!(
                    "type",
                    kind = %kind,
                    parent = kind.parent().map(TypeKind::name),
                    class = arena.class_name(node.class)
                )
                .entered();
                (RecordKind::Type(kind), self.type_kind_children(id, node)?)
            }
            Node::Stmt(node) => (RecordKind::Stmt, self.opaque_children(node)?),
            Node::Decl(node) => (RecordKind::Decl, self.opaque_children(node)?),
            // Wrappers are dumped by the type visitor directly.
            Node::QualType(_) => {
                return Err(DumpError::KindNotImplemented {
                    kind: RecordKind::QualType,
                })
            }
        };
        self.emit(id, kind, children)
    }

    /// Downcast a type to its shape and run that kind's enumerator.
    fn type_kind_children(&mut self, id: NodeId, node: &TypeNode) -> Result<ChildList, DumpError> {
        match &node.shape {
            TypeShape::Generic => self.type_children(id, node),
            TypeShape::Function(func) => self.function_type_children(id, node, func),
            TypeShape::FunctionProto(proto) => self.function_proto_type_children(id, node, proto),
            TypeShape::Array(array) => self.array_type_children(id, node, array),
            TypeShape::VariableArray(vla) => self.variable_array_type_children(id, node, vla),
            TypeShape::Pointer(ptr) => self.pointer_type_children(id, node, ptr),
            TypeShape::Tag(tag) => self.tag_type_children(tag),
        }
    }
}
