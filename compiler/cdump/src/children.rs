//! Child Enumerators.
//!
//! One function per kind. Each starts from its parent kind's list and
//! appends its own fields, so field accumulation follows the kind
//! hierarchy without trait objects:
//!
//! ```text
//! type_children
//! ├── function_type_children ── function_proto_type_children
//! ├── array_type_children ───── variable_array_type_children
//! └── pointer_type_children
//!
//! tag_type_children
//! ```
//!
//! Tag types do not chain: their only field is the declaration.
//!
//! Every child is visited through a Top-Level Visitor before its id is
//! appended. Auxiliary fields (exception specification, tag declaration)
//! are visited for their own records but are not appended.

use cdump_ir::{
    ArrayType, ExceptionSpec, FunctionProtoType, FunctionType, NodeId, OpaqueNode, PointerType,
    TagType, TypeNode, VariableArrayType,
};

use crate::record::ChildList;
use crate::{DumpError, DumpSink, Dumper};

impl<S: DumpSink + ?Sized> Dumper<'_, S> {
    /// Generic kind: the desugared type, if the node has sugar.
    pub(crate) fn type_children(
        &mut self,
        id: NodeId,
        node: &TypeNode,
    ) -> Result<ChildList, DumpError> {
        let mut children = ChildList::new();
        if let Some(desugared) = node.sugar_target(id) {
            children.push(self.visit_type(desugared)?);
        }
        Ok(children)
    }

    pub(crate) fn function_type_children(
        &mut self,
        id: NodeId,
        node: &TypeNode,
        func: &FunctionType,
    ) -> Result<ChildList, DumpError> {
        let mut children = self.type_children(id, node)?;
        children.push(self.visit_type(func.return_type)?);
        Ok(children)
    }

    pub(crate) fn function_proto_type_children(
        &mut self,
        id: NodeId,
        node: &TypeNode,
        proto: &FunctionProtoType,
    ) -> Result<ChildList, DumpError> {
        let mut children = self.function_type_children(id, node, &proto.function)?;
        for &param in &proto.params {
            children.push(self.visit_type(param)?);
        }
        self.visit_exception_spec(&proto.exception_spec)?;
        Ok(children)
    }

    pub(crate) fn array_type_children(
        &mut self,
        id: NodeId,
        node: &TypeNode,
        array: &ArrayType,
    ) -> Result<ChildList, DumpError> {
        let mut children = self.type_children(id, node)?;
        children.push(self.visit_type(array.element)?);
        Ok(children)
    }

    /// Array fields, then the size expression last.
    pub(crate) fn variable_array_type_children(
        &mut self,
        id: NodeId,
        node: &TypeNode,
        vla: &VariableArrayType,
    ) -> Result<ChildList, DumpError> {
        let mut children = self.array_type_children(id, node, &vla.array)?;
        children.push(self.visit_stmt(vla.size_expr)?);
        Ok(children)
    }

    pub(crate) fn pointer_type_children(
        &mut self,
        id: NodeId,
        node: &TypeNode,
        ptr: &PointerType,
    ) -> Result<ChildList, DumpError> {
        let mut children = self.type_children(id, node)?;
        children.push(self.visit_type(ptr.pointee)?);
        Ok(children)
    }

    /// The declaration is dumped but is not a child. No desugar step.
    pub(crate) fn tag_type_children(&mut self, tag: &TagType) -> Result<ChildList, DumpError> {
        self.visit_decl(tag.decl)?;
        Ok(ChildList::new())
    }

    /// Statements and declarations: their ingested children, in order.
    pub(crate) fn opaque_children(&mut self, node: &OpaqueNode) -> Result<ChildList, DumpError> {
        node.children
            .iter()
            .map(|&child| self.visit(child))
            .collect()
    }

    // Dumped, never appended: a consumer rebuilding the tree from child
    // lists alone does not see these nodes under the function type.
    fn visit_exception_spec(&mut self, spec: &ExceptionSpec) -> Result<(), DumpError> {
        for &exception in &spec.exceptions {
            self.visit_type(exception)?;
        }
        if let Some(expr) = spec.noexcept_expr {
            self.visit_stmt(expr)?;
        }
        if let Some(decl) = spec.source_decl {
            self.visit_decl(decl)?;
        }
        if let Some(template) = spec.source_template {
            self.visit_decl(template)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
