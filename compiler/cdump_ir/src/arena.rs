//! Node arena and ingestion.
//!
//! The front end describes each node once through an [`ArenaBuilder`].
//! Nodes may reference nodes that are not defined yet: [`ArenaBuilder::reserve`]
//! hands out an id first, so mutually-referencing nodes can be described.
//! [`ArenaBuilder::finish`] checks every reference and freezes the arena.

use smallvec::SmallVec;

use crate::node::{
    ArrayType, ExceptionSpec, FunctionProtoType, FunctionType, PointerType, TagType,
    VariableArrayType,
};
use crate::{
    ClassName, ClassNames, Node, NodeCategory, NodeId, OpaqueNode, QualTypeNode, Qualifiers,
    TypeKind, TypeNode, TypeShape,
};

/// Errors raised while ingesting front-end nodes.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum IngestError {
    #[error("node {0:?} was never reserved")]
    NotReserved(NodeId),
    #[error("node {0:?} is already defined")]
    Redefined(NodeId),
    #[error("node {0:?} was reserved but never defined")]
    Undefined(NodeId),
    #[error("{field} of node {from:?} references {target:?}, outside an arena of {len} nodes")]
    OutOfRange {
        from: NodeId,
        field: &'static str,
        target: NodeId,
        len: usize,
    },
    #[error("{field} of node {from:?} must reference a {expected} node, found a {found} node")]
    WrongCategory {
        from: NodeId,
        field: &'static str,
        expected: NodeCategory,
        found: NodeCategory,
    },
    #[error("`{class}` node {id:?} is missing its {field}")]
    MissingField {
        id: NodeId,
        class: String,
        field: &'static str,
    },
}

/// Raw type fields as read off a front-end type.
///
/// The front end fills whatever its node exposes; the classifier decides
/// which of them the node's kind actually uses.
#[derive(Clone, Debug, Default)]
pub struct TypeFields {
    pub return_type: Option<NodeId>,
    pub params: Vec<NodeId>,
    pub exceptions: Vec<NodeId>,
    pub noexcept_expr: Option<NodeId>,
    pub source_decl: Option<NodeId>,
    pub source_template: Option<NodeId>,
    pub element: Option<NodeId>,
    pub size_expr: Option<NodeId>,
    pub pointee: Option<NodeId>,
    pub decl: Option<NodeId>,
}

impl TypeFields {
    #[must_use]
    pub fn return_type(mut self, id: NodeId) -> Self {
        self.return_type = Some(id);
        self
    }

    #[must_use]
    pub fn params(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.params.extend(ids);
        self
    }

    #[must_use]
    pub fn exceptions(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.exceptions.extend(ids);
        self
    }

    #[must_use]
    pub fn noexcept_expr(mut self, id: NodeId) -> Self {
        self.noexcept_expr = Some(id);
        self
    }

    #[must_use]
    pub fn source_decl(mut self, id: NodeId) -> Self {
        self.source_decl = Some(id);
        self
    }

    #[must_use]
    pub fn source_template(mut self, id: NodeId) -> Self {
        self.source_template = Some(id);
        self
    }

    #[must_use]
    pub fn element(mut self, id: NodeId) -> Self {
        self.element = Some(id);
        self
    }

    #[must_use]
    pub fn size_expr(mut self, id: NodeId) -> Self {
        self.size_expr = Some(id);
        self
    }

    #[must_use]
    pub fn pointee(mut self, id: NodeId) -> Self {
        self.pointee = Some(id);
        self
    }

    #[must_use]
    pub fn decl(mut self, id: NodeId) -> Self {
        self.decl = Some(id);
        self
    }
}

/// Builds a [`NodeArena`].
#[derive(Debug, Default)]
pub struct ArenaBuilder {
    slots: Vec<Option<Node>>,
    classes: ClassNames,
}

impl ArenaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reserved slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Allocate an id whose node will be defined later.
    pub fn reserve(&mut self) -> NodeId {
        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|&index| index != u32::MAX)
            .unwrap_or_else(|| panic!("node arena exceeded {} nodes", u32::MAX - 1));
        self.slots.push(None);
        NodeId::new(index)
    }

    /// Define a type node, classifying `class_name` to pick its shape.
    pub fn define_type(
        &mut self,
        id: NodeId,
        class_name: &str,
        desugared: Option<NodeId>,
        fields: TypeFields,
    ) -> Result<(), IngestError> {
        self.check_vacant(id)?;
        let shape = build_shape(id, class_name, fields)?;
        let class = self.classes.intern(class_name);
        self.fill(
            id,
            Node::Type(TypeNode {
                class,
                desugared,
                shape,
            }),
        );
        Ok(())
    }

    pub fn add_type(
        &mut self,
        class_name: &str,
        desugared: Option<NodeId>,
        fields: TypeFields,
    ) -> Result<NodeId, IngestError> {
        let id = self.reserve();
        self.define_type(id, class_name, desugared, fields)?;
        Ok(id)
    }

    pub fn define_qual_type(
        &mut self,
        id: NodeId,
        underlying: NodeId,
        qualifiers: Qualifiers,
    ) -> Result<(), IngestError> {
        self.check_vacant(id)?;
        self.fill(
            id,
            Node::QualType(QualTypeNode {
                underlying,
                qualifiers,
            }),
        );
        Ok(())
    }

    pub fn add_qual_type(
        &mut self,
        underlying: NodeId,
        qualifiers: Qualifiers,
    ) -> Result<NodeId, IngestError> {
        let id = self.reserve();
        self.define_qual_type(id, underlying, qualifiers)?;
        Ok(id)
    }

    pub fn define_stmt(
        &mut self,
        id: NodeId,
        class_name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), IngestError> {
        self.check_vacant(id)?;
        let node = self.opaque(class_name, children);
        self.fill(id, Node::Stmt(node));
        Ok(())
    }

    pub fn add_stmt(
        &mut self,
        class_name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, IngestError> {
        let id = self.reserve();
        self.define_stmt(id, class_name, children)?;
        Ok(id)
    }

    pub fn define_decl(
        &mut self,
        id: NodeId,
        class_name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), IngestError> {
        self.check_vacant(id)?;
        let node = self.opaque(class_name, children);
        self.fill(id, Node::Decl(node));
        Ok(())
    }

    pub fn add_decl(
        &mut self,
        class_name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, IngestError> {
        let id = self.reserve();
        self.define_decl(id, class_name, children)?;
        Ok(id)
    }

    /// Validate every reference and freeze the arena.
    pub fn finish(self) -> Result<NodeArena, IngestError> {
        let len = self.slots.len();
        let mut nodes = Vec::with_capacity(len);
        for (index, slot) in self.slots.into_iter().enumerate() {
            let id = NodeId::new(index_to_u32(index));
            nodes.push(slot.ok_or(IngestError::Undefined(id))?);
        }

        for (index, node) in nodes.iter().enumerate() {
            let from = NodeId::new(index_to_u32(index));
            let mut result = Ok(());
            node.for_each_reference(|field, target, expected| {
                if result.is_err() {
                    return;
                }
                let Some(found) = nodes.get(target.index()).map(Node::category) else {
                    result = Err(IngestError::OutOfRange {
                        from,
                        field,
                        target,
                        len,
                    });
                    return;
                };
                if let Some(expected) = expected.filter(|&expected| expected != found) {
                    result = Err(IngestError::WrongCategory {
                        from,
                        field,
                        expected,
                        found,
                    });
                }
            });
            result?;
        }

        Ok(NodeArena {
            nodes,
            classes: self.classes,
        })
    }

    fn check_vacant(&self, id: NodeId) -> Result<(), IngestError> {
        match self.slots.get(id.index()) {
            None => Err(IngestError::NotReserved(id)),
            Some(Some(_)) => Err(IngestError::Redefined(id)),
            Some(None) => Ok(()),
        }
    }

    fn fill(&mut self, id: NodeId, node: Node) {
        self.slots[id.index()] = Some(node);
    }

    fn opaque(
        &mut self,
        class_name: &str,
        children: impl IntoIterator<Item = NodeId>,
    ) -> OpaqueNode {
        OpaqueNode {
            class: self.classes.intern(class_name),
            children: children.into_iter().collect(),
        }
    }
}

/// Slots are capped below `u32::MAX` by `reserve`.
#[inline]
fn index_to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or_else(|_| panic!("node index {index} exceeds u32::MAX"))
}

fn build_shape(id: NodeId, class_name: &str, fields: TypeFields) -> Result<TypeShape, IngestError> {
    let require = |value: Option<NodeId>, field: &'static str| {
        value.ok_or_else(|| IngestError::MissingField {
            id,
            class: class_name.to_owned(),
            field,
        })
    };

    let shape = match TypeKind::of_class(class_name) {
        TypeKind::Type => TypeShape::Generic,
        TypeKind::Function => TypeShape::Function(FunctionType {
            return_type: require(fields.return_type, "return type")?,
        }),
        TypeKind::FunctionProto => TypeShape::FunctionProto(FunctionProtoType {
            function: FunctionType {
                return_type: require(fields.return_type, "return type")?,
            },
            params: SmallVec::from_vec(fields.params),
            exception_spec: ExceptionSpec {
                exceptions: SmallVec::from_vec(fields.exceptions),
                noexcept_expr: fields.noexcept_expr,
                source_decl: fields.source_decl,
                source_template: fields.source_template,
            },
        }),
        TypeKind::Array => TypeShape::Array(ArrayType {
            element: require(fields.element, "element type")?,
        }),
        TypeKind::VariableArray => TypeShape::VariableArray(VariableArrayType {
            array: ArrayType {
                element: require(fields.element, "element type")?,
            },
            size_expr: require(fields.size_expr, "size expression")?,
        }),
        TypeKind::Pointer => TypeShape::Pointer(PointerType {
            pointee: require(fields.pointee, "pointee type")?,
        }),
        TypeKind::Tag => TypeShape::Tag(TagType {
            decl: require(fields.decl, "tag declaration")?,
        }),
    };
    Ok(shape)
}

/// Immutable, validated node storage. Every reference inside resolves to a
/// node of the category its field expects.
#[derive(Clone, Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
    classes: ClassNames,
}

impl NodeArena {
    /// # Panics
    /// Panics if `id` is not from this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    #[inline]
    pub fn category(&self, id: NodeId) -> NodeCategory {
        self.get(id).category()
    }

    pub fn class_name(&self, class: ClassName) -> &str {
        self.classes.lookup(class)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All ids in index order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|index| NodeId::new(index_to_u32(index)))
    }
}
