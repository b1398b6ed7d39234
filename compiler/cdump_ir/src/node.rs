//! Ingested node payloads.
//!
//! Type shapes nest their logical parent's payload (`FunctionProtoType`
//! holds a `FunctionType`, `VariableArrayType` holds an `ArrayType`), so an
//! enumerator can hand the parent part straight to the parent's enumerator.

use smallvec::SmallVec;

use crate::{ClassName, NodeCategory, NodeId, Qualifiers, TypeKind};

/// Fields shared by every function type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionType {
    /// Qualified return type.
    pub return_type: NodeId,
}

/// Exception specification of a prototyped function.
///
/// None of these are structural children of the function type: they are
/// dumped as independent records but never appear in its child list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExceptionSpec {
    /// Qualified types named in a dynamic exception specification.
    pub exceptions: SmallVec<[NodeId; 2]>,
    /// `noexcept(expr)` guard expression.
    pub noexcept_expr: Option<NodeId>,
    /// Declaration whose exception specification this is.
    pub source_decl: Option<NodeId>,
    /// Template the exception specification was instantiated from.
    pub source_template: Option<NodeId>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionProtoType {
    pub function: FunctionType,
    /// Qualified parameter types, in declaration order.
    pub params: SmallVec<[NodeId; 4]>,
    pub exception_spec: ExceptionSpec,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArrayType {
    /// Qualified element type.
    pub element: NodeId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableArrayType {
    pub array: ArrayType,
    /// Statement node computing the extent.
    pub size_expr: NodeId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointerType {
    /// Qualified pointee type.
    pub pointee: NodeId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagType {
    /// Record or enum declaration.
    pub decl: NodeId,
}

/// Shape of a type node, fixed at ingestion by the Kind Classifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeShape {
    Generic,
    Function(FunctionType),
    FunctionProto(FunctionProtoType),
    Array(ArrayType),
    VariableArray(VariableArrayType),
    Pointer(PointerType),
    Tag(TagType),
}

impl TypeShape {
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Generic => TypeKind::Type,
            Self::Function(_) => TypeKind::Function,
            Self::FunctionProto(_) => TypeKind::FunctionProto,
            Self::Array(_) => TypeKind::Array,
            Self::VariableArray(_) => TypeKind::VariableArray,
            Self::Pointer(_) => TypeKind::Pointer,
            Self::Tag(_) => TypeKind::Tag,
        }
    }
}

/// An unqualified type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeNode {
    pub class: ClassName,
    /// Fully desugared, unqualified form: every layer of sugar stripped.
    /// `None`, or a link to the node itself, means the type carries no sugar.
    pub desugared: Option<NodeId>,
    pub shape: TypeShape,
}

impl TypeNode {
    /// The desugared type, if it differs from `this`.
    #[inline]
    pub fn sugar_target(&self, this: NodeId) -> Option<NodeId> {
        self.desugared.filter(|&target| target != this)
    }
}

/// Qualified-type wrapper: qualifiers over exactly one unqualified type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QualTypeNode {
    pub underlying: NodeId,
    pub qualifiers: Qualifiers,
}

/// A statement or declaration. Its children are enumerated by the front
/// end's own visitors and arrive here already in declared order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpaqueNode {
    pub class: ClassName,
    pub children: SmallVec<[NodeId; 4]>,
}

/// One ingested node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Type(TypeNode),
    QualType(QualTypeNode),
    Stmt(OpaqueNode),
    Decl(OpaqueNode),
}

impl Node {
    pub const fn category(&self) -> NodeCategory {
        match self {
            Self::Type(_) => NodeCategory::Type,
            Self::QualType(_) => NodeCategory::QualType,
            Self::Stmt(_) => NodeCategory::Stmt,
            Self::Decl(_) => NodeCategory::Decl,
        }
    }

    /// Calls `f(field, target, expected)` for every outgoing reference.
    /// `expected` is `None` where any category is accepted.
    pub(crate) fn for_each_reference(
        &self,
        mut f: impl FnMut(&'static str, NodeId, Option<NodeCategory>),
    ) {
        const QUAL: Option<NodeCategory> = Some(NodeCategory::QualType);
        const STMT: Option<NodeCategory> = Some(NodeCategory::Stmt);
        const DECL: Option<NodeCategory> = Some(NodeCategory::Decl);

        match self {
            Self::Type(ty) => {
                if let Some(target) = ty.desugared {
                    f("desugared type", target, Some(NodeCategory::Type));
                }
                match &ty.shape {
                    TypeShape::Generic => {}
                    TypeShape::Function(func) => f("return type", func.return_type, QUAL),
                    TypeShape::FunctionProto(proto) => {
                        f("return type", proto.function.return_type, QUAL);
                        for &param in &proto.params {
                            f("parameter type", param, QUAL);
                        }
                        let spec = &proto.exception_spec;
                        for &exception in &spec.exceptions {
                            f("exception type", exception, QUAL);
                        }
                        if let Some(expr) = spec.noexcept_expr {
                            f("noexcept expression", expr, STMT);
                        }
                        if let Some(decl) = spec.source_decl {
                            f("source declaration", decl, DECL);
                        }
                        if let Some(template) = spec.source_template {
                            f("source template", template, DECL);
                        }
                    }
                    TypeShape::Array(array) => f("element type", array.element, QUAL),
                    TypeShape::VariableArray(vla) => {
                        f("element type", vla.array.element, QUAL);
                        f("size expression", vla.size_expr, STMT);
                    }
                    TypeShape::Pointer(ptr) => f("pointee type", ptr.pointee, QUAL),
                    TypeShape::Tag(tag) => f("tag declaration", tag.decl, DECL),
                }
            }
            Self::QualType(qual) => f("underlying type", qual.underlying, Some(NodeCategory::Type)),
            Self::Stmt(node) | Self::Decl(node) => {
                for &child in &node.children {
                    f("child", child, None);
                }
            }
        }
    }
}
