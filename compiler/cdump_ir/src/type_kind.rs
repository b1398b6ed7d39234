//! Semantic kinds for type nodes and the Kind Classifier.
//!
//! The front end has far more concrete type classes than the dumper has
//! child rules. Each concrete class name maps to one [`TypeKind`]; names
//! that are not in [`CLASS_TABLE`] resolve to [`TypeKind::Type`], whose only
//! rule is the desugar step. Supporting a new class means one table entry,
//! one `TypeShape` variant and one enumerator.

use std::fmt;

/// Closed set of type kinds that have their own child-enumeration rule.
///
/// Kinds form a single-inheritance hierarchy through [`TypeKind::parent`];
/// an enumerator always runs its parent's enumerator first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// Generic default: desugar step only.
    Type,
    /// Function without a prototype: return type.
    Function,
    /// Function with a prototype: return type, then parameter types.
    FunctionProto,
    /// Fixed, dependent or incomplete array: element type.
    Array,
    /// Array whose extent is computed at run time: element type, then size expression.
    VariableArray,
    /// Pointer: pointee type.
    Pointer,
    /// Record or enum type: no structural children; its declaration is dumped on the side.
    Tag,
}

/// Concrete class name → kind. Every name not listed is [`TypeKind::Type`].
pub const CLASS_TABLE: &[(&str, TypeKind)] = &[
    ("FunctionProtoType", TypeKind::FunctionProto),
    ("FunctionNoProtoType", TypeKind::Function),
    ("ConstantArrayType", TypeKind::Array),
    ("DependentSizedArrayType", TypeKind::Array),
    ("IncompleteArrayType", TypeKind::Array),
    ("VariableArrayType", TypeKind::VariableArray),
    ("PointerType", TypeKind::Pointer),
    ("RecordType", TypeKind::Tag),
    ("EnumType", TypeKind::Tag),
];

impl TypeKind {
    pub const ALL: [TypeKind; 7] = [
        TypeKind::Type,
        TypeKind::Function,
        TypeKind::FunctionProto,
        TypeKind::Array,
        TypeKind::VariableArray,
        TypeKind::Pointer,
        TypeKind::Tag,
    ];

    /// Classify a concrete class name. Total: unknown names get the generic kind.
    pub fn of_class(class_name: &str) -> TypeKind {
        CLASS_TABLE
            .iter()
            .find(|(name, _)| *name == class_name)
            .map_or(TypeKind::Type, |&(_, kind)| kind)
    }

    /// Logical parent kind, `None` for the root. A kind's child list starts
    /// with its parent's.
    pub const fn parent(self) -> Option<TypeKind> {
        match self {
            Self::Type => None,
            Self::Function | Self::Array | Self::Pointer | Self::Tag => Some(Self::Type),
            Self::FunctionProto => Some(Self::Function),
            Self::VariableArray => Some(Self::Array),
        }
    }

    /// Stable name used in dump output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Type => "TYPE",
            Self::Function => "FUNCTION_TYPE",
            Self::FunctionProto => "FUNCTION_PROTO_TYPE",
            Self::Array => "ARRAY_TYPE",
            Self::VariableArray => "VARIABLE_ARRAY_TYPE",
            Self::Pointer => "POINTER_TYPE",
            Self::Tag => "TAG_TYPE",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
