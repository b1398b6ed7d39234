//! Node representation for the dumper.
//!
//! The front end owns the real AST. Before traversal, each node it wants
//! dumped is ingested once into a [`NodeArena`], which gives it a stable
//! [`NodeId`] and fixes its shape:
//! - Type nodes carry a [`TypeShape`], a closed variant chosen by the
//!   Kind Classifier ([`TypeKind::of_class`]) from the node's class name
//! - Qualified-type wrappers carry [`Qualifiers`] and one underlying type
//! - Statements and declarations carry an ordered child list
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: references are `NodeId(u32)` indices, never pointers
//! - **Classify Once**: the shape is computed at ingestion, so dispatch is an
//!   exhaustive `match` with no second lookup table to drift out of sync
//! - **Immutable After Build**: [`ArenaBuilder::finish`] validates every
//!   reference; the engine only ever borrows the finished arena

mod arena;
mod category;
mod class_name;
mod node;
mod node_id;
mod qualifiers;
mod type_kind;

pub use arena::{ArenaBuilder, IngestError, NodeArena, TypeFields};
pub use category::NodeCategory;
pub use class_name::{ClassName, ClassNames};
pub use node::{
    ArrayType, ExceptionSpec, FunctionProtoType, FunctionType, Node, OpaqueNode, PointerType,
    QualTypeNode, TagType, TypeNode, TypeShape, VariableArrayType,
};
pub use node_id::NodeId;
pub use qualifiers::Qualifiers;
pub use type_kind::{TypeKind, CLASS_TABLE};
