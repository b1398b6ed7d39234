//! Dump ids and the records handed to a [`DumpSink`](crate::DumpSink).

use std::fmt;

use cdump_ir::TypeKind;
use smallvec::SmallVec;

/// Id assigned to a node by the [`IdentityRegistry`](crate::IdentityRegistry).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct DumpId(u32);

impl DumpId {
    pub const INVALID: DumpId = DumpId(u32::MAX);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Wire token for this id within run `run_id`.
    #[inline]
    pub const fn token(self, run_id: u32) -> IdToken {
        IdToken { id: self, run_id }
    }
}

impl fmt::Debug for DumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "DumpId::INVALID")
        } else {
            write!(f, "DumpId({})", self.0)
        }
    }
}

impl Default for DumpId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Textual id as written to a stream, `0x<id>_<run>`.
///
/// The run suffix keeps ids from separate dumps distinct when they share
/// one output stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IdToken {
    id: DumpId,
    run_id: u32,
}

impl fmt::Display for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}_{}", self.id.0, self.run_id)
    }
}

/// What a record describes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    Type(TypeKind),
    QualType,
    Stmt,
    Decl,
}

impl RecordKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Type(kind) => kind.name(),
            Self::QualType => "QUAL_TYPE",
            Self::Stmt => "STMT",
            Self::Decl => "DECL",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered child ids while a record is being assembled.
pub(crate) type ChildList = SmallVec<[DumpId; 4]>;

/// One node's finished description: its id, its kind, and its structural
/// children in declared field order.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DumpRecord {
    pub id: DumpId,
    pub kind: RecordKind,
    pub children: Vec<DumpId>,
}
