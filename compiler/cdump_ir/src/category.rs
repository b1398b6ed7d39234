//! Broad node categories, one Top-Level Visitor each.

use std::fmt;

/// Which family a node belongs to.
///
/// `QualType` is the qualified-type wrapper. It is visited by the type-like
/// visitor but has its own fixed child rule.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeCategory {
    Type,
    QualType,
    Stmt,
    Decl,
}

impl NodeCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::QualType => "qualified type",
            Self::Stmt => "statement",
            Self::Decl => "declaration",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
