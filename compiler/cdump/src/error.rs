//! Errors that abort a traversal.

use cdump_ir::{NodeCategory, NodeId};

use crate::{DumpId, RecordKind};

/// Failure reported by a [`DumpSink`](crate::DumpSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to write dump record: {0}")]
    Io(#[from] std::io::Error),
    #[error("record {0:?} was already written")]
    Duplicate(DumpId),
}

/// Fatal traversal error. There is no recovery: a traversal either dumps
/// every reachable node exactly once or stops at the first error.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("output sink failed: {0}")]
    Sink(#[from] SinkError),
    #[error("root {root:?} is outside an arena of {len} nodes")]
    RootOutOfRange { root: NodeId, len: usize },
    #[error("visit dispatcher: case not implemented, '{kind}'")]
    KindNotImplemented { kind: RecordKind },
    #[error("node {id:?} is a {found} node, not a {expected} node")]
    CategoryMismatch {
        id: NodeId,
        expected: &'static str,
        found: NodeCategory,
    },
}
