//! Node-visitation and serialization engine.
//!
//! Walks an ingested [`NodeArena`] depth-first from a set of roots and
//! emits one [`DumpRecord`] per distinct node: its id, its kind, and the
//! ids of its structural children in declared field order. Shared nodes
//! are dumped once and referenced by id from every parent, so the output
//! is a DAG of records even when the input contains cycles.
//!
//! # Pipeline
//!
//! ```text
//! Top-Level Visitor ─(first visit)─→ Dispatcher → Child Enumerator → DumpSink
//!         ↑                                              │
//!         └──────────── one visit per child ─────────────┘
//! ```
//!
//! # Usage
//!
//! ```text
//! let arena = builder.finish()?;
//! let mut sink = MemorySink::new();
//! let summary = dump_roots(&arena, &roots, &mut sink, &DumpConfig::from_env())?;
//! ```

mod children;
mod config;
mod dispatch;
mod error;
mod record;
mod registry;
mod sink;
mod visitor;

pub use cdump_ir::{NodeArena, NodeId};
pub use config::{DumpConfig, IdScheme};
pub use dispatch::classify;
pub use error::{DumpError, SinkError};
pub use record::{DumpId, DumpRecord, IdToken, RecordKind};
pub use registry::IdentityRegistry;
pub use sink::{DumpSink, MemorySink, TextSink, VISITED_CHILDREN};
pub use visitor::Dumper;

use std::sync::Once;

/// Outcome of a successful [`dump_roots`] call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DumpSummary {
    /// Dump id of each root, in the order given.
    pub roots: Vec<DumpId>,
    /// Records handed to the sink.
    pub records: usize,
}

/// Dump every node reachable from `roots` in one batch traversal.
///
/// Stops at the first error; records already handed to `sink` stay there.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = arena.len(), roots = roots.len()))]
pub fn dump_roots<S: DumpSink + ?Sized>(
    arena: &NodeArena,
    roots: &[NodeId],
    sink: &mut S,
    config: &DumpConfig,
) -> Result<DumpSummary, DumpError> {
    let mut dumper = Dumper::new(arena, sink, config.clone());
    let roots = roots
        .iter()
        .map(|&root| dumper.visit(root))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = DumpSummary {
        roots,
        records: dumper.records_emitted(),
    };
    tracing::debug!(
        records = summary.records,
        ids = dumper.registry().len(),
        "traversal complete"
    );
    Ok(summary)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=cdump=debug` (one line
/// per traversal) or `RUST_LOG=cdump=trace` (one line per record).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
