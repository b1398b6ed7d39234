//! Output sinks.
//!
//! A sink receives each record exactly once, after the record's child list
//! is final. Any error it returns aborts the traversal.

use std::io::Write;

use rustc_hash::FxHashMap;

use crate::{DumpId, DumpRecord, SinkError};

/// Header line that opens each record in [`TextSink`] output.
pub const VISITED_CHILDREN: &str = "<Visited Children>";

pub trait DumpSink {
    /// Called once per [`Dumper`](crate::Dumper) before any record, with the
    /// configured run id.
    fn begin_run(&mut self, _run_id: u32) {}

    fn record(&mut self, record: DumpRecord) -> Result<(), SinkError>;
}

impl<S: DumpSink + ?Sized> DumpSink for &mut S {
    fn begin_run(&mut self, run_id: u32) {
        (**self).begin_run(run_id);
    }

    fn record(&mut self, record: DumpRecord) -> Result<(), SinkError> {
        (**self).record(record)
    }
}

/// Keeps records in emission order. Rejects a second record for an id.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Vec<DumpRecord>,
    by_id: FxHashMap<DumpId, usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DumpRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DumpRecord> {
        self.records
    }

    pub fn get(&self, id: DumpId) -> Option<&DumpRecord> {
        self.by_id.get(&id).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DumpSink for MemorySink {
    fn record(&mut self, record: DumpRecord) -> Result<(), SinkError> {
        if self.by_id.contains_key(&record.id) {
            return Err(SinkError::Duplicate(record.id));
        }
        self.by_id.insert(record.id, self.records.len());
        self.records.push(record);
        Ok(())
    }
}

/// Writes records as line-oriented blocks:
///
/// ```text
/// <Visited Children>
/// 0x2_0
/// POINTER_TYPE
/// 1
/// 0x1_0
/// ```
///
/// id token, kind, child count, then one child token per line. Tokens carry
/// the run id of the traversal writing them, so one stream can hold several
/// runs.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
    run_id: u32,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, run_id: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DumpSink for TextSink<W> {
    fn begin_run(&mut self, run_id: u32) {
        self.run_id = run_id;
    }

    fn record(&mut self, record: DumpRecord) -> Result<(), SinkError> {
        let run = self.run_id;
        writeln!(self.out, "{VISITED_CHILDREN}")?;
        writeln!(self.out, "{}", record.id.token(run))?;
        writeln!(self.out, "{}", record.kind)?;
        writeln!(self.out, "{}", record.children.len())?;
        for child in &record.children {
            writeln!(self.out, "{}", child.token(run))?;
        }
        Ok(())
    }
}
