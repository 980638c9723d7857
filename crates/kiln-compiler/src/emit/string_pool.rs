//! Global string literal pool.
//!
//! Every distinct literal gets one slot, numbered in first-seen order.
//! Bodies reference slots as `S[id]`; the pool itself is written as `SS`
//! entries which the runtime turns into interned strings at startup.

use indexmap::IndexMap;

use super::quote;
use super::writer::SourceWriter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolEntry {
    pub id: u32,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct StringPoolBuilder {
    entries: IndexMap<String, PoolEntry>,
}

impl StringPoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for `value`, allocating one on first sight.
    pub fn alloc(&mut self, value: &str) -> u32 {
        if let Some(entry) = self.entries.get(value) {
            return entry.id;
        }
        let id = self.entries.len() as u32;
        self.entries.insert(
            value.to_string(),
            PoolEntry {
                id,
                value: value.to_string(),
            },
        );
        id
    }

    pub fn get(&self, value: &str) -> Option<u32> {
        self.entries.get(value).map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.values()
    }

    /// Pool initialization block.
    pub fn emit(&self) -> SourceWriter {
        let mut w = SourceWriter::new();
        w.line(format!("SS = new Array({});", self.len()));
        for entry in self.entries() {
            w.line(format!("SS[{}] = {};", entry.id, quote(&entry.value)));
        }
        w
    }
}
