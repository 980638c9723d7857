//! Output line to original source line mapping.
//!
//! Serialized as a version 3 source map with one segment per mapped line.
//! Column information is not tracked: both the generated and the original
//! column are always zero.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::Serialize;

use super::writer::SourceMark;

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMapEntry {
    /// Index into the source file table.
    pub source: usize,
    /// One-based original line.
    pub line: u32,
}

#[derive(Debug, Default)]
pub struct LineMapBuilder {
    sources: IndexSet<String>,
    entries: BTreeMap<usize, LineMapEntry>,
}

#[derive(Serialize)]
struct SourceMapJson<'a> {
    version: u8,
    file: &'a str,
    sources: Vec<&'a str>,
    names: Vec<&'a str>,
    mappings: String,
}

impl LineMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `output_line` (zero-based) to `file:line`. A later record for
    /// the same output line replaces the earlier one.
    pub fn record(&mut self, output_line: usize, file: &str, line: u32) {
        let (source, _) = self.sources.insert_full(file.to_string());
        self.entries
            .insert(output_line, LineMapEntry { source, line });
    }

    pub fn from_marks(marks: &[(usize, SourceMark)]) -> Self {
        let mut builder = Self::new();
        for (output_line, mark) in marks {
            builder.record(*output_line, &mark.file, mark.line);
        }
        builder
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    /// Entries ordered by output line.
    pub fn entries(&self) -> impl Iterator<Item = (usize, LineMapEntry)> + '_ {
        self.entries.iter().map(|(&line, &entry)| (line, entry))
    }

    /// The `mappings` field: `;`-separated lines, one VLQ segment per mapped line.
    pub fn mappings(&self) -> String {
        let mut out = String::new();
        let Some(&last) = self.entries.keys().next_back() else {
            return out;
        };
        let mut prev_source = 0i64;
        let mut prev_line = 0i64;
        for output_line in 0..=last {
            if output_line > 0 {
                out.push(';');
            }
            let Some(entry) = self.entries.get(&output_line) else {
                continue;
            };
            let source = entry.source as i64;
            let line = i64::from(entry.line.saturating_sub(1));
            encode_vlq(&mut out, 0);
            encode_vlq(&mut out, source - prev_source);
            encode_vlq(&mut out, line - prev_line);
            encode_vlq(&mut out, 0);
            prev_source = source;
            prev_line = line;
        }
        out
    }

    /// Source map JSON for the artifact named `file`.
    pub fn to_source_map(&self, file: &str) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SourceMapJson {
            version: 3,
            file,
            sources: self.sources().collect(),
            names: Vec::new(),
            mappings: self.mappings(),
        })
    }
}

/// Base64 VLQ: sign in the lowest bit, five bits per digit, continuation in bit 6.
fn encode_vlq(out: &mut String, value: i64) {
    let signed = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    let mut rest = signed as u64;
    loop {
        let mut digit = (rest & 0b11111) as usize;
        rest >>= 5;
        if rest > 0 {
            digit |= 0b100000;
        }
        out.push(BASE64[digit] as char);
        if rest == 0 {
            break;
        }
    }
}

#[cfg(test)]
pub(super) fn vlq(value: i64) -> String {
    let mut out = String::new();
    encode_vlq(&mut out, value);
    out
}
