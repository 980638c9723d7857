//! Indented line writer with embedded source-position marks.

/// Original source position attached to the next emitted line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceMark {
    pub file: String,
    pub line: u32,
}

#[derive(Clone, Debug)]
enum Entry {
    Text { indent: usize, text: String },
    Mark(SourceMark),
}

/// Accumulates output lines; nested writers splice in with their marks.
#[derive(Clone, Debug, Default)]
pub struct SourceWriter {
    entries: Vec<Entry>,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text at the current indentation. Embedded newlines produce
    /// several lines; a single trailing newline does not add an empty one.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        let text = text.strip_suffix('\n').unwrap_or(text);
        for piece in text.split('\n') {
            self.entries.push(Entry::Text {
                indent: self.indent,
                text: piece.to_string(),
            });
        }
    }

    /// `head {`, the body one level deeper, then `}` followed by `after`.
    pub fn block<R>(&mut self, head: &str, after: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.line(format!("{head} {{"));
        self.indent += 1;
        let out = f(self);
        self.indent -= 1;
        self.line(format!("}}{after}"));
        out
    }

    /// Run `f` one indentation level deeper, without braces.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.indent += 1;
        let out = f(self);
        self.indent -= 1;
        out
    }

    /// Attach a source position to the next line.
    pub fn mark(&mut self, mark: SourceMark) {
        self.entries.push(Entry::Mark(mark));
    }

    /// Splice another writer's lines at the current indentation.
    pub fn append(&mut self, other: SourceWriter) {
        for entry in other.entries {
            self.entries.push(match entry {
                Entry::Text { indent, text } => Entry::Text {
                    indent: indent + self.indent,
                    text,
                },
                mark => mark,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.entries.iter().any(|e| matches!(e, Entry::Text { .. }))
    }

    /// Text plus `(output line, mark)` pairs, output lines zero-based.
    pub fn render(&self) -> (String, Vec<(usize, SourceMark)>) {
        let mut out = String::new();
        let mut marks = Vec::new();
        let mut line = 0;
        for entry in &self.entries {
            match entry {
                Entry::Text { indent, text } => {
                    if !text.is_empty() {
                        for _ in 0..*indent {
                            out.push('\t');
                        }
                        out.push_str(text);
                    }
                    out.push('\n');
                    line += 1;
                }
                Entry::Mark(mark) => marks.push((line, mark.clone())),
            }
        }
        (out, marks)
    }
}

impl std::fmt::Display for SourceWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render().0)
    }
}
