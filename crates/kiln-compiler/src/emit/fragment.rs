//! External text spliced around the generated program.

use super::EmitError;

/// Separator between the prepend and append halves of a combined fragment.
pub const BODY_MARKER: &str = "/* ## BODY ## */";

/// Renders template text. Supplied by the embedding driver.
pub trait Templater {
    /// Expand `text`; `context` names the call site for diagnostics.
    fn render(&self, text: &str, context: &str) -> Result<String, EmitError>;
}

/// Templater that returns text unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTemplater;

impl Templater for NoopTemplater {
    fn render(&self, text: &str, _context: &str) -> Result<String, EmitError> {
        Ok(text.to_string())
    }
}

/// Text emitted before and after the generated program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    pub prepend: Option<String>,
    pub append: Option<String>,
    /// Both halves in one text, split on `BODY_MARKER`.
    pub prepend_append: Option<String>,
    /// Run both halves through the templater.
    pub process: bool,
}

impl Fragment {
    pub fn prepend(text: impl Into<String>) -> Self {
        Self {
            prepend: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn append(text: impl Into<String>) -> Self {
        Self {
            append: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn prepend_append(text: impl Into<String>) -> Self {
        Self {
            prepend_append: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn processed(mut self) -> Self {
        self.process = true;
        self
    }

    /// Resolve the (prepend, append) pair.
    ///
    /// A combined text that splits into at least two parts replaces both
    /// separate halves. Separate halves get a trailing newline.
    pub(crate) fn parts(&self) -> (Option<String>, Option<String>) {
        if let Some(combined) = &self.prepend_append {
            let combined = format!("{combined}\n");
            let mut split = combined.split(BODY_MARKER);
            if let (Some(head), Some(tail)) = (split.next(), split.next()) {
                return (Some(head.to_string()), Some(tail.to_string()));
            }
        }
        (
            self.prepend.as_ref().map(|t| format!("{t}\n")),
            self.append.as_ref().map(|t| format!("{t}\n")),
        )
    }

    /// Resolve and, if requested, template both halves.
    pub(crate) fn resolve(
        &self,
        templater: &dyn Templater,
    ) -> Result<(Option<String>, Option<String>), EmitError> {
        let (prepend, append) = self.parts();
        if !self.process {
            return Ok((prepend, append));
        }
        let render = |text: Option<String>| -> Result<Option<String>, EmitError> {
            text.map(|t| templater.render(&t, "includeFile")).transpose()
        };
        Ok((render(prepend)?, render(append)?))
    }
}
