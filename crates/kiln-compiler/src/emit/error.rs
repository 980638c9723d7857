//! Error types for JavaScript emission.

use kiln_core::{ClassName, FieldRef, MethodRef, MissingClass};

/// Error during emission.
///
/// Everything except `MalformedBody` aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("class not found: {0}")]
    UnresolvedClass(ClassName),

    #[error("field not found: {0}")]
    UnresolvedField(FieldRef),

    #[error("method not found: {0}")]
    UnresolvedMethod(MethodRef),

    /// Super call whose target is absent from the referenced ancestor chain.
    #[error("can't find super for method {method} (called from {class})")]
    UnresolvedSuperCall { class: ClassName, method: MethodRef },

    /// Body that cannot be lowered. Recovered per method.
    #[error("{0}")]
    MalformedBody(String),

    /// Name resolver cache lost a mapping it just recorded.
    #[error("resolver invariant violated: {0}")]
    ResolverInvariant(String),

    /// Raw target call whose text argument is not a string literal.
    #[error("raw call {expr} has no string literal argument, at {context}")]
    RawCallArgument { expr: String, context: String },

    #[error("template error: {0}")]
    Template(String),

    #[error("source map encoding failed: {0}")]
    SourceMap(#[from] serde_json::Error),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitError {
    /// Whether the failure may be replaced by a stub for the offending method.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedBody(_))
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedBody(msg.into())
    }
}

impl From<MissingClass> for EmitError {
    fn from(MissingClass(name): MissingClass) -> Self {
        Self::UnresolvedClass(name)
    }
}
