//! Fully-qualified class names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dotted, fully-qualified class name (`java.lang.Object`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(fqname: impl Into<String>) -> Self {
        Self(fqname.into())
    }

    /// The full dotted name.
    #[inline]
    pub fn fqname(&self) -> &str {
        &self.0
    }

    /// Last dotted segment (`Object` for `java.lang.Object`).
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Everything before the last dot, or empty for the default package.
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(pos) => &self.0[..pos],
            None => "",
        }
    }

    /// Slash-separated internal form used inside descriptors.
    pub fn internal_name(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Derive a sibling name by appending a suffix to the full name.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClassName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
