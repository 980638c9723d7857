//! Configuration for JavaScript emission.

use super::Fragment;

/// Control-flow constructs the target accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetFeatures {
    /// Native multi-way `switch` statement.
    pub switch: bool,
}

impl Default for TargetFeatures {
    fn default() -> Self {
        Self { switch: true }
    }
}

/// Configuration for one emission run.
#[derive(Clone, Debug)]
pub struct EmitConfig {
    /// Selects native bodies and the custom entry point
    pub(crate) target: String,
    /// Record the line map and reference it from the output
    pub(crate) debug: bool,
    /// Name of the source artifact
    pub(crate) output_name: String,
    pub(crate) features: TargetFeatures,
    pub(crate) fragments: Vec<Fragment>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            target: "js".to_string(),
            debug: false,
            output_name: "program.js".to_string(),
            features: TargetFeatures::default(),
            fragments: Vec::new(),
        }
    }
}

impl EmitConfig {
    /// Create a new EmitConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target name used to pick native bodies.
    pub fn target(mut self, value: impl Into<String>) -> Self {
        self.target = value.into();
        self
    }

    /// Set whether to build a line map.
    pub fn debug(mut self, value: bool) -> Self {
        self.debug = value;
        self
    }

    /// Set the source artifact name.
    pub fn output_name(mut self, value: impl Into<String>) -> Self {
        self.output_name = value.into();
        self
    }

    /// Set the target capability flags.
    pub fn features(mut self, value: TargetFeatures) -> Self {
        self.features = value;
        self
    }

    /// Add an external text fragment.
    pub fn fragment(mut self, value: Fragment) -> Self {
        self.fragments.push(value);
        self
    }

    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn name(&self) -> &str {
        &self.output_name
    }

    /// Name of the companion line-map artifact.
    pub fn map_name(&self) -> String {
        format!("{}.map", self.output_name)
    }
}
