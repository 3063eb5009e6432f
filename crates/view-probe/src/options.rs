//! Inspection options.

use serde::{Deserialize, Serialize};

/// Tunables for the unwrapping engine and the diagnostic printer.
///
/// Missing keys fall back to their defaults when loaded from JSON:
///
/// ```
/// use view_probe::InspectOptions;
/// let options = InspectOptions::from_json(r#"{"max_unwrap_depth": 16}"#).unwrap();
/// assert_eq!(options.max_unwrap_depth, 16);
/// assert_eq!(options.indent_width, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectOptions {
    /// Maximum number of transparent wrappers `normalize` strips before it
    /// reports a self-referential wrapper chain.
    pub max_unwrap_depth: usize,
    /// Spaces per nesting level in diagnostic output.
    pub indent_width: usize,
}

impl InspectOptions {
    pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 256;
    pub const DEFAULT_INDENT_WIDTH: usize = 2;

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_max_unwrap_depth(mut self, depth: usize) -> Self {
        self.max_unwrap_depth = depth;
        self
    }
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            max_unwrap_depth: Self::DEFAULT_MAX_UNWRAP_DEPTH,
            indent_width: Self::DEFAULT_INDENT_WIDTH,
        }
    }
}
