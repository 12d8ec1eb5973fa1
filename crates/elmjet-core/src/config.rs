//! Transform toggles.
//!
//! The surrounding build pipeline describes which transforms to run as a set
//! of named, independently toggleable flags. This crate realizes exactly one
//! of them; the struct exists so the configuration surface (and its JSON
//! form) stays stable as further transforms land.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Rewrite the `_Utils_update` idiom into shape-specialized constructors
    /// and clone-and-mutate blocks.
    pub record_updates: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            record_updates: true,
        }
    }
}

impl TransformOptions {
    /// All transforms disabled; the pipeline becomes a no-op.
    pub fn none() -> Self {
        Self {
            record_updates: false,
        }
    }
}

/// Layout of printed output.
///
/// `Compact` only strips indentation and line breaks; proper minification
/// (and gzip) belongs to the surrounding build pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    #[default]
    Readable,
    Compact,
}
