//! Transform failure taxonomy.
//!
//! Errors are unit-local: a failed compilation unit is reported to the
//! caller, which decides whether to continue with remaining units. The
//! pipeline never emits best-effort code for a call-site it only partially
//! understands — downstream specialization correctness depends on the
//! recognized patterns holding exactly.

use crate::span::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The update helper was called with something other than a field
    /// override object literal as its second argument.
    #[error(
        "update call at {span} has an unsupported override argument: \
         expected an object literal with statically named fields"
    )]
    UnsupportedOverrideArgument { span: Span },

    /// An override property uses a computed key; overridden field names
    /// must be statically known.
    #[error("override property at {span} uses a computed key")]
    ComputedOverrideKey { span: Span },
}
