//! Source-to-source optimizer for compiler-generated JavaScript.
//!
//! The upstream functional-language compiler expresses every record update
//! through a generic runtime helper (`_Utils_update`). That idiom defeats
//! hidden-class specialization in JIT engines: every record is built as an
//! anonymous object literal and copied through a megamorphic helper. This
//! crate rewrites one compilation unit at a time so that
//!
//! - updated records are constructed by monomorphic generated constructors
//!   (`Record1`, `Record2`, ...), one per field shape, and
//! - each update call-site becomes a clone-and-mutate block using a per-shape
//!   `$clone` method.
//!
//! The engine is a [`TransformPipeline`] of toggleable passes over a
//! [`MutableProgram`]; the one pass realized here is
//! [`transforms::record_update::RecordUpdatePass`]. Parsing is the caller's
//! concern: the pipeline takes an already-built tree and rewrites it in
//! place. [`codegen`] provides a JavaScript printer for the subset this
//! crate handles.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod error;
pub mod span;
pub mod transforms;

pub use ast::MutableProgram;
pub use config::TransformOptions;
pub use error::TransformError;
pub use span::Span;
pub use transforms::TransformPipeline;
