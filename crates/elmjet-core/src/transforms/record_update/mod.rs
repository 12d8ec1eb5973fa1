//! The record-update specialization transform.
//!
//! Two passes over one compilation unit plus a synthesis step, sharing
//! unit-scoped state:
//!
//! 1. [`update_rewrite`] replaces every `_Utils_update` call-site with a
//!    clone-and-mutate block and collects the touched-field set.
//! 2. [`specialize`] replaces every object literal whose fields intersect
//!    the touched set with a generated-constructor invocation, registering
//!    shapes in the [`registry`].
//! 3. [`synthesis`] prepends one constructor declaration and one `$clone`
//!    capability per registered shape.
//!
//! The touched set and registry are created fresh per `run` and never
//! outlive it; concurrent units must each get their own pass instance.

pub mod patterns;
pub mod registry;
pub mod specialize;
pub mod synthesis;
pub mod update_rewrite;

pub use registry::{RecordRegistry, RecordShape};

use crate::ast::{rewrite_program, MutableProgram};
use crate::config::TransformOptions;
use crate::error::TransformError;
use crate::transforms::TransformPass;
use bumpalo::Bump;
use rustc_hash::FxHashSet;
use specialize::LiteralSpecializer;
use update_rewrite::UpdateRewriter;

pub struct RecordUpdatePass;

impl RecordUpdatePass {
    pub fn new() -> Self {
        Self
    }
}

impl<'a> TransformPass<'a> for RecordUpdatePass {
    fn name(&self) -> &'static str {
        "record-update"
    }

    fn enabled(&self, options: &TransformOptions) -> bool {
        options.record_updates
    }

    fn run(
        &mut self,
        program: &mut MutableProgram<'a>,
        arena: &'a Bump,
    ) -> Result<bool, TransformError> {
        let mut touched: FxHashSet<&'a str> = FxHashSet::default();

        let mut rewriter = UpdateRewriter::new(&mut touched);
        let mut changed = rewrite_program(program, &mut rewriter, arena)?;
        let rewritten = rewriter.rewritten;

        let mut registry = RecordRegistry::new();
        let mut specializer = LiteralSpecializer::new(&touched, &mut registry);
        changed |= rewrite_program(program, &mut specializer, arena)?;
        let specialized = specializer.specialized;

        if !registry.is_empty() {
            let declarations = synthesis::record_declarations(&registry, arena);
            program.statements.splice(0..0, declarations);
            changed = true;
        }

        tracing::debug!(
            update_sites = rewritten,
            touched_fields = touched.len(),
            literals_specialized = specialized,
            shapes = registry.len(),
            "record-update finished"
        );

        Ok(changed)
    }
}

impl Default for RecordUpdatePass {
    fn default() -> Self {
        Self::new()
    }
}
