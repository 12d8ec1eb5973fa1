//! Transform passes and the per-unit pipeline driver.

pub mod record_update;

pub use record_update::RecordUpdatePass;

use crate::ast::MutableProgram;
use crate::config::TransformOptions;
use crate::error::TransformError;
use bumpalo::Bump;

/// A whole-unit rewrite over one compilation unit's tree.
///
/// Passes mutate the program in place and report whether anything changed.
/// Any state a pass accumulates while running must be scoped to a single
/// `run` invocation — the pipeline may be handed a fresh unit next.
pub trait TransformPass<'a> {
    fn name(&self) -> &'static str;

    /// Whether this pass is switched on by the given toggles.
    fn enabled(&self, options: &TransformOptions) -> bool;

    fn run(
        &mut self,
        program: &mut MutableProgram<'a>,
        arena: &'a Bump,
    ) -> Result<bool, TransformError>;
}

/// Runs every enabled transform over one compilation unit, in order.
///
/// The driver is strictly sequential and synchronous; a pass error aborts
/// the unit. Processing several units concurrently is the caller's business,
/// with one pipeline (and one arena) per unit.
pub struct TransformPipeline {
    options: TransformOptions,
}

impl TransformPipeline {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn run<'a>(
        &self,
        program: &mut MutableProgram<'a>,
        arena: &'a Bump,
    ) -> Result<bool, TransformError> {
        let mut passes: Vec<Box<dyn TransformPass<'a>>> =
            vec![Box::new(RecordUpdatePass::new())];

        let mut changed = false;
        for pass in &mut passes {
            if !pass.enabled(&self.options) {
                tracing::debug!(pass = pass.name(), "skipped (disabled)");
                continue;
            }
            let pass_changed = pass.run(program, arena)?;
            tracing::debug!(pass = pass.name(), changed = pass_changed, "pass finished");
            changed |= pass_changed;
        }
        Ok(changed)
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}
