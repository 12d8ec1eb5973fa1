//! JavaScript printer for the AST subset this crate handles.
//!
//! Serialization is not part of the transform pipeline (the pipeline hands
//! back a rewritten tree), but a printer is needed to check that rewritten
//! units are syntactically valid and to feed the downstream bundling steps.

pub mod emitter;
mod expressions;
mod statements;

pub use emitter::Emitter;

use crate::ast::MutableProgram;
use crate::config::OutputFormat;

pub struct CodeGenerator {
    emitter: Emitter,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            emitter: Emitter::new(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.emitter = Emitter::new().with_format(format);
        self
    }

    pub fn generate(&mut self, program: &MutableProgram<'_>) -> String {
        for stmt in &program.statements {
            self.generate_statement(stmt);
        }
        self.emitter.take_output()
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.emitter.write(s);
    }

    pub(crate) fn writeln(&mut self, s: &str) {
        self.emitter.writeln(s);
    }

    pub(crate) fn write_indent(&mut self) {
        self.emitter.write_indent();
    }

    pub(crate) fn indent(&mut self) {
        self.emitter.indent();
    }

    pub(crate) fn dedent(&mut self) {
        self.emitter.dedent();
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
