use super::CodeGenerator;
use crate::ast::{Block, Statement};

impl CodeGenerator {
    pub fn generate_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::Variable(decl) => {
                self.write_indent();
                self.write("var ");
                self.write(decl.name);
                self.write(" = ");
                self.generate_expression(&decl.initializer);
                self.writeln(";");
            }
            Statement::Function(decl) => {
                self.write_indent();
                self.write("function ");
                self.write(decl.name);
                self.write("(");
                for (i, param) in decl.params.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(param);
                }
                self.write(") ");
                self.generate_braced_block(&decl.body);
                self.writeln("");
            }
            Statement::Expression(expr) => {
                self.write_indent();
                self.generate_expression(expr);
                self.writeln(";");
            }
            Statement::Return(ret) => {
                self.write_indent();
                match &ret.value {
                    Some(value) => {
                        self.write("return ");
                        self.generate_expression(value);
                    }
                    None => self.write("return"),
                }
                self.writeln(";");
            }
            Statement::If(if_stmt) => {
                self.write_indent();
                self.write("if (");
                self.generate_expression(&if_stmt.condition);
                self.write(") ");
                self.generate_braced_block(&if_stmt.then_block);
                if let Some(else_block) = &if_stmt.else_block {
                    self.write(" else ");
                    self.generate_braced_block(else_block);
                }
                self.writeln("");
            }
        }
    }

    /// `{ ... }` with the body indented; the closing brace is written
    /// without a trailing newline so callers can continue the line
    /// (`} else {`, `})()`).
    pub(crate) fn generate_braced_block(&mut self, block: &Block<'_>) {
        self.writeln("{");
        self.indent();
        for stmt in block.statements {
            self.generate_statement(stmt);
        }
        self.dedent();
        self.write_indent();
        self.write("}");
    }
}
