use super::CodeGenerator;
use crate::ast::{BinaryOp, Expression, ExpressionKind, Literal, ObjectProperty, UnaryOp};

// Binding strengths, JS-shaped. A child is parenthesized when its
// precedence is below what its position requires.
const PREC_ASSIGN: u8 = 2;
const PREC_CONDITIONAL: u8 = 3;
const PREC_OR: u8 = 4;
const PREC_AND: u8 = 5;
const PREC_EQUALITY: u8 = 9;
const PREC_RELATIONAL: u8 = 10;
const PREC_ADDITIVE: u8 = 12;
const PREC_MULTIPLICATIVE: u8 = 13;
const PREC_UNARY: u8 = 15;
const PREC_CALL: u8 = 18;
const PREC_PRIMARY: u8 = 20;

impl CodeGenerator {
    pub fn generate_expression(&mut self, expr: &Expression<'_>) {
        self.generate_expression_prec(expr, 0);
    }

    fn generate_expression_prec(&mut self, expr: &Expression<'_>, min_prec: u8) {
        let parens = Self::precedence(&expr.kind) < min_prec;
        if parens {
            self.write("(");
        }
        match &expr.kind {
            ExpressionKind::Literal(literal) => self.generate_literal(literal),
            ExpressionKind::Identifier(name) => self.write(name),
            ExpressionKind::This => self.write("this"),
            ExpressionKind::Member(object, name) => {
                // `1.x` would parse as a number and `function () {}.x` does
                // not parse at all; wrap those bases explicitly.
                if matches!(
                    object.kind,
                    ExpressionKind::Literal(Literal::Number(_)) | ExpressionKind::Function(_)
                ) {
                    self.write("(");
                    self.generate_expression(object);
                    self.write(")");
                } else {
                    self.generate_expression_prec(object, PREC_CALL);
                }
                self.write(".");
                self.write(name);
            }
            ExpressionKind::Call(callee, args) => {
                // An immediately-invoked function expression keeps its
                // parens.
                if matches!(callee.kind, ExpressionKind::Function(_)) {
                    self.write("(");
                    self.generate_expression(callee);
                    self.write(")");
                } else {
                    self.generate_expression_prec(callee, PREC_CALL);
                }
                self.write("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.generate_expression_prec(arg, PREC_ASSIGN);
                }
                self.write(")");
            }
            ExpressionKind::New(callee, args) => {
                self.write("new ");
                self.generate_expression_prec(callee, PREC_CALL);
                self.write("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.generate_expression_prec(arg, PREC_ASSIGN);
                }
                self.write(")");
            }
            ExpressionKind::Object(properties) => {
                if properties.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    for (i, property) in properties.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        match property {
                            ObjectProperty::Property { key, value, .. } => {
                                self.write(key);
                                self.write(": ");
                                self.generate_expression_prec(value, PREC_ASSIGN);
                            }
                            ObjectProperty::Computed { key, value, .. } => {
                                self.write("[");
                                self.generate_expression_prec(key, PREC_ASSIGN);
                                self.write("]: ");
                                self.generate_expression_prec(value, PREC_ASSIGN);
                            }
                        }
                    }
                    self.write(" }");
                }
            }
            ExpressionKind::Function(func) => {
                self.write("function (");
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(param);
                }
                self.write(") ");
                self.generate_braced_block(&func.body);
            }
            ExpressionKind::Assign(target, value) => {
                self.generate_expression_prec(target, PREC_CALL);
                self.write(" = ");
                self.generate_expression_prec(value, PREC_ASSIGN);
            }
            ExpressionKind::Binary(op, left, right) => {
                let prec = Self::binary_precedence(*op);
                self.generate_expression_prec(left, prec);
                self.write(" ");
                self.write(Self::binary_op_str(*op));
                self.write(" ");
                self.generate_expression_prec(right, prec + 1);
            }
            ExpressionKind::Unary(op, operand) => {
                self.write(match op {
                    UnaryOp::Negate => "-",
                    UnaryOp::Not => "!",
                });
                self.generate_expression_prec(operand, PREC_UNARY);
            }
            ExpressionKind::Conditional(condition, consequent, alternate) => {
                self.generate_expression_prec(condition, PREC_OR);
                self.write(" ? ");
                self.generate_expression_prec(consequent, PREC_ASSIGN);
                self.write(" : ");
                self.generate_expression_prec(alternate, PREC_ASSIGN);
            }
        }
        if parens {
            self.write(")");
        }
    }

    fn generate_literal(&mut self, literal: &Literal<'_>) {
        match literal {
            Literal::Number(n) => self.write_number(*n),
            Literal::String(s) => self.write_string_literal(s),
            Literal::Boolean(true) => self.write("true"),
            Literal::Boolean(false) => self.write("false"),
            Literal::Null => self.write("null"),
        }
    }

    fn write_number(&mut self, n: f64) {
        if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
            self.write(&format!("{}", n as i64));
        } else {
            self.write(&format!("{}", n));
        }
    }

    fn write_string_literal(&mut self, s: &str) {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('"');
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out.push('"');
        self.write(&out);
    }

    fn precedence(kind: &ExpressionKind<'_>) -> u8 {
        match kind {
            ExpressionKind::Assign(..) => PREC_ASSIGN,
            ExpressionKind::Conditional(..) => PREC_CONDITIONAL,
            ExpressionKind::Binary(op, ..) => Self::binary_precedence(*op),
            ExpressionKind::Unary(..) => PREC_UNARY,
            ExpressionKind::Call(..) | ExpressionKind::New(..) | ExpressionKind::Member(..) => {
                PREC_CALL
            }
            ExpressionKind::Literal(_)
            | ExpressionKind::Identifier(_)
            | ExpressionKind::This
            | ExpressionKind::Object(_)
            | ExpressionKind::Function(_) => PREC_PRIMARY,
        }
    }

    fn binary_precedence(op: BinaryOp) -> u8 {
        match op {
            BinaryOp::Or => PREC_OR,
            BinaryOp::And => PREC_AND,
            BinaryOp::Equal | BinaryOp::NotEqual => PREC_EQUALITY,
            BinaryOp::LessThan | BinaryOp::GreaterThan => PREC_RELATIONAL,
            BinaryOp::Add | BinaryOp::Subtract => PREC_ADDITIVE,
            BinaryOp::Multiply | BinaryOp::Divide => PREC_MULTIPLICATIVE,
        }
    }

    fn binary_op_str(op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Equal => "===",
            BinaryOp::NotEqual => "!==",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterThan => ">",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}
