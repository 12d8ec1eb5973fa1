//! A small interpreter for the generated-code subset.
//!
//! There is no embeddable JavaScript engine in this workspace's stack, so
//! behavioral tests interpret the AST directly. The executor supports
//! exactly what the optimizer consumes and produces: literals, identifiers,
//! object literals, member access and assignment, calls (including
//! immediately-invoked function expressions and prototype methods), `new`,
//! `this`, and the statement forms of the AST. The runtime update helper
//! `_Utils_update` is built in, so a unit can be evaluated both before and
//! after transformation and the results compared.
//!
//! Scoping is a plain frame stack (innermost wins, assignment to an unknown
//! name lands in the global frame), which is sufficient for the shapes the
//! compiler emits; it is not a general JavaScript implementation.

use anyhow::{anyhow, bail, Result};
use elmjet_core::ast::{
    Block, Expression, ExpressionKind, FunctionDeclaration, FunctionExpression, Literal,
    MutableProgram, ObjectProperty, Statement, UnaryOp,
};
use elmjet_core::transforms::record_update::patterns::UPDATE_HELPER;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

pub type ObjRef = Rc<RefCell<JsObject>>;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
    Object(ObjRef),
}

#[derive(Debug)]
pub struct JsObject {
    /// Name of the generated constructor that built this object, if any.
    pub constructor: Option<String>,
    /// Fields in insertion order.
    pub fields: IndexMap<String, Value>,
}

impl JsObject {
    fn plain() -> Self {
        Self {
            constructor: None,
            fields: IndexMap::new(),
        }
    }
}

/// Structural comparison: objects by field names and values (constructor
/// tags are ignored, so a specialized record compares equal to the plain
/// literal it replaced), everything else by strict value.
pub fn values_structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Object(x), Value::Object(y)) => {
            let x = x.borrow();
            let y = y.borrow();
            x.fields.len() == y.fields.len()
                && x.fields.iter().all(|(key, value)| {
                    y.fields
                        .get(key)
                        .is_some_and(|other| values_structurally_equal(value, other))
                })
        }
        _ => false,
    }
}

enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter<'p, 'a> {
    program: &'p MutableProgram<'a>,
    functions: FxHashMap<&'a str, &'p FunctionDeclaration<'a>>,
    prototypes: FxHashMap<String, FxHashMap<String, &'p FunctionExpression<'a>>>,
    /// Frame 0 is the global scope.
    scopes: Vec<FxHashMap<String, Value>>,
}

impl<'p, 'a> Interpreter<'p, 'a> {
    /// Hoists the unit's function declarations; `run` executes the rest.
    pub fn new(program: &'p MutableProgram<'a>) -> Self {
        let mut functions = FxHashMap::default();
        for stmt in &program.statements {
            if let Statement::Function(decl) = stmt {
                functions.insert(decl.name, decl);
            }
        }
        Self {
            program,
            functions,
            prototypes: FxHashMap::default(),
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Executes the unit's top-level statements.
    pub fn run(&mut self) -> Result<()> {
        let program = self.program;
        for stmt in &program.statements {
            if let Flow::Return(_) = self.exec_statement(stmt)? {
                break;
            }
        }
        Ok(())
    }

    /// Value of a top-level binding after `run`.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.scopes[0].get(name).cloned()
    }

    fn exec_statement(&mut self, stmt: &'p Statement<'a>) -> Result<Flow> {
        self.exec_statement_with(stmt, &None)
    }

    fn exec_statement_with(
        &mut self,
        stmt: &'p Statement<'a>,
        this: &Option<ObjRef>,
    ) -> Result<Flow> {
        match stmt {
            Statement::Variable(decl) => {
                let value = self.eval_expr(&decl.initializer, this)?;
                self.scopes
                    .last_mut()
                    .expect("scope stack is never empty")
                    .insert(decl.name.to_string(), value);
                Ok(Flow::Normal)
            }
            // Top-level declarations were hoisted in `new`; the subset has
            // no nested function declarations.
            Statement::Function(_) => Ok(Flow::Normal),
            Statement::Expression(expr) => {
                if let Some((ctor, method, function)) = as_prototype_assignment(expr) {
                    self.prototypes
                        .entry(ctor.to_string())
                        .or_default()
                        .insert(method.to_string(), function);
                    return Ok(Flow::Normal);
                }
                self.eval_expr(expr, this)?;
                Ok(Flow::Normal)
            }
            Statement::Return(ret) => {
                let value = match &ret.value {
                    Some(expr) => self.eval_expr(expr, this)?,
                    None => Value::Undefined,
                };
                Ok(Flow::Return(value))
            }
            Statement::If(if_stmt) => {
                let condition = self.eval_expr(&if_stmt.condition, this)?;
                if truthy(&condition) {
                    self.exec_block(&if_stmt.then_block, this)
                } else if let Some(else_block) = &if_stmt.else_block {
                    self.exec_block(else_block, this)
                } else {
                    Ok(Flow::Normal)
                }
            }
        }
    }

    fn exec_block(&mut self, block: &'p Block<'a>, this: &Option<ObjRef>) -> Result<Flow> {
        for stmt in block.statements {
            if let Flow::Return(value) = self.exec_statement_with(stmt, this)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn eval_expr(&mut self, expr: &'p Expression<'a>, this: &Option<ObjRef>) -> Result<Value> {
        match &expr.kind {
            ExpressionKind::Literal(literal) => Ok(match literal {
                Literal::Number(n) => Value::Number(*n),
                Literal::String(s) => Value::String((*s).to_string()),
                Literal::Boolean(b) => Value::Boolean(*b),
                Literal::Null => Value::Null,
            }),
            ExpressionKind::Identifier(name) => self
                .lookup(name)
                .ok_or_else(|| anyhow!("unbound identifier `{name}`")),
            ExpressionKind::This => match this {
                Some(obj) => Ok(Value::Object(obj.clone())),
                None => bail!("`this` outside a constructor or method"),
            },
            ExpressionKind::Member(object, name) => {
                let object = self.eval_expr(object, this)?;
                let Value::Object(obj) = object else {
                    bail!("member access `.{name}` on a non-object value");
                };
                let value = obj.borrow().fields.get(*name).cloned();
                Ok(value.unwrap_or(Value::Undefined))
            }
            ExpressionKind::Call(callee, args) => self.eval_call(callee, args, this),
            ExpressionKind::New(callee, args) => {
                let ExpressionKind::Identifier(name) = &callee.kind else {
                    bail!("`new` with a non-identifier callee");
                };
                let decl = *self
                    .functions
                    .get(name)
                    .ok_or_else(|| anyhow!("unknown constructor `{name}`"))?;
                let values = self.eval_args(args, this)?;
                let obj = Rc::new(RefCell::new(JsObject {
                    constructor: Some((*name).to_string()),
                    fields: IndexMap::new(),
                }));
                self.call_body(decl.params, &decl.body, values, &Some(obj.clone()))?;
                Ok(Value::Object(obj))
            }
            ExpressionKind::Object(properties) => {
                let obj = Rc::new(RefCell::new(JsObject::plain()));
                for property in *properties {
                    let (key, value) = match property {
                        ObjectProperty::Property { key, value, .. } => {
                            ((*key).to_string(), self.eval_expr(value, this)?)
                        }
                        ObjectProperty::Computed { key, value, .. } => {
                            let key = match self.eval_expr(key, this)? {
                                Value::String(s) => s,
                                Value::Number(n) => format!("{n}"),
                                other => bail!("unsupported computed key: {other:?}"),
                            };
                            (key, self.eval_expr(value, this)?)
                        }
                    };
                    obj.borrow_mut().fields.insert(key, value);
                }
                Ok(Value::Object(obj))
            }
            ExpressionKind::Function(_) => {
                bail!("bare function expressions have no value in this subset; call them")
            }
            ExpressionKind::Assign(target, value) => {
                let value = self.eval_expr(value, this)?;
                match &target.kind {
                    ExpressionKind::Member(object, name) => {
                        let object = self.eval_expr(object, this)?;
                        let Value::Object(obj) = object else {
                            bail!("assignment to member `.{name}` of a non-object");
                        };
                        obj.borrow_mut()
                            .fields
                            .insert((*name).to_string(), value.clone());
                    }
                    ExpressionKind::Identifier(name) => {
                        self.assign_var(name, value.clone());
                    }
                    _ => bail!("unsupported assignment target"),
                }
                Ok(value)
            }
            ExpressionKind::Binary(op, left, right) => {
                use elmjet_core::ast::BinaryOp;
                match op {
                    BinaryOp::And => {
                        let left = self.eval_expr(left, this)?;
                        if !truthy(&left) {
                            return Ok(left);
                        }
                        return self.eval_expr(right, this);
                    }
                    BinaryOp::Or => {
                        let left = self.eval_expr(left, this)?;
                        if truthy(&left) {
                            return Ok(left);
                        }
                        return self.eval_expr(right, this);
                    }
                    _ => {}
                }
                let left = self.eval_expr(left, this)?;
                let right = self.eval_expr(right, this)?;
                binary_op(*op, &left, &right)
            }
            ExpressionKind::Unary(op, operand) => {
                let operand = self.eval_expr(operand, this)?;
                match op {
                    UnaryOp::Negate => match operand {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => bail!("negation of a non-number: {other:?}"),
                    },
                    UnaryOp::Not => Ok(Value::Boolean(!truthy(&operand))),
                }
            }
            ExpressionKind::Conditional(condition, consequent, alternate) => {
                let condition = self.eval_expr(condition, this)?;
                if truthy(&condition) {
                    self.eval_expr(consequent, this)
                } else {
                    self.eval_expr(alternate, this)
                }
            }
        }
    }

    fn eval_call(
        &mut self,
        callee: &'p Expression<'a>,
        args: &'p [Expression<'a>],
        this: &Option<ObjRef>,
    ) -> Result<Value> {
        match &callee.kind {
            // Immediately-invoked function expression.
            ExpressionKind::Function(function) => {
                let values = self.eval_args(args, this)?;
                self.call_body(function.params, &function.body, values, &None)
            }
            // Prototype method, e.g. `base.$clone()`.
            ExpressionKind::Member(object, method) => {
                let object = self.eval_expr(object, this)?;
                let Value::Object(obj) = object else {
                    bail!("method call `.{method}()` on a non-object value");
                };
                let ctor = obj
                    .borrow()
                    .constructor
                    .clone()
                    .ok_or_else(|| anyhow!("method call `.{method}()` on a plain object"))?;
                let function = *self
                    .prototypes
                    .get(&ctor)
                    .and_then(|methods| methods.get(*method))
                    .ok_or_else(|| anyhow!("`{ctor}.prototype.{method}` is not defined"))?;
                let values = self.eval_args(args, this)?;
                self.call_body(function.params, &function.body, values, &Some(obj))
            }
            ExpressionKind::Identifier(UPDATE_HELPER) => {
                let values = self.eval_args(args, this)?;
                let [base, overrides] = values.as_slice() else {
                    bail!("{UPDATE_HELPER} expects exactly two arguments");
                };
                update_helper(base, overrides)
            }
            ExpressionKind::Identifier(name) => {
                let decl = *self
                    .functions
                    .get(name)
                    .ok_or_else(|| anyhow!("call to unknown function `{name}`"))?;
                let values = self.eval_args(args, this)?;
                self.call_body(decl.params, &decl.body, values, &None)
            }
            _ => bail!("unsupported callee shape"),
        }
    }

    fn eval_args(
        &mut self,
        args: &'p [Expression<'a>],
        this: &Option<ObjRef>,
    ) -> Result<Vec<Value>> {
        args.iter().map(|arg| self.eval_expr(arg, this)).collect()
    }

    fn call_body(
        &mut self,
        params: &'a [&'a str],
        body: &'p Block<'a>,
        args: Vec<Value>,
        this: &Option<ObjRef>,
    ) -> Result<Value> {
        let mut frame = FxHashMap::default();
        for (index, param) in params.iter().enumerate() {
            let value = args.get(index).cloned().unwrap_or(Value::Undefined);
            frame.insert((*param).to_string(), value);
        }
        self.scopes.push(frame);
        let flow = self.exec_block(body, this);
        self.scopes.pop();
        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Undefined),
        }
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).cloned())
    }

    fn assign_var(&mut self, name: &str, value: Value) {
        for frame in self.scopes.iter_mut().rev() {
            if let Some(slot) = frame.get_mut(name) {
                *slot = value;
                return;
            }
        }
        // Assignment to an undeclared name creates a global.
        self.scopes[0].insert(name.to_string(), value);
    }
}

/// The runtime record-update helper: shallow-copy the base, then apply the
/// overrides in their declared order.
fn update_helper(base: &Value, overrides: &Value) -> Result<Value> {
    let (Value::Object(base), Value::Object(overrides)) = (base, overrides) else {
        bail!("{UPDATE_HELPER} expects (object, object)");
    };
    let base = base.borrow();
    let copy = Rc::new(RefCell::new(JsObject {
        constructor: base.constructor.clone(),
        fields: base.fields.clone(),
    }));
    for (key, value) in &overrides.borrow().fields {
        copy.borrow_mut().fields.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(copy))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Boolean(b) => *b,
        Value::Null | Value::Undefined => false,
        Value::Object(_) => true,
    }
}

fn binary_op(op: elmjet_core::ast::BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    use elmjet_core::ast::BinaryOp;
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::String(l), Value::String(r)) => Ok(Value::String(format!("{l}{r}"))),
            _ => bail!("unsupported operands for `+`"),
        },
        BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
            let (Value::Number(l), Value::Number(r)) = (left, right) else {
                bail!("arithmetic on non-numbers");
            };
            Ok(Value::Number(match op {
                BinaryOp::Subtract => l - r,
                BinaryOp::Multiply => l * r,
                _ => l / r,
            }))
        }
        BinaryOp::Equal => Ok(Value::Boolean(strict_equal(left, right))),
        BinaryOp::NotEqual => Ok(Value::Boolean(!strict_equal(left, right))),
        BinaryOp::LessThan | BinaryOp::GreaterThan => {
            let (Value::Number(l), Value::Number(r)) = (left, right) else {
                bail!("comparison on non-numbers");
            };
            Ok(Value::Boolean(if op == BinaryOp::LessThan {
                l < r
            } else {
                l > r
            }))
        }
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit ops handled by caller"),
    }
}

fn strict_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l == r,
        (Value::String(l), Value::String(r)) => l == r,
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Object(l), Value::Object(r)) => Rc::ptr_eq(l, r),
        _ => false,
    }
}

/// Matches `Ctor.prototype.method = function () { ... };`.
fn as_prototype_assignment<'p, 'a>(
    expr: &'p Expression<'a>,
) -> Option<(&'a str, &'a str, &'p FunctionExpression<'a>)> {
    let ExpressionKind::Assign(target, value) = &expr.kind else {
        return None;
    };
    let ExpressionKind::Function(function) = &value.kind else {
        return None;
    };
    let ExpressionKind::Member(proto_expr, method) = &target.kind else {
        return None;
    };
    let ExpressionKind::Member(ctor_expr, "prototype") = &proto_expr.kind else {
        return None;
    };
    let ExpressionKind::Identifier(ctor) = &ctor_expr.kind else {
        return None;
    };
    Some((*ctor, *method, *function))
}
