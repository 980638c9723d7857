//! Method bodies: statement and expression trees.
//!
//! Bodies arrive already structured (no gotos): loops are labeled `While`
//! statements, multi-way branches are `Switch` statements whose cases never
//! fall through into each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ClassName, Literal, MethodType, NumKind, Type};

/// Reference to a field: declaring (or referencing) class, name and type.
///
/// The type takes part in identity because bytecode permits two fields with
/// the same name and different types in one class.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FieldRef {
    pub class: ClassName,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl FieldRef {
    pub fn new(class: impl Into<ClassName>, name: impl Into<String>, ty: Type) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}:{}", self.class, self.name, self.ty.desc())
    }
}

/// Reference to a method: class, name and signature.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: ClassName,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: MethodType,
}

impl MethodRef {
    pub fn new(class: impl Into<ClassName>, name: impl Into<String>, ty: MethodType) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            ty,
        }
    }

    pub fn desc(&self) -> String {
        self.ty.desc()
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.class, self.name, self.desc())
    }
}

/// A local variable slot declared by a body.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Local {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Local {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A generated method body.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub locals: Vec<Local>,
    pub stmt: Stmt,
}

impl Body {
    pub fn new(locals: Vec<Local>, stmt: Stmt) -> Self {
        Self { locals, stmt }
    }

    /// Whether any `TryCatch` appears anywhere in the body.
    pub fn has_traps(&self) -> bool {
        self.stmt.any(&mut |s| matches!(s, Stmt::TryCatch { .. }))
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SwitchCase {
    pub values: Vec<i32>,
    pub body: Stmt,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// Source position marker: subsequent output maps to `file:line`.
    Line {
        file: String,
        line: u32,
    },
    Nop,
    Block(Vec<Stmt>),
    Expr(Expr),
    Return(Option<Expr>),
    SetLocal {
        local: String,
        value: Expr,
    },
    SetInstanceField {
        object: Expr,
        field: FieldRef,
        value: Expr,
    },
    SetStaticField {
        field: FieldRef,
        value: Expr,
    },
    SetArray {
        array: Expr,
        index: Expr,
        value: Expr,
    },
    SetArrayLiterals {
        array: Expr,
        start: u32,
        values: Vec<Expr>,
    },
    If {
        cond: Expr,
        then: Box<Stmt>,
    },
    IfElse {
        cond: Expr,
        then: Box<Stmt>,
        otherwise: Box<Stmt>,
    },
    While {
        #[serde(default)]
        label: Option<String>,
        cond: Expr,
        body: Box<Stmt>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Switch {
        subject: Expr,
        cases: Vec<SwitchCase>,
        default: Box<Stmt>,
    },
    Throw(Expr),
    TryCatch {
        body: Box<Stmt>,
        catch: Box<Stmt>,
    },
    Rethrow,
}

impl Stmt {
    /// Whether `pred` holds for this statement or any nested statement.
    pub fn any(&self, pred: &mut impl FnMut(&Stmt) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        match self {
            Stmt::Block(stmts) => {
                for s in stmts {
                    if s.any(pred) {
                        return true;
                    }
                }
                false
            }
            Stmt::If { then, .. } => then.any(pred),
            Stmt::IfElse {
                then, otherwise, ..
            } => then.any(pred) || otherwise.any(pred),
            Stmt::While { body, .. } => body.any(pred),
            Stmt::Switch { cases, default, .. } => {
                for case in cases {
                    if case.body.any(pred) {
                        return true;
                    }
                }
                default.any(pred)
            }
            Stmt::TryCatch { body, catch } => body.any(pred) || catch.any(pred),
            _ => false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Bitwise complement.
    Inv,
    /// Boolean complement.
    Not,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Ushr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Three-way long comparison.
    Lcmp,
    /// Three-way floating comparison, NaN yields -1.
    Cmpl,
    /// Three-way floating comparison, NaN yields 1.
    Cmpg,
    /// Short-circuit boolean and.
    BoolAnd,
    /// Short-circuit boolean or.
    BoolOr,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    Local(String),
    Param(String),
    This,
    /// The exception bound by the innermost enclosing catch.
    CaughtException,
    InstanceField {
        object: Box<Expr>,
        field: FieldRef,
    },
    StaticField(FieldRef),
    Unary {
        op: UnaryOp,
        kind: NumKind,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        kind: NumKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Primitive conversion.
    Cast {
        value: Box<Expr>,
        from: Type,
        to: Type,
    },
    /// Reference type check (`instanceof`).
    InstanceOf {
        value: Box<Expr>,
        #[serde(rename = "type")]
        ty: Type,
    },
    /// Reference downcast; carries no runtime check in the target.
    CheckCast {
        value: Box<Expr>,
        #[serde(rename = "type")]
        ty: Type,
    },
    CallStatic {
        method: MethodRef,
        #[serde(default)]
        args: Vec<Expr>,
    },
    CallInstance {
        object: Box<Expr>,
        method: MethodRef,
        #[serde(default)]
        args: Vec<Expr>,
    },
    /// Non-virtual call into an ancestor's implementation.
    CallSuper {
        object: Box<Expr>,
        method: MethodRef,
        #[serde(default)]
        args: Vec<Expr>,
    },
    New {
        class: ClassName,
        ctor: MethodRef,
        #[serde(default)]
        args: Vec<Expr>,
    },
    NewArray {
        #[serde(rename = "type")]
        ty: Type,
        length: Box<Expr>,
    },
    ArrayLength(Box<Expr>),
    ArrayGet {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

impl Expr {
    pub fn lit(value: impl Into<Literal>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn local(name: impl Into<String>) -> Self {
        Expr::Local(name.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(name.into())
    }

    /// Visit this expression and all nested sub-expressions, pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        match self {
            Expr::InstanceField { object, .. } => object.walk(f),
            Expr::Unary { operand, .. } => operand.walk(f),
            Expr::Binary { left, right, .. } => {
                left.walk(f);
                right.walk(f);
            }
            Expr::Cast { value, .. }
            | Expr::InstanceOf { value, .. }
            | Expr::CheckCast { value, .. } => value.walk(f),
            Expr::CallStatic { args, .. } | Expr::New { args, .. } => {
                for arg in args {
                    arg.walk(f);
                }
            }
            Expr::CallInstance { object, args, .. } | Expr::CallSuper { object, args, .. } => {
                object.walk(f);
                for arg in args {
                    arg.walk(f);
                }
            }
            Expr::NewArray { length, .. } => length.walk(f),
            Expr::ArrayLength(array) => array.walk(f),
            Expr::ArrayGet { array, index } => {
                array.walk(f);
                index.walk(f);
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                cond.walk(f);
                then.walk(f);
                otherwise.walk(f);
            }
            Expr::Literal(_)
            | Expr::Local(_)
            | Expr::Param(_)
            | Expr::This
            | Expr::CaughtException
            | Expr::StaticField(_) => {}
        }
    }
}

impl Stmt {
    /// Visit every expression reachable from this statement, pre-order.
    pub fn walk_exprs<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        match self {
            Stmt::Line { .. } | Stmt::Nop | Stmt::Break(_) | Stmt::Continue(_) | Stmt::Rethrow => {}
            Stmt::Block(stmts) => {
                for s in stmts {
                    s.walk_exprs(f);
                }
            }
            Stmt::Expr(e) | Stmt::Throw(e) => e.walk(f),
            Stmt::Return(value) => {
                if let Some(e) = value {
                    e.walk(f);
                }
            }
            Stmt::SetLocal { value, .. } | Stmt::SetStaticField { value, .. } => value.walk(f),
            Stmt::SetInstanceField { object, value, .. } => {
                object.walk(f);
                value.walk(f);
            }
            Stmt::SetArray {
                array,
                index,
                value,
            } => {
                array.walk(f);
                index.walk(f);
                value.walk(f);
            }
            Stmt::SetArrayLiterals { array, values, .. } => {
                array.walk(f);
                for value in values {
                    value.walk(f);
                }
            }
            Stmt::If { cond, then } => {
                cond.walk(f);
                then.walk_exprs(f);
            }
            Stmt::IfElse {
                cond,
                then,
                otherwise,
            } => {
                cond.walk(f);
                then.walk_exprs(f);
                otherwise.walk_exprs(f);
            }
            Stmt::While { cond, body, .. } => {
                cond.walk(f);
                body.walk_exprs(f);
            }
            Stmt::Switch {
                subject,
                cases,
                default,
            } => {
                subject.walk(f);
                for case in cases {
                    case.body.walk_exprs(f);
                }
                default.walk_exprs(f);
            }
            Stmt::TryCatch { body, catch } => {
                body.walk_exprs(f);
                catch.walk_exprs(f);
            }
        }
    }
}
