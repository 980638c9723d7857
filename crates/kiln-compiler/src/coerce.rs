//! Primitive conversion and operator lowering.
//!
//! Every function takes already-rendered operand text and returns a
//! JavaScript expression with the source model's exact numeric semantics.
//! 32-bit integers stay in `|0` land, `float` goes through `Math.fround`,
//! and 64-bit integers are opaque values handled by the runtime's `N.l*`
//! helpers.

use kiln_core::{BinaryOp, NumKind, Type, UnaryOp};

pub fn z2i(v: &str) -> String {
    format!("N.z2i({v})")
}

/// Truncate to a signed 32-bit integer.
pub fn i(v: &str) -> String {
    format!("(({v})|0)")
}

pub fn i2z(v: &str) -> String {
    format!("(({v})!=0)")
}

pub fn i2b(v: &str) -> String {
    format!("(({v})<<24>>24)")
}

pub fn i2c(v: &str) -> String {
    format!("(({v})&0xFFFF)")
}

pub fn i2s(v: &str) -> String {
    format!("(({v})<<16>>16)")
}

pub fn i2j(v: &str) -> String {
    format!("N.i2j({v})")
}

pub fn i2f(v: &str) -> String {
    format!("Math.fround(+({v}))")
}

pub fn i2d(v: &str) -> String {
    format!("+({v})")
}

/// Saturating, NaN to zero.
pub fn d2i(v: &str) -> String {
    format!("N.d2i({v})")
}

pub fn d2j(v: &str) -> String {
    format!("N.d2j({v})")
}

pub fn f2f(v: &str) -> String {
    format!("Math.fround({v})")
}

pub fn f2d(v: &str) -> String {
    format!("({v})")
}

pub fn d2f(v: &str) -> String {
    format!("Math.fround(+({v}))")
}

pub fn d2d(v: &str) -> String {
    format!("+({v})")
}

pub fn l2i(v: &str) -> String {
    format!("N.l2i({v})")
}

pub fn l2l(v: &str) -> String {
    format!("({v})")
}

/// Single rounding step; widening to a double first would round twice.
pub fn l2f(v: &str) -> String {
    format!("N.l2f({v})")
}

pub fn l2d(v: &str) -> String {
    format!("N.l2d({v})")
}

pub fn lneg(v: &str) -> String {
    format!("N.lneg({v})")
}

pub fn linv(v: &str) -> String {
    format!("N.linv({v})")
}

pub fn ineg(v: &str) -> String {
    format!("(-({v})|0)")
}

pub fn iinv(v: &str) -> String {
    format!("~({v})")
}

pub fn fneg(v: &str) -> String {
    format!("-({v})")
}

pub fn dneg(v: &str) -> String {
    format!("-({v})")
}

pub fn znot(v: &str) -> String {
    format!("!({v})")
}

/// 32x32 multiply keeping the low 32 bits.
pub fn imul(l: &str, r: &str) -> String {
    format!("Math.imul({l}, {r})")
}

/// Narrow an `int` value to a sub-int target type.
fn narrow(v: String, to: &Type) -> String {
    match to {
        Type::Byte => i2b(&v),
        Type::Char => i2c(&v),
        Type::Short => i2s(&v),
        _ => v,
    }
}

/// Lower a primitive conversion. `None` when the pair is not convertible.
pub fn convert(v: &str, from: &Type, to: &Type) -> Option<String> {
    if from.is_reference() || to.is_reference() {
        return (from.is_reference() && to.is_reference()).then(|| format!("({v})"));
    }
    let out = match (from.num_kind(), to) {
        (_, Type::Void) | (NumKind::Ref, _) => return None,
        (NumKind::Bool, Type::Bool) => v.to_string(),
        (NumKind::Bool, Type::Byte | Type::Char | Type::Short | Type::Int) => z2i(v),
        (NumKind::Bool, _) => return None,
        (NumKind::Int, Type::Bool) => i2z(v),
        (NumKind::Int, Type::Byte) => i2b(v),
        (NumKind::Int, Type::Char) => i2c(v),
        (NumKind::Int, Type::Short) => i2s(v),
        (NumKind::Int, Type::Int) => i(v),
        (NumKind::Int, Type::Long) => i2j(v),
        (NumKind::Int, Type::Float) => i2f(v),
        (NumKind::Int, Type::Double) => i2d(v),
        (NumKind::Long, Type::Long) => l2l(v),
        (NumKind::Long, Type::Float) => l2f(v),
        (NumKind::Long, Type::Double) => l2d(v),
        (NumKind::Long, Type::Bool) => return None,
        (NumKind::Long, _) => narrow(l2i(v), to),
        (NumKind::Float, Type::Float) => f2f(v),
        (NumKind::Float, Type::Double) => f2d(v),
        (NumKind::Double, Type::Float) => d2f(v),
        (NumKind::Double, Type::Double) => d2d(v),
        (NumKind::Float | NumKind::Double, Type::Long) => d2j(v),
        (NumKind::Float | NumKind::Double, Type::Bool) => return None,
        (NumKind::Float | NumKind::Double, _) => narrow(d2i(v), to),
        (_, Type::Ref(_) | Type::Array(_)) => return None,
    };
    Some(out)
}

/// Lower a unary operator. `None` when the operator does not apply to `kind`.
pub fn unary(op: UnaryOp, kind: NumKind, v: &str) -> Option<String> {
    let out = match (op, kind) {
        (UnaryOp::Neg, NumKind::Int) => ineg(v),
        (UnaryOp::Neg, NumKind::Long) => lneg(v),
        (UnaryOp::Neg, NumKind::Float) => fneg(v),
        (UnaryOp::Neg, NumKind::Double) => dneg(v),
        (UnaryOp::Inv, NumKind::Int) => iinv(v),
        (UnaryOp::Inv, NumKind::Long) => linv(v),
        (UnaryOp::Not, NumKind::Bool) => znot(v),
        _ => return None,
    };
    Some(out)
}

/// Lower a binary operator. `None` when the operator does not apply to `kind`.
pub fn binary(op: BinaryOp, kind: NumKind, l: &str, r: &str) -> Option<String> {
    match kind {
        NumKind::Int => int_binary(op, l, r),
        NumKind::Long => long_binary(op, l, r),
        NumKind::Float | NumKind::Double => float_binary(op, kind, l, r),
        NumKind::Bool => bool_binary(op, l, r),
        NumKind::Ref => match op {
            BinaryOp::Eq => Some(format!("({l} == {r})")),
            BinaryOp::Ne => Some(format!("({l} != {r})")),
            _ => None,
        },
    }
}

fn comparison(op: BinaryOp) -> Option<&'static str> {
    Some(match op {
        BinaryOp::Eq => "==",
        BinaryOp::Ne => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Le => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Ge => ">=",
        _ => return None,
    })
}

fn int_binary(op: BinaryOp, l: &str, r: &str) -> Option<String> {
    let out = match op {
        BinaryOp::Add => format!("(({l} + {r})|0)"),
        BinaryOp::Sub => format!("(({l} - {r})|0)"),
        BinaryOp::Mul => imul(l, r),
        BinaryOp::Div => format!("N.idiv({l}, {r})"),
        BinaryOp::Rem => format!("N.irem({l}, {r})"),
        BinaryOp::And => format!("({l} & {r})"),
        BinaryOp::Or => format!("({l} | {r})"),
        BinaryOp::Xor => format!("({l} ^ {r})"),
        BinaryOp::Shl => format!("({l} << {r})"),
        BinaryOp::Shr => format!("({l} >> {r})"),
        BinaryOp::Ushr => format!("(({l} >>> {r})|0)"),
        _ => format!("({l} {} {r})", comparison(op)?),
    };
    Some(out)
}

fn long_binary(op: BinaryOp, l: &str, r: &str) -> Option<String> {
    let helper = match op {
        BinaryOp::Add => "ladd",
        BinaryOp::Sub => "lsub",
        BinaryOp::Mul => "lmul",
        BinaryOp::Div => "ldiv",
        BinaryOp::Rem => "lrem",
        BinaryOp::And => "land",
        BinaryOp::Or => "lor",
        BinaryOp::Xor => "lxor",
        BinaryOp::Shl => "lshl",
        BinaryOp::Shr => "lshr",
        BinaryOp::Ushr => "lushr",
        BinaryOp::Eq => "leq",
        BinaryOp::Ne => "lne",
        BinaryOp::Lt => "llt",
        BinaryOp::Le => "lle",
        BinaryOp::Gt => "lgt",
        BinaryOp::Ge => "lge",
        BinaryOp::Lcmp => "lcmp",
        _ => return None,
    };
    Some(format!("N.{helper}({l}, {r})"))
}

fn float_binary(op: BinaryOp, kind: NumKind, l: &str, r: &str) -> Option<String> {
    let arith = match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Rem => "%",
        BinaryOp::Cmpl => return Some(format!("N.cmpl({l}, {r})")),
        BinaryOp::Cmpg => return Some(format!("N.cmpg({l}, {r})")),
        _ => return Some(format!("({l} {} {r})", comparison(op)?)),
    };
    let expr = format!("{l} {arith} {r}");
    Some(if kind == NumKind::Float {
        f2f(&expr)
    } else {
        format!("({expr})")
    })
}

fn bool_binary(op: BinaryOp, l: &str, r: &str) -> Option<String> {
    let out = match op {
        BinaryOp::And => format!("!!({l} & {r})"),
        BinaryOp::Or => format!("!!({l} | {r})"),
        BinaryOp::Xor => format!("!!({l} ^ {r})"),
        BinaryOp::Eq => format!("({l} == {r})"),
        BinaryOp::Ne => format!("({l} != {r})"),
        BinaryOp::BoolAnd => format!("({l} && {r})"),
        BinaryOp::BoolOr => format!("({l} || {r})"),
        _ => return None,
    };
    Some(out)
}
