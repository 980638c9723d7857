use kiln_core::{BinaryOp, ClassName, NumKind, Type, UnaryOp};

use crate::coerce::{binary, convert, unary};

#[test]
fn narrowing_from_int() {
    assert_eq!(convert("x", &Type::Int, &Type::Byte).unwrap(), "((x)<<24>>24)");
    assert_eq!(convert("x", &Type::Int, &Type::Short).unwrap(), "((x)<<16>>16)");
    assert_eq!(convert("x", &Type::Int, &Type::Char).unwrap(), "((x)&0xFFFF)");
}

#[test]
fn long_narrows_through_int() {
    assert_eq!(convert("x", &Type::Long, &Type::Int).unwrap(), "N.l2i(x)");
    assert_eq!(
        convert("x", &Type::Long, &Type::Byte).unwrap(),
        "((N.l2i(x))<<24>>24)"
    );
}

#[test]
fn floating_to_integral_saturates() {
    assert_eq!(convert("x", &Type::Double, &Type::Int).unwrap(), "N.d2i(x)");
    assert_eq!(convert("x", &Type::Float, &Type::Long).unwrap(), "N.d2j(x)");
    assert_eq!(
        convert("x", &Type::Float, &Type::Char).unwrap(),
        "((N.d2i(x))&0xFFFF)"
    );
}

#[test]
fn single_precision_rounds() {
    assert_eq!(convert("x", &Type::Int, &Type::Float).unwrap(), "Math.fround(+(x))");
    assert_eq!(convert("x", &Type::Double, &Type::Float).unwrap(), "Math.fround(+(x))");
}

#[test]
fn long_to_float_rounds_once() {
    // Halfway between two floats once widened to a double.
    let x: i64 = (1 << 60) + (1 << 36) + 1;
    assert_ne!(x as f32, (x as f64) as f32);

    let text = convert("x", &Type::Long, &Type::Float).unwrap();
    assert_eq!(text, "N.l2f(x)");
    assert!(!text.contains("l2d"));
}

#[test]
fn bool_conversions() {
    assert_eq!(convert("b", &Type::Bool, &Type::Int).unwrap(), "N.z2i(b)");
    assert_eq!(convert("i", &Type::Int, &Type::Bool).unwrap(), "((i)!=0)");
    assert!(convert("b", &Type::Bool, &Type::Double).is_none());
}

#[test]
fn reference_conversions() {
    let a = Type::Ref(ClassName::new("a.A"));
    assert_eq!(convert("o", &a, &Type::object()).unwrap(), "(o)");
    assert!(convert("o", &a, &Type::Int).is_none());
    assert!(convert("x", &Type::Int, &Type::Void).is_none());
}

#[test]
fn unary_ops() {
    assert_eq!(unary(UnaryOp::Neg, NumKind::Int, "x").unwrap(), "(-(x)|0)");
    assert_eq!(unary(UnaryOp::Neg, NumKind::Long, "x").unwrap(), "N.lneg(x)");
    assert_eq!(unary(UnaryOp::Inv, NumKind::Int, "x").unwrap(), "~(x)");
    assert_eq!(unary(UnaryOp::Not, NumKind::Bool, "x").unwrap(), "!(x)");
    assert!(unary(UnaryOp::Inv, NumKind::Double, "x").is_none());
}

#[test]
fn int_arithmetic_wraps() {
    assert_eq!(binary(BinaryOp::Add, NumKind::Int, "a", "b").unwrap(), "((a + b)|0)");
    assert_eq!(binary(BinaryOp::Mul, NumKind::Int, "a", "b").unwrap(), "Math.imul(a, b)");
    assert_eq!(binary(BinaryOp::Div, NumKind::Int, "a", "b").unwrap(), "N.idiv(a, b)");
    assert_eq!(binary(BinaryOp::Ushr, NumKind::Int, "a", "b").unwrap(), "((a >>> b)|0)");
    assert_eq!(binary(BinaryOp::Lt, NumKind::Int, "a", "b").unwrap(), "(a < b)");
}

#[test]
fn long_arithmetic_uses_helpers() {
    assert_eq!(binary(BinaryOp::Add, NumKind::Long, "a", "b").unwrap(), "N.ladd(a, b)");
    assert_eq!(binary(BinaryOp::Lcmp, NumKind::Long, "a", "b").unwrap(), "N.lcmp(a, b)");
    assert_eq!(binary(BinaryOp::Ne, NumKind::Long, "a", "b").unwrap(), "N.lne(a, b)");
}

#[test]
fn float_arithmetic_rounds() {
    assert_eq!(
        binary(BinaryOp::Mul, NumKind::Float, "a", "b").unwrap(),
        "Math.fround(a * b)"
    );
    assert_eq!(binary(BinaryOp::Mul, NumKind::Double, "a", "b").unwrap(), "(a * b)");
    assert_eq!(binary(BinaryOp::Cmpg, NumKind::Double, "a", "b").unwrap(), "N.cmpg(a, b)");
}

#[test]
fn operators_rejected_for_wrong_kind() {
    assert!(binary(BinaryOp::Lcmp, NumKind::Int, "a", "b").is_none());
    assert!(binary(BinaryOp::Add, NumKind::Ref, "a", "b").is_none());
    assert!(binary(BinaryOp::BoolAnd, NumKind::Long, "a", "b").is_none());
    assert_eq!(
        binary(BinaryOp::BoolAnd, NumKind::Bool, "a", "b").unwrap(),
        "(a && b)"
    );
}
