//! Source-language types and method signatures.

use serde::{Deserialize, Serialize};

use crate::{ClassName, Literal};

/// A resolved source-language type.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Void,
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Ref(ClassName),
    Array(Box<Type>),
}

/// Operand category for primitive operators.
///
/// Sub-int integral types (`byte`, `char`, `short`) operate as `Int`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumKind {
    Bool,
    Int,
    Long,
    Float,
    Double,
    Ref,
}

impl Type {
    pub fn string() -> Self {
        Type::Ref(ClassName::new("java.lang.String"))
    }

    pub fn object() -> Self {
        Type::Ref(ClassName::new("java.lang.Object"))
    }

    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// JVM field descriptor (`I`, `Ljava/lang/String;`, `[J`).
    pub fn desc(&self) -> String {
        match self {
            Type::Void => "V".to_string(),
            Type::Bool => "Z".to_string(),
            Type::Byte => "B".to_string(),
            Type::Char => "C".to_string(),
            Type::Short => "S".to_string(),
            Type::Int => "I".to_string(),
            Type::Long => "J".to_string(),
            Type::Float => "F".to_string(),
            Type::Double => "D".to_string(),
            Type::Ref(name) => format!("L{};", name.internal_name()),
            Type::Array(element) => format!("[{}", element.desc()),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Ref(_) | Type::Array(_))
    }

    pub fn num_kind(&self) -> NumKind {
        match self {
            Type::Bool => NumKind::Bool,
            Type::Byte | Type::Char | Type::Short | Type::Int => NumKind::Int,
            Type::Long => NumKind::Long,
            Type::Float => NumKind::Float,
            Type::Double => NumKind::Double,
            Type::Void | Type::Ref(_) | Type::Array(_) => NumKind::Ref,
        }
    }

    /// Zero value a freshly allocated slot of this type holds.
    pub fn default_literal(&self) -> Literal {
        match self {
            Type::Bool => Literal::Bool(false),
            Type::Byte | Type::Short | Type::Int => Literal::Int(0),
            Type::Char => Literal::Char(0),
            Type::Long => Literal::Long(0),
            Type::Float => Literal::Float(0.0),
            Type::Double => Literal::Double(0.0),
            Type::Void | Type::Ref(_) | Type::Array(_) => Literal::Null,
        }
    }
}

/// A named method parameter.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Method signature: parameters and return type.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct MethodType {
    #[serde(default)]
    pub args: Vec<Param>,
    pub ret: Type,
}

impl MethodType {
    pub fn new(args: Vec<Param>, ret: Type) -> Self {
        Self { args, ret }
    }

    /// `()V`
    pub fn void() -> Self {
        Self::new(Vec::new(), Type::Void)
    }

    /// JVM method descriptor (`(I[Ljava/lang/String;)V`).
    ///
    /// Parameter names do not participate.
    pub fn desc(&self) -> String {
        let args: String = self.args.iter().map(|p| p.ty.desc()).collect();
        format!("({}){}", args, self.ret.desc())
    }
}
