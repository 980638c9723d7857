//! Classes, fields, methods and the program-wide class index.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{Body, ClassName, FieldRef, Literal, MethodRef, MethodType, Type};

/// Errors raised while assembling a `Program`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("duplicate class: {0}")]
    DuplicateClass(ClassName),

    #[error("entry class not found: {0}")]
    MissingEntryClass(ClassName),

    #[error("invalid program JSON: {0}")]
    Json(String),
}

/// A supertype reference naming a class absent from the program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("class not found: {0}")]
pub struct MissingClass(pub ClassName);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Concrete,
    Abstract,
    Interface,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Ordinary,
    /// Constructor (`<init>`).
    InstanceInit,
    /// Static constructor (`<clinit>`).
    StaticInit,
}

/// A target-specific implementation registered for a method.
///
/// An empty `cond` marks the unconditional fallback.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct NativeBody {
    pub target: String,
    #[serde(default)]
    pub cond: String,
    pub body: String,
}

impl NativeBody {
    pub fn new(target: impl Into<String>, cond: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            cond: cond.into(),
            body: body.into(),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub class: ClassName,
    #[serde(default)]
    pub is_static: bool,
    #[serde(rename = "type")]
    pub ty: Type,
    /// Explicit constant; absent means the type's default.
    #[serde(default)]
    pub constant: Option<Literal>,
}

impl Field {
    pub fn reference(&self) -> FieldRef {
        FieldRef::new(self.class.clone(), self.name.clone(), self.ty.clone())
    }

    /// The value the slot starts with: the declared constant or the type default.
    pub fn constant_value(&self) -> Literal {
        self.constant
            .clone()
            .unwrap_or_else(|| self.ty.default_literal())
    }

    fn matches(&self, field: &FieldRef) -> bool {
        self.name == field.name && self.ty == field.ty
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub class: ClassName,
    #[serde(rename = "type")]
    pub ty: MethodType,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub kind: MethodKind,
    /// Explicit target identifier, used verbatim when present.
    #[serde(default)]
    pub native_name: Option<String>,
    #[serde(default)]
    pub body: Option<Body>,
    /// Body owned by another method.
    #[serde(default)]
    pub body_ref: Option<MethodRef>,
    #[serde(default)]
    pub native_bodies: Vec<NativeBody>,
    /// Returns the receiver although declared void.
    #[serde(default)]
    pub void_return_this: bool,
}

impl Method {
    pub fn reference(&self) -> MethodRef {
        MethodRef::new(self.class.clone(), self.name.clone(), self.ty.clone())
    }

    pub fn desc(&self) -> String {
        self.ty.desc()
    }

    pub fn is_instance_init(&self) -> bool {
        self.kind == MethodKind::InstanceInit
    }

    /// Instance or static initializer.
    pub fn is_init(&self) -> bool {
        matches!(self.kind, MethodKind::InstanceInit | MethodKind::StaticInit)
    }

    /// Whether the emitted function ends by returning the receiver.
    ///
    /// Constructors always do: construction evaluates `new X()[ctor](..)`.
    pub fn returns_this(&self) -> bool {
        self.void_return_this || self.is_instance_init()
    }

    /// Native variants registered for `target`, in registration order.
    pub fn native_bodies_for<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a NativeBody> {
        self.native_bodies.iter().filter(move |b| b.target == target)
    }

    fn matches(&self, name: &str, desc: &str) -> bool {
        self.name == name && self.desc() == desc
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Class {
    pub name: ClassName,
    #[serde(default)]
    pub extending: Option<ClassName>,
    #[serde(default)]
    pub implementing: Vec<ClassName>,
    pub class_id: u32,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Verbatim replacement for the whole class emission.
    #[serde(default)]
    pub impl_code: Option<String>,
    /// Provided by the target runtime; never emitted.
    #[serde(default)]
    pub is_native: bool,
}

impl Class {
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_abstract(&self) -> bool {
        self.kind == ClassKind::Abstract
    }

    pub fn static_constructor(&self) -> Option<&Method> {
        self.methods.iter().find(|m| m.kind == MethodKind::StaticInit)
    }

    pub fn has_static_fields(&self) -> bool {
        self.fields.iter().any(|f| f.is_static)
    }

    /// Own method with the given name and descriptor.
    pub fn method(&self, name: &str, desc: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.matches(name, desc))
    }

    /// Own field matching the reference's name and type.
    pub fn field(&self, field: &FieldRef) -> Option<&Field> {
        self.fields.iter().find(|f| f.matches(field))
    }

    /// Own fields sharing a declared name, in declaration order.
    pub fn fields_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Field> {
        self.fields.iter().filter(move |f| f.name == name)
    }
}

/// Custom entry-point text registered for a target.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CustomMain {
    pub target: String,
    pub value: String,
}

#[derive(Deserialize)]
struct ProgramData {
    classes: Vec<Class>,
    entrypoint: ClassName,
    #[serde(default)]
    custom_mains: Vec<CustomMain>,
}

/// A fully resolved program.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "ProgramData")]
pub struct Program {
    classes: Vec<Class>,
    entrypoint: ClassName,
    custom_mains: Vec<CustomMain>,
    #[serde(skip)]
    index: IndexMap<ClassName, usize>,
}

impl TryFrom<ProgramData> for Program {
    type Error = ProgramError;

    fn try_from(data: ProgramData) -> Result<Self, Self::Error> {
        Program::new(data.classes, data.entrypoint, data.custom_mains)
    }
}

impl Program {
    pub fn new(
        classes: Vec<Class>,
        entrypoint: ClassName,
        custom_mains: Vec<CustomMain>,
    ) -> Result<Self, ProgramError> {
        let mut index = IndexMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            if index.insert(class.name.clone(), i).is_some() {
                return Err(ProgramError::DuplicateClass(class.name.clone()));
            }
        }
        if !index.contains_key(&entrypoint) {
            return Err(ProgramError::MissingEntryClass(entrypoint));
        }
        Ok(Self {
            classes,
            entrypoint,
            custom_mains,
            index,
        })
    }

    /// Parse a program from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ProgramError> {
        serde_json::from_str(json).map_err(|e| ProgramError::Json(e.to_string()))
    }

    /// Classes in input order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn entrypoint(&self) -> &ClassName {
        &self.entrypoint
    }

    pub fn class(&self, name: &ClassName) -> Option<&Class> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    /// Custom entry text for a target, first registration wins.
    pub fn custom_main(&self, target: &str) -> Option<&str> {
        self.custom_mains
            .iter()
            .find(|c| c.target == target)
            .map(|c| c.value.as_str())
    }

    /// Superclass chain, nearest first, excluding `class` itself.
    ///
    /// Stops at the first superclass missing from the program.
    pub fn ancestors<'a>(&'a self, class: &Class) -> Vec<&'a Class> {
        let mut chain = Vec::new();
        let mut seen: IndexSet<&ClassName> = IndexSet::new();
        let mut next = class.extending.as_ref();
        while let Some(name) = next {
            let Some(parent) = self.class(name) else {
                break;
            };
            if !seen.insert(&parent.name) || parent.name == class.name {
                break;
            }
            chain.push(parent);
            next = parent.extending.as_ref();
        }
        chain
    }

    /// Self, ancestors, then every transitively implemented interface.
    ///
    /// Fails on the first implemented interface missing from the program.
    pub fn related_types<'a>(
        &'a self,
        class: &'a Class,
    ) -> Result<Vec<&'a Class>, MissingClass> {
        let mut related: IndexMap<&ClassName, &'a Class> = IndexMap::new();
        related.insert(&class.name, class);
        for ancestor in self.ancestors(class) {
            related.insert(&ancestor.name, ancestor);
        }

        let mut pending: Vec<&'a Class> = related.values().copied().collect();
        let mut i = 0;
        while i < pending.len() {
            let current = pending[i];
            i += 1;
            for name in &current.implementing {
                let iface = self.class(name).ok_or_else(|| MissingClass(name.clone()))?;
                if related.contains_key(&iface.name) {
                    continue;
                }
                related.insert(&iface.name, iface);
                pending.push(iface);
            }
        }

        Ok(related.into_values().collect())
    }

    /// Field lookup starting at the referenced class.
    ///
    /// Own fields first, then superinterfaces depth-first, then the
    /// superclass, recursively.
    pub fn find_field(&self, field: &FieldRef) -> Option<&Field> {
        let class = self.class(&field.class)?;
        let mut visited = IndexSet::new();
        self.lookup_field(class, field, &mut visited)
    }

    fn lookup_field<'a>(
        &'a self,
        class: &'a Class,
        field: &FieldRef,
        visited: &mut IndexSet<&'a ClassName>,
    ) -> Option<&'a Field> {
        if !visited.insert(&class.name) {
            return None;
        }
        if let Some(found) = class.field(field) {
            return Some(found);
        }
        for name in &class.implementing {
            let found = self
                .class(name)
                .and_then(|iface| self.lookup_field(iface, field, visited));
            if found.is_some() {
                return found;
            }
        }
        let parent = self.class(class.extending.as_ref()?)?;
        self.lookup_field(parent, field, visited)
    }

    /// Method lookup in `class`, its ancestors, then its interfaces.
    pub fn find_method(&self, class: &ClassName, name: &str, desc: &str) -> Option<&Method> {
        let class = self.class(class)?;
        self.related_types(class)
            .ok()?
            .into_iter()
            .find_map(|c| c.method(name, desc))
    }

    /// Resolve a method reference through the hierarchy.
    pub fn resolve_method(&self, method: &MethodRef) -> Option<&Method> {
        self.find_method(&method.class, &method.name, &method.desc())
    }
}
