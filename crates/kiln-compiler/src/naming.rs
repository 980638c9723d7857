//! Identifier assignment for classes, fields, methods and locals.
//!
//! One `NameResolver` lives for exactly one emission run. Field identifiers
//! are computed lazily and memoized, so every reference to a field observes
//! the same identifier no matter which reference triggered resolution.

use std::collections::{HashMap, HashSet};

use kiln_core::{ClassName, Field, FieldRef, Method, MethodRef, Program};

use crate::emit::{EmitError, quote};

/// Names the runtime and the emitted program reserve for themselves.
const RESERVED: &[&str] = &[
    // object model members
    "name",
    "constructor",
    "prototype",
    "__proto__",
    // runtime globals
    "N",
    "S",
    "SS",
];

const JS_KEYWORDS: &[&str] = &[
    "arguments",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "undefined",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Whether `name` can follow a dot in property access.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphabetic() || c.is_ascii_digit() || c == '_')
}

/// Property access suffix for `name`: `.name` or `["na-me"]`.
pub fn member_access(name: &str) -> String {
    if is_plain_identifier(name) {
        format!(".{name}")
    } else {
        format!("[{}]", quote(name))
    }
}

/// Collision-free identifiers for one program.
pub struct NameResolver<'a> {
    program: &'a Program,
    /// Declared field -> assigned identifier
    fields: HashMap<FieldRef, String>,
}

impl<'a> NameResolver<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            fields: HashMap::new(),
        }
    }

    /// Global binding for a class: `a.b.C` becomes `a_b_C`.
    pub fn class_identifier(&self, class: &ClassName) -> String {
        class.fqname().replace('.', "_")
    }

    /// Slot holding the class's static initializer.
    pub fn static_init_identifier(&self, class: &ClassName) -> String {
        format!("{}.SI", self.class_identifier(class))
    }

    /// Statement forcing the class's static initializer.
    pub fn static_init_call(&self, class: &ClassName) -> String {
        format!("{}();", self.static_init_identifier(class))
    }

    /// Storage name for a field reference.
    ///
    /// The reference may name a subclass of the declaring class; the
    /// identifier belongs to the field it resolves to.
    pub fn field_identifier(&mut self, field: &FieldRef) -> Result<String, EmitError> {
        let program = self.program;
        let declared = program
            .find_field(field)
            .ok_or_else(|| EmitError::UnresolvedField(field.clone()))?;
        self.declared_field_identifier(declared)
    }

    /// Storage name for a declared field.
    ///
    /// Fields visible in one object (own plus inherited) sharing a declared
    /// name get pairwise-distinct identifiers: each candidate that already
    /// appears among the ancestors' identifiers gets `_` appended until free.
    /// All same-named fields of the declaring class are assigned together,
    /// in declaration order.
    pub fn declared_field_identifier(&mut self, field: &Field) -> Result<String, EmitError> {
        let key = field.reference();
        if let Some(name) = self.fields.get(&key) {
            return Ok(name.clone());
        }

        let program = self.program;
        let mut name = format!("_{}", field.name.replace('$', "_"));
        let mut taken: HashSet<String> = HashSet::new();
        let colliding: Vec<FieldRef> = match program.class(&field.class) {
            Some(class) => {
                for ancestor in program.ancestors(class).into_iter().rev() {
                    for inherited in ancestor.fields_named(&field.name) {
                        taken.insert(self.declared_field_identifier(inherited)?);
                    }
                }
                class.fields_named(&field.name).map(Field::reference).collect()
            }
            None => vec![key.clone()],
        };

        for reference in colliding {
            while taken.contains(&name) {
                name.push('_');
            }
            taken.insert(name.clone());
            self.fields.insert(reference, name.clone());
        }

        self.fields
            .get(&key)
            .cloned()
            .ok_or_else(|| EmitError::ResolverInvariant(format!("field not cached: {key}")))
    }

    /// Slot name for a declared method.
    ///
    /// Ordinary methods share a slot across overrides, so name plus
    /// descriptor is enough. Constructors are qualified by class.
    pub fn method_identifier(&self, method: &Method) -> String {
        if let Some(native) = &method.native_name {
            return native.clone();
        }
        if method.is_instance_init() {
            format!("{}{}{}", method.class, method.name, method.desc())
        } else {
            format!("{}{}", method.name, method.desc())
        }
    }

    /// Slot name for a method reference, resolved through the hierarchy.
    pub fn method_ref_identifier(&self, method: &MethodRef) -> Result<String, EmitError> {
        let resolved = self
            .program
            .resolve_method(method)
            .ok_or_else(|| EmitError::UnresolvedMethod(method.clone()))?;
        if let Some(native) = &resolved.native_name {
            return Ok(native.clone());
        }
        Ok(if resolved.is_instance_init() {
            format!("{}{}{}", method.class, method.name, method.desc())
        } else {
            format!("{}{}", method.name, method.desc())
        })
    }

    /// Local or parameter name, escaped away from keywords and reserved names.
    pub fn local_identifier(&self, name: &str) -> String {
        let mut out: String = name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c == '$' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert(0, '_');
        }
        if RESERVED.contains(&out.as_str()) || JS_KEYWORDS.contains(&out.as_str()) {
            out.push('_');
        }
        out
    }
}
