//! Fixture builders for emitter tests.

use kiln_core::{
    Body, Class, ClassKind, ClassName, Field, Literal, Method, MethodKind, MethodType, Param,
    Program, Stmt, Type,
};

use crate::emit::{EmitConfig, EmitError, Emitter, NoopTemplater};

pub const OBJECT: &str = "java.lang.Object";

/// Root class with an empty constructor.
pub fn object() -> Class {
    let mut class = Class {
        name: ClassName::new(OBJECT),
        extending: None,
        implementing: Vec::new(),
        class_id: 0,
        kind: ClassKind::Concrete,
        fields: Vec::new(),
        methods: Vec::new(),
        impl_code: None,
        is_native: false,
    };
    let init = ctor(&class, Vec::new());
    class.methods.push(init);
    class
}

/// Concrete class directly under `java.lang.Object`.
pub fn class(name: &str, id: u32) -> Class {
    Class {
        name: ClassName::new(name),
        extending: Some(ClassName::new(OBJECT)),
        implementing: Vec::new(),
        class_id: id,
        kind: ClassKind::Concrete,
        fields: Vec::new(),
        methods: Vec::new(),
        impl_code: None,
        is_native: false,
    }
}

pub fn subclass(name: &str, id: u32, parent: &str) -> Class {
    let mut class = class(name, id);
    class.extending = Some(ClassName::new(parent));
    class
}

pub fn interface(name: &str, id: u32) -> Class {
    let mut class = class(name, id);
    class.kind = ClassKind::Interface;
    class
}

pub fn field(owner: &Class, name: &str, ty: Type) -> Field {
    Field {
        name: name.to_string(),
        class: owner.name.clone(),
        is_static: false,
        ty,
        constant: None,
    }
}

pub fn static_field(owner: &Class, name: &str, ty: Type, constant: Option<Literal>) -> Field {
    Field {
        is_static: true,
        constant,
        ..field(owner, name, ty)
    }
}

/// Instance method without a body.
pub fn method(owner: &Class, name: &str, ty: MethodType) -> Method {
    Method {
        name: name.to_string(),
        class: owner.name.clone(),
        ty,
        is_static: false,
        kind: MethodKind::Ordinary,
        native_name: None,
        body: None,
        body_ref: None,
        native_bodies: Vec::new(),
        void_return_this: false,
    }
}

pub fn static_method(owner: &Class, name: &str, ty: MethodType) -> Method {
    Method {
        is_static: true,
        ..method(owner, name, ty)
    }
}

/// Attach a block body without locals.
pub fn with_body(mut method: Method, stmts: Vec<Stmt>) -> Method {
    method.body = Some(Body::new(Vec::new(), Stmt::Block(stmts)));
    method
}

/// `<init>()V` with the given statements.
pub fn ctor(owner: &Class, stmts: Vec<Stmt>) -> Method {
    let mut init = with_body(method(owner, "<init>", MethodType::void()), stmts);
    init.kind = MethodKind::InstanceInit;
    init
}

/// Static `<clinit>()V` with the given statements.
pub fn clinit(owner: &Class, stmts: Vec<Stmt>) -> Method {
    let mut init = with_body(static_method(owner, "<clinit>", MethodType::void()), stmts);
    init.kind = MethodKind::StaticInit;
    init
}

pub fn main_type() -> MethodType {
    MethodType::new(
        vec![Param::new("args", Type::array_of(Type::string()))],
        Type::Void,
    )
}

/// `static void main(String[] args)` with the given statements.
pub fn main_method(owner: &Class, stmts: Vec<Stmt>) -> Method {
    with_body(static_method(owner, "main", main_type()), stmts)
}

/// Program over `classes`, with `java.lang.Object` added up front when absent.
pub fn program(mut classes: Vec<Class>, entry: &str) -> Program {
    if !classes.iter().any(|c| c.name.fqname() == OBJECT) {
        classes.insert(0, object());
    }
    Program::new(classes, ClassName::new(entry), Vec::new()).unwrap()
}

/// Tabs to four spaces, so expected text can be written with `indoc!`.
pub fn untab(text: &str) -> String {
    text.replace('\t', "    ")
}

pub fn emit_class(program: &Program, name: &str) -> Result<String, EmitError> {
    emit_class_with(program, &EmitConfig::new(), name)
}

pub fn emit_class_with(
    program: &Program,
    config: &EmitConfig,
    name: &str,
) -> Result<String, EmitError> {
    let class = program.class(&ClassName::new(name)).unwrap();
    let mut emitter = Emitter::new(program, config, &NoopTemplater);
    emitter.emit_class(class).map(|text| untab(&text))
}

/// Emit one method, identified by class, name and descriptor.
pub fn emit_method(
    program: &Program,
    config: &EmitConfig,
    class: &str,
    name: &str,
    desc: &str,
) -> Result<String, EmitError> {
    let class = program.class(&ClassName::new(class)).unwrap();
    let method = class.method(name, desc).unwrap();
    let mut emitter = Emitter::new(program, config, &NoopTemplater);
    emitter.emit_method(class, method).map(|text| untab(&text))
}

pub fn emit_source(program: &Program, config: &EmitConfig) -> String {
    let result = crate::emit::emit(program, config, &NoopTemplater).unwrap();
    untab(&result.source)
}
