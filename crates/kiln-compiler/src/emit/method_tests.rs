use std::cell::RefCell;

use indoc::indoc;
use kiln_core::{
    ClassName, Expr, Method, MethodRef, MethodType, NativeBody, Param, Program, Stmt, Type,
};

use super::{EmitConfig, EmitError, Emitter, Templater};
use crate::test_utils::{class, ctor, emit_method, method, program, static_method, untab, with_body};

fn answer_type() -> MethodType {
    MethodType::new(Vec::new(), Type::Int)
}

/// `app.Main` holding the given methods.
fn main_program(methods: Vec<Method>) -> Program {
    let mut main = class("app.Main", 1);
    main.methods = methods;
    program(vec![main], "app.Main")
}

fn answer(natives: Vec<NativeBody>, body: Option<i32>) -> Method {
    let owner = class("app.Main", 1);
    let mut answer = static_method(&owner, "answer", answer_type());
    if let Some(value) = body {
        answer = with_body(answer, vec![Stmt::Return(Some(Expr::lit(value)))]);
    }
    answer.native_bodies = natives;
    answer
}

fn emit_answer(program: &Program) -> String {
    emit_method(program, &EmitConfig::new(), "app.Main", "answer", "()I").unwrap()
}

#[test]
fn missing_body_becomes_stub() {
    let owner = class("app.Main", 1);
    let program = main_program(vec![method(&owner, "draw", MethodType::void())]);

    assert_eq!(
        emit_method(&program, &EmitConfig::new(), "app.Main", "draw", "()V").unwrap(),
        indoc! {r#"
            app_Main.prototype["draw()V"] = function() { N.methodWithoutBody('app_Main.prototype["draw()V"]') };
        "#}
    );
}

#[test]
fn generated_body() {
    let program = main_program(vec![answer(Vec::new(), Some(7))]);

    assert_eq!(
        emit_answer(&program),
        indoc! {r#"
            app_Main["answer()I"] = function() {
                return 7;
            };
        "#}
    );
}

#[test]
fn unconditional_native_replaces_generated_body() {
    let natives = vec![NativeBody::new("js", "", "return 42;")];
    let program = main_program(vec![answer(natives, Some(7))]);

    assert_eq!(
        emit_answer(&program),
        indoc! {r#"
            app_Main["answer()I"] = function() {
                return 42;
            };
        "#}
    );
}

#[test]
fn natives_for_other_targets_ignored() {
    let natives = vec![NativeBody::new("cpp", "", "return 42;")];
    let program = main_program(vec![answer(natives, Some(7))]);

    assert_eq!(
        emit_answer(&program),
        indoc! {r#"
            app_Main["answer()I"] = function() {
                return 7;
            };
        "#}
    );
}

#[test]
fn guarded_natives_pick_slot_at_definition() {
    let natives = vec![
        NativeBody::new("js", "typeof window != 'undefined'", "return 1;"),
        NativeBody::new("js", "", "return 2;"),
        NativeBody::new("js", "typeof process != 'undefined'", "return 3;"),
    ];
    let program = main_program(vec![answer(natives, None)]);

    assert_eq!(
        emit_answer(&program),
        indoc! {r#"
            if (typeof window != 'undefined') {
                app_Main["answer()I"] = function() {
                    return 1;
                };
            }
            else if (typeof process != 'undefined') {
                app_Main["answer()I"] = function() {
                    return 3;
                };
            }
            else {
                app_Main["answer()I"] = function() {
                    return 2;
                };
            }
        "#}
    );
}

#[test]
fn guarded_native_falls_back_to_generated_body() {
    let natives = vec![NativeBody::new("js", "N.isNode", "return 1;")];
    let program = main_program(vec![answer(natives, Some(0))]);

    assert_eq!(
        emit_answer(&program),
        indoc! {r#"
            if (N.isNode) {
                app_Main["answer()I"] = function() {
                    return 1;
                };
            }
            else {
                app_Main["answer()I"] = function() {
                    return 0;
                };
            }
        "#}
    );
}

#[test]
fn later_native_for_same_guard_wins() {
    let natives = vec![
        NativeBody::new("js", "", "return 1;"),
        NativeBody::new("js", "", "return 2;"),
    ];
    let program = main_program(vec![answer(natives, None)]);

    assert_eq!(
        emit_answer(&program),
        indoc! {r#"
            app_Main["answer()I"] = function() {
                return 2;
            };
        "#}
    );
}

#[test]
fn shared_body_lowered_for_borrowing_method() {
    let owner = class("app.Main", 1);
    let mut alias = static_method(&owner, "alias", answer_type());
    alias.body_ref = Some(MethodRef::new("app.Main", "answer", answer_type()));
    let program = main_program(vec![answer(Vec::new(), Some(5)), alias]);

    assert_eq!(
        emit_method(&program, &EmitConfig::new(), "app.Main", "alias", "()I").unwrap(),
        indoc! {r#"
            app_Main["alias()I"] = function() {
                return 5;
            };
        "#}
    );
}

#[test]
fn constructors_return_receiver() {
    let owner = class("app.Main", 1);
    let program = main_program(vec![ctor(&owner, Vec::new())]);

    assert_eq!(
        emit_method(&program, &EmitConfig::new(), "app.Main", "<init>", "()V").unwrap(),
        indoc! {r#"
            app_Main.prototype["app.Main<init>()V"] = function() {
                return this;
            };
        "#}
    );
}

#[test]
fn void_return_this_appends_receiver() {
    let owner = class("app.Main", 1);
    let mut chain = with_body(method(&owner, "chain", MethodType::void()), Vec::new());
    chain.void_return_this = true;
    let program = main_program(vec![chain]);

    assert_eq!(
        emit_method(&program, &EmitConfig::new(), "app.Main", "chain", "()V").unwrap(),
        indoc! {r#"
            app_Main.prototype["chain()V"] = function() {
                return this;
            };
        "#}
    );
}

#[test]
fn native_name_used_verbatim() {
    let owner = class("app.Main", 1);
    let mut now = with_body(static_method(&owner, "now", MethodType::void()), Vec::new());
    now.native_name = Some("now-ms".to_string());
    let program = main_program(vec![now]);

    assert_eq!(
        emit_method(&program, &EmitConfig::new(), "app.Main", "now", "()V").unwrap(),
        indoc! {r#"
            app_Main["now-ms"] = function() {
            };
        "#}
    );
}

#[test]
fn parameters_escaped() {
    let owner = class("app.Main", 1);
    let ty = MethodType::new(
        vec![Param::new("name", Type::string()), Param::new("in", Type::Int)],
        Type::Void,
    );
    let program = main_program(vec![with_body(static_method(&owner, "greet", ty), Vec::new())]);

    assert_eq!(
        emit_method(
            &program,
            &EmitConfig::new(),
            "app.Main",
            "greet",
            "(Ljava/lang/String;I)V"
        )
        .unwrap(),
        indoc! {r#"
            app_Main["greet(Ljava/lang/String;I)V"] = function(name_, in_) {
            };
        "#}
    );
}

#[test]
fn malformed_body_replaced_by_marked_stub() {
    let owner = class("app.Main", 1);
    let cast = Expr::Cast {
        value: Box::new(Expr::lit(1)),
        from: Type::Int,
        to: Type::string(),
    };
    let bad = with_body(
        static_method(&owner, "bad", MethodType::void()),
        vec![Stmt::Expr(cast)],
    );
    let program = main_program(vec![bad]);

    assert_eq!(
        emit_method(&program, &EmitConfig::new(), "app.Main", "bad", "()V").unwrap(),
        indoc! {r#"
            // Errored method: app.Main.bad :: ()V :: can't convert I to Ljava/lang/String;;
            app_Main["bad()V"] = function() { N.methodWithoutBody('app_Main["bad()V"]') };
        "#}
    );
}

#[test]
fn unresolved_call_is_fatal() {
    let owner = class("app.Main", 1);
    let call = Expr::CallStatic {
        method: MethodRef::new("app.Gone", "run", MethodType::void()),
        args: Vec::new(),
    };
    let program = main_program(vec![with_body(
        static_method(&owner, "go", MethodType::void()),
        vec![Stmt::Expr(call)],
    )]);

    let err = emit_method(&program, &EmitConfig::new(), "app.Main", "go", "()V").unwrap_err();
    assert!(matches!(err, EmitError::UnresolvedMethod(ref m) if m.name == "run"));
}

/// Substitutes `{{ROOT}}` and records each call site.
#[derive(Default)]
struct RecordingTemplater {
    contexts: RefCell<Vec<String>>,
}

impl Templater for RecordingTemplater {
    fn render(&self, text: &str, context: &str) -> Result<String, EmitError> {
        self.contexts.borrow_mut().push(context.to_string());
        Ok(text.replace("{{ROOT}}", "globalThis"))
    }
}

#[test]
fn native_bodies_templated() {
    let natives = vec![NativeBody::new("js", "", "return {{ROOT}}.answer;")];
    let program = main_program(vec![answer(natives, None)]);
    let config = EmitConfig::new();
    let templater = RecordingTemplater::default();
    let class = program.class(&ClassName::new("app.Main")).unwrap();
    let answer = class.method("answer", "()I").unwrap();

    let mut emitter = Emitter::new(&program, &config, &templater);
    let text = untab(&emitter.emit_method(class, answer).unwrap());

    assert_eq!(
        text,
        indoc! {r#"
            app_Main["answer()I"] = function() {
                return globalThis.answer;
            };
        "#}
    );
    assert_eq!(*templater.contexts.borrow(), vec!["nativeBody".to_string()]);
}

#[test]
fn target_selects_native_bodies() {
    let natives = vec![
        NativeBody::new("js", "", "return 1;"),
        NativeBody::new("node", "", "return 2;"),
    ];
    let program = main_program(vec![answer(natives, None)]);
    let config = EmitConfig::new().target("node");

    assert_eq!(
        emit_method(&program, &config, "app.Main", "answer", "()I").unwrap(),
        indoc! {r#"
            app_Main["answer()I"] = function() {
                return 2;
            };
        "#}
    );
}

#[test]
fn guard_tested_once_with_fallback_last() {
    let natives = vec![
        NativeBody::new("js", "envA", "return 1;"),
        NativeBody::new("js", "", "return 0;"),
    ];
    let program = main_program(vec![answer(natives, Some(9))]);
    let text = emit_answer(&program);

    assert_eq!(text.matches("envA").count(), 1);
    assert!(text.starts_with("if (envA) {\n"));
    assert!(text.ends_with("else {\n    app_Main[\"answer()I\"] = function() {\n        return 0;\n    };\n}\n"));
    assert!(!text.contains("return 9;"));
}
