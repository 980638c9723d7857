//! Method body lowering: statement and expression trees to JavaScript.

use indexmap::IndexSet;
use kiln_core::{
    Body, Class, ClassName, Expr, FieldRef, Literal, Method, MethodRef, Stmt, SwitchCase, Type,
};

use super::literal::{constant, quote};
use super::writer::{SourceMark, SourceWriter};
use super::{EmitError, Emitter};
use crate::coerce;
use crate::naming::member_access;

/// Class whose `*_raw` static methods splice target text verbatim.
const RAW_CLASS: &str = "com.jtransc.target.Js";

/// Exception slot shared by every catch in a body.
const EXCEPTION: &str = "J__exception__";

#[derive(Clone, Debug)]
enum JumpTarget {
    Loop,
    /// Lowered switches carry the label unlabeled breaks must name.
    Switch(Option<String>),
}

/// Per-method lowering state.
pub(super) struct MethodCtx<'m> {
    class: &'m Class,
    method: &'m Method,
    jumps: Vec<JumpTarget>,
    switches: u32,
}

impl<'m> MethodCtx<'m> {
    fn new(class: &'m Class, method: &'m Method) -> Self {
        Self {
            class,
            method,
            jumps: Vec::new(),
            switches: 0,
        }
    }

    fn describe(&self) -> String {
        format!(
            "{}.{}{}",
            self.class.name,
            self.method.name,
            self.method.desc()
        )
    }

    fn break_target(&self) -> Option<&str> {
        match self.jumps.last() {
            Some(JumpTarget::Switch(Some(label))) => Some(label),
            _ => None,
        }
    }
}

fn is_raw_call(method: &MethodRef) -> bool {
    method.class.fqname() == RAW_CLASS && method.name.ends_with("_raw")
}

fn is_empty_stmt(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Nop => true,
        Stmt::Block(stmts) => stmts.iter().all(is_empty_stmt),
        _ => false,
    }
}

/// Runtime array constructor for an array type.
fn array_constructor(ty: &Type, length: &str) -> String {
    match ty {
        Type::Array(element) if !element.is_reference() => {
            format!("new JA_{}({length})", element.desc())
        }
        _ => format!("new JA_L({length}, {})", quote(&ty.desc())),
    }
}

impl Emitter<'_> {
    /// Lower a generated body for `method` of `class`.
    ///
    /// Output order: locals, exception slot, static-init prefix, statements.
    pub(super) fn lower_body(
        &mut self,
        class: &Class,
        method: &Method,
        body: &Body,
    ) -> Result<SourceWriter, EmitError> {
        let mut w = SourceWriter::new();

        if !body.locals.is_empty() {
            let vars: Vec<String> = body
                .locals
                .iter()
                .map(|local| {
                    format!(
                        "{} = {}",
                        self.names.local_identifier(&local.name),
                        constant(&local.ty.default_literal())
                    )
                })
                .collect();
            w.line(format!("var {};", vars.join(", ")));
        }
        if body.has_traps() {
            w.line(format!("var {EXCEPTION} = null;"));
        }
        for other in self.static_init_targets(class, body) {
            w.line(self.names.static_init_call(&other));
        }

        let mut ctx = MethodCtx::new(class, method);
        self.stmt(&mut ctx, &mut w, &body.stmt)?;
        Ok(w)
    }

    /// Other classes whose static state the body touches, first-seen order.
    fn static_init_targets(&self, class: &Class, body: &Body) -> IndexSet<ClassName> {
        let program = self.program;
        let static_owner = |field: &FieldRef| program.find_field(field).map(|f| &f.class);

        let mut touched: IndexSet<&ClassName> = IndexSet::new();
        body.stmt.walk_exprs(&mut |e| {
            let owner = match e {
                Expr::StaticField(field) => static_owner(field),
                Expr::CallStatic { method, .. } if !is_raw_call(method) => {
                    program.resolve_method(method).map(|m| &m.class)
                }
                Expr::New { class, .. } => Some(class),
                _ => None,
            };
            if let Some(owner) = owner {
                touched.insert(owner);
            }
        });
        body.stmt.any(&mut |s| {
            if let Stmt::SetStaticField { field, .. } = s
                && let Some(owner) = static_owner(field)
            {
                touched.insert(owner);
            }
            false
        });

        touched
            .into_iter()
            .filter(|name| **name != class.name)
            .filter(|name| program.class(name).is_some_and(|c| !c.is_native))
            .cloned()
            .collect()
    }

    fn stmt(
        &mut self,
        ctx: &mut MethodCtx<'_>,
        w: &mut SourceWriter,
        stmt: &Stmt,
    ) -> Result<(), EmitError> {
        match stmt {
            Stmt::Line { file, line } => {
                if self.config.debug {
                    w.mark(SourceMark {
                        file: file.clone(),
                        line: *line,
                    });
                }
            }
            Stmt::Nop => {}
            Stmt::Block(stmts) => {
                for s in stmts {
                    self.stmt(ctx, w, s)?;
                }
            }
            Stmt::Expr(e) => {
                let e = self.expr(ctx, e)?;
                w.line(format!("{e};"));
            }
            Stmt::Return(Some(e)) => {
                let e = self.expr(ctx, e)?;
                w.line(format!("return {e};"));
            }
            Stmt::Return(None) => {
                w.line(if ctx.method.returns_this() {
                    "return this;"
                } else {
                    "return;"
                });
            }
            Stmt::SetLocal { local, value } => {
                let value = self.expr(ctx, value)?;
                w.line(format!("{} = {value};", self.names.local_identifier(local)));
            }
            Stmt::SetInstanceField {
                object,
                field,
                value,
            } => {
                let object = self.expr(ctx, object)?;
                let value = self.expr(ctx, value)?;
                let access = member_access(&self.names.field_identifier(field)?);
                w.line(format!("{object}{access} = {value};"));
            }
            Stmt::SetStaticField { field, value } => {
                let value = self.expr(ctx, value)?;
                let target = self.static_field(field)?;
                w.line(format!("{target} = {value};"));
            }
            Stmt::SetArray {
                array,
                index,
                value,
            } => {
                let array = self.expr(ctx, array)?;
                let index = self.expr(ctx, index)?;
                let value = self.expr(ctx, value)?;
                w.line(format!("{array}.data[{index}] = {value};"));
            }
            Stmt::SetArrayLiterals {
                array,
                start,
                values,
            } => {
                let array = self.expr(ctx, array)?;
                let values = self.args(ctx, values)?;
                w.line(format!("{array}.setArraySlice({start}, [{values}]);"));
            }
            Stmt::If { cond, then } => {
                let cond = self.expr(ctx, cond)?;
                w.block(&format!("if ({cond})"), "", |w| self.stmt(ctx, w, then))?;
            }
            Stmt::IfElse {
                cond,
                then,
                otherwise,
            } => {
                let cond = self.expr(ctx, cond)?;
                w.block(&format!("if ({cond})"), "", |w| self.stmt(ctx, w, then))?;
                w.block("else", "", |w| self.stmt(ctx, w, otherwise))?;
            }
            Stmt::While { label, cond, body } => {
                let cond = self.expr(ctx, cond)?;
                let head = match label {
                    Some(label) => format!(
                        "{}: while ({cond})",
                        self.names.local_identifier(label)
                    ),
                    None => format!("while ({cond})"),
                };
                ctx.jumps.push(JumpTarget::Loop);
                w.block(&head, "", |w| self.stmt(ctx, w, body))?;
                ctx.jumps.pop();
            }
            Stmt::Break(Some(label)) => {
                w.line(format!("break {};", self.names.local_identifier(label)));
            }
            Stmt::Break(None) => match ctx.break_target() {
                Some(label) => w.line(format!("break {label};")),
                None => w.line("break;"),
            },
            Stmt::Continue(Some(label)) => {
                w.line(format!("continue {};", self.names.local_identifier(label)));
            }
            Stmt::Continue(None) => w.line("continue;"),
            Stmt::Switch {
                subject,
                cases,
                default,
            } => {
                let subject = self.expr(ctx, subject)?;
                if self.config.features.switch {
                    self.native_switch(ctx, w, &subject, cases, default)?;
                } else {
                    self.lowered_switch(ctx, w, &subject, cases, default)?;
                }
            }
            Stmt::Throw(e) => {
                let e = self.expr(ctx, e)?;
                w.line(format!("throw {e};"));
            }
            Stmt::TryCatch { body, catch } => {
                w.block("try", "", |w| self.stmt(ctx, w, body))?;
                w.block("catch (J__i__exception__)", "", |w| {
                    w.line(format!("{EXCEPTION} = J__i__exception__;"));
                    self.stmt(ctx, w, catch)
                })?;
            }
            Stmt::Rethrow => w.line("throw J__i__exception__;"),
        }
        Ok(())
    }

    fn native_switch(
        &mut self,
        ctx: &mut MethodCtx<'_>,
        w: &mut SourceWriter,
        subject: &str,
        cases: &[SwitchCase],
        default: &Stmt,
    ) -> Result<(), EmitError> {
        ctx.jumps.push(JumpTarget::Switch(None));
        w.block(&format!("switch ({subject})"), "", |w| {
            for case in cases {
                for value in &case.values {
                    w.line(format!("case {value}:"));
                }
                w.indented(|w| {
                    self.stmt(ctx, w, &case.body)?;
                    w.line("break;");
                    Ok::<(), EmitError>(())
                })?;
            }
            w.line("default:");
            w.indented(|w| {
                self.stmt(ctx, w, default)?;
                w.line("break;");
                Ok::<(), EmitError>(())
            })
        })?;
        ctx.jumps.pop();
        Ok(())
    }

    /// Labeled block holding an `if` chain over the evaluated subject.
    fn lowered_switch(
        &mut self,
        ctx: &mut MethodCtx<'_>,
        w: &mut SourceWriter,
        subject: &str,
        cases: &[SwitchCase],
        default: &Stmt,
    ) -> Result<(), EmitError> {
        let n = ctx.switches;
        ctx.switches += 1;
        let label = format!("J__switch{n}__");
        let temp = format!("J__switchv{n}__");

        ctx.jumps.push(JumpTarget::Switch(Some(label.clone())));
        w.block(&format!("{label}:"), "", |w| {
            w.line(format!("var {temp} = {subject};"));
            let mut first = true;
            for case in cases.iter().filter(|c| !c.values.is_empty()) {
                let cond: Vec<String> = case
                    .values
                    .iter()
                    .map(|v| format!("{temp} == {v}"))
                    .collect();
                let keyword = if first { "if" } else { "else if" };
                first = false;
                w.block(&format!("{keyword} ({})", cond.join(" || ")), "", |w| {
                    self.stmt(ctx, w, &case.body)
                })?;
            }
            if first {
                self.stmt(ctx, w, default)
            } else if !is_empty_stmt(default) {
                w.block("else", "", |w| self.stmt(ctx, w, default))
            } else {
                Ok(())
            }
        })?;
        ctx.jumps.pop();
        Ok(())
    }

    fn args(&mut self, ctx: &MethodCtx<'_>, args: &[Expr]) -> Result<String, EmitError> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            out.push(self.expr(ctx, arg)?);
        }
        Ok(out.join(", "))
    }

    /// `Declaring.<field>` for a static field reference.
    fn static_field(&mut self, field: &FieldRef) -> Result<String, EmitError> {
        let program = self.program;
        let declared = program
            .find_field(field)
            .ok_or_else(|| EmitError::UnresolvedField(field.clone()))?;
        let base = self.names.class_identifier(&declared.class);
        let access = member_access(&self.names.declared_field_identifier(declared)?);
        Ok(format!("{base}{access}"))
    }

    fn expr(&mut self, ctx: &MethodCtx<'_>, expr: &Expr) -> Result<String, EmitError> {
        let program = self.program;
        let out = match expr {
            Expr::Literal(lit) => self.literal(lit),
            Expr::Local(name) | Expr::Param(name) => self.names.local_identifier(name),
            Expr::This => "this".to_string(),
            Expr::CaughtException => EXCEPTION.to_string(),
            Expr::InstanceField { object, field } => {
                let object = self.expr(ctx, object)?;
                let access = member_access(&self.names.field_identifier(field)?);
                format!("{object}{access}")
            }
            Expr::StaticField(field) => self.static_field(field)?,
            Expr::Unary { op, kind, operand } => {
                let operand = self.expr(ctx, operand)?;
                coerce::unary(*op, *kind, &operand).ok_or_else(|| {
                    EmitError::malformed(format!("unary {op:?} is not defined for {kind:?}"))
                })?
            }
            Expr::Binary {
                op,
                kind,
                left,
                right,
            } => {
                let left = self.expr(ctx, left)?;
                let right = self.expr(ctx, right)?;
                coerce::binary(*op, *kind, &left, &right).ok_or_else(|| {
                    EmitError::malformed(format!("binary {op:?} is not defined for {kind:?}"))
                })?
            }
            Expr::Cast { value, from, to } => {
                let value = self.expr(ctx, value)?;
                coerce::convert(&value, from, to).ok_or_else(|| {
                    EmitError::malformed(format!(
                        "can't convert {} to {}",
                        from.desc(),
                        to.desc()
                    ))
                })?
            }
            Expr::InstanceOf { value, ty } => {
                let value = self.expr(ctx, value)?;
                self.instance_of(&value, ty)
            }
            Expr::CheckCast { value, .. } => format!("({})", self.expr(ctx, value)?),
            Expr::CallStatic { method, args } if is_raw_call(method) => {
                self.raw_call(ctx, expr, method, args)?
            }
            Expr::CallStatic { method, args } => {
                let resolved = program
                    .resolve_method(method)
                    .ok_or_else(|| EmitError::UnresolvedMethod(method.clone()))?;
                let base = self.names.class_identifier(&resolved.class);
                let access = member_access(&self.names.method_ref_identifier(method)?);
                let args = self.args(ctx, args)?;
                format!("{base}{access}({args})")
            }
            Expr::CallInstance {
                object,
                method,
                args,
            } => {
                let object = self.expr(ctx, object)?;
                let access = member_access(&self.names.method_ref_identifier(method)?);
                let args = self.args(ctx, args)?;
                format!("{object}{access}({args})")
            }
            Expr::CallSuper {
                object,
                method,
                args,
            } => {
                let target = program
                    .find_method(&method.class, &method.name, &method.desc())
                    .ok_or_else(|| EmitError::UnresolvedSuperCall {
                        class: ctx.class.name.clone(),
                        method: method.clone(),
                    })?;
                let base = format!("{}.prototype", self.names.class_identifier(&target.class));
                let access = member_access(&self.names.method_identifier(target));
                let mut call_args = vec![self.expr(ctx, object)?];
                for arg in args {
                    call_args.push(self.expr(ctx, arg)?);
                }
                format!("{base}{access}.call({})", call_args.join(", "))
            }
            Expr::New { class, ctor, args } => {
                let base = self.names.class_identifier(class);
                let access = member_access(&self.names.method_ref_identifier(ctor)?);
                let args = self.args(ctx, args)?;
                format!("new {base}(){access}({args})")
            }
            Expr::NewArray { ty, length } => {
                let length = self.expr(ctx, length)?;
                array_constructor(ty, &length)
            }
            Expr::ArrayLength(array) => format!("{}.length", self.expr(ctx, array)?),
            Expr::ArrayGet { array, index } => {
                let array = self.expr(ctx, array)?;
                let index = self.expr(ctx, index)?;
                format!("({array}.data[{index}])")
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                let cond = self.expr(ctx, cond)?;
                let then = self.expr(ctx, then)?;
                let otherwise = self.expr(ctx, otherwise)?;
                format!("({cond} ? {then} : {otherwise})")
            }
        };
        Ok(out)
    }

    /// Interfaces are answered by the class-id table, classes by the prototype chain.
    fn instance_of(&self, value: &str, ty: &Type) -> String {
        match ty {
            Type::Ref(name) => match self.program.class(name) {
                Some(class) if class.is_interface() => {
                    format!("N.isClassId({value}, {})", class.class_id)
                }
                _ => format!("({value} instanceof {})", self.names.class_identifier(name)),
            },
            other => format!("N.is({value}, {})", quote(&other.desc())),
        }
    }

    /// Templated target text from a `*_raw` call, wrapped per result kind.
    fn raw_call(
        &mut self,
        ctx: &MethodCtx<'_>,
        expr: &Expr,
        method: &MethodRef,
        args: &[Expr],
    ) -> Result<String, EmitError> {
        let Some(Expr::Literal(Literal::String(text))) = args.first() else {
            return Err(EmitError::RawCallArgument {
                expr: format!("{expr:?}"),
                context: ctx.describe(),
            });
        };
        let base = self.templater.render(text, "rawCall")?;
        Ok(match method.name.as_str() {
            "z_raw" => format!("(!!({base}))"),
            "i_raw" => format!("(({base})|0)"),
            "d_raw" => format!("(+({base}))"),
            "s_raw" => format!("N.str({base})"),
            _ => base,
        })
    }
}
