//! Method body selection.
//!
//! A method slot receives one of: the generated body, a native body
//! registered for the active target, or a stub trapping at call time.
//! Guarded native bodies become an `if`/`else if`/`else` chain evaluated
//! once, when the class is defined; each branch binds the slot to a
//! function value, so calls never re-check the guard.

use indexmap::IndexMap;
use kiln_core::{Class, Method};
use tracing::warn;

use super::writer::SourceWriter;
use super::{EmitError, Emitter};
use crate::naming::member_access;

impl Emitter<'_> {
    /// `Class` for static members, `Class.prototype` otherwise.
    pub(super) fn member_base(&self, class: &Class, is_static: bool) -> String {
        let base = self.names.class_identifier(&class.name);
        if is_static {
            base
        } else {
            format!("{base}.prototype")
        }
    }

    /// Emit one method to text.
    pub fn emit_method(&mut self, class: &Class, method: &Method) -> Result<String, EmitError> {
        Ok(self.write_method(class, method)?.to_string())
    }

    /// Emit the slot assignment(s) for one method.
    ///
    /// Recoverable lowering failures leave a marker comment and a stub.
    pub(super) fn write_method(
        &mut self,
        class: &Class,
        method: &Method,
    ) -> Result<SourceWriter, EmitError> {
        let prefix = format!(
            "{}{}",
            self.member_base(class, method.is_static),
            member_access(&self.names.method_identifier(method))
        );

        match self.method_branches(class, method, &prefix) {
            Ok(w) => Ok(w),
            Err(err) if err.is_recoverable() => {
                warn!(
                    class = %class.name,
                    method = %method.name,
                    desc = %method.desc(),
                    error = %err,
                    "method body replaced by stub"
                );
                let mut w = SourceWriter::new();
                w.line(format!(
                    "// Errored method: {}.{} :: {} :: {err};",
                    class.name,
                    method.name,
                    method.desc()
                ));
                w.append(self.render_branch(method, &prefix, None));
                Ok(w)
            }
            Err(err) => Err(err),
        }
    }

    fn method_branches(
        &mut self,
        class: &Class,
        method: &Method,
        prefix: &str,
    ) -> Result<SourceWriter, EmitError> {
        let config = self.config;
        // Keyed by guard; a later registration for the same guard wins.
        let mut natives: IndexMap<&str, &str> = IndexMap::new();
        for native in method.native_bodies_for(&config.target) {
            natives.insert(&native.cond, &native.body);
        }

        let mut w = SourceWriter::new();
        if natives.is_empty() {
            let body = self.generated_body(class, method)?;
            w.append(self.render_branch(method, prefix, body));
            return Ok(w);
        }

        let fallback = match natives.get("") {
            Some(text) => self.native_body(text)?,
            None => self.generated_body(class, method)?.unwrap_or_default(),
        };

        let mut guarded = Vec::new();
        for (cond, text) in natives.iter().filter(|(cond, _)| !cond.is_empty()) {
            guarded.push((*cond, self.native_body(text)?));
        }

        if guarded.is_empty() {
            w.append(self.render_branch(method, prefix, Some(fallback)));
            return Ok(w);
        }

        for (i, (cond, body)) in guarded.into_iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "else if" };
            let branch = self.render_branch(method, prefix, Some(body));
            w.block(&format!("{keyword} ({cond})"), "", |w| w.append(branch));
        }
        let branch = self.render_branch(method, prefix, Some(fallback));
        w.block("else", "", |w| w.append(branch));
        Ok(w)
    }

    /// The method's own body, or the body it shares with another method.
    fn generated_body(
        &mut self,
        class: &Class,
        method: &Method,
    ) -> Result<Option<SourceWriter>, EmitError> {
        let program = self.program;
        let body = match (&method.body, &method.body_ref) {
            (Some(body), _) => Some(body),
            (None, Some(shared)) => program
                .resolve_method(shared)
                .and_then(|owner| owner.body.as_ref()),
            (None, None) => None,
        };
        body.map(|body| self.lower_body(class, method, body))
            .transpose()
    }

    fn native_body(&self, text: &str) -> Result<SourceWriter, EmitError> {
        let mut w = SourceWriter::new();
        w.line(self.templater.render(text, "nativeBody")?);
        Ok(w)
    }

    /// `prefix = function(args) { .. };` or the no-body stub.
    fn render_branch(&self, method: &Method, prefix: &str, body: Option<SourceWriter>) -> SourceWriter {
        let mut w = SourceWriter::new();
        match body {
            Some(body) => {
                let args: Vec<String> = method
                    .ty
                    .args
                    .iter()
                    .map(|p| self.names.local_identifier(&p.name))
                    .collect();
                w.block(
                    &format!("{prefix} = function({})", args.join(", ")),
                    ";",
                    |w| {
                        w.append(body);
                        if method.returns_this() {
                            w.line("return this;");
                        }
                    },
                );
            }
            None => w.line(format!(
                "{prefix} = function() {{ N.methodWithoutBody('{prefix}') }};"
            )),
        }
        w
    }
}
