//! Whole-program emission: class ordering, fragments, string pool, bootstrap.

use std::collections::HashSet;

use kiln_core::{Class, ClassName, MethodRef, MethodType, Param, Program, Type};
use tracing::{debug, info};

use super::line_map::LineMapBuilder;
use super::writer::SourceWriter;
use super::{EmitError, EmitResult, Emitter, EntryPointInfo};
use crate::naming::member_access;

/// Emittable classes, each strictly after its superclass.
///
/// Stable: unrelated classes keep input order. Native classes are skipped
/// and impose no ordering.
pub fn sorted_by_extending(program: &Program) -> Vec<&Class> {
    let mut visited: HashSet<&ClassName> = HashSet::new();
    let mut order = Vec::with_capacity(program.classes().len());
    for class in program.classes().iter().filter(|c| !c.is_native) {
        visit(program, class, &mut visited, &mut order);
    }
    order
}

fn visit<'p>(
    program: &'p Program,
    class: &'p Class,
    visited: &mut HashSet<&'p ClassName>,
    order: &mut Vec<&'p Class>,
) {
    if !visited.insert(&class.name) {
        return;
    }
    if let Some(parent) = class.extending.as_ref().and_then(|p| program.class(p))
        && !parent.is_native
    {
        visit(program, parent, visited, order);
    }
    order.push(class);
}

fn main_ref(class: &ClassName) -> MethodRef {
    MethodRef::new(
        class.clone(),
        "main",
        MethodType::new(
            vec![Param::new("args", Type::array_of(Type::string()))],
            Type::Void,
        ),
    )
}

impl Emitter<'_> {
    /// Emit the whole program.
    pub fn emit_program(mut self) -> Result<EmitResult, EmitError> {
        let program = self.program;
        let config = self.config;

        let order = sorted_by_extending(program);
        let names: Vec<&str> = order.iter().map(|c| c.name.fqname()).collect();
        debug!(order = ?names, "class emission order");

        let mut classes = Vec::with_capacity(order.len());
        for class in order {
            let w = match &class.impl_code {
                Some(code) => {
                    let mut w = SourceWriter::new();
                    w.line(code);
                    w
                }
                None => self.write_class(class)?,
            };
            classes.push((class, w));
        }
        report_class_sizes(&classes);

        let entry = program.entrypoint();
        let main_class = program
            .class(entry)
            .ok_or_else(|| EmitError::UnresolvedClass(entry.clone()))?;
        let custom_main = program.custom_main(&config.target);
        let strategy = if custom_main.is_some() {
            "custom"
        } else {
            "default"
        };
        info!(strategy, entry = %entry, "entry point");

        let mut fragments = Vec::with_capacity(config.fragments.len());
        for fragment in &config.fragments {
            fragments.push(fragment.resolve(self.templater)?);
        }

        let mut out = SourceWriter::new();
        if config.debug {
            out.line(format!("//# sourceMappingURL={}", config.map_name()));
        }
        for (prepend, _) in &fragments {
            if let Some(text) = prepend {
                out.line(text);
            }
        }
        out.append(self.strings.emit());
        for (_, class) in classes {
            out.append(class);
        }

        out.line("__createJavaArrays();");
        out.line("__buildStrings();");
        out.line("N.linit();");
        out.line(self.names.static_init_call(entry));
        match custom_main {
            Some(text) => out.line(self.templater.render(text, "customMain")?),
            None => out.line(self.main_call(main_class)?),
        }

        for (_, append) in fragments.iter().rev() {
            if let Some(text) = append {
                out.line(text);
            }
        }

        let (source, marks) = out.render();
        debug!(strings = self.strings.len(), "string pool");
        let source_map = if config.debug {
            let map = LineMapBuilder::from_marks(&marks);
            debug!(entries = map.len(), "line map");
            Some(map.to_source_map(config.name())?)
        } else {
            None
        };

        Ok(EmitResult {
            source,
            source_map,
            entry_point: EntryPointInfo::new(entry),
        })
    }

    /// `Main["main([Ljava/lang/String;)V"](N.strArray(N.args()));`
    fn main_call(&self, main_class: &Class) -> Result<String, EmitError> {
        let reference = main_ref(&main_class.name);
        let main = main_class
            .method(&reference.name, &reference.desc())
            .filter(|m| m.is_static)
            .ok_or_else(|| EmitError::UnresolvedMethod(reference.clone()))?;
        Ok(format!(
            "{}{}(N.strArray(N.args()));",
            self.member_base(main_class, true),
            member_access(&self.names.method_identifier(main))
        ))
    }
}

/// Per-class emitted size, smallest first.
fn report_class_sizes(classes: &[(&Class, SourceWriter)]) {
    let mut sizes: Vec<(&str, usize)> = classes
        .iter()
        .map(|(class, w)| (class.name.fqname(), w.render().0.len()))
        .collect();
    sizes.sort_by_key(|&(_, size)| size);
    for (class, size) in sizes {
        info!(class, size, "class size");
    }
}
