//! Class emission.
//!
//! Per class, in order: constructor function, prototype linkage, instance
//! defaults on the prototype, class-id tables, static initializer, methods.

use kiln_core::{Class, Field};

use super::emitter::OBJECT_BASE;
use super::writer::SourceWriter;
use super::{EmitError, Emitter};
use crate::naming::member_access;

/// Fields initialized per instance inside the constructor function.
///
/// Never true: every instance default lives on the shared prototype.
fn late_init_field(_field: &Field) -> bool {
    false
}

impl Emitter<'_> {
    /// Emit one class to text.
    pub fn emit_class(&mut self, class: &Class) -> Result<String, EmitError> {
        Ok(self.write_class(class)?.to_string())
    }

    pub(super) fn write_class(&mut self, class: &Class) -> Result<SourceWriter, EmitError> {
        let program = self.program;
        let mut w = SourceWriter::new();
        if class.is_abstract() {
            w.line("// ABSTRACT");
        }

        let base = self.names.class_identifier(&class.name);
        let parent = match &class.extending {
            Some(parent) if program.class(parent).is_none() => {
                return Err(EmitError::UnresolvedClass(parent.clone()));
            }
            Some(parent) => self.names.class_identifier(parent),
            None => OBJECT_BASE.to_string(),
        };

        let mut instance_fields: Vec<&Field> =
            class.fields.iter().filter(|f| !f.is_static).collect();
        for ancestor in program.ancestors(class) {
            instance_fields.extend(ancestor.fields.iter().filter(|f| !f.is_static));
        }
        let (per_instance, per_prototype): (Vec<&Field>, Vec<&Field>) = instance_fields
            .into_iter()
            .partition(|f| late_init_field(f));

        let mut ctor = Vec::with_capacity(per_instance.len());
        for field in per_instance {
            ctor.push(format!("this{};", self.field_assignment(field)?));
        }
        w.block(&format!("function {base}()"), "", |w| {
            for line in ctor {
                w.line(line);
            }
        });

        w.line(format!("{base}.prototype = Object.create({parent}.prototype);"));
        w.line(format!("{base}.prototype.constructor = {base};"));
        for field in per_prototype {
            let assignment = self.field_assignment(field)?;
            w.line(format!("{base}.prototype{assignment};"));
        }

        let ids: Vec<String> = program
            .related_types(class)?
            .iter()
            .map(|c| c.class_id.to_string())
            .collect();
        w.line(format!("{base}.prototype.$$CLASS_ID = {};", class.class_id));
        w.line(format!("{base}.prototype.$$CLASS_IDS = [{}];", ids.join(",")));

        self.write_static_init(&mut w, class, &base)?;

        for method in class.methods.iter().filter(|m| m.is_init()) {
            let method = self.write_method(class, method)?;
            w.append(method);
        }
        for method in class.methods.iter().filter(|m| !m.is_init()) {
            let method = self.write_method(class, method)?;
            w.append(method);
        }
        Ok(w)
    }

    /// `<access> = <default>` for a field.
    fn field_assignment(&mut self, field: &Field) -> Result<String, EmitError> {
        let access = member_access(&self.names.declared_field_identifier(field)?);
        let value = self.literal(&field.constant_value());
        Ok(format!("{access} = {value}"))
    }

    /// Self-disarming static initializer.
    ///
    /// The first call rebinds the slot to a no-op, so re-entry during
    /// initialization observes a partially initialized class. The static
    /// constructor runs before and again after the constant defaults.
    fn write_static_init(
        &mut self,
        w: &mut SourceWriter,
        class: &Class,
        base: &str,
    ) -> Result<(), EmitError> {
        let slot = self.names.static_init_identifier(&class.name);
        let clinit = class.static_constructor();
        if !class.has_static_fields() && clinit.is_none() {
            w.line(format!("{slot} = N.EMPTY_FUNCTION;"));
            return Ok(());
        }

        let clinit_call =
            clinit.map(|m| format!("{base}{}();", member_access(&self.names.method_identifier(m))));
        let mut defaults = Vec::new();
        for field in class.fields.iter().filter(|f| f.is_static) {
            let assignment = self.field_assignment(field)?;
            defaults.push(format!("{base}{assignment};"));
        }

        w.block(&format!("{slot} = function()"), ";", |w| {
            w.line(format!("{slot} = N.EMPTY_FUNCTION;"));
            if let Some(call) = &clinit_call {
                w.line(call);
            }
            for line in defaults {
                w.line(line);
            }
            if let Some(call) = &clinit_call {
                w.line(call);
            }
        });
        Ok(())
    }
}
