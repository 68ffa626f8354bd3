use std::io::Write;

use crate::{
    assembler::{ClassHeader, EmissionRecord, FieldDecl, MethodSkeleton},
    emitter::{
        render_argument_types, render_flags, render_string_array, render_type, Emitter,
        EmitterConfig,
    },
    utils::quote_java_string,
    Error, Result,
};

const IMPORTS: [&str; 4] = [
    "org.apache.bcel.generic.*",
    "org.apache.bcel.classfile.*",
    "org.apache.bcel.*",
    "java.io.*",
];

/// Writes a `<Name>Creator` Java program that rebuilds the class with BCEL.
///
/// The program has a constructor creating the `ClassGen`, one `createFields()` method, one
/// `createMethod_<i>()` per method, a `create(OutputStream)` entry point calling them in
/// order and, optionally, a `main`. Method bodies are empty instruction lists.
pub struct BcelEmitter<W: Write> {
    writer: W,
    config: EmitterConfig,
}

impl<W: Write> BcelEmitter<W> {
    /// Create an emitter writing to `writer`
    pub fn new(writer: W, config: EmitterConfig) -> Self {
        BcelEmitter { writer, config }
    }

    /// Consume the emitter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn creator_name(&self, header: &ClassHeader) -> String {
        format!("{}{}", header.name, self.config.creator_suffix)
    }

    fn format_header(&mut self, header: &ClassHeader) -> Result<()> {
        let creator = self.creator_name(header);
        let w = &mut self.writer;
        if let Some(package) = &header.package {
            writeln!(w, "package {package};")?;
            writeln!(w)?;
        }
        for import in IMPORTS {
            writeln!(w, "import {import};")?;
        }
        writeln!(w)?;

        writeln!(w, "public class {creator} implements Constants {{")?;
        writeln!(w, "  private InstructionFactory _factory;")?;
        writeln!(w, "  private ConstantPoolGen    _cp;")?;
        writeln!(w, "  private ClassGen           _cg;")?;
        writeln!(w)?;
        writeln!(w, "  public {creator}() {{")?;
        writeln!(
            w,
            "    _cg = new ClassGen({}, {}, {}, {}, {});",
            quote_java_string(&header.qualified_name()),
            quote_java_string(&header.super_name),
            quote_java_string(header.source_file.as_deref().unwrap_or("<Unknown>")),
            render_flags(&header.flags),
            render_string_array(&header.interfaces)
        )?;
        writeln!(w)?;
        writeln!(w, "    _cp = _cg.getConstantPool();")?;
        writeln!(w, "    _factory = new InstructionFactory(_cg, _cp);")?;
        writeln!(w, "  }}")?;
        writeln!(w)?;
        Ok(())
    }

    fn format_create(&mut self, has_fields: bool, methods: &[&MethodSkeleton]) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "  public void create(OutputStream out) throws IOException {{")?;
        if has_fields {
            writeln!(w, "    createFields();")?;
        }
        for method in methods {
            writeln!(w, "    createMethod_{}();", method.index)?;
        }
        writeln!(w, "    _cg.getJavaClass().dump(out);")?;
        writeln!(w, "  }}")?;
        writeln!(w)?;
        Ok(())
    }

    fn format_fields(&mut self, fields: &[&FieldDecl]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let w = &mut self.writer;
        writeln!(w, "  private void createFields() {{")?;
        writeln!(w, "    FieldGen field;")?;
        for field in fields {
            writeln!(w)?;
            writeln!(
                w,
                "    field = new FieldGen({}, {}, {}, _cp);",
                render_flags(&field.flags),
                render_type(&field.field_type),
                quote_java_string(&field.name)
            )?;
            if let Some(value) = &field.constant_value {
                writeln!(w, "    field.setInitValue({value});")?;
            }
            writeln!(w, "    _cg.addField(field.getField());")?;
        }
        writeln!(w, "  }}")?;
        writeln!(w)?;
        Ok(())
    }

    fn format_method(&mut self, method: &MethodSkeleton) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "  private void createMethod_{}() {{", method.index)?;
        writeln!(w, "    InstructionList il = new InstructionList();")?;
        writeln!(
            w,
            "    MethodGen method = new MethodGen({}, {}, {}, {}, {}, {}, il, _cp);",
            render_flags(&method.flags),
            render_type(&method.return_type),
            render_argument_types(&method.arg_types),
            render_string_array(&method.arg_names),
            quote_java_string(&method.name),
            quote_java_string(&method.declaring_class)
        )?;
        writeln!(w)?;
        writeln!(w, "    method.setMaxStack();")?;
        writeln!(w, "    method.setMaxLocals();")?;
        writeln!(w, "    _cg.addMethod(method.getMethod());")?;
        writeln!(w, "    il.dispose();")?;
        writeln!(w, "  }}")?;
        writeln!(w)?;
        Ok(())
    }

    fn format_main(&mut self, header: &ClassHeader) -> Result<()> {
        let creator = self.creator_name(header);
        let w = &mut self.writer;
        writeln!(w, "  public static void main(String[] args) throws Exception {{")?;
        writeln!(w, "    {creator} creator = new {creator}();")?;
        writeln!(
            w,
            "    creator.create(new FileOutputStream({}));",
            quote_java_string(&format!("{}.class", header.name))
        )?;
        writeln!(w, "  }}")?;
        Ok(())
    }
}

impl<W: Write> Emitter for BcelEmitter<W> {
    fn emit(&mut self, records: &[EmissionRecord]) -> Result<()> {
        let Some((EmissionRecord::ClassHeader(header), members)) = records.split_first() else {
            return Err(Error::InvalidRecords(
                "record sequence must start with a class header".to_string(),
            ));
        };

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        for record in members {
            match record {
                EmissionRecord::FieldDecl(field) => fields.push(field),
                EmissionRecord::MethodSkeleton(method) => methods.push(method),
                EmissionRecord::ClassHeader(other) => {
                    return Err(Error::InvalidRecords(format!(
                        "second class header '{}' after '{}'",
                        other.name, header.name
                    )))
                }
            }
        }

        self.format_header(header)?;
        self.format_create(!fields.is_empty(), &methods)?;
        self.format_fields(&fields)?;
        for method in methods {
            self.format_method(method)?;
        }
        if self.config.emit_main {
            self.format_main(header)?;
        }
        writeln!(self.writer, "}}")?;
        self.writer.flush()?;

        log::debug!(
            "Emitted {} for {}",
            self.creator_name(header),
            header.qualified_name()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assembler::assemble,
        test::{mixed_model, widget_model},
    };

    fn render(records: &[EmissionRecord], config: EmitterConfig) -> Result<String> {
        let mut emitter = BcelEmitter::new(Vec::new(), config);
        emitter.emit(records)?;
        Ok(String::from_utf8(emitter.into_inner()).unwrap())
    }

    #[test]
    fn widget_program() {
        let records = assemble(&widget_model()).unwrap();
        let program = render(&records, EmitterConfig::default()).unwrap();

        let expected = r#"package com.example;

import org.apache.bcel.generic.*;
import org.apache.bcel.classfile.*;
import org.apache.bcel.*;
import java.io.*;

public class WidgetCreator implements Constants {
  private InstructionFactory _factory;
  private ConstantPoolGen    _cp;
  private ClassGen           _cg;

  public WidgetCreator() {
    _cg = new ClassGen("com.example.Widget", "java.lang.Object", "Widget.java", ACC_PUBLIC | ACC_SUPER, new String[] {});

    _cp = _cg.getConstantPool();
    _factory = new InstructionFactory(_cg, _cp);
  }

  public void create(OutputStream out) throws IOException {
    createFields();
    createMethod_0();
    _cg.getJavaClass().dump(out);
  }

  private void createFields() {
    FieldGen field;

    field = new FieldGen(ACC_PUBLIC | ACC_FINAL, Type.INT, "x", _cp);
    _cg.addField(field.getField());
  }

  private void createMethod_0() {
    InstructionList il = new InstructionList();
    MethodGen method = new MethodGen(ACC_PUBLIC, Type.VOID, Type.NO_ARGS, new String[] {}, "doIt", "com.example.Widget", il, _cp);

    method.setMaxStack();
    method.setMaxLocals();
    _cg.addMethod(method.getMethod());
    il.dispose();
  }

  public static void main(String[] args) throws Exception {
    WidgetCreator creator = new WidgetCreator();
    creator.create(new FileOutputStream("Widget.class"));
  }
}
"#;
        assert_eq!(program, expected);
    }

    #[test]
    fn mixed_program() {
        let records = assemble(&mixed_model()).unwrap();
        let config = EmitterConfig {
            creator_suffix: "Builder".to_string(),
            emit_main: false,
        };
        let program = render(&records, config).unwrap();

        assert!(!program.starts_with("package"));
        assert!(program.contains("public class MixedBuilder implements Constants {"));
        assert!(program.contains(
            "new ClassGen(\"Mixed\", \"java.util.AbstractList\", \"<Unknown>\", \
             ACC_PUBLIC | ACC_SUPER | ACC_ABSTRACT, \
             new String[] { \"java.lang.Runnable\", \"java.io.Serializable\" });"
        ));
        assert!(program.contains("field.setInitValue(\"hi \\\"there\\\"\");"));
        assert!(program.contains("field.setInitValue(8589934592L);"));
        assert!(program.contains("new FieldGen(0, new ObjectType(\"com.example.Owner\"), \"owner\", _cp);"));
        assert!(program.contains("new FieldGen(ACC_PRIVATE, new ArrayType(Type.INT, 2), \"grid\", _cp);"));
        assert!(program.contains(
            "new MethodGen(ACC_PUBLIC | ACC_STATIC, Type.OBJECT, \
             new Type[] { new ArrayType(Type.STRING, 1), Type.STRINGBUFFER }, \
             new String[] { \"parts\", \"out\" }, \"join\", \"Mixed\", il, _cp);"
        ));
        assert!(program.contains(
            "new MethodGen(ACC_PUBLIC | ACC_SYNCHRONIZED | ACC_ABSTRACT, Type.VOID"
        ));
        assert!(program.contains("createMethod_0();\n    createMethod_1();\n    createMethod_2();"));
        assert!(!program.contains("public static void main"));
        assert!(program.ends_with("}\n"));
    }

    #[test]
    fn no_fields_no_create_fields() {
        let mut model = widget_model();
        model.fields.clear();
        let program = render(&assemble(&model).unwrap(), EmitterConfig::default()).unwrap();

        assert!(!program.contains("createFields"));
    }

    #[test]
    fn rejects_invalid_sequences() {
        assert!(matches!(
            render(&[], EmitterConfig::default()),
            Err(Error::InvalidRecords(_))
        ));

        let records = assemble(&widget_model()).unwrap();
        let mut reordered = records.clone();
        reordered.swap(0, 1);
        assert!(matches!(
            render(&reordered, EmitterConfig::default()),
            Err(Error::InvalidRecords(_))
        ));

        let mut doubled = records.clone();
        doubled.push(records[0].clone());
        assert!(matches!(
            render(&doubled, EmitterConfig::default()),
            Err(Error::InvalidRecords(_))
        ));
    }
}
