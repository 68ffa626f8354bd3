use jvmscope::{
    assembler::{assemble, EmissionRecord},
    emitter::render_type,
};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_class,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct FieldEntry {
    name: String,
    r#type: String,
    bcel_type: String,
    flags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    constant: Option<String>,
}

#[derive(Debug, Serialize)]
struct FieldsOutput {
    class: String,
    fields: Vec<FieldEntry>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct MethodEntry {
    index: usize,
    name: String,
    return_type: String,
    arguments: Vec<String>,
    flags: String,
}

#[derive(Debug, Serialize)]
struct MethodsOutput {
    class: String,
    methods: Vec<MethodEntry>,
    count: usize,
}

pub fn run_fields(target: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let model = load_class(target, opts)?;

    let fields: Vec<FieldEntry> = assemble(&model)?
        .into_iter()
        .filter_map(|record| match record {
            EmissionRecord::FieldDecl(field) => Some(FieldEntry {
                name: field.name,
                r#type: field.field_type.to_string(),
                bcel_type: render_type(&field.field_type),
                flags: field.flags.to_string(),
                constant: field.constant_value,
            }),
            _ => None,
        })
        .collect();

    let output = FieldsOutput {
        class: model.class_name,
        count: fields.len(),
        fields,
    };

    print_output(&output, opts, |output| {
        println!("{} ({} fields)", output.class, output.count);
        if output.fields.is_empty() {
            return;
        }

        let mut tw = TabWriter::new(&[
            ("Name", Align::Left),
            ("Type", Align::Left),
            ("Flags", Align::Left),
            ("Constant", Align::Left),
        ])
        .indent("  ");
        for field in &output.fields {
            tw.row(vec![
                field.name.clone(),
                field.r#type.clone(),
                field.flags.clone(),
                field.constant.clone().unwrap_or_default(),
            ]);
        }
        tw.print();
    })
}

pub fn run_methods(target: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let model = load_class(target, opts)?;

    let methods: Vec<MethodEntry> = assemble(&model)?
        .into_iter()
        .filter_map(|record| match record {
            EmissionRecord::MethodSkeleton(method) => Some(MethodEntry {
                index: method.index,
                name: method.name,
                return_type: method.return_type.to_string(),
                arguments: method
                    .arg_types
                    .iter()
                    .zip(&method.arg_names)
                    .map(|(ty, name)| format!("{ty} {name}"))
                    .collect(),
                flags: method.flags.to_string(),
            }),
            _ => None,
        })
        .collect();

    let output = MethodsOutput {
        class: model.class_name,
        count: methods.len(),
        methods,
    };

    print_output(&output, opts, |output| {
        println!("{} ({} methods)", output.class, output.count);
        if output.methods.is_empty() {
            return;
        }

        let mut tw = TabWriter::new(&[
            ("#", Align::Right),
            ("Flags", Align::Left),
            ("Method", Align::Left),
        ])
        .indent("  ");
        for method in &output.methods {
            tw.row(vec![
                method.index.to_string(),
                method.flags.clone(),
                format!(
                    "{} {}({})",
                    method.return_type,
                    method.name,
                    method.arguments.join(", ")
                ),
            ]);
        }
        tw.print();
    })
}
