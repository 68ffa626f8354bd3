use serde::Serialize;

use jvmscope::{
    access::{decode_access_flags, FlagRole},
    model::ClassModel,
};

use crate::{
    app::GlobalOptions,
    commands::common::load_class,
    output::{print_labeled, print_output},
};

#[derive(Debug, Serialize)]
pub struct ClassInfo {
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub superclass: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub access_flags: String,
    pub flags: Vec<String>,
    pub interfaces: Vec<String>,
    pub field_count: usize,
    pub method_count: usize,
}

impl ClassInfo {
    fn new(model: &ClassModel) -> anyhow::Result<Self> {
        let flags = decode_access_flags(model.access_flags, FlagRole::Class)?;

        Ok(ClassInfo {
            class: model.class_name.clone(),
            package: model.package_name().map(str::to_string),
            superclass: model.superclass_name.clone(),
            source_file: model.source_file.clone(),
            access_flags: format!("0x{:04X}", model.access_flags),
            flags: flags.symbols().into_iter().map(str::to_string).collect(),
            interfaces: model.interface_names.clone(),
            field_count: model.fields.len(),
            method_count: model.methods.len(),
        })
    }
}

pub fn run(target: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let model = load_class(target, opts)?;
    let info = ClassInfo::new(&model)?;

    print_output(&info, opts, |info| {
        let mut rows = vec![("Class", info.class.clone())];
        if let Some(package) = &info.package {
            rows.push(("Package", package.clone()));
        }
        rows.push(("Superclass", info.superclass.clone()));
        rows.push((
            "Source file",
            info.source_file.clone().unwrap_or_else(|| "<Unknown>".to_string()),
        ));
        rows.push((
            "Flags",
            format!("{} ({})", info.access_flags, info.flags.join(" | ")),
        ));
        rows.push(("Fields", info.field_count.to_string()));
        rows.push(("Methods", info.method_count.to_string()));
        print_labeled(&rows);

        if !info.interfaces.is_empty() {
            println!("\nInterfaces:");
            for interface in &info.interfaces {
                println!("  {interface}");
            }
        }
    })
}
