use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use jvmscope::emitter::{bcelify, EmitterConfig};
use serde::Serialize;

use crate::{app::GlobalOptions, commands::common::load_class, output::print_output};

pub struct GenerateOptions<'a> {
    pub output: Option<&'a Path>,
    pub suffix: &'a str,
    pub emit_main: bool,
    pub global: &'a GlobalOptions,
}

#[derive(Debug, Serialize)]
struct GenerateResult {
    class: String,
    creator: String,
    output: String,
    fields: usize,
    methods: usize,
}

pub fn run(target: &str, opts: &GenerateOptions) -> anyhow::Result<()> {
    let model = load_class(target, opts.global)?;
    let config = EmitterConfig {
        creator_suffix: opts.suffix.to_string(),
        emit_main: opts.emit_main,
    };

    match opts.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?;
            bcelify(&model, BufWriter::new(file), &config)
                .with_context(|| format!("failed to generate creator for {}", model.class_name))?;

            let result = GenerateResult {
                class: model.class_name.clone(),
                creator: format!("{}{}", model.simple_name(), config.creator_suffix),
                output: path.display().to_string(),
                fields: model.fields.len(),
                methods: model.methods.len(),
            };
            print_output(&result, opts.global, |result| {
                log::info!(
                    "Wrote {} ({} fields, {} methods) to {}",
                    result.creator,
                    result.fields,
                    result.methods,
                    result.output
                );
            })
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            bcelify(&model, &mut writer, &config)
                .with_context(|| format!("failed to generate creator for {}", model.class_name))?;
            writer.flush()?;
            Ok(())
        }
    }
}
