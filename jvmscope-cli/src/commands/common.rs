use anyhow::Context;
use jvmscope::{model::ClassModel, ClassPath, ClassRepository};

use crate::app::GlobalOptions;

/// The repository for `--classpath`, falling back to `$CLASSPATH` and then `.`.
pub fn repository(opts: &GlobalOptions) -> ClassRepository {
    let class_path = match &opts.classpath {
        Some(value) => ClassPath::parse(value),
        None => ClassPath::from_env(),
    };
    log::debug!("Class path: {:?}", class_path.entries());
    ClassRepository::new(class_path)
}

/// Load a class by qualified name or `.class` path.
pub fn load_class(target: &str, opts: &GlobalOptions) -> anyhow::Result<ClassModel> {
    repository(opts)
        .load(target)
        .with_context(|| format!("failed to load class: {target}"))
}
