//! Rendering of emission records as builder-API source code.
//!
//! The [`Emitter`] trait is the seam between the language-neutral records produced by
//! [`crate::assembler::assemble`] and a concrete output language. [`BcelEmitter`] renders a
//! complete Java program that reconstructs the class with Apache BCEL's `ClassGen`,
//! `FieldGen` and `MethodGen`.
//!
//! The `render_*` functions hold the expression rules shared by every BCEL statement:
//!
//! | Value                  | Rendering                                   |
//! |------------------------|---------------------------------------------|
//! | flags                  | `ACC_PUBLIC \| ACC_FINAL`, or `0`           |
//! | primitive              | `Type.INT`                                  |
//! | well-known alias       | `Type.STRING`                               |
//! | array                  | `new ArrayType(Type.INT, 2)`                |
//! | other reference        | `new ObjectType("com.example.Foo")`         |
//! | no arguments           | `Type.NO_ARGS`                              |
//! | arguments              | `new Type[] { Type.INT, Type.STRING }`      |
//!
//! # Examples
//!
//! ```rust
//! use jvmscope::{
//!     emitter::{bcelify, EmitterConfig},
//!     model::{ClassModel, MethodModel},
//! };
//!
//! let mut model = ClassModel::new("com.example.Widget", "java.lang.Object", 0x0021);
//! model.methods.push(MethodModel::new("doIt", "()V", 0x0001)?);
//!
//! let mut out = Vec::new();
//! bcelify(&model, &mut out, &EmitterConfig::default())?;
//!
//! let program = String::from_utf8(out).unwrap();
//! assert!(program.contains("public class WidgetCreator implements Constants"));
//! assert!(program.contains("Type.VOID, Type.NO_ARGS"));
//! # Ok::<(), jvmscope::Error>(())
//! ```

mod bcel;

pub use bcel::BcelEmitter;

use std::io::Write;

use crate::{
    access::AccessFlagSet,
    assembler::{assemble, EmissionRecord},
    model::ClassModel,
    signatures::TypeExpr,
    utils::quote_java_string,
    Result,
};

/// Default suffix appended to the class name to name the generated program
pub const DEFAULT_CREATOR_SUFFIX: &str = "Creator";

/// Serializes an ordered record sequence.
///
/// The sequence starts with exactly one [`EmissionRecord::ClassHeader`], followed by field
/// and method records in the order the assembler produced them.
pub trait Emitter {
    /// Render `records`
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidRecords`] for a sequence that does not start with a
    /// single class header and [`crate::Error::FileError`] if writing fails.
    fn emit(&mut self, records: &[EmissionRecord]) -> Result<()>;
}

/// Options for the generated builder program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Appended to the simple class name, `Widget` + `Creator`
    pub creator_suffix: String,
    /// Whether to write a `main` method that dumps the class to `<name>.class`
    pub emit_main: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        EmitterConfig {
            creator_suffix: DEFAULT_CREATOR_SUFFIX.to_string(),
            emit_main: true,
        }
    }
}

/// Assemble `model` and write the BCEL builder program to `writer`
///
/// ## Arguments
/// * 'model'  - The class to describe
/// * 'writer' - Destination of the Java source
/// * 'config' - Output options
///
/// # Errors
/// Returns any error of [`assemble`], or [`crate::Error::FileError`] if writing fails.
pub fn bcelify<W: Write>(model: &ClassModel, writer: W, config: &EmitterConfig) -> Result<()> {
    let records = assemble(model)?;
    let mut emitter = BcelEmitter::new(writer, config.clone());
    emitter.emit(&records)
}

/// `ACC_X | ACC_Y`, or `0` for the zero sentinel
#[must_use]
pub fn render_flags(flags: &AccessFlagSet) -> String {
    match flags {
        AccessFlagSet::Zero => "0".to_string(),
        AccessFlagSet::Flags(flags) => flags
            .iter()
            .map(|flag| flag.constant_name())
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// BCEL expression for a type
#[must_use]
pub fn render_type(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Primitive(kind) => format!("Type.{kind}"),
        TypeExpr::WellKnownAlias(alias) => format!("Type.{alias}"),
        TypeExpr::ArrayOf {
            element,
            dimensions,
        } => format!("new ArrayType({}, {dimensions})", render_type(element)),
        TypeExpr::ObjectRef(name) => format!("new ObjectType({})", quote_java_string(name)),
    }
}

/// `Type.NO_ARGS` or `new Type[] { ... }`
#[must_use]
pub fn render_argument_types(arguments: &[TypeExpr]) -> String {
    if arguments.is_empty() {
        return "Type.NO_ARGS".to_string();
    }

    let rendered: Vec<String> = arguments.iter().map(render_type).collect();
    format!("new Type[] {{ {} }}", rendered.join(", "))
}

/// `new String[] { "a", "b" }`
#[must_use]
pub fn render_string_array(values: &[String]) -> String {
    if values.is_empty() {
        return "new String[] {}".to_string();
    }

    let quoted: Vec<String> = values.iter().map(|value| quote_java_string(value)).collect();
    format!("new String[] {{ {} }}", quoted.join(", "))
}
