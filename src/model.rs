//! The resolved class model handed to the assembler.
//!
//! A [`ClassModel`] is a read-only snapshot of one class: names are resolved, dotted, and all
//! type information is still in signature form. It is usually produced by
//! [`crate::ClassFile::model`] or [`crate::ClassRepository::lookup`], but it is plain data and
//! can be built by hand as well.
//!
//! # Examples
//!
//! ```rust
//! use jvmscope::model::{ClassModel, FieldModel};
//!
//! let mut model = ClassModel::new("com.example.Widget", "java.lang.Object", 0x0021);
//! model.fields.push(FieldModel::new("x", "I", 0x0011));
//!
//! assert_eq!(model.package_name(), Some("com.example"));
//! assert_eq!(model.simple_name(), "Widget");
//! ```

use std::fmt;

use crate::{
    signatures::split_method_descriptor,
    utils::{java_double_to_string, java_float_to_string, quote_java_string},
    Result,
};

/// Compile-time constant value of a field (`ConstantValue` attribute).
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantLiteral {
    /// `int`, `short`, `char`, `byte` and `boolean` constants
    Integer(i32),
    /// `long` constant
    Long(i64),
    /// `float` constant
    Float(f32),
    /// `double` constant
    Double(f64),
    /// `String` constant
    String(String),
}

/// Java source literal: `42`, `7L`, `1.5f`, `0.25`, `"text"`.
///
/// Non-finite floating point values use the wrapper class constants (`Double.NaN`).
impl fmt::Display for ConstantLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantLiteral::Integer(value) => write!(f, "{value}"),
            ConstantLiteral::Long(value) => write!(f, "{value}L"),
            ConstantLiteral::Float(value) => match non_finite_name(f64::from(*value)) {
                Some(name) => write!(f, "Float.{name}"),
                None => write!(f, "{}f", java_float_to_string(*value)),
            },
            ConstantLiteral::Double(value) => match non_finite_name(*value) {
                Some(name) => write!(f, "Double.{name}"),
                None => f.write_str(&java_double_to_string(*value)),
            },
            ConstantLiteral::String(value) => f.write_str(&quote_java_string(value)),
        }
    }
}

fn non_finite_name(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("POSITIVE_INFINITY")
    } else if value == f64::NEG_INFINITY {
        Some("NEGATIVE_INFINITY")
    } else {
        None
    }
}

/// One field of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldModel {
    /// Field name
    pub name: String,
    /// Field type signature, e.g. `I` or `Ljava/lang/String;`
    pub signature: String,
    /// Raw access mask
    pub access_flags: u16,
    /// Constant value, if the field has one
    pub constant_value: Option<ConstantLiteral>,
}

impl FieldModel {
    /// Create a field without constant value.
    #[must_use]
    pub fn new(name: &str, signature: &str, access_flags: u16) -> Self {
        FieldModel {
            name: name.to_string(),
            signature: signature.to_string(),
            access_flags,
            constant_value: None,
        }
    }

    /// Attach a constant value.
    #[must_use]
    pub fn with_constant(mut self, value: ConstantLiteral) -> Self {
        self.constant_value = Some(value);
        self
    }
}

/// One method of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodModel {
    /// Method name (`<init>` and `<clinit>` included)
    pub name: String,
    /// Complete method descriptor, e.g. `(I)V`
    pub descriptor: String,
    /// Raw access mask
    pub access_flags: u16,
    /// Return type signature
    pub return_signature: String,
    /// Argument type signatures in declaration order
    pub argument_signatures: Vec<String>,
    /// Argument names, one per argument; `arg<i>` where the class file had none
    pub argument_names: Vec<String>,
}

impl MethodModel {
    /// Create a method from its descriptor, naming arguments `arg0`, `arg1`, ...
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedSignature`] if the descriptor is malformed.
    pub fn new(name: &str, descriptor: &str, access_flags: u16) -> Result<Self> {
        let (argument_signatures, return_signature) = split_method_descriptor(descriptor)?;
        let argument_names = placeholder_names(argument_signatures.len());

        Ok(MethodModel {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags,
            return_signature,
            argument_signatures,
            argument_names,
        })
    }

    /// Replace the argument names.
    #[must_use]
    pub fn with_argument_names(mut self, names: Vec<String>) -> Self {
        self.argument_names = names;
        self
    }
}

/// Placeholder argument names, `arg0` to `arg<count-1>`.
#[must_use]
pub fn placeholder_names(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("arg{index}")).collect()
}

/// A fully resolved class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassModel {
    /// Dotted qualified class name, e.g. `com.example.Widget`
    pub class_name: String,
    /// Dotted qualified superclass name
    pub superclass_name: String,
    /// `SourceFile` attribute, if present
    pub source_file: Option<String>,
    /// Dotted qualified names of the direct interfaces
    pub interface_names: Vec<String>,
    /// Raw class access mask
    pub access_flags: u16,
    /// Fields in declaration order
    pub fields: Vec<FieldModel>,
    /// Methods in declaration order
    pub methods: Vec<MethodModel>,
}

impl ClassModel {
    /// Create a class without source file, interfaces or members.
    #[must_use]
    pub fn new(class_name: &str, superclass_name: &str, access_flags: u16) -> Self {
        ClassModel {
            class_name: class_name.to_string(),
            superclass_name: superclass_name.to_string(),
            source_file: None,
            interface_names: Vec::new(),
            access_flags,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// The package part of the class name; `None` for the default package.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.class_name
            .rsplit_once('.')
            .map(|(package, _)| package)
            .filter(|package| !package.is_empty())
    }

    /// The class name without its package.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        match self.package_name() {
            Some(package) => &self.class_name[package.len() + 1..],
            None => &self.class_name,
        }
    }
}
