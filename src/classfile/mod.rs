//! JVM class-file reader.
//!
//! [`ClassFile`] parses the binary class format into owned structures and resolves them into a
//! [`ClassModel`], which is what the assembler consumes. Only the parts needed to describe a
//! class are decoded: the constant pool, the class header, fields, methods and the
//! `ConstantValue`, `SourceFile`, `Code` and `LocalVariableTable` attributes. Every other
//! attribute is skipped by length.
//!
//! # Layout
//!
//! ```text
//! u4 magic (0xCAFEBABE)  u2 minor  u2 major
//! constant pool
//! u2 access_flags  u2 this_class  u2 super_class
//! interfaces, fields, methods, attributes
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use jvmscope::ClassFile;
//! use std::path::Path;
//!
//! let class = ClassFile::from_file(Path::new("Widget.class"))?;
//! let model = class.model()?;
//! println!("{} extends {}", model.class_name, model.superclass_name);
//! # Ok::<(), jvmscope::Error>(())
//! ```
//!
//! # References
//!
//! - The Java Virtual Machine Specification, Chapter 4 - The class File Format

pub mod attributes;
pub mod constpool;
pub mod members;

use std::path::{Path, PathBuf};

use crate::{
    access::AccessFlags,
    classfile::{attributes::Attribute, constpool::ConstantPool, members::MemberInfo},
    file::{parser::Parser, File},
    model::{placeholder_names, ClassModel, FieldModel, MethodModel},
    signatures::decode_signature,
    Error::{Empty, NotSupported},
    Result,
};

/// Class-file magic number
pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Superclass reported for classes whose `super_class` index is 0
pub const DEFAULT_SUPERCLASS: &str = "java.lang.Object";

/// A parsed class file
#[derive(Debug, Clone)]
pub struct ClassFile {
    /// Minor format version
    pub minor_version: u16,
    /// Major format version (52 = Java 8)
    pub major_version: u16,
    /// The constant pool
    pub constant_pool: ConstantPool,
    /// Raw class access mask
    pub access_flags: u16,
    /// Dotted name of this class
    pub this_class: String,
    /// Dotted name of the superclass; `None` only for `java.lang.Object` itself
    pub super_class: Option<String>,
    /// Dotted names of the direct interfaces
    pub interfaces: Vec<String>,
    /// Declared fields
    pub fields: Vec<MemberInfo>,
    /// Declared methods
    pub methods: Vec<MemberInfo>,
    /// Class attributes
    pub attributes: Vec<Attribute>,
    path: Option<PathBuf>,
}

impl ClassFile {
    /// Load and parse a class file from disk
    ///
    /// ## Arguments
    /// * 'path' - Path to the `.class` file
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file can't be read, and any parse error of
    /// [`ClassFile::parse`].
    pub fn from_file(path: &Path) -> Result<ClassFile> {
        let file = File::from_file(path)?;
        let mut class = Self::parse(file.data())?;
        class.path = Some(path.to_path_buf());
        Ok(class)
    }

    /// Parse a class file from an owned buffer
    ///
    /// # Errors
    /// See [`ClassFile::parse`].
    pub fn from_mem(data: Vec<u8>) -> Result<ClassFile> {
        let file = File::from_mem(data)?;
        Self::parse(file.data())
    }

    /// Parse a class file from raw bytes
    ///
    /// ## Arguments
    /// * 'data' - The complete class file
    ///
    /// # Errors
    /// - [`crate::Error::Empty`] for empty input
    /// - [`crate::Error::NotSupported`] if the magic number is wrong
    /// - [`crate::Error::OutOfBounds`] for truncated input
    /// - [`crate::Error::Malformed`] for structural damage
    pub fn parse(data: &[u8]) -> Result<ClassFile> {
        if data.is_empty() {
            return Err(Empty);
        }

        let mut parser = Parser::new(data);
        if parser.read_be::<u32>().ok() != Some(CLASS_MAGIC) {
            return Err(NotSupported);
        }

        let minor_version = parser.read_be::<u16>()?;
        let major_version = parser.read_be::<u16>()?;
        let constant_pool = ConstantPool::parse(&mut parser)?;

        let access_flags = parser.read_be::<u16>()?;
        let this_class = constant_pool.class_name(parser.read_be::<u16>()?)?;
        let super_class = match parser.read_be::<u16>()? {
            0 => None,
            index => Some(constant_pool.class_name(index)?),
        };

        let interface_count = parser.read_be::<u16>()?;
        let mut interfaces = Vec::with_capacity(interface_count as usize);
        for _ in 0..interface_count {
            interfaces.push(constant_pool.class_name(parser.read_be::<u16>()?)?);
        }

        let fields = MemberInfo::parse_table(&mut parser, &constant_pool)?;
        let methods = MemberInfo::parse_table(&mut parser, &constant_pool)?;
        let attributes = Attribute::parse_table(&mut parser, &constant_pool)?;

        if parser.has_more_data() {
            return Err(malformed_error!(
                "{} trailing bytes after the class attributes",
                parser.remaining().len()
            ));
        }

        log::debug!(
            "Parsed class {} (version {}.{}, {} constants, {} fields, {} methods)",
            this_class,
            major_version,
            minor_version,
            constant_pool.len(),
            fields.len(),
            methods.len()
        );

        Ok(ClassFile {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
            path: None,
        })
    }

    /// The file this class was loaded from, if it came from disk
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Value of the `SourceFile` attribute
    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attribute| match attribute {
            Attribute::SourceFile(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Resolve this class into a [`ClassModel`]
    ///
    /// Constant values are resolved from the pool, argument names are recovered from the
    /// `LocalVariableTable` where one exists and `arg<i>` is used otherwise.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for dangling constant pool references and
    /// [`crate::Error::MalformedSignature`] for malformed method descriptors.
    pub fn model(&self) -> Result<ClassModel> {
        let mut model = ClassModel::new(
            &self.this_class,
            self.super_class.as_deref().unwrap_or(DEFAULT_SUPERCLASS),
            self.access_flags,
        );
        model.source_file = self.source_file().map(str::to_string);
        model.interface_names.clone_from(&self.interfaces);

        for field in &self.fields {
            let mut resolved = FieldModel::new(&field.name, &field.descriptor, field.access_flags);
            if let Some(index) = field.constant_value_index() {
                resolved.constant_value = Some(self.constant_pool.literal(index)?);
            }
            model.fields.push(resolved);
        }

        for method in &self.methods {
            let resolved = MethodModel::new(&method.name, &method.descriptor, method.access_flags)?;
            let names = argument_names(method, &resolved.argument_signatures)?;
            model.methods.push(resolved.with_argument_names(names));
        }

        Ok(model)
    }
}

/// Recover argument names from the local variable table
///
/// Arguments occupy the first local slots, after `this` for instance methods; `long` and
/// `double` take two slots each.
fn argument_names(method: &MemberInfo, argument_signatures: &[String]) -> Result<Vec<String>> {
    let Some(code) = method.code().filter(|code| !code.local_variables.is_empty()) else {
        return Ok(placeholder_names(argument_signatures.len()));
    };

    let flags = AccessFlags::from_bits_retain(method.access_flags);
    let mut slot: u16 = if flags.contains(AccessFlags::STATIC) { 0 } else { 1 };
    let mut names = Vec::with_capacity(argument_signatures.len());
    for (position, signature) in argument_signatures.iter().enumerate() {
        let name = code
            .local_variables
            .iter()
            .find(|variable| variable.index == slot && variable.start_pc == 0)
            .map_or_else(|| format!("arg{position}"), |variable| variable.name.clone());
        names.push(name);

        slot = slot.saturating_add(decode_signature(signature)?.slot_size());
    }
    Ok(names)
}
