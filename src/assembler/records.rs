use crate::{access::AccessFlagSet, signatures::TypeExpr};

/// The class header: everything needed to construct the class generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    /// Simple class name, package stripped
    pub name: String,
    /// Package name; `None` for the default package
    pub package: Option<String>,
    /// Dotted qualified superclass name
    pub super_name: String,
    /// Source file name, if recorded
    pub source_file: Option<String>,
    /// Decoded class access flags (class role)
    pub flags: AccessFlagSet,
    /// Dotted qualified names of the direct interfaces
    pub interfaces: Vec<String>,
}

impl ClassHeader {
    /// Dotted qualified name, `package.name` or just `name`
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{package}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// One field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Decoded field type
    pub field_type: TypeExpr,
    /// Decoded access flags (member role)
    pub flags: AccessFlagSet,
    /// Textual literal of the constant value, e.g. `42` or `"text"`
    pub constant_value: Option<String>,
}

/// One method skeleton, body not included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSkeleton {
    /// Position among the class's methods, starting at 0
    pub index: usize,
    /// Method name
    pub name: String,
    /// Decoded return type
    pub return_type: TypeExpr,
    /// Decoded argument types
    pub arg_types: Vec<TypeExpr>,
    /// Argument names, same length as `arg_types`
    pub arg_names: Vec<String>,
    /// Decoded access flags (member role)
    pub flags: AccessFlagSet,
    /// Dotted qualified name of the declaring class
    pub declaring_class: String,
}

/// A language-neutral description of one group of builder statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionRecord {
    /// Always the first record
    ClassHeader(ClassHeader),
    /// One per field, declaration order
    FieldDecl(FieldDecl),
    /// One per method, declaration order
    MethodSkeleton(MethodSkeleton),
}
