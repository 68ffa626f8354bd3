use std::fmt;

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// The nine primitive kinds of the JVM, `void` included.
///
/// `Display` yields the builder API's constant name (`INT` for `Type.INT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[strum(serialize_all = "UPPERCASE")]
pub enum PrimitiveKind {
    /// `Z`
    Boolean,
    /// `C`
    Char,
    /// `F`
    Float,
    /// `D`
    Double,
    /// `B`
    Byte,
    /// `S`
    Short,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `V`
    Void,
}

impl PrimitiveKind {
    /// Look up the kind for a one-character signature code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<PrimitiveKind> {
        match code {
            b'Z' => Some(PrimitiveKind::Boolean),
            b'C' => Some(PrimitiveKind::Char),
            b'F' => Some(PrimitiveKind::Float),
            b'D' => Some(PrimitiveKind::Double),
            b'B' => Some(PrimitiveKind::Byte),
            b'S' => Some(PrimitiveKind::Short),
            b'I' => Some(PrimitiveKind::Int),
            b'J' => Some(PrimitiveKind::Long),
            b'V' => Some(PrimitiveKind::Void),
            _ => None,
        }
    }

    /// The one-character signature code.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Void => 'V',
        }
    }

    /// The Java source keyword (`int`, `void`, ...).
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Void => "void",
        }
    }

    /// Number of local variable slots a value of this kind occupies.
    #[must_use]
    pub fn slot_size(self) -> u16 {
        match self {
            PrimitiveKind::Long | PrimitiveKind::Double => 2,
            PrimitiveKind::Void => 0,
            _ => 1,
        }
    }
}

/// Reference types the builder API exposes as shorthand constants.
///
/// `Display` yields the constant name (`STRING` for `Type.STRING`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[strum(serialize_all = "UPPERCASE")]
pub enum WellKnownAlias {
    /// `java.lang.String`
    String,
    /// `java.lang.Object`
    Object,
    /// `java.lang.StringBuffer`
    StringBuffer,
}

impl WellKnownAlias {
    /// The dotted qualified class name this alias stands for.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            WellKnownAlias::String => "java.lang.String",
            WellKnownAlias::Object => "java.lang.Object",
            WellKnownAlias::StringBuffer => "java.lang.StringBuffer",
        }
    }

    /// Exact match of a dotted qualified class name against the alias table.
    #[must_use]
    pub fn from_class_name(name: &str) -> Option<WellKnownAlias> {
        WellKnownAlias::iter().find(|alias| alias.class_name() == name)
    }
}

/// A decoded type signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// One of the primitive kinds or `void`
    Primitive(PrimitiveKind),
    /// A reference type with a builder-API shorthand
    WellKnownAlias(WellKnownAlias),
    /// An array; `element` is never an array itself
    ArrayOf {
        /// The innermost component type
        element: Box<TypeExpr>,
        /// Number of array dimensions, at least 1
        dimensions: u8,
    },
    /// Any other reference type, by dotted qualified name
    ObjectRef(String),
}

impl TypeExpr {
    /// Returns `true` for `void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, TypeExpr::Primitive(PrimitiveKind::Void))
    }

    /// Number of local variable slots a value of this type occupies.
    #[must_use]
    pub fn slot_size(&self) -> u16 {
        match self {
            TypeExpr::Primitive(kind) => kind.slot_size(),
            _ => 1,
        }
    }

    /// Re-encode as a class-file signature string.
    ///
    /// Aliases encode as their class name, so `decode_signature(expr.to_signature())` yields
    /// `expr` again.
    #[must_use]
    pub fn to_signature(&self) -> String {
        match self {
            TypeExpr::Primitive(kind) => kind.code().to_string(),
            TypeExpr::WellKnownAlias(alias) => {
                format!("L{};", alias.class_name().replace('.', "/"))
            }
            TypeExpr::ArrayOf {
                element,
                dimensions,
            } => {
                format!(
                    "{}{}",
                    "[".repeat(*dimensions as usize),
                    element.to_signature()
                )
            }
            TypeExpr::ObjectRef(name) => format!("L{};", name.replace('.', "/")),
        }
    }
}

/// Java source spelling: `int`, `java.lang.String`, `com.example.Foo[][]`.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(kind) => f.write_str(kind.keyword()),
            TypeExpr::WellKnownAlias(alias) => f.write_str(alias.class_name()),
            TypeExpr::ArrayOf {
                element,
                dimensions,
            } => write!(f, "{}{}", element, "[]".repeat(*dimensions as usize)),
            TypeExpr::ObjectRef(name) => f.write_str(name),
        }
    }
}

/// A decoded method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Argument types in declaration order
    pub arguments: Vec<TypeExpr>,
    /// The return type, possibly `void`
    pub return_type: TypeExpr,
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.return_type)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str(")")
    }
}
