use bitflags::bitflags;
use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Raw access mask of a class, field or method as stored in the class file.
    ///
    /// Several bits are shared between roles: `0x0020` is `ACC_SYNCHRONIZED` on methods
    /// and `ACC_SUPER` on classes, `0x0040`/`0x0080` are volatile/transient on fields and
    /// bridge/varargs on methods.
    pub struct AccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared private
        const PRIVATE = 0x0002;
        /// Declared protected
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final
        const FINAL = 0x0010;
        /// Declared synchronized (members)
        const SYNCHRONIZED = 0x0020;
        /// Declared volatile
        const VOLATILE = 0x0040;
        /// Declared transient
        const TRANSIENT = 0x0080;
        /// Declared native
        const NATIVE = 0x0100;
        /// Is an interface
        const INTERFACE = 0x0200;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Declared strictfp
        const STRICT = 0x0800;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
        /// Is an annotation type
        const ANNOTATION = 0x2000;
        /// Is an enum or enum constant
        const ENUM = 0x4000;
    }
}

impl AccessFlags {
    /// `ACC_SUPER`, the class-level meaning of the synchronized bit.
    pub const SUPER: AccessFlags = AccessFlags::SYNCHRONIZED;
}

/// Which kind of entity an access mask belongs to.
///
/// The role decides how shared bit positions are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagRole {
    /// The mask of a class header
    Class,
    /// The mask of a field or method
    Member,
}

/// Symbolic name of one access flag, as understood by the builder API (`ACC_<name>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum AccessFlag {
    /// `ACC_PUBLIC`
    Public,
    /// `ACC_PRIVATE`
    Private,
    /// `ACC_PROTECTED`
    Protected,
    /// `ACC_STATIC`
    Static,
    /// `ACC_FINAL`
    Final,
    /// `ACC_SYNCHRONIZED`
    Synchronized,
    /// `ACC_VOLATILE`
    Volatile,
    /// `ACC_TRANSIENT`
    Transient,
    /// `ACC_NATIVE`
    Native,
    /// `ACC_INTERFACE`
    Interface,
    /// `ACC_ABSTRACT`
    Abstract,
    /// `ACC_STRICT`
    Strict,
    /// `ACC_SYNTHETIC`
    Synthetic,
    /// `ACC_ANNOTATION`
    Annotation,
    /// `ACC_ENUM`
    Enum,
    /// `ACC_SUPER`, only produced for class headers
    Super,
}

impl AccessFlag {
    /// The constant name used by the builder API, e.g. `ACC_PUBLIC`.
    #[must_use]
    pub fn constant_name(self) -> String {
        format!("ACC_{self}")
    }
}

/// Decoded access mask.
///
/// A zero mask is kept as the explicit [`AccessFlagSet::Zero`] sentinel, which renders as the
/// literal `0`, so an emitted flag expression is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccessFlagSet {
    /// No flag bit was set
    Zero,
    /// The set flags, ordered by ascending bit position. Never empty.
    Flags(Vec<AccessFlag>),
}

impl AccessFlagSet {
    /// Returns `true` for the zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, AccessFlagSet::Zero)
    }

    /// The decoded flags; empty for the zero sentinel.
    #[must_use]
    pub fn flags(&self) -> &[AccessFlag] {
        match self {
            AccessFlagSet::Zero => &[],
            AccessFlagSet::Flags(flags) => flags,
        }
    }

    /// Returns `true` if `flag` is part of the set.
    #[must_use]
    pub fn contains(&self, flag: AccessFlag) -> bool {
        self.flags().contains(&flag)
    }

    /// The symbolic names in order; `["0"]` for the zero sentinel.
    #[must_use]
    pub fn symbols(&self) -> Vec<&'static str> {
        match self {
            AccessFlagSet::Zero => vec!["0"],
            AccessFlagSet::Flags(flags) => flags
                .iter()
                .map(|&flag| <&'static str>::from(flag))
                .collect(),
        }
    }
}

impl std::fmt::Display for AccessFlagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbols().join(" | "))
    }
}
