//! Field and method tables.

use crate::{
    classfile::{
        attributes::{Attribute, CodeAttribute},
        constpool::ConstantPool,
    },
    file::parser::Parser,
    Result,
};

/// A raw `field_info` or `method_info` structure with its names resolved
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    /// Raw access mask
    pub access_flags: u16,
    /// Member name
    pub name: String,
    /// Field signature or method descriptor
    pub descriptor: String,
    /// Member attributes
    pub attributes: Vec<Attribute>,
}

impl MemberInfo {
    /// Parse a `count` prefixed table of fields or methods
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data and [`crate::Error::Malformed`]
    /// if a name or descriptor index does not point at `Utf8`.
    pub fn parse_table(parser: &mut Parser, pool: &ConstantPool) -> Result<Vec<MemberInfo>> {
        let count = parser.read_be::<u16>()?;
        let mut members = Vec::with_capacity(count as usize);
        for _ in 0..count {
            members.push(Self::parse(parser, pool)?);
        }
        Ok(members)
    }

    /// Parse one member
    ///
    /// # Errors
    /// See [`MemberInfo::parse_table`].
    pub fn parse(parser: &mut Parser, pool: &ConstantPool) -> Result<MemberInfo> {
        let access_flags = parser.read_be::<u16>()?;
        let name = pool.utf8(parser.read_be::<u16>()?)?.to_string();
        let descriptor = pool.utf8(parser.read_be::<u16>()?)?.to_string();
        let attributes = Attribute::parse_table(parser, pool)?;

        Ok(MemberInfo {
            access_flags,
            name,
            descriptor,
            attributes,
        })
    }

    /// Constant pool index of the `ConstantValue` attribute, if any
    #[must_use]
    pub fn constant_value_index(&self) -> Option<u16> {
        self.attributes.iter().find_map(|attribute| match attribute {
            Attribute::ConstantValue(index) => Some(*index),
            _ => None,
        })
    }

    /// The method body, absent for `abstract` and `native` methods
    #[must_use]
    pub fn code(&self) -> Option<&CodeAttribute> {
        self.attributes.iter().find_map(|attribute| match attribute {
            Attribute::Code(code) => Some(code),
            _ => None,
        })
    }
}
