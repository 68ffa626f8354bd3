//! Constant pool parsing and resolution.
//!
//! The pool is stored 1-based; index 0 is unused and the entries following a `Long` or
//! `Double` are unusable slots. Both are kept as `None` so indices from the class file can be
//! used directly.

use crate::{file::parser::Parser, model::ConstantLiteral, Result};

/// Constant pool tags, see JVMS 4.4
#[allow(non_snake_case, missing_docs)]
pub mod CONSTANT_TAG {
    pub const UTF8: u8 = 1;
    pub const INTEGER: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const CLASS: u8 = 7;
    pub const STRING: u8 = 8;
    pub const FIELDREF: u8 = 9;
    pub const METHODREF: u8 = 10;
    pub const INTERFACE_METHODREF: u8 = 11;
    pub const NAME_AND_TYPE: u8 = 12;
    pub const METHOD_HANDLE: u8 = 15;
    pub const METHOD_TYPE: u8 = 16;
    pub const DYNAMIC: u8 = 17;
    pub const INVOKE_DYNAMIC: u8 = 18;
    pub const MODULE: u8 = 19;
    pub const PACKAGE: u8 = 20;
}

/// One constant pool entry
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Modified UTF-8 text, already decoded
    Utf8(String),
    /// 32 bit integer
    Integer(i32),
    /// 32 bit float
    Float(f32),
    /// 64 bit integer, occupies two slots
    Long(i64),
    /// 64 bit float, occupies two slots
    Double(f64),
    /// Class or interface reference
    Class {
        /// Index of the internal name (`Utf8`)
        name_index: u16,
    },
    /// String literal
    String {
        /// Index of the text (`Utf8`)
        string_index: u16,
    },
    /// Field reference
    Fieldref {
        /// Index of the owner (`Class`)
        class_index: u16,
        /// Index of name and type (`NameAndType`)
        name_and_type_index: u16,
    },
    /// Method reference
    Methodref {
        /// Index of the owner (`Class`)
        class_index: u16,
        /// Index of name and type (`NameAndType`)
        name_and_type_index: u16,
    },
    /// Interface method reference
    InterfaceMethodref {
        /// Index of the owner (`Class`)
        class_index: u16,
        /// Index of name and type (`NameAndType`)
        name_and_type_index: u16,
    },
    /// Name and descriptor pair
    NameAndType {
        /// Index of the name (`Utf8`)
        name_index: u16,
        /// Index of the descriptor (`Utf8`)
        descriptor_index: u16,
    },
    /// Method handle
    MethodHandle {
        /// Reference kind, 1 to 9
        reference_kind: u8,
        /// Index of the referenced member
        reference_index: u16,
    },
    /// Method type
    MethodType {
        /// Index of the descriptor (`Utf8`)
        descriptor_index: u16,
    },
    /// Dynamically computed constant
    Dynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method_attr_index: u16,
        /// Index of name and type (`NameAndType`)
        name_and_type_index: u16,
    },
    /// Dynamically computed call site
    InvokeDynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method_attr_index: u16,
        /// Index of name and type (`NameAndType`)
        name_and_type_index: u16,
    },
    /// Module reference
    Module {
        /// Index of the module name (`Utf8`)
        name_index: u16,
    },
    /// Package reference
    Package {
        /// Index of the package name (`Utf8`)
        name_index: u16,
    },
}

/// The parsed constant pool of one class
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    entries: Vec<Option<Constant>>,
}

impl ConstantPool {
    /// Parse `constant_pool_count` and the entries that follow it
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data and [`crate::Error::Malformed`]
    /// on unknown tags or invalid text.
    pub fn parse(parser: &mut Parser) -> Result<ConstantPool> {
        let count = parser.read_be::<u16>()? as usize;
        let mut entries: Vec<Option<Constant>> = Vec::with_capacity(count);
        entries.push(None);

        while entries.len() < count {
            let tag = parser.read_be::<u8>()?;
            let constant = match tag {
                CONSTANT_TAG::UTF8 => {
                    let length = parser.read_be::<u16>()?;
                    Constant::Utf8(decode_modified_utf8(parser.read_bytes(length as usize)?)?)
                }
                CONSTANT_TAG::INTEGER => Constant::Integer(parser.read_be::<i32>()?),
                CONSTANT_TAG::FLOAT => Constant::Float(parser.read_be::<f32>()?),
                CONSTANT_TAG::LONG => Constant::Long(parser.read_be::<i64>()?),
                CONSTANT_TAG::DOUBLE => Constant::Double(parser.read_be::<f64>()?),
                CONSTANT_TAG::CLASS => Constant::Class {
                    name_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::STRING => Constant::String {
                    string_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::FIELDREF => Constant::Fieldref {
                    class_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::METHODREF => Constant::Methodref {
                    class_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::INTERFACE_METHODREF => Constant::InterfaceMethodref {
                    class_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::NAME_AND_TYPE => Constant::NameAndType {
                    name_index: parser.read_be::<u16>()?,
                    descriptor_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::METHOD_HANDLE => Constant::MethodHandle {
                    reference_kind: parser.read_be::<u8>()?,
                    reference_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::METHOD_TYPE => Constant::MethodType {
                    descriptor_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::DYNAMIC => Constant::Dynamic {
                    bootstrap_method_attr_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::INVOKE_DYNAMIC => Constant::InvokeDynamic {
                    bootstrap_method_attr_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::MODULE => Constant::Module {
                    name_index: parser.read_be::<u16>()?,
                },
                CONSTANT_TAG::PACKAGE => Constant::Package {
                    name_index: parser.read_be::<u16>()?,
                },
                _ => {
                    return Err(malformed_error!(
                        "Unknown constant pool tag {} at index {}",
                        tag,
                        entries.len()
                    ))
                }
            };

            let wide = matches!(constant, Constant::Long(_) | Constant::Double(_));
            entries.push(Some(constant));
            if wide {
                if entries.len() >= count {
                    return Err(malformed_error!(
                        "8-byte constant in the last constant pool slot {}",
                        entries.len() - 1
                    ));
                }
                entries.push(None);
            }
        }

        Ok(ConstantPool { entries })
    }

    /// Number of slots including the unused slot 0
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the pool has no usable entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Get the entry at `index`
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for index 0, unusable slots and indices past the end.
    pub fn get(&self, index: u16) -> Result<&Constant> {
        match self.entries.get(index as usize) {
            Some(Some(constant)) => Ok(constant),
            _ => Err(malformed_error!("Invalid constant pool index {}", index)),
        }
    }

    /// Resolve a `Utf8` entry
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the entry is missing or not `Utf8`.
    pub fn utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            Constant::Utf8(text) => Ok(text),
            other => Err(malformed_error!(
                "Constant pool index {} is not Utf8 - {:?}",
                index,
                other
            )),
        }
    }

    /// Resolve a `Class` entry to its dotted qualified name
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the entry is missing or not `Class`.
    pub fn class_name(&self, index: u16) -> Result<String> {
        match self.get(index)? {
            Constant::Class { name_index } => Ok(self.utf8(*name_index)?.replace('/', ".")),
            other => Err(malformed_error!(
                "Constant pool index {} is not a Class - {:?}",
                index,
                other
            )),
        }
    }

    /// Resolve the value of a `ConstantValue` attribute
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the entry is not a loadable field constant.
    pub fn literal(&self, index: u16) -> Result<ConstantLiteral> {
        match self.get(index)? {
            Constant::Integer(value) => Ok(ConstantLiteral::Integer(*value)),
            Constant::Long(value) => Ok(ConstantLiteral::Long(*value)),
            Constant::Float(value) => Ok(ConstantLiteral::Float(*value)),
            Constant::Double(value) => Ok(ConstantLiteral::Double(*value)),
            Constant::String { string_index } => {
                Ok(ConstantLiteral::String(self.utf8(*string_index)?.to_string()))
            }
            other => Err(malformed_error!(
                "Constant pool index {} is not a field constant - {:?}",
                index,
                other
            )),
        }
    }
}

/// Decode the modified UTF-8 encoding used by class files
///
/// Differs from standard UTF-8 in two ways: `NUL` is written as `C0 80`, and supplementary
/// characters are written as two 3-byte encoded surrogates. Unpaired surrogates are replaced
/// with U+FFFD.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] on truncated or invalid byte sequences.
pub fn decode_modified_utf8(bytes: &[u8]) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut index = 0;

    let continuation = |offset: usize| -> Result<u16> {
        match bytes.get(offset) {
            Some(&byte) if byte & 0xC0 == 0x80 => Ok(u16::from(byte & 0x3F)),
            _ => Err(malformed_error!(
                "Invalid modified UTF-8 continuation byte at offset {}",
                offset
            )),
        }
    };

    while index < bytes.len() {
        let lead = bytes[index];
        if lead & 0x80 == 0 {
            units.push(u16::from(lead));
            index += 1;
        } else if lead & 0xE0 == 0xC0 {
            units.push((u16::from(lead & 0x1F) << 6) | continuation(index + 1)?);
            index += 2;
        } else if lead & 0xF0 == 0xE0 {
            units.push(
                (u16::from(lead & 0x0F) << 12)
                    | (continuation(index + 1)? << 6)
                    | continuation(index + 2)?,
            );
            index += 3;
        } else {
            return Err(malformed_error!(
                "Invalid modified UTF-8 lead byte 0x{:02X} at offset {}",
                lead,
                index
            ));
        }
    }

    Ok(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn pool(bytes: &[u8]) -> Result<ConstantPool> {
        let mut parser = Parser::new(bytes);
        ConstantPool::parse(&mut parser)
    }

    #[test]
    fn parse_entries() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0x07,                         // count = 7
            0x01, 0x00, 0x03, b'F', b'o', b'o', // #1 Utf8 "Foo"
            0x07, 0x00, 0x01,                   // #2 Class #1
            0x05, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x2A,             // #3 Long 42 (+ #4 unusable)
            0x08, 0x00, 0x01,                   // #5 String #1
            0x03, 0xFF, 0xFF, 0xFF, 0xFF,       // #6 Integer -1
        ];
        let pool = pool(&bytes).unwrap();

        assert_eq!(pool.len(), 7);
        assert_eq!(pool.utf8(1).unwrap(), "Foo");
        assert_eq!(pool.class_name(2).unwrap(), "Foo");
        assert_eq!(pool.literal(3).unwrap(), ConstantLiteral::Long(42));
        assert!(pool.get(4).is_err());
        assert_eq!(
            pool.literal(5).unwrap(),
            ConstantLiteral::String("Foo".to_string())
        );
        assert_eq!(pool.literal(6).unwrap(), ConstantLiteral::Integer(-1));
        assert!(pool.get(0).is_err());
        assert!(pool.get(7).is_err());
        assert!(pool.utf8(2).is_err());
        assert!(pool.literal(2).is_err());
    }

    #[test]
    fn class_names_are_dotted() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0x03,
            0x01, 0x00, 0x07, b'a', b'/', b'b', b'/', b'C', b'$', b'D',
            0x07, 0x00, 0x01,
        ];
        assert_eq!(pool(&bytes).unwrap().class_name(2).unwrap(), "a.b.C$D");
    }

    #[test]
    fn unknown_tag() {
        let result = pool(&[0x00, 0x02, 0x02, 0x00]);
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn truncated() {
        let result = pool(&[0x00, 0x02, 0x01, 0x00, 0x05, b'a']);
        assert!(matches!(result, Err(Error::OutOfBounds)));
    }

    #[test]
    fn wide_constant_in_last_slot() {
        let result = pool(&[0x00, 0x02, 0x06, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn modified_utf8() {
        assert_eq!(decode_modified_utf8(b"plain").unwrap(), "plain");
        assert_eq!(decode_modified_utf8(&[0xC0, 0x80]).unwrap(), "\0");
        assert_eq!(decode_modified_utf8(&[0xC3, 0xBC]).unwrap(), "ü");
        assert_eq!(decode_modified_utf8(&[0xE2, 0x82, 0xAC]).unwrap(), "€");
        // U+1F600 as a surrogate pair
        assert_eq!(
            decode_modified_utf8(&[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]).unwrap(),
            "\u{1F600}"
        );
        assert!(decode_modified_utf8(&[0xC3]).is_err());
        assert!(decode_modified_utf8(&[0xF0, 0x9F, 0x98, 0x80]).is_err());
    }
}
