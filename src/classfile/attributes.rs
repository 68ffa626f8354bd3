//! Attribute parsing.
//!
//! Only the attributes the class model needs are decoded: `ConstantValue`, `SourceFile` and
//! `Code` with its nested `LocalVariableTable`. Everything else is skipped by length and kept
//! as [`Attribute::Unknown`].

use crate::{classfile::constpool::ConstantPool, file::parser::Parser, Result};

/// One row of a `LocalVariableTable`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    /// First bytecode offset where the variable is live
    pub start_pc: u16,
    /// Length of the live range
    pub length: u16,
    /// Variable name
    pub name: String,
    /// Variable type signature
    pub descriptor: String,
    /// Local variable slot
    pub index: u16,
}

/// The parts of a `Code` attribute needed to recover argument names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeAttribute {
    /// Maximum operand stack depth
    pub max_stack: u16,
    /// Number of local variable slots
    pub max_locals: u16,
    /// Length of the bytecode in bytes
    pub code_length: u32,
    /// Rows of every nested `LocalVariableTable`, in file order
    pub local_variables: Vec<LocalVariable>,
}

/// A class, field or method attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// Field constant; index into the constant pool
    ConstantValue(u16),
    /// Source file name of the class
    SourceFile(String),
    /// Method body
    Code(CodeAttribute),
    /// Any other attribute, skipped over
    Unknown {
        /// Attribute name
        name: String,
        /// Payload length in bytes
        length: u32,
    },
}

impl Attribute {
    /// Parse an `attributes_count` prefixed attribute table
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if an attribute extends past the data and
    /// [`crate::Error::Malformed`] if a known attribute has the wrong shape.
    pub fn parse_table(parser: &mut Parser, pool: &ConstantPool) -> Result<Vec<Attribute>> {
        let count = parser.read_be::<u16>()?;
        let mut attributes = Vec::with_capacity(count as usize);
        for _ in 0..count {
            attributes.push(Self::parse(parser, pool)?);
        }
        Ok(attributes)
    }

    /// Parse a single attribute
    ///
    /// # Errors
    /// See [`Attribute::parse_table`].
    pub fn parse(parser: &mut Parser, pool: &ConstantPool) -> Result<Attribute> {
        let name_index = parser.read_be::<u16>()?;
        let length = parser.read_be::<u32>()?;
        let payload = parser.read_bytes(length as usize)?;
        let name = pool.utf8(name_index)?;

        let mut body = Parser::new(payload);
        let attribute = match name {
            "ConstantValue" => Attribute::ConstantValue(body.read_be::<u16>()?),
            "SourceFile" => Attribute::SourceFile(pool.utf8(body.read_be::<u16>()?)?.to_string()),
            "Code" => Attribute::Code(parse_code(&mut body, pool)?),
            _ => {
                log::trace!("Skipping attribute {name} ({length} bytes)");
                return Ok(Attribute::Unknown {
                    name: name.to_string(),
                    length,
                })
            }
        };

        if body.has_more_data() {
            return Err(malformed_error!(
                "Attribute '{}' has {} trailing bytes",
                name,
                body.remaining().len()
            ));
        }

        Ok(attribute)
    }
}

fn parse_code(parser: &mut Parser, pool: &ConstantPool) -> Result<CodeAttribute> {
    let max_stack = parser.read_be::<u16>()?;
    let max_locals = parser.read_be::<u16>()?;
    let code_length = parser.read_be::<u32>()?;
    parser.advance_by(code_length as usize)?;

    // exception_table entries: start_pc, end_pc, handler_pc, catch_type
    let exception_count = parser.read_be::<u16>()?;
    parser.advance_by(exception_count as usize * 8)?;

    let local_variables = parse_local_variables(parser, pool)?;

    Ok(CodeAttribute {
        max_stack,
        max_locals,
        code_length,
        local_variables,
    })
}

/// Walks the attributes nested in `Code`; only `LocalVariableTable` rows are kept
fn parse_local_variables(parser: &mut Parser, pool: &ConstantPool) -> Result<Vec<LocalVariable>> {
    let count = parser.read_be::<u16>()?;
    let mut local_variables = Vec::new();
    for _ in 0..count {
        let name_index = parser.read_be::<u16>()?;
        let length = parser.read_be::<u32>()?;
        let payload = parser.read_bytes(length as usize)?;
        if pool.utf8(name_index)? != "LocalVariableTable" {
            continue;
        }

        let mut body = Parser::new(payload);
        let rows = body.read_be::<u16>()?;
        for _ in 0..rows {
            local_variables.push(LocalVariable {
                start_pc: body.read_be::<u16>()?,
                length: body.read_be::<u16>()?,
                name: pool.utf8(body.read_be::<u16>()?)?.to_string(),
                descriptor: pool.utf8(body.read_be::<u16>()?)?.to_string(),
                index: body.read_be::<u16>()?,
            });
        }
    }
    Ok(local_variables)
}
