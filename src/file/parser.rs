//! Low-level byte stream parser for class files and type signatures.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data
//! parser. It offers bounds-checked big-endian reads and is shared by
//! the class file reader (big-endian `u1`/`u2`/`u4` items) and the signature decoder (one ASCII
//! code per step).
//!
//! # Usage Examples
//!
//! ```rust
//! use jvmscope::Parser;
//!
//! let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_be::<u32>()?, 0xCAFEBABE);
//! assert_eq!(parser.read_be::<u16>()?, 0);
//! assert_eq!(parser.read_be::<u16>()?, 52);
//! assert!(!parser.has_more_data());
//! # Ok::<(), jvmscope::Error>(())
//! ```

use crate::{
    file::io::{read_be_at, ClassIO},
    Result,
};

/// A generic binary data parser.
///
/// `Parser` maintains a position cursor over a borrowed byte slice. Every read checks the
/// remaining length first, so truncated input surfaces as [`crate::Error::OutOfBounds`]
/// instead of a panic.
///
/// # Examples
///
/// ```rust
/// use jvmscope::Parser;
///
/// let data = [0x00, 0x02, b'h', b'i'];
/// let mut parser = Parser::new(&data);
///
/// let len = parser.read_be::<u16>()?;
/// assert_eq!(parser.read_bytes(len as usize)?, b"hi");
/// # Ok::<(), jvmscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the position forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if already at the end of the data.
    pub fn advance(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    /// Move the position forward by `step` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the new position would exceed the data.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        match self.position.checked_add(step) {
            Some(end) if end <= self.data.len() => {
                self.position = end;
                Ok(())
            }
            _ => Err(out_of_bounds_error!()),
        }
    }

    /// Get the current position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the complete underlying data.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the unread remainder of the data.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Peek at the current byte without advancing.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if at the end of the data.
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(out_of_bounds_error!());
        }
        Ok(self.data[self.position])
    }

    /// Read a big-endian `T` and advance.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
    pub fn read_be<T: ClassIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Read `len` raw bytes and advance past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let start = self.position;
        self.advance_by(len)?;
        Ok(&self.data[start..self.position])
    }

    /// Read bytes up to, but not including, `terminator` and advance past the terminator.
    ///
    /// Returns `None` (leaving the position untouched) if the terminator never occurs.
    pub fn read_until(&mut self, terminator: u8) -> Option<&'a [u8]> {
        let rest = self.remaining();
        let end = rest.iter().position(|&byte| byte == terminator)?;
        self.position += end + 1;
        Some(&rest[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn read_sequence() {
        let data = [0x00, 0x0A, 0xFF, 0xFF, 0xFF, 0xFE];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.len(), 6);
        assert_eq!(parser.read_be::<u16>().unwrap(), 10);
        assert_eq!(parser.read_be::<i32>().unwrap(), -2);
        assert!(!parser.has_more_data());
        assert!(matches!(parser.read_be::<u8>(), Err(Error::OutOfBounds)));
    }

    #[test]
    fn navigation() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut parser = Parser::new(&data);

        parser.advance_by(2).unwrap();
        assert_eq!(parser.pos(), 2);
        assert_eq!(parser.peek_byte().unwrap(), 0x03);
        parser.advance().unwrap();
        assert_eq!(parser.remaining(), &[0x04]);
        assert!(parser.advance_by(2).is_err());
        assert_eq!(parser.pos(), 3);
        assert!(parser.advance_by(usize::MAX).is_err());
    }

    #[test]
    fn read_bytes_and_until() {
        let data = b"java/lang/String;I";
        let mut parser = Parser::new(data);

        assert_eq!(parser.read_until(b';').unwrap(), b"java/lang/String");
        assert_eq!(parser.peek_byte().unwrap(), b'I');
        assert!(parser.read_until(b';').is_none());
        assert_eq!(parser.pos(), 17);

        let mut parser = Parser::new(&[1, 2, 3]);
        assert_eq!(parser.read_bytes(2).unwrap(), &[1, 2]);
        assert!(parser.read_bytes(2).is_err());
        assert_eq!(parser.read_bytes(1).unwrap(), &[3]);
    }

    #[test]
    fn empty() {
        let parser = Parser::new(&[]);
        assert!(parser.is_empty());
        assert!(!parser.has_more_data());
        assert!(parser.peek_byte().is_err());
    }
}
