use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

macro_rules! signature_error {
    ($signature:expr, $fmt:expr $(, $arg:expr)*) => {
        crate::Error::MalformedSignature {
            signature: $signature.to_string(),
            reason: format!($fmt $(, $arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers every failure that can occur while reading a class file, resolving a class
/// on the class path, decoding access flags and type signatures, and emitting the builder
/// program. Each variant carries enough context to report the problem without re-parsing.
///
/// # Error Categories
///
/// ## Translation Errors
/// - [`Error::MalformedSignature`] - A type signature or method descriptor violates the grammar
/// - [`Error::UnknownFlagBit`] - An access mask carries a bit without a symbolic name
/// - [`Error::InvalidRecords`] - An emitter was handed a record stream it cannot render
///
/// ## Class Model Provider Errors
/// - [`Error::ClassNotFound`] - The requested class is not on the class path
/// - [`Error::Malformed`] - Corrupted or invalid class-file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of the class data
/// - [`Error::NotSupported`] - Input is not a class file
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust
/// use jvmscope::{signatures::decode_signature, Error};
///
/// match decode_signature("[L") {
///     Ok(expr) => println!("decoded {expr}"),
///     Err(Error::MalformedSignature { signature, reason }) => {
///         eprintln!("bad signature '{signature}': {reason}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A type signature does not conform to the class-file signature grammar.
    ///
    /// Raised by the signature decoder for unbalanced array markers, unknown primitive
    /// codes, object references without their `;` terminator and similar problems.
    /// Decoding never guesses a fallback type.
    #[error("Malformed signature '{signature}': {reason}")]
    MalformedSignature {
        /// The complete signature that failed to decode
        signature: String,
        /// What was wrong with it
        reason: String,
    },

    /// A set bit in an access mask has no symbolic name.
    ///
    /// This indicates a mismatch between the class file and the flag table known to this
    /// library (for example a newer class-file version). It is never silently ignored.
    #[error("Access mask 0x{mask:04X} has unknown flag bit {bit}")]
    UnknownFlagBit {
        /// Position of the offending bit
        bit: u32,
        /// The complete mask that was being decoded
        mask: u16,
    },

    /// The class model provider could not find the requested class.
    ///
    /// Returned before any translation starts; the assembler never runs on a partially
    /// resolved class.
    #[error("Class not found - {0}")]
    ClassNotFound(String),

    /// The class data is damaged and could not be parsed.
    ///
    /// This error indicates that the class-file structure is corrupted or doesn't
    /// conform to the JVM class-file format. The error includes the source
    /// location where the malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the data.
    ///
    /// This error occurs when trying to read beyond the end of the class data or of an
    /// attribute. It's a safety check to prevent buffer overruns on truncated input.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Indicates that the input does not start with the `0xCAFEBABE` class-file magic.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// An emitter received a record sequence it cannot render.
    ///
    /// Every record stream has to start with exactly one class header.
    #[error("Invalid emission records - {0}")]
    InvalidRecords(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading class files or writing
    /// the generated program.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
