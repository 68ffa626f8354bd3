//! Type signature and method descriptor decoding.
//!
//! Class files encode types as compact strings:
//!
//! - **Primitive codes** - one character each: `Z C F D B S I J`, and `V` for `void`
//! - **Object types** - `L<internal name>;`, with `/` separating package segments
//! - **Arrays** - one leading `[` per dimension, followed by the component signature
//! - **Method descriptors** - `(<argument signatures>)<return signature>`
//!
//! Decoding produces a [`TypeExpr`]. Three ubiquitous reference types (`String`, `Object`,
//! `StringBuffer`) decode to [`WellKnownAlias`] so the builder program can use the API's
//! shorthand constants; every other reference becomes an [`TypeExpr::ObjectRef`] with the
//! dotted class name. Arrays always carry their innermost element plus a dimension count.
//!
//! # Examples
//!
//! ```rust
//! use jvmscope::signatures::{decode_signature, PrimitiveKind, TypeExpr, WellKnownAlias};
//!
//! assert_eq!(decode_signature("I")?, TypeExpr::Primitive(PrimitiveKind::Int));
//! assert_eq!(
//!     decode_signature("Ljava/lang/String;")?,
//!     TypeExpr::WellKnownAlias(WellKnownAlias::String)
//! );
//! assert_eq!(
//!     decode_signature("Lcom/example/Foo;")?,
//!     TypeExpr::ObjectRef("com.example.Foo".to_string())
//! );
//! assert!(decode_signature("[L").is_err());
//! # Ok::<(), jvmscope::Error>(())
//! ```
//!
//! ```rust
//! use jvmscope::signatures::decode_method_descriptor;
//!
//! let descriptor = decode_method_descriptor("(I[Ljava/lang/String;)V")?;
//! assert_eq!(descriptor.arguments.len(), 2);
//! assert!(descriptor.return_type.is_void());
//! # Ok::<(), jvmscope::Error>(())
//! ```
//!
//! # References
//!
//! - The Java Virtual Machine Specification, Section 4.3 - Descriptors

mod parser;
mod types;

pub use parser::*;
pub use types::*;

use crate::Result;

/// Decode a single type signature (field type or return type)
///
/// ## Arguments
/// * 'signature' - The signature string, e.g. `[[I`
///
/// # Errors
/// Returns [`crate::Error::MalformedSignature`] if the signature does not follow the grammar
pub fn decode_signature(signature: &str) -> Result<TypeExpr> {
    let mut parser = SignatureParser::new(signature);
    parser.parse_signature()
}

/// Decode a method descriptor into argument and return types
///
/// ## Arguments
/// * 'descriptor' - The descriptor string, e.g. `(ILjava/lang/String;)V`
///
/// # Errors
/// Returns [`crate::Error::MalformedSignature`] if the descriptor does not follow the grammar
pub fn decode_method_descriptor(descriptor: &str) -> Result<MethodDescriptor> {
    let mut parser = SignatureParser::new(descriptor);
    parser.parse_method_descriptor()
}

/// Split a method descriptor into per-argument signature strings and the return signature
///
/// ## Arguments
/// * 'descriptor' - The descriptor string, e.g. `(ILjava/lang/String;)V`
///
/// # Errors
/// Returns [`crate::Error::MalformedSignature`] if the descriptor does not follow the grammar
pub fn split_method_descriptor(descriptor: &str) -> Result<(Vec<String>, String)> {
    let mut parser = SignatureParser::new(descriptor);
    parser.split_method_descriptor()
}
