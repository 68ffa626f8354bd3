// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # jvmscope
//!
//! Turns compiled JVM classes back into the builder-API calls that create them.
//!
//! Given a `.class` file, `jvmscope` produces a Java program that rebuilds an equivalent class
//! with Apache BCEL (`ClassGen`, `FieldGen`, `MethodGen`). This is handy as a starting point
//! for bytecode generators: compile what you want to produce, then let `jvmscope` write the
//! generator for you.
//!
//! ## Features
//!
//! - **📦 Class-file reader** - Memory-mapped parsing of the binary class format, constant pool included
//! - **🔍 Flag and signature decoding** - Access masks and type signatures to symbolic values
//! - **🧩 Record-based pipeline** - A language-neutral record stream between analysis and output
//! - **🔧 BCEL emitter** - Complete, compilable `<Name>Creator` programs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jvmscope::prelude::*;
//!
//! let repository = ClassRepository::new(ClassPath::from_env());
//! let model = repository.load("com.example.Widget")?;
//!
//! bcelify(&model, std::io::stdout(), &EmitterConfig::default())?;
//! # Ok::<(), jvmscope::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Provider** - [`ClassFile`] or [`ClassRepository`] produce a [`model::ClassModel`]
//! 2. **Assembler** - [`assembler::assemble`] decodes flags and signatures into
//!    [`assembler::EmissionRecord`]s: one class header, one record per field, one per method
//! 3. **Emitter** - an [`emitter::Emitter`] such as [`emitter::BcelEmitter`] renders the records
//!
//! The stages can be used separately:
//!
//! ```rust
//! use jvmscope::{
//!     access::{decode_access_flags, FlagRole},
//!     signatures::decode_signature,
//! };
//!
//! let flags = decode_access_flags(0x0021, FlagRole::Class)?;
//! assert_eq!(flags.to_string(), "PUBLIC | SUPER");
//!
//! let expr = decode_signature("[[Ljava/lang/String;")?;
//! assert_eq!(expr.to_string(), "java.lang.String[][]");
//! # Ok::<(), jvmscope::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`] with [`Error`]. Decoding never guesses: a
//! malformed signature or an unknown flag bit fails the whole class.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use jvmscope::prelude::*;
///
/// let class = ClassFile::from_file("Widget.class".as_ref())?;
/// let records = assemble(&class.model()?)?;
/// println!("{} records", records.len());
/// # Ok::<(), jvmscope::Error>(())
/// ```
pub mod prelude;

/// Access-flag decoding
///
/// Maps a raw 16 bit access mask to its ordered symbolic flag names. The synchronized bit is
/// named `SUPER` when the mask belongs to a class.
pub mod access;

/// Type signature and method descriptor decoding
pub mod signatures;

/// Resolved class model, the input of the assembler
pub mod model;

/// Binary class-file parsing
pub mod classfile;

/// Class lookup on a class path
pub mod repository;

/// Emission record assembly
pub mod assembler;

/// Builder-program emitters
pub mod emitter;

/// Java source text helpers
pub mod utils;

/// `jvmscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `jvmscope` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use jvmscope::{ClassFile, Error};
///
/// match ClassFile::from_file(std::path::Path::new("Widget.class")) {
///     Ok(class) => println!("Loaded {}", class.this_class),
///     Err(Error::NotSupported) => println!("Not a class file"),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Main entry point for reading class files.
pub use classfile::ClassFile;

/// Class lookup by qualified name
pub use repository::{ClassPath, ClassRepository};

/// Low-level file access and parsing
pub use file::{io::ClassIO, parser::Parser, File};
