//! # jvmscope Prelude
//!
//! The types and functions needed for the common provider → assembler → emitter pipeline.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all jvmscope operations
pub use crate::Error;

/// The result type used throughout jvmscope
pub use crate::Result;

// ================================================================================================
// Class Model Providers
// ================================================================================================

/// Class-file reader and class path lookup
pub use crate::{ClassFile, ClassPath, ClassRepository};

/// The resolved class model
pub use crate::model::{ClassModel, ConstantLiteral, FieldModel, MethodModel};

// ================================================================================================
// Decoding
// ================================================================================================

/// Access flags
pub use crate::access::{decode_access_flags, AccessFlag, AccessFlagSet, FlagRole};

/// Type signatures
pub use crate::signatures::{
    decode_method_descriptor, decode_signature, PrimitiveKind, TypeExpr, WellKnownAlias,
};

// ================================================================================================
// Assembly and Emission
// ================================================================================================

/// Emission records
pub use crate::assembler::{assemble, ClassHeader, EmissionRecord, FieldDecl, MethodSkeleton};

/// Emitters
pub use crate::emitter::{bcelify, BcelEmitter, Emitter, EmitterConfig};
