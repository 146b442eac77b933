//! Error types for enum resolution and lookup-code generation.

use thiserror::Error;

/// Errors that can occur while resolving enums or generating lookup code.
///
/// Resolution and validation errors are scoped to a single enum: a batch keeps
/// going when one of its enums fails. Code generation errors are scoped to a
/// single artifact.
///
/// "Not found" is deliberately absent from this list. A value or name missing
/// from a known enum is a normal negative result, reported as `None`.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// The enum is backed by something other than the eight fixed-width integers.
    #[error(
        "Enum '{enum_name}' has unsupported underlying type '{declared}'; expected one of i8, u8, i16, u16, i32, u32, i64, u64"
    )]
    UnsupportedUnderlyingType {
        /// Fully qualified name of the offending enum.
        enum_name: String,
        /// The underlying type exactly as declared.
        declared: String,
    },

    /// A lookup was requested for an enum that was never marked for reflection.
    #[error("Unsupported enum type '{0}': only marked enums can be reflected")]
    UnsupportedEnumType(String),

    /// A lookup argument violated its precondition (for example a blank name).
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Explanation of the violated precondition.
        reason: String,
    },

    /// The enum's fully qualified name cannot produce a valid discriminator.
    #[error("Invalid enum name '{name}': {reason}")]
    InvalidEnumName {
        /// The name as declared.
        name: String,
        /// Explanation of why the name is rejected.
        reason: String,
    },

    /// A member name is blank.
    #[error("Enum '{enum_name}' declares a member with a blank name: '{member}'")]
    InvalidMemberName { enum_name: String, member: String },

    /// Two members of the same enum share a name.
    #[error("Enum '{enum_name}' declares member '{member}' more than once")]
    DuplicateMember { enum_name: String, member: String },

    /// The same fully qualified enum name appears twice in one batch.
    #[error("Enum '{name}' is listed more than once")]
    DuplicateEnum { name: String },

    /// Generated code failed validation.
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// A declaration manifest could not be read or decoded.
    #[error("Failed to load manifest '{path}': {reason}")]
    ManifestError { path: String, reason: String },

    /// Failed to write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid generator configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Convenience Result type for enum-reflector operations.
pub type Result<T> = std::result::Result<T, ReflectError>;
