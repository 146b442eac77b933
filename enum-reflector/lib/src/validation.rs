//! Pre-resolution validation of enum descriptors.
//!
//! Catches malformed front end output before it reaches the resolver or the
//! emitter, so that generated code never has to cope with it.
//!
//! ## Validation Checks
//!
//! - **Enum name**: must yield a valid discriminator (see [`crate::naming`])
//! - **Member names**: must be non-blank
//! - **Member uniqueness**: names are unique within an enum, case-sensitive
//! - **Batch uniqueness**: no fully qualified enum name appears twice

use std::collections::HashSet;

use crate::errors::{ReflectError, Result};
use crate::model::{EnumDescriptor, ResolvedEnum};
use crate::naming::discriminator;

/// Validates a single descriptor.
///
/// ## Examples
///
/// ```
/// use enum_reflector::model::{EnumDescriptor, IntWidth};
/// use enum_reflector::validation::validate_descriptor;
///
/// let ok = EnumDescriptor::new("palette.Color", IntWidth::U8).member("Red");
/// assert!(validate_descriptor(&ok).is_ok());
///
/// let dup = EnumDescriptor::new("palette.Color", IntWidth::U8).member("Red").member("Red");
/// assert!(validate_descriptor(&dup).is_err());
/// ```
///
/// ## Errors
///
/// - `ReflectError::InvalidEnumName` if the name cannot become a discriminator
/// - `ReflectError::InvalidMemberName` for a blank member name
/// - `ReflectError::DuplicateMember` for a repeated member name
pub fn validate_descriptor(descriptor: &EnumDescriptor) -> Result<()> {
    discriminator(&descriptor.name)?;

    let mut seen = HashSet::with_capacity(descriptor.members.len());
    for member in &descriptor.members {
        if member.name.trim().is_empty() {
            return Err(ReflectError::InvalidMemberName {
                enum_name: descriptor.name.clone(),
                member: member.name.clone(),
            });
        }

        if !seen.insert(member.name.as_str()) {
            return Err(ReflectError::DuplicateMember {
                enum_name: descriptor.name.clone(),
                member: member.name.clone(),
            });
        }
    }

    Ok(())
}

/// Checks that no fully qualified enum name appears twice in a batch.
///
/// Names that merely derive the same discriminator are fine; the generator
/// numbers them apart. A repeated name would answer one type tag twice.
///
/// ## Errors
///
/// Returns `ReflectError::DuplicateEnum` for the first repeated name.
pub fn validate_batch(enums: &[ResolvedEnum]) -> Result<()> {
    let mut seen = HashSet::with_capacity(enums.len());

    for resolved in enums {
        if !seen.insert(resolved.name.as_str()) {
            return Err(ReflectError::DuplicateEnum {
                name: resolved.name.clone(),
            });
        }
    }

    Ok(())
}
