//! In-process enum lookups.
//!
//! [`EnumRegistry`] answers the same three questions as generated code, with
//! the same semantics, for hosts that would rather not compile generated
//! files. Type tags are fully qualified enum names; values travel as `i128`.
//!
//! ## Examples
//!
//! ```
//! use enum_reflector::model::{EnumDescriptor, IntWidth};
//! use enum_reflector::registry::EnumRegistry;
//!
//! let color = EnumDescriptor::new("palette.Color", IntWidth::U8)
//!     .member("Red")
//!     .member_with_value("Green", 5)
//!     .member("Blue");
//!
//! let registry = EnumRegistry::from_descriptors(&[color]).unwrap();
//! assert_eq!(registry.name_of("palette.Color", 6).unwrap(), Some("Blue"));
//! assert_eq!(registry.try_parse("palette.Color", "Green").unwrap(), Some(5));
//! ```

use crate::errors::{ReflectError, Result};
use crate::model::{EnumDescriptor, ResolvedEnum};
use crate::resolver::resolve;
use crate::validation::validate_batch;

/// Resolved enums addressable by type tag, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: Vec<ResolvedEnum>,
}

impl EnumRegistry {
    /// Builds a registry from already-resolved enums.
    ///
    /// ## Errors
    ///
    /// Fails with `ReflectError::DuplicateEnum` if a type tag is listed twice.
    pub fn new(enums: Vec<ResolvedEnum>) -> Result<Self> {
        validate_batch(&enums)?;
        Ok(Self { enums })
    }

    /// Resolves and registers every descriptor.
    ///
    /// Unlike a generation batch this is strict: any enum that fails to resolve
    /// fails the whole registry.
    pub fn from_descriptors(descriptors: &[EnumDescriptor]) -> Result<Self> {
        let enums = descriptors.iter().map(resolve).collect::<Result<Vec<_>>>()?;
        Self::new(enums)
    }

    /// Type tags in dispatch order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.enums.iter().map(|resolved| resolved.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    fn find(&self, tag: &str) -> Result<&ResolvedEnum> {
        self.enums
            .iter()
            .find(|resolved| resolved.name == tag)
            .ok_or_else(|| ReflectError::UnsupportedEnumType(tag.to_string()))
    }

    /// Name of the first member of `tag` declared with `value`.
    ///
    /// ## Errors
    ///
    /// `UnsupportedEnumType` if `tag` is not registered. A value no member
    /// declares is `Ok(None)`.
    pub fn name_of(&self, tag: &str, value: i128) -> Result<Option<&str>> {
        Ok(self.find(tag)?.name_of(value))
    }

    /// Every `(name, value)` pair of `tag`, in declaration order.
    pub fn values_of(&self, tag: &str) -> Result<Vec<(&str, i128)>> {
        let resolved = self.find(tag)?;
        Ok(resolved
            .values
            .iter()
            .map(|member| (member.name.as_str(), member.value.to_i128()))
            .collect())
    }

    /// Value of the member of `tag` named exactly `name`.
    ///
    /// ## Errors
    ///
    /// `InvalidArgument` for a blank name, checked before the tag.
    /// `UnsupportedEnumType` if `tag` is not registered.
    pub fn try_parse(&self, tag: &str, name: &str) -> Result<Option<i128>> {
        if name.trim().is_empty() {
            return Err(ReflectError::InvalidArgument {
                argument: "name",
                reason: "value cannot be blank".to_string(),
            });
        }

        Ok(self.find(tag)?.value_of(name).map(|value| value.to_i128()))
    }
}
