//! Generator configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};

use crate::errors::{ReflectError, Result};

/// Default name of the generated module.
pub const DEFAULT_MODULE_NAME: &str = "enum_reflector";

/// Default marker that opts an enum into reflection.
pub const DEFAULT_MARKER: &str = "ReflectEnum";

/// The lookup operations the emitter can generate.
///
/// Parses from and displays as kebab-case (`name-lookup`, `value-table`,
/// `try-parse`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LookupOperation {
    /// Runtime value to member name.
    NameLookup,
    /// All `(name, value)` pairs in declaration order.
    ValueTable,
    /// Member name to runtime value.
    TryParse,
}

impl LookupOperation {
    /// Generated module (and file stem) holding this operation.
    pub fn module_name(self) -> &'static str {
        match self {
            Self::NameLookup => "name_lookup",
            Self::ValueTable => "value_table",
            Self::TryParse => "try_parse",
        }
    }

    /// Suffix of the per-enum typed helper, e.g. `palette_Color_name`.
    pub fn helper_suffix(self) -> &'static str {
        match self {
            Self::NameLookup => "name",
            Self::ValueTable => "values",
            Self::TryParse => "try_parse",
        }
    }

    /// Name of the aggregate, tag-dispatched function.
    pub fn dispatcher_name(self) -> &'static str {
        match self {
            Self::NameLookup => "enum_name",
            Self::ValueTable => "enum_values",
            Self::TryParse => "try_parse_enum",
        }
    }
}

/// Configuration for lookup-code generation.
///
/// ## Examples
///
/// ```
/// use enum_reflector::config::{LookupOperation, ReflectConfig};
///
/// let config = ReflectConfig::new()
///     .module_name("lookups")
///     .only([LookupOperation::TryParse])
///     .pretty(true);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.enabled_operations(), vec![LookupOperation::TryParse]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectConfig {
    /// Name of the generated module; also the output directory name.
    pub module_name: String,
    /// Marker name quoted in the generated "unsupported enum" message.
    pub marker: String,
    /// Operations to emit.
    pub operations: BTreeSet<LookupOperation>,
    /// Re-format validated output with `prettyplease`.
    pub pretty: bool,
    /// One level of indentation in writer output.
    pub indent: String,
}

impl Default for ReflectConfig {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            operations: LookupOperation::iter().collect(),
            pretty: false,
            indent: "    ".to_string(),
        }
    }
}

impl ReflectConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated module name.
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Set the marker name used in generated messages.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Emit only the given operations.
    pub fn only(mut self, operations: impl IntoIterator<Item = LookupOperation>) -> Self {
        self.operations = operations.into_iter().collect();
        self
    }

    /// Stop emitting one operation.
    pub fn skip(mut self, operation: LookupOperation) -> Self {
        self.operations.remove(&operation);
        self
    }

    /// Enable `prettyplease` formatting of generated files.
    pub fn pretty(mut self, enable: bool) -> Self {
        self.pretty = enable;
        self
    }

    /// Set the indentation unit.
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Enabled operations in their canonical order.
    pub fn enabled_operations(&self) -> Vec<LookupOperation> {
        self.operations.iter().copied().collect()
    }

    pub fn is_enabled(&self, operation: LookupOperation) -> bool {
        self.operations.contains(&operation)
    }

    /// Checks the configuration before any code is generated.
    ///
    /// ## Errors
    ///
    /// Returns `ReflectError::ConfigError` if the module name is not a valid
    /// identifier, the marker is blank or spans lines, the indent contains anything but spaces
    /// and tabs, or no operation is enabled.
    pub fn validate(&self) -> Result<()> {
        if syn::parse_str::<syn::Ident>(&self.module_name).is_err() {
            return Err(ReflectError::ConfigError(format!(
                "module name '{}' is not a valid identifier",
                self.module_name
            )));
        }

        if self.marker.trim().is_empty() {
            return Err(ReflectError::ConfigError("marker cannot be blank".to_string()));
        }

        if self.marker.chars().any(char::is_control) {
            return Err(ReflectError::ConfigError(
                "marker cannot contain control characters".to_string(),
            ));
        }

        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ReflectError::ConfigError(
                "indent may only contain spaces and tabs".to_string(),
            ));
        }

        if self.operations.is_empty() {
            return Err(ReflectError::ConfigError(
                "at least one lookup operation must be enabled".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_enable_everything() {
        let config = ReflectConfig::default();
        assert_eq!(config.module_name, "enum_reflector");
        assert_eq!(config.marker, "ReflectEnum");
        assert_eq!(
            config.enabled_operations(),
            vec![
                LookupOperation::NameLookup,
                LookupOperation::ValueTable,
                LookupOperation::TryParse
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn operations_parse_from_kebab_case() {
        assert_eq!(LookupOperation::from_str("name-lookup").unwrap(), LookupOperation::NameLookup);
        assert_eq!(LookupOperation::from_str("value-table").unwrap(), LookupOperation::ValueTable);
        assert_eq!(LookupOperation::from_str("try-parse").unwrap(), LookupOperation::TryParse);
        assert!(LookupOperation::from_str("reverse").is_err());
        assert_eq!(LookupOperation::TryParse.to_string(), "try-parse");
    }

    #[test]
    fn skip_removes_one_operation() {
        let config = ReflectConfig::new().skip(LookupOperation::ValueTable);
        assert!(!config.is_enabled(LookupOperation::ValueTable));
        assert!(config.is_enabled(LookupOperation::NameLookup));
    }

    #[test]
    fn invalid_module_name_is_rejected() {
        for name in ["", "my-module", "1st", "fn"] {
            let config = ReflectConfig::new().module_name(name);
            assert!(
                matches!(config.validate(), Err(ReflectError::ConfigError(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_operation_set_is_rejected() {
        let config = ReflectConfig::new().only([]);
        match config.validate() {
            Err(ReflectError::ConfigError(msg)) => assert!(msg.contains("at least one")),
            other => panic!("Expected ConfigError, got: {:?}", other),
        }
    }

    #[test]
    fn blank_marker_and_bad_indent_are_rejected() {
        assert!(ReflectConfig::new().marker(" ").validate().is_err());
        assert!(ReflectConfig::new().marker("Reflect\nEnum").validate().is_err());
        assert!(ReflectConfig::new().indent("--").validate().is_err());
        assert!(ReflectConfig::new().indent("\t").validate().is_ok());
    }
}
