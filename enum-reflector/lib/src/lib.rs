//! Enum reflection: value resolution and lookup-code generation.
//!
//! This crate takes enum declarations reported by a front end, computes the
//! concrete value of every member, and emits Rust source that answers three
//! runtime questions for any reflected enum identified by a string type tag:
//!
//! - which member name belongs to a value (`enum_name`)
//! - which `(name, value)` pairs an enum declares (`enum_values`)
//! - which value a member name stands for (`try_parse_enum`)
//!
//! ## Modules
//!
//! - [`model`] - Declarations, integer widths and resolved values
//! - [`resolver`] - Auto-increment, width coercion and overflow wrapping
//! - [`validation`] - Per-enum and per-batch checks
//! - [`naming`] - Discriminators for generated identifiers
//! - [`writer`] - Scope-aware text writer used by every generator
//! - [`codegen`] - Lookup operation and support module generators
//! - [`output`] - Artifact assembly, validation and file writing
//! - [`source`] - Front-end trait and manifest loading
//! - [`registry`] - The same lookups, answered in-process
//! - [`config`] - Generator configuration
//! - [`errors`] - Error types
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use enum_reflector::config::ReflectConfig;
//! use enum_reflector::output::{generate_from_source, write_artifacts};
//! use enum_reflector::source::ManifestSource;
//!
//! let config = ReflectConfig::default();
//! let source = ManifestSource::new("enums.json");
//!
//! let report = generate_from_source(&source, &config).unwrap();
//! for skipped in &report.skipped {
//!     eprintln!("skipped {}: {}", skipped.name, skipped.error);
//! }
//! write_artifacts(&Path::new("src").join(&config.module_name), &report.artifacts, false).unwrap();
//! ```
//!
//! ## Generated Code Structure
//!
//! For `palette.Color: u8 { Red, Green = 5, Blue }`:
//!
//! ```text
//! // name_lookup.rs
//! pub fn palette_Color_name(value: u8) -> Option<&'static str>;
//! pub fn enum_name(tag: &str, value: i128) -> Result<Option<&'static str>, EnumLookupError>;
//!
//! // value_table.rs
//! pub fn palette_Color_values() -> &'static [(&'static str, u8)];
//! pub fn enum_values(tag: &str) -> Result<&'static [(&'static str, i128)], EnumLookupError>;
//!
//! // try_parse.rs
//! pub fn palette_Color_try_parse(name: &str) -> Result<Option<u8>, EnumLookupError>;
//! pub fn try_parse_enum(tag: &str, name: &str) -> Result<Option<i128>, EnumLookupError>;
//!
//! // mod.rs
//! pub enum EnumLookupError { UnsupportedEnumType(String), InvalidArgument(&'static str) }
//! pub const SUPPORTED_ENUM_TAGS: &[&str] = &["palette.Color"];
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod model;
pub mod naming;
pub mod output;
pub mod registry;
pub mod resolver;
pub mod source;
pub mod validation;
pub mod writer;

pub use config::{LookupOperation, ReflectConfig};
pub use errors::{ReflectError, Result};
pub use model::{EnumDescriptor, EnumMember, IntValue, IntWidth, ResolvedEnum, ResolvedEnumValue};
pub use registry::EnumRegistry;
