//! Code generation for enum lookup modules.
//!
//! The generators here turn resolved enums into Rust source text using the
//! scope-aware [`CodeWriter`](crate::writer::CodeWriter). Each enabled lookup
//! operation becomes one file; a support file ties them together.
//!
//! ## Submodules
//!
//! - [`module_docs`] - `//!` headers listing the enums a file covers
//! - [`operation`] - Per-enum helpers and the tag-dispatched aggregate function
//! - [`support`] - The generated `mod.rs` with `EnumLookupError`
//!
//! ## Output Format
//!
//! Generators return plain text, which is then:
//! - Validated with `syn::parse_file` to ensure correctness
//! - Optionally re-formatted with `prettyplease`
//!
//! See [`crate::output`] for artifact assembly and file writing.

pub mod module_docs;
pub mod operation;
pub mod support;

pub use module_docs::ModuleDocBuilder;
pub use operation::{ERROR_TYPE, generate_operation};
pub use support::generate_support_module;
