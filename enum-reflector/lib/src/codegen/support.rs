//! Support module generation.
//!
//! The support module is the generated `mod.rs`. It declares the enabled
//! operation modules, re-exports their aggregate functions, lists the covered
//! type tags and defines the error type every lookup returns.

use crate::codegen::module_docs::ModuleDocBuilder;
use crate::codegen::operation::ERROR_TYPE;
use crate::config::ReflectConfig;
use crate::model::ResolvedEnum;
use crate::writer::{CodeWriter, Delimiter};

/// Generates the support module source.
///
/// ## Examples
///
/// ```
/// use enum_reflector::codegen::generate_support_module;
/// use enum_reflector::config::ReflectConfig;
///
/// let code = generate_support_module(&[], &ReflectConfig::default());
/// assert!(code.contains("pub mod name_lookup;"));
/// assert!(code.contains("pub const SUPPORTED_ENUM_TAGS: &[&str] = &[];"));
/// ```
pub fn generate_support_module(enums: &[ResolvedEnum], config: &ReflectConfig) -> String {
    let mut w = CodeWriter::new(config.indent.clone());

    ModuleDocBuilder::new(
        format!("Lookup helpers for enums marked with `#[{}]`.", config.marker),
        enums,
    )
    .write(&mut w);
    w.blank();

    let operations = config.enabled_operations();
    for operation in &operations {
        w.line(format!("pub mod {};", operation.module_name()));
    }
    w.blank();
    for operation in &operations {
        w.line(format!(
            "pub use {}::{};",
            operation.module_name(),
            operation.dispatcher_name()
        ));
    }
    w.blank();

    write_tags(&mut w, enums);
    w.blank();
    write_error_type(&mut w, &config.marker);

    w.finish()
}

fn write_tags(w: &mut CodeWriter, enums: &[ResolvedEnum]) {
    w.line("/// Type tags of every reflected enum, in dispatch order.");
    if enums.is_empty() {
        w.line("pub const SUPPORTED_ENUM_TAGS: &[&str] = &[];");
        return;
    }

    let mut tags = w.scope_with(
        "pub const SUPPORTED_ENUM_TAGS: &[&str] = &",
        Delimiter::Bracket,
        Some(";"),
    );
    for resolved in enums {
        tags.line(format!("{:?},", resolved.name));
    }
}

fn write_error_type(w: &mut CodeWriter, marker: &str) {
    let unsupported = format!("only enums marked with #[{marker}] are supported");

    w.line(format!("const UNSUPPORTED_HINT: &str = {unsupported:?};"));
    w.blank();

    w.line("/// Error returned by generated enum lookups.");
    w.line("///");
    w.line("/// A value or name missing from a reflected enum is not an error; lookups");
    w.line("/// report it as `None`.");
    w.line("#[derive(Debug, Clone, PartialEq, Eq)]");
    {
        let mut body = w.scope(format!("pub enum {ERROR_TYPE}"));
        body.line("/// The type tag does not belong to a reflected enum.");
        body.line("UnsupportedEnumType(String),");
        body.line("/// The named argument was blank.");
        body.line("InvalidArgument(&'static str),");
    }
    w.blank();

    {
        let mut display = w.scope(format!("impl std::fmt::Display for {ERROR_TYPE}"));
        let mut fmt =
            display.scope("fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result");
        let mut arms = fmt.scope("match self");
        {
            let mut arm = arms.scope("Self::UnsupportedEnumType(tag) =>");
            arm.line("write!(f, \"unsupported enum type '{tag}': {UNSUPPORTED_HINT}\")");
        }
        {
            let mut arm = arms.scope("Self::InvalidArgument(argument) =>");
            arm.line("write!(f, \"invalid argument '{argument}': value cannot be blank\")");
        }
    }
    w.blank();

    w.line(format!("impl std::error::Error for {ERROR_TYPE} {{}}"));
}
