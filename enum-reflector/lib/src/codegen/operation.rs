//! Lookup operation generation.
//!
//! One templated routine, [`generate_operation`], emits every lookup operation.
//! For an operation and a list of resolved enums it writes:
//!
//! 1. one typed helper per enum, `<discriminator>_<suffix>`, using the enum's
//!    exact underlying width and scanning members in declaration order
//!    (discriminators are unique per batch, see
//!    [`assign_discriminators`](crate::naming::assign_discriminators));
//! 2. one aggregate function that compares the runtime type tag against every
//!    enum in discovery order and delegates to the matching helper, falling
//!    through to `EnumLookupError::UnsupportedEnumType`.
//!
//! Only the pieces that genuinely differ between operations (signatures,
//! per-member lines, fallbacks) are chosen per operation.
//!
//! ## Generated Code
//!
//! For `palette.Color: u8 { Red, Green = 5, Blue }` and name lookup:
//!
//! ```text
//! #[allow(non_snake_case)]
//! pub fn palette_Color_name(value: u8) -> Option<&'static str> {
//!     if value == 0u8 {
//!         return Some("Red");
//!     }
//!     ...
//!     None
//! }
//!
//! pub fn enum_name(tag: &str, value: i128) -> Result<Option<&'static str>, EnumLookupError> {
//!     if tag == "palette.Color" {
//!         return Ok(u8::try_from(value).ok().and_then(palette_Color_name));
//!     }
//!     Err(EnumLookupError::UnsupportedEnumType(tag.to_string()))
//! }
//! ```

use tracing::debug;

use crate::codegen::module_docs::ModuleDocBuilder;
use crate::config::{LookupOperation, ReflectConfig};
use crate::errors::Result;
use crate::model::{ResolvedEnum, ResolvedEnumValue};
use crate::naming::assign_discriminators;
use crate::writer::{CodeWriter, Delimiter};

/// Name of the generated error type, defined in the support module.
pub const ERROR_TYPE: &str = "EnumLookupError";

/// Generates the source of one lookup operation for all `enums`.
///
/// ## Errors
///
/// Returns `ReflectError::InvalidEnumName` if an enum name cannot produce a
/// discriminator. No text is returned in that case.
pub fn generate_operation(
    operation: LookupOperation,
    enums: &[ResolvedEnum],
    config: &ReflectConfig,
) -> Result<String> {
    let mut w = CodeWriter::new(config.indent.clone());

    ModuleDocBuilder::new(title(operation), enums)
        .with_example(operation)
        .write(&mut w);
    w.blank();
    w.line(format!("use super::{ERROR_TYPE};"));

    let names = assign_discriminators(enums.iter().map(|resolved| resolved.name.as_str()))?;
    for (resolved, name) in enums.iter().zip(&names) {
        w.blank();
        write_helper(&mut w, operation, resolved, name);
    }

    w.blank();
    write_dispatcher(&mut w, operation, enums, &names);

    debug!(%operation, enums = enums.len(), "generated lookup operation");
    Ok(w.finish())
}

fn title(operation: LookupOperation) -> &'static str {
    match operation {
        LookupOperation::NameLookup => "Member-name lookup for reflected enums.",
        LookupOperation::ValueTable => "Declaration-ordered value tables for reflected enums.",
        LookupOperation::TryParse => "Name-to-value parsing for reflected enums.",
    }
}

/// Writes the typed per-enum helper.
fn write_helper(
    w: &mut CodeWriter,
    operation: LookupOperation,
    resolved: &ResolvedEnum,
    name: &str,
) {
    let ty = resolved.width.rust_type();
    let helper = format!("{name}_{}", operation.helper_suffix());

    match operation {
        LookupOperation::NameLookup => {
            w.line(format!(
                "/// Returns the name of the first `{}` member declared with `value`.",
                resolved.name
            ));
        }
        LookupOperation::ValueTable => {
            w.line(format!(
                "/// Returns every `{}` member with its value, in declaration order.",
                resolved.name
            ));
        }
        LookupOperation::TryParse => {
            w.line(format!(
                "/// Parses the exact (case-sensitive) name of a `{}` member.",
                resolved.name
            ));
            w.line("///");
            w.line("/// Fails with `InvalidArgument` for a blank name.");
        }
    }
    w.line("#[allow(non_snake_case)]");

    let signature = match operation {
        LookupOperation::NameLookup if resolved.is_empty() => {
            format!("pub fn {helper}(_value: {ty}) -> Option<&'static str>")
        }
        LookupOperation::NameLookup => format!("pub fn {helper}(value: {ty}) -> Option<&'static str>"),
        LookupOperation::ValueTable => {
            format!("pub fn {helper}() -> &'static [(&'static str, {ty})]")
        }
        LookupOperation::TryParse => format!(
            "pub fn {helper}(name: &str) -> Result<Option<{ty}>, {ERROR_TYPE}>"
        ),
    };

    let mut body = w.scope(signature);
    match operation {
        LookupOperation::NameLookup => {
            write_member_scan(&mut body, &resolved.values, |member| {
                (
                    format!("if value == {}", member.value.literal()),
                    format!("return Some({:?});", member.name),
                )
            });
            body.line("None");
        }
        LookupOperation::ValueTable => {
            if resolved.is_empty() {
                body.line("&[]");
            } else {
                let mut table = body.scope_with("&", Delimiter::Bracket, None);
                for member in &resolved.values {
                    table.line(format!("({:?}, {}),", member.name, member.value.literal()));
                }
            }
        }
        LookupOperation::TryParse => {
            write_blank_name_guard(&mut body);
            write_member_scan(&mut body, &resolved.values, |member| {
                (
                    format!("if name == {:?}", member.name),
                    format!("return Ok(Some({}));", member.value.literal()),
                )
            });
            body.line("Ok(None)");
        }
    }
}

/// Writes one `if <condition> { <result> }` block per member, in declaration
/// order, so the first declared match wins.
fn write_member_scan<F>(w: &mut CodeWriter, members: &[ResolvedEnumValue], arm: F)
where
    F: Fn(&ResolvedEnumValue) -> (String, String),
{
    for member in members {
        let (condition, result) = arm(member);
        let mut branch = w.scope(condition);
        branch.line(result);
    }
}

fn write_blank_name_guard(w: &mut CodeWriter) {
    let mut guard = w.scope("if name.trim().is_empty()");
    guard.line(format!("return Err({ERROR_TYPE}::InvalidArgument(\"name\"));"));
}

/// Writes the aggregate, tag-dispatched function. `names` pairs with `enums`.
fn write_dispatcher(
    w: &mut CodeWriter,
    operation: LookupOperation,
    enums: &[ResolvedEnum],
    names: &[String],
) {
    let function = operation.dispatcher_name();

    let signature = match operation {
        LookupOperation::NameLookup => {
            w.line("/// Returns the member name for `value` in the enum tagged `tag`.");
            w.line("///");
            w.line("/// A value that no member declares (or that does not fit the enum's");
            w.line("/// underlying type) yields `Ok(None)`.");
            format!(
                "pub fn {function}(tag: &str, value: i128) -> Result<Option<&'static str>, {ERROR_TYPE}>"
            )
        }
        LookupOperation::ValueTable => {
            w.line("/// Returns every `(name, value)` pair of the enum tagged `tag`, in");
            w.line("/// declaration order.");
            format!(
                "pub fn {function}(tag: &str) -> Result<&'static [(&'static str, i128)], {ERROR_TYPE}>"
            )
        }
        LookupOperation::TryParse => {
            w.line("/// Parses a member name of the enum tagged `tag`.");
            w.line("///");
            w.line("/// A blank name fails with `InvalidArgument` before the tag is looked at;");
            w.line("/// an unknown name yields `Ok(None)`.");
            format!(
                "pub fn {function}(tag: &str, name: &str) -> Result<Option<i128>, {ERROR_TYPE}>"
            )
        }
    };

    let mut body = w.scope(signature);
    match operation {
        LookupOperation::NameLookup if enums.is_empty() => {
            body.line("let _ = value;");
        }
        LookupOperation::TryParse => write_blank_name_guard(&mut body),
        _ => {}
    }

    for (resolved, name) in enums.iter().zip(names) {
        let helper = format!("{name}_{}", operation.helper_suffix());
        let mut branch = body.scope(format!("if tag == {:?}", resolved.name));

        match operation {
            LookupOperation::NameLookup => {
                branch.line(format!(
                    "return Ok({}::try_from(value).ok().and_then({helper}));",
                    resolved.width.rust_type()
                ));
            }
            LookupOperation::ValueTable => write_wide_table(&mut branch, resolved),
            LookupOperation::TryParse => {
                branch.line(format!("return {helper}(name).map(|value| value.map(i128::from));"));
            }
        }
    }

    body.line(format!(
        "Err({ERROR_TYPE}::UnsupportedEnumType(tag.to_string()))"
    ));
}

/// Writes the `i128` copy of an enum's value table as a promoted constant.
fn write_wide_table(w: &mut CodeWriter, resolved: &ResolvedEnum) {
    if resolved.is_empty() {
        w.line("return Ok(&[]);");
        return;
    }

    let mut table = w.scope_with("return Ok(&", Delimiter::Bracket, Some(");"));
    for member in &resolved.values {
        table.line(format!("({:?}, {}),", member.name, member.value.to_i128()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IntValue, IntWidth};

    fn color() -> ResolvedEnum {
        ResolvedEnum {
            name: "palette.Color".to_string(),
            width: IntWidth::U8,
            values: vec![
                ResolvedEnumValue::new("Red", IntValue::U8(0)),
                ResolvedEnumValue::new("Green", IntValue::U8(5)),
                ResolvedEnumValue::new("Blue", IntValue::U8(6)),
            ],
        }
    }

    fn signed() -> ResolvedEnum {
        ResolvedEnum {
            name: "crate::Level".to_string(),
            width: IntWidth::I8,
            values: vec![
                ResolvedEnumValue::new("Low", IntValue::I8(-128)),
                ResolvedEnumValue::new("Alias", IntValue::I8(-128)),
            ],
        }
    }

    fn empty() -> ResolvedEnum {
        ResolvedEnum {
            name: "Empty".to_string(),
            width: IntWidth::U64,
            values: vec![],
        }
    }

    fn generate(operation: LookupOperation, enums: &[ResolvedEnum]) -> String {
        generate_operation(operation, enums, &ReflectConfig::default()).unwrap()
    }

    fn assert_parses(code: &str) {
        if let Err(e) = syn::parse_file(code) {
            panic!("generated code does not parse: {e}\n{code}");
        }
    }

    #[test]
    fn name_lookup_scans_members_in_order() {
        let code = generate(LookupOperation::NameLookup, &[color()]);
        assert_parses(&code);

        assert!(code.contains("pub fn palette_Color_name(value: u8) -> Option<&'static str> {"));
        let red = code.find("if value == 0u8 {").unwrap();
        let green = code.find("if value == 5u8 {").unwrap();
        let blue = code.find("if value == 6u8 {").unwrap();
        assert!(red < green && green < blue);
        assert!(code.contains("        return Some(\"Green\");"));
        assert!(code.contains(
            "return Ok(u8::try_from(value).ok().and_then(palette_Color_name));"
        ));
        assert!(code.contains("Err(EnumLookupError::UnsupportedEnumType(tag.to_string()))"));
    }

    #[test]
    fn value_table_keeps_declaration_order() {
        let code = generate(LookupOperation::ValueTable, &[color()]);
        assert_parses(&code);

        assert!(code.contains(
            "pub fn palette_Color_values() -> &'static [(&'static str, u8)] {"
        ));
        assert!(code.contains("    &[\n        (\"Red\", 0u8),\n        (\"Green\", 5u8),\n        (\"Blue\", 6u8),\n    ]\n"));
        assert!(code.contains("        return Ok(&[\n            (\"Red\", 0),\n"));
        assert!(code.contains("        ]);\n"));
    }

    #[test]
    fn try_parse_checks_blank_names_first() {
        let code = generate(LookupOperation::TryParse, &[color()]);
        assert_parses(&code);

        let dispatcher = code.find("pub fn try_parse_enum").unwrap();
        let guard = code[dispatcher..].find("if name.trim().is_empty()").unwrap();
        let tag = code[dispatcher..].find("if tag ==").unwrap();
        assert!(guard < tag);
        assert!(code.contains("if name == \"Blue\" {"));
        assert!(code.contains("return Ok(Some(6u8));"));
        assert!(code.contains("return palette_Color_try_parse(name).map(|value| value.map(i128::from));"));
    }

    #[test]
    fn negative_values_and_aliases_are_emitted() {
        let code = generate(LookupOperation::NameLookup, &[signed()]);
        assert_parses(&code);

        assert!(code.contains("pub fn crate_Level_name(value: i8)"));
        assert_eq!(code.matches("if value == -128i8 {").count(), 2);
        let low = code.find("return Some(\"Low\");").unwrap();
        let alias = code.find("return Some(\"Alias\");").unwrap();
        assert!(low < alias);
    }

    #[test]
    fn empty_enums_fall_back_to_no_match() {
        for operation in [
            LookupOperation::NameLookup,
            LookupOperation::ValueTable,
            LookupOperation::TryParse,
        ] {
            let code = generate(operation, &[empty()]);
            assert_parses(&code);
        }

        let name = generate(LookupOperation::NameLookup, &[empty()]);
        assert!(name.contains("pub fn Empty_name(_value: u64) -> Option<&'static str> {\n    None\n}"));

        let table = generate(LookupOperation::ValueTable, &[empty()]);
        assert!(table.contains("return Ok(&[]);"));

        let parse = generate(LookupOperation::TryParse, &[empty()]);
        assert!(parse.contains("    Ok(None)\n}"));
    }

    #[test]
    fn no_enums_still_produces_dispatchers() {
        for operation in [
            LookupOperation::NameLookup,
            LookupOperation::ValueTable,
            LookupOperation::TryParse,
        ] {
            let code = generate(operation, &[]);
            assert_parses(&code);
            assert!(code.contains(&format!("pub fn {}(", operation.dispatcher_name())));
            assert!(!code.contains("if tag =="));
        }

        let code = generate(LookupOperation::NameLookup, &[]);
        assert!(code.contains("let _ = value;"));
    }

    #[test]
    fn dispatch_follows_discovery_order() {
        let code = generate(LookupOperation::TryParse, &[signed(), color(), empty()]);
        assert_parses(&code);

        let level = code.find("if tag == \"crate::Level\"").unwrap();
        let color = code.find("if tag == \"palette.Color\"").unwrap();
        let empty = code.find("if tag == \"Empty\"").unwrap();
        assert!(level < color && color < empty);
    }

    #[test]
    fn colliding_discriminators_get_distinct_helpers() {
        let first = ResolvedEnum { name: "a.b_Color".to_string(), ..color() };
        let second = ResolvedEnum { name: "a_b.Color".to_string(), ..signed() };
        let code = generate(LookupOperation::NameLookup, &[first, second]);
        assert_parses(&code);

        assert!(code.contains("pub fn a_b_Color_name(value: u8)"));
        assert!(code.contains("pub fn a_b_Color_2_name(value: i8)"));
        assert!(code.contains(
            "if tag == \"a.b_Color\" {\n        return Ok(u8::try_from(value).ok().and_then(a_b_Color_name));"
        ));
        assert!(code.contains(
            "if tag == \"a_b.Color\" {\n        return Ok(i8::try_from(value).ok().and_then(a_b_Color_2_name));"
        ));
    }

    #[test]
    fn custom_indent_is_used() {
        let config = ReflectConfig::new().indent("\t");
        let code = generate_operation(LookupOperation::NameLookup, &[color()], &config).unwrap();
        assert!(code.contains("\n\tif value == 0u8 {\n\t\treturn Some(\"Red\");\n\t}\n"));
    }

    #[test]
    fn names_are_escaped_as_string_literals() {
        let odd = ResolvedEnum {
            name: "quotes.Odd".to_string(),
            width: IntWidth::I32,
            values: vec![ResolvedEnumValue::new("say \"hi\"", IntValue::I32(1))],
        };
        let code = generate(LookupOperation::TryParse, &[odd]);
        assert_parses(&code);
        assert!(code.contains(r#"if name == "say \"hi\"" {"#));
    }
}
