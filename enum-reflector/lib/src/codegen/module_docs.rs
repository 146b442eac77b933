//! Module documentation for generated lookup files.
//!
//! Every generated file opens with `//!` documentation listing the enums it
//! covers, so a reader of the output can tell what was reflected without
//! opening the manifest.

use crate::config::LookupOperation;
use crate::model::ResolvedEnum;
use crate::writer::CodeWriter;

/// Builds the `//!` header of a generated file.
///
/// ## Examples
///
/// ```
/// use enum_reflector::codegen::ModuleDocBuilder;
/// use enum_reflector::writer::CodeWriter;
///
/// let mut w = CodeWriter::new("    ");
/// ModuleDocBuilder::new("Lookup helpers.", &[]).write(&mut w);
/// assert!(w.finish().starts_with("//! Lookup helpers.\n"));
/// ```
pub struct ModuleDocBuilder<'a> {
    title: String,
    enums: &'a [ResolvedEnum],
    example: Option<LookupOperation>,
}

impl<'a> ModuleDocBuilder<'a> {
    /// Creates a builder with a one-line title.
    pub fn new(title: impl Into<String>, enums: &'a [ResolvedEnum]) -> Self {
        Self {
            title: title.into(),
            enums,
            example: None,
        }
    }

    /// Adds a usage example for `operation`'s aggregate function.
    pub fn with_example(mut self, operation: LookupOperation) -> Self {
        self.example = Some(operation);
        self
    }

    /// Writes the documentation lines.
    pub fn write(&self, w: &mut CodeWriter) {
        w.line(format!("//! {}", self.title));
        w.line("//!");

        for line in self.coverage_section() {
            w.line(doc_line(&line));
        }

        if let Some(lines) = self.example_section() {
            w.line("//!");
            for line in lines {
                w.line(doc_line(&line));
            }
        }
    }

    fn coverage_section(&self) -> Vec<String> {
        if self.enums.is_empty() {
            return vec!["No enums are covered; every lookup reports an unsupported type.".to_string()];
        }

        let mut lines = vec!["Covered enums, in dispatch order:".to_string(), String::new()];
        lines.extend(self.enums.iter().map(|resolved| {
            let count = resolved.values.len();
            format!(
                "- `{}` (`{}`, {} member{})",
                resolved.name,
                resolved.width,
                count,
                if count == 1 { "" } else { "s" }
            )
        }));
        lines
    }

    fn example_section(&self) -> Option<Vec<String>> {
        let operation = self.example?;
        let resolved = self.enums.iter().find(|resolved| !resolved.is_empty())?;
        let member = &resolved.values[0];

        let call = match operation {
            LookupOperation::NameLookup => format!(
                "assert_eq!(enum_name({:?}, {})?, Some({:?}));",
                resolved.name,
                member.value,
                resolved.name_of(member.value.to_i128()).unwrap_or(&member.name)
            ),
            LookupOperation::ValueTable => format!(
                "assert_eq!(enum_values({:?})?[0], ({:?}, {}));",
                resolved.name, member.name, member.value
            ),
            LookupOperation::TryParse => format!(
                "assert_eq!(try_parse_enum({:?}, {:?})?, Some({}));",
                resolved.name,
                member.name,
                resolved.value_of(&member.name).unwrap_or(member.value)
            ),
        };

        Some(vec![
            "## Example".to_string(),
            String::new(),
            "```ignore".to_string(),
            call,
            "```".to_string(),
        ])
    }
}

fn doc_line(text: &str) -> String {
    if text.is_empty() {
        "//!".to_string()
    } else {
        format!("//! {text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IntValue, IntWidth, ResolvedEnumValue};

    fn color() -> ResolvedEnum {
        ResolvedEnum {
            name: "palette.Color".to_string(),
            width: IntWidth::U8,
            values: vec![
                ResolvedEnumValue::new("Red", IntValue::U8(0)),
                ResolvedEnumValue::new("Green", IntValue::U8(5)),
            ],
        }
    }

    #[test]
    fn coverage_lists_each_enum() {
        let enums = vec![color()];
        let mut w = CodeWriter::new("    ");
        ModuleDocBuilder::new("Title.", &enums).write(&mut w);
        let text = w.finish();

        assert!(text.contains("//! Title."));
        assert!(text.contains("//! - `palette.Color` (`u8`, 2 members)"));
        assert!(!text.contains("## Example"));
    }

    #[test]
    fn example_uses_first_member() {
        let enums = vec![color()];
        let mut w = CodeWriter::new("    ");
        ModuleDocBuilder::new("Title.", &enums)
            .with_example(LookupOperation::TryParse)
            .write(&mut w);
        let text = w.finish();

        assert!(text.contains("//! ## Example"));
        assert!(text.contains(r#"//! assert_eq!(try_parse_enum("palette.Color", "Red")?, Some(0));"#));
    }

    #[test]
    fn empty_coverage_is_explained() {
        let mut w = CodeWriter::new("    ");
        ModuleDocBuilder::new("Title.", &[])
            .with_example(LookupOperation::NameLookup)
            .write(&mut w);
        let text = w.finish();

        assert!(text.contains("No enums are covered"));
        assert!(!text.contains("## Example"));
        assert!(text.lines().all(|line| line.starts_with("//!")));
    }
}
