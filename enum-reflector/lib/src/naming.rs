//! Discriminator derivation from fully qualified enum names.
//!
//! Several enums share one generated module, so every per-enum item is prefixed
//! with a discriminator derived from the enum's fully qualified name. Separators
//! that cannot appear in an identifier collapse into single underscores:
//!
//! - `palette.Color` -> `palette_Color`
//! - `crate::shapes::Kind` -> `crate_shapes_Kind`
//! - `Outer+Nested` -> `Outer_Nested`
//! - `Result<Code>` -> `Result_Code`
//!
//! Case is preserved, so `a.Color` and `a.color` stay distinct.
//!
//! Distinct names can still collapse to the same text (`a.b_Color` and
//! `a_b.Color`). [`assign_discriminators`] resolves that per batch by numbering
//! later arrivals: `a_b_Color`, then `a_b_Color_2`.

use std::collections::HashSet;

use crate::errors::{ReflectError, Result};

/// Characters treated as namespace or nesting separators.
const SEPARATORS: &[char] = &['.', ':', '+', '/', '\\', '-', '<', '>', ',', '`', '[', ']'];

/// Derives the generated-identifier discriminator for an enum.
///
/// ## Examples
///
/// ```
/// use enum_reflector::naming::discriminator;
///
/// assert_eq!(discriminator("palette.Color").unwrap(), "palette_Color");
/// assert_eq!(discriminator("crate::shapes::Kind").unwrap(), "crate_shapes_Kind");
/// assert!(discriminator("...").is_err());
/// ```
///
/// ## Errors
///
/// Returns `ReflectError::InvalidEnumName` when the name contains control
/// characters, when nothing identifier-like is left, or when the joined
/// segments do not form a valid Rust identifier (a leading digit, a bare
/// keyword such as `type`, or stray punctuation).
pub fn discriminator(enum_name: &str) -> Result<String> {
    if enum_name.chars().any(char::is_control) {
        return Err(ReflectError::InvalidEnumName {
            name: enum_name.to_string(),
            reason: "name contains control characters".to_string(),
        });
    }

    let segments: Vec<&str> = enum_name
        .split(|c: char| SEPARATORS.contains(&c) || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return Err(ReflectError::InvalidEnumName {
            name: enum_name.to_string(),
            reason: "name has no identifier segments".to_string(),
        });
    }

    let joined = segments.join("_");
    if syn::parse_str::<syn::Ident>(&joined).is_err() {
        return Err(ReflectError::InvalidEnumName {
            name: enum_name.to_string(),
            reason: format!("'{joined}' is not a valid identifier"),
        });
    }

    Ok(joined)
}

/// Assigns a unique discriminator to every name in a batch, in order.
///
/// The first enum to claim a base discriminator keeps it; later ones get the
/// lowest free numeric suffix starting at `_2`. The result depends only on the
/// input order, so regenerating the same batch yields the same identifiers.
///
/// ## Examples
///
/// ```
/// use enum_reflector::naming::assign_discriminators;
///
/// let names = assign_discriminators(["a.b_Color", "a_b.Color", "Level"]).unwrap();
/// assert_eq!(names, ["a_b_Color", "a_b_Color_2", "Level"]);
/// ```
///
/// ## Errors
///
/// Returns `ReflectError::InvalidEnumName` for the first name that cannot
/// become a discriminator.
pub fn assign_discriminators<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Vec<String>> {
    let mut taken = HashSet::new();
    let mut assigned = Vec::new();

    for name in names {
        let base = discriminator(name)?;
        let mut candidate = base.clone();
        let mut suffix = 2u32;
        while taken.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        assigned.push(candidate);
    }

    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_namespaces_join_with_underscores() {
        assert_eq!(discriminator("Color").unwrap(), "Color");
        assert_eq!(discriminator("palette.Color").unwrap(), "palette_Color");
        assert_eq!(discriminator("A.B.C.D").unwrap(), "A_B_C_D");
    }

    #[test]
    fn path_separators_collapse() {
        assert_eq!(discriminator("crate::shapes::Kind").unwrap(), "crate_shapes_Kind");
        assert_eq!(discriminator("::Rooted").unwrap(), "Rooted");
        assert_eq!(discriminator("Outer+Nested").unwrap(), "Outer_Nested");
        assert_eq!(discriminator("Result<Code>").unwrap(), "Result_Code");
        assert_eq!(discriminator("ns . Spaced").unwrap(), "ns_Spaced");
    }

    #[test]
    fn case_is_preserved() {
        assert_ne!(discriminator("a.Color").unwrap(), discriminator("a.color").unwrap());
    }

    #[test]
    fn blank_names_are_rejected() {
        for name in ["", "   ", "..", "::"] {
            match discriminator(name) {
                Err(ReflectError::InvalidEnumName { reason, .. }) => {
                    assert!(reason.contains("no identifier"), "{name}: {reason}");
                }
                other => panic!("Expected InvalidEnumName for {name:?}, got: {:?}", other),
            }
        }
    }

    #[test]
    fn non_identifier_results_are_rejected() {
        for name in ["9Lives", "type", "a.b$c", "x.(y)", "a\nb"] {
            assert!(
                matches!(discriminator(name), Err(ReflectError::InvalidEnumName { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn colliding_names_get_numbered_suffixes() {
        let names = assign_discriminators(["a.b_Color", "a_b.Color", "a::b::Color"]).unwrap();
        assert_eq!(names, ["a_b_Color", "a_b_Color_2", "a_b_Color_3"]);
    }

    #[test]
    fn suffixes_skip_names_already_taken() {
        let names = assign_discriminators(["a_b_Color_2", "a.b_Color", "a_b.Color"]).unwrap();
        assert_eq!(names, ["a_b_Color_2", "a_b_Color", "a_b_Color_3"]);

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn distinct_names_keep_their_base() {
        let names = assign_discriminators(["a.Color", "b.Color", "Color"]).unwrap();
        assert_eq!(names, ["a_Color", "b_Color", "Color"]);
    }

    #[test]
    fn assignment_stops_at_invalid_name() {
        assert!(matches!(
            assign_discriminators(["a.Color", "9Lives"]),
            Err(ReflectError::InvalidEnumName { .. })
        ));
    }
}
