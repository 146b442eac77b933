//! Enum value resolution.
//!
//! Turns a descriptor's member list into final `(name, value)` pairs:
//!
//! 1. The first member takes its explicit value, or zero.
//! 2. Every later member takes its explicit value, or the previous member's
//!    *resolved* value plus one.
//! 3. Explicit values are narrowed to the underlying width by truncation.
//! 4. Increments wrap at the underlying width, for signed and unsigned widths
//!    alike (`i8::MAX + 1` resolves to `i8::MIN`).
//!
//! Auto-values never fall back to member positions: `A = 5, B, C = 2, D`
//! resolves to `A = 5, B = 6, C = 2, D = 3`.

use tracing::{debug, trace, warn};

use crate::errors::Result;
use crate::model::{EnumDescriptor, IntValue, ResolvedEnum, ResolvedEnumValue};
use crate::validation::validate_descriptor;

/// Resolves every member of one enum.
///
/// Pure and deterministic: the same descriptor always yields the same result.
///
/// ## Examples
///
/// ```
/// use enum_reflector::model::{EnumDescriptor, IntValue, IntWidth};
/// use enum_reflector::resolver::resolve;
///
/// let color = EnumDescriptor::new("palette.Color", IntWidth::U8)
///     .member("Red")
///     .member_with_value("Green", 5)
///     .member("Blue");
///
/// let resolved = resolve(&color).unwrap();
/// let pairs: Vec<_> = resolved.values.iter().map(|v| (v.name.as_str(), v.value)).collect();
/// assert_eq!(
///     pairs,
///     vec![("Red", IntValue::U8(0)), ("Green", IntValue::U8(5)), ("Blue", IntValue::U8(6))]
/// );
/// ```
///
/// ## Errors
///
/// - `ReflectError::UnsupportedUnderlyingType` if the enum is not backed by one
///   of the eight fixed-width integers
/// - any error from [`validate_descriptor`]
pub fn resolve(descriptor: &EnumDescriptor) -> Result<ResolvedEnum> {
    let width = descriptor.underlying_width()?;
    validate_descriptor(descriptor)?;

    let mut values: Vec<ResolvedEnumValue> = Vec::with_capacity(descriptor.members.len());
    let mut previous: Option<IntValue> = None;

    for member in &descriptor.members {
        let value = match (member.explicit_value, previous) {
            (Some(explicit), _) => IntValue::coerce(explicit, width),
            (None, Some(prev)) => {
                let next = prev.wrapping_increment();
                trace!(
                    enum_name = %descriptor.name,
                    member = %member.name,
                    "auto-increment {} -> {}",
                    prev,
                    next
                );
                next
            }
            (None, None) => IntValue::zero(width),
        };

        values.push(ResolvedEnumValue::new(member.name.clone(), value));
        previous = Some(value);
    }

    debug!(
        enum_name = %descriptor.name,
        %width,
        members = values.len(),
        "resolved enum"
    );

    Ok(ResolvedEnum {
        name: descriptor.name.clone(),
        width,
        values,
    })
}

/// Resolves a batch of enums independently, preserving input order.
///
/// A failure affects only its own entry; the rest of the batch still resolves.
pub fn resolve_all(descriptors: &[EnumDescriptor]) -> Vec<Result<ResolvedEnum>> {
    descriptors
        .iter()
        .map(|descriptor| {
            let result = resolve(descriptor);
            if let Err(err) = &result {
                warn!(enum_name = %descriptor.name, error = %err, "enum skipped");
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReflectError;
    use crate::model::{ExplicitValue, IntWidth};
    use tracing_test::traced_test;

    fn values_of(resolved: &ResolvedEnum) -> Vec<(&str, i128)> {
        resolved
            .values
            .iter()
            .map(|v| (v.name.as_str(), v.value.to_i128()))
            .collect()
    }

    #[test]
    fn color_example_resolves() {
        let color = EnumDescriptor::new("Color", IntWidth::U8)
            .member("Red")
            .member_with_value("Green", 5)
            .member("Blue");

        let resolved = resolve(&color).unwrap();
        assert_eq!(resolved.width, IntWidth::U8);
        assert_eq!(values_of(&resolved), vec![("Red", 0), ("Green", 5), ("Blue", 6)]);
        assert!(resolved.values.iter().all(|v| v.width() == IntWidth::U8));
    }

    #[test]
    fn empty_enum_resolves_to_nothing() {
        let resolved = resolve(&EnumDescriptor::new("Empty", IntWidth::I64)).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn first_member_defaults_to_zero() {
        for width in IntWidth::all() {
            let descriptor = EnumDescriptor::new("Zero", width).member("First");
            let resolved = resolve(&descriptor).unwrap();
            assert_eq!(resolved.values[0].value, IntValue::zero(width));
            assert_eq!(resolved.values[0].value.to_i128(), 0);
        }
    }

    #[test]
    fn auto_values_follow_previous_resolved_value() {
        let descriptor = EnumDescriptor::new("Holes", IntWidth::I32)
            .member_with_value("A", 5)
            .member("B")
            .member_with_value("C", 2)
            .member("D");

        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(values_of(&resolved), vec![("A", 5), ("B", 6), ("C", 2), ("D", 3)]);
    }

    #[test]
    fn explicit_values_are_truncated() {
        let descriptor = EnumDescriptor::new("Narrow", IntWidth::U8)
            .member_with_value("Big", 300)
            .member("Next")
            .member_with_value("Negative", -1);

        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(values_of(&resolved), vec![("Big", 44), ("Next", 45), ("Negative", 255)]);
    }

    #[test]
    fn unsigned_increment_wraps_at_width() {
        let descriptor = EnumDescriptor::new("Wrap", IntWidth::U8)
            .member_with_value("Last", 255)
            .member("Wrapped")
            .member("After");

        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(values_of(&resolved), vec![("Last", 255), ("Wrapped", 0), ("After", 1)]);
    }

    #[test]
    fn u64_increment_wraps_at_width() {
        let descriptor = EnumDescriptor::new("Wide", IntWidth::U64)
            .member_with_value("Max", ExplicitValue::Unsigned(u64::MAX))
            .member("Wrapped");

        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(resolved.values[0].value, IntValue::U64(u64::MAX));
        assert_eq!(resolved.values[1].value, IntValue::U64(0));
    }

    #[test]
    fn signed_increment_wraps_at_width() {
        let descriptor = EnumDescriptor::new("Signed", IntWidth::I8)
            .member_with_value("Max", 127)
            .member("Min");

        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(values_of(&resolved), vec![("Max", 127), ("Min", -128)]);

        let descriptor = EnumDescriptor::new("Signed64", IntWidth::I64)
            .member_with_value("Max", i64::MAX)
            .member("Min");
        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(resolved.values[1].value, IntValue::I64(i64::MIN));
    }

    #[test]
    fn aliases_are_kept() {
        let descriptor = EnumDescriptor::new("Alias", IntWidth::I16)
            .member("Red")
            .member_with_value("Crimson", 0)
            .member("Green");

        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(values_of(&resolved), vec![("Red", 0), ("Crimson", 0), ("Green", 1)]);
    }

    #[test]
    fn unsupported_underlying_type_fails() {
        let descriptor = EnumDescriptor::with_underlying("Chars", "char").member("A");
        assert!(matches!(
            resolve(&descriptor),
            Err(ReflectError::UnsupportedUnderlyingType { .. })
        ));
    }

    #[test]
    fn managed_alias_underlying_type_resolves() {
        let descriptor = EnumDescriptor::with_underlying("Legacy", "ushort")
            .member_with_value("Top", 65535)
            .member("Wrapped");

        let resolved = resolve(&descriptor).unwrap();
        assert_eq!(resolved.width, IntWidth::U16);
        assert_eq!(values_of(&resolved), vec![("Top", 65535), ("Wrapped", 0)]);
    }

    #[traced_test]
    #[test]
    fn batch_failures_are_isolated() {
        let batch = vec![
            EnumDescriptor::new("Good", IntWidth::U8).member("A"),
            EnumDescriptor::with_underlying("Bad", "float").member("A"),
            EnumDescriptor::new("AlsoGood", IntWidth::I8).member_with_value("B", -3),
        ];

        let results = resolve_all(&batch);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name, "Good");
        assert!(matches!(
            results[1],
            Err(ReflectError::UnsupportedUnderlyingType { .. })
        ));
        assert_eq!(results[2].as_ref().unwrap().values[0].value, IntValue::I8(-3));
        assert!(logs_contain("enum skipped"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn width_strategy() -> impl Strategy<Value = IntWidth> {
            prop::sample::select(IntWidth::all())
        }

        fn members_strategy() -> impl Strategy<Value = Vec<Option<i64>>> {
            prop::collection::vec(prop::option::of(any::<i64>()), 0..24)
        }

        fn build(width: IntWidth, members: &[Option<i64>]) -> EnumDescriptor {
            members
                .iter()
                .enumerate()
                .fold(EnumDescriptor::new("Prop", width), |descriptor, (i, value)| {
                    match value {
                        Some(v) => descriptor.member_with_value(format!("M{i}"), *v),
                        None => descriptor.member(format!("M{i}")),
                    }
                })
        }

        proptest! {
            #[test]
            fn prop_explicit_values_pass_through_coerced(
                width in width_strategy(),
                explicit in prop::collection::vec(any::<i64>(), 0..24),
            ) {
                let members: Vec<Option<i64>> = explicit.iter().copied().map(Some).collect();
                let resolved = resolve(&build(width, &members)).unwrap();

                for (value, declared) in resolved.values.iter().zip(&explicit) {
                    prop_assert_eq!(value.value, IntValue::coerce(ExplicitValue::Signed(*declared), width));
                }
            }

            #[test]
            fn prop_auto_values_increment_predecessor(
                width in width_strategy(),
                members in members_strategy(),
            ) {
                let resolved = resolve(&build(width, &members)).unwrap();
                prop_assert_eq!(resolved.values.len(), members.len());

                for (i, declared) in members.iter().enumerate() {
                    let actual = resolved.values[i].value;
                    prop_assert_eq!(actual.width(), width);
                    if declared.is_none() {
                        let expected = if i == 0 {
                            IntValue::zero(width)
                        } else {
                            resolved.values[i - 1].value.wrapping_increment()
                        };
                        prop_assert_eq!(actual, expected);
                    }
                }
            }

            #[test]
            fn prop_resolution_is_deterministic(
                width in width_strategy(),
                members in members_strategy(),
            ) {
                let descriptor = build(width, &members);
                prop_assert_eq!(resolve(&descriptor).unwrap(), resolve(&descriptor).unwrap());
            }
        }
    }
}
