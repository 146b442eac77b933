//! Enum declarations as supplied by a front end, and their resolved form.
//!
//! ## Examples
//!
//! ```
//! use enum_reflector::model::{EnumDescriptor, IntWidth};
//!
//! let color = EnumDescriptor::new("palette.Color", IntWidth::U8)
//!     .member("Red")
//!     .member_with_value("Green", 5)
//!     .member("Blue");
//!
//! assert_eq!(color.members.len(), 3);
//! assert_eq!(color.underlying_width().unwrap(), IntWidth::U8);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use strum::{EnumIter, IntoEnumIterator};

use crate::errors::{ReflectError, Result};

/// Underlying type assumed when a declaration omits one.
pub const DEFAULT_UNDERLYING_TYPE: &str = "int";

/// The eight fixed-width integer kinds an enum may be backed by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntWidth {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
}

impl IntWidth {
    /// Parses a declared underlying type.
    ///
    /// Accepts Rust spellings (`u8`, `i64`, ...) and the managed-language aliases
    /// (`byte`, `sbyte`, `short`, `ushort`, `int`, `uint`, `long`, `ulong`), with or
    /// without a `System.` prefix on the framework names (`System.Int32`).
    ///
    /// ## Examples
    ///
    /// ```
    /// use enum_reflector::model::IntWidth;
    ///
    /// assert_eq!(IntWidth::from_declared("u8"), Some(IntWidth::U8));
    /// assert_eq!(IntWidth::from_declared("sbyte"), Some(IntWidth::I8));
    /// assert_eq!(IntWidth::from_declared("System.UInt64"), Some(IntWidth::U64));
    /// assert_eq!(IntWidth::from_declared("char"), None);
    /// ```
    pub fn from_declared(declared: &str) -> Option<Self> {
        let declared = declared.trim();
        let bare = declared.strip_prefix("System.").unwrap_or(declared);

        let width = match bare {
            "i8" | "sbyte" | "SByte" => Self::I8,
            "u8" | "byte" | "Byte" => Self::U8,
            "i16" | "short" | "Int16" => Self::I16,
            "u16" | "ushort" | "UInt16" => Self::U16,
            "i32" | "int" | "Int32" => Self::I32,
            "u32" | "uint" | "UInt32" => Self::U32,
            "i64" | "long" | "Int64" => Self::I64,
            "u64" | "ulong" | "UInt64" => Self::U64,
            _ => return None,
        };

        Some(width)
    }

    /// The Rust primitive type name used in generated code.
    pub fn rust_type(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
        }
    }

    /// Lists every supported width, for error messages and help text.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// An explicit constant as declared in source, before width coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExplicitValue {
    Signed(i64),
    Unsigned(u64),
}

impl ExplicitValue {
    /// The constant's 64-bit two's complement bit pattern.
    fn bits(self) -> u64 {
        match self {
            Self::Signed(v) => v as u64,
            Self::Unsigned(v) => v,
        }
    }
}

impl From<i64> for ExplicitValue {
    fn from(value: i64) -> Self {
        Self::Signed(value)
    }
}

impl From<i32> for ExplicitValue {
    fn from(value: i32) -> Self {
        Self::Signed(i64::from(value))
    }
}

impl From<u64> for ExplicitValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

/// An integer held in exactly one of the supported widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
}

impl IntValue {
    /// The zero value of `width`.
    pub fn zero(width: IntWidth) -> Self {
        Self::from_bits(0, width)
    }

    /// Narrows an explicit constant to `width`.
    ///
    /// High bits are dropped and the remainder is reinterpreted in the target
    /// signedness, with no range check: 300 becomes 44 as `u8`, and -1 becomes
    /// 255 as `u8`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use enum_reflector::model::{ExplicitValue, IntValue, IntWidth};
    ///
    /// assert_eq!(IntValue::coerce(ExplicitValue::Signed(300), IntWidth::U8), IntValue::U8(44));
    /// assert_eq!(IntValue::coerce(ExplicitValue::Signed(-1), IntWidth::U16), IntValue::U16(u16::MAX));
    /// assert_eq!(IntValue::coerce(ExplicitValue::Unsigned(u64::MAX), IntWidth::I32), IntValue::I32(-1));
    /// ```
    pub fn coerce(value: ExplicitValue, width: IntWidth) -> Self {
        Self::from_bits(value.bits(), width)
    }

    fn from_bits(bits: u64, width: IntWidth) -> Self {
        match width {
            IntWidth::I8 => Self::I8(bits as i8),
            IntWidth::U8 => Self::U8(bits as u8),
            IntWidth::I16 => Self::I16(bits as i16),
            IntWidth::U16 => Self::U16(bits as u16),
            IntWidth::I32 => Self::I32(bits as i32),
            IntWidth::U32 => Self::U32(bits as u32),
            IntWidth::I64 => Self::I64(bits as i64),
            IntWidth::U64 => Self::U64(bits),
        }
    }

    pub fn width(self) -> IntWidth {
        match self {
            Self::I8(_) => IntWidth::I8,
            Self::U8(_) => IntWidth::U8,
            Self::I16(_) => IntWidth::I16,
            Self::U16(_) => IntWidth::U16,
            Self::I32(_) => IntWidth::I32,
            Self::U32(_) => IntWidth::U32,
            Self::I64(_) => IntWidth::I64,
            Self::U64(_) => IntWidth::U64,
        }
    }

    /// Adds one within the value's own width, wrapping on overflow.
    ///
    /// Signed widths wrap too: `i8::MAX` increments to `i8::MIN`.
    pub fn wrapping_increment(self) -> Self {
        match self {
            Self::I8(v) => Self::I8(v.wrapping_add(1)),
            Self::U8(v) => Self::U8(v.wrapping_add(1)),
            Self::I16(v) => Self::I16(v.wrapping_add(1)),
            Self::U16(v) => Self::U16(v.wrapping_add(1)),
            Self::I32(v) => Self::I32(v.wrapping_add(1)),
            Self::U32(v) => Self::U32(v.wrapping_add(1)),
            Self::I64(v) => Self::I64(v.wrapping_add(1)),
            Self::U64(v) => Self::U64(v.wrapping_add(1)),
        }
    }

    /// Widens to `i128`, which holds every supported width losslessly.
    pub fn to_i128(self) -> i128 {
        match self {
            Self::I8(v) => i128::from(v),
            Self::U8(v) => i128::from(v),
            Self::I16(v) => i128::from(v),
            Self::U16(v) => i128::from(v),
            Self::I32(v) => i128::from(v),
            Self::U32(v) => i128::from(v),
            Self::I64(v) => i128::from(v),
            Self::U64(v) => i128::from(v),
        }
    }

    /// Rust literal with a type suffix, e.g. `5u8` or `-3i16`.
    pub fn literal(self) -> String {
        format!("{}{}", self, self.width().rust_type())
    }
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for IntValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Self::U64(v) => serializer.serialize_u64(v),
            Self::U32(v) => serializer.serialize_u32(v),
            Self::U16(v) => serializer.serialize_u16(v),
            Self::U8(v) => serializer.serialize_u8(v),
            Self::I64(v) => serializer.serialize_i64(v),
            Self::I32(v) => serializer.serialize_i32(v),
            Self::I16(v) => serializer.serialize_i16(v),
            Self::I8(v) => serializer.serialize_i8(v),
        }
    }
}

/// One declared member of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member identifier, unique within its enum (case-sensitive).
    pub name: String,
    /// Explicit constant; `None` means "previous resolved value plus one".
    #[serde(default, rename = "value", skip_serializing_if = "Option::is_none")]
    pub explicit_value: Option<ExplicitValue>,
}

impl EnumMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            explicit_value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<ExplicitValue>) -> Self {
        Self {
            name: name.into(),
            explicit_value: Some(value.into()),
        }
    }
}

fn default_underlying_type() -> String {
    DEFAULT_UNDERLYING_TYPE.to_string()
}

/// One marked enum, as reported by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Fully qualified enum name; also the runtime type tag of generated code.
    pub name: String,
    /// The underlying type exactly as declared.
    #[serde(default = "default_underlying_type", rename = "underlying")]
    pub underlying_type: String,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

impl EnumDescriptor {
    /// Creates an empty descriptor backed by `width`.
    pub fn new(name: impl Into<String>, width: IntWidth) -> Self {
        Self::with_underlying(name, width.rust_type())
    }

    /// Creates an empty descriptor with an arbitrary declared underlying type.
    ///
    /// Unsupported types are accepted here and rejected at resolution time.
    pub fn with_underlying(name: impl Into<String>, underlying_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying_type: underlying_type.into(),
            members: Vec::new(),
        }
    }

    /// Appends a member without an explicit value.
    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.members.push(EnumMember::new(name));
        self
    }

    /// Appends a member with an explicit value.
    pub fn member_with_value(mut self, name: impl Into<String>, value: impl Into<ExplicitValue>) -> Self {
        self.members.push(EnumMember::with_value(name, value));
        self
    }

    /// The declared underlying type as one of the supported widths.
    ///
    /// ## Errors
    ///
    /// Returns `ReflectError::UnsupportedUnderlyingType` for anything else.
    pub fn underlying_width(&self) -> Result<IntWidth> {
        IntWidth::from_declared(&self.underlying_type).ok_or_else(|| {
            ReflectError::UnsupportedUnderlyingType {
                enum_name: self.name.clone(),
                declared: self.underlying_type.clone(),
            }
        })
    }
}

/// A member after auto-increment and width coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnumValue {
    pub name: String,
    pub value: IntValue,
}

impl ResolvedEnumValue {
    pub fn new(name: impl Into<String>, value: IntValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn width(&self) -> IntWidth {
        self.value.width()
    }
}

/// All resolved members of one enum, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnum {
    pub name: String,
    pub width: IntWidth,
    pub values: Vec<ResolvedEnumValue>,
}

impl ResolvedEnum {
    /// Finds the first member declared with `value`.
    pub fn name_of(&self, value: i128) -> Option<&str> {
        self.values
            .iter()
            .find(|member| member.value.to_i128() == value)
            .map(|member| member.name.as_str())
    }

    /// Finds the value of the member named exactly `name`.
    pub fn value_of(&self, name: &str) -> Option<IntValue> {
        self.values
            .iter()
            .find(|member| member.name == name)
            .map(|member| member.value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
