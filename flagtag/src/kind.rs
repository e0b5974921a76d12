//! The closed set of field kinds a tag can bind, and their typed values.
//!
//! Every kind owns its parse and format rules so the rest of the crate never
//! switches on type names.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Scalar or sequence kind of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// `bool`
    Bool,
    /// `f64`
    Float64,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `String`
    Text,
    /// `u32`
    Uint32,
    /// `u64`
    Uint64,
    /// `Vec<String>`, only valid for the positional slot.
    TextList,
}

impl OptionKind {
    /// Rust type name of the kind.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float64 => "f64",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Text => "String",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::TextList => "Vec<String>",
        }
    }

    /// Placeholder shown in help output for flags of this kind.
    #[must_use]
    pub const fn value_name(self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Float64 => "FLOAT",
            Self::Int32 | Self::Int64 => "INT",
            Self::Text => "STRING",
            Self::Uint32 | Self::Uint64 => "UINT",
            Self::TextList => "ARGS",
        }
    }

    /// Returns `true` for kinds that can back a named flag.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::TextList)
    }

    /// The value a flag of this kind takes when no default is given.
    ///
    /// Returns `None` for [`OptionKind::TextList`].
    #[must_use]
    pub fn zero(self) -> Option<Value> {
        Some(match self {
            Self::Bool => Value::Bool(false),
            Self::Float64 => Value::Float64(0.0),
            Self::Int32 => Value::Int32(0),
            Self::Int64 => Value::Int64(0),
            Self::Text => Value::Text(String::new()),
            Self::Uint32 => Value::Uint32(0),
            Self::Uint64 => Value::Uint64(0),
            Self::TextList => return None,
        })
    }

    /// Parses `raw` as a value of this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseValueError`] when the text is not a valid literal for
    /// the kind, or when the kind is [`OptionKind::TextList`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtag::{OptionKind, Value};
    ///
    /// assert_eq!(OptionKind::Int32.parse("-10").ok(), Some(Value::Int32(-10)));
    /// assert!(OptionKind::Bool.parse("Nein").is_err());
    /// ```
    pub fn parse(self, raw: &str) -> Result<Value, ParseValueError> {
        Ok(match self {
            Self::Bool => Value::Bool(parse_bool(raw)?),
            Self::Float64 => Value::Float64(raw.parse()?),
            Self::Int32 => Value::Int32(raw.parse()?),
            Self::Int64 => Value::Int64(raw.parse()?),
            Self::Text => Value::Text(raw.to_owned()),
            Self::Uint32 => Value::Uint32(raw.parse()?),
            Self::Uint64 => Value::Uint64(raw.parse()?),
            Self::TextList => return Err(ParseValueError::NotScalar),
        })
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Accepts the spellings understood by classic flag parsers.
fn parse_bool(raw: &str) -> Result<bool, ParseValueError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseValueError::Bool(raw.to_owned())),
    }
}

/// Failure to read a flag value from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    /// Text is not a recognised boolean spelling.
    #[error("'{0}' is not a boolean")]
    Bool(String),
    /// Text is not a valid integer for the target width.
    #[error(transparent)]
    Int(#[from] ParseIntError),
    /// Text is not a valid float.
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    /// Sequences have no single-value text form.
    #[error("sequences cannot be parsed from a single value")]
    NotScalar,
}

/// A typed scalar value written through a field reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// 64-bit float value.
    Float64(f64),
    /// 32-bit signed value.
    Int32(i32),
    /// 64-bit signed value.
    Int64(i64),
    /// Text value.
    Text(String),
    /// 32-bit unsigned value.
    Uint32(u32),
    /// 64-bit unsigned value.
    Uint64(u64),
}

impl Value {
    /// Kind this value belongs to.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        match self {
            Self::Bool(_) => OptionKind::Bool,
            Self::Float64(_) => OptionKind::Float64,
            Self::Int32(_) => OptionKind::Int32,
            Self::Int64(_) => OptionKind::Int64,
            Self::Text(_) => OptionKind::Text,
            Self::Uint32(_) => OptionKind::Uint32,
            Self::Uint64(_) => OptionKind::Uint64,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Uint32(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Parse and format rules for each kind.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::one("1", true)]
    #[case::t("t", true)]
    #[case::upper_t("T", true)]
    #[case::shout("TRUE", true)]
    #[case::title("True", true)]
    #[case::zero("0", false)]
    #[case::f("f", false)]
    #[case::lower("false", false)]
    #[case::title_false("False", false)]
    fn bool_spellings(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(OptionKind::Bool.parse(raw), Ok(Value::Bool(expected)));
    }

    #[rstest]
    #[case::german(OptionKind::Bool, "Nein")]
    #[case::yes(OptionKind::Bool, "yes")]
    #[case::float_word(OptionKind::Float64, "true")]
    #[case::int_word(OptionKind::Int32, "true")]
    #[case::int32_overflow(OptionKind::Int32, "2147483648")]
    #[case::int64_float(OptionKind::Int64, "1.5")]
    #[case::uint_negative(OptionKind::Uint32, "-1")]
    #[case::uint64_word(OptionKind::Uint64, "true")]
    #[case::sequence(OptionKind::TextList, "a")]
    fn rejects_invalid_text(#[case] kind: OptionKind, #[case] raw: &str) {
        assert!(kind.parse(raw).is_err(), "{kind} accepted {raw:?}");
    }

    #[rstest]
    #[case(OptionKind::Float64, "2.5", Value::Float64(2.5))]
    #[case(OptionKind::Int32, "-10", Value::Int32(-10))]
    #[case(OptionKind::Int64, "-9000000000", Value::Int64(-9_000_000_000))]
    #[case(OptionKind::Text, "mongodb://localhost:27017/db", Value::Text("mongodb://localhost:27017/db".to_owned()))]
    #[case(OptionKind::Uint32, "10", Value::Uint32(10))]
    #[case(OptionKind::Uint64, "18446744073709551615", Value::Uint64(u64::MAX))]
    #[expect(
        clippy::needless_pass_by_value,
        reason = "rstest passes case values by value"
    )]
    fn parses_and_formats(#[case] kind: OptionKind, #[case] raw: &str, #[case] expected: Value) {
        let parsed = kind.parse(raw);
        assert_eq!(parsed, Ok(expected.clone()));
        assert_eq!(expected.to_string(), raw);
        assert_eq!(expected.kind(), kind);
    }

    #[rstest]
    fn zero_values_match_kind() {
        for kind in [
            OptionKind::Bool,
            OptionKind::Float64,
            OptionKind::Int32,
            OptionKind::Int64,
            OptionKind::Text,
            OptionKind::Uint32,
            OptionKind::Uint64,
        ] {
            assert_eq!(kind.zero().map(|v| v.kind()), Some(kind));
        }
        assert_eq!(OptionKind::TextList.zero(), None);
    }

    #[rstest]
    fn display_uses_rust_type_names() {
        assert_eq!(OptionKind::TextList.to_string(), "Vec<String>");
        assert_eq!(OptionKind::Uint64.to_string(), "u64");
    }
}
