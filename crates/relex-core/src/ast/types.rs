//! Literal values and their type codes.
//!
//! Every constant that reaches the SQL compiler is a [`Literal`]: a
//! [`SqlValue`] tagged with the [`TypeCode`] it was declared with. Literals
//! are never inlined into SQL text, they are handed to a parameter sink.

use core::fmt;
use core::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Primitive type tag carried by a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeCode {
    /// The NULL marker.
    DbNull,
    /// Boolean.
    Boolean,
    /// Single character.
    Char,
    /// Signed 8-bit integer.
    SByte,
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit float.
    Single,
    /// 64-bit float.
    Double,
    /// Fixed-point decimal.
    Decimal,
    /// Date and time without zone.
    DateTime,
    /// Text.
    #[default]
    String,
}

impl TypeCode {
    const ALL: [Self; 16] = [
        Self::DbNull,
        Self::Boolean,
        Self::Char,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Single,
        Self::Double,
        Self::Decimal,
        Self::DateTime,
        Self::String,
    ];

    /// Looks up a type code by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the canonical type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DbNull => "DBNull",
            Self::Boolean => "Boolean",
            Self::Char => "Char",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::DateTime => "DateTime",
            Self::String => "String",
        }
    }

    /// Converts text into a value of this type.
    ///
    /// Integer types are range-checked against their declared width.
    pub fn convert(self, text: &str) -> Result<SqlValue, String> {
        if self == Self::String {
            return Ok(SqlValue::Text(text.to_owned()));
        }
        let text = text.trim();
        let invalid = || format!("cannot convert '{text}' to {}", self.as_str());
        match self {
            Self::DbNull => Ok(SqlValue::Null),
            Self::String => Ok(SqlValue::Text(text.to_owned())),
            Self::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(SqlValue::Text(c.to_string())),
                    _ => Err(invalid()),
                }
            }
            Self::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(SqlValue::Bool(true)),
                "false" | "0" => Ok(SqlValue::Bool(false)),
                _ => Err(invalid()),
            },
            Self::SByte => parse_int::<i8>(text).ok_or_else(invalid),
            Self::Byte => parse_int::<u8>(text).ok_or_else(invalid),
            Self::Int16 => parse_int::<i16>(text).ok_or_else(invalid),
            Self::UInt16 => parse_int::<u16>(text).ok_or_else(invalid),
            Self::Int32 => parse_int::<i32>(text).ok_or_else(invalid),
            Self::UInt32 => parse_int::<u32>(text).ok_or_else(invalid),
            Self::Int64 => parse_int::<i64>(text).ok_or_else(invalid),
            Self::UInt64 => text
                .parse::<u64>()
                .ok()
                .and_then(|n| i64::try_from(n).ok())
                .map(SqlValue::Int)
                .ok_or_else(invalid),
            Self::Single | Self::Double => text
                .parse::<f64>()
                .map(SqlValue::Float)
                .map_err(|_| invalid()),
            Self::Decimal => Decimal::from_str(text)
                .map(SqlValue::Decimal)
                .map_err(|_| invalid()),
            Self::DateTime => parse_datetime(text)
                .map(SqlValue::DateTime)
                .ok_or_else(invalid),
        }
    }

    /// Infers the type of an unquoted constant: Int32, Int64, Double, or
    /// String when the text is not numeric.
    #[must_use]
    pub fn infer(text: &str) -> (Self, SqlValue) {
        if let Ok(n) = text.parse::<i32>() {
            (Self::Int32, SqlValue::Int(i64::from(n)))
        } else if let Ok(n) = text.parse::<i64>() {
            (Self::Int64, SqlValue::Int(n))
        } else if let Ok(f) = text.parse::<f64>() {
            (Self::Double, SqlValue::Float(f))
        } else {
            (Self::String, SqlValue::Text(text.to_owned()))
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_int<T>(text: &str) -> Option<SqlValue>
where
    T: FromStr + Into<i64>,
{
    text.parse::<T>().ok().map(|n| SqlValue::Int(n.into()))
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// A constant value handed to the parameter sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Decimal value.
    Decimal(Decimal),
    /// Text value.
    Text(String),
    /// Date/time value.
    DateTime(NaiveDateTime),
    /// Array of values (an IN candidate list).
    List(Vec<SqlValue>),
}

impl SqlValue {
    /// Returns true for the NULL value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the textual form used by the Relex builder and by variable
    /// formats. NULL renders as an empty string.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => String::from(if *b { "True" } else { "False" }),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Text(s) => s.clone(),
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            Self::List(items) => items
                .iter()
                .map(Self::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Infers a type code from the value itself.
    #[must_use]
    pub fn type_code(&self) -> TypeCode {
        match self {
            Self::Null => TypeCode::DbNull,
            Self::Bool(_) => TypeCode::Boolean,
            Self::Int(_) => TypeCode::Int64,
            Self::Float(_) => TypeCode::Double,
            Self::Decimal(_) => TypeCode::Decimal,
            Self::Text(_) => TypeCode::String,
            Self::DateTime(_) => TypeCode::DateTime,
            Self::List(items) => items.first().map_or(TypeCode::String, Self::type_code),
        }
    }
}

/// A typed constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The value.
    pub value: SqlValue,
    /// The declared type. For arrays this is the element type.
    pub type_code: TypeCode,
}

impl Literal {
    /// Creates a literal from any convertible value.
    #[must_use]
    pub fn new<T: ToSqlValue>(value: T) -> Self {
        let type_code = value.type_code();
        Self {
            value: value.to_sql_value(),
            type_code,
        }
    }

    /// Creates a literal with an explicit type code.
    #[must_use]
    pub const fn typed(value: SqlValue, type_code: TypeCode) -> Self {
        Self { value, type_code }
    }

    /// The NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            value: SqlValue::Null,
            type_code: TypeCode::DbNull,
        }
    }

    /// Returns true if the literal holds NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Returns true if the literal is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.value, SqlValue::List(_))
    }

    /// Splits an array literal into one literal per element. A scalar
    /// literal yields itself.
    #[must_use]
    pub fn elements(&self) -> Vec<Self> {
        match &self.value {
            SqlValue::List(items) => items
                .iter()
                .map(|item| Self::typed(item.clone(), self.type_code))
                .collect(),
            _ => vec![self.clone()],
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Returns the type code the value is declared with.
    fn type_code(&self) -> TypeCode;

    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn type_code(&self) -> TypeCode {
        Self::type_code(self)
    }

    fn to_sql_value(self) -> SqlValue {
        self
    }
}

macro_rules! int_to_sql_value {
    ($($ty:ty => $code:ident),* $(,)?) => {
        $(
            impl ToSqlValue for $ty {
                fn type_code(&self) -> TypeCode {
                    TypeCode::$code
                }

                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

int_to_sql_value! {
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
}

impl ToSqlValue for bool {
    fn type_code(&self) -> TypeCode {
        TypeCode::Boolean
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for f64 {
    fn type_code(&self) -> TypeCode {
        TypeCode::Double
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn type_code(&self) -> TypeCode {
        TypeCode::Single
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for Decimal {
    fn type_code(&self) -> TypeCode {
        TypeCode::Decimal
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::Decimal(self)
    }
}

impl ToSqlValue for NaiveDateTime {
    fn type_code(&self) -> TypeCode {
        TypeCode::DateTime
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self)
    }
}

impl ToSqlValue for char {
    fn type_code(&self) -> TypeCode {
        TypeCode::Char
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

impl ToSqlValue for String {
    fn type_code(&self) -> TypeCode {
        TypeCode::String
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn type_code(&self) -> TypeCode {
        TypeCode::String
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn type_code(&self) -> TypeCode {
        self.as_ref().map_or(TypeCode::DbNull, ToSqlValue::type_code)
    }

    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl<T: ToSqlValue> ToSqlValue for Vec<T> {
    fn type_code(&self) -> TypeCode {
        self.first().map_or(TypeCode::String, ToSqlValue::type_code)
    }

    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_lookup_is_case_insensitive() {
        assert_eq!(TypeCode::from_name("int32"), Some(TypeCode::Int32));
        assert_eq!(TypeCode::from_name("DATETIME"), Some(TypeCode::DateTime));
        assert_eq!(TypeCode::from_name("string"), Some(TypeCode::String));
        assert_eq!(TypeCode::from_name("varchar"), None);
    }

    #[test]
    fn test_convert_integers_checks_range() {
        assert_eq!(TypeCode::Int32.convert("42"), Ok(SqlValue::Int(42)));
        assert_eq!(TypeCode::Byte.convert("255"), Ok(SqlValue::Int(255)));
        assert!(TypeCode::Byte.convert("256").is_err());
        assert!(TypeCode::Int16.convert("abc").is_err());
        assert!(TypeCode::UInt64.convert("18446744073709551615").is_err());
    }

    #[test]
    fn test_convert_boolean_and_char() {
        assert_eq!(TypeCode::Boolean.convert("TRUE"), Ok(SqlValue::Bool(true)));
        assert_eq!(TypeCode::Boolean.convert("0"), Ok(SqlValue::Bool(false)));
        assert!(TypeCode::Boolean.convert("yes").is_err());
        assert_eq!(
            TypeCode::Char.convert("x"),
            Ok(SqlValue::Text(String::from("x")))
        );
        assert!(TypeCode::Char.convert("xy").is_err());
    }

    #[test]
    fn test_convert_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap();
        assert_eq!(
            TypeCode::DateTime.convert("2024-03-01 10:30:00"),
            Ok(SqlValue::DateTime(expected))
        );
        assert_eq!(
            TypeCode::DateTime.convert("2024-03-01T10:30:00"),
            Ok(SqlValue::DateTime(expected))
        );
        assert!(TypeCode::DateTime.convert("2024-03-01").is_ok());
        assert!(TypeCode::DateTime.convert("yesterday").is_err());
    }

    #[test]
    fn test_convert_decimal() {
        let value = TypeCode::Decimal.convert("54.30").unwrap();
        assert_eq!(value.to_text(), "54.30");
    }

    #[test]
    fn test_infer_bare_constants() {
        assert_eq!(TypeCode::infer("0"), (TypeCode::Int32, SqlValue::Int(0)));
        assert_eq!(
            TypeCode::infer("5000000000"),
            (TypeCode::Int64, SqlValue::Int(5_000_000_000))
        );
        assert_eq!(
            TypeCode::infer("54.3"),
            (TypeCode::Double, SqlValue::Float(54.3))
        );
        assert_eq!(
            TypeCode::infer("2024-01-01"),
            (TypeCode::String, SqlValue::Text(String::from("2024-01-01")))
        );
    }

    #[test]
    fn test_literal_new_keeps_declared_type() {
        assert_eq!(Literal::new(18_i32).type_code, TypeCode::Int32);
        assert_eq!(Literal::new(18_i64).type_code, TypeCode::Int64);
        assert_eq!(Literal::new("Anna").type_code, TypeCode::String);
        assert!(Literal::new(None::<i32>).is_null());
    }

    #[test]
    fn test_literal_elements() {
        let lit = Literal::new(vec![1_i32, 2, 3]);
        assert!(lit.is_array());
        let elements = lit.elements();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[1], Literal::typed(SqlValue::Int(2), TypeCode::Int32));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(SqlValue::Bool(true).to_text(), "True");
        assert_eq!(SqlValue::Float(54.3).to_text(), "54.3");
        assert_eq!(SqlValue::Null.to_text(), "");
        assert_eq!(
            SqlValue::List(vec![SqlValue::Int(1), SqlValue::Int(2)]).to_text(),
            "1,2"
        );
    }
}
