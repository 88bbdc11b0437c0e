//! SQL literal values.

use crate::error::{BuildError, BuildResult};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use uuid::Uuid;

/// A scalar rendered inline as a T-SQL literal.
///
/// - text: `'text'`, or `N'text'` for Unicode literals (embedded `'` doubled)
/// - numbers: decimal text form (`25`, `0.5`)
/// - booleans: `1` / `0`
/// - null: `NULL`
///
/// Floats must be finite; [`Literal::float`] and the `TryFrom` conversions
/// reject anything else with [`BuildError::UnsupportedValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct Literal(Kind);

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text { value: String, unicode: bool },
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Uuid(Uuid),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Literal {
    /// `NULL`
    pub fn null() -> Self {
        Literal(Kind::Null)
    }

    pub fn bool(value: bool) -> Self {
        Literal(Kind::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Literal(Kind::Int(value))
    }

    /// A floating point literal; NaN and infinities have no SQL form.
    pub fn float(value: f64) -> BuildResult<Self> {
        if !value.is_finite() {
            return Err(BuildError::unsupported_value(format!("non-finite number {value}")));
        }
        Ok(Literal(Kind::Float(value)))
    }

    /// `'value'`
    pub fn text(value: impl Into<String>) -> Self {
        Literal(Kind::Text {
            value: value.into(),
            unicode: false,
        })
    }

    /// `N'value'`
    pub fn ntext(value: impl Into<String>) -> Self {
        Literal(Kind::Text {
            value: value.into(),
            unicode: true,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self.0, Kind::Null)
    }

    /// Render the literal as SQL.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        use std::fmt::Write;

        match &self.0 {
            Kind::Null => out.push_str("NULL"),
            Kind::Bool(b) => out.push(if *b { '1' } else { '0' }),
            Kind::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Kind::Float(f) => {
                let _ = write!(out, "{f}");
            }
            Kind::Text { value, unicode } => {
                if *unicode {
                    out.push('N');
                }
                push_quoted(out, value);
            }
            Kind::Date(d) => {
                let _ = write!(out, "'{}'", d.format("%Y-%m-%d"));
            }
            Kind::DateTime(dt) => {
                let _ = write!(out, "'{}'", dt.format("%Y-%m-%dT%H:%M:%S%.f"));
            }
            Kind::Uuid(u) => {
                let _ = write!(out, "'{}'", u.hyphenated());
            }
            #[cfg(feature = "rust_decimal")]
            Kind::Decimal(d) => {
                let _ = write!(out, "{d}");
            }
        }
    }
}

fn push_quoted(out: &mut String, value: &str) {
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(value: $t) -> Self {
                    Literal::int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::text(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::text(value)
    }
}

impl From<&String> for Literal {
    fn from(value: &String) -> Self {
        Literal::text(value.as_str())
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal(Kind::Date(value))
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Self {
        Literal(Kind::DateTime(value))
    }
}

impl From<Uuid> for Literal {
    fn from(value: Uuid) -> Self {
        Literal(Kind::Uuid(value))
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Literal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Literal(Kind::Decimal(value))
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Literal::null(),
        }
    }
}

impl TryFrom<f64> for Literal {
    type Error = BuildError;

    fn try_from(value: f64) -> BuildResult<Self> {
        Literal::float(value)
    }
}

impl TryFrom<f32> for Literal {
    type Error = BuildError;

    fn try_from(value: f32) -> BuildResult<Self> {
        Literal::float(f64::from(value))
    }
}

impl TryFrom<i128> for Literal {
    type Error = BuildError;

    fn try_from(value: i128) -> BuildResult<Self> {
        i64::try_from(value)
            .map(Literal::int)
            .map_err(|_| BuildError::unsupported_value(format!("integer {value} exceeds BIGINT")))
    }
}

impl TryFrom<u64> for Literal {
    type Error = BuildError;

    fn try_from(value: u64) -> BuildResult<Self> {
        i64::try_from(value)
            .map(Literal::int)
            .map_err(|_| BuildError::unsupported_value(format!("integer {value} exceeds BIGINT")))
    }
}

impl TryFrom<serde_json::Value> for Literal {
    type Error = BuildError;

    fn try_from(value: serde_json::Value) -> BuildResult<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Literal::null()),
            Value::Bool(b) => Ok(Literal::bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Literal::int(i))
                } else if let Some(u) = n.as_u64() {
                    Literal::try_from(u)
                } else {
                    match n.as_f64() {
                        Some(f) => Literal::float(f),
                        None => Err(BuildError::unsupported_value(format!("number {n}"))),
                    }
                }
            }
            Value::String(s) => Ok(Literal::text(s)),
            Value::Array(_) => Err(BuildError::unsupported_value("array")),
            Value::Object(_) => Err(BuildError::unsupported_value("object")),
        }
    }
}
