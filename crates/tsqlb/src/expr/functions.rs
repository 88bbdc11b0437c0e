//! Scalar and aggregate SQL function constructors.
//!
//! Each constructor returns a [`Ref`], so function calls compose with the rest
//! of the algebra: `upper(concat(..)).alias("FullName")`.

use super::reference::Ref;
use std::borrow::Cow;
use std::fmt;

/// A function call node: `NAME([DISTINCT ]arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Cow<'static, str>,
    pub distinct: bool,
    pub args: Vec<Ref>,
}

impl FunctionCall {
    pub fn new(name: impl Into<Cow<'static, str>>, args: Vec<Ref>) -> Self {
        Self {
            name: name.into(),
            distinct: false,
            args,
        }
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push('(');
        if self.distinct {
            out.push_str("DISTINCT ");
        }
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            arg.write_sql(out);
        }
        out.push(')');
    }
}

/// Date parts accepted by `DATEDIFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    DayOfYear,
    Day,
    Week,
    Weekday,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl DatePart {
    pub fn as_str(self) -> &'static str {
        match self {
            DatePart::Year => "year",
            DatePart::Quarter => "quarter",
            DatePart::Month => "month",
            DatePart::DayOfYear => "dayofyear",
            DatePart::Day => "day",
            DatePart::Week => "week",
            DatePart::Weekday => "weekday",
            DatePart::Hour => "hour",
            DatePart::Minute => "minute",
            DatePart::Second => "second",
            DatePart::Millisecond => "millisecond",
            DatePart::Microsecond => "microsecond",
            DatePart::Nanosecond => "nanosecond",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic call: `name(args...)`.
pub fn call<I, T>(name: impl Into<Cow<'static, str>>, args: I) -> Ref
where
    I: IntoIterator<Item = T>,
    T: Into<Ref>,
{
    Ref::Function(FunctionCall::new(
        name,
        args.into_iter().map(Into::into).collect(),
    ))
}

fn unary(name: &'static str, expr: impl Into<Ref>) -> Ref {
    Ref::Function(FunctionCall::new(name, vec![expr.into()]))
}

/// `CONCAT(a, b, ...)`. Plain strings become literals.
pub fn concat<I, T>(parts: I) -> Ref
where
    I: IntoIterator<Item = T>,
    T: Into<Ref>,
{
    call("CONCAT", parts)
}

/// `COUNT(expr)`
pub fn count(expr: impl Into<Ref>) -> Ref {
    unary("COUNT", expr)
}

/// `COUNT(DISTINCT expr)`
pub fn count_distinct(expr: impl Into<Ref>) -> Ref {
    Ref::Function(FunctionCall {
        name: Cow::Borrowed("COUNT"),
        distinct: true,
        args: vec![expr.into()],
    })
}

/// `AVG(expr)`
pub fn avg(expr: impl Into<Ref>) -> Ref {
    unary("AVG", expr)
}

/// `SUM(expr)`
pub fn sum(expr: impl Into<Ref>) -> Ref {
    unary("SUM", expr)
}

/// `MIN(expr)`
pub fn min(expr: impl Into<Ref>) -> Ref {
    unary("MIN", expr)
}

/// `MAX(expr)`
pub fn max(expr: impl Into<Ref>) -> Ref {
    unary("MAX", expr)
}

/// `DATEDIFF(part, start, end)`
pub fn datediff(part: DatePart, start: impl Into<Ref>, end: impl Into<Ref>) -> Ref {
    Ref::Function(FunctionCall::new(
        "DATEDIFF",
        vec![Ref::Raw(part.as_str().to_string()), start.into(), end.into()],
    ))
}

/// `GETDATE()`
pub fn getdate() -> Ref {
    Ref::Function(FunctionCall::new("GETDATE", Vec::new()))
}

/// `UPPER(expr)`
pub fn upper(expr: impl Into<Ref>) -> Ref {
    unary("UPPER", expr)
}

/// `LOWER(expr)`
pub fn lower(expr: impl Into<Ref>) -> Ref {
    unary("LOWER", expr)
}

/// `COALESCE(a, b, ...)`
pub fn coalesce<I, T>(exprs: I) -> Ref
where
    I: IntoIterator<Item = T>,
    T: Into<Ref>,
{
    call("COALESCE", exprs)
}
