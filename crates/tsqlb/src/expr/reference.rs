//! Value references: the nodes every expression is built from.
//!
//! A [`Ref`] is immutable. Every combinator takes `&self` and returns a fresh
//! node, so one column reference can feed the select list, a predicate and the
//! ORDER BY of the same statement.

use super::functions::FunctionCall;
use super::literal::Literal;
use super::predicate::{CompareOp, InSet, Predicate};
use std::fmt;

/// A column, optionally qualified by a table alias and optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table_alias: Option<String>,
    pub column: String,
    pub alias: Option<String>,
}

impl ColumnRef {
    pub fn new(table_alias: Option<&str>, column: impl Into<String>) -> Self {
        Self {
            table_alias: table_alias.map(str::to_string),
            column: column.into(),
            alias: None,
        }
    }

    /// Unqualified column.
    pub fn bare(column: impl Into<String>) -> Self {
        Self::new(None, column)
    }

    /// `alias.*` (or `*`).
    pub fn star(table_alias: Option<&str>) -> Self {
        Self::new(table_alias, "*")
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        if let Some(t) = &self.table_alias {
            out.push_str(t);
            out.push('.');
        }
        out.push_str(&self.column);
        if let Some(a) = &self.alias {
            out.push_str(" AS ");
            out.push_str(a);
        }
    }
}

/// A nested statement, rendered once and kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subquery(String);

impl Subquery {
    /// Wrap already-built statement text.
    pub fn new(sql: impl Into<String>) -> Self {
        Subquery(sql.into())
    }

    /// The nested statement without the surrounding parentheses.
    pub fn sql(&self) -> &str {
        &self.0
    }

    /// `(<statement>)`
    pub fn render(&self) -> String {
        format!("({})", self.0)
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('(');
        out.push_str(&self.0);
        out.push(')');
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Expression node.
///
/// Rendering dispatches on the variant; no node ever consults state outside
/// itself, so the same node always renders the same text.
#[derive(Debug, Clone, PartialEq)]
pub enum Ref {
    /// `[t.]col[ AS alias]`
    Column(ColumnRef),
    /// Inline literal
    Literal(Literal),
    /// `(left op right)`, always parenthesized
    Calculated {
        left: Box<Ref>,
        op: ArithOp,
        right: Box<Ref>,
    },
    /// `inner AS alias`
    Aliased { inner: Box<Ref>, alias: String },
    /// `NAME([DISTINCT ]args...)`
    Function(FunctionCall),
    /// `(<nested statement>)`
    Subquery(Subquery),
    /// Verbatim fragment (keywords such as a DATEDIFF date part).
    Raw(String),
}

impl Ref {
    /// Column reference (`t.col` or `col`).
    pub fn column(table_alias: Option<&str>, column: impl Into<String>) -> Self {
        Ref::Column(ColumnRef::new(table_alias, column))
    }

    /// Inline literal.
    pub fn literal(value: impl Into<Literal>) -> Self {
        Ref::Literal(value.into())
    }

    /// Verbatim SQL fragment.
    ///
    /// This is inserted as-is. The caller must ensure it is well formed.
    pub fn raw(sql: impl Into<String>) -> Self {
        Ref::Raw(sql.into())
    }

    // ==================== Arithmetic ====================

    fn calculated(&self, op: ArithOp, right: impl Into<Ref>) -> Ref {
        Ref::Calculated {
            left: Box::new(self.clone()),
            op,
            right: Box::new(right.into()),
        }
    }

    /// `(self + right)`
    pub fn plus(&self, right: impl Into<Ref>) -> Ref {
        self.calculated(ArithOp::Add, right)
    }

    /// `(self - right)`
    pub fn minus(&self, right: impl Into<Ref>) -> Ref {
        self.calculated(ArithOp::Sub, right)
    }

    /// `(self * right)`
    pub fn multiplied_by(&self, right: impl Into<Ref>) -> Ref {
        self.calculated(ArithOp::Mul, right)
    }

    /// `(self / right)`
    pub fn divided_by(&self, right: impl Into<Ref>) -> Ref {
        self.calculated(ArithOp::Div, right)
    }

    // ==================== Aliasing ====================

    /// `self AS alias`. Aliasing an aliased node appends a second `AS`.
    pub fn alias(&self, alias: impl Into<String>) -> Ref {
        Ref::Aliased {
            inner: Box::new(self.clone()),
            alias: alias.into(),
        }
    }

    /// The alias this node carries, if any.
    pub fn alias_token(&self) -> Option<&str> {
        match self {
            Ref::Column(c) => c.alias.as_deref(),
            Ref::Aliased { alias, .. } => Some(alias.as_str()),
            _ => None,
        }
    }

    // ==================== Comparisons ====================

    /// `self op right`
    ///
    /// Integers, text, booleans, dates and uuids convert into the right-hand
    /// side directly. Floats have no infallible conversion since NaN and
    /// infinities have no SQL form; wrap them with [`Literal::float`]:
    ///
    /// ```
    /// use tsqlb::{CompareOp, Literal, Ref};
    ///
    /// let price = Ref::column(None, "ListPrice");
    /// let p = price.compare(CompareOp::Gt, Literal::float(10.5)?);
    /// assert_eq!(p.render(), "ListPrice > 10.5");
    /// # Ok::<(), tsqlb::BuildError>(())
    /// ```
    pub fn compare(&self, op: CompareOp, right: impl Into<Ref>) -> Predicate {
        Predicate::Compare {
            left: self.clone(),
            op,
            right: right.into(),
        }
    }

    pub fn is_equal_to(&self, right: impl Into<Ref>) -> Predicate {
        self.compare(CompareOp::Eq, right)
    }

    pub fn is_not_equal_to(&self, right: impl Into<Ref>) -> Predicate {
        self.compare(CompareOp::Ne, right)
    }

    pub fn is_greater_than(&self, right: impl Into<Ref>) -> Predicate {
        self.compare(CompareOp::Gt, right)
    }

    pub fn is_greater_or_equal(&self, right: impl Into<Ref>) -> Predicate {
        self.compare(CompareOp::Gte, right)
    }

    pub fn is_less_than(&self, right: impl Into<Ref>) -> Predicate {
        self.compare(CompareOp::Lt, right)
    }

    pub fn is_less_or_equal(&self, right: impl Into<Ref>) -> Predicate {
        self.compare(CompareOp::Lte, right)
    }

    // ==================== Pattern / set / null ====================

    /// `self LIKE 'pattern'` (pattern inserted verbatim)
    pub fn is_like(&self, pattern: impl Into<String>) -> Predicate {
        Predicate::like(self.clone(), pattern, None, false)
    }

    /// `self LIKE 'pattern' ESCAPE 'escape'`
    pub fn is_like_escaped(&self, pattern: impl Into<String>, escape: impl Into<String>) -> Predicate {
        Predicate::like(self.clone(), pattern, Some(escape.into()), false)
    }

    /// `self NOT LIKE 'pattern'`
    pub fn is_not_like(&self, pattern: impl Into<String>) -> Predicate {
        Predicate::like(self.clone(), pattern, None, true)
    }

    /// `self IN (...)`: a value list or a subquery.
    pub fn is_in(&self, set: impl Into<InSet>) -> Predicate {
        Predicate::In {
            operand: self.clone(),
            set: set.into(),
            negated: false,
        }
    }

    /// `self NOT IN (...)`
    pub fn is_not_in(&self, set: impl Into<InSet>) -> Predicate {
        Predicate::In {
            operand: self.clone(),
            set: set.into(),
            negated: true,
        }
    }

    /// `self IS NULL`
    pub fn is_null(&self) -> Predicate {
        Predicate::NullCheck {
            operand: self.clone(),
            is_null: true,
        }
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(&self) -> Predicate {
        Predicate::NullCheck {
            operand: self.clone(),
            is_null: false,
        }
    }

    /// `self BETWEEN low AND high`
    pub fn is_between(&self, low: impl Into<Ref>, high: impl Into<Ref>) -> Predicate {
        Predicate::Between {
            operand: self.clone(),
            low: low.into(),
            high: high.into(),
            negated: false,
        }
    }

    /// `self NOT BETWEEN low AND high`
    pub fn is_not_between(&self, low: impl Into<Ref>, high: impl Into<Ref>) -> Predicate {
        Predicate::Between {
            operand: self.clone(),
            low: low.into(),
            high: high.into(),
            negated: true,
        }
    }

    // ==================== Rendering ====================

    /// Render the node as SQL.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        match self {
            Ref::Column(c) => c.write_sql(out),
            Ref::Literal(l) => l.write_sql(out),
            Ref::Calculated { left, op, right } => {
                out.push('(');
                left.write_sql(out);
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                right.write_sql(out);
                out.push(')');
            }
            Ref::Aliased { inner, alias } => {
                inner.write_sql(out);
                out.push_str(" AS ");
                out.push_str(alias);
            }
            Ref::Function(call) => call.write_sql(out),
            Ref::Subquery(sub) => sub.write_sql(out),
            Ref::Raw(sql) => out.push_str(sql),
        }
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<ColumnRef> for Ref {
    fn from(c: ColumnRef) -> Self {
        Ref::Column(c)
    }
}

impl From<&ColumnRef> for Ref {
    fn from(c: &ColumnRef) -> Self {
        Ref::Column(c.clone())
    }
}

impl From<&Ref> for Ref {
    fn from(r: &Ref) -> Self {
        r.clone()
    }
}

impl From<Literal> for Ref {
    fn from(l: Literal) -> Self {
        Ref::Literal(l)
    }
}

impl From<FunctionCall> for Ref {
    fn from(call: FunctionCall) -> Self {
        Ref::Function(call)
    }
}

impl From<Subquery> for Ref {
    fn from(sub: Subquery) -> Self {
        Ref::Subquery(sub)
    }
}

// Plain values on the right-hand side become literals.
macro_rules! impl_ref_from_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Ref {
                fn from(value: $t) -> Self {
                    Ref::Literal(Literal::from(value))
                }
            }
        )*
    };
}

impl_ref_from_literal!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    &str,
    String,
    &String,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    uuid::Uuid
);

#[cfg(feature = "rust_decimal")]
impl_ref_from_literal!(rust_decimal::Decimal);

impl<T: Into<Literal>> From<Option<T>> for Ref {
    fn from(value: Option<T>) -> Self {
        Ref::Literal(Literal::from(value))
    }
}

macro_rules! impl_arith_op {
    ($($trait:ident, $method:ident, $op:expr);*) => {
        $(
            impl<R: Into<Ref>> std::ops::$trait<R> for Ref {
                type Output = Ref;

                fn $method(self, rhs: R) -> Ref {
                    Ref::Calculated {
                        left: Box::new(self),
                        op: $op,
                        right: Box::new(rhs.into()),
                    }
                }
            }
        )*
    };
}

impl_arith_op!(
    Add, add, ArithOp::Add;
    Sub, sub, ArithOp::Sub;
    Mul, mul, ArithOp::Mul;
    Div, div, ArithOp::Div
);
