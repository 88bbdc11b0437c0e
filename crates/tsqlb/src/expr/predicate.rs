//! Boolean expressions for WHERE / HAVING / ON clauses.
//!
//! `AND` and `OR` join the two rendered sides with the bare keyword; no
//! parentheses are added. SQL's own precedence (AND before OR) applies to the
//! output, so `a.and(b).or(c)` renders `a AND b OR c`. Use
//! [`Predicate::grouped`] when a different grouping is needed:
//!
//! ```
//! use tsqlb::Ref;
//!
//! let price = Ref::column(None, "ListPrice");
//! let color = Ref::column(None, "Color");
//!
//! let p = color
//!     .is_equal_to("Red")
//!     .and(price.is_less_than(10).or(price.is_greater_than(100)).grouped());
//! assert_eq!(p.render(), "Color = 'Red' AND (ListPrice < 10 OR ListPrice > 100)");
//! ```

use super::reference::{Ref, Subquery};
use std::fmt;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of `IN` / `NOT IN`.
#[derive(Debug, Clone, PartialEq)]
pub enum InSet {
    /// `(v1, v2, ...)`
    List(Vec<Ref>),
    /// `(SELECT ...)`
    Subquery(Subquery),
}

impl From<Subquery> for InSet {
    fn from(sub: Subquery) -> Self {
        InSet::Subquery(sub)
    }
}

impl<T: Into<Ref>> From<Vec<T>> for InSet {
    fn from(values: Vec<T>) -> Self {
        InSet::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Ref>, const N: usize> From<[T; N]> for InSet {
    fn from(values: [T; N]) -> Self {
        InSet::List(values.into_iter().map(Into::into).collect())
    }
}

/// Boolean expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `left op right`
    Compare { left: Ref, op: CompareOp, right: Ref },
    /// `left AND right`
    And(Box<Predicate>, Box<Predicate>),
    /// `left OR right`
    Or(Box<Predicate>, Box<Predicate>),
    /// `NOT (inner)`
    Not(Box<Predicate>),
    /// `(inner)`
    Group(Box<Predicate>),
    /// `[NOT ]EXISTS (subquery)`
    Exists { subquery: Subquery, negated: bool },
    /// `operand [NOT ]IN (...)`
    In {
        operand: Ref,
        set: InSet,
        negated: bool,
    },
    /// `operand [NOT ]LIKE 'pattern'[ ESCAPE 'c']`
    Like {
        operand: Ref,
        pattern: String,
        escape: Option<String>,
        negated: bool,
    },
    /// `operand IS [NOT ]NULL`
    NullCheck { operand: Ref, is_null: bool },
    /// `operand [NOT ]BETWEEN low AND high`
    Between {
        operand: Ref,
        low: Ref,
        high: Ref,
        negated: bool,
    },
}

impl Predicate {
    /// `EXISTS (subquery)`
    pub fn exists(subquery: Subquery) -> Self {
        Predicate::Exists {
            subquery,
            negated: false,
        }
    }

    /// `NOT EXISTS (subquery)`
    pub fn not_exists(subquery: Subquery) -> Self {
        Predicate::Exists {
            subquery,
            negated: true,
        }
    }

    /// `operand [NOT ]LIKE 'pattern'[ ESCAPE 'escape']`
    pub fn like(
        operand: impl Into<Ref>,
        pattern: impl Into<String>,
        escape: Option<String>,
        negated: bool,
    ) -> Self {
        Predicate::Like {
            operand: operand.into(),
            pattern: pattern.into(),
            escape,
            negated,
        }
    }

    /// `self AND other`
    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// `self OR other`
    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// `NOT (self)`
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// `(self)`
    pub fn grouped(self) -> Self {
        Predicate::Group(Box::new(self))
    }

    /// Left-fold with AND. `None` for an empty input.
    pub fn all(preds: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        preds.into_iter().reduce(Predicate::and)
    }

    /// Left-fold with OR. `None` for an empty input.
    pub fn any(preds: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        preds.into_iter().reduce(Predicate::or)
    }

    /// Render the predicate as SQL.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        match self {
            Predicate::Compare { left, op, right } => {
                left.write_sql(out);
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                right.write_sql(out);
            }
            Predicate::And(l, r) => {
                l.write_sql(out);
                out.push_str(" AND ");
                r.write_sql(out);
            }
            Predicate::Or(l, r) => {
                l.write_sql(out);
                out.push_str(" OR ");
                r.write_sql(out);
            }
            Predicate::Not(inner) => {
                out.push_str("NOT (");
                inner.write_sql(out);
                out.push(')');
            }
            Predicate::Group(inner) => {
                out.push('(');
                inner.write_sql(out);
                out.push(')');
            }
            Predicate::Exists { subquery, negated } => {
                if *negated {
                    out.push_str("NOT ");
                }
                out.push_str("EXISTS ");
                subquery.write_sql(out);
            }
            Predicate::In {
                operand,
                set,
                negated,
            } => {
                operand.write_sql(out);
                out.push_str(if *negated { " NOT IN " } else { " IN " });
                match set {
                    InSet::Subquery(sub) => sub.write_sql(out),
                    InSet::List(values) => {
                        out.push('(');
                        for (i, v) in values.iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            v.write_sql(out);
                        }
                        out.push(')');
                    }
                }
            }
            Predicate::Like {
                operand,
                pattern,
                escape,
                negated,
            } => {
                operand.write_sql(out);
                out.push_str(if *negated { " NOT LIKE '" } else { " LIKE '" });
                out.push_str(pattern);
                out.push('\'');
                if let Some(esc) = escape {
                    out.push_str(" ESCAPE '");
                    out.push_str(esc);
                    out.push('\'');
                }
            }
            Predicate::NullCheck { operand, is_null } => {
                operand.write_sql(out);
                out.push_str(if *is_null { " IS NULL" } else { " IS NOT NULL" });
            }
            Predicate::Between {
                operand,
                low,
                high,
                negated,
            } => {
                operand.write_sql(out);
                out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                low.write_sql(out);
                out.push_str(" AND ");
                high.write_sql(out);
            }
        }
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
