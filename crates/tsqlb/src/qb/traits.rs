use crate::error::BuildResult;
use std::fmt;

/// Kind of statement a builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// SELECT query
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base trait for statement builders.
pub trait Statement {
    /// Which statement this builder renders.
    fn kind(&self) -> StatementKind;

    /// Validate builder state.
    ///
    /// Reports the first deferred registration error, then any structural
    /// problem (missing FROM, empty INSERT, ...).
    fn validate(&self) -> BuildResult<()>;

    /// Render the SQL string without validating.
    ///
    /// Prefer [`Statement::build`]; this renders whatever has been registered,
    /// even when the result would not be a valid statement.
    fn build_sql(&self) -> String;

    /// Validate, then render.
    fn build(&self) -> BuildResult<String> {
        let result = self.validate().map(|()| self.build_sql());
        log_build(self.kind(), &result);
        result
    }

    /// Debug helper: the SQL, or the error message when validation fails.
    fn to_sql(&self) -> String {
        match self.build() {
            Ok(sql) => sql,
            Err(e) => e.to_string(),
        }
    }
}

#[cfg(feature = "tracing")]
fn log_build(kind: StatementKind, result: &BuildResult<String>) {
    match result {
        Ok(sql) => tracing::debug!(
            target: "tsqlb.sql",
            kind = %kind,
            sql = %sql,
            "statement built"
        ),
        Err(error) => tracing::warn!(
            target: "tsqlb.sql",
            kind = %kind,
            error = %error,
            "statement build failed"
        ),
    }
}

#[cfg(not(feature = "tracing"))]
#[inline]
fn log_build(_kind: StatementKind, _result: &BuildResult<String>) {}
